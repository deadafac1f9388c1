use jiff::civil::Date;

use crate::entities::movie;

/// Maximum length, in characters, of every text column on `movie`.
pub const TEXT_LIMIT: usize = 100;

/// Every writable field of a movie. `create` and `update` both take the full set.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: f64,
    pub ranking: f64,
    pub review: String,
    pub img_url: String,
}

impl From<movie::Model> for MovieInput {
    fn from(m: movie::Model) -> Self {
        Self {
            title: m.title,
            year: m.year,
            description: m.description,
            rating: m.rating,
            ranking: m.ranking,
            review: m.review,
            img_url: m.img_url,
        }
    }
}

/// A search hit from TMDB. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchCandidate {
    pub tmdb_id: i32,
    pub title: String,
    pub release_date: Option<String>,
    pub year: Option<i16>,
    pub overview: String,
    pub poster_path: Option<String>,
}

impl SearchCandidate {
    pub fn new(
        tmdb_id: i32,
        title: String,
        release_date: Option<String>,
        overview: String,
        poster_path: Option<String>,
    ) -> Self {
        let release_date = release_date.filter(|d| !d.trim().is_empty());
        let year = release_date.as_deref().and_then(|d| d.parse::<Date>().ok()).map(|d| d.year());
        let poster_path = poster_path.filter(|p| !p.trim().is_empty());
        Self { tmdb_id, title, release_date, year, overview, poster_path }
    }

    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| format!("{}/{}", image_base_url.trim_end_matches('/'), p.trim_start_matches('/')))
    }

    /// The subset of this candidate that pre-fills the add form, clipped to column limits.
    pub fn import_fields(&self, image_base_url: &str) -> ImportFields {
        ImportFields {
            title: truncate_chars(&self.title, TEXT_LIMIT),
            year: self.year.map(i32::from),
            description: truncate_chars(&self.overview, TEXT_LIMIT),
            img_url: self.poster_url(image_base_url).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportFields {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub img_url: String,
}

impl ImportFields {
    pub fn add_url(&self) -> String {
        let mut url = format!("/add?title={}", urlencoding::encode(&self.title));
        if let Some(year) = self.year {
            url.push_str(&format!("&year={year}"));
        }
        if !self.description.is_empty() {
            url.push_str(&format!("&description={}", urlencoding::encode(&self.description)));
        }
        if !self.img_url.is_empty() {
            url.push_str(&format!("&img_url={}", urlencoding::encode(&self.img_url)));
        }
        url
    }
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn godfather() -> SearchCandidate {
        SearchCandidate::new(
            238,
            "The Godfather".to_string(),
            Some("1972-03-14".to_string()),
            "Spanning the years 1945 to 1955, a chronicle of the fictional Italian-American Corleone crime family. When organized crime family patriarch, Vito Corleone barely survives an attempt on his life, his youngest son, Michael steps in to take care of the would-be killers, launching a campaign of bloody revenge.".to_string(),
            Some("/3bhkrj58Vtu7enYsRolD1fZdja1.jpg".to_string()),
        )
    }

    #[test]
    fn year_is_taken_from_release_date() {
        assert_eq!(godfather().year, Some(1972));
    }

    #[test]
    fn blank_release_date_has_no_year() {
        let c = SearchCandidate::new(1, "Untitled".into(), Some(String::new()), String::new(), None);
        assert_eq!(c.release_date, None);
        assert_eq!(c.year, None);
    }

    #[test]
    fn import_clips_overview_and_builds_poster_url() {
        let fields = godfather().import_fields("https://image.tmdb.org/t/p/w500/");
        assert_eq!(fields.title, "The Godfather");
        assert_eq!(fields.year, Some(1972));
        assert_eq!(fields.description.chars().count(), TEXT_LIMIT);
        assert_eq!(fields.img_url, "https://image.tmdb.org/t/p/w500/3bhkrj58Vtu7enYsRolD1fZdja1.jpg");
    }

    #[test]
    fn add_url_encodes_fields() {
        let fields = ImportFields {
            title: "Amélie & co".into(),
            year: Some(2001),
            description: String::new(),
            img_url: String::new(),
        };
        assert_eq!(fields.add_url(), "/add?title=Am%C3%A9lie%20%26%20co&year=2001");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
