use serde::Deserialize;

use crate::{
    entities::movie,
    models::{MovieInput, TEXT_LIMIT},
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a whole number")]
    NotInteger(&'static str),
    #[error("{0} must be a number")]
    NotNumber(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl FormError {
    pub fn field(&self) -> &'static str {
        match self {
            FormError::Missing(f) | FormError::NotInteger(f) | FormError::NotNumber(f) => *f,
            FormError::TooLong { field, .. } => *field,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    #[default]
    Save,
    Search,
}

/// Raw add/edit form submission. Unknown keys are rejected by the extractor.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovieForm {
    pub csrf_token: String,
    pub action: FormAction,
    pub title: String,
    pub year: String,
    pub description: String,
    pub rating: String,
    pub ranking: String,
    pub review: String,
    pub img_url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteForm {
    #[serde(default)]
    pub csrf_token: String,
}

/// Pre-fill values for `GET /add`, typically produced by picking a search candidate.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddQuery {
    pub title: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

impl From<AddQuery> for MovieForm {
    fn from(q: AddQuery) -> Self {
        Self {
            title: q.title.unwrap_or_default(),
            year: q.year.unwrap_or_default(),
            description: q.description.unwrap_or_default(),
            img_url: q.img_url.unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl From<&movie::Model> for MovieForm {
    fn from(m: &movie::Model) -> Self {
        Self {
            title: m.title.clone(),
            year: m.year.to_string(),
            description: m.description.clone(),
            rating: m.rating.to_string(),
            ranking: m.ranking.to_string(),
            review: m.review.clone(),
            img_url: m.img_url.clone(),
            ..Self::default()
        }
    }
}

impl MovieForm {
    /// Checks every field and returns either a complete input or all problems found.
    pub fn validate(&self) -> Result<MovieInput, Vec<FormError>> {
        let mut errors = Vec::new();

        let title = text(&self.title, "Title", &mut errors);
        let year = integer(&self.year, "Year", &mut errors);
        let description = text(&self.description, "Description", &mut errors);
        let rating = number(&self.rating, "Rating", &mut errors);
        let ranking = number(&self.ranking, "Ranking", &mut errors);
        let review = text(&self.review, "Review", &mut errors);
        let img_url = text(&self.img_url, "Image URL", &mut errors);

        match (title, year, description, rating, ranking, review, img_url) {
            (
                Some(title),
                Some(year),
                Some(description),
                Some(rating),
                Some(ranking),
                Some(review),
                Some(img_url),
            ) if errors.is_empty() => {
                Ok(MovieInput { title, year, description, rating, ranking, review, img_url })
            },
            _ => Err(errors),
        }
    }

    /// Title to search for when the add form was submitted with `action=search`.
    pub fn search_title(&self) -> Result<&str, FormError> {
        let title = self.title.trim();
        if title.is_empty() { Err(FormError::Missing("Title")) } else { Ok(title) }
    }
}

fn required<'a>(value: &'a str, field: &'static str, errors: &mut Vec<FormError>) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FormError::Missing(field));
        None
    } else {
        Some(value)
    }
}

fn text(value: &str, field: &'static str, errors: &mut Vec<FormError>) -> Option<String> {
    let value = required(value, field, errors)?;
    if value.chars().count() > TEXT_LIMIT {
        errors.push(FormError::TooLong { field, max: TEXT_LIMIT });
        return None;
    }
    Some(value.to_string())
}

fn integer(value: &str, field: &'static str, errors: &mut Vec<FormError>) -> Option<i32> {
    let value = required(value, field, errors)?;
    match value.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(FormError::NotInteger(field));
            None
        },
    }
}

fn number(value: &str, field: &'static str, errors: &mut Vec<FormError>) -> Option<f64> {
    let value = required(value, field, errors)?;
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(FormError::NotNumber(field));
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MovieForm {
        MovieForm {
            title: " Inception ".into(),
            year: "2010".into(),
            description: "Dreams within dreams.".into(),
            rating: "8.8".into(),
            ranking: "1".into(),
            review: "Great.".into(),
            img_url: "https://example.com/inception.jpg".into(),
            ..MovieForm::default()
        }
    }

    #[test]
    fn valid_form_produces_trimmed_input() {
        let input = filled().validate().unwrap();
        assert_eq!(input.title, "Inception");
        assert_eq!(input.year, 2010);
        assert_eq!(input.rating, 8.8);
        assert_eq!(input.ranking, 1.0);
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = MovieForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(FormError::field).collect();
        assert_eq!(
            fields,
            vec!["Title", "Year", "Description", "Rating", "Ranking", "Review", "Image URL"]
        );
        assert!(errors.iter().all(|e| matches!(e, FormError::Missing(_))));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let form = MovieForm {
            year: "twenty ten".into(),
            rating: "great".into(),
            ranking: "NaN".into(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FormError::NotInteger("Year"),
                FormError::NotNumber("Rating"),
                FormError::NotNumber("Ranking"),
            ]
        );
    }

    #[test]
    fn overlong_text_is_rejected() {
        let form = MovieForm { review: "x".repeat(TEXT_LIMIT + 1), ..filled() };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![FormError::TooLong { field: "Review", max: TEXT_LIMIT }]);
        assert_eq!(errors[0].to_string(), "Review must be at most 100 characters");
    }

    #[test]
    fn text_at_the_limit_is_accepted() {
        let form = MovieForm { description: "é".repeat(TEXT_LIMIT), ..filled() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn search_requires_a_title() {
        assert_eq!(MovieForm::default().search_title(), Err(FormError::Missing("Title")));
        assert_eq!(filled().search_title(), Ok("Inception"));
    }

    #[test]
    fn model_round_trips_through_the_form() {
        let model = movie::Model {
            id: 7,
            title: "Heat".into(),
            year: 1995,
            description: "Cops and robbers.".into(),
            rating: 9.0,
            ranking: 2.5,
            review: "Diner scene.".into(),
            img_url: "https://example.com/heat.jpg".into(),
        };
        let input = MovieForm::from(&model).validate().unwrap();
        assert_eq!(input, MovieInput::from(model));
    }
}
