use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    forms::{FormError, MovieForm},
    models::SearchCandidate,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const PRIMARY_BUTTON: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const SECONDARY_BUTTON: &str =
    "rounded-md border border-gray-300 px-4 py-2 font-semibold text-gray-700 hover:bg-gray-100";

pub fn index_page(movies: &[movie::Model], flash: Option<&str>, csrf_token: &str) -> String {
    page(
        "My Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Movies" }
                            p class="mt-2 text-gray-600" { "Everything worth watching twice." }
                        }
                        a class=(PRIMARY_BUTTON) href="/add" { "Add movie" }
                    }

                    @if let Some(message) = flash {
                        div class="mt-6 rounded-md bg-blue-50 px-4 py-3 text-sm text-blue-800" { (message) }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie, csrf_token))
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Add or edit form. `search` adds the "find on TMDB" button used by the add page.
pub fn movie_form_page(
    heading: &str,
    action: &str,
    form: &MovieForm,
    errors: &[FormError],
    csrf_token: &str,
    search: bool,
) -> String {
    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (heading) }
                        @if search {
                            p class="mt-2 text-gray-600" { "Fill in everything, or enter just a title and search TMDB." }
                        }

                        form class="mt-8 space-y-6" method="post" action=(action) {
                            input type="hidden" name="csrf_token" value=(csrf_token);
                            (field("title", "Title", &form.title, errors))
                            (field("year", "Year", &form.year, errors))
                            (field("description", "Description", &form.description, errors))
                            (field("rating", "Rating", &form.rating, errors))
                            (field("ranking", "Ranking", &form.ranking, errors))
                            (field("review", "Review", &form.review, errors))
                            (field("img_url", "Image URL", &form.img_url, errors))

                            div class="flex gap-4" {
                                button class=(PRIMARY_BUTTON) type="submit" name="action" value="save" { "Save movie" }
                                @if search {
                                    button class=(SECONDARY_BUTTON) type="submit" name="action" value="search" { "Search TMDB" }
                                }
                                a class="px-4 py-2 text-gray-600 hover:text-gray-800" href="/" { "Cancel" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn select_page(title: &str, candidates: &[SearchCandidate], image_base_url: &str) -> String {
    page(
        "Select a movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Select a movie" }
                            p class="mt-2 text-gray-600" { "Results for \u{201c}" (title) "\u{201d}" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "Enter manually" }
                    }

                    @if candidates.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No matches found." }
                        }
                    } @else {
                        ul class="mt-10 space-y-4" {
                            @for candidate in candidates {
                                (candidate_card(candidate, image_base_url))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_card(movie: &movie::Model, csrf_token: &str) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" id=(format!("movie-{}", movie.id)) {
            img class="w-24 h-36 rounded object-cover bg-gray-200" src=(movie.img_url) alt=(movie.title);
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    span class="text-sm font-medium text-gray-700" { "#" (format_score(movie.ranking)) }
                }
                p class="mt-1 text-sm text-gray-700" { "Rating " span class="font-semibold" { (format_score(movie.rating)) } }
                p class="mt-2 text-gray-600" { (movie.description) }
                p class="mt-2 text-sm italic text-gray-500" { (movie.review) }

                div class="mt-4 flex gap-4 items-center" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Edit" }
                    form method="post" action=(format!("/delete/{}", movie.id)) {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn candidate_card(candidate: &SearchCandidate, image_base_url: &str) -> Markup {
    let import = candidate.import_fields(image_base_url);
    html! {
        li class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if let Some(poster) = candidate.poster_url(image_base_url) {
                img class="w-20 h-30 rounded object-cover" src=(poster) alt=(candidate.title);
            }
            div class="flex-1" {
                h2 class="text-lg font-semibold text-gray-900" {
                    (candidate.title)
                    @if let Some(date) = &candidate.release_date {
                        span class="ml-2 font-normal text-gray-500" { "(" (date) ")" }
                    }
                }
                p class="mt-2 text-sm text-gray-600" { (candidate.overview) }
                a class="mt-4 inline-block text-sm font-semibold text-blue-600 hover:text-blue-800" href=(import.add_url()) { "Use this movie" }
            }
        }
    }
}

fn field(name: &str, label: &str, value: &str, errors: &[FormError]) -> Markup {
    let messages: Vec<String> =
        errors.iter().filter(|e| e.field() == label).map(ToString::to_string).collect();
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) name=(name) id=(name) value=(value);
            @for message in &messages {
                p class="mt-2 text-sm text-red-600" { (message) }
            }
        }
    }
}

fn format_score(score: f64) -> String {
    format!("{score:.1}")
}
