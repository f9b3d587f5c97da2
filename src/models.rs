use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// The two normalized values a movie status may hold.
pub const MOVIE_STATUS_VALUES: [&str; 2] = ["released", "not released"];

/// Trims and lowercases a status value, rejecting anything outside the
/// enumerated set.
pub fn normalize_status(raw: &str) -> AppResult<String> {
    let value = raw.trim().to_lowercase();
    if MOVIE_STATUS_VALUES.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(AppError::InvalidArgument(format!(
            "status must be one of {MOVIE_STATUS_VALUES:?}, got '{raw}'"
        )))
    }
}

/// Parses a release date in either ISO or day-first form, returning the
/// ISO representation stored in the database.
pub fn normalize_release_date(raw: &str) -> AppResult<String> {
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = jiff::civil::Date::strptime(fmt, raw) {
            return Ok(date.to_string());
        }
    }
    Err(AppError::InvalidArgument(format!("release_date '{raw}' is not a valid date")))
}

#[derive(Debug, Deserialize)]
pub struct MovieCreate {
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
    pub runtime: Option<i32>,
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub budget: Option<i64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub spoken_languages: Option<String>,
    pub keywords: Option<String>,
}

impl MovieCreate {
    /// Validates and normalizes the payload before it reaches the store.
    pub fn normalized(mut self) -> AppResult<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidArgument("title must not be empty".to_string()));
        }
        self.title = title.to_string();

        if let Some(status) = &self.status {
            self.status = Some(normalize_status(status)?);
        }
        if let Some(date) = &self.release_date {
            self.release_date = Some(normalize_release_date(date)?);
        }
        Ok(self)
    }
}

/// Partial movie update; absent fields leave the stored value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
    pub runtime: Option<i32>,
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub budget: Option<i64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub spoken_languages: Option<String>,
    pub keywords: Option<String>,
}

impl MovieUpdate {
    pub fn normalized(mut self) -> AppResult<Self> {
        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(AppError::InvalidArgument("title must not be empty".to_string()));
            }
            self.title = Some(title.to_string());
        }
        if let Some(status) = &self.status {
            self.status = Some(normalize_status(status)?);
        }
        if let Some(date) = &self.release_date {
            self.release_date = Some(normalize_release_date(date)?);
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            MovieUpdate {
                title: None,
                vote_average: None,
                vote_count: None,
                status: None,
                release_date: None,
                revenue: None,
                runtime: None,
                adult: None,
                backdrop_path: None,
                budget: None,
                homepage: None,
                imdb_id: None,
                original_language: None,
                original_title: None,
                overview: None,
                popularity: None,
                poster_path: None,
                tagline: None,
                genres: None,
                production_companies: None,
                spoken_languages: None,
                keywords: None,
            }
        )
    }
}

/// Fixed-shape pagination envelope; `total` is always the size of the
/// filtered set before pagination.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimilarMovie {
    pub id: i32,
    pub title: String,
    pub shared_genres: Vec<String>,
    pub shared_keywords: Vec<String>,
    pub similarity_score: u32,
}

#[derive(Debug, Serialize)]
pub struct SimilarMoviesResponse {
    pub movie_id: i32,
    pub reference_title: String,
    pub items: Vec<SimilarMovie>,
}

#[derive(Debug, Deserialize)]
pub struct MovieListCreate {
    pub name: String,
    pub description: Option<String>,
    pub movie_titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieListUpdate {
    pub description: Option<String>,
    pub movie_titles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct MovieListSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct MovieListRead {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub movies: Vec<crate::entities::movie::Model>,
}
