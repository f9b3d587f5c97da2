use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, ExprTrait, Func, SimpleExpr},
};

use crate::{
    config::{DEFAULT_LIMIT, MAX_LIMIT},
    entities::movie,
};

/// Case-insensitive substring match against the raw stored text. For
/// token fields like `genres` this matches anywhere in the comma-joined
/// string, crossing token boundaries.
pub(crate) fn contains_ci(col: movie::Column, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", needle.to_lowercase()))
}

/// Case-insensitive exact match.
pub(crate) fn eq_ci(col: movie::Column, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}

/// Accumulates optional movie filter criteria into a single AND
/// condition, plus pagination bounds and the rating sort flag. Absent
/// criteria impose no constraint; empty strings count as absent.
#[derive(Clone, Debug, Default)]
pub struct MovieQuery {
    title: Option<String>,
    genre: Option<String>,
    adult: Option<bool>,
    status: Option<String>,
    min_rating: Option<f64>,
    max_rating: Option<f64>,
    rating_sort: bool,
    skip: u64,
    limit: Option<u64>,
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_contains(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.is_empty());
        self
    }

    pub fn genre_contains(mut self, genre: Option<String>) -> Self {
        self.genre = genre.filter(|g| !g.is_empty());
        self
    }

    pub fn adult(mut self, adult: Option<bool>) -> Self {
        self.adult = adult;
        self
    }

    pub fn status(mut self, status: Option<String>) -> Self {
        self.status = status.filter(|s| !s.is_empty());
        self
    }

    pub fn min_rating(mut self, rating: Option<f64>) -> Self {
        self.min_rating = rating;
        self
    }

    pub fn max_rating(mut self, rating: Option<f64>) -> Self {
        self.max_rating = rating;
        self
    }

    /// Orders results by vote_average descending; the rating-range lookup
    /// is the only path that mandates a sort.
    pub fn sort_by_rating(mut self) -> Self {
        self.rating_sort = true;
        self
    }

    pub fn page(mut self, skip: u64, limit: Option<u64>) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// The effective page size: requested limit clamped to the cap,
    /// defaulting when unspecified.
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub(crate) fn rating_sort(&self) -> bool {
        self.rating_sort
    }

    pub(crate) fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(title) = &self.title {
            cond = cond.add(contains_ci(movie::Column::Title, title));
        }
        if let Some(genre) = &self.genre {
            cond = cond.add(contains_ci(movie::Column::Genres, genre));
        }
        if let Some(adult) = self.adult {
            cond = cond.add(movie::Column::Adult.eq(adult));
        }
        if let Some(status) = &self.status {
            // normalized upstream, but never trust the caller
            cond = cond.add(movie::Column::Status.eq(status.trim().to_lowercase()));
        }
        if let Some(min) = self.min_rating {
            cond = cond.add(movie::Column::VoteAverage.gte(min));
        }
        if let Some(max) = self.max_rating {
            cond = cond.add(movie::Column::VoteAverage.lte(max));
        }
        cond
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(MovieQuery::new().limit(), DEFAULT_LIMIT);
        assert_eq!(MovieQuery::new().page(0, Some(7)).limit(), 7);
        assert_eq!(MovieQuery::new().page(0, Some(MAX_LIMIT)).limit(), MAX_LIMIT);
        assert_eq!(MovieQuery::new().page(0, Some(500)).limit(), MAX_LIMIT);
    }

    #[test]
    fn skip_passes_through_unbounded() {
        assert_eq!(MovieQuery::new().page(1_000_000, None).skip(), 1_000_000);
    }

    #[test]
    fn empty_strings_impose_no_constraint() {
        let query = MovieQuery::new()
            .title_contains(Some(String::new()))
            .genre_contains(Some(String::new()))
            .status(Some(String::new()));
        assert_eq!(query.condition(), Condition::all());
    }

    #[test]
    fn present_criteria_accumulate() {
        let query = MovieQuery::new()
            .title_contains(Some("Matrix".to_string()))
            .genre_contains(Some("Action".to_string()))
            .adult(Some(false))
            .status(Some(" Released ".to_string()))
            .min_rating(Some(7.0))
            .max_rating(Some(9.0));

        let expected = Condition::all()
            .add(contains_ci(movie::Column::Title, "Matrix"))
            .add(contains_ci(movie::Column::Genres, "Action"))
            .add(movie::Column::Adult.eq(false))
            .add(movie::Column::Status.eq("released"))
            .add(movie::Column::VoteAverage.gte(7.0))
            .add(movie::Column::VoteAverage.lte(9.0));

        assert_eq!(query.condition(), expected);
    }
}
