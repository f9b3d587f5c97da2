use std::collections::BTreeMap;

use crate::{entities::movie, models::SimilarMovie};

/// Default number of similar movies returned.
pub const DEFAULT_SIMILAR_LIMIT: usize = 10;
/// Most similar movies a single request may ask for.
pub const MAX_SIMILAR_LIMIT: usize = 50;
/// Default minimum score; zero-overlap candidates never qualify.
pub const DEFAULT_MIN_SCORE: u32 = 1;

/// Splits a comma-joined field into trimmed, non-empty tokens, keyed by
/// their case-folded form. The first-seen original casing is kept as the
/// display form.
fn tokens(raw: Option<&str>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for token in raw.unwrap_or_default().split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        out.entry(token.to_lowercase()).or_insert_with(|| token.to_string());
    }
    out
}

/// Intersection of two token sets, reported in the reference movie's
/// casing and sorted by case-folded form.
fn shared_tokens(
    reference: &BTreeMap<String, String>,
    candidate: &BTreeMap<String, String>,
) -> Vec<String> {
    reference
        .iter()
        .filter(|(key, _)| candidate.contains_key(*key))
        .map(|(_, original)| original.clone())
        .collect()
}

struct Scored {
    rating: f64,
    score: u32,
    movie: movie::Model,
    shared_genres: Vec<String>,
    shared_keywords: Vec<String>,
}

/// Scores every candidate by token overlap with the reference and returns
/// the top `limit`, ordered by rating descending, then score descending,
/// then title ascending case-insensitively. Candidates must already be
/// restricted to released movies other than the reference itself.
pub fn rank(
    reference: &movie::Model,
    candidates: Vec<movie::Model>,
    limit: usize,
    min_score: u32,
) -> Vec<SimilarMovie> {
    let ref_genres = tokens(reference.genres.as_deref());
    let ref_keywords = tokens(reference.keywords.as_deref());

    let mut scored: Vec<Scored> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let shared_genres = shared_tokens(&ref_genres, &tokens(candidate.genres.as_deref()));
            let shared_keywords =
                shared_tokens(&ref_keywords, &tokens(candidate.keywords.as_deref()));
            let score = 2 * shared_genres.len() as u32 + shared_keywords.len() as u32;
            if score < min_score {
                return None;
            }
            Some(Scored {
                rating: candidate.vote_average.unwrap_or(0.0),
                score,
                movie: candidate,
                shared_genres,
                shared_keywords,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.score.cmp(&a.score))
            .then_with(|| a.movie.title.to_lowercase().cmp(&b.movie.title.to_lowercase()))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|s| SimilarMovie {
            id: s.movie.id,
            title: s.movie.title,
            shared_genres: s.shared_genres,
            shared_keywords: s.shared_keywords,
            similarity_score: s.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(
        id: i32,
        title: &str,
        vote_average: Option<f64>,
        genres: Option<&str>,
        keywords: Option<&str>,
    ) -> movie::Model {
        movie::Model {
            id,
            title: title.to_string(),
            vote_average,
            vote_count: None,
            status: Some("released".to_string()),
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
            genres: genres.map(str::to_string),
            production_companies: None,
            spoken_languages: None,
            keywords: keywords.map(str::to_string),
        }
    }

    #[test]
    fn tokens_trim_dedupe_and_drop_empties() {
        let set = tokens(Some("Action, Drama, ,Action,  "));
        let keys: Vec<&str> = set.keys().map(String::as_str).collect();
        assert_eq!(keys, ["action", "drama"]);
        assert_eq!(set["action"], "Action");
        assert_eq!(tokens(None).len(), 0);
    }

    #[test]
    fn genre_overlap_weighs_double() {
        let reference = movie(1, "Heat", None, Some("Action,Drama"), Some("heist,noir"));
        let candidate = movie(2, "Ronin", Some(7.0), Some("Action,Comedy"), Some("heist"));

        let results = rank(&reference, vec![candidate], 10, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shared_genres, ["Action"]);
        assert_eq!(results[0].shared_keywords, ["heist"]);
        assert_eq!(results[0].similarity_score, 3);
    }

    #[test]
    fn token_comparison_is_case_insensitive() {
        let reference = movie(1, "Heat", None, Some("Action"), None);
        let candidate = movie(2, "Ronin", None, Some("action"), None);

        let results = rank(&reference, vec![candidate], 10, 1);
        assert_eq!(results.len(), 1);
        // reference casing wins in the reported tokens
        assert_eq!(results[0].shared_genres, ["Action"]);
        assert_eq!(results[0].similarity_score, 2);
    }

    #[test]
    fn zero_overlap_is_excluded_by_default() {
        let reference = movie(1, "Heat", None, Some("Action"), Some("heist"));
        let candidate = movie(2, "Amélie", Some(8.0), Some("Romance"), Some("paris"));

        assert!(rank(&reference, vec![candidate], 10, DEFAULT_MIN_SCORE).is_empty());
    }

    #[test]
    fn min_score_drops_weak_matches() {
        let reference = movie(1, "Heat", None, Some("Action,Drama"), None);
        let weak = movie(2, "Ronin", None, Some("Action"), None);
        let strong = movie(3, "The Town", None, Some("Action,Drama"), None);

        let results = rank(&reference, vec![weak, strong], 10, 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Town");
        assert_eq!(results[0].similarity_score, 4);
    }

    #[test]
    fn rating_orders_before_score() {
        let reference = movie(1, "Heat", None, Some("Action,Drama"), None);
        let high_rated = movie(2, "B Movie", Some(8.0), Some("Action"), None);
        let high_score = movie(3, "A Movie", Some(6.0), Some("Action,Drama"), None);

        let results = rank(&reference, vec![high_score, high_rated], 10, 1);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["B Movie", "A Movie"]);
    }

    #[test]
    fn missing_rating_sorts_as_zero_and_titles_break_ties() {
        let reference = movie(1, "Heat", None, Some("Action"), None);
        let unrated = movie(2, "zulu", None, Some("Action"), None);
        let rated = movie(3, "Alpha", Some(0.1), Some("Action"), None);
        let also_unrated = movie(4, "Beta", None, Some("Action"), None);

        let results = rank(&reference, vec![unrated, rated, also_unrated], 10, 1);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Beta", "zulu"]);
    }

    #[test]
    fn results_are_capped_at_limit() {
        let reference = movie(1, "Heat", None, Some("Action"), None);
        let candidates: Vec<movie::Model> = (2..10)
            .map(|i| movie(i, &format!("Movie {i}"), Some(f64::from(i)), Some("Action"), None))
            .collect();

        let results = rank(&reference, candidates, 3, 1);
        assert_eq!(results.len(), 3);
        // highest rated first
        assert_eq!(results[0].title, "Movie 9");
    }

    #[test]
    fn shared_tokens_are_sorted() {
        let reference = movie(1, "Heat", None, Some("Thriller,Action,Drama"), None);
        let candidate = movie(2, "Ronin", None, Some("Drama,Action,Thriller"), None);

        let results = rank(&reference, vec![candidate], 10, 1);
        assert_eq!(results[0].shared_genres, ["Action", "Drama", "Thriller"]);
    }
}
