use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    entities::{movie, movie_list},
    error::{AppError, AppResult},
    models::{
        MovieCreate, MovieListCreate, MovieListRead, MovieListSummary, MovieListUpdate,
        MovieUpdate, Page, SimilarMoviesResponse, normalize_status,
    },
    query::MovieQuery,
    similar::{self, DEFAULT_MIN_SCORE, DEFAULT_SIMILAR_LIMIT, MAX_SIMILAR_LIMIT},
};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---- movies ----

pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<MovieCreate>,
) -> AppResult<(StatusCode, Json<movie::Model>)> {
    let movie = state.movies.insert(payload.normalized()?).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

#[derive(Debug, Deserialize)]
pub struct ListMoviesParams {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub adult: Option<bool>,
    pub status: Option<String>,
    pub min_vote_average: Option<f64>,
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> AppResult<Json<Page<movie::Model>>> {
    let status = params.status.as_deref().map(normalize_status).transpose()?;

    let query = MovieQuery::new()
        .title_contains(params.title)
        .genre_contains(params.genre)
        .adult(params.adult)
        .status(status)
        .min_rating(params.min_vote_average)
        .page(params.skip, params.limit);

    let (items, total) = state.movies.search(&query).await?;
    Ok(Json(Page { items, total, skip: query.skip(), limit: query.limit() }))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<movie::Model>> {
    match state.movies.get(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound(format!("movie with id {id} not found"))),
    }
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MovieUpdate>,
) -> AppResult<Json<movie::Model>> {
    let patch = payload.normalized()?;
    let Some(movie) = state.movies.get(id).await? else {
        return Err(AppError::NotFound(format!("movie with id {id} not found")));
    };
    Ok(Json(state.movies.update(movie, patch).await?))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let Some(movie) = state.movies.get(id).await? else {
        return Err(AppError::NotFound(format!("movie with id {id} not found")));
    };
    state.movies.delete(movie).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ByTitleParams {
    #[serde(default)]
    pub exact: bool,
}

pub async fn movies_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<ByTitleParams>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = state.movies.find_by_title(&title, params.exact).await?;
    if movies.is_empty() {
        return Err(AppError::NotFound(format!("no movies found with title '{title}'")));
    }
    Ok(Json(movies))
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<movie::Model>>> {
    let query = MovieQuery::new().genre_contains(Some(genre)).page(params.skip, params.limit);

    let (items, total) = state.movies.search(&query).await?;
    Ok(Json(Page { items, total, skip: query.skip(), limit: query.limit() }))
}

#[derive(Debug, Deserialize)]
pub struct ByRatingParams {
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

pub async fn movies_by_rating(
    State(state): State<AppState>,
    Query(params): Query<ByRatingParams>,
) -> AppResult<Json<Page<movie::Model>>> {
    if params.min_rating.is_none() && params.max_rating.is_none() {
        return Err(AppError::InvalidArgument(
            "at least one of min_rating or max_rating must be provided".to_string(),
        ));
    }

    let query = MovieQuery::new()
        .min_rating(params.min_rating)
        .max_rating(params.max_rating)
        .sort_by_rating()
        .page(params.skip, params.limit);

    let (items, total) = state.movies.search(&query).await?;
    Ok(Json(Page { items, total, skip: query.skip(), limit: query.limit() }))
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub limit: Option<usize>,
    pub min_shared_tokens: Option<u32>,
}

pub async fn similar_movies(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<SimilarMoviesResponse>> {
    let Some(reference) = state.movies.first_by_title(&title).await? else {
        return Err(AppError::NotFound(format!("movie with title '{title}' not found")));
    };

    let limit = params.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT).clamp(1, MAX_SIMILAR_LIMIT);
    let min_score = params.min_shared_tokens.unwrap_or(DEFAULT_MIN_SCORE).max(DEFAULT_MIN_SCORE);

    let candidates = state.movies.released_except(reference.id).await?;
    let items = similar::rank(&reference, candidates, limit, min_score);

    Ok(Json(SimilarMoviesResponse {
        movie_id: reference.id,
        reference_title: reference.title,
        items,
    }))
}

// ---- lists ----

fn list_read(list: movie_list::Model, movies: Vec<movie::Model>) -> MovieListRead {
    MovieListRead { id: list.id, name: list.name, description: list.description, movies }
}

pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<MovieListCreate>,
) -> AppResult<(StatusCode, Json<MovieListRead>)> {
    if state.lists.get_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "list with name '{}' already exists",
            payload.name
        )));
    }

    let (list, movies) =
        state.lists.create(payload.name, payload.description, &payload.movie_titles).await?;
    Ok((StatusCode::CREATED, Json(list_read(list, movies))))
}

pub async fn get_lists(State(state): State<AppState>) -> AppResult<Json<Vec<MovieListSummary>>> {
    let lists = state.lists.all_with_sizes().await?;
    Ok(Json(
        lists
            .into_iter()
            .map(|(list, size)| MovieListSummary {
                id: list.id,
                name: list.name,
                description: list.description,
                size,
            })
            .collect(),
    ))
}

pub async fn get_list(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MovieListRead>> {
    let Some(list) = state.lists.get_by_name(&name).await? else {
        return Err(AppError::NotFound(format!("list with name '{name}' not found")));
    };
    let movies = state.lists.movies_for(list.id).await?;
    Ok(Json(list_read(list, movies)))
}

pub async fn update_list(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<MovieListUpdate>,
) -> AppResult<Json<MovieListRead>> {
    let Some(list) = state.lists.get_by_name(&name).await? else {
        return Err(AppError::NotFound(format!("list with name '{name}' not found")));
    };

    let (list, movies) = state
        .lists
        .update(list, payload.description, payload.movie_titles.as_deref())
        .await?;
    Ok(Json(list_read(list, movies)))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    let Some(list) = state.lists.get_by_name(&name).await? else {
        return Err(AppError::NotFound(format!("list with name '{name}' not found")));
    };
    state.lists.delete(list).await?;
    Ok(StatusCode::NO_CONTENT)
}
