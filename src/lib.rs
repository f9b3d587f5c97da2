pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod lists;
pub mod models;
pub mod query;
pub mod routes;
pub mod similar;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{lists::ListStore, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieStore,
    pub lists: ListStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/movies", post(routes::create_movie).get(routes::list_movies))
        .route("/movies/by-rating", get(routes::movies_by_rating))
        .route("/movies/by-genre/{genre}", get(routes::movies_by_genre))
        .route("/movies/by-title/{title}", get(routes::movies_by_title))
        .route("/movies/by-title/{title}/similar", get(routes::similar_movies))
        .route(
            "/movies/{id}",
            get(routes::get_movie).put(routes::update_movie).delete(routes::delete_movie),
        )
        .route("/lists", post(routes::create_list).get(routes::get_lists))
        .route(
            "/lists/{name}",
            get(routes::get_list).put(routes::update_list).delete(routes::delete_list),
        )
        .with_state(state)
}
