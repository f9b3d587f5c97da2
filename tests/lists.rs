use axum::http::StatusCode;
use axum_test::TestServer;
use cinedex::{AppState, db, lists::ListStore, router, store::MovieStore};
use serde_json::{Value, json};

async fn server() -> TestServer {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    let state = AppState { movies: MovieStore::new(db.clone()), lists: ListStore::new(db) };
    TestServer::new(router(state)).unwrap()
}

async fn create_movie(server: &TestServer, title: &str) {
    let response = server
        .post("/movies")
        .json(&json!({ "title": title, "status": "released" }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

fn movie_titles(list: &Value) -> Vec<&str> {
    list["movies"].as_array().unwrap().iter().map(|m| m["title"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn create_and_read_list() {
    let server = server().await;
    create_movie(&server, "Inception").await;
    create_movie(&server, "Interstellar").await;

    let response = server
        .post("/lists")
        .json(&json!({
            "name": "Nolan Favourites",
            "description": "Christopher Nolan sci-fi hits",
            "movie_titles": ["Inception", "Interstellar"]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["name"], "Nolan Favourites");
    assert_eq!(movie_titles(&created), ["Inception", "Interstellar"]);

    let response = server.get("/lists/Nolan%20Favourites").await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["name"], "Nolan Favourites");
    assert_eq!(fetched["description"], "Christopher Nolan sci-fi hits");
    assert_eq!(movie_titles(&fetched), ["Inception", "Interstellar"]);
}

#[tokio::test]
async fn titles_are_resolved_dedup_first_seen_order() {
    let server = server().await;
    create_movie(&server, "Inception").await;
    create_movie(&server, "Interstellar").await;

    let response = server
        .post("/lists")
        .json(&json!({
            "name": "Dedup",
            "movie_titles": ["Inception", "inception", " Interstellar ", "Unknown Film"]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    // case-insensitive dedup keeps the first form; unmatched titles are
    // silently dropped; order follows the input, not the store
    assert_eq!(movie_titles(&created), ["Inception", "Interstellar"]);
}

#[tokio::test]
async fn resolution_order_follows_input_not_store() {
    let server = server().await;
    create_movie(&server, "Alpha").await;
    create_movie(&server, "Zulu").await;

    let response = server
        .post("/lists")
        .json(&json!({ "name": "Reversed", "movie_titles": ["zulu", "alpha"] }))
        .await;
    let created: Value = response.json();
    assert_eq!(movie_titles(&created), ["Zulu", "Alpha"]);
}

#[tokio::test]
async fn duplicate_list_name_conflicts() {
    let server = server().await;

    let payload = json!({ "name": "Twice", "movie_titles": [] });
    server.post("/lists").json(&payload).await.assert_status(StatusCode::CREATED);
    server.post("/lists").json(&payload).await.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_summaries_are_ordered_by_name_with_sizes() {
    let server = server().await;
    create_movie(&server, "Inception").await;
    create_movie(&server, "Interstellar").await;

    server
        .post("/lists")
        .json(&json!({ "name": "Zebra", "movie_titles": ["Inception"] }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/lists")
        .json(&json!({ "name": "Aardvark", "movie_titles": ["Inception", "Interstellar"] }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/lists").await;
    response.assert_status_ok();
    let lists: Value = response.json();
    let names: Vec<&str> =
        lists.as_array().unwrap().iter().map(|l| l["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Aardvark", "Zebra"]);
    assert_eq!(lists[0]["size"], 2);
    assert_eq!(lists[1]["size"], 1);
}

#[tokio::test]
async fn update_replaces_items_wholesale() {
    let server = server().await;
    create_movie(&server, "Movie A").await;
    create_movie(&server, "Movie B").await;
    create_movie(&server, "Movie C").await;

    server
        .post("/lists")
        .json(&json!({
            "name": "My List",
            "description": "Original description",
            "movie_titles": ["Movie A", "Movie B"]
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // description-only update leaves the items alone
    let response = server
        .put("/lists/My%20List")
        .json(&json!({ "description": "Updated description" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["description"], "Updated description");
    assert_eq!(movie_titles(&updated), ["Movie A", "Movie B"]);

    // a new title set fully replaces the old items
    let response = server
        .put("/lists/My%20List")
        .json(&json!({ "movie_titles": ["Movie C", "Movie A"] }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["description"], "Updated description");
    assert_eq!(movie_titles(&updated), ["Movie C", "Movie A"]);

    let response = server.get("/lists/My%20List").await;
    let fetched: Value = response.json();
    assert_eq!(movie_titles(&fetched), ["Movie C", "Movie A"]);
}

#[tokio::test]
async fn missing_lists_are_not_found() {
    let server = server().await;

    server.get("/lists/Nope").await.assert_status(StatusCode::NOT_FOUND);
    server
        .put("/lists/Nope")
        .json(&json!({ "movie_titles": ["Anything"] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.delete("/lists/Nope").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_list_but_not_movies() {
    let server = server().await;
    create_movie(&server, "Keeper").await;

    server
        .post("/lists")
        .json(&json!({ "name": "Short Lived", "movie_titles": ["Keeper"] }))
        .await
        .assert_status(StatusCode::CREATED);

    server.delete("/lists/Short%20Lived").await.assert_status(StatusCode::NO_CONTENT);
    server.get("/lists/Short%20Lived").await.assert_status(StatusCode::NOT_FOUND);

    // the movie itself is untouched
    let response = server.get("/movies/by-title/Keeper").await;
    response.assert_status_ok();
}
