//! Bulk-imports movies from a CSV export, upserting by id.
//!
//! Usage: import_movies --csv <path> [--db <url>]

use cinedex::{db, entities::movie};
use sea_orm::{DatabaseConnection, EntityTrait, Iterable, Set, sea_query::OnConflict};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    id: Option<String>,
    title: Option<String>,
    vote_average: Option<String>,
    vote_count: Option<String>,
    status: Option<String>,
    release_date: Option<String>,
    revenue: Option<String>,
    runtime: Option<String>,
    adult: Option<String>,
    backdrop_path: Option<String>,
    budget: Option<String>,
    homepage: Option<String>,
    imdb_id: Option<String>,
    original_language: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    popularity: Option<String>,
    poster_path: Option<String>,
    tagline: Option<String>,
    genres: Option<String>,
    production_companies: Option<String>,
    spoken_languages: Option<String>,
    keywords: Option<String>,
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn normalize_status(value: Option<&str>) -> Option<String> {
    let v = value?.trim().to_lowercase();
    if v.contains("not released") || v.contains("unreleased") {
        Some("not released".to_string())
    } else if v.contains("released") {
        Some("released".to_string())
    } else {
        None
    }
}

fn parse_i32(value: Option<&str>) -> Option<i32> {
    parse_f64(value).map(|v| v as i32)
}

fn parse_i64(value: Option<&str>) -> Option<i64> {
    parse_f64(value).map(|v| v as i64)
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    let v = value?.trim();
    if v.is_empty() { None } else { v.parse().ok() }
}

fn parse_date(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    if v.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = jiff::civil::Date::strptime(fmt, v) {
            return Some(date.to_string());
        }
    }
    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn to_model(row: CsvRow) -> Option<movie::ActiveModel> {
    let title = row.title.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return None;
    }

    let mut model = movie::ActiveModel {
        title: Set(title),
        vote_average: Set(parse_f64(row.vote_average.as_deref())),
        vote_count: Set(parse_i32(row.vote_count.as_deref())),
        status: Set(normalize_status(row.status.as_deref())),
        release_date: Set(parse_date(row.release_date.as_deref())),
        revenue: Set(parse_i64(row.revenue.as_deref())),
        runtime: Set(parse_i32(row.runtime.as_deref())),
        adult: Set(parse_bool(row.adult.as_deref())),
        backdrop_path: Set(non_empty(row.backdrop_path)),
        budget: Set(parse_i64(row.budget.as_deref())),
        homepage: Set(non_empty(row.homepage)),
        imdb_id: Set(non_empty(row.imdb_id)),
        original_language: Set(non_empty(row.original_language)),
        original_title: Set(non_empty(row.original_title)),
        overview: Set(non_empty(row.overview)),
        popularity: Set(parse_f64(row.popularity.as_deref())),
        poster_path: Set(non_empty(row.poster_path)),
        tagline: Set(non_empty(row.tagline)),
        genres: Set(non_empty(row.genres)),
        production_companies: Set(non_empty(row.production_companies)),
        spoken_languages: Set(non_empty(row.spoken_languages)),
        keywords: Set(non_empty(row.keywords)),
        ..Default::default()
    };
    if let Some(id) = parse_i32(row.id.as_deref()) {
        model.id = Set(id);
    }
    Some(model)
}

async fn upsert(db: &DatabaseConnection, model: movie::ActiveModel) -> anyhow::Result<()> {
    movie::Entity::insert(model)
        .on_conflict(
            OnConflict::column(movie::Column::Id)
                .update_columns(
                    movie::Column::iter().filter(|c| !matches!(c, movie::Column::Id)),
                )
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let mut csv_path: Option<String> = None;
    let mut database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => csv_path = args.next(),
            "--db" => {
                if let Some(url) = args.next() {
                    database_url = url;
                }
            },
            other => anyhow::bail!("unknown argument '{other}', expected --csv <path> [--db <url>]"),
        }
    }
    let Some(csv_path) = csv_path else {
        anyhow::bail!("--csv <path> is required");
    };

    let db = db::connect_and_migrate(&database_url).await?;

    let mut reader = csv::Reader::from_path(&csv_path)?;
    let mut imported = 0u64;
    let mut skipped = 0u64;

    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let Some(model) = to_model(row) else {
            skipped += 1;
            continue;
        };
        upsert(&db, model).await?;
        imported += 1;
        if imported % 1000 == 0 {
            tracing::info!(imported, "import progress");
        }
    }

    tracing::info!(imported, skipped, path = %csv_path, "import finished");
    Ok(())
}
