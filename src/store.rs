use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    entities::movie,
    error::AppResult,
    models::{MovieCreate, MovieUpdate},
    query::{MovieQuery, contains_ci, eq_ci},
};

/// Handle over the movies table. Cloning shares the underlying pool;
/// every operation checks a connection out for its own scope.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert(&self, data: MovieCreate) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            title: Set(data.title),
            vote_average: Set(data.vote_average),
            vote_count: Set(data.vote_count),
            status: Set(data.status),
            release_date: Set(data.release_date),
            revenue: Set(data.revenue),
            runtime: Set(data.runtime),
            adult: Set(data.adult),
            backdrop_path: Set(data.backdrop_path),
            budget: Set(data.budget),
            homepage: Set(data.homepage),
            imdb_id: Set(data.imdb_id),
            original_language: Set(data.original_language),
            original_title: Set(data.original_title),
            overview: Set(data.overview),
            popularity: Set(data.popularity),
            poster_path: Set(data.poster_path),
            tagline: Set(data.tagline),
            genres: Set(data.genres),
            production_companies: Set(data.production_companies),
            spoken_languages: Set(data.spoken_languages),
            keywords: Set(data.keywords),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Title lookup; exact matches are case-insensitive equality, the
    /// rest are case-insensitive substring matches.
    pub async fn find_by_title(&self, title: &str, exact: bool) -> AppResult<Vec<movie::Model>> {
        let matcher = if exact {
            eq_ci(movie::Column::Title, title)
        } else {
            contains_ci(movie::Column::Title, title)
        };
        Ok(movie::Entity::find().filter(matcher).all(&self.db).await?)
    }

    /// First substring match in store-default order; deliberately loose,
    /// used to resolve the reference movie for similarity lookups.
    pub async fn first_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(contains_ci(movie::Column::Title, title))
            .one(&self.db)
            .await?)
    }

    /// Filtered scan returning one page plus the total over the whole
    /// filtered set.
    pub async fn search(&self, query: &MovieQuery) -> AppResult<(Vec<movie::Model>, u64)> {
        let mut select = movie::Entity::find().filter(query.condition());
        if query.rating_sort() {
            select = select.order_by_desc(movie::Column::VoteAverage);
        }

        let total = select.clone().count(&self.db).await?;
        let items = select.offset(query.skip()).limit(query.limit()).all(&self.db).await?;
        Ok((items, total))
    }

    /// Candidate pool for similarity ranking: released movies other than
    /// the reference.
    pub async fn released_except(&self, id: i32) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::Status.eq("released"))
            .filter(movie::Column::Id.ne(id))
            .all(&self.db)
            .await?)
    }

    pub async fn update(&self, model: movie::Model, patch: MovieUpdate) -> AppResult<movie::Model> {
        if patch.is_empty() {
            return Ok(model);
        }

        let mut active: movie::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(vote_average) = patch.vote_average {
            active.vote_average = Set(Some(vote_average));
        }
        if let Some(vote_count) = patch.vote_count {
            active.vote_count = Set(Some(vote_count));
        }
        if let Some(status) = patch.status {
            active.status = Set(Some(status));
        }
        if let Some(release_date) = patch.release_date {
            active.release_date = Set(Some(release_date));
        }
        if let Some(revenue) = patch.revenue {
            active.revenue = Set(Some(revenue));
        }
        if let Some(runtime) = patch.runtime {
            active.runtime = Set(Some(runtime));
        }
        if let Some(adult) = patch.adult {
            active.adult = Set(Some(adult));
        }
        if let Some(backdrop_path) = patch.backdrop_path {
            active.backdrop_path = Set(Some(backdrop_path));
        }
        if let Some(budget) = patch.budget {
            active.budget = Set(Some(budget));
        }
        if let Some(homepage) = patch.homepage {
            active.homepage = Set(Some(homepage));
        }
        if let Some(imdb_id) = patch.imdb_id {
            active.imdb_id = Set(Some(imdb_id));
        }
        if let Some(original_language) = patch.original_language {
            active.original_language = Set(Some(original_language));
        }
        if let Some(original_title) = patch.original_title {
            active.original_title = Set(Some(original_title));
        }
        if let Some(overview) = patch.overview {
            active.overview = Set(Some(overview));
        }
        if let Some(popularity) = patch.popularity {
            active.popularity = Set(Some(popularity));
        }
        if let Some(poster_path) = patch.poster_path {
            active.poster_path = Set(Some(poster_path));
        }
        if let Some(tagline) = patch.tagline {
            active.tagline = Set(Some(tagline));
        }
        if let Some(genres) = patch.genres {
            active.genres = Set(Some(genres));
        }
        if let Some(production_companies) = patch.production_companies {
            active.production_companies = Set(Some(production_companies));
        }
        if let Some(spoken_languages) = patch.spoken_languages {
            active.spoken_languages = Set(Some(spoken_languages));
        }
        if let Some(keywords) = patch.keywords {
            active.keywords = Set(Some(keywords));
        }

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, model: movie::Model) -> AppResult<()> {
        model.delete(&self.db).await?;
        Ok(())
    }
}
