use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
    sea_query::{Expr, ExprTrait, Func},
};

use crate::{
    entities::{movie, movie_list, movie_list_item},
    error::AppResult,
};

/// Trims each title, drops empties, and deduplicates case-insensitively
/// keeping the first occurrence, preserving input order.
pub fn dedup_titles(titles: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for title in titles {
        let title = title.trim();
        if title.is_empty() {
            continue;
        }
        if seen.insert(title.to_lowercase()) {
            out.push(title.to_string());
        }
    }
    out
}

/// Handle over the movie_lists and movie_list_items tables.
#[derive(Clone)]
pub struct ListStore {
    db: DatabaseConnection,
}

impl ListStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves free-text titles to stored movies by exact
    /// case-insensitive match. Unmatched titles are silently dropped;
    /// output follows the deduplicated input order, not store order.
    pub async fn resolve_titles(&self, titles: &[String]) -> AppResult<Vec<movie::Model>> {
        let wanted = dedup_titles(titles);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = wanted.iter().map(|t| t.to_lowercase()).collect();
        let found = movie::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(movie::Column::Title))).is_in(keys))
            .all(&self.db)
            .await?;

        let mut by_title: HashMap<String, movie::Model> =
            found.into_iter().map(|m| (m.title.to_lowercase(), m)).collect();

        Ok(wanted.iter().filter_map(|t| by_title.remove(&t.to_lowercase())).collect())
    }

    /// Name lookup is exact and case-sensitive; the name is the list's
    /// external key.
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<movie_list::Model>> {
        Ok(movie_list::Entity::find()
            .filter(movie_list::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// All lists ordered by name, each with its item count.
    pub async fn all_with_sizes(&self) -> AppResult<Vec<(movie_list::Model, usize)>> {
        let lists = movie_list::Entity::find()
            .order_by_asc(movie_list::Column::Name)
            .find_with_related(movie_list_item::Entity)
            .all(&self.db)
            .await?;
        Ok(lists.into_iter().map(|(list, items)| (list, items.len())).collect())
    }

    /// The list's movies in item-position order.
    pub async fn movies_for(&self, list_id: i32) -> AppResult<Vec<movie::Model>> {
        let rows = movie_list_item::Entity::find()
            .filter(movie_list_item::Column::ListId.eq(list_id))
            .order_by_asc(movie_list_item::Column::Position)
            .find_also_related(movie::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().filter_map(|(_, movie)| movie).collect())
    }

    /// Creates a list and its items in one transaction so concurrent
    /// readers never observe a partially-built list.
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        titles: &[String],
    ) -> AppResult<(movie_list::Model, Vec<movie::Model>)> {
        let movies = self.resolve_titles(titles).await?;
        let now = now_sec();

        let txn = self.db.begin().await?;

        let list = movie_list::ActiveModel {
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_items(&txn, list.id, &movies).await?;

        txn.commit().await?;

        Ok((list, movies))
    }

    /// Updates list metadata and, when a new title set is supplied,
    /// atomically replaces the whole item set with positions rebuilt
    /// from 1. Never a per-item merge.
    pub async fn update(
        &self,
        list: movie_list::Model,
        description: Option<String>,
        titles: Option<&[String]>,
    ) -> AppResult<(movie_list::Model, Vec<movie::Model>)> {
        let resolved = match titles {
            Some(titles) => Some(self.resolve_titles(titles).await?),
            None => None,
        };

        let txn = self.db.begin().await?;

        let list_id = list.id;
        let mut active: movie_list::ActiveModel = list.into();
        if let Some(description) = description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(now_sec());
        let list = active.update(&txn).await?;

        if let Some(movies) = &resolved {
            movie_list_item::Entity::delete_many()
                .filter(movie_list_item::Column::ListId.eq(list_id))
                .exec(&txn)
                .await?;
            insert_items(&txn, list_id, movies).await?;
        }

        txn.commit().await?;

        let movies = match resolved {
            Some(movies) => movies,
            None => self.movies_for(list_id).await?,
        };
        Ok((list, movies))
    }

    /// Deletes the list and everything it owns.
    pub async fn delete(&self, list: movie_list::Model) -> AppResult<()> {
        let txn = self.db.begin().await?;

        movie_list_item::Entity::delete_many()
            .filter(movie_list_item::Column::ListId.eq(list.id))
            .exec(&txn)
            .await?;
        movie_list::Entity::delete_by_id(list.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

async fn insert_items<C: sea_orm::ConnectionTrait>(
    conn: &C,
    list_id: i32,
    movies: &[movie::Model],
) -> AppResult<()> {
    for (index, movie) in movies.iter().enumerate() {
        movie_list_item::ActiveModel {
            list_id: Set(list_id),
            movie_id: Set(movie.id),
            position: Set(index as i32 + 1),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let input = titles(&["Inception", "inception", " Interstellar "]);
        assert_eq!(dedup_titles(&input), ["Inception", "Interstellar"]);
    }

    #[test]
    fn dedup_drops_empty_entries() {
        let input = titles(&["", "  ", "Heat", "HEAT", ""]);
        assert_eq!(dedup_titles(&input), ["Heat"]);
    }

    #[test]
    fn dedup_of_nothing_is_nothing() {
        assert!(dedup_titles(&[]).is_empty());
    }
}
