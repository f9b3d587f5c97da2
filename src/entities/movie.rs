use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A movie row. Collection-like fields (genres, keywords,
/// production_companies, spoken_languages) are stored as comma-separated
/// strings, e.g. "Action,Drama".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_list_item::Entity")]
    ListItems,
}

impl Related<super::movie_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
