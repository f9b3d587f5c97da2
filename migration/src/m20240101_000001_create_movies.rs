use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .col(double_null(Movies::VoteAverage))
                    .col(integer_null(Movies::VoteCount))
                    .col(string_null(Movies::Status))
                    .col(string_null(Movies::ReleaseDate))
                    .col(big_integer_null(Movies::Revenue))
                    .col(integer_null(Movies::Runtime))
                    .col(boolean_null(Movies::Adult))
                    .col(string_null(Movies::BackdropPath))
                    .col(big_integer_null(Movies::Budget))
                    .col(string_null(Movies::Homepage))
                    .col(string_null(Movies::ImdbId))
                    .col(string_null(Movies::OriginalLanguage))
                    .col(string_null(Movies::OriginalTitle))
                    .col(text_null(Movies::Overview))
                    .col(double_null(Movies::Popularity))
                    .col(string_null(Movies::PosterPath))
                    .col(string_null(Movies::Tagline))
                    .col(text_null(Movies::Genres))
                    .col(text_null(Movies::ProductionCompanies))
                    .col(text_null(Movies::SpokenLanguages))
                    .col(text_null(Movies::Keywords))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_status")
                    .table(Movies::Table)
                    .col(Movies::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_imdb_id")
                    .table(Movies::Table)
                    .col(Movies::ImdbId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    VoteAverage,
    VoteCount,
    Status,
    ReleaseDate,
    Revenue,
    Runtime,
    Adult,
    BackdropPath,
    Budget,
    Homepage,
    ImdbId,
    OriginalLanguage,
    OriginalTitle,
    Overview,
    Popularity,
    PosterPath,
    Tagline,
    Genres,
    ProductionCompanies,
    SpokenLanguages,
    Keywords,
}
