use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieLists::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieLists::Id))
                    .col(string_uniq(MovieLists::Name))
                    .col(string_null(MovieLists::Description))
                    .col(big_integer(MovieLists::CreatedAt))
                    .col(big_integer(MovieLists::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieListItems::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieListItems::Id))
                    .col(integer(MovieListItems::ListId))
                    .col(integer(MovieListItems::MovieId))
                    .col(integer(MovieListItems::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_list_items_list_id")
                            .from(MovieListItems::Table, MovieListItems::ListId)
                            .to(MovieLists::Table, MovieLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_list_items_movie_id")
                            .from(MovieListItems::Table, MovieListItems::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_list_items_list_id")
                    .table(MovieListItems::Table)
                    .col(MovieListItems::ListId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_list_items_movie_id")
                    .table(MovieListItems::Table)
                    .col(MovieListItems::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieListItems::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieLists::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MovieLists {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MovieListItems {
    Table,
    Id,
    ListId,
    MovieId,
    Position,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
}
