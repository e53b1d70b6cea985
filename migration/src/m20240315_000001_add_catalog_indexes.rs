use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_users_api_key_unique")
                    .table(Users::Table)
                    .col(Users::ApiKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_title")
                    .table(Films::Table)
                    .col(Films::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_release_date")
                    .table(Films::Table)
                    .col(Films::ReleaseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_created_by")
                    .table(Films::Table)
                    .col(Films::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_genres_genre")
                    .table(FilmsGenres::Table)
                    .col(FilmsGenres::GenreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop().name("idx_films_genres_genre").table(FilmsGenres::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_films_created_by").table(Films::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_films_release_date").table(Films::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_films_title").table(Films::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_users_api_key_unique").table(Users::Table).to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    ApiKey,
}

#[derive(DeriveIden)]
enum Films {
    Table,
    Title,
    ReleaseDate,
    CreatedBy,
}

#[derive(DeriveIden)]
enum FilmsGenres {
    Table,
    GenreId,
}
