use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(pk_auto(Roles::Id))
                    .col(string_len_null(Roles::Name, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(pk_auto(Countries::Id))
                    .col(string_len(Countries::Name, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Username, 50))
                    .col(string_len(Users::Password, 50))
                    .col(integer_null(Users::RoleId))
                    .col(string_len_null(Users::Name, 50))
                    .col(string_len_null(Users::Surname, 50))
                    .col(integer_null(Users::CountryId))
                    .col(string_len(Users::ApiKey, 36))
                    .col(boolean(Users::IsAuthenticated))
                    .col(boolean(Users::IsActive))
                    .col(boolean(Users::IsAnonymous))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_role")
                            .from(Users::Table, Users::RoleId)
                            .to(Roles::Table, Roles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_country")
                            .from(Users::Table, Users::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Directors::Table)
                    .if_not_exists()
                    .col(pk_auto(Directors::Id))
                    .col(string_len(Directors::Name, 50))
                    .col(string_len(Directors::Surname, 50))
                    .col(string_null(Directors::BirthDate))
                    .col(integer_null(Directors::CountryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_directors_country")
                            .from(Directors::Table, Directors::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_len(Genres::Name, 50))
                    .col(text_null(Genres::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Films::Table)
                    .if_not_exists()
                    .col(pk_auto(Films::Id))
                    .col(string_len(Films::Title, 100))
                    .col(string(Films::ReleaseDate))
                    .col(double(Films::Rating))
                    .col(text(Films::Poster))
                    .col(text(Films::Description))
                    .col(integer_null(Films::DirectorId))
                    .col(integer(Films::CreatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_films_director")
                            .from(Films::Table, Films::DirectorId)
                            .to(Directors::Table, Directors::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_films_created_by")
                            .from(Films::Table, Films::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmsGenres::Table)
                    .if_not_exists()
                    .col(integer(FilmsGenres::FilmId))
                    .col(integer(FilmsGenres::GenreId))
                    .primary_key(
                        Index::create().col(FilmsGenres::FilmId).col(FilmsGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_films_genres_film")
                            .from(FilmsGenres::Table, FilmsGenres::FilmId)
                            .to(Films::Table, Films::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_films_genres_genre")
                            .from(FilmsGenres::Table, FilmsGenres::GenreId)
                            .to(Genres::Table, Genres::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FilmsGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Films::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Directors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Countries::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Roles::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    RoleId,
    Name,
    Surname,
    CountryId,
    ApiKey,
    IsAuthenticated,
    IsActive,
    IsAnonymous,
}

#[derive(DeriveIden)]
enum Directors {
    Table,
    Id,
    Name,
    Surname,
    BirthDate,
    CountryId,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Films {
    Table,
    Id,
    Title,
    ReleaseDate,
    Rating,
    Poster,
    Description,
    DirectorId,
    CreatedBy,
}

#[derive(DeriveIden)]
enum FilmsGenres {
    Table,
    FilmId,
    GenreId,
}
