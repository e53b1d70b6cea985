use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::{director, film, film_genre},
    error::{AppError, AppResult},
    film_schema::{self, NewFilm, Record},
    models::{DirectorSearch, FilmSearch},
    query::{self, FilmQuery},
};

#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// An id short-circuits every other parameter; otherwise the title is
    /// required and each remaining parameter adds a stage when present.
    pub async fn search_films(&self, params: &FilmSearch) -> AppResult<Vec<film::Model>> {
        if let Some(id) = params.id {
            debug!(film_id = id, "looking up film by id");
            return Ok(FilmQuery::by_id(id).all(&self.db).await?);
        }

        let Some(title) = params.title.as_deref() else {
            return Err(AppError::invalid("Wrong input. Provide either id or title of a film"));
        };

        let mut query = FilmQuery::by_title(title).filter_by_director(
            non_empty(&params.director_name),
            non_empty(&params.director_surname),
        );

        if let Some(genre) = non_empty(&params.genre) {
            query = query.filter_by_genre(genre);
        }

        if let Some(range) = non_empty(&params.release_date) {
            let (start, end) = query::parse_release_date_range(range).map_err(AppError::Invalid)?;
            query = query.filter_by_release_date(start, end);
        }

        let sort_dates = params.sort_dates.unwrap_or_default();
        let sort_rating = params.sort_rating.unwrap_or_default();
        let query = query.sort(sort_dates, sort_rating);

        debug!(
            sort_dates = sort_dates.as_code(),
            sort_rating = sort_rating.as_code(),
            sql = %query.to_sql(self.db.get_database_backend()),
            "searching films"
        );
        let films = query.all(&self.db).await?;
        debug!(title = %title, result_count = films.len(), "film search done");
        Ok(films)
    }

    pub async fn create_film(&self, record: &Record, acting_user: i32) -> AppResult<i32> {
        let film = film_schema::parse_film_record(record).map_err(AppError::Invalid)?;
        ensure_creator(&film, acting_user)?;

        let id =
            film::Entity::insert(film.into_active_model()).exec(&self.db).await?.last_insert_id;
        debug!(film_id = id, user_id = acting_user, "film created");
        Ok(id)
    }

    /// Merges `patch` over the stored film and validates the merged record as
    /// a whole before writing it back. Only the creator may patch.
    pub async fn patch_film(
        &self,
        film_id: i32,
        patch: Record,
        acting_user: i32,
    ) -> AppResult<film::Model> {
        let txn = self.db.begin().await?;

        let Some(existing) = film::Entity::find_by_id(film_id)
            .filter(film::Column::CreatedBy.eq(acting_user))
            .one(&txn)
            .await?
        else {
            return Err(film_not_found(film_id));
        };

        let mut record = film_schema::film_record(&existing);
        record.extend(patch);
        let film = film_schema::parse_film_record(&record).map_err(AppError::Invalid)?;
        ensure_creator(&film, acting_user)?;

        let mut model: film::ActiveModel = existing.into();
        film.apply(&mut model);
        let updated = model.update(&txn).await?;
        txn.commit().await?;

        debug!(film_id = film_id, user_id = acting_user, "film patched");
        Ok(updated)
    }

    /// Deletes the film only when `creator_id` created it, along with its
    /// genre links. Returns the row as it was before the delete.
    pub async fn delete_film(&self, film_id: i32, creator_id: i32) -> AppResult<film::Model> {
        let txn = self.db.begin().await?;

        let Some(snapshot) = film::Entity::find_by_id(film_id)
            .filter(film::Column::CreatedBy.eq(creator_id))
            .one(&txn)
            .await?
        else {
            debug!(film_id = film_id, user_id = creator_id, "no film to delete");
            return Err(film_not_found(film_id));
        };

        film_genre::Entity::delete_many()
            .filter(film_genre::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;

        film::Entity::delete_many()
            .filter(film::Column::Id.eq(film_id))
            .filter(film::Column::CreatedBy.eq(creator_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        debug!(film_id = film_id, user_id = creator_id, "film deleted");
        Ok(snapshot)
    }

    pub async fn search_directors(
        &self,
        params: &DirectorSearch,
    ) -> AppResult<Vec<director::Model>> {
        let directors =
            query::directors_matching(params.name.as_deref(), params.surname.as_deref())
                .all(&self.db)
                .await?;
        debug!(result_count = directors.len(), "director search done");
        Ok(directors)
    }
}

fn ensure_creator(film: &NewFilm, acting_user: i32) -> AppResult<()> {
    if film.created_by != acting_user {
        return Err(AppError::invalid(format!(
            "created_by must be the authenticated user {acting_user}, got {}",
            film.created_by
        )));
    }
    Ok(())
}

/// Empty query parameters count as absent.
fn non_empty(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|s| !s.is_empty())
}

fn film_not_found(film_id: i32) -> AppError {
    AppError::NotFound(format!(r#"Film with id "{film_id}" was not found"#))
}
