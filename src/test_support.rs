use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};

use crate::{
    accounts::Accounts,
    db,
    entities::{director, film, film_genre, genre, user},
};

pub async fn test_db() -> DatabaseConnection {
    db::connect_and_migrate("sqlite::memory:", 1).await.expect("in-memory database")
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> user::Model {
    Accounts::new(db.clone()).create_user(username, "secret").await.expect("insert user")
}

pub async fn insert_director(
    db: &DatabaseConnection,
    name: &str,
    surname: &str,
) -> director::Model {
    director::ActiveModel {
        name: Set(name.to_string()),
        surname: Set(surname.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert director")
}

pub async fn insert_genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::ActiveModel { name: Set(name.to_string()), ..Default::default() }
        .insert(db)
        .await
        .expect("insert genre")
}

pub async fn insert_film(
    db: &DatabaseConnection,
    title: &str,
    release_date: &str,
    rating: f64,
    director: &director::Model,
    creator: &user::Model,
) -> film::Model {
    film::ActiveModel {
        title: Set(title.to_string()),
        release_date: Set(release_date.to_string()),
        rating: Set(rating),
        poster: Set(format!("{title}.jpg")),
        description: Set(String::new()),
        director_id: Set(Some(director.id)),
        created_by: Set(creator.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert film")
}

pub async fn link_genre(db: &DatabaseConnection, film: &film::Model, genre: &genre::Model) {
    film_genre::Entity::insert(film_genre::ActiveModel {
        film_id: Set(film.id),
        genre_id: Set(genre.id),
    })
    .exec_without_returning(db)
    .await
    .expect("link genre");
}

/// Two directors, four films, and a duplicated "Drama" genre on Stalker.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub owner: user::Model,
    pub other: user::Model,
    pub tarkovsky: director::Model,
    pub lynch: director::Model,
    pub solaris: film::Model,
    pub stalker: film::Model,
    pub eraserhead: film::Model,
    pub mulholland: film::Model,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = test_db().await;

        let owner = insert_user(&db, "owner").await;
        let other = insert_user(&db, "other").await;

        let tarkovsky = insert_director(&db, "Andrei", "Tarkovsky").await;
        let lynch = insert_director(&db, "David", "Lynch").await;

        let solaris = insert_film(&db, "Solaris", "1972-03-20", 8.1, &tarkovsky, &owner).await;
        let stalker = insert_film(&db, "Stalker", "1979-05-25", 8.1, &tarkovsky, &owner).await;
        let eraserhead = insert_film(&db, "Eraserhead", "1977-03-19", 7.3, &lynch, &owner).await;
        let mulholland =
            insert_film(&db, "Mulholland Drive", "2001-10-12", 7.9, &lynch, &other).await;

        let drama = insert_genre(&db, "Drama").await;
        let drama_again = insert_genre(&db, "Drama").await;
        let scifi = insert_genre(&db, "Science Fiction").await;

        link_genre(&db, &stalker, &drama).await;
        link_genre(&db, &stalker, &drama_again).await;
        link_genre(&db, &stalker, &scifi).await;
        link_genre(&db, &solaris, &scifi).await;
        link_genre(&db, &mulholland, &drama).await;

        Self { db, owner, other, tarkovsky, lynch, solaris, stalker, eraserhead, mulholland }
    }
}
