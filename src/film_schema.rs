use std::collections::BTreeSet;

use jiff::civil::Date;
use sea_orm::{ActiveValue::Set, IntoActiveModel};
use serde_json::{Map, Value};

use crate::{entities::film, validator::Validator};

pub type Record = Map<String, Value>;

/// Exact key set of a film record, sorted.
pub const FILM_FIELDS: [&str; 7] =
    ["created_by", "description", "director_id", "poster", "rating", "release_date", "title"];

pub const TITLE_MAX_LENGTH: usize = 100;
pub const POSTER_MAX_LENGTH: usize = 1_000_000;
pub const DESCRIPTION_MAX_LENGTH: usize = 1_000_000_000;

pub const RATING_MIN: f64 = 0.1;
pub const RATING_MAX: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct NewFilm {
    pub title: String,
    pub release_date: Date,
    pub rating: f64,
    pub poster: String,
    pub description: String,
    pub director_id: Option<i32>,
    pub created_by: i32,
}

impl NewFilm {
    pub fn apply(self, model: &mut film::ActiveModel) {
        model.title = Set(self.title);
        model.release_date = Set(self.release_date.to_string());
        model.rating = Set(self.rating);
        model.poster = Set(self.poster);
        model.description = Set(self.description);
        model.director_id = Set(self.director_id);
        model.created_by = Set(self.created_by);
    }
}

impl IntoActiveModel<film::ActiveModel> for NewFilm {
    fn into_active_model(self) -> film::ActiveModel {
        let mut model = film::ActiveModel::default();
        self.apply(&mut model);
        model
    }
}

/// The stored film as a record, the base a patch is merged onto.
pub fn film_record(film: &film::Model) -> Record {
    let mut record = Record::new();
    record.insert("title".to_string(), film.title.clone().into());
    record.insert("release_date".to_string(), film.release_date.clone().into());
    record.insert("rating".to_string(), film.rating.into());
    record.insert("poster".to_string(), film.poster.clone().into());
    record.insert("description".to_string(), film.description.clone().into());
    record.insert("director_id".to_string(), film.director_id.into());
    record.insert("created_by".to_string(), film.created_by.into());
    record
}

pub fn validate_film_record(record: &Record) -> (bool, Vec<String>) {
    let mut validator = Validator::new();
    check_film_record(record, &mut validator);
    validator.into_result()
}

pub fn parse_film_record(record: &Record) -> Result<NewFilm, Vec<String>> {
    let mut validator = Validator::new();
    match check_film_record(record, &mut validator) {
        Some(film) if validator.is_correct() => Ok(film),
        _ => Err(validator.into_errors()),
    }
}

fn check_film_record(record: &Record, v: &mut Validator) -> Option<NewFilm> {
    let expected: BTreeSet<&str> = FILM_FIELDS.into_iter().collect();
    let received: BTreeSet<&str> = record.keys().map(String::as_str).collect();
    if received != expected {
        v.reject(format!(
            "Wrong fields were given. Expected {:?}, got {:?}",
            expected.into_iter().collect::<Vec<_>>(),
            received.into_iter().collect::<Vec<_>>(),
        ));
        return None;
    }

    let field = |name: &str| record.get(name).unwrap_or(&Value::Null);

    let title = v.check_bounded_string(field("title"), TITLE_MAX_LENGTH);
    let poster = v.check_bounded_string(field("poster"), POSTER_MAX_LENGTH);
    let description = v.check_bounded_string(field("description"), DESCRIPTION_MAX_LENGTH);
    let release_date = v.check_date_value(field("release_date"));
    let rating = v.check_numeric_range(field("rating"), RATING_MIN, RATING_MAX);
    let created_by = v.check_reference(field("created_by"), false);
    let director_id = v.check_reference(field("director_id"), true);

    Some(NewFilm {
        title: title?.to_string(),
        release_date: release_date?,
        rating: rating?,
        poster: poster?.to_string(),
        description: description?.to_string(),
        director_id: director_id?,
        created_by: created_by??,
    })
}
