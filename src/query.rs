use jiff::civil::Date;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
};

use crate::{
    entities::{director, film, film_genre, genre},
    models::SortOrder,
    validator::Validator,
};

/// Film search built up stage by stage. Nothing touches the store until
/// [`FilmQuery::all`].
#[derive(Clone, Debug)]
pub struct FilmQuery {
    select: Select<film::Entity>,
}

impl FilmQuery {
    pub fn by_id(id: i32) -> Self {
        Self { select: film::Entity::find_by_id(id) }
    }

    /// Case-insensitive substring match on the title.
    pub fn by_title(title: &str) -> Self {
        Self {
            select: film::Entity::find()
                .filter(partial_match((film::Entity, film::Column::Title), title)),
        }
    }

    /// Joins the director once and matches name and surname exactly, each
    /// only when given.
    pub fn filter_by_director(mut self, name: Option<&str>, surname: Option<&str>) -> Self {
        if name.is_none() && surname.is_none() {
            return self;
        }

        self.select = self.select.join(JoinType::InnerJoin, film::Relation::Director.def());
        if let Some(name) = name {
            self.select = self.select.filter(director::Column::Name.eq(name));
        }
        if let Some(surname) = surname {
            self.select = self.select.filter(director::Column::Surname.eq(surname));
        }
        self
    }

    /// Grouped by film id so a film reached through several genre rows
    /// comes back once.
    pub fn filter_by_genre(mut self, name: &str) -> Self {
        self.select = self
            .select
            .join(JoinType::InnerJoin, film::Relation::FilmGenre.def())
            .join(JoinType::InnerJoin, film_genre::Relation::Genre.def())
            .filter(genre::Column::Name.eq(name))
            .group_by(film::Column::Id);
        self
    }

    /// Inclusive on both ends.
    pub fn filter_by_release_date(mut self, start: Date, end: Date) -> Self {
        self.select = self
            .select
            .filter(film::Column::ReleaseDate.between(start.to_string(), end.to_string()));
        self
    }

    /// With both directives set, rating is the primary key and release date
    /// breaks ties.
    pub fn sort(self, dates: SortOrder, rating: SortOrder) -> Self {
        self.order(film::Column::Rating, rating).order(film::Column::ReleaseDate, dates)
    }

    fn order(mut self, column: film::Column, order: SortOrder) -> Self {
        self.select = match order {
            SortOrder::Ascending => self.select.order_by_asc(column),
            SortOrder::Descending => self.select.order_by_desc(column),
            SortOrder::Unsorted => self.select,
        };
        self
    }

    pub async fn all<C: ConnectionTrait>(self, db: &C) -> Result<Vec<film::Model>, DbErr> {
        self.select.all(db).await
    }

    pub fn to_sql(&self, backend: DbBackend) -> String {
        self.select.build(backend).to_string()
    }
}

/// Both filters are partial and case-insensitive; with neither given every
/// director matches.
pub fn directors_matching(name: Option<&str>, surname: Option<&str>) -> Select<director::Entity> {
    let mut select = director::Entity::find();
    if let Some(name) = name {
        select = select.filter(partial_match((director::Entity, director::Column::Name), name));
    }
    if let Some(surname) = surname {
        select =
            select.filter(partial_match((director::Entity, director::Column::Surname), surname));
    }
    select.order_by_asc(director::Column::Id)
}

/// Splits `start,end` and checks both halves as calendar dates, collecting
/// every error before giving up.
pub fn parse_release_date_range(raw: &str) -> Result<(Date, Date), Vec<String>> {
    let mut validator = Validator::new();

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [start, end] = parts[..] else {
        validator.reject(format!(
            r#"Wrong date range format. Expected "YYYY-MM-DD,YYYY-MM-DD", got {raw}"#
        ));
        return Err(validator.into_errors());
    };

    let start = validator.check_calendar_date(start);
    let end = validator.check_calendar_date(end);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(validator.into_errors()),
    }
}

/// SQLite's `LOWER` folds ASCII only, so the needle is folded the same way.
fn partial_match(column: impl IntoColumnRef, needle: &str) -> SimpleExpr {
    let pattern = LikeExpr::new(like_pattern(needle)).escape('\\');
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

/// `%needle%` with the needle's own wildcards escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars().map(|c| c.to_ascii_lowercase()) {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
