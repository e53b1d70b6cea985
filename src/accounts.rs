use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::{debug, info};

use crate::{
    AppState,
    entities::user,
    error::{AppError, AppResult},
};

const TOKEN_SCHEME: &str = "X-Token ";

#[derive(Clone)]
pub struct Accounts {
    db: DatabaseConnection,
}

impl Accounts {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn by_api_key(&self, api_key: &str) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::ApiKey.eq(api_key))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Password.eq(password))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn mark_authenticated(&self, user: user::Model) -> AppResult<user::Model> {
        if user.is_authenticated {
            return Ok(user);
        }
        let mut model: user::ActiveModel = user.into();
        model.is_authenticated = Set(true);
        Ok(model.update(&self.db).await?)
    }

    pub async fn create_user(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            api_key: Set(uuid::Uuid::new_v4().to_string()),
            is_authenticated: Set(false),
            is_active: Set(true),
            is_anonymous: Set(false),
            ..Default::default()
        };
        let user = model.insert(&self.db).await?;
        debug!(user_id = user.id, username = %user.username, "created user");
        Ok(user)
    }

    pub async fn ensure_user(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let existing =
            user::Entity::find().filter(user::Column::Username.eq(username)).one(&self.db).await?;
        if let Some(user) = existing {
            return Ok(user);
        }
        let user = self.create_user(username, password).await?;
        info!(user_id = user.id, username = %username, "bootstrap user created");
        Ok(user)
    }
}

/// Reads `Authorization: X-Token <api_key>`.
pub fn api_key_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(TOKEN_SCHEME)
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

/// The user behind the request's api key; rejects with 401 otherwise.
pub struct CurrentUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let api_key = api_key_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user = state.accounts.by_api_key(api_key).await?.ok_or(AppError::Unauthorized)?;
        Ok(Self(user))
    }
}
