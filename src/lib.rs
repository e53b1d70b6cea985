pub mod accounts;
pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod film_schema;
pub mod models;
pub mod query;
pub mod routes;
#[cfg(test)]
mod test_support;
pub mod validator;

use crate::{accounts::Accounts, catalog::Catalog};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub accounts: Accounts,
}
