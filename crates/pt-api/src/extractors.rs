//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use pt_models::User;
use pt_services::SessionService;
use pt_store::RecordStore;
use serde::Serialize;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

/// The user of the current session
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = SessionService::new(&app_state.store).require_user()?;
        Ok(AuthenticatedUser(user))
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// List response wrapper
#[derive(Debug, Serialize)]
pub struct Collection<T: Serialize> {
    #[serde(rename = "_type")]
    type_name: &'static str,
    count: usize,
    elements: Vec<T>,
}

impl<T: Serialize> Collection<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            type_name: "Collection",
            count: elements.len(),
            elements,
        }
    }
}
