//! Request extractors that report failures as [`ApiError`]s.

use crate::{auth::tokens::TokenType, error::ApiError, state::AppState};
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts},
};
use database::services::account::AccountService;
use log::warn;
use models::access::Caller;

/// The user behind the bearer access token of the request
pub struct CurrentCaller(pub Caller);

impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided."))?;

        let user_id = state
            .tokens
            .verify(token.trim(), TokenType::Access)
            .map_err(|e| {
                warn!("Rejected access token: {e}");
                ApiError::unauthorized("Given token not valid for any token type")
            })?;

        let caller = AccountService::resolve_caller(&state.db, user_id).await?;
        Ok(Self(caller))
    }
}

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
