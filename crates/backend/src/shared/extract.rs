//! Extractors whose rejections come back as [`AppError`] (422 + JSON body)
//! instead of axum's plain-text defaults.
//!
//! JSON bodies and query strings are first read into a `serde_json::Value`
//! and then deserialized with `serde_path_to_error`, so a wrong type or an
//! unknown enum value is reported against the field that caused it.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use contracts::domain::common::FieldError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::AppError;

#[derive(Debug)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<Value>::from_request(req, state).await?;
        deserialize_fields(value).map(AppJson)
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug)]
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        // Repeated keys: the last value wins
        let object: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        deserialize_fields(Value::Object(object)).map(AppQuery)
    }
}

/// Deserialize `value`, naming the offending field on failure
fn deserialize_fields<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let field = if path == "." { "body".to_string() } else { path };
        AppError::from(vec![FieldError::new(field, e.inner().to_string())])
    })
}
