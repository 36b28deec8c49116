//! Extractors whose rejections render as [`ApiError`] JSON bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

/// Typed query string.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Client rejections become 400, except 415 which is kept. Server-side
/// rejections keep their status.
fn rejected(status: StatusCode, message: String) -> ApiError {
    let status = if status == StatusCode::UNSUPPORTED_MEDIA_TYPE || status.is_server_error() {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    ApiError::Rejected { status, message }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[derive(Debug, serde::Deserialize)]
    struct Named {
        name: String,
    }

    #[tokio::test]
    async fn test_json_syntax_error_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from("{oops"))
            .unwrap();
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.classify(), (StatusCode::BAD_REQUEST, "bad_request"));
    }

    #[tokio::test]
    async fn test_json_missing_field_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.classify().0, StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("name"));
    }

    #[tokio::test]
    async fn test_json_without_content_type_is_unsupported() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("{\"name\":\"x\"}"))
            .unwrap();
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();
        assert_eq!(
            err.classify(),
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
        );
    }

    #[tokio::test]
    async fn test_query_accepts_valid_input() {
        let req = Request::builder().uri("/x?name=Jazz").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let ApiQuery(named) = ApiQuery::<Named>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(named.name, "Jazz");
    }

    #[test]
    fn test_rejected_status_mapping() {
        let unprocessable = rejected(StatusCode::UNPROCESSABLE_ENTITY, "bad field".into());
        assert_eq!(unprocessable.classify(), (StatusCode::BAD_REQUEST, "bad_request"));
        assert_eq!(unprocessable.to_string(), "bad field");

        let misrouted = rejected(StatusCode::INTERNAL_SERVER_ERROR, "no params".into());
        assert_eq!(
            misrouted.classify(),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        );
    }
}
