//! Tower authentication middleware.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with bearer-token
//! validation and an optional role check. Generic over `TokenValidator`.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::{AuthConfig, AuthError, AuthenticatedUser, TokenValidator};

/// Tower `Layer` that wraps services with token authentication.
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V: TokenValidator> Clone for AuthLayer<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a new auth layer with the given validator and config.
    pub fn new(validator: Arc<V>, config: AuthConfig) -> Self {
        Self { validator, config }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: self.validator.clone(),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that validates tokens before forwarding requests.
///
/// On success, inserts `AuthenticatedUser` into request extensions where it's
/// available to downstream handlers.
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V: TokenValidator, S: Clone> Clone for AuthService<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let validator = self.validator.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let user = if config.enabled {
                let token = match extract_bearer_token(&req) {
                    Some(t) => t.to_string(),
                    None => return Ok(unauthorized_response(&AuthError::MissingToken)),
                };
                match validator.validate(&token, &config).await {
                    Ok(user) => user,
                    Err(auth_err) => {
                        log::warn!("Authentication failed: {auth_err}");
                        return Ok(unauthorized_response(&auth_err));
                    }
                }
            } else {
                AuthenticatedUser::developer()
            };

            if let Some(role) = config.required_role.as_deref() {
                if !user.has_role(role) {
                    let err = AuthError::Forbidden {
                        username: user.username.clone(),
                        role: role.to_string(),
                    };
                    log::warn!("Authorization failed: {err}");
                    return Ok(forbidden_response(&err));
                }
            }

            req.extensions_mut().insert(user);
            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

/// Extract bearer token from the Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn json_error(status: StatusCode, category: &str, err: &AuthError) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": category,
            "message": err.to_string(),
            "status": status.as_u16(),
        }
    });
    (
        status,
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}

/// Build a 401 Unauthorized response with WWW-Authenticate header.
fn unauthorized_response(err: &AuthError) -> axum::response::Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "authentication", err);
    response.headers_mut().insert(
        http::header::WWW_AUTHENTICATE,
        http::HeaderValue::from_static(r#"Bearer realm="vinyl""#),
    );
    response
}

/// Build a 403 Forbidden response.
fn forbidden_response(err: &AuthError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "authorization", err)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tower::ServiceExt;

    // Accepts "admin-token" (Administrator) and "user-token" (no roles).
    struct TestValidator;

    impl TokenValidator for TestValidator {
        fn validate(
            &self,
            token: &str,
            _config: &AuthConfig,
        ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>>
        {
            let token = token.to_string();
            Box::pin(async move {
                let (username, roles) = match token.as_str() {
                    "admin-token" => ("admin", vec!["Administrator".to_string()]),
                    "user-token" => ("ada", vec![]),
                    _ => return Err(AuthError::UnknownToken),
                };
                Ok(AuthenticatedUser {
                    username: username.to_string(),
                    subject: format!("test:{username}"),
                    roles,
                })
            })
        }
    }

    fn enabled() -> AuthConfig {
        AuthConfig {
            enabled: true,
            required_role: None,
        }
    }

    /// Mock inner service that captures the AuthenticatedUser.
    #[derive(Clone)]
    struct MockService {
        captured_user: Arc<Mutex<Option<AuthenticatedUser>>>,
    }

    impl MockService {
        fn new() -> Self {
            Self {
                captured_user: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Service<Request<Body>> for MockService {
        type Response = axum::response::Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let captured = self.captured_user.clone();
            Box::pin(async move {
                let user = req.extensions().get::<AuthenticatedUser>().cloned();
                *captured.lock().unwrap() = user;
                Ok((StatusCode::OK, "ok").into_response())
            })
        }
    }

    fn request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request(Some("my-token-123"));
        assert_eq!(extract_bearer_token(&req), Some("my-token-123"));
        assert_eq!(extract_bearer_token(&request(None)), None);

        let basic = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_bearer_token(&basic), None);

        let blank = Request::builder()
            .header("Authorization", "Bearer   ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_bearer_token(&blank), None);
    }

    #[tokio::test]
    async fn test_disabled_injects_developer() {
        let mock = MockService::new();
        let captured = mock.captured_user.clone();
        let layer = AuthLayer::new(Arc::new(TestValidator), AuthConfig::default());
        let resp = layer.layer(mock).oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            captured.lock().unwrap().as_ref().unwrap().username,
            "developer"
        );
    }

    #[tokio::test]
    async fn test_disabled_passes_role_check() {
        let config = AuthConfig::default().with_role("Administrator");
        let layer = AuthLayer::new(Arc::new(TestValidator), config);
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_returns_401_json() {
        let layer = AuthLayer::new(Arc::new(TestValidator), enabled());
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(http::header::WWW_AUTHENTICATE));
        let body = body_json(resp).await;
        assert_eq!(body["error"]["category"], "authentication");
        assert_eq!(body["error"]["message"], "missing authentication token");
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() {
        let layer = AuthLayer::new(Arc::new(TestValidator), enabled());
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(Some("bad-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_injects_user() {
        let mock = MockService::new();
        let captured = mock.captured_user.clone();
        let layer = AuthLayer::new(Arc::new(TestValidator), enabled());
        let resp = layer
            .layer(mock)
            .oneshot(request(Some("user-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let user = captured.lock().unwrap();
        let user = user.as_ref().expect("AuthenticatedUser should be present");
        assert_eq!(user.username, "ada");
        assert_eq!(user.subject, "test:ada");
    }

    #[tokio::test]
    async fn test_missing_role_returns_403() {
        let mock = MockService::new();
        let captured = mock.captured_user.clone();
        let layer = AuthLayer::new(Arc::new(TestValidator), enabled().with_role("Administrator"));
        let resp = layer
            .layer(mock)
            .oneshot(request(Some("user-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(captured.lock().unwrap().is_none());
        let body = body_json(resp).await;
        assert_eq!(body["error"]["category"], "authorization");
        assert_eq!(body["error"]["status"], 403);
    }

    #[tokio::test]
    async fn test_admin_role_passes() {
        let layer = AuthLayer::new(Arc::new(TestValidator), enabled().with_role("Administrator"));
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(Some("admin-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
