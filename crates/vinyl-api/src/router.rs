//! Route table.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use vinyl_auth::{AuthConfig, AuthLayer, TokenValidator};
use vinyl_core::ADMIN_ROLE;

use crate::cart_id::cart_id_middleware;
use crate::handlers::{self, admin, cart, checkout, store};
use crate::state::AppState;

/// Build the application router.
///
/// Checkout routes need an authenticated user; admin routes also need the
/// `Administrator` role. Everything else is public. When `state.web_root` is
/// set, `/Images/...` is served from `<web_root>/Images`.
pub fn create_router<V: TokenValidator>(
    state: AppState,
    validator: Arc<V>,
    auth: AuthConfig,
) -> Router {
    let checkout_routes = Router::new()
        .route("/checkout", post(checkout::address_and_payment))
        .route("/checkout/complete/{id}", get(checkout::complete))
        .route_layer(AuthLayer::new(Arc::clone(&validator), auth.clone()));

    let admin_routes = Router::new()
        .route("/admin/albums", get(admin::list).post(admin::create))
        .route(
            "/admin/albums/{id}",
            get(admin::details).put(admin::edit).delete(admin::delete),
        )
        .route("/admin/lookups", get(admin::lookups))
        .route_layer(AuthLayer::new(validator, auth.with_role(ADMIN_ROLE)));

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::home))
        .route("/store", get(store::index))
        .route("/store/browse", get(store::browse))
        .route("/store/details/{id}", get(store::details))
        .route("/store/genre-menu", get(store::genre_menu))
        .route("/cart", get(cart::index))
        .route("/cart/add/{id}", post(cart::add))
        .route("/cart/remove/{id}", post(cart::remove))
        .route("/cart/summary", get(cart::summary))
        .merge(checkout_routes)
        .merge(admin_routes);

    if let Some(web_root) = &state.web_root {
        router = router.nest_service("/Images", ServeDir::new(web_root.join("Images")));
    }

    router
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cart_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
