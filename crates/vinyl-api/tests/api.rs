//! End-to-end tests of the HTTP surface.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use vinyl_api::{create_router, prepare_store, AppState, CART_ID_HEADER};
use vinyl_auth::{AuthConfig, StaticTokenValidator, UserEntry};
use vinyl_store::MusicStore;

const ADMIN: &str = "admin-token";
const SHOPPER: &str = "shopper-token";

fn app_with(store: Arc<MusicStore>) -> Router {
    let validator = StaticTokenValidator::new([
        UserEntry {
            username: "admin".to_string(),
            token: ADMIN.to_string(),
            roles: vec!["Administrator".to_string()],
        },
        UserEntry {
            username: "ada".to_string(),
            token: SHOPPER.to_string(),
            roles: vec![],
        },
    ])
    .unwrap();
    let auth = AuthConfig {
        enabled: true,
        required_role: None,
    };
    create_router(AppState::new(store), Arc::new(validator), auth)
}

fn app() -> (Router, Arc<MusicStore>) {
    let store = Arc::new(MusicStore::new());
    prepare_store(&store, false, None);
    (app_with(Arc::clone(&store)), store)
}

struct Reply {
    status: StatusCode,
    cart_id: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cart: Option<&str>,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(cart) = cart {
        req = req.header(CART_ID_HEADER, cart);
    }
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let cart_id = resp
        .headers()
        .get(CART_ID_HEADER)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        cart_id,
        body,
    }
}

fn shipping() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "address": "12 Analytical Way",
        "city": "London",
        "state": "Greater London",
        "postal_code": "N1 9GU",
        "country": "UK",
        "phone": "+44 20 7946 0000",
        "email": "ada@example.com",
    })
}

fn with_promo(code: &str) -> Value {
    let mut body = shipping();
    body["promo_code"] = json!(code);
    body
}

#[tokio::test]
async fn test_health_reports_catalog() {
    let (app, _) = app();
    let reply = send(&app, "GET", "/health", None, None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
    assert_eq!(reply.body["albums"], 100);
}

#[tokio::test]
async fn test_home_lists_six_albums() {
    let (app, _) = app();
    let reply = send(&app, "GET", "/", None, None, None).await;
    assert_eq!(reply.body.as_array().unwrap().len(), 6);
    assert_eq!(reply.body[0]["title"], "Thunder Road");
}

#[tokio::test]
async fn test_store_browsing() {
    let (app, _) = app();
    let genres = send(&app, "GET", "/store", None, None, None).await;
    assert_eq!(genres.body.as_array().unwrap().len(), 10);
    assert_eq!(genres.body[0]["name"], "Rock");

    let jazz = send(&app, "GET", "/store/browse?genre=Jazz", None, None, None).await;
    assert_eq!(jazz.status, StatusCode::OK);
    assert_eq!(jazz.body["name"], "Jazz");
    assert_eq!(jazz.body["albums"].as_array().unwrap().len(), 10);

    let missing = send(&app, "GET", "/store/browse?genre=Polka", None, None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"]["category"], "not_found");

    let details = send(&app, "GET", "/store/details/11", None, None, None).await;
    assert_eq!(details.body["title"], "Smooth Midnight");
    assert_eq!(details.body["price"], "13.99");
    assert_eq!(details.body["genre"]["name"], "Jazz");
    assert_eq!(details.body["artist"]["name"], "Blue Note Collective");

    let unknown = send(&app, "GET", "/store/details/999", None, None, None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let menu = send(&app, "GET", "/store/genre-menu", None, None, None).await;
    assert_eq!(menu.body.as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_genre_menu_orders() {
    let (app, _) = app();
    let disco = send(&app, "GET", "/store/browse?genre=Disco", None, None, None).await;
    let album_id = disco.body["albums"][0]["album_id"].as_u64().unwrap();
    let cart = Some("menu-cart");
    send(&app, "POST", &format!("/cart/add/{album_id}"), cart, None, None).await;
    let placed = send(&app, "POST", "/checkout", cart, Some(SHOPPER), Some(with_promo("FREE"))).await;
    assert_eq!(placed.status, StatusCode::CREATED);

    let by_sales = send(&app, "GET", "/store/genre-menu", None, None, None).await;
    assert_eq!(by_sales.body[0]["name"], "Disco");
    assert_eq!(by_sales.body[1]["name"], "Alternative");

    let by_name = send(&app, "GET", "/store/genre-menu?order=name", None, None, None).await;
    let names: Vec<&str> = by_name
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Alternative", "Blues", "Classical", "Disco", "Jazz", "Latin", "Metal", "Pop",
            "Reggae"
        ]
    );

    let bogus = send(&app, "GET", "/store/genre-menu?order=price", None, None, None).await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
    assert_eq!(bogus.body["error"]["category"], "bad_request");
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Option<String>, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        req = req.header("Content-Type", content_type);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let media = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, media, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (app, _) = app();
    let json = Some("application/json");

    let (status, media, body) =
        send_raw(&app, "GET", "/store/details/abc", None, None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(media.as_deref(), json);
    assert_eq!(body["error"]["category"], "bad_request");
    assert_eq!(body["error"]["status"], 400);

    let (status, _, body) = send_raw(&app, "POST", "/cart/remove/xyz", None, None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["category"], "bad_request");

    let (status, media, body) =
        send_raw(&app, "POST", "/admin/albums", Some(ADMIN), json, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(media.as_deref(), json);
    assert_eq!(body["error"]["category"], "bad_request");

    let (status, _, body) = send_raw(
        &app,
        "PUT",
        "/admin/albums/1",
        Some(ADMIN),
        json,
        r#"{"genre_id":1}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["category"], "bad_request");
    assert!(body["error"]["message"].as_str().unwrap().contains("artist_id"));

    let (status, media, body) =
        send_raw(&app, "POST", "/checkout", Some(SHOPPER), None, "").await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(media.as_deref(), json);
    assert_eq!(body["error"]["category"], "unsupported_media_type");
    assert_eq!(body["error"]["status"], 415);
}

#[tokio::test]
async fn test_cart_id_is_minted_and_echoed() {
    let (app, _) = app();
    let first = send(&app, "GET", "/cart", None, None, None).await;
    let minted = first.cart_id.unwrap();
    assert!(!minted.is_empty());

    let again = send(&app, "GET", "/cart", Some(&minted), None, None).await;
    assert_eq!(again.cart_id.as_deref(), Some(minted.as_str()));
}

#[tokio::test]
async fn test_cart_add_remove_flow() {
    let (app, _) = app();
    let cart = Some("cart-flow");

    send(&app, "POST", "/cart/add/41", cart, None, None).await;
    let added = send(&app, "POST", "/cart/add/41", cart, None, None).await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body["cart_items"][0]["count"], 2);
    assert_eq!(added.body["cart_total"], "17.98");
    let record = added.body["cart_items"][0]["record_id"].as_u64().unwrap();

    let summary = send(&app, "GET", "/cart/summary", cart, None, None).await;
    assert_eq!(summary.body["cart_count"], 2);
    assert_eq!(summary.body["titles"], json!(["Disco Fever"]));

    let uri = format!("/cart/remove/{record}");
    let once = send(&app, "POST", &uri, cart, None, None).await;
    assert_eq!(
        once.body["message"],
        " 1 copy of Disco Fever has been removed from your shopping cart."
    );
    assert_eq!(once.body["item_count"], 1);
    assert_eq!(once.body["cart_count"], 1);
    assert_eq!(once.body["delete_id"], record);

    let twice = send(&app, "POST", &uri, cart, None, None).await;
    assert_eq!(
        twice.body["message"],
        "Disco Fever has been removed from your shopping cart."
    );
    assert_eq!(twice.body["cart_total"], "0.00");

    let gone = send(&app, "POST", &uri, cart, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_add_unknown_album() {
    let (app, _) = app();
    let reply = send(&app, "POST", "/cart/add/5000", Some("c"), None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_carts_are_isolated() {
    let (app, _) = app();
    let added = send(&app, "POST", "/cart/add/1", Some("mine"), None, None).await;
    let record = added.body["cart_items"][0]["record_id"].as_u64().unwrap();

    let theirs = send(&app, "GET", "/cart", Some("theirs"), None, None).await;
    assert!(theirs.body["cart_items"].as_array().unwrap().is_empty());

    let steal = format!("/cart/remove/{record}");
    let reply = send(&app, "POST", &steal, Some("theirs"), None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_requires_authentication() {
    let (app, _) = app();
    let reply = send(&app, "POST", "/checkout", Some("c"), None, Some(with_promo("FREE"))).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"]["category"], "authentication");
}

#[tokio::test]
async fn test_checkout_flow() {
    let (app, store) = app();
    let cart = Some("ada-cart");
    send(&app, "POST", "/cart/add/1", cart, None, None).await;
    send(&app, "POST", "/cart/add/91", cart, None, None).await;

    let bad_promo = send(&app, "POST", "/checkout", cart, Some(SHOPPER), Some(with_promo("PAY"))).await;
    assert_eq!(bad_promo.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_promo.body["error"]["category"], "promo_code");

    let mut invalid = with_promo("FREE");
    invalid["email"] = json!("not-an-email");
    let bad_input = send(&app, "POST", "/checkout", cart, Some(SHOPPER), Some(invalid)).await;
    assert_eq!(bad_input.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_input.body["error"]["fields"][0]["field"], "email");

    let placed = send(&app, "POST", "/checkout", cart, Some(SHOPPER), Some(with_promo("free"))).await;
    assert_eq!(placed.status, StatusCode::CREATED);
    assert_eq!(placed.body["total"], "24.98");
    let order_id = placed.body["order_id"].as_u64().unwrap();

    let order = store.orders.all().pop().unwrap();
    assert_eq!(order.username, "ada");
    assert_eq!(store.order_details.len(), 2);

    let complete = format!("/checkout/complete/{order_id}");
    let mine = send(&app, "GET", &complete, None, Some(SHOPPER), None).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["order_id"], order_id);

    let not_mine = send(&app, "GET", &complete, None, Some(ADMIN), None).await;
    assert_eq!(not_mine.status, StatusCode::NOT_FOUND);

    let empty = send(&app, "POST", "/checkout", cart, Some(SHOPPER), Some(with_promo("FREE"))).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"]["category"], "conflict");

    let home = send(&app, "GET", "/", None, None, None).await;
    assert_eq!(home.body[0]["album_id"], 1);
    assert_eq!(home.body[1]["album_id"], 91);
}

#[tokio::test]
async fn test_admin_requires_role() {
    let (app, _) = app();
    let anonymous = send(&app, "GET", "/admin/albums", None, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let shopper = send(&app, "GET", "/admin/albums", None, Some(SHOPPER), None).await;
    assert_eq!(shopper.status, StatusCode::FORBIDDEN);
    assert_eq!(shopper.body["error"]["category"], "authorization");

    let admin = send(&app, "GET", "/admin/albums", None, Some(ADMIN), None).await;
    assert_eq!(admin.status, StatusCode::OK);
    let albums = admin.body.as_array().unwrap();
    assert_eq!(albums.len(), 100);
    assert_eq!(albums[0]["price"], "8.99");
    assert_eq!(albums[99]["price"], "16.99");
}

#[tokio::test]
async fn test_admin_album_crud() {
    let (app, store) = app();
    let admin = Some(ADMIN);

    let lookups = send(&app, "GET", "/admin/lookups", None, admin, None).await;
    assert_eq!(lookups.body["genres"].as_array().unwrap().len(), 10);
    assert_eq!(lookups.body["artists"].as_array().unwrap().len(), 55);

    let input = json!({
        "genre_id": 2,
        "artist_id": 11,
        "title": "Late Set",
        "price": "12.50",
    });
    let created = send(&app, "POST", "/admin/albums", None, admin, Some(input)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["album_id"], 101);
    assert_eq!(created.body["album_art_url"], "/Content/Images/placeholder.svg");

    let fetched = send(&app, "GET", "/admin/albums/101", None, admin, None).await;
    assert_eq!(fetched.body["artist"]["name"], "Blue Note Collective");

    let invalid = json!({ "genre_id": 2, "artist_id": 11, "title": "", "price": "0" });
    let rejected = send(&app, "PUT", "/admin/albums/101", None, admin, Some(invalid)).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = rejected.body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "price"]);

    let edit = json!({ "genre_id": 2, "artist_id": 11, "title": "Later Set", "price": 13 });
    let edited = send(&app, "PUT", "/admin/albums/101", None, admin, Some(edit.clone())).await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "Later Set");
    assert_eq!(edited.body["price"], "13.00");

    let missing = send(&app, "PUT", "/admin/albums/555", None, admin, Some(edit)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/cart/add/101", Some("c"), None, None).await;
    let deleted = send(&app, "DELETE", "/admin/albums/101", None, admin, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(store.carts.is_empty());

    let again = send(&app, "DELETE", "/admin/albums/101", None, admin, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (app, _) = app();
    let reply = send(&app, "GET", "/nope", None, None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"]["status"], 404);
    assert_eq!(reply.body["error"]["message"], "Not found: no resource at /nope");
}

#[tokio::test]
async fn test_serves_album_art() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MusicStore::new());
    prepare_store(&store, false, Some(dir.path()));
    let app = create_router(
        AppState::new(Arc::clone(&store)).with_web_root(dir.path()),
        Arc::new(StaticTokenValidator::default()),
        AuthConfig::default(),
    );

    let req = Request::builder()
        .uri("/Images/AlbumArt/album-1.png")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    assert_eq!(
        store.albums.find(vinyl_core::AlbumId(1)).unwrap().album_art_url,
        "/Images/AlbumArt/album-1.png"
    );
}

#[tokio::test]
async fn test_auth_disabled_allows_admin() {
    let store = Arc::new(MusicStore::new());
    prepare_store(&store, false, None);
    let app = create_router(
        AppState::new(store),
        Arc::new(StaticTokenValidator::default()),
        AuthConfig::default(),
    );
    let reply = send(&app, "GET", "/admin/albums/1", None, None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
}
