//! HttpTransport against an in-process backend: cookies, CSRF header,
//! error bodies and the full checkout round trip.

use std::sync::Arc;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use storefront_client::config::ApiSettings;
use storefront_client::{
    CatalogClient, Checkout, CheckoutError, HttpTransport, Transport, TransportError,
};
use storefront_core::{CartLine, CustomerForm};
use storefront_store::{CartStore, MemoryStore};

const TOKEN: &str = "tok-123";

async fn all_products() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, format!("XSRF-TOKEN={TOKEN}; Path=/"))],
        Json(json!([
            {"id": "p1", "name": "Hoodie", "price": 200, "discount": 10,
             "productSizeDTOS": [{"id": "s1", "size": "M", "quantity": 4},
                                 {"id": "s2", "size": "L", "quantity": 0}]}
        ])),
    )
}

async fn create_order(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("x-xsrf-token").and_then(|v| v.to_str().ok()) != Some(TOKEN) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"status": 403, "message": "Invalid CSRF token"})),
        );
    }
    let quantity = body["productSizesUUIDS"]["s1"].as_u64().unwrap_or(0);
    if quantity > 4 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": 400, "message": "Size M is out of stock",
                        "errors": [], "path": "/api/v1/order/createOrder"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"id": "o-1", "totalPrice": 180 * quantity, "orderStatus": "PENDING",
                    "customerDTO": body["customerDTO"]})),
    )
}

async fn login(headers: HeaderMap) -> Json<Value> {
    Json(json!({"csrfHeaderSent": headers.contains_key("x-xsrf-token")}))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/product/allProducts", get(all_products))
        .route("/api/v1/order/createOrder", post(create_order))
        .route("/api/v1/auth/login", post(login));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn transport_for(base_url: String) -> Arc<HttpTransport> {
    let settings = ApiSettings {
        base_url,
        timeout_secs: 5,
        ..ApiSettings::default()
    };
    Arc::new(HttpTransport::new(&settings).unwrap())
}

fn form() -> CustomerForm {
    CustomerForm {
        email: "mona@example.com".to_string(),
        name: "Mona".to_string(),
        city: "Cairo".to_string(),
        street: "Tahrir".to_string(),
        building_number: "12".to_string(),
        flat_number: "3".to_string(),
        phone_number: "01012345678".to_string(),
    }
}

#[tokio::test]
async fn test_checkout_round_trip_with_csrf() {
    let transport = transport_for(spawn_backend().await);
    let catalog = CatalogClient::new(Arc::clone(&transport));

    let products = catalog.fetch_products().await.unwrap();
    assert_eq!(transport.csrf_token().as_deref(), Some(TOKEN));

    let mut store = CartStore::open(MemoryStore::new());
    store.add_to_cart(CartLine::from_catalog(&products[0], "M", 3));

    let checkout = Checkout::new(Arc::clone(&transport));
    let confirmation = checkout.place_order(&form(), &mut store).await.unwrap();

    assert_eq!(confirmation.id.as_deref(), Some("o-1"));
    assert_eq!(confirmation.order_status.as_deref(), Some("PENDING"));
    assert_eq!(
        confirmation.total_price.map(|t| t.to_string()).as_deref(),
        Some("540.00")
    );
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_missing_csrf_cookie_is_rejected_and_cart_kept() {
    let transport = transport_for(spawn_backend().await);

    let mut store = CartStore::open(MemoryStore::new());
    store.add_to_cart(CartLine {
        product_id: "p1".to_string(),
        size_id: Some("s1".to_string()),
        size: "M".to_string(),
        name: "Hoodie".to_string(),
        image: String::new(),
        price: storefront_core::Money::from_major(200),
        discount: rust_decimal::Decimal::from(10),
        quantity: 1,
    });

    let err = Checkout::new(transport)
        .place_order(&form(), &mut store)
        .await
        .unwrap_err();

    match err {
        CheckoutError::Failed { message, source } => {
            assert_eq!(message, "Invalid CSRF token");
            assert!(source.is_auth_failure());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.cart().len(), 1);
}

#[tokio::test]
async fn test_backend_message_is_surfaced() {
    let transport = transport_for(spawn_backend().await);
    let catalog = CatalogClient::new(Arc::clone(&transport));
    catalog.refresh_csrf_token().await.unwrap();

    let products = catalog.fetch_products().await.unwrap();
    let mut store = CartStore::open(MemoryStore::new());
    store.add_to_cart(CartLine::from_catalog(&products[0], "M", 9));

    let err = Checkout::new(transport)
        .place_order(&form(), &mut store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Size M is out of stock");
    assert_eq!(store.cart().find("p1", "M").map(|l| l.quantity), Some(9));
}

#[tokio::test]
async fn test_login_is_exempt_from_csrf_header() {
    let transport = transport_for(spawn_backend().await);
    transport
        .get("/api/v1/product/allProducts", vec![])
        .await
        .unwrap();
    assert!(transport.csrf_token().is_some());

    let response = transport
        .post(
            "/api/v1/auth/login",
            Some(json!({"email": "a@b.c", "password": "x"})),
            vec![],
        )
        .await
        .unwrap();
    assert_eq!(response["csrfHeaderSent"], false);
}

#[tokio::test]
async fn test_unknown_route_is_a_status_error_without_message() {
    let transport = transport_for(spawn_backend().await);

    let err = transport.get("/api/v1/nope", vec![]).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 404,
            message: None
        }
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = transport_for(format!("http://{addr}"));
    let err = transport
        .get("/api/v1/product/allProducts", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}
