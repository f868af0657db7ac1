//! HTTP API 端到端测试
//!
//! 内存 SQLite + `build_app`, 通过 `tower::ServiceExt::oneshot` 在进程内驱动路由

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use restaurant_server::db;
use restaurant_server::auth::authenticate_token;
use restaurant_server::db::users::NewUser;
use restaurant_server::live::Topic;
use restaurant_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use shared::models::Role;
use std::collections::HashSet;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    state: ServerState,
}

impl TestApp {
    async fn new() -> Self {
        let pool = db::open_in_memory().await.unwrap();
        let state = ServerState::with_pool(Config::for_tests(), pool);
        Self {
            app: build_app(&state),
            state,
        }
    }

    /// Insert an account directly and mint a token for it
    async fn token_for(&self, email: &str, role: Role) -> String {
        let user = db::users::create(
            &self.state.pool,
            NewUser {
                email,
                name: "Test User",
                phone: None,
                password_hash: "not-a-real-hash",
                role,
            },
        )
        .await
        .unwrap();
        self.state.jwt_service.generate_token(&user).unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    /// Menu item with one linked stock row; returns (menu_item_id, inventory_item_id)
    async fn stocked_item(&self, admin: &str, price: f64, stock: f64, usage: f64) -> (i64, i64) {
        let (status, item) = self
            .post(
                "/api/menu",
                Some(admin),
                json!({ "name": "Margherita", "price": price, "category": "pizza" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{item}");
        let menu_item_id = item["id"].as_i64().unwrap();

        let (status, row) = self
            .post(
                "/api/inventory",
                Some(admin),
                json!({
                    "name": "Dough",
                    "quantity": stock,
                    "unit": "ball",
                    "min_quantity": 1.0,
                    "usage_per_serving": usage,
                    "menu_item_id": menu_item_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{row}");
        (menu_item_id, row["id"].as_i64().unwrap())
    }
}

fn guest_order(menu_item_id: i64, quantity: i64) -> Value {
    json!({
        "customer_name": "Grace",
        "customer_phone": "555-0199",
        "table_number": 4,
        "items": [{ "menu_item_id": menu_item_id, "quantity": quantity }]
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let t = TestApp::new().await;
    let (status, body) = t.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn register_login_and_me() {
    let t = TestApp::new().await;

    let (status, body) = t
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "ada@example.com", "name": "Ada", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("password_hash").is_none());

    // same email, different case
    let (status, body) = t
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "ADA@example.com", "name": "Ada", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let (status, body) = t
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "bob@example.com", "name": "Bob", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8003);

    let (status, body) = t
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = t
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, me) = t.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");

    let (status, _) = t.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = t.get("/api/auth/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn login_is_rate_limited() {
    let t = TestApp::new().await;
    let attempt = json!({ "email": "nobody@example.com", "password": "whatever-it-is" });

    for _ in 0..5 {
        let (status, _) = t.post("/api/auth/login", None, attempt.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, body) = t.post("/api/auth/login", None, attempt).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], 9);
}

#[tokio::test]
async fn role_checks_on_protected_routes() {
    let t = TestApp::new().await;
    let customer = t.token_for("c@example.com", Role::Customer).await;
    let staff = t.token_for("s@example.com", Role::Staff).await;

    let (status, _) = t.get("/api/inventory", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = t.get("/api/inventory", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, _) = t.get("/api/inventory", Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);

    // staff may read inventory but not manage the menu
    let (status, body) = t
        .post(
            "/api/menu",
            Some(&staff),
            json!({ "name": "Soup", "price": 4.5, "category": "starter" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, _) = t.get("/api/kitchen/orders", Some(&staff)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn guest_order_decrements_stock_and_reaches_the_kitchen() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let kitchen = t.token_for("chef@example.com", Role::Kitchen).await;
    let (pizza, dough) = t.stocked_item(&admin, 12.5, 10.0, 1.0).await;

    let (status, body) = t
        .post(
            "/api/orders",
            None,
            json!({ "items": [{ "menu_item_id": pizza, "quantity": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4011);

    let (status, body) = t.post("/api/orders", None, guest_order(pizza, 2)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["is_guest_order"], true);
    assert_eq!(body["order"]["total_amount"], 25.0);
    assert_eq!(body["order"]["items"][0]["menu_item_name"], "Margherita");
    assert_eq!(body["order_id"], body["order"]["id"]);

    let (_, rows) = t.get("/api/inventory", Some(&admin)).await;
    let row = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == dough)
        .unwrap();
    assert_eq!(row["quantity"], 8.0);
    assert_eq!(row["is_low"], false);

    let (status, active) = t.get("/api/kitchen/orders", Some(&kitchen)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn insufficient_stock_rejects_the_whole_order() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let (pizza, dough) = t.stocked_item(&admin, 10.0, 5.0, 1.0).await;

    let (status, body) = t.post("/api/orders", None, guest_order(pizza, 10)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);
    assert_eq!(body["details"]["inventory_item_id"], dough);
    assert_eq!(body["details"]["available"], 5.0);
    assert_eq!(body["details"]["required"], 10.0);

    let (_, orders) = t.get("/api/orders", Some(&admin)).await;
    assert!(orders.as_array().unwrap().is_empty());
    let (_, low) = t.get("/api/inventory/low-stock", Some(&admin)).await;
    assert!(low.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn kitchen_advances_orders_through_the_chain() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let kitchen = t.token_for("chef@example.com", Role::Kitchen).await;
    let customer = t.token_for("c@example.com", Role::Customer).await;
    let (pizza, _) = t.stocked_item(&admin, 10.0, 50.0, 1.0).await;

    let (_, created) = t.post("/api/orders", None, guest_order(pizza, 1)).await;
    let id = created["order_id"].as_i64().unwrap();
    let uri = format!("/api/orders/{id}/status");

    let (status, _) = t
        .patch(&uri, Some(&customer), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t.patch(&uri, Some(&kitchen), json!({ "status": "served" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);

    let (status, body) = t.patch(&uri, Some(&kitchen), json!({ "status": "ready" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4009);

    for next in ["confirmed", "preparing", "ready", "completed"] {
        let (status, body) = t.patch(&uri, Some(&kitchen), json!({ "status": next })).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], next);
    }

    let (status, body) = t
        .patch(&uri, Some(&kitchen), json!({ "status": "cancelled" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4009);

    let (status, _) = t
        .patch("/api/orders/9999/status", Some(&kitchen), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // completed orders leave the kitchen board and count as revenue
    let (_, active) = t.get("/api/kitchen/orders", Some(&kitchen)).await;
    assert!(active.as_array().unwrap().is_empty());
    let (status, dashboard) = t.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["today_revenue"], 10.0);
    assert_eq!(dashboard["active_orders"], 0);
    assert_eq!(dashboard["menu_items"], 1);
}

#[tokio::test]
async fn customers_only_see_their_own_orders() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let alice = t.token_for("alice@example.com", Role::Customer).await;
    let bob = t.token_for("bob@example.com", Role::Customer).await;
    let (pizza, _) = t.stocked_item(&admin, 10.0, 50.0, 1.0).await;

    // contact details default from the account
    let (status, created) = t
        .post(
            "/api/orders",
            Some(&alice),
            json!({ "items": [{ "menu_item_id": pizza, "quantity": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["order"]["is_guest_order"], false);
    assert_eq!(created["order"]["customer_name"], "Test User");
    let id = created["order_id"].as_i64().unwrap();

    let (_, mine) = t.get("/api/orders", Some(&alice)).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (status, _) = t.get(&format!("/api/orders/{id}"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, theirs) = t.get("/api/orders", Some(&bob)).await;
    assert!(theirs.as_array().unwrap().is_empty());
    let (status, body) = t.get(&format!("/api/orders/{id}"), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (_, all) = t.get("/api/orders", Some(&admin)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) = t.get("/api/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn menu_items_in_use_cannot_be_deleted() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let (pizza, _) = t.stocked_item(&admin, 10.0, 50.0, 1.0).await;
    t.post("/api/orders", None, guest_order(pizza, 1)).await;

    let (status, body) = t
        .send(Method::DELETE, &format!("/api/menu/{pizza}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6004);

    // mark unavailable instead
    let (status, body) = t
        .patch(
            &format!("/api/menu/{pizza}"),
            Some(&admin),
            json!({ "is_available": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], false);
    let (_, available) = t.get("/api/menu?available=true", None).await;
    assert!(available.as_array().unwrap().is_empty());
    let (status, body) = t.post("/api/orders", None, guest_order(pizza, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);

    let (status, salad) = t
        .post(
            "/api/menu",
            Some(&admin),
            json!({ "name": "Salad", "price": 7.0, "category": "starter" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = t
        .send(
            Method::DELETE,
            &format!("/api/menu/{}", salad["id"]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = t
        .post(
            "/api/menu",
            Some(&admin),
            json!({ "name": "Free lunch", "price": -1.0, "category": "main" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn reservations_are_validated() {
    let t = TestApp::new().await;
    let staff = t.token_for("s@example.com", Role::Staff).await;
    let booking = |party_size: i64, date: &str, time: &str| {
        json!({
            "name": "Ada",
            "phone": "555-0100",
            "party_size": party_size,
            "date": date,
            "time": time
        })
    };

    let (status, body) = t
        .post("/api/reservations", None, booking(0, "2026-12-24", "19:30"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7003);

    let (status, body) = t
        .post("/api/reservations", None, booking(51, "2026-12-24", "19:30"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7003);

    let (status, body) = t
        .post("/api/reservations", None, booking(4, "24/12/2026", "19:30"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);

    let (status, body) = t
        .post("/api/reservations", None, booking(4, "2026-12-24", "7pm"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);

    let (status, body) = t
        .post("/api/reservations", None, booking(4, "2026-12-24", "19:30"))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user_id"], Value::Null);
    let (status, _) = t
        .post("/api/reservations", Some(&staff), booking(2, "2026-12-23", "12:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = t.get("/api/reservations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, list) = t.get("/api/reservations", Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["date"], "2026-12-23");
}

#[tokio::test]
async fn reviews_are_moderated_before_publication() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let staff = t.token_for("s@example.com", Role::Staff).await;
    let customer = t.token_for("c@example.com", Role::Customer).await;
    let (pizza, _) = t.stocked_item(&admin, 10.0, 50.0, 1.0).await;
    let (_, created) = t.post("/api/orders", None, guest_order(pizza, 1)).await;
    let order_id = created["order_id"].as_i64().unwrap();

    let (status, body) = t
        .post(
            "/api/reviews",
            None,
            json!({ "rating": 6, "name": "Grace", "email": "grace@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8102);

    let (status, body) = t
        .post(
            "/api/reviews",
            None,
            json!({ "rating": 5, "name": "Grace", "email": "grace@example.com", "order_id": 9999 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, review) = t
        .post(
            "/api/reviews",
            None,
            json!({
                "rating": 5,
                "name": "Grace",
                "email": "grace@example.com",
                "comment": "Great crust",
                "order_id": order_id
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{review}");
    assert_eq!(review["status"], "pending");
    assert_eq!(review["is_guest"], true);

    // account holders may review an order once
    let (status, _) = t
        .post(
            "/api/reviews",
            Some(&customer),
            json!({ "rating": 3, "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = t
        .post(
            "/api/reviews",
            Some(&customer),
            json!({ "rating": 4, "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8103);

    let (_, public) = t.get("/api/reviews", None).await;
    assert!(public.as_array().unwrap().is_empty());
    let (_, pending) = t.get("/api/reviews?status=pending", None).await;
    assert!(pending.as_array().unwrap().is_empty());
    let (_, everything) = t.get("/api/reviews", Some(&staff)).await;
    assert_eq!(everything.as_array().unwrap().len(), 2);

    let id = review["id"].as_i64().unwrap();
    let (status, body) = t
        .patch(
            &format!("/api/reviews/{id}"),
            Some(&staff),
            json!({ "status": "published" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8104);

    let (status, _) = t
        .patch(
            &format!("/api/reviews/{id}"),
            Some(&customer),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, moderated) = t
        .patch(
            &format!("/api/reviews/{id}"),
            Some(&staff),
            json!({ "status": "approved", "admin_comment": "Thank you!" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moderated["status"], "approved");
    assert_eq!(moderated["admin_comment"], "Thank you!");

    let (_, public) = t.get("/api/reviews", None).await;
    let public = public.as_array().unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["comment"], "Great crust");
    assert!(public[0].get("admin_comment").is_none());

    let (_, filtered) = t.get("/api/reviews?min_rating=5&email=GRACE@example.com", None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (status, stats) = t.get("/api/reviews/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["approved"], 1);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["average_rating"], 5.0);
    assert_eq!(stats["positive_percentage"], 100.0);
}

#[tokio::test]
async fn admins_create_staff_accounts() {
    let t = TestApp::new().await;
    let admin = t.token_for("admin@example.com", Role::Admin).await;
    let staff = t.token_for("s@example.com", Role::Staff).await;
    let account = |role: &str| {
        json!({
            "email": format!("{role}-new@example.com"),
            "name": "New Hire",
            "password": "kitchen-secret",
            "role": role
        })
    };

    let (status, body) = t
        .post("/api/admin/staff", Some(&admin), account("customer"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "role");

    let (status, _) = t
        .post("/api/admin/staff", Some(&staff), account("kitchen"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .post("/api/admin/staff", Some(&admin), account("kitchen"))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["role"], "kitchen");

    // the new account can log in
    let (status, login) = t
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "kitchen-new@example.com", "password": "kitchen-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["user"]["role"], "kitchen");
}

#[tokio::test]
async fn live_channel_requires_a_valid_token() {
    let t = TestApp::new().await;

    let (status, body) = t.get("/api/ws", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = t.get("/api/ws?token=not-a-jwt", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
    assert_eq!(t.state.hub.connection_count(), 0);
}

#[tokio::test]
async fn live_channel_accepts_a_kitchen_token() {
    let t = TestApp::new().await;
    let token = t.token_for("cook@example.com", Role::Kitchen).await;
    let uri = format!("/api/ws?token={token}");

    // authentication passes; the in-process request cannot be upgraded
    let request = Request::builder()
        .method(Method::GET)
        .uri(&uri)
        .header(header::CONNECTION, "upgrade")
        .header(header::UPGRADE, "websocket")
        .header(header::SEC_WEBSOCKET_VERSION, "13")
        .header(header::SEC_WEBSOCKET_KEY, "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 5);

    // the session would enrol with the kitchen crew topics
    let user = authenticate_token(&t.state.jwt_service, &token, &uri.parse().unwrap()).unwrap();
    assert_eq!(user.role, Role::Kitchen);
    assert_eq!(
        Topic::for_user(&user),
        HashSet::from([Topic::Role(Role::Kitchen), Topic::Customer(user.id), Topic::Kitchen])
    );
}
