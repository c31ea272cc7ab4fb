//! 端到端 API 流程测试 - 内存数据库 + 完整中间件栈
//!
//! 直接以 Service 方式调用 Router, 不经过网络栈。

use axum::body::{Body, to_bytes};
use chrono::Utc;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::Service;

use savora_server::auth::JwtConfig;
use savora_server::auth::password::hash_password;
use savora_server::db::models::User;
use savora_server::db::repository::UserRepository;
use savora_server::{Config, ServerState, api};

fn test_config() -> Config {
    Config {
        data_dir: "./unused-in-memory".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-0123456789".to_string(),
            expiration_minutes: 60,
            issuer: "savora-server".to_string(),
            audience: "savora-clients".to_string(),
        },
        environment: "development".to_string(),
    }
}

async fn test_state() -> ServerState {
    ServerState::initialize_in_memory(&test_config())
        .await
        .expect("in-memory state")
}

/// 以 oneshot 方式调用完整应用, 返回 (状态码, JSON body)
async fn call(state: &ServerState, request: Request<Body>) -> (StatusCode, Value) {
    let mut app = api::build_app(state).with_state(state.clone());
    let response = app.call(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// 直接入库一个管理员并签发令牌
async fn seed_admin(state: &ServerState) -> String {
    let repo = UserRepository::new(state.db.clone());
    let admin = repo
        .create(User {
            id: None,
            name: "Admin".to_string(),
            email: "admin@savora.test".to_string(),
            password_hash: hash_password("admin-password-01").unwrap(),
            image: None,
            is_admin: true,
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    state
        .get_jwt_service()
        .generate_token(
            &admin.id.unwrap().to_string(),
            &admin.name,
            &admin.email,
            true,
        )
        .unwrap()
}

/// 通过 API 注册普通用户, 返回令牌
async fn sign_up(state: &ServerState, name: &str, email: &str) -> String {
    let (status, body) = call(
        state,
        json_request(
            "POST",
            "/api/auth/sign-up",
            None,
            json!({ "name": name, "email": email, "password": "hunter2-hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "sign-up failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let state = test_state().await;
    let (status, body) = call(&state, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn sign_up_and_sign_in() {
    let state = test_state().await;

    let token = sign_up(&state, "Alice", "alice@savora.test").await;
    assert!(!token.is_empty());

    // 重复邮箱被唯一索引拒绝
    let (status, _) = call(
        &state,
        json_request(
            "POST",
            "/api/auth/sign-up",
            None,
            json!({ "name": "Alice2", "email": "alice@savora.test", "password": "hunter2-hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &state,
        json_request(
            "POST",
            "/api/auth/sign-in",
            None,
            json!({ "email": "alice@savora.test", "password": "hunter2-hunter2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "alice@savora.test");

    // 错误密码与未知邮箱返回同一错误
    let (status, wrong_pw) = call(
        &state,
        json_request(
            "POST",
            "/api/auth/sign-in",
            None,
            json!({ "email": "alice@savora.test", "password": "not-the-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unknown) = call(
        &state,
        json_request(
            "POST",
            "/api/auth/sign-in",
            None,
            json!({ "email": "nobody@savora.test", "password": "not-the-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_pw["message"], unknown["message"]);

    // 带令牌访问个人资料
    let (status, body) = call(&state, get_request("/api/auth/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");
}

#[tokio::test]
async fn catalog_requires_admin_for_writes() {
    let state = test_state().await;
    let user_token = sign_up(&state, "Bob", "bob@savora.test").await;

    let food = json!({
        "name": "Ramen", "description": "Noodle soup", "image": "/img/ramen.png",
        "price": "11.50", "time_to_delivery": 25, "available_count": 10
    });

    let (status, _) = call(
        &state,
        json_request("POST", "/api/foods", Some(&user_token), food.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = seed_admin(&state).await;
    let (status, body) = call(
        &state,
        json_request("POST", "/api/foods", Some(&admin_token), food),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");

    // 目录读取是公开的
    let (status, body) = call(&state, get_request("/api/foods", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn batch_rejects_invalid_element_without_persisting() {
    let state = test_state().await;
    let admin_token = seed_admin(&state).await;

    // 第二个元素库存为负, 整批被拒绝
    let (status, body) = call(
        &state,
        json_request(
            "POST",
            "/api/foods/batch",
            Some(&admin_token),
            json!([
                { "name": "Good", "description": "fine", "image": "/img/g.png",
                  "price": "5.00", "time_to_delivery": 10, "available_count": 3 },
                { "name": "Bad", "description": "broken", "image": "/img/b.png",
                  "price": "5.00", "time_to_delivery": 10, "available_count": -1 }
            ]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "expected rejection: {body}");
    assert_eq!(body["code"], "E0002");

    // 合法的首元素也不能入库
    let (status, body) = call(&state, get_request("/api/foods", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cart_and_orders_require_auth() {
    let state = test_state().await;

    let (status, _) = call(&state, get_request("/api/foods/cart", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&state, get_request("/api/foods/orders", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn full_order_flow() {
    let state = test_state().await;
    let admin_token = seed_admin(&state).await;

    // 批量上架: X(10.00, 库存 5), Y(4.00, 库存 2)
    let (status, body) = call(
        &state,
        json_request(
            "POST",
            "/api/foods/batch",
            Some(&admin_token),
            json!([
                { "name": "X", "description": "dish x", "image": "/img/x.png",
                  "price": "10.00", "time_to_delivery": 20, "available_count": 5 },
                { "name": "Y", "description": "dish y", "image": "/img/y.png",
                  "price": "4.00", "time_to_delivery": 10, "available_count": 2 }
            ]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "batch failed: {body}");
    let foods = body["data"].as_array().unwrap();
    // RecordId 序列化为对象, 提取 key 拼回 `food:key`
    let x_ref = format!("food:{}", record_key(&foods[0]["id"]));
    let y_ref = format!("food:{}", record_key(&foods[1]["id"]));

    let token = sign_up(&state, "Carol", "carol@savora.test").await;

    // X×2, Y×2 入购物车
    for (food_ref, qty) in [(&x_ref, 2), (&y_ref, 2)] {
        let (status, body) = call(
            &state,
            json_request(
                "POST",
                "/api/foods/cart",
                Some(&token),
                json!({ "foodId": food_ref, "quantity": qty }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "add to cart failed: {body}");
    }

    let (status, body) = call(&state, get_request("/api/foods/cart", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalItems"], 4);
    assert_eq!(body["data"]["totalAmount"], "28.00");

    // 下单: 金额精确, 状态 pending
    let (status, body) = call(
        &state,
        json_request("POST", "/api/foods/orders", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order failed: {body}");
    assert_eq!(body["data"]["totalAmount"], "28.00");
    assert_eq!(body["data"]["status"], "pending");

    // 购物车已清空, 再次下单报空购物车
    let (status, body) = call(
        &state,
        json_request("POST", "/api/foods/orders", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0102");

    // 订单历史
    let (status, body) = call(
        &state,
        get_request("/api/foods/orders?status=pending", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orders"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["totalItems"], 1);

    // 库存超卖: Y 只剩 0
    let (status, body) = call(
        &state,
        json_request(
            "POST",
            "/api/foods/cart",
            Some(&token),
            json!({ "foodId": y_ref, "quantity": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "expected stock error: {body}");
    assert_eq!(body["code"], "E0101");
}

#[tokio::test]
async fn recipe_author_permissions() {
    let state = test_state().await;
    let author_token = sign_up(&state, "Dana", "dana@savora.test").await;
    let other_token = sign_up(&state, "Eve", "eve@savora.test").await;

    let recipe = json!({
        "title": "Tomato soup", "description": "Simple soup", "time": "30 min",
        "ingredients": [{ "name": "Tomato", "amount": "4", "image": "" }],
        "instructions": ["Chop", "Simmer"],
        "image": "/img/soup.png", "category": ["Soup"]
    });

    let (status, body) = call(
        &state,
        json_request("POST", "/api/recipes", Some(&author_token), recipe),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "recipe create failed: {body}");
    let recipe_ref = format!("recipe:{}", record_key(&body["data"]["id"]));

    // 非作者不能更新
    let (status, _) = call(
        &state,
        json_request(
            "PUT",
            &format!("/api/recipes/{recipe_ref}"),
            Some(&other_token),
            json!({ "title": "Stolen soup" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 任何登录用户都可以评论
    let (status, _) = call(
        &state,
        json_request(
            "POST",
            &format!("/api/recipes/{recipe_ref}/comments"),
            Some(&other_token),
            json!({ "comment": "Looks great" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &state,
        get_request(&format!("/api/recipes/{recipe_ref}/comments"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["comment"], "Looks great");
}

/// 从序列化后的 RecordId 中提取 key 文本。
///
/// 视 SDK 版本和键类型, id 可能是 `"food:abc"` 字符串, 也可能是
/// `{ "tb": "food", "id": { "String": "abc" } }` 形式的嵌套对象。
fn record_key(id: &Value) -> String {
    match id {
        Value::String(s) => s
            .split_once(':')
            .map(|(_, key)| key.to_string())
            .unwrap_or_else(|| s.clone()),
        Value::Object(map) => {
            let inner = map
                .get("id")
                .or_else(|| map.get("key"))
                .or_else(|| map.get("String"))
                .unwrap_or_else(|| panic!("unexpected record id shape: {id}"));
            record_key(inner)
        }
        other => panic!("unexpected record id shape: {other}"),
    }
}
