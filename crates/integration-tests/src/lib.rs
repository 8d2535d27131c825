//! Integration test support for the Buy01 storefront client.
//!
//! [`MockBackend`] is an in-process axum server that speaks the Buy01 REST
//! API closely enough to drive [`StorefrontClient`] end to end. It binds to
//! `127.0.0.1:0`, keeps users and products in memory, records every request
//! and exposes [`Faults`] to make individual endpoints misbehave.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p buy01-integration-tests
//! ```
//!
//! # Seeded Data
//!
//! | Account | Role | Password |
//! |---------|------|----------|
//! | [`ADMIN_EMAIL`] | `ADMIN` | [`PASSWORD`] |
//! | [`SELLER_EMAIL`] | `SELLER` | [`PASSWORD`] |
//! | [`CLIENT_EMAIL`] | `CLIENT` | [`PASSWORD`] |
//!
//! The seller owns two products, [`LAMP_ID`] (two images) and [`SOFA_ID`]
//! (no images).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use buy01_storefront::{ApiError, MemoryStorage, SessionStorage, StorefrontClient, StorefrontConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const PASSWORD: &str = "password123";
pub const ADMIN_EMAIL: &str = "admin@buy01.com";
pub const SELLER_EMAIL: &str = "jane@shop.com";
pub const CLIENT_EMAIL: &str = "bob@mail.com";

pub const SELLER_ID: &str = "u-seller";
pub const CLIENT_ID: &str = "u-client";
pub const LAMP_ID: &str = "p-lamp";
pub const SOFA_ID: &str = "p-sofa";

type Shared = Arc<Mutex<Backend>>;
type HandlerResult = Result<Response, Response>;

/// Switches that make the mock answer the way a broken backend would.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Login answers 200 without a `token` field.
    pub login_without_token: bool,
    /// `GET /api/users/me` answers with this status and an empty body.
    pub whoami_status: Option<u16>,
    /// Product updates answer with this status.
    pub update_product_status: Option<u16>,
    /// Image uploads with one of these file names answer 500.
    pub failing_uploads: HashSet<String>,
    /// Media deletes for these ids answer 404.
    pub failing_media: HashSet<String>,
}

/// Account as stored by the mock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: String,
    #[serde(skip)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockImage {
    pub id: String,
    pub image_path: String,
    pub product_id: String,
}

/// Product as stored by the mock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image_urls: Vec<MockImage>,
    pub seller_name: String,
    pub created_at: String,
    #[serde(skip)]
    pub seller_id: String,
}

#[derive(Debug)]
struct Backend {
    users: Vec<MockUser>,
    products: Vec<MockProduct>,
    sessions: HashMap<String, String>,
    faults: Faults,
    requests: Vec<String>,
    next_id: u32,
}

impl Backend {
    fn seeded() -> Self {
        let user = |id: &str, name: &str, email: &str, role: &str| MockUser {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            avatar: None,
            created_at: "2024-01-02T09:30:00".to_string(),
            password: PASSWORD.to_string(),
        };
        let image = |id: &str, product_id: &str| MockImage {
            id: id.to_string(),
            image_path: format!("/media/products/{id}.png"),
            product_id: product_id.to_string(),
        };

        Self {
            users: vec![
                user("u-admin", "Admin", ADMIN_EMAIL, "ADMIN"),
                user(SELLER_ID, "Jane Doe", SELLER_EMAIL, "SELLER"),
                user(CLIENT_ID, "Bob Martin", CLIENT_EMAIL, "CLIENT"),
            ],
            products: vec![
                MockProduct {
                    id: LAMP_ID.to_string(),
                    name: "Lampe".to_string(),
                    description: "LED desk lamp".to_string(),
                    price: 159.0,
                    quantity: 8,
                    category: Some("Maison".to_string()),
                    image_urls: vec![image("m-lamp-1", LAMP_ID), image("m-lamp-2", LAMP_ID)],
                    seller_name: "Jane Doe".to_string(),
                    created_at: "2024-01-05T10:00:00Z".to_string(),
                    seller_id: SELLER_ID.to_string(),
                },
                MockProduct {
                    id: SOFA_ID.to_string(),
                    name: "Canape".to_string(),
                    description: "Three-seat sofa".to_string(),
                    price: 899.5,
                    quantity: 2,
                    category: None,
                    image_urls: Vec::new(),
                    seller_name: "Jane Doe".to_string(),
                    created_at: "2024-01-09T16:45:00.250".to_string(),
                    seller_id: SELLER_ID.to_string(),
                },
            ],
            sessions: HashMap::new(),
            faults: Faults::default(),
            requests: Vec::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Issue a bearer token for `user`, shaped like a JWT.
    fn issue_token(&mut self, user_id: &str) -> Option<String> {
        let user = self.users.iter().find(|u| u.id == user_id)?;
        let now = chrono::Utc::now().timestamp();
        let claims = json!({
            "sub": user.email,
            "role": user.role,
            "iat": now,
            "exp": now + 3600,
            "jti": self.next_id,
        });
        self.next_id += 1;

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let token = format!("{header}.{payload}.mock-signature");
        self.sessions.insert(token.clone(), user_id.to_string());
        Some(token)
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<MockUser, Response> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| self.sessions.get(token))
            .and_then(|id| self.users.iter().find(|u| &u.id == id))
            .cloned()
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }

    fn product_mut(&mut self, id: &str) -> Result<&mut MockProduct, Response> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))
    }
}

/// In-process Buy01 backend.
#[derive(Debug)]
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to a free local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(Backend::seeded()));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client with in-memory storage and no delay between image requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the client cannot be built.
    pub fn client(&self) -> Result<StorefrontClient, ApiError> {
        self.client_with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Client on top of `storage`, e.g. to simulate a restart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the client cannot be built.
    pub fn client_with_storage(
        &self,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<StorefrontClient, ApiError> {
        let mut config = StorefrontConfig::for_api_url(&self.url())
            .map_err(|e| ApiError::Client(e.to_string()))?;
        config.upload_delay = Duration::ZERO;
        config.request_timeout = Duration::from_secs(5);
        StorefrontClient::with_storage(&config, storage)
    }

    /// Change the fault switches.
    pub fn faults(&self, change: impl FnOnce(&mut Faults)) {
        change(&mut lock(&self.state).faults);
    }

    /// Valid token for a seeded or registered account.
    #[must_use]
    pub fn token_for(&self, email: &str) -> Option<String> {
        let mut backend = lock(&self.state);
        let id = backend.users.iter().find(|u| u.email == email)?.id.clone();
        backend.issue_token(&id)
    }

    /// Forget every issued token, as a backend restart with a new secret would.
    pub fn revoke_sessions(&self) {
        lock(&self.state).sessions.clear();
    }

    /// Every request seen so far, as `"METHOD /path"`.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    /// Number of requests whose `"METHOD /path"` starts with `prefix`.
    #[must_use]
    pub fn request_count(&self, prefix: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<MockProduct> {
        lock(&self.state).products.iter().find(|p| p.id == id).cloned()
    }

    #[must_use]
    pub fn user(&self, email: &str) -> Option<MockUser> {
        lock(&self.state).users.iter().find(|u| u.email == email).cloned()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/users/me", get(current_user))
        .route("/api/users/update/avatar", put(update_avatar))
        .route("/api/users/update/{id}", put(update_user))
        .route("/api/products/all", get(all_products))
        .route("/api/products/myproducts", get(my_products))
        .route("/api/products/create", post(create_product))
        .route("/api/products/update/{id}", put(update_product))
        .route("/api/products/delete/{id}", delete(delete_product))
        .route("/api/products/{id}", get(get_product))
        .route("/api/media/add/{id}", post(add_media))
        .route("/api/media/delete/{id}", delete(delete_media))
        .route("/api/admin/users/all", get(all_users))
        .route("/api/admin/users/del/{id}", delete(delete_user))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    lock(&state).requests.push(line);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn json_response(code: StatusCode, body: &impl Serialize) -> Response {
    (code, Json(body)).into_response()
}

/// One multipart field.
struct Field {
    name: String,
    file_name: Option<String>,
    bytes: Vec<u8>,
}

async fn read_fields(mut multipart: Multipart) -> Result<Vec<Field>, Response> {
    let bad_request = |e: axum::extract::multipart::MultipartError| {
        error(StatusCode::BAD_REQUEST, &e.body_text())
    };

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_request)?.to_vec();
        fields.push(Field {
            name,
            file_name,
            bytes,
        });
    }
    Ok(fields)
}

fn data_field<T: serde::de::DeserializeOwned>(fields: &[Field]) -> Result<T, Response> {
    let data = fields
        .iter()
        .find(|f| f.name == "data")
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Missing data part"))?;
    serde_json::from_slice(&data.bytes).map_err(|e| error(StatusCode::BAD_REQUEST, &e.to_string()))
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> HandlerResult {
    let mut backend = lock(&state);
    let id = backend
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
        .map(|u| u.id.clone())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;

    if backend.faults.login_without_token {
        return Ok(json_response(StatusCode::OK, &json!({ "message": "Logged in" })));
    }
    let token = backend
        .issue_token(&id)
        .ok_or_else(|| error(StatusCode::INTERNAL_SERVER_ERROR, "User vanished"))?;
    Ok(json_response(StatusCode::OK, &json!({ "token": token })))
}

#[derive(Deserialize)]
struct RegisterData {
    name: String,
    email: String,
    password: String,
    role: String,
}

async fn register(State(state): State<Shared>, multipart: Multipart) -> HandlerResult {
    let fields = read_fields(multipart).await?;
    let data: RegisterData = data_field(&fields)?;

    if !matches!(data.role.as_str(), "CLIENT" | "SELLER") {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid role"));
    }

    let mut backend = lock(&state);
    if backend.users.iter().any(|u| u.email == data.email) {
        return Err(error(StatusCode::CONFLICT, "Email already in use"));
    }

    let avatar = fields
        .iter()
        .find(|f| f.name == "avatar")
        .and_then(|f| f.file_name.as_deref())
        .map(|name| format!("/media/avatars/{name}"));
    let user = MockUser {
        id: backend.next_id("u"),
        name: data.name,
        email: data.email,
        role: data.role,
        avatar,
        created_at: chrono::Utc::now().to_rfc3339(),
        password: data.password,
    };
    backend.users.push(user.clone());
    Ok(json_response(StatusCode::CREATED, &user))
}

// =============================================================================
// Users
// =============================================================================

async fn current_user(State(state): State<Shared>, headers: HeaderMap) -> HandlerResult {
    let backend = lock(&state);
    if let Some(code) = backend.faults.whoami_status {
        return Ok(status(code).into_response());
    }
    let user = backend.authenticate(&headers)?;
    Ok(json_response(StatusCode::OK, &user))
}

#[derive(Deserialize)]
struct UserUpdateBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UserUpdateBody>,
) -> HandlerResult {
    let mut backend = lock(&state);
    let caller = backend.authenticate(&headers)?;
    if caller.id != id && caller.role != "ADMIN" {
        return Err(error(StatusCode::FORBIDDEN, "Not your account"));
    }
    if let Some(email) = &body.email
        && backend.users.iter().any(|u| &u.email == email && u.id != id)
    {
        return Err(error(StatusCode::CONFLICT, "Email already in use"));
    }

    let user = backend
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;
    if let Some(name) = body.name {
        user.name = name;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(password) = body.password {
        user.password = password;
    }
    Ok(json_response(StatusCode::OK, &*user))
}

async fn update_avatar(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> HandlerResult {
    lock(&state).authenticate(&headers)?;
    let fields = read_fields(multipart).await?;
    let file_name = fields
        .iter()
        .find(|f| f.name == "avatar")
        .and_then(|f| f.file_name.clone())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Missing avatar part"))?;

    let mut backend = lock(&state);
    let caller = backend.authenticate(&headers)?;
    let user = backend
        .users
        .iter_mut()
        .find(|u| u.id == caller.id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;
    user.avatar = Some(format!("/media/avatars/{file_name}"));
    Ok(json_response(StatusCode::OK, &*user))
}

// =============================================================================
// Products
// =============================================================================

async fn all_products(State(state): State<Shared>) -> Response {
    json_response(StatusCode::OK, &lock(&state).products)
}

async fn my_products(State(state): State<Shared>, headers: HeaderMap) -> HandlerResult {
    let backend = lock(&state);
    let caller = backend.authenticate(&headers)?;
    let mine: Vec<&MockProduct> = backend
        .products
        .iter()
        .filter(|p| p.seller_id == caller.id)
        .collect();
    Ok(json_response(StatusCode::OK, &mine))
}

async fn get_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let mut backend = lock(&state);
    backend.authenticate(&headers)?;
    let product = backend.product_mut(&id)?;
    Ok(json_response(StatusCode::OK, &*product))
}

#[derive(Deserialize)]
struct ProductData {
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    quantity: i64,
    category: Option<String>,
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> HandlerResult {
    let caller = lock(&state).authenticate(&headers)?;
    if caller.role != "SELLER" {
        return Err(error(StatusCode::FORBIDDEN, "Only sellers can create products"));
    }

    let fields = read_fields(multipart).await?;
    let data: ProductData = data_field(&fields)?;

    let mut backend = lock(&state);
    let id = backend.next_id("p");
    let mut image_urls = Vec::new();
    for file in fields.iter().filter(|f| f.name == "files") {
        let media_id = backend.next_id("m");
        image_urls.push(MockImage {
            image_path: format!(
                "/media/products/{}",
                file.file_name.as_deref().unwrap_or(media_id.as_str())
            ),
            id: media_id,
            product_id: id.clone(),
        });
    }

    let product = MockProduct {
        id,
        name: data.name,
        description: data.description,
        price: data.price,
        quantity: data.quantity,
        category: data.category,
        image_urls,
        seller_name: caller.name,
        created_at: chrono::Utc::now().to_rfc3339(),
        seller_id: caller.id,
    };
    backend.products.push(product.clone());
    Ok(json_response(StatusCode::CREATED, &product))
}

#[derive(Deserialize)]
struct ProductUpdateBody {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    quantity: Option<i64>,
    category: Option<String>,
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ProductUpdateBody>,
) -> HandlerResult {
    let mut backend = lock(&state);
    let caller = backend.authenticate(&headers)?;
    if let Some(code) = backend.faults.update_product_status {
        return Err(status(code).into_response());
    }

    let product = backend.product_mut(&id)?;
    if product.seller_id != caller.id {
        return Err(error(StatusCode::FORBIDDEN, "Not your product"));
    }
    if let Some(name) = body.name {
        product.name = name;
    }
    if let Some(description) = body.description {
        product.description = description;
    }
    if let Some(price) = body.price {
        product.price = price;
    }
    if let Some(quantity) = body.quantity {
        product.quantity = quantity;
    }
    if body.category.is_some() {
        product.category = body.category;
    }
    Ok(json_response(StatusCode::OK, &*product))
}

async fn delete_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let mut backend = lock(&state);
    let caller = backend.authenticate(&headers)?;
    let owner = backend.product_mut(&id)?.seller_id.clone();
    if owner != caller.id {
        return Err(error(StatusCode::FORBIDDEN, "Not your product"));
    }
    backend.products.retain(|p| p.id != id);
    Ok(StatusCode::NO_CONTENT.into_response())
}

// =============================================================================
// Media
// =============================================================================

async fn add_media(
    State(state): State<Shared>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> HandlerResult {
    lock(&state).authenticate(&headers)?;
    let fields = read_fields(multipart).await?;
    let file_name = fields
        .iter()
        .find(|f| f.name == "file")
        .and_then(|f| f.file_name.clone())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Missing file part"))?;

    let mut backend = lock(&state);
    if backend.faults.failing_uploads.contains(&file_name) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
    }
    let media_id = backend.next_id("m");
    let product = backend.product_mut(&product_id)?;
    let image = MockImage {
        id: media_id,
        image_path: format!("/media/products/{file_name}"),
        product_id,
    };
    product.image_urls.push(image.clone());
    Ok(json_response(StatusCode::CREATED, &image))
}

async fn delete_media(
    State(state): State<Shared>,
    Path(media_id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let mut backend = lock(&state);
    backend.authenticate(&headers)?;
    if backend.faults.failing_media.contains(&media_id) {
        return Err(error(StatusCode::NOT_FOUND, "Media not found"));
    }

    let product = backend
        .products
        .iter_mut()
        .find(|p| p.image_urls.iter().any(|i| i.id == media_id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Media not found"))?;
    product.image_urls.retain(|i| i.id != media_id);
    Ok(StatusCode::NO_CONTENT.into_response())
}

// =============================================================================
// Admin
// =============================================================================

fn require_admin(backend: &Backend, headers: &HeaderMap) -> Result<(), Response> {
    let caller = backend.authenticate(headers)?;
    if caller.role == "ADMIN" {
        Ok(())
    } else {
        Err(error(StatusCode::FORBIDDEN, "Admins only"))
    }
}

async fn all_users(State(state): State<Shared>, headers: HeaderMap) -> HandlerResult {
    let backend = lock(&state);
    require_admin(&backend, &headers)?;
    Ok(json_response(StatusCode::OK, &backend.users))
}

async fn delete_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let mut backend = lock(&state);
    require_admin(&backend, &headers)?;
    let before = backend.users.len();
    backend.users.retain(|u| u.id != id);
    if backend.users.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "User not found"));
    }
    backend.sessions.retain(|_, user_id| user_id != &id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
