use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::Value;
use uuid::Uuid;

use planora_backend::app::{create_app, AppState};
use planora_backend::auth::{Claims, Role};
use planora_backend::config::{Environment, Settings};
use planora_backend::domain::availability::{Availability, SlotStatus};
use planora_backend::domain::vendor::{
    Portfolio, PortfolioItem, PortfolioItemKind, ServiceCategory, ServiceOffering,
};
use planora_backend::domain::VendorProfile;
pub use planora_backend::store::{ProfileStore, StoreError};

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn settings() -> Settings {
    Settings {
        env: Environment::Dev,
        server_addr: "127.0.0.1:0".to_string(),
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        redis_url: None,
        redis_cache_ttl_seconds: 60,
        cors_allow_origins: vec!["http://localhost:3000".to_string()],
        jwt_secret: JWT_SECRET.to_string(),
    }
}

/// In-memory profile store preserving insertion order, so the matching
/// engine's tie-break contract can be asserted end to end.
#[derive(Default, Clone)]
pub struct MemoryStore {
    profiles: Arc<Mutex<Vec<VendorProfile>>>,
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find(&self, vendor_id: Uuid) -> Result<Option<VendorProfile>, StoreError> {
        let guard = self.profiles.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|p| p.vendor_id == vendor_id).cloned())
    }

    async fn upsert(&self, mut profile: VendorProfile) -> Result<VendorProfile, StoreError> {
        profile.updated_at = Utc::now();
        let mut guard = self.profiles.lock().expect("store mutex poisoned");
        match guard.iter_mut().find(|p| p.vendor_id == profile.vendor_id) {
            Some(existing) => *existing = profile.clone(),
            None => guard.push(profile.clone()),
        }
        Ok(profile)
    }

    async fn candidates_in_category(
        &self,
        category: ServiceCategory,
    ) -> Result<Vec<VendorProfile>, StoreError> {
        let guard = self.profiles.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|p| p.categories.contains(&category))
            .cloned()
            .collect())
    }

    async fn set_slot(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
        status: SlotStatus,
        event_id: Option<Uuid>,
    ) -> Result<Availability, StoreError> {
        let mut guard = self.profiles.lock().expect("store mutex poisoned");
        let profile = guard
            .iter_mut()
            .find(|p| p.vendor_id == vendor_id)
            .ok_or(StoreError::ProfileNotFound)?;
        profile.availability.set_slot(date, status, event_id);
        profile.updated_at = Utc::now();
        Ok(profile.availability.clone())
    }

    async fn add_portfolio_item(
        &self,
        vendor_id: Uuid,
        kind: PortfolioItemKind,
        item: PortfolioItem,
    ) -> Result<Portfolio, StoreError> {
        let mut guard = self.profiles.lock().expect("store mutex poisoned");
        let profile = guard
            .iter_mut()
            .find(|p| p.vendor_id == vendor_id)
            .ok_or(StoreError::ProfileNotFound)?;
        match kind {
            PortfolioItemKind::Image => profile.portfolio.images.push(item),
            PortfolioItemKind::Video => profile.portfolio.videos.push(item),
        }
        profile.updated_at = Utc::now();
        Ok(profile.portfolio.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store that fails every call, for surfacing-store-errors tests.
pub struct UnavailableStore;

#[async_trait]
impl ProfileStore for UnavailableStore {
    async fn find(&self, _vendor_id: Uuid) -> Result<Option<VendorProfile>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn upsert(&self, _profile: VendorProfile) -> Result<VendorProfile, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn candidates_in_category(
        &self,
        _category: ServiceCategory,
    ) -> Result<Vec<VendorProfile>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn set_slot(
        &self,
        _vendor_id: Uuid,
        _date: NaiveDate,
        _status: SlotStatus,
        _event_id: Option<Uuid>,
    ) -> Result<Availability, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn add_portfolio_item(
        &self,
        _vendor_id: Uuid,
        _kind: PortfolioItemKind,
        _item: PortfolioItem,
    ) -> Result<Portfolio, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub fn app_with_store(store: Arc<dyn ProfileStore>) -> Router {
    create_app(AppState::new(store, settings(), None))
}

pub fn memory_app() -> (Router, MemoryStore) {
    let store = MemoryStore::default();
    let router = app_with_store(Arc::new(store.clone()));
    (router, store)
}

pub fn bearer_token(user_id: Uuid) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 3600,
        role: Role::Vendor,
        email: None,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

pub fn authed_get(path: &str, user_id: Uuid) -> Request<Body> {
    Request::get(path)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", bearer_token(user_id)),
        )
        .body(Body::empty())
        .expect("request builds")
}

pub fn authed_post(path: &str, user_id: Uuid, body: &Value) -> Request<Body> {
    Request::post(path)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", bearer_token(user_id)),
        )
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("body encodes")))
        .expect("request builds")
}

pub async fn read_json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

fn service(price: f64, category: &str) -> ServiceOffering {
    ServiceOffering {
        name: format!("{category} package"),
        description: None,
        price,
        duration: None,
        category: Some(category.to_string()),
    }
}

/// A fully eligible photographer available on 2024-06-01.
pub fn photographer(
    name: &str,
    price: f64,
    rating: f64,
    completion: f64,
    response: f64,
) -> VendorProfile {
    let mut profile = VendorProfile::default_stub(Uuid::new_v4(), Utc::now());
    profile.business_name = name.to_string();
    profile.description = format!("{name} photography studio");
    profile.categories = vec![ServiceCategory::Photography];
    profile.services = vec![service(price, "Photography")];
    profile.availability.set_slot(
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        SlotStatus::Available,
        None,
    );
    profile.performance.average_rating = rating;
    profile.performance.completion_rate = completion;
    profile.performance.response_time = response;
    profile
}

pub async fn seed(store: &MemoryStore, profile: VendorProfile) {
    store.upsert(profile).await.expect("seed profile");
}
