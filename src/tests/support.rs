use crate::AppState;
use crate::database::sqlite::SqliteRepository;
use crate::database::{PogRepository, StoreError, StoreResult};
use crate::domain::{Pog, PogField, PogFields};
use crate::services::PogService;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// create a sqlite database in memory to test against
// a single connection, since every in-memory connection is its own database
pub async fn setup_test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // run migrations to create pogs schema
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

// app state backed by a real (in-memory) sqlite store
pub async fn setup_sqlite_state() -> AppState {
    let pool = setup_test_pool().await;
    AppState {
        pog_service: PogService::new(Arc::new(SqliteRepository::new(pool))),
    }
}

pub fn fields(name: &str, ticker_symbol: &str, price: f64, color: &str) -> PogFields {
    PogFields {
        name: name.to_string(),
        ticker_symbol: ticker_symbol.to_string(),
        price,
        color: color.to_string(),
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// --- Manual Mock: PogRepository ---
// this fakes the database so we don't need sqlite for service logic tests.
// unlike sqlite it does not enforce ticker uniqueness, so only the service's pre-check guards it
#[derive(Clone, Default)]
pub struct MockRepository {
    pub pogs: Arc<Mutex<BTreeMap<i64, Pog>>>,
    pub next_id: Arc<Mutex<i64>>,
    // when set, every call fails like a dropped connection
    pub broken: Arc<AtomicBool>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.pogs.lock().unwrap().len()
    }

    fn check(&self) -> StoreResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn field_value(pog: &Pog, field: PogField) -> &str {
    match field {
        PogField::Name => &pog.name,
        PogField::TickerSymbol => &pog.ticker_symbol,
        PogField::Color => &pog.color,
    }
}

fn to_pog(id: i64, fields: &PogFields) -> Pog {
    Pog {
        id,
        name: fields.name.clone(),
        ticker_symbol: fields.ticker_symbol.clone(),
        price: fields.price,
        color: fields.color.clone(),
    }
}

#[async_trait]
impl PogRepository for MockRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pog>> {
        self.check()?;
        Ok(self.pogs.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_field(&self, field: PogField, value: &str) -> StoreResult<Option<Pog>> {
        self.check()?;
        let pogs = self.pogs.lock().unwrap();
        Ok(pogs.values().find(|p| field_value(p, field) == value).cloned())
    }

    async fn find_by_field_excluding_id(
        &self,
        field: PogField,
        value: &str,
        exclude_id: i64,
    ) -> StoreResult<Option<Pog>> {
        self.check()?;
        let pogs = self.pogs.lock().unwrap();
        Ok(pogs
            .values()
            .find(|p| p.id != exclude_id && field_value(p, field) == value)
            .cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Pog>> {
        self.check()?;
        Ok(self.pogs.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, fields: &PogFields) -> StoreResult<Pog> {
        self.check()?;
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let pog = to_pog(id, fields);
        self.pogs.lock().unwrap().insert(id, pog.clone());
        Ok(pog)
    }

    async fn update(&self, id: i64, fields: &PogFields) -> StoreResult<Pog> {
        self.check()?;
        let mut pogs = self.pogs.lock().unwrap();
        match pogs.get_mut(&id) {
            Some(existing) => {
                *existing = to_pog(id, fields);
                Ok(existing.clone())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        match self.pogs.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }
}

// --- Manual Mock: a store whose lookups are always stale ---
// simulates losing the check-then-act race: the pre-check sees nothing,
// but the write still trips the unique index
pub struct StaleLookupRepository {
    pub inner: SqliteRepository,
}

#[async_trait]
impl PogRepository for StaleLookupRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pog>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_field(&self, _field: PogField, _value: &str) -> StoreResult<Option<Pog>> {
        Ok(None)
    }

    async fn find_by_field_excluding_id(
        &self,
        _field: PogField,
        _value: &str,
        _exclude_id: i64,
    ) -> StoreResult<Option<Pog>> {
        Ok(None)
    }

    async fn find_all(&self) -> StoreResult<Vec<Pog>> {
        self.inner.find_all().await
    }

    async fn create(&self, fields: &PogFields) -> StoreResult<Pog> {
        self.inner.create(fields).await
    }

    async fn update(&self, id: i64, fields: &PogFields) -> StoreResult<Pog> {
        self.inner.update(id, fields).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.inner.delete(id).await
    }
}
