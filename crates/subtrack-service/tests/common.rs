//! Common test utilities for subtrack integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::json;

use subtrack_core::{FilterSet, NewSubscription, Subscription, SubscriptionId};
use subtrack_service::{create_router, AppState, ServiceConfig};
use subtrack_store::{MemoryStore, Store, StoreError};

pub const USER_A: &str = "60601fee-2bf1-4721-ae6f-7636e79a0cba";
pub const USER_B: &str = "0b0e4a39-4f1e-4c55-9a8e-2f7d8a1c3b21";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server.
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let server = server_for(store.clone());

        Self { server, store }
    }

    /// Create a subscription through the API and return the response body.
    pub async fn create(
        &self,
        service_name: &str,
        price: i64,
        user_id: &str,
        start_date: &str,
    ) -> serde_json::Value {
        let response = self
            .server
            .post("/subs")
            .json(&json!({
                "service_name": service_name,
                "price": price,
                "user_id": user_id,
                "start_date": start_date
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    /// Seed the three-record example data set.
    pub async fn seed_example(&self) {
        self.create("X", 100, USER_A, "01-2024").await;
        self.create("Y", 200, USER_A, "02-2024").await;
        self.create("X", 50, USER_B, "03-2024").await;
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a test server over any store.
pub fn server_for(store: Arc<dyn Store>) -> TestServer {
    server_with_config(
        store,
        ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        },
    )
}

/// Build a test server over any store with explicit configuration.
pub fn server_with_config(store: Arc<dyn Store>, config: ServiceConfig) -> TestServer {
    let state = AppState::new(store, config);
    let router: Router = create_router(state);

    TestServer::new(router).expect("Failed to create test server")
}

/// A store whose every operation fails as if the database were down.
pub struct BrokenStore;

fn down() -> StoreError {
    StoreError::Database("connection refused".into())
}

#[async_trait]
impl Store for BrokenStore {
    async fn insert(&self, _new: &NewSubscription) -> subtrack_store::Result<Subscription> {
        Err(down())
    }

    async fn find_by_id(&self, _id: SubscriptionId) -> subtrack_store::Result<Option<Subscription>> {
        Err(down())
    }

    async fn find_all(&self, _limit: usize, _offset: usize) -> subtrack_store::Result<Vec<Subscription>> {
        Err(down())
    }

    async fn replace(
        &self,
        _id: SubscriptionId,
        _new: &NewSubscription,
    ) -> subtrack_store::Result<Subscription> {
        Err(down())
    }

    async fn delete_by_id(&self, _id: SubscriptionId) -> subtrack_store::Result<()> {
        Err(down())
    }

    async fn aggregate_sum(&self, _filters: &FilterSet) -> subtrack_store::Result<Option<i64>> {
        Err(down())
    }

    async fn ping(&self) -> subtrack_store::Result<()> {
        Err(down())
    }
}
