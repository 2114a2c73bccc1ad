use axum::extract::FromRef;

use crate::catalog_store::CatalogStore;
use crate::sync::CatalogSync;
use crate::user::{FullUserStore, UserManager};
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalogStore = Arc<dyn CatalogStore>;
pub type GuardedUserStore = Arc<dyn FullUserStore>;
pub type GuardedUserManager = Arc<UserManager>;
pub type GuardedCatalogSync = Arc<CatalogSync>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog_store: GuardedCatalogStore,
    pub user_store: GuardedUserStore,
    pub user_manager: GuardedUserManager,
    pub catalog_sync: GuardedCatalogSync,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog_store: GuardedCatalogStore,
        user_store: GuardedUserStore,
        catalog_sync: GuardedCatalogSync,
    ) -> ServerState {
        let user_manager = Arc::new(UserManager::new(
            user_store.clone(),
            config.session_max_age_days,
        ));
        ServerState {
            config,
            start_time: Instant::now(),
            catalog_store,
            user_store,
            user_manager,
            catalog_sync,
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedCatalogStore {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserStore {
    fn from_ref(input: &ServerState) -> Self {
        input.user_store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedCatalogSync {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_sync.clone()
    }
}
