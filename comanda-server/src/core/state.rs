//! Server state: shared service handles
//!
//! `ServerState` holds one reference to every service; cloning is a handful
//! of `Arc` bumps, so handlers receive it by value through the axum state
//! extractor.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::catalog::CatalogService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;
use crate::settings::SettingsService;
use crate::tabs::TabManager;
use crate::utils::AppError;

/// Shared service handles for the whole server
///
/// | Field | Role |
/// |-------|------|
/// | config | immutable configuration |
/// | db | embedded database handle |
/// | catalog | section/item repos + cached catalog index |
/// | settings | settings singleton with in-process cache |
/// | orders | order creation and lifecycle transitions |
/// | tabs | POS terminal tab sessions |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub catalog: Arc<CatalogService>,
    pub settings: Arc<SettingsService>,
    pub orders: Arc<OrderService>,
    pub tabs: Arc<TabManager>,
}

impl ServerState {
    /// Initialize all services on top of the on-disk database
    ///
    /// Order matters: the work directory first, then the database, then the
    /// services that read from it (settings does an implicit
    /// create-default on first run).
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("comanda.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Self::with_db(config.clone(), db_service.db).await
    }

    /// Build the state over an existing database handle
    ///
    /// Used by `initialize` and by tests running against the in-memory
    /// engine.
    pub async fn with_db(config: Config, db: Surreal<Db>) -> Result<Self, AppError> {
        let catalog = Arc::new(CatalogService::new(db.clone()));
        let settings = Arc::new(SettingsService::load(db.clone()).await.map_err(AppError::from)?);
        let orders = Arc::new(OrderService::new(
            db.clone(),
            catalog.clone(),
            settings.clone(),
        ));
        let tabs = Arc::new(TabManager::new(orders.clone()));

        Ok(Self {
            config,
            db,
            catalog,
            settings,
            orders,
            tabs,
        })
    }
}
