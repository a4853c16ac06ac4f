use std::sync::Arc;

use cookbook_db::DbHandle;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::RecipesConfig;
use crate::contract::client::RecipesApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::RecipesLocalClient;
use crate::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmRecipesRepository};

/// Recipes module: owns the schema and wires storage, service and client together.
#[derive(Clone)]
pub struct Recipes {
    service: Arc<Service>,
}

impl Recipes {
    /// Build the module over an open SeaORM connection.
    pub fn init(conn: DatabaseConnection, cfg: RecipesConfig) -> Self {
        info!("Initializing recipes module");
        debug!(
            default_page_size = cfg.default_page_size,
            max_page_size = cfg.max_page_size,
            "Loaded recipes config"
        );

        let repo = Arc::new(SeaOrmRecipesRepository::new(conn));
        let service = Service::new(repo, ServiceConfig::from(cfg));
        Self {
            service: Arc::new(service),
        }
    }

    /// Same as [`Recipes::init`], taking the connection from a database handle.
    pub fn from_handle(db: &DbHandle, cfg: RecipesConfig) -> Self {
        Self::init(db.sea(), cfg)
    }

    /// Public client for the rest of the application.
    pub fn client(&self) -> Arc<dyn RecipesApi> {
        Arc::new(RecipesLocalClient::new(self.service.clone()))
    }

    /// Apply every pending recipes migration.
    pub async fn migrate(db: &DbHandle) -> anyhow::Result<()> {
        info!("Running recipes database migrations");
        Migrator::up(db.seaorm(), None).await?;
        info!("Recipes database migrations completed successfully");
        Ok(())
    }
}
