use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::LifecycleConfig;
use crate::contract::client::LifecycleApi;
use crate::contract::model::{
    Admin, Agent, AgentProduct, Auth, Contact, Identifier, Lead, Product, Province,
};
use crate::domain::service::EntityService;
use crate::domain::state::StateRegistry;
use crate::gateways::local::LifecycleLocalClient;
use crate::infra::storage::{Migrator, SeaOrmStateRepository, SeaOrmStore, StoredEntity};

/// One service per entity type, all sharing the same registry.
#[derive(Clone)]
pub struct Services {
    pub provinces: EntityService<Province>,
    pub identifiers: EntityService<Identifier>,
    pub contacts: EntityService<Contact>,
    pub auths: EntityService<Auth>,
    pub admins: EntityService<Admin>,
    pub agents: EntityService<Agent>,
    pub products: EntityService<Product>,
    pub leads: EntityService<Lead>,
    pub agent_products: EntityService<AgentProduct>,
}

/// Wired lifecycle module: registry snapshot plus entity services.
#[derive(Clone)]
pub struct Lifecycle {
    registry: Arc<StateRegistry>,
    services: Arc<Services>,
}

impl Lifecycle {
    /// Apply schema migrations and seed the state catalog.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running lifecycle database migrations");
        Migrator::up(conn, None)
            .await
            .context("lifecycle migrations failed")?;
        info!("Lifecycle database migrations completed");
        Ok(())
    }

    /// Load the state catalog and wire every entity service to `conn`.
    pub async fn init(conn: DatabaseConnection, cfg: LifecycleConfig) -> anyhow::Result<Self> {
        info!("Initializing lifecycle module");
        cfg.validate().context("invalid lifecycle configuration")?;
        debug!(
            "Loaded lifecycle config: default_state_id={}, default_page_size={}, max_page_size={}",
            cfg.default_state_id, cfg.default_page_size, cfg.max_page_size
        );

        let repo = Arc::new(SeaOrmStateRepository::new(conn.clone()));
        let registry = Arc::new(
            StateRegistry::load(repo, cfg.eliminated_label.clone())
                .await
                .context("failed to load state catalog")?,
        );

        if registry.find_by_id(cfg.default_state_id).is_err() {
            tracing::warn!(
                state_id = cfg.default_state_id,
                "Default state is not in the catalog"
            );
        }

        let services = Services {
            provinces: service(&conn, &registry, &cfg),
            identifiers: service(&conn, &registry, &cfg),
            contacts: service(&conn, &registry, &cfg),
            auths: service(&conn, &registry, &cfg),
            admins: service(&conn, &registry, &cfg),
            agents: service(&conn, &registry, &cfg),
            products: service(&conn, &registry, &cfg),
            leads: service(&conn, &registry, &cfg),
            agent_products: service(&conn, &registry, &cfg),
        };

        Ok(Self {
            registry,
            services: Arc::new(services),
        })
    }

    pub fn registry(&self) -> &Arc<StateRegistry> {
        &self.registry
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// In-process client over every entity type.
    pub fn client(&self) -> Arc<dyn LifecycleApi> {
        Arc::new(LifecycleLocalClient::new(
            self.services.clone(),
            self.registry.clone(),
        ))
    }
}

fn service<T>(
    conn: &DatabaseConnection,
    registry: &Arc<StateRegistry>,
    cfg: &LifecycleConfig,
) -> EntityService<T>
where
    T: StoredEntity,
    SeaOrmStore<T, DatabaseConnection>: crate::domain::store::EntityStore<T>,
{
    let store = SeaOrmStore::<T, DatabaseConnection>::new(conn.clone(), cfg.page_limits());
    EntityService::new(Arc::new(store), registry.clone(), cfg.default_state_id)
}
