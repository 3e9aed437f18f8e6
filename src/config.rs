// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{BillingRepository, CatalogRepository, ClientRepository, SettingsRepository},
    services::{
        billing_service::BillingService, catalog_service::CatalogService,
        client_service::ClientService, dashboard_service::DashboardService,
        document_service::DocumentService,
    },
};

// Shared state, accessible from every handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub client_service: ClientService,
    pub catalog_service: CatalogService,
    pub billing_service: BillingService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("Database connection established");

        // --- Assemble the dependency graph ---
        let client_repo = ClientRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let client_service = ClientService::new(client_repo.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone());
        let billing_service = BillingService::new(billing_repo.clone());
        let dashboard_service =
            DashboardService::new(client_repo.clone(), billing_repo.clone(), catalog_repo);
        let document_service =
            DocumentService::new(billing_repo, client_repo, settings_repo.clone());

        Ok(Self {
            db_pool,
            client_service,
            catalog_service,
            billing_service,
            dashboard_service,
            document_service,
            settings_repo,
        })
    }
}
