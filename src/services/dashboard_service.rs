// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::{BillingRepository, CatalogRepository, ClientRepository},
    models::dashboard::DashboardStats,
    services::stats,
};

// Fetches the three collections concurrently, then hands them to the pure
// aggregator. The handler decides what to do when the fetch fails (it
// serves the zero dashboard instead of an error page).
#[derive(Clone)]
pub struct DashboardService {
    clients: ClientRepository,
    billing: BillingRepository,
    catalog: CatalogRepository,
}

impl DashboardService {
    pub fn new(
        clients: ClientRepository,
        billing: BillingRepository,
        catalog: CatalogRepository,
    ) -> Self {
        Self {
            clients,
            billing,
            catalog,
        }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        let (clients, invoices, products) = tokio::try_join!(
            self.clients.list(),
            self.billing.list_invoices(),
            self.catalog.list_products(),
        )?;

        Ok(stats::compute_dashboard_stats(&clients, &invoices, &products))
    }
}
