pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
