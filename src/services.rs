pub mod billing_service;
pub mod catalog_service;
pub mod client_service;
pub mod dashboard_service;
pub mod document_service;
pub mod stats;
pub mod totals;
