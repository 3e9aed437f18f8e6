pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod invoices;
pub mod quotations;
pub mod settings;
