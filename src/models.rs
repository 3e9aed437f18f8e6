pub mod billing;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod settings;
