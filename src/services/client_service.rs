// src/services/client_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::ClientRepository, models::clients::Client};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn create_client(
        &self,
        company_name: &str,
        company_email: &str,
        contact_person: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .create(company_name, company_email, contact_person, phone, address)
            .await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list().await
    }

    pub async fn get_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client".to_string()))
    }

    pub async fn update_client(
        &self,
        id: Uuid,
        company_name: &str,
        company_email: &str,
        contact_person: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .update(id, company_name, company_email, contact_person, phone, address)
            .await?
            .ok_or_else(|| AppError::NotFound("Client".to_string()))
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Client".to_string()));
        }
        Ok(())
    }
}
