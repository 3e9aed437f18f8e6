// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{catalog_repo::VariantInput, CatalogRepository},
    models::catalog::ProductWithVariants,
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn create_product(
        &self,
        name: &str,
        product_type: Option<&str>,
        description: Option<&str>,
        variants: &[VariantInput],
    ) -> Result<ProductWithVariants, AppError> {
        self.repo
            .create_product(name, product_type, description, variants)
            .await
    }

    pub async fn list_products(&self) -> Result<Vec<ProductWithVariants>, AppError> {
        self.repo.list_products().await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductWithVariants, AppError> {
        self.repo
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        name: &str,
        product_type: Option<&str>,
        description: Option<&str>,
        variants: &[VariantInput],
    ) -> Result<ProductWithVariants, AppError> {
        self.repo
            .update_product(id, name, product_type, description, variants)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_product(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }
        Ok(())
    }
}
