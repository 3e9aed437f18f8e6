// src/db/catalog_repo.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, ProductVariant, ProductWithVariants},
};

/// Variant fields as the service passes them in (no ids yet).
#[derive(Debug, Clone)]
pub struct VariantInput {
    pub size: String,
    pub unit: String,
    pub cost_price: Option<Decimal>,
    pub selling_price: Decimal,
}

// Repository for the product catalog (products + variants).
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_product(
        &self,
        name: &str,
        product_type: Option<&str>,
        description: Option<&str>,
        variants: &[VariantInput],
    ) -> Result<ProductWithVariants, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, product_type, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(product_type)
        .bind(description)
        .fetch_one(&mut *tx)
        .await?;

        let mut saved_variants = Vec::with_capacity(variants.len());
        for variant in variants {
            let saved = sqlx::query_as::<_, ProductVariant>(
                r#"
                INSERT INTO product_variants (product_id, size, unit, cost_price, selling_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(product.id)
            .bind(&variant.size)
            .bind(&variant.unit)
            .bind(variant.cost_price)
            .bind(variant.selling_price)
            .fetch_one(&mut *tx)
            .await?;
            saved_variants.push(saved);
        }

        tx.commit().await?;

        Ok(ProductWithVariants {
            product,
            variants: saved_variants,
        })
    }

    pub async fn list_products(&self) -> Result<Vec<ProductWithVariants>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        let variants = sqlx::query_as::<_, ProductVariant>(
            "SELECT * FROM product_variants ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        // Group variants under their product, preserving product order.
        let mut by_product: HashMap<Uuid, Vec<ProductVariant>> = HashMap::new();
        for variant in variants {
            by_product.entry(variant.product_id).or_default().push(variant);
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let variants = by_product.remove(&product.id).unwrap_or_default();
                ProductWithVariants { product, variants }
            })
            .collect())
    }

    pub async fn find_product(&self, id: Uuid) -> Result<Option<ProductWithVariants>, AppError> {
        let Some(product) = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let variants = sqlx::query_as::<_, ProductVariant>(
            "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductWithVariants { product, variants }))
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        name: &str,
        product_type: Option<&str>,
        description: Option<&str>,
        variants: &[VariantInput],
    ) -> Result<Option<ProductWithVariants>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(product) = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, product_type = $3, description = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(product_type)
        .bind(description)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        // Variants are replaced wholesale on update.
        sqlx::query("DELETE FROM product_variants WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let mut saved_variants = Vec::with_capacity(variants.len());
        for variant in variants {
            let saved = sqlx::query_as::<_, ProductVariant>(
                r#"
                INSERT INTO product_variants (product_id, size, unit, cost_price, selling_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(&variant.size)
            .bind(&variant.unit)
            .bind(variant.cost_price)
            .bind(variant.selling_price)
            .fetch_one(&mut *tx)
            .await?;
            saved_variants.push(saved);
        }

        tx.commit().await?;

        Ok(Some(ProductWithVariants {
            product,
            variants: saved_variants,
        }))
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
