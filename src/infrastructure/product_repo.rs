use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::is_deleted.eq(false))
            .order(products::created_at.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id))
            .filter(products::is_deleted.eq(false))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn insert(&self, product: &Product) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(products::table)
            .values(NewProductRow::from(product))
            .execute(&mut conn)?;
        Ok(())
    }

    fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // Zero rows means the product is unknown or was soft-deleted since
        // the caller last read it.
        let affected = diesel::update(
            products::table
                .filter(products::id.eq(product.id))
                .filter(products::is_deleted.eq(false)),
        )
        .set((
            products::name.eq(&product.name),
            products::price.eq(product.price),
        ))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(DomainError::ProductNotFound(product.id));
        }
        Ok(())
    }

    fn mark_deleted(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let affected = diesel::update(
            products::table
                .filter(products::id.eq(id))
                .filter(products::is_deleted.eq(false)),
        )
        .set(products::is_deleted.eq(true))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(DomainError::ProductNotFound(id));
        }
        Ok(())
    }
}
