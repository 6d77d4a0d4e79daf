use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetail};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_details, orders};

use super::models::{NewOrderRow, OrderDetailRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create_with_details(
        &self,
        order: &Order,
        details: &[OrderDetail],
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // Header and lines commit together or not at all; diesel rolls the
        // transaction back on any error, including a failed commit.
        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(NewOrderRow::from(order))
                .execute(conn)?;

            let rows: Vec<OrderDetailRow> = details.iter().map(OrderDetailRow::from).collect();
            diesel::insert_into(order_details::table)
                .values(&rows)
                .execute(conn)?;

            Ok(())
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Order::from))
    }

    fn find_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = order_details::table
            .filter(order_details::order_id.eq(order_id))
            .select(OrderDetailRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(OrderDetail::from).collect())
    }

    fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // Only an order that still holds its passcode may change, so two
        // racing confirmations cannot both succeed.
        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq(order.id))
                .filter(orders::passcode.is_not_null()),
        )
        .set((
            orders::grand_total.eq(order.grand_total),
            orders::passcode.eq(order.passcode.as_deref()),
            orders::paid_at.eq(order.paid_at),
            orders::paid_bank.eq(order.paid_bank.as_deref()),
            orders::paid_account.eq(order.paid_account.as_deref()),
        ))
        .returning(OrderRow::as_returning())
        .get_result(&mut conn)
        .optional()?;

        if let Some(row) = updated {
            return Ok(Order::from(row));
        }

        let exists: bool = diesel::select(diesel::dsl::exists(
            orders::table.filter(orders::id.eq(order.id)),
        ))
        .get_result(&mut conn)?;
        if exists {
            Err(DomainError::Conflict("order already confirmed".to_string()))
        } else {
            Err(DomainError::OrderNotFound)
        }
    }
}
