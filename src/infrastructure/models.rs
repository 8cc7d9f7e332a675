use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::order::{NewOrder, Order};
use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub product_id: i32,
    pub quantity: i32,
    pub total: BigDecimal,
}

impl From<NewOrder> for NewOrderRow {
    fn from(order: NewOrder) -> Self {
        NewOrderRow {
            product_id: order.product_id,
            quantity: order.quantity,
            total: order.total,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChangeset {
    pub product_id: i32,
    pub quantity: i32,
}
