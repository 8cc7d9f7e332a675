use async_trait::async_trait;

use super::errors::{DomainError, ProductLookupError};
use super::order::{NewOrder, Order, OrderUpdate, ProductSnapshot};

pub trait OrderRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError>;
    /// Writes every order or none of them.
    fn insert_many(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>, DomainError>;
    /// Fails with `InputMismatch` before touching storage when `update.id != id`.
    fn replace(&self, id: i32, update: OrderUpdate) -> Result<(), DomainError>;
    fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// The Products service, seen from the order side.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    async fn fetch_product(&self, product_id: i32) -> Result<ProductSnapshot, ProductLookupError>;
    async fn update_stock(&self, product_id: i32, stock: i32) -> Result<(), ProductLookupError>;
}
