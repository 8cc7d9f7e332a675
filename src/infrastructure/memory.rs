//! Process-local order store and product catalog for tests that run without
//! Postgres or a Products service.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::domain::errors::{DomainError, ProductLookupError};
use crate::domain::order::{NewOrder, Order, OrderUpdate, ProductSnapshot};
use crate::domain::ports::{OrderRepository, ProductCatalog};

#[derive(Debug, Default)]
struct State {
    orders: Vec<Order>,
    last_id: i32,
}

impl State {
    fn push(&mut self, order: NewOrder) -> Order {
        self.last_id += 1;
        let order = Order {
            id: self.last_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total: order.total,
            created_at: Utc::now(),
        };
        self.orders.push(order.clone());
        order
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: Mutex<State>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Internal("order store lock poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.state()?.orders.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        Ok(self.state()?.orders.iter().find(|o| o.id == id).cloned())
    }

    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        Ok(self.state()?.push(order))
    }

    fn insert_many(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>, DomainError> {
        let mut state = self.state()?;
        Ok(orders.into_iter().map(|o| state.push(o)).collect())
    }

    fn replace(&self, id: i32, update: OrderUpdate) -> Result<(), DomainError> {
        update.ensure_targets(id)?;
        let mut state = self.state()?;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound)?;
        order.product_id = update.product_id;
        order.quantity = update.quantity;
        Ok(())
    }

    fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let before = state.orders.len();
        state.orders.retain(|o| o.id != id);
        if state.orders.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

// ── Product catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<i32, ProductSnapshot>,
    malformed: HashSet<i32>,
    failing_updates: HashSet<i32>,
    lookups: Vec<i32>,
    stock_updates: Vec<(i32, i32)>,
}

/// Products kept in memory. Stock updates are applied to the stored
/// snapshot and recorded, so later lookups observe the decrement.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, id: i32, price: BigDecimal, stock: i32) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .products
                .insert(id, ProductSnapshot { id, price, stock });
        }
        self
    }

    /// Lookups of `id` succeed at the transport level but return garbage.
    pub fn with_malformed_product(self, id: i32) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.malformed.insert(id);
        }
        self
    }

    /// Stock updates for `id` are refused by the service.
    pub fn with_failing_stock_update(self, id: i32) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.failing_updates.insert(id);
        }
        self
    }

    pub fn lookups(&self) -> Vec<i32> {
        self.state
            .lock()
            .map(|s| s.lookups.clone())
            .unwrap_or_default()
    }

    pub fn stock_updates(&self) -> Vec<(i32, i32)> {
        self.state
            .lock()
            .map(|s| s.stock_updates.clone())
            .unwrap_or_default()
    }

    fn state(&self) -> Result<MutexGuard<'_, CatalogState>, ProductLookupError> {
        self.state
            .lock()
            .map_err(|_| ProductLookupError::Unavailable("catalog lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn fetch_product(&self, product_id: i32) -> Result<ProductSnapshot, ProductLookupError> {
        let mut state = self.state()?;
        state.lookups.push(product_id);
        if state.malformed.contains(&product_id) {
            return Err(ProductLookupError::Malformed(
                "missing field `stock`".to_string(),
            ));
        }
        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or(ProductLookupError::Status(404))
    }

    async fn update_stock(&self, product_id: i32, stock: i32) -> Result<(), ProductLookupError> {
        let mut state = self.state()?;
        if state.failing_updates.contains(&product_id) {
            return Err(ProductLookupError::Status(500));
        }
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(ProductLookupError::Status(404))?;
        product.stock = stock;
        state.stock_updates.push((product_id, stock));
        Ok(())
    }
}
