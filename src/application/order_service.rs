use std::sync::Arc;

use actix_web::web;

use crate::domain::errors::{DomainError, ProductLookupError, RejectReason};
use crate::domain::order::{
    BatchOutcome, FailureRecord, NewOrder, Order, OrderRequest, OrderUpdate, ProductSnapshot,
    StockUpdateFailure,
};
use crate::domain::ports::{OrderRepository, ProductCatalog};

/// Order placement and CRUD on top of a store and the Products service.
///
/// Nothing spans the product check, the insert and the stock decrement:
/// two requests for the same product can both pass validation against the
/// same stock figure and over-sell it. Stock decrements are best effort and
/// their failures never undo a committed order.
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { repo, catalog }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.with_repo(|repo| repo.list()).await
    }

    pub async fn get_order(&self, id: i32) -> Result<Option<Order>, DomainError> {
        self.with_repo(move |repo| repo.find_by_id(id)).await
    }

    pub async fn update_order(&self, id: i32, update: OrderUpdate) -> Result<(), DomainError> {
        self.with_repo(move |repo| repo.replace(id, update)).await
    }

    pub async fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        self.with_repo(move |repo| repo.delete(id)).await
    }

    /// Validate one request against its product, persist it and push the
    /// stock decrement.
    pub async fn place_order(&self, request: OrderRequest) -> Result<Order, DomainError> {
        let snapshot = self
            .validate(&request)
            .await
            .map_err(DomainError::Rejected)?;

        let new_order = NewOrder::priced(&request, &snapshot);
        let order = self.with_repo(move |repo| repo.insert(new_order)).await?;
        log::info!(
            "Placed order {} for product {} (quantity {}, total {})",
            order.id,
            order.product_id,
            order.quantity,
            order.total
        );

        let new_stock = snapshot.stock - order.quantity;
        if let Err(e) = self.catalog.update_stock(order.product_id, new_stock).await {
            log::warn!(
                "Stock update to {} for product {} failed after order {} was committed: {}",
                new_stock,
                order.product_id,
                order.id,
                e
            );
        }

        Ok(order)
    }

    /// Validate every request, then persist all of them or none.
    ///
    /// Each request is checked against its own fresh snapshot, so requests
    /// for the same product do not see each other's quantities.
    pub async fn place_orders(
        &self,
        requests: Option<Vec<OrderRequest>>,
    ) -> Result<BatchOutcome, DomainError> {
        let requests = match requests {
            Some(requests) if !requests.is_empty() => requests,
            _ => return Err(DomainError::EmptyBatch),
        };

        let mut failures = Vec::new();
        let mut accepted = Vec::with_capacity(requests.len());
        for request in &requests {
            match self.validate(request).await {
                Ok(snapshot) => accepted.push(NewOrder::priced(request, &snapshot)),
                Err(reason) => failures.push(FailureRecord {
                    product_id: request.product_id,
                    reason,
                }),
            }
        }

        if !failures.is_empty() {
            log::warn!(
                "Rejected batch of {} orders: {} failed validation",
                requests.len(),
                failures.len()
            );
            return Ok(BatchOutcome::Rejected(failures));
        }

        let orders = self.with_repo(move |repo| repo.insert_many(accepted)).await?;
        log::info!("Placed batch of {} orders", orders.len());

        let mut stock_update_failures = Vec::new();
        for order in &orders {
            if let Err(e) = self.decrement_stock(order).await {
                log::warn!(
                    "Stock decrement for product {} failed after order {} was committed: {}",
                    order.product_id,
                    order.id,
                    e
                );
                stock_update_failures.push(StockUpdateFailure {
                    order_id: order.id,
                    product_id: order.product_id,
                    error: e.to_string(),
                });
            }
        }

        Ok(BatchOutcome::Created {
            orders,
            stock_update_failures,
        })
    }

    async fn validate(&self, request: &OrderRequest) -> Result<ProductSnapshot, RejectReason> {
        let snapshot = self
            .catalog
            .fetch_product(request.product_id)
            .await
            .map_err(|e| {
                log::warn!("Lookup of product {} failed: {}", request.product_id, e);
                e.reject_reason()
            })?;
        snapshot.check_availability(request.quantity)?;
        Ok(snapshot)
    }

    // Re-reads the product so the decrement applies to the stock current at
    // this moment, not the figure seen during validation.
    async fn decrement_stock(&self, order: &Order) -> Result<(), ProductLookupError> {
        let snapshot = self.catalog.fetch_product(order.product_id).await?;
        self.catalog
            .update_stock(order.product_id, snapshot.stock - order.quantity)
            .await
    }

    async fn with_repo<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn OrderRepository) -> Result<T, DomainError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        web::block(move || f(repo.as_ref()))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
    }
}
