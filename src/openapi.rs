use utoipa::OpenApi;

use crate::handlers::health::{self, HealthResponse};
use crate::handlers::orders::{
    self, BatchCreatedResponse, BatchRejectedResponse, CreateOrderRequest, OrderResponse,
    UpdateOrderRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Service API",
        version = "0.1.0",
        description = "Order CRUD with stock-checked placement against the Products service."
    ),
    paths(
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::create_multiple_orders,
        orders::update_order,
        orders::delete_order,
        health::health,
    ),
    components(schemas(
        CreateOrderRequest,
        UpdateOrderRequest,
        OrderResponse,
        BatchCreatedResponse,
        BatchRejectedResponse,
        HealthResponse,
    )),
    tags(
        (name = "orders", description = "Order placement and management"),
        (name = "system", description = "Health checks")
    )
)]
pub struct ApiDoc;
