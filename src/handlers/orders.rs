use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{BatchOutcome, Order, OrderRequest, OrderUpdate};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Any `total` sent by the client is ignored; it is always computed from the
/// product price at placement time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(body: CreateOrderRequest) -> Self {
        OrderRequest {
            product_id: body.product_id,
            quantity: body.quantity,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Decimal total as a string to avoid floating-point issues, e.g. "29.97"
    pub total: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id,
            product_id: o.product_id,
            quantity: o.quantity,
            total: o.total.to_string(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchCreatedResponse {
    pub message: String,
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchRejectedResponse {
    pub message: String,
    /// One entry per failing request, in submission order.
    pub errors: Vec<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = service.list_orders().await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    match service.get_order(path.into_inner()).await? {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound),
    }
}

/// POST /orders
///
/// Checks the product's stock, prices the order from the current product
/// price, stores it and asks the Products service to decrement its stock.
/// Validation failures come back as a plain-text 400.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Product invalid, out of stock or quantity not available", body = String),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service.place_order(body.into_inner().into()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/orders/{}", order.id)))
        .json(OrderResponse::from(order)))
}

/// POST /orders/multiple
///
/// All-or-nothing: if any request fails validation nothing is stored and
/// every failure is listed.
#[utoipa::path(
    post,
    path = "/orders/multiple",
    request_body = Vec<CreateOrderRequest>,
    responses(
        (status = 201, description = "All orders created", body = BatchCreatedResponse),
        (status = 400, description = "At least one order failed validation", body = BatchRejectedResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_multiple_orders(
    service: web::Data<OrderService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let requests: Option<Vec<OrderRequest>> = parse_batch(&body)?
        .map(|items| items.into_iter().map(OrderRequest::from).collect());

    match service.place_orders(requests).await? {
        BatchOutcome::Created { orders, .. } => {
            Ok(HttpResponse::Created().json(BatchCreatedResponse {
                message: "Orders created successfully".to_string(),
                orders: orders.into_iter().map(OrderResponse::from).collect(),
            }))
        }
        BatchOutcome::Rejected(failures) => {
            Ok(HttpResponse::BadRequest().json(BatchRejectedResponse {
                message: "Order validation failed".to_string(),
                errors: failures.iter().map(ToString::to_string).collect(),
            }))
        }
    }
}

// An empty body and a JSON `null` both mean no list was sent.
fn parse_batch(body: &[u8]) -> Result<Option<Vec<CreateOrderRequest>>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid order list: {}", e)))
}

/// PUT /orders/{id}
///
/// Updates product and quantity. The stored total is left as placed.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Path id and body id differ", body = String),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let update = OrderUpdate {
        id: body.id,
        product_id: body.product_id,
        quantity: body.quantity,
    };

    service.update_order(path.into_inner(), update).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
