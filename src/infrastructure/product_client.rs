use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::errors::ProductLookupError;
use crate::domain::order::ProductSnapshot;
use crate::domain::ports::ProductCatalog;

/// Products service client over HTTP.
///
/// Every call is a fresh round trip: no caching and no retries.
pub struct HttpProductCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, product_id: i32) -> String {
        format!("{}/products/{}", self.base_url, product_id)
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn fetch_product(&self, product_id: i32) -> Result<ProductSnapshot, ProductLookupError> {
        let resp = self
            .client
            .get(self.product_url(product_id))
            .send()
            .await
            .map_err(|e| ProductLookupError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProductLookupError::Status(resp.status().as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ProductLookupError::Unavailable(e.to_string()))?;
        parse_snapshot(&body)
    }

    async fn update_stock(&self, product_id: i32, stock: i32) -> Result<(), ProductLookupError> {
        let resp = self
            .client
            .patch(format!("{}/stock", self.product_url(product_id)))
            .json(&json!({ "stock": stock }))
            .send()
            .await
            .map_err(|e| ProductLookupError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProductLookupError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

// ── Payload parsing ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: i32,
    price: Value,
    stock: i32,
}

/// Parse a product body, matching field names case-insensitively.
pub fn parse_snapshot(body: &[u8]) -> Result<ProductSnapshot, ProductLookupError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ProductLookupError::Malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ProductLookupError::Malformed(
            "expected a JSON object".to_string(),
        ));
    };

    let lowered: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect();
    let payload: ProductPayload = serde_json::from_value(Value::Object(lowered))
        .map_err(|e| ProductLookupError::Malformed(e.to_string()))?;

    if payload.stock < 0 {
        return Err(ProductLookupError::Malformed(format!(
            "negative stock {}",
            payload.stock
        )));
    }

    Ok(ProductSnapshot {
        id: payload.id,
        price: decimal_from_json(&payload.price)?,
        stock: payload.stock,
    })
}

// Go through the textual form so 10.99 stays 10.99 instead of its binary
// float expansion.
fn decimal_from_json(value: &Value) -> Result<BigDecimal, ProductLookupError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(ProductLookupError::Malformed(format!(
                "price is not a number: {}",
                other
            )))
        }
    };
    BigDecimal::from_str(&text)
        .map_err(|e| ProductLookupError::Malformed(format!("invalid price '{}': {}", text, e)))
}
