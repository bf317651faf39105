//! Product route handlers.
//!
//! Handlers parse the path id once, call into the store and map the result
//! onto a status code. No handler holds the store lock across an await.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use crate::http::response::{ApiError, MessageBody};
use crate::http::server::AppState;
use crate::store::{parse_product_id, NewProduct, Product, ProductId, ProductPatch, StoreError};

const LANDING_PAGE: &str = include_str!("../../assets/index.html");

/// An id segment that cannot name a product is reported as not found.
fn product_id(raw: &str) -> Result<ProductId, ApiError> {
    parse_product_id(raw).ok_or_else(|| {
        tracing::debug!(raw_id = raw, "Unparseable product id");
        ApiError(StoreError::NotFound)
    })
}

/// `GET /`
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list())
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(&raw_id)?;
    Ok(Json(state.store.get(id)?))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.store.create(&body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(&raw_id)?;
    Ok(Json(state.store.update(id, &patch)?))
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = product_id(&raw_id)?;
    state.store.delete(id)?;
    Ok(Json(MessageBody::new("Product deleted")))
}
