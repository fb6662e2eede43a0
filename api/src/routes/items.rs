//! Item listing endpoints
//!
//! Reads are public; writes require authentication and are restricted to
//! the item's owner.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_shared::ApiResponse;

use crate::dto::{CreateItemRequest, ItemListQuery, UpdateItemRequest};
use crate::handlers::{parse_id, ApiError};
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/items
///
/// Query: `category`, `available`, `owner_id`, `page`, `per_page`.
pub async fn list_items<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    query: web::Query<ItemListQuery>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let page = state
        .item_service
        .list_items(query.filter(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

/// Handler for GET /api/v1/items/{id}
pub async fn get_item<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "item")?;
    let item = state.item_service.get_item(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(item)))
}

/// Handler for POST /api/v1/items
pub async fn create_item<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    request: web::Json<CreateItemRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    request.validate()?;
    let item = state
        .item_service
        .create_item(auth.user_id, request.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(item).with_message("Item created successfully")))
}

/// Handler for PUT /api/v1/items/{id}
pub async fn update_item<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "item")?;
    request.validate()?;
    let item = state
        .item_service
        .update_item(auth.user_id, id, request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(item).with_message("Item updated successfully")))
}

/// Handler for DELETE /api/v1/items/{id}
///
/// 409 while the item has a pending or active rental.
pub async fn delete_item<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "item")?;
    state.item_service.delete_item(auth.user_id, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Item deleted successfully")))
}
