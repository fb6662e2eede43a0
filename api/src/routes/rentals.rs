//! Rental endpoints; all require authentication.

use actix_web::{web, HttpResponse};

use rh_core::domain::entities::rental::RentalStatus;
use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_shared::ApiResponse;

use crate::dto::{CreateRentalRequest, RentalListQuery, UpdateRentalStatusRequest};
use crate::handlers::{parse_id, ApiError};
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/rentals?role=renter|owner
pub async fn list_rentals<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    query: web::Query<RentalListQuery>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let page = state
        .rental_service
        .list_rentals(auth.user_id, query.role, query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

/// Handler for GET /api/v1/rentals/{id}
pub async fn get_rental<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "rental")?;
    let rental = state.rental_service.get_rental(auth.user_id, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rental)))
}

/// Handler for POST /api/v1/rentals
pub async fn create_rental<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    request: web::Json<CreateRentalRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let rental = state
        .rental_service
        .create_rental(auth.user_id, request.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(rental).with_message("Rental created successfully")))
}

/// Handler for PATCH /api/v1/rentals/{id}/status
pub async fn update_rental_status<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateRentalStatusRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "rental")?;
    let status: RentalStatus = request.status.parse()?;
    let rental = state
        .rental_service
        .update_status(auth.user_id, id, status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rental).with_message("Rental status updated")))
}

/// Handler for DELETE /api/v1/rentals/{id}
pub async fn delete_rental<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "rental")?;
    state.rental_service.delete_rental(auth.user_id, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Rental deleted successfully")))
}
