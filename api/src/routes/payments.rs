//! Payment endpoints; all require authentication.

use actix_web::{web, HttpResponse};

use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_shared::ApiResponse;

use crate::dto::{CreatePaymentRequest, PaymentListQuery, UpdatePaymentRequest};
use crate::handlers::{parse_id, ApiError};

use super::AppState;

/// Handler for GET /api/v1/payments?status=
pub async fn list_payments<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    query: web::Query<PaymentListQuery>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let page = state
        .payment_service
        .list_payments(query.status()?, query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

/// Handler for GET /api/v1/payments/{id}
pub async fn get_payment<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "payment")?;
    let payment = state.payment_service.get_payment(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

/// Handler for GET /api/v1/rentals/{id}/payment
pub async fn get_rental_payment<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let rental_id = parse_id(&path, "rental")?;
    let payment = state
        .payment_service
        .get_payment_for_rental(rental_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

/// Handler for POST /api/v1/payments
///
/// # Errors
/// - 404 Not Found: rental does not exist
/// - 409 Conflict: rental already has a payment
/// - 400 Bad Request: amount not positive, or blank method
pub async fn create_payment<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    request: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let input = request.into_inner().into_new_payment()?;
    let payment = state.payment_service.create_payment(input).await?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(payment).with_message("Payment created successfully")))
}

/// Handler for PUT /api/v1/payments/{id}
pub async fn update_payment<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    path: web::Path<String>,
    request: web::Json<UpdatePaymentRequest>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "payment")?;
    let changes = request.into_inner().into_changes()?;
    let payment = state.payment_service.update_payment(id, changes).await?;
    Ok(HttpResponse::Ok()
        .json(ApiResponse::success(payment).with_message("Payment updated successfully")))
}

/// Handler for DELETE /api/v1/payments/{id}
pub async fn delete_payment<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = parse_id(&path, "payment")?;
    state.payment_service.delete_payment(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Payment deleted successfully")))
}
