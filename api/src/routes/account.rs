use actix_web::{web, HttpResponse};

use rh_core::repositories::{ItemRepository, PaymentRepository, RentalRepository};
use rh_shared::ApiResponse;

use crate::handlers::ApiError;
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/me/summary
pub async fn summary<I, R, P>(
    state: web::Data<AppState<I, R, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let summary = state.account_service.summary(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
