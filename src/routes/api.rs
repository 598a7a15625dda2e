//! JSON endpoints mirroring the listing pages.

use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::{self, ServiceError};

#[get("/v1/loans")]
pub async fn api_v1_loans(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::api::list_loans(repo.get_ref(), &user, req.query_string()) {
        Ok(envelope) => HttpResponse::Ok().json(envelope),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to list loans: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/fees")]
pub async fn api_v1_fees(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::api::list_fees(repo.get_ref(), &user, req.query_string()) {
        Ok(envelope) => HttpResponse::Ok().json(envelope),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to list fees: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
