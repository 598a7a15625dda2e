use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, ensure_role, redirect, render_template};

#[get("/")]
pub async fn show_index(user: AuthenticatedUser) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }
    redirect("/loans")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "not_assigned",
        &server_config.auth_service_url,
    );
    render_template(&tera, "main/not_assigned.html", &context)
}

#[post("/logout")]
pub async fn logout(user: Identity, server_config: web::Data<ServerConfig>) -> impl Responder {
    user.logout();
    HttpResponse::SeeOther()
        .insert_header((
            actix_web::http::header::LOCATION,
            server_config.auth_service_url.clone(),
        ))
        .finish()
}
