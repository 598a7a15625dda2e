use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::transactions::TransactionFilterForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{self, ServiceError};

#[get("/transactions")]
pub async fn show_transactions(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match services::transactions::load_transactions_page(repo.get_ref(), &user, req.query_string())
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "transactions",
                &server_config.auth_service_url,
            );
            context.insert("transactions", &data.transactions);
            context.insert("accounts", &data.accounts);
            context.insert("badges", &data.badges);
            context.insert("sort_links", &data.sort_links);
            context.insert("pager", &data.pager);
            context.insert("filters", &data.filters);
            context.insert("reset_href", &data.reset_href);
            context.insert("current_query", req.query_string());
            render_template(&tera, "transactions/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(e) => {
            log::error!("Failed to load transactions: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/transactions/filters")]
pub async fn transactions_filters(
    req: HttpRequest,
    user: AuthenticatedUser,
    form: web::Form<TransactionFilterForm>,
) -> impl Responder {
    match services::transactions::apply_transaction_filters(&user, &form, req.query_string()) {
        Ok(target) => redirect(&target),
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/transactions")
        }
        Err(e) => {
            log::error!("Failed to apply transaction filters: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
