use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::types::FeeId;
use crate::forms::fees::FeeFilterForm;
use crate::listing::QueryState;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, check_role, redirect, render_template};
use crate::services::fees::FEES_PATH;
use crate::services::{self, ServiceError};

#[get("/fees")]
pub async fn show_fees(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match services::fees::load_fees_page(repo.get_ref(), &user, req.query_string()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "fees",
                &server_config.auth_service_url,
            );
            context.insert("fees", &data.fees);
            context.insert("accounts", &data.accounts);
            context.insert("badges", &data.badges);
            context.insert("sort_links", &data.sort_links);
            context.insert("pager", &data.pager);
            context.insert("filters", &data.filters);
            context.insert("reset_href", &data.reset_href);
            context.insert("current_query", req.query_string());
            context.insert("can_manage", &check_role(SERVICE_ADMIN_ROLE, &user.roles));
            render_template(&tera, "fees/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(e) => {
            log::error!("Failed to load fees: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/fees/filters")]
pub async fn fees_filters(
    req: HttpRequest,
    user: AuthenticatedUser,
    form: web::Form<FeeFilterForm>,
) -> impl Responder {
    match services::fees::apply_fee_filters(&user, &form, req.query_string()) {
        Ok(target) => redirect(&target),
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/fees")
        }
        Err(e) => {
            log::error!("Failed to apply fee filters: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/fees/{fee_id}/paid")]
pub async fn fee_mark_paid(
    req: HttpRequest,
    fee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    // Redirect back into the same page/sort/filter view the button was on.
    let back = QueryState::parse(req.query_string()).target(FEES_PATH);
    let Ok(id) = FeeId::try_from(fee_id.into_inner()) else {
        FlashMessage::error("Fee not found.").send();
        return redirect(&back);
    };
    match services::fees::settle_fee(repo.get_ref(), &user, id) {
        Ok(fee) => {
            FlashMessage::success(format!("Fee for period {} marked paid.", fee.period)).send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Fee not found.").send();
            redirect(&back)
        }
        Err(e) => {
            log::error!("Failed to mark fee {id} paid: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
