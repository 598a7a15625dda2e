use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::loan::LoanStatus;
use crate::domain::types::LoanId;
use crate::forms::loans::{LoanFilterForm, LoanStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, check_role, redirect, render_template};
use crate::services::{self, ServiceError};

#[get("/loans")]
pub async fn show_loans(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match services::loans::load_loans_page(repo.get_ref(), &user, req.query_string()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "loans",
                &server_config.auth_service_url,
            );
            context.insert("loans", &data.loans);
            context.insert("loan_types", &data.loan_types);
            context.insert("badges", &data.badges);
            context.insert("sort_links", &data.sort_links);
            context.insert("pager", &data.pager);
            context.insert("filters", &data.filters);
            context.insert("reset_href", &data.reset_href);
            context.insert("current_query", req.query_string());
            render_template(&tera, "loans/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(e) => {
            log::error!("Failed to load loans: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/loans/filters")]
pub async fn loans_filters(
    req: HttpRequest,
    user: AuthenticatedUser,
    form: web::Form<LoanFilterForm>,
) -> impl Responder {
    match services::loans::apply_loan_filters(&user, &form, req.query_string()) {
        Ok(target) => redirect(&target),
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/loans")
        }
        Err(e) => {
            log::error!("Failed to apply loan filters: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/loans/{loan_id}")]
pub async fn show_loan(
    loan_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(loan_id) = LoanId::try_from(loan_id.into_inner()) else {
        FlashMessage::error("Loan not found.").send();
        return redirect("/loans");
    };
    match services::loans::load_loan_page(repo.get_ref(), &user, loan_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "loans",
                &server_config.auth_service_url,
            );
            context.insert("loan", &data.loan);
            context.insert("loan_type_name", &data.loan_type_name);
            context.insert("schedule", &data.schedule);
            context.insert("totals", &data.totals);
            context.insert("can_manage", &check_role(SERVICE_ADMIN_ROLE, &user.roles));
            render_template(&tera, "loans/detail.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Loan not found.").send();
            redirect("/loans")
        }
        Err(e) => {
            log::error!("Failed to load loan {loan_id}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/loans/{loan_id}/status")]
pub async fn loan_set_status(
    loan_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<LoanStatusForm>,
) -> impl Responder {
    let loan_id = loan_id.into_inner();
    let Ok(id) = LoanId::try_from(loan_id) else {
        FlashMessage::error("Loan not found.").send();
        return redirect("/loans");
    };
    let Ok(status) = form.status.parse::<LoanStatus>() else {
        FlashMessage::error("Unknown loan status.").send();
        return redirect(&format!("/loans/{loan_id}"));
    };
    match services::loans::set_loan_status(repo.get_ref(), &user, id, status) {
        Ok(loan) => {
            FlashMessage::success(format!("Loan status set to {}.", loan.status)).send();
            redirect(&format!("/loans/{loan_id}"))
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Loan not found.").send();
            redirect("/loans")
        }
        Err(e) => {
            log::error!("Failed to update status of loan {loan_id}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
