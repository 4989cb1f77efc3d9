use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::Currency;
use crate::dto::accounting::AccountingQuery;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, redirect, render_template, today};
use crate::services::ServiceError;
use crate::services::accounting as accounting_service;
use crate::store::Store;

#[get("/accounting")]
pub async fn show_accounting(
    params: web::Query<AccountingQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "accounting", &store);
    let query = params.into_inner();
    context.insert("currencies", &Currency::ALL);
    context.insert("selected_month", &query.month);
    context.insert("selected_currency", &query.currency);

    match accounting_service::load_accounting_page(&store, &user, query, today()) {
        Ok(data) => {
            context.insert("selected_month", &data.month);
            context.insert("selected_currency", &data.currency);
            context.insert("accounting", &data);
        }
        Err(ServiceError::Unauthorized) => return redirect("/auth/signin"),
        Err(err) => {
            log::warn!("Failed to load accounting: {err}");
            context.insert("page_error", &err.to_string());
        }
    }

    render_template(&tera, "accounting/index.html", &context)
}
