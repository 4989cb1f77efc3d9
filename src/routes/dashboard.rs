use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, redirect, render_template, today};
use crate::services::ServiceError;
use crate::services::dashboard as dashboard_service;
use crate::store::Store;

#[get("/")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "dashboard", &store);

    match dashboard_service::load_dashboard(&store, &user, today()) {
        Ok(data) => context.insert("dashboard", &data),
        Err(ServiceError::Unauthorized) => return redirect("/auth/signin"),
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            context.insert("page_error", &err.to_string());
        }
    }

    render_template(&tera, "dashboard/index.html", &context)
}
