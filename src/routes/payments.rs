use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::{Currency, PaymentStatus};
use crate::dto::ListQuery;
use crate::forms::payments::AddPaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list, today};
use crate::services::payments as payments_service;
use crate::store::Store;

#[get("/payments")]
pub async fn show_payments(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "payments", &store);
    context.insert("currencies", &Currency::ALL);
    context.insert("statuses", &PaymentStatus::ALL);
    let result = payments_service::load_payments_page(&store, &user, params.into_inner());
    render_list(&tera, context, "payments/index.html", result)
}

#[post("/payments/add")]
pub async fn add_payment(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddPaymentForm>,
) -> impl Responder {
    let result = payments_service::add_payment(&store, &user, form);
    finish_mutation(result, "Payment added.", "/payments")
}

#[post("/payments/{id}/paid")]
pub async fn mark_payment_paid(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = payments_service::mark_payment_paid(&store, &user, &id, today());
    finish_mutation(result, "Payment marked as paid.", "/payments")
}

#[post("/payments/{id}/delete")]
pub async fn delete_payment(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = payments_service::delete_payment(&store, &user, &id);
    finish_mutation(result, "Payment deleted.", "/payments")
}
