use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::ListQuery;
use crate::forms::deliverables::AddDeliverableForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list, today};
use crate::services::deliverables as deliverables_service;
use crate::store::Store;

#[get("/deliverables")]
pub async fn show_deliverables(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "deliverables", &store);
    let result = deliverables_service::load_deliverables_page(&store, &user, params.into_inner());
    render_list(&tera, context, "deliverables/index.html", result)
}

#[post("/deliverables/add")]
pub async fn add_deliverable(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddDeliverableForm>,
) -> impl Responder {
    let result = deliverables_service::add_deliverable(&store, &user, form);
    finish_mutation(result, "Deliverable added.", "/deliverables")
}

#[post("/deliverables/{id}/delivered")]
pub async fn mark_deliverable_delivered(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = deliverables_service::mark_deliverable_delivered(&store, &user, &id, today());
    finish_mutation(result, "Deliverable marked as delivered.", "/deliverables")
}

#[post("/deliverables/{id}/delete")]
pub async fn delete_deliverable(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = deliverables_service::delete_deliverable(&store, &user, &id);
    finish_mutation(result, "Deliverable deleted.", "/deliverables")
}
