use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::EventStatus;
use crate::dto::ListQuery;
use crate::forms::events::{AddEventForm, SetEventStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list};
use crate::services::events as events_service;
use crate::store::Store;

#[get("/events")]
pub async fn show_events(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "events", &store);
    context.insert("statuses", &EventStatus::ALL);
    let result = events_service::load_events_page(&store, &user, params.into_inner());
    render_list(&tera, context, "events/index.html", result)
}

#[post("/events/add")]
pub async fn add_event(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddEventForm>,
) -> impl Responder {
    let result = events_service::add_event(&store, &user, form);
    finish_mutation(result, "Event added.", "/events")
}

#[post("/events/{id}/status")]
pub async fn set_event_status(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<SetEventStatusForm>,
) -> impl Responder {
    let result = events_service::set_event_status(&store, &user, &id, form);
    finish_mutation(result, "Event status updated.", "/events")
}

#[post("/events/{id}/delete")]
pub async fn delete_event(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = events_service::delete_event(&store, &user, &id);
    finish_mutation(result, "Event deleted.", "/events")
}
