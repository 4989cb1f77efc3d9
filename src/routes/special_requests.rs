use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::Priority;
use crate::dto::ListQuery;
use crate::forms::special_requests::AddSpecialRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list};
use crate::services::special_requests as requests_service;
use crate::store::Store;

#[get("/requests")]
pub async fn show_special_requests(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "requests", &store);
    context.insert("priorities", &Priority::ALL);
    let result = requests_service::load_special_requests_page(&store, &user, params.into_inner());
    render_list(&tera, context, "special_requests/index.html", result)
}

#[post("/requests/add")]
pub async fn add_special_request(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddSpecialRequestForm>,
) -> impl Responder {
    let result = requests_service::add_special_request(&store, &user, form);
    finish_mutation(result, "Request added.", "/requests")
}

#[post("/requests/{id}/toggle")]
pub async fn toggle_special_request(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = requests_service::toggle_special_request(&store, &user, &id);
    finish_mutation(result, "Request updated.", "/requests")
}

#[post("/requests/{id}/delete")]
pub async fn delete_special_request(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = requests_service::delete_special_request(&store, &user, &id);
    finish_mutation(result, "Request deleted.", "/requests")
}
