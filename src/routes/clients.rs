use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::ListQuery;
use crate::forms::clients::AddClientForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list};
use crate::services::clients as clients_service;
use crate::store::Store;

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "clients", &store);
    let result = clients_service::load_clients_page(&store, &user, params.into_inner());
    render_list(&tera, context, "clients/index.html", result)
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    let result = clients_service::add_client(&store, &user, form);
    finish_mutation(result, "Client added.", "/clients")
}

#[post("/clients/{id}/delete")]
pub async fn delete_client(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = clients_service::delete_client(&store, &user, &id);
    finish_mutation(result, "Client deleted.", "/clients")
}
