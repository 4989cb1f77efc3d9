use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::ListQuery;
use crate::forms::vendors::AddVendorForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list};
use crate::services::vendors as vendors_service;
use crate::store::Store;

#[get("/vendors")]
pub async fn show_vendors(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "vendors", &store);
    let result = vendors_service::load_vendors_page(&store, &user, params.into_inner());
    render_list(&tera, context, "vendors/index.html", result)
}

#[post("/vendors/add")]
pub async fn add_vendor(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddVendorForm>,
) -> impl Responder {
    let result = vendors_service::add_vendor(&store, &user, form);
    finish_mutation(result, "Vendor added.", "/vendors")
}

#[post("/vendors/{id}/delete")]
pub async fn delete_vendor(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = vendors_service::delete_vendor(&store, &user, &id);
    finish_mutation(result, "Vendor deleted.", "/vendors")
}
