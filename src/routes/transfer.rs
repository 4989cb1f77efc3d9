use actix_multipart::form::MultipartForm;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::snapshot::Collection;
use crate::forms::transfer::ImportSnapshotForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, redirect, render_template, today};
use crate::services::transfer as transfer_service;
use crate::services::{ServiceError, owner_of};
use crate::store::Store;

#[get("/data")]
pub async fn show_data(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "data", &store);

    let counts = owner_of(&user)
        .and_then(|owner| store.snapshot(&owner).map_err(ServiceError::from))
        .map(|snapshot| {
            Collection::ALL
                .into_iter()
                .map(|collection| (collection.as_str(), snapshot.len(collection)))
                .collect::<Vec<_>>()
        });
    match counts {
        Ok(counts) => context.insert("counts", &counts),
        Err(err) => {
            log::error!("Failed to load data page: {err}");
            context.insert("page_error", &err.to_string());
        }
    }

    render_template(&tera, "data/index.html", &context)
}

#[get("/data/export")]
pub async fn export_data(user: AuthenticatedUser, store: web::Data<Store>) -> impl Responder {
    match transfer_service::export_data(&store, &user) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(
                    transfer_service::export_file_name(today()),
                )],
            })
            .body(json),
        Err(ServiceError::Unauthorized) => redirect("/auth/signin"),
        Err(err) => {
            log::error!("Failed to export data: {err}");
            FlashMessage::error(format!("Export failed: {err}")).send();
            redirect("/data")
        }
    }
}

#[post("/data/import")]
pub async fn import_data(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    MultipartForm(form): MultipartForm<ImportSnapshotForm>,
) -> impl Responder {
    let bytes = match form.read_bytes() {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("Failed to read uploaded file: {err}");
            FlashMessage::error("Could not read the uploaded file.").send();
            return redirect("/data");
        }
    };

    match transfer_service::import_data(&store, &user, &bytes) {
        Ok(_) => FlashMessage::success("Data imported. Changes are local to this session.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/auth/signin"),
        Err(err) => FlashMessage::error(format!("Import failed: {err}")).send(),
    }
    redirect("/data")
}

#[post("/data/refresh")]
pub async fn refresh_data(user: AuthenticatedUser, store: web::Data<Store>) -> impl Responder {
    finish_mutation(
        transfer_service::refresh_data(&store, &user),
        "Reloaded from the backend.",
        "/data",
    )
}
