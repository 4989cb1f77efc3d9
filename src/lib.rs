use std::sync::Arc;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::{Compress, Logger};
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

use crate::db::{establish_connection_pool, run_migrations};
use crate::middleware::RedirectUnauthorized;
use crate::models::config::{Environment, ServerConfig};
use crate::repository::{Backend, DieselRepository};
use crate::routes::accounting::show_accounting;
use crate::routes::auth::{logout, request_signin, show_signin, signin_callback};
use crate::routes::build_tera;
use crate::routes::clients::{add_client, delete_client, show_clients};
use crate::routes::dashboard::show_dashboard;
use crate::routes::deliverables::{
    add_deliverable, delete_deliverable, mark_deliverable_delivered, show_deliverables,
};
use crate::routes::events::{add_event, delete_event, set_event_status, show_events};
use crate::routes::payments::{add_payment, delete_payment, mark_payment_paid, show_payments};
use crate::routes::special_requests::{
    add_special_request, delete_special_request, show_special_requests, toggle_special_request,
};
use crate::routes::tasks::{add_task, delete_task, show_tasks, toggle_task};
use crate::routes::transfer::{export_data, import_data, refresh_data, show_data};
use crate::routes::vendors::{add_vendor, delete_vendor, show_vendors};
use crate::services::auth::{LinkSender, LogLinkSender};
use crate::store::Store;

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

/// Opens the backend named by the configuration, if any.
fn connect_backend(server_config: &ServerConfig) -> std::io::Result<Option<Arc<dyn Backend>>> {
    let Some(database_url) = server_config
        .database_url
        .as_deref()
        .filter(|_| server_config.has_backend())
    else {
        log::warn!("No database configured; serving demo data, changes will not persist");
        return Ok(None);
    };

    let pool = establish_connection_pool(database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    Ok(Some(Arc::new(DieselRepository::new(pool))))
}

/// Registers every handler on `config`. Dashboard screens sit behind
/// [`RedirectUnauthorized`]; the sign-in flow does not.
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(show_signin)
        .service(request_signin)
        .service(signin_callback)
        .service(logout)
        .service(
            web::scope("")
                .wrap(RedirectUnauthorized)
                .service(show_dashboard)
                .service(show_accounting)
                .service(show_data)
                .service(export_data)
                .service(import_data)
                .service(refresh_data)
                .service(show_clients)
                .service(add_client)
                .service(delete_client)
                .service(show_events)
                .service(add_event)
                .service(set_event_status)
                .service(delete_event)
                .service(show_special_requests)
                .service(add_special_request)
                .service(toggle_special_request)
                .service(delete_special_request)
                .service(show_payments)
                .service(add_payment)
                .service(mark_payment_paid)
                .service(delete_payment)
                .service(show_tasks)
                .service(add_task)
                .service(toggle_task)
                .service(delete_task)
                .service(show_deliverables)
                .service(add_deliverable)
                .service(mark_deliverable_delivered)
                .service(delete_deliverable)
                .service(show_vendors)
                .service(add_vendor)
                .service(delete_vendor),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let store = web::Data::from(Store::new(connect_backend(&server_config)?));
    let link_sender: web::Data<dyn LinkSender> =
        web::Data::from(Arc::new(LogLinkSender) as Arc<dyn LinkSender>);

    // Keys and stores for identity, sessions, and flash messages.
    if server_config.secret.len() < 64 {
        return Err(std::io::Error::other(
            "secret must be at least 64 bytes long",
        ));
    }
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = build_tera(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let secure_cookies = server_config.environment == Environment::Production;
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(store.clone())
            .app_data(link_sender.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
