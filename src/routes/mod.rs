//! HTTP handlers and the helpers they share.

use std::collections::HashMap;

use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::dto::ListPageData;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult};
use crate::store::Store;

pub mod accounting;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod deliverables;
pub mod events;
pub mod payments;
pub mod special_requests;
pub mod tasks;
pub mod transfer;
pub mod vendors;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Loads the templates matching `glob` and registers the `sanitize` filter.
pub fn build_tera(glob: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("sanitize", sanitize);
    Ok(tera)
}

/// Free text typed by the studio is stored as entered. It is cleaned to a
/// safe HTML subset only when rendered, so it is paired with `| safe`.
fn sanitize(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::String(text) => Ok(Value::String(ammonia::clean(text))),
        other => Ok(other.clone()),
    }
}

/// Renders `template`, answering 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// 303 redirect, so a POST is followed by a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Local calendar date of the server.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Context every page template expects.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    store: &Store,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("demo_mode", &!store.is_connected());
    context
}

/// Renders a per-collection list screen. A failed load still renders the
/// page, empty, with the error shown.
pub fn render_list<T: Serialize>(
    tera: &Tera,
    mut context: Context,
    template: &str,
    result: ServiceResult<ListPageData<T>>,
) -> HttpResponse {
    match result {
        Ok(data) => {
            context.insert("items", &data.items);
            context.insert("options", &data.options);
            context.insert("search_query", &data.search_query);
        }
        Err(err) => {
            log::error!("Failed to load {template}: {err}");
            context.insert("items", &Vec::<T>::new());
            context.insert("options", &Vec::<()>::new());
            context.insert("search_query", &None::<String>);
            context.insert("page_error", &err.to_string());
        }
    }
    render_template(tera, template, &context)
}

/// Flashes the outcome of a mutation and redirects back to `location`.
pub fn finish_mutation<T>(
    result: ServiceResult<T>,
    success: &str,
    location: &str,
) -> HttpResponse {
    match result {
        Ok(_) => FlashMessage::success(success).send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Record not found.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/auth/signin"),
        Err(ServiceError::Repository(err)) => {
            log::error!("Backend rejected a write: {err}");
            FlashMessage::error(format!("The backend rejected the change: {err}")).send();
        }
        Err(err) => {
            log::error!("Failed to apply a change: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_note(note: &str) -> String {
        let mut tera = Tera::default();
        tera.register_filter("sanitize", sanitize);
        tera.add_raw_template("note.html", "<td>{{ note | sanitize | safe }}</td>")
            .unwrap();
        let mut context = Context::new();
        context.insert("note", note);
        tera.render("note.html", &context).unwrap()
    }

    #[test]
    fn sanitize_strips_scripts_and_keeps_plain_text_readable() {
        assert_eq!(
            render_note("<script>alert(1)</script>Tom & Jerry"),
            "<td>Tom &amp; Jerry</td>"
        );
        assert_eq!(render_note("<b>Gold</b> hour"), "<td><b>Gold</b> hour</td>");
    }

    #[test]
    fn sanitize_passes_non_strings_through() {
        let value = Value::from(3);
        assert_eq!(sanitize(&value, &HashMap::new()).unwrap(), value);
    }
}
