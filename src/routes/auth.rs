use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::forms::auth::SignInForm;
use crate::models::config::ServerConfig;
use crate::routes::{alert_level_to_str, redirect, render_template};
use crate::services::auth::{self as auth_service, AuthError, LinkSender};
use crate::store::Store;

#[derive(Deserialize)]
struct CallbackQuery {
    #[serde(default)]
    token: String,
}

#[get("/auth/signin")]
pub async fn show_signin(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if identity.is_some() {
        return redirect("/");
    }

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let mut context = Context::new();
    context.insert("alerts", &alerts);

    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn request_signin(
    config: web::Data<ServerConfig>,
    sender: web::Data<dyn LinkSender>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    match auth_service::request_sign_in_link(&config, sender.get_ref(), &form.email) {
        Ok(email) => {
            FlashMessage::success(format!("A sign-in link was sent to {email}.")).send();
        }
        Err(AuthError::InvalidEmail) => {
            FlashMessage::error("Enter a valid email address.").send();
        }
        Err(err) => {
            log::error!("Failed to issue sign-in link: {err}");
            FlashMessage::error("Could not send the sign-in link. Try again later.").send();
        }
    }
    redirect("/auth/signin")
}

#[get("/auth/callback")]
pub async fn signin_callback(
    request: HttpRequest,
    params: web::Query<CallbackQuery>,
    config: web::Data<ServerConfig>,
    store: web::Data<Store>,
) -> impl Responder {
    let (session, user) = match auth_service::complete_sign_in(&config, &params.token) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("Rejected sign-in link: {err}");
            FlashMessage::error("The sign-in link is invalid or has expired.").send();
            return redirect("/auth/signin");
        }
    };

    if let Err(err) = Identity::login(&request.extensions(), session) {
        log::error!("Failed to store session for {}: {err}", user.email);
        FlashMessage::error("Could not start a session.").send();
        return redirect("/auth/signin");
    }

    log::info!("{} signed in", user.email);

    // A new session starts from the backend's rows, not an earlier session's edits.
    match user.owner() {
        Ok(owner) => {
            if let Err(err) = store.refresh(&owner) {
                log::warn!("Failed to reload data for {owner} after sign-in: {err}");
            }
        }
        Err(err) => log::warn!("Signed-in user has no owner id: {err}"),
    }
    redirect("/")
}

#[post("/auth/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/auth/signin")
}
