use std::sync::{Arc, Mutex};

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use actix_web::{App, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use studio_desk::domain::types::{
    ContactEmail, EventStatus, OwnerId, PaymentStatus, RecordId, RequestStatus, TaskStatus,
};
use studio_desk::models::config::{Environment, ServerConfig};
use studio_desk::routes::{alert_level_to_str, build_tera};
use studio_desk::services::auth::{AuthError, LinkSender};
use studio_desk::store::Store;

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[derive(Default)]
struct CapturingSender {
    links: Mutex<Vec<String>>,
}

impl LinkSender for CapturingSender {
    fn send_sign_in_link(&self, _email: &ContactEmail, link: &str) -> Result<(), AuthError> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: None,
        templates_dir: "templates/**/*".to_string(),
        secret: "x".repeat(64),
        public_url: "https://desk.example.com".to_string(),
        environment: Environment::Development,
    }
}

macro_rules! test_app {
    ($sender:expr) => {
        test_app!($sender, Store::new(None))
    };
    ($sender:expr, $store:expr) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        let sender: Arc<dyn LinkSender> = $sender;
        actix_test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .configure(studio_desk::configure)
                .app_data(web::Data::new(build_tera("templates/**/*").unwrap()))
                .app_data(web::Data::from($store))
                .app_data(web::Data::from(sender))
                .app_data(web::Data::new(server_config())),
        )
        .await
    }};
}

/// Signs `$email` in through the emailed link and returns the session cookies.
macro_rules! sign_in {
    ($app:expr, $sender:expr, $email:expr) => {{
        let req = actix_test::TestRequest::post()
            .uri("/auth/signin")
            .set_form([("email", $email)])
            .to_request();
        let resp = actix_test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let link = $sender.links.lock().unwrap().pop().expect("link sent");
        assert!(link.starts_with("http://127.0.0.1:8080/auth/callback?token="));
        let callback = link.trim_start_matches("http://127.0.0.1:8080").to_string();

        let req = actix_test::TestRequest::get().uri(&callback).to_request();
        let resp = actix_test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        live_cookies(&resp)
    }};
}

/// Cookies set by `resp`, leaving out removals (empty or already expired).
fn live_cookies<B>(resp: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    resp.response()
        .cookies()
        .filter(|cookie| !cookie.value().is_empty() && cookie.max_age() != Some(Duration::ZERO))
        .map(|cookie| cookie.into_owned())
        .collect()
}

fn with_cookies(
    mut req: actix_test::TestRequest,
    cookies: &[Cookie<'static>],
) -> actix_test::TestRequest {
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    req
}

fn signed_in_owner() -> OwnerId {
    OwnerId::new("owner@example.com").unwrap()
}

fn record_id(id: &str) -> RecordId {
    RecordId::new(id).unwrap()
}

#[actix_web::test]
async fn test_anonymous_visitor_is_sent_to_signin() {
    let app = test_app!(Arc::new(CapturingSender::default()));

    for path in ["/", "/clients", "/accounting", "/data/export"] {
        let req = actix_test::TestRequest::get().uri(path).to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
    }
}

#[actix_web::test]
async fn test_signin_page_renders() {
    let app = test_app!(Arc::new(CapturingSender::default()));

    let req = actix_test::TestRequest::get().uri("/auth/signin").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_bad_callback_token_is_rejected() {
    let app = test_app!(Arc::new(CapturingSender::default()));

    let req = actix_test::TestRequest::get()
        .uri("/auth/callback?token=garbage")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
}

#[actix_web::test]
async fn test_email_link_signs_in_and_shows_demo_data() {
    let sender = Arc::new(CapturingSender::default());
    let app = test_app!(sender.clone());

    let cookies = sign_in!(app, sender, "Owner@Example.com");
    assert!(!cookies.is_empty());

    let req = with_cookies(
        actix_test::TestRequest::get().uri("/clients?q=hernandez"),
        &cookies,
    );
    let resp = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Sofia Hernandez"));
    assert!(body.contains("owner@example.com"));
}

#[actix_web::test]
async fn test_every_screen_renders_for_signed_in_owner() {
    let sender = Arc::new(CapturingSender::default());
    let app = test_app!(sender.clone());
    let cookies = sign_in!(app, sender, "owner@example.com");

    for path in [
        "/",
        "/clients",
        "/events",
        "/events?q=hacienda",
        "/requests",
        "/payments",
        "/tasks",
        "/deliverables",
        "/vendors",
        "/accounting",
        "/accounting?month=2025-12&currency=MXN",
        "/data",
        "/data/export",
    ] {
        let req = with_cookies(actix_test::TestRequest::get().uri(path), &cookies);
        let resp = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

#[actix_web::test]
async fn test_mutations_redirect_and_apply() {
    let sender = Arc::new(CapturingSender::default());
    let store = Store::new(None);
    let app = test_app!(sender.clone(), Arc::clone(&store));
    let cookies = sign_in!(app, sender, "owner@example.com");

    let posts: [(&str, &[(&str, &str)], &str); 8] = [
        (
            "/clients/add",
            &[("id", "C-100"), ("first_name", "Tom & Jerry"), ("last_name", "Vega")],
            "/clients",
        ),
        ("/events/E-001/status", &[("status", "delivered")], "/events"),
        ("/requests/R-001/toggle", &[], "/requests"),
        ("/payments/P-001/paid", &[], "/payments"),
        ("/tasks/T-001/toggle", &[], "/tasks"),
        ("/deliverables/D-001/delivered", &[], "/deliverables"),
        ("/vendors/V-001/delete", &[], "/vendors"),
        ("/data/refresh", &[], "/data"),
    ];
    for (path, form, location) in posts {
        let req = with_cookies(actix_test::TestRequest::post().uri(path), &cookies)
            .set_form(form)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), location, "{path}");
    }

    let snapshot = store.snapshot(&signed_in_owner()).unwrap();
    let added = snapshot.client(&record_id("C-100")).expect("client added");
    assert_eq!(added.first_name, "Tom & Jerry");
    assert_eq!(
        snapshot.event(&record_id("E-001")).unwrap().status,
        EventStatus::Delivered
    );
    assert_eq!(snapshot.special_requests[0].status, RequestStatus::Done);
    let deposit = snapshot
        .payments
        .iter()
        .find(|payment| payment.id.as_str() == "P-001")
        .unwrap();
    assert_eq!(deposit.status, PaymentStatus::Paid);
    assert!(deposit.paid_date.is_some());
    assert_eq!(snapshot.tasks[0].status, TaskStatus::Done);
    assert!(snapshot.deliverables[0].delivered_date.is_some());
    assert!(snapshot.vendors.is_empty());
}

#[actix_web::test]
async fn test_success_flash_is_shown_after_redirect() {
    let sender = Arc::new(CapturingSender::default());
    let app = test_app!(sender.clone());
    let cookies = sign_in!(app, sender, "owner@example.com");

    let req = with_cookies(actix_test::TestRequest::post().uri("/clients/add"), &cookies)
        .set_form([
            ("first_name", "Tom & Jerry"),
            ("last_name", "<b>Vega</b>"),
            ("notes", "<script>alert(1)</script>Call after 6 & before 9"),
        ])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let flash = live_cookies(&resp);

    let req = with_cookies(
        with_cookies(actix_test::TestRequest::get().uri("/clients"), &cookies),
        &flash,
    );
    let resp = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Client added."));
    assert!(body.contains("Tom &amp; Jerry"));
    assert!(!body.contains("<b>Vega</b>"));
    assert!(!body.contains("alert(1)"));
    assert!(body.contains("Call after 6 &amp; before 9"));
}
