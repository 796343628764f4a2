//! HTTP route tests
//!
//! Every route through the full app configuration, against a temporary
//! SQLite store. Entries are seeded relative to the real current day.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::Days;
use tempfile::TempDir;

use dailyqr::api::configure_routes;
use dailyqr::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use dailyqr::config::{DatabaseConfig, StaticConfig};
use dailyqr::services::{AccessGate, EnqueueRequest, ImageService, Scheduler};
use dailyqr::storage::StorageFactory;
use dailyqr::utils::today;

const PASSWORD: &str = "hunter2";
const BASE_URL: &str = "https://qr.test";

struct TestEnv {
    config: Arc<StaticConfig>,
    scheduler: Arc<Scheduler>,
    images: Arc<ImageService>,
    gate: AccessGate,
    _dir: TempDir,
}

async fn setup() -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("http.db");
    let database = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };
    let storage = StorageFactory::create(&database)
        .await
        .expect("Failed to create storage");

    let mut config = StaticConfig::default();
    config.server.public_url = BASE_URL.to_string();
    config.database = database;

    TestEnv {
        images: Arc::new(ImageService::new(BASE_URL, 16)),
        scheduler: Arc::new(Scheduler::new(storage)),
        gate: AccessGate::for_password(PASSWORD),
        config: Arc::new(config),
        _dir: dir,
    }
}

/// Entry 1 live today, entry 2 tomorrow
async fn seed(env: &TestEnv) {
    for (target, comment) in [
        ("https://example.com/today", "Good morning"),
        ("https://example.com/tomorrow", "Not yet"),
    ] {
        env.scheduler
            .enqueue(
                EnqueueRequest {
                    target: target.to_string(),
                    comment: comment.to_string(),
                    visibility: "private note".to_string(),
                },
                today(),
            )
            .await
            .expect("enqueue");
    }
}

macro_rules! dailyqr_app {
    ($env:expr) => {{
        test::init_service(
            App::new()
                .wrap(TimingMiddleware)
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($env.config.clone()))
                .app_data(web::Data::new($env.scheduler.clone()))
                .app_data(web::Data::new($env.images.clone()))
                .app_data(web::Data::new($env.gate.clone()))
                .configure(configure_routes),
        )
        .await
    }};
}

fn header_str<B>(resp: &actix_web::dev::ServiceResponse<B>, name: header::HeaderName) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn body_string<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body")
}

// =============================================================================
// Public routes
// =============================================================================

#[tokio::test]
async fn test_index_on_empty_store_is_error_page() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");
    assert!(body_string(resp).await.contains("Sorry, the site is broken real bad."));
}

#[tokio::test]
async fn test_index_redirects_to_todays_entry() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_str(&resp, header::LOCATION), "/1");
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "public, max-age=3600");
    assert!(!header_str(&resp, header::HeaderName::from_static("x-request-id")).is_empty());
}

#[tokio::test]
async fn test_landing_page() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header_str(&resp, header::CACHE_CONTROL),
        "public, max-age=86400, immutable"
    );
    let body = body_string(resp).await;
    assert!(body.contains(r#"src="/img/1""#));
    assert!(body.contains("Good morning"));
    assert!(body.contains("https://qr.test/large/1"));
    assert!(!body.contains("private note"));
}

#[tokio::test]
async fn test_future_and_unknown_ids_are_not_found() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    for uri in ["/2", "/99", "/abc", "/-1", "/l/2", "/l/x", "/img/2", "/large/99", "/img/1.5"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(
            header_str(&resp, header::CACHE_CONTROL),
            "public, max-age=3600",
            "{}",
            uri
        );
    }
}

#[tokio::test]
async fn test_unmatched_route_is_not_found() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/no/such/page").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_link_redirects_to_target() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/l/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        header_str(&resp, header::LOCATION),
        "https://example.com/today"
    );
    assert_eq!(
        header_str(&resp, header::CACHE_CONTROL),
        "public, max-age=86400, immutable"
    );
}

#[tokio::test]
async fn test_images() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/img/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CONTENT_TYPE), "image/png");
    assert_eq!(
        header_str(&resp, header::CACHE_CONTROL),
        "public, max-age=86400, immutable"
    );
    let small = test::read_body(resp).await;
    assert_eq!(&small[..8], b"\x89PNG\r\n\x1a\n");

    let resp = test::call_service(&app, TestRequest::get().uri("/large/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let large = test::read_body(resp).await;

    let small = image::load_from_memory(&small).unwrap();
    let large = image::load_from_memory(&large).unwrap();
    assert_eq!(large.width(), small.width() * 25);
}

#[tokio::test]
async fn test_about_page() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/about").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header_str(&resp, header::CACHE_CONTROL),
        "public, max-age=86400, immutable"
    );
    assert!(body_string(resp).await.contains("https://qr.test/"));
}

#[tokio::test]
async fn test_archive_lists_only_live_entries() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/archive").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "public, max-age=3600");
    let body = body_string(resp).await;
    assert!(body.contains(r#"href="/1""#));
    assert!(!body.contains(r#"href="/2""#));
}

#[tokio::test]
async fn test_empty_archive() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/archive").to_request()).await;
    assert!(body_string(resp).await.contains("Sorry, archive is empty."));
}

#[tokio::test]
async fn test_sitemap_and_robots() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/sitemap.xml").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_str(&resp, header::CONTENT_TYPE).starts_with("application/xml"));
    let body = body_string(resp).await;
    assert!(body.contains("<loc>https://qr.test/1</loc>"));
    assert!(!body.contains("<loc>https://qr.test/2</loc>"));

    let resp = test::call_service(&app, TestRequest::get().uri("/robots.txt").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "public, max-age=86400");
    assert_eq!(
        body_string(resp).await,
        "User-agent: *\nAllow: /\nSitemap: https://qr.test/sitemap.xml\n"
    );
}

#[tokio::test]
async fn test_static_assets() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/static/style.css").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_str(&resp, header::CONTENT_TYPE).starts_with("text/css"));
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "public, max-age=86400");

    let resp =
        test::call_service(&app, TestRequest::get().uri("/static/nope.css").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Admin routes
// =============================================================================

#[tokio::test]
async fn test_admin_without_cookie_shows_login() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/admin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");
    let body = body_string(resp).await;
    assert!(body.contains(r#"action="/admin/login""#));
    assert!(!body.contains("example.com/tomorrow"));
}

#[tokio::test]
async fn test_admin_with_wrong_cookie_shows_login() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::get()
        .uri("/admin")
        .cookie(Cookie::new("admin", "wrong"))
        .to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains(r#"action="/admin/login""#));
}

#[tokio::test]
async fn test_admin_with_cookie_shows_queue() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let req = TestRequest::get()
        .uri("/admin")
        .cookie(Cookie::new("admin", PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");

    let body = body_string(resp).await;
    assert!(body.contains(r#"action="/admin/add""#));
    assert!(body.contains("https://example.com/tomorrow"));
    assert!(body.contains("Private: private note"));
    // already live, so not in the queue
    assert!(!body.contains("https://example.com/today"));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::post()
        .uri("/admin/login")
        .set_form([("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_str(&resp, header::LOCATION), "/admin");
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");

    let cookie = header_str(&resp, header::SET_COOKIE);
    assert!(cookie.starts_with("admin=hunter2"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::post().uri("/admin/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(header_str(&resp, header::SET_COOKIE).contains("Max-Age=0"));
}

#[tokio::test]
async fn test_add_without_cookie_changes_nothing() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::post()
        .uri("/admin/add")
        .set_form([("url", "https://example.com/sneaky"), ("comment", ""), ("private", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_str(&resp, header::LOCATION), "/admin");
    assert!(env.scheduler.list_queue(today()).await.unwrap().is_empty());
    assert!(env.scheduler.list_archive(today()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_with_cookie_appends_after_last_day() {
    let env = setup().await;
    seed(&env).await;
    let app = dailyqr_app!(env);

    let req = TestRequest::post()
        .uri("/admin/add")
        .cookie(Cookie::new("admin", PASSWORD))
        .set_form([
            ("url", "https://example.com/third"),
            ("comment", "Third"),
            ("private", "from bob"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_str(&resp, header::LOCATION), "/admin");

    let queue = env.scheduler.list_queue(today()).await.unwrap();
    let third = queue.last().expect("queued entry");
    assert_eq!(third.id, 3);
    assert_eq!(
        third.active_at,
        today().checked_add_days(Days::new(2)).unwrap()
    );
    assert_eq!(third.visibility, "from bob");
}

#[tokio::test]
async fn test_add_with_bad_url_is_error_page() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::post()
        .uri("/admin/add")
        .cookie(Cookie::new("admin", PASSWORD))
        .set_form([("url", "javascript:alert(1)")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");
    assert!(env.scheduler.list_queue(today()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fatal_error_is_not_cached_after_recovery() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-store");

    seed(&env).await;
    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_str(&resp, header::LOCATION), "/1");
}

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let env = setup().await;
    let app = dailyqr_app!(env);

    let req = TestRequest::get()
        .uri("/robots.txt")
        .insert_header(("X-Request-ID", "trace-abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        header_str(&resp, header::HeaderName::from_static("x-request-id")),
        "trace-abc"
    );
}

#[tokio::test]
async fn test_request_id_extension_matches_response_header() {
    use actix_web::{HttpMessage, HttpRequest, HttpResponse};
    use dailyqr::api::middleware::RequestId;

    let app = test::init_service(
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .route(
                "/whoami",
                web::get().to(|req: HttpRequest| async move {
                    let id = req
                        .extensions()
                        .get::<RequestId>()
                        .map(|id| id.as_str().to_string())
                        .unwrap_or_default();
                    HttpResponse::Ok().body(id)
                }),
            ),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/whoami").to_request()).await;
    let echoed = header_str(&resp, header::HeaderName::from_static("x-request-id"));
    assert!(!echoed.is_empty());
    assert_eq!(body_string(resp).await, echoed);
}
