pub mod config;
pub mod lead;
pub mod start_date;
pub mod telegram;

use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use config::Config;
use serde_json::json;
use std::sync::Arc;
use telegram::TelegramClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub struct AppState {
    pub telegram: TelegramClient,
    pub chat_id: String,
    pub start_date: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            telegram: TelegramClient::new(&config.api_base, &config.bot_token)?,
            chat_id: config.chat_id.clone(),
            start_date: config.start_date.clone(),
        })
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "success": false, "message": "Method Not Allowed" })),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/lead",
            post(lead::submit_lead).fallback(method_not_allowed),
        )
        .route(
            "/api/start-date",
            get(start_date::get_start_date).fallback(method_not_allowed),
        )
        .route("/api/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_origin(Any)
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    const TOKEN: &str = "TEST";
    // Nothing listens on the discard port; connections are refused.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn state(api_base: &str, start_date: Option<&str>) -> AppState {
        AppState {
            telegram: TelegramClient::new(api_base, TOKEN).unwrap(),
            chat_id: "-100500".to_string(),
            start_date: start_date.map(String::from),
        }
    }

    /// Serves `fake` on an ephemeral port and returns its base URL.
    async fn spawn_fake_telegram(fake: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, fake).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn lead_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/lead")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    mod routing_tests {
        use super::*;

        #[tokio::test]
        async fn health_answers_ok() {
            let app = router(state(UNREACHABLE, None));
            let response = app.oneshot(get_request("/api/health")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], b"OK");
        }

        #[tokio::test]
        async fn lead_rejects_get() {
            let app = router(state(UNREACHABLE, None));
            let response = app.oneshot(get_request("/api/lead")).await.unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body = json_body(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Method Not Allowed");
        }

        #[tokio::test]
        async fn start_date_rejects_post() {
            let app = router(state(UNREACHABLE, None));
            let request = Request::builder()
                .method(Method::POST)
                .uri("/api/start-date")
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    mod lead_tests {
        use super::*;

        fn fake_send_message(ok: bool) -> Router {
            Router::new().route(
                &format!("/bot{}/sendMessage", TOKEN),
                post(move |Json(body): Json<Value>| async move {
                    let well_formed = body["parse_mode"] == "HTML"
                        && body["chat_id"] == "-100500"
                        && body["text"].as_str().is_some_and(|t| t.contains("Анна"));
                    if ok && well_formed {
                        Json(json!({ "ok": true, "result": { "message_id": 1 } }))
                    } else {
                        Json(json!({ "ok": false, "description": "Bad Request" }))
                    }
                }),
            )
        }

        #[tokio::test]
        async fn missing_phone_is_bad_request() {
            let app = router(state(UNREACHABLE, None));
            let response = app.oneshot(lead_request("name=Anna")).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], lead::MISSING_FIELDS);
        }

        #[tokio::test]
        async fn blank_name_is_bad_request() {
            let app = router(state(UNREACHABLE, None));
            let response = app
                .oneshot(lead_request("name=%20%20&phone=%2B79539396666"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn delivered_lead_thanks_the_user() {
            let base = spawn_fake_telegram(fake_send_message(true)).await;
            let app = router(state(&base, None));
            let response = app
                .oneshot(lead_request("name=%D0%90%D0%BD%D0%BD%D0%B0&phone=%2B79539396666"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["message"], lead::THANK_YOU);
        }

        #[tokio::test]
        async fn telegram_rejection_is_send_failure() {
            let base = spawn_fake_telegram(fake_send_message(false)).await;
            let app = router(state(&base, None));
            let response = app
                .oneshot(lead_request("name=%D0%90%D0%BD%D0%BD%D0%B0&phone=%2B79539396666"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = json_body(response).await;
            assert_eq!(body["message"], lead::SEND_FAILED);
        }

        #[tokio::test]
        async fn unreachable_telegram_is_server_error() {
            let app = router(state(UNREACHABLE, None));
            let response = app
                .oneshot(lead_request("name=Anna&phone=%2B79539396666"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = json_body(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], lead::SERVER_ERROR);
        }
    }

    mod start_date_tests {
        use super::*;

        fn fake_get_chat(reply: Value) -> Router {
            Router::new().route(
                &format!("/bot{}/getChat", TOKEN),
                get(move || {
                    let reply = reply.clone();
                    async move { Json(reply) }
                }),
            )
        }

        #[tokio::test]
        async fn date_from_group_description_is_cached() {
            let base = spawn_fake_telegram(fake_get_chat(json!({
                "ok": true,
                "result": { "description": "Набор открыт\nSTART_DATE: 15 декабря\n" }
            })))
            .await;
            let app = router(state(&base, Some("1 марта")));
            let response = app.oneshot(get_request("/api/start-date?t=1")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::CACHE_CONTROL],
                "public, max-age=3600"
            );
            let body = json_body(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["date"], "15 декабря");
        }

        #[tokio::test]
        async fn configured_date_when_description_is_silent() {
            let base = spawn_fake_telegram(fake_get_chat(json!({
                "ok": true,
                "result": { "description": "Набор открыт" }
            })))
            .await;
            let app = router(state(&base, Some("1 марта")));
            let response = app.oneshot(get_request("/api/start-date")).await.unwrap();

            let body = json_body(response).await;
            assert_eq!(body["date"], "1 марта");
        }

        #[tokio::test]
        async fn rejected_get_chat_falls_back_to_configured_date() {
            let base = spawn_fake_telegram(fake_get_chat(json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .await;
            let app = router(state(&base, Some("1 марта")));
            let response = app.oneshot(get_request("/api/start-date")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["date"], "1 марта");
        }

        #[tokio::test]
        async fn unreachable_telegram_gives_default_uncached() {
            let app = router(state(UNREACHABLE, Some("1 марта")));
            let response = app.oneshot(get_request("/api/start-date")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::CACHE_CONTROL).is_none());
            let body = json_body(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["date"], start_date::DEFAULT_START_DATE);
        }
    }
}
