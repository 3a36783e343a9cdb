use crate::telegram::RelayError;
use crate::AppState;
use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_START_DATE: &str = "1 ноября";
const CACHE_FOR_AN_HOUR: &str = "public, max-age=3600";

static START_DATE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)START_DATE:\s*(.+?)(?:\n|$)").expect("start date pattern"));

#[derive(Debug, Serialize)]
pub struct Reply {
    pub success: bool,
    pub date: String,
}

/// Finds a `START_DATE: <value>` line in a group description.
pub fn extract_start_date(description: &str) -> Option<String> {
    START_DATE_LINE
        .captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Description line first, then the configured value, then the built-in default.
pub fn resolve_start_date(description: Option<&str>, configured: Option<&str>) -> String {
    description
        .and_then(extract_start_date)
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_START_DATE.to_string())
}

pub async fn get_start_date(State(state): State<Arc<AppState>>) -> Response {
    let description = match state.telegram.get_chat(&state.chat_id).await {
        Ok(chat) => chat.description,
        Err(RelayError::Rejected(reason)) => {
            tracing::warn!("getChat rejected: {}", reason);
            None
        }
        Err(e) => {
            tracing::error!("start date lookup failed: {}", e);
            return Json(Reply {
                success: true,
                date: DEFAULT_START_DATE.to_string(),
            })
            .into_response();
        }
    };

    let date = resolve_start_date(description.as_deref(), state.start_date.as_deref());
    tracing::debug!("start date resolved to {}", date);
    (
        [(CACHE_CONTROL, CACHE_FOR_AN_HOUR)],
        Json(Reply {
            success: true,
            date,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_date_line() {
        let description = "Автошкола «Мустанг»\nSTART_DATE: 15 декабря\nЗвоните!";
        assert_eq!(extract_start_date(description), Some("15 декабря".to_string()));
    }

    #[test]
    fn key_is_case_insensitive() {
        assert_eq!(
            extract_start_date("start_date:   20 января  "),
            Some("20 января".to_string())
        );
    }

    #[test]
    fn date_at_end_of_text() {
        assert_eq!(
            extract_start_date("Группа\nSTART_DATE: 3 февраля"),
            Some("3 февраля".to_string())
        );
    }

    #[test]
    fn no_date_line() {
        assert_eq!(extract_start_date("Просто описание группы"), None);
    }

    #[test]
    fn description_wins_over_configured_value() {
        assert_eq!(
            resolve_start_date(Some("START_DATE: 15 декабря"), Some("1 марта")),
            "15 декабря"
        );
    }

    #[test]
    fn configured_value_when_description_has_no_date() {
        assert_eq!(resolve_start_date(Some("без даты"), Some("1 марта")), "1 марта");
        assert_eq!(resolve_start_date(None, Some("1 марта")), "1 марта");
    }

    #[test]
    fn built_in_default_last() {
        assert_eq!(resolve_start_date(None, None), DEFAULT_START_DATE);
    }
}
