use crate::telegram::RelayError;
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use chrono::{DateTime, Utc};
use chrono_tz::{Europe::Moscow, Tz};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const THANK_YOU: &str =
    "Спасибо! Ваша заявка отправлена. Мы свяжемся с вами в ближайшее время.";
pub const MISSING_FIELDS: &str = "Не все поля заполнены";
pub const SEND_FAILED: &str = "Произошла ошибка при отправке.";
pub const SERVER_ERROR: &str = "Ошибка сервера.";

const SIGNATURE: &str = "🚗 Автошкола «Мустанг»";

#[derive(Debug, Default, Deserialize)]
pub struct LeadForm {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl LeadForm {
    /// Both fields, trimmed, or `None` if either is absent or blank.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let phone = self.phone.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((name, phone))
    }
}

#[derive(Debug, Serialize)]
pub struct Reply {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("name or phone missing")]
    MissingFields,

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LeadError::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS),
            LeadError::Relay(RelayError::Rejected(_)) => {
                tracing::error!("lead not delivered: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
            }
            LeadError::Relay(RelayError::Transport(_)) => {
                tracing::error!("lead not delivered: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            }
        };
        (
            status,
            Json(Reply {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn compose_message(name: &str, phone: &str, received_at: DateTime<Tz>) -> String {
    format!(
        "🆕 <b>Новая заявка с сайта!</b>\n\n\
         👤 <b>Имя:</b> {}\n\
         📱 <b>Телефон:</b> {}\n\
         📅 <b>Дата:</b> {}\n\
         \n{}",
        escape_html(name),
        escape_html(phone),
        received_at.format("%d.%m.%Y, %H:%M:%S"),
        SIGNATURE,
    )
}

pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LeadForm>, FormRejection>,
) -> Result<Json<Reply>, LeadError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("unreadable lead form: {}", rejection);
            LeadForm::default()
        }
    };
    let (name, phone) = form.fields().ok_or(LeadError::MissingFields)?;

    let text = compose_message(name, phone, Utc::now().with_timezone(&Moscow));
    state.telegram.send_message(&state.chat_id, &text).await?;
    tracing::info!("lead delivered");

    Ok(Json(Reply {
        success: true,
        message: THANK_YOU,
    }))
}
