use crate::config::{endpoint, LEAD_PATH, START_DATE_PATH};
use crate::lead::encode_form;
use gloo_net::http::Request;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LeadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StartDateResponse {
    pub success: bool,
    #[serde(default)]
    pub date: Option<String>,
}

impl StartDateResponse {
    pub fn into_date(self) -> Option<String> {
        if self.success {
            self.date.filter(|d| !d.trim().is_empty())
        } else {
            None
        }
    }
}

pub async fn submit_lead(name: &str, phone: &str) -> Result<LeadResponse, String> {
    Request::post(&endpoint(LEAD_PATH))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(encode_form(name, phone))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<LeadResponse>()
        .await
        .map_err(|e| e.to_string())
}

pub async fn fetch_start_date() -> Result<Option<String>, String> {
    // Cache-buster: the relay response is cacheable for an hour.
    let url = format!("{}?t={}", endpoint(START_DATE_PATH), js_sys::Date::now() as u64);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<StartDateResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(response.into_date())
}
