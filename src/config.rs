use crate::gallery::ImageDescriptor;

pub const LEAD_PATH: &str = "/api/lead";
pub const START_DATE_PATH: &str = "/api/start-date";

/// Shown until the relay answers, and kept if it never does.
pub const DEFAULT_START_DATE: &str = "1 ноября";

pub const SCHOOL_NAME: &str = "Автошкола «Мустанг»";
pub const CONTACT_PHONE: &str = "8-953-939-66-66";
pub const CONTACT_PHONE_HREF: &str = "tel:+79539396666";
pub const ADDRESS: &str = "г. Архангельск, пр. Троицкий, д. 67, оф. 413, ТЦ «Пирамида», 4 этаж";

const GALLERY_MANIFEST: &str = include_str!("../assets/gallery.json");

#[cfg(debug_assertions)]
pub fn backend_url() -> &'static str {
    "http://localhost:3001"
}

#[cfg(not(debug_assertions))]
pub fn backend_url() -> &'static str {
    ""
}

pub fn endpoint(path: &str) -> String {
    format!("{}{}", backend_url(), path)
}

pub fn parse_gallery(json: &str) -> Result<Vec<ImageDescriptor>, serde_json::Error> {
    serde_json::from_str(json)
}

/// A broken manifest leaves the gallery empty rather than failing the page.
pub fn gallery_images() -> Vec<ImageDescriptor> {
    parse_gallery(GALLERY_MANIFEST).unwrap_or_else(|e| {
        log::error!("gallery manifest is invalid: {}", e);
        Vec::new()
    })
}
