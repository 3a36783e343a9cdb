mod back_to_top;
mod enroll_modal;
mod faq;
mod gallery_grid;
mod lightbox;
mod reviews;
mod site_header;
mod start_banner;
mod stats;

pub use back_to_top::BackToTop;
pub use enroll_modal::EnrollModal;
pub use faq::Faq;
pub use gallery_grid::GalleryGrid;
pub use lightbox::{GalleryHandle, Lightbox};
pub use reviews::Reviews;
pub use site_header::SiteHeader;
pub use start_banner::StartBanner;
pub use stats::Stats;
