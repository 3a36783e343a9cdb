use js_sys::{Function, Reflect};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Scroll distance after which the back-to-top button shows.
pub const BACK_TO_TOP_AFTER: f64 = 300.0;

pub const FIT_MIN_FONT_PX: f64 = 12.0;
const FIT_MAX_STEPS: u32 = 40;
const FIT_DEFAULT_FONT_PX: f64 = 24.0;

/// Overlays that can hold the page scroll lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollLockOwner {
    Gallery,
    Enroll,
    Nav,
}

/// Owners currently holding the lock. The body stays locked while any remain.
#[derive(Debug, Default)]
pub struct ScrollLocks {
    held: Vec<ScrollLockOwner>,
}

impl ScrollLocks {
    /// Takes or releases `owner`'s hold and returns whether the page is still locked.
    pub fn set(&mut self, owner: ScrollLockOwner, locked: bool) -> bool {
        if locked {
            if !self.held.contains(&owner) {
                self.held.push(owner);
            }
        } else {
            self.held.retain(|held| *held != owner);
        }
        self.is_locked()
    }

    pub fn is_locked(&self) -> bool {
        !self.held.is_empty()
    }
}

thread_local! {
    static SCROLL_LOCKS: RefCell<ScrollLocks> = RefCell::new(ScrollLocks::default());
}

fn body() -> Option<HtmlElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
}

/// Records `owner`'s hold on page scrolling and toggles `overflow: hidden` on
/// the body to match the combined state.
pub fn set_scroll_locked(owner: ScrollLockOwner, locked: bool) {
    let locked = SCROLL_LOCKS.with(|locks| locks.borrow_mut().set(owner, locked));
    let Some(body) = body() else {
        return;
    };
    let style = body.style();
    let _ = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
}

/// Smooth-scrolls to the element with `id`, leaving room for the fixed header.
pub fn scroll_to_section(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let header_height = document
        .get_element_by_id("header")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height())
        .unwrap_or(0);

    let top = (target.offset_top() - header_height - 20).max(0) as f64;
    smooth_scroll(&window, top);
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        smooth_scroll(&window, 0.0);
    }
}

fn smooth_scroll(window: &web_sys::Window, top: f64) {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER
}

pub fn prefers_reduced_motion() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(match_media) = Reflect::get(&window, &"matchMedia".into()) else {
        return false;
    };
    let Ok(match_media) = match_media.dyn_into::<Function>() else {
        return false;
    };
    let Ok(query) = match_media.call1(&window, &"(prefers-reduced-motion: reduce)".into()) else {
        return false;
    };
    Reflect::get(&query, &"matches".into())
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Shrinks from `max_px` one pixel at a time while `overflows` reports the
/// text does not fit, stopping at the minimum size or after 40 steps.
/// `overflows` is expected to apply the size it is given before measuring.
pub fn fit_font_size(max_px: f64, mut overflows: impl FnMut(f64) -> bool) -> f64 {
    let mut current = max_px;
    let mut steps = 0;
    while overflows(current) && current > FIT_MIN_FONT_PX && steps < FIT_MAX_STEPS {
        current -= 1.0;
        steps += 1;
    }
    current
}

/// Parses a computed CSS length such as `"24px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|px| *px > 0.0)
}

/// Keeps `el` on one line, shrinking its font until it fits its box.
pub fn fit_on_one_line(el: &HtmlElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let style = el.style();
    // Measure the stylesheet size, not a size left over from the previous fit.
    let _ = style.remove_property("font-size");
    let max_px = window
        .get_computed_style(el)
        .ok()
        .flatten()
        .and_then(|computed| computed.get_property_value("font-size").ok())
        .and_then(|value| parse_px(&value))
        .unwrap_or(FIT_DEFAULT_FONT_PX);

    let _ = style.set_property("white-space", "nowrap");
    fit_font_size(max_px, |px| {
        let _ = style.set_property("font-size", &format!("{}px", px));
        el.scroll_width() > el.client_width()
    });
}

/// Trailing-edge debounce: only the most recently armed ticket fires.
#[derive(Debug, Default)]
pub struct Debounce {
    latest: u64,
}

impl Debounce {
    pub fn arm(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn fires(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod scroll_lock_tests {
        use super::*;

        #[test]
        fn single_owner_locks_and_unlocks() {
            let mut locks = ScrollLocks::default();
            assert!(locks.set(ScrollLockOwner::Gallery, true));
            assert!(!locks.set(ScrollLockOwner::Gallery, false));
        }

        #[test]
        fn closing_modal_keeps_lock_held_by_open_nav() {
            let mut locks = ScrollLocks::default();
            locks.set(ScrollLockOwner::Nav, true);
            locks.set(ScrollLockOwner::Enroll, true);

            assert!(locks.set(ScrollLockOwner::Enroll, false));
            assert!(!locks.set(ScrollLockOwner::Nav, false));
        }

        #[test]
        fn repeated_lock_is_released_once() {
            let mut locks = ScrollLocks::default();
            locks.set(ScrollLockOwner::Gallery, true);
            locks.set(ScrollLockOwner::Gallery, true);

            assert!(!locks.set(ScrollLockOwner::Gallery, false));
        }

        #[test]
        fn release_without_hold_is_harmless() {
            let mut locks = ScrollLocks::default();
            locks.set(ScrollLockOwner::Gallery, true);

            assert!(locks.set(ScrollLockOwner::Nav, false));
            assert!(locks.is_locked());
        }
    }

    mod back_to_top_tests {
        use super::*;

        #[test]
        fn shows_only_past_threshold() {
            assert!(!back_to_top_visible(0.0));
            assert!(!back_to_top_visible(300.0));
            assert!(back_to_top_visible(301.0));
        }
    }

    mod fit_tests {
        use super::*;

        /// Text that is `chars` wide at 0.5em per char in a box of `width`.
        fn overflow_at(chars: f64, width: f64) -> impl FnMut(f64) -> bool {
            move |px| chars * px * 0.5 > width
        }

        #[test]
        fn fitting_text_keeps_its_size() {
            assert_eq!(fit_font_size(24.0, overflow_at(10.0, 500.0)), 24.0);
        }

        #[test]
        fn shrinks_until_it_fits() {
            // 20 chars fit in 200px at 20px.
            assert_eq!(fit_font_size(24.0, overflow_at(20.0, 200.0)), 20.0);
        }

        #[test]
        fn stops_at_minimum() {
            assert_eq!(fit_font_size(24.0, overflow_at(100.0, 50.0)), FIT_MIN_FONT_PX);
        }

        #[test]
        fn stops_after_forty_steps() {
            assert_eq!(fit_font_size(80.0, |_| true), 40.0);
        }

        #[test]
        fn applies_each_size_it_tries() {
            let mut tried = Vec::new();
            fit_font_size(16.0, |px| {
                tried.push(px);
                px > 14.0
            });
            assert_eq!(tried, vec![16.0, 15.0, 14.0]);
        }

        #[test]
        fn parses_computed_lengths() {
            assert_eq!(parse_px("24px"), Some(24.0));
            assert_eq!(parse_px(" 18.5px "), Some(18.5));
            assert_eq!(parse_px(""), None);
            assert_eq!(parse_px("0px"), None);
        }
    }

    mod debounce_tests {
        use super::*;

        #[test]
        fn only_latest_ticket_fires() {
            let mut debounce = Debounce::default();
            let first = debounce.arm();
            let second = debounce.arm();

            assert!(!debounce.fires(first));
            assert!(debounce.fires(second));
        }
    }
}
