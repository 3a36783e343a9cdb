use crate::gallery::{Effect, ImageDescriptor, Viewer};
use crate::page::{set_scroll_locked, ScrollLockOwner};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, MouseEvent, TouchEvent};

/// Owning handle to the one gallery viewer on the page. Built once by `App`
/// and passed to whatever needs to open it.
#[derive(Clone, Copy)]
pub struct GalleryHandle {
    viewer: RwSignal<Viewer>,
}

impl GalleryHandle {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self {
            viewer: RwSignal::new(Viewer::new(images)),
        }
    }

    pub fn images(self) -> Vec<ImageDescriptor> {
        self.viewer.with_untracked(|v| v.images().to_vec())
    }

    /// Reactive read of the viewer state.
    pub fn with<R>(self, f: impl FnOnce(&Viewer) -> R) -> R {
        self.viewer.with(f)
    }

    pub fn dispatch(self, op: impl FnOnce(&mut Viewer) -> Vec<Effect>) {
        let effects = self.viewer.try_update(op).unwrap_or_default();
        self.run(effects);
    }

    pub fn open(self, index: usize) {
        self.dispatch(move |v| v.open(index));
    }

    pub fn drag_start(self, x: f64) -> bool {
        self.viewer.try_update(|v| v.drag_start(x)).unwrap_or(false)
    }

    pub fn drag_move(self, x: f64) {
        // Window-wide mousemove: only touch the signal mid-drag.
        if self.viewer.with_untracked(Viewer::is_dragging) {
            self.viewer.update(|v| v.drag_move(x));
        }
    }

    pub fn drag_end(self) {
        if self.viewer.with_untracked(Viewer::is_dragging) {
            self.dispatch(Viewer::drag_end);
        }
    }

    pub fn overlay_press(self, on_backdrop: bool) {
        self.viewer.update_untracked(|v| v.overlay_press(on_backdrop));
    }

    pub fn warm_cache(self) {
        let effects = self.viewer.with_untracked(Viewer::warm_cache);
        self.run(effects);
    }

    fn run(self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LockScroll => set_scroll_locked(ScrollLockOwner::Gallery, true),
                Effect::UnlockScroll => set_scroll_locked(ScrollLockOwner::Gallery, false),
                Effect::Preload { src, generation } => self.preload(&src, generation),
                Effect::Prefetch { src } => prefetch(&src),
                Effect::Schedule { delay_ms, timer } => {
                    spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(delay_ms).await;
                        self.dispatch(|v| v.on_timer(timer));
                    });
                }
            }
        }
    }

    fn preload(self, src: &str, generation: u64) {
        let Ok(img) = HtmlImageElement::new() else {
            log::warn!("gallery: cannot create preload image for {}", src);
            self.dispatch(|v| v.on_image_failed(generation));
            return;
        };

        let onload = Closure::wrap(Box::new(move || {
            self.dispatch(|v| v.on_image_loaded(generation));
        }) as Box<dyn Fn()>);
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::wrap(Box::new({
            let src = src.to_string();
            move || {
                log::warn!("gallery: failed to load {}", src);
                self.dispatch(|v| v.on_image_failed(generation));
            }
        }) as Box<dyn Fn()>);
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        img.set_src(src);
    }
}

fn prefetch(src: &str) {
    if let Ok(img) = HtmlImageElement::new() {
        img.set_src(src);
    }
}

fn first_touch_x(ev: &TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|t| t.client_x() as f64)
}

#[component]
pub fn Lightbox(gallery: GalleryHandle) -> impl IntoView {
    // Key and pointer tracking live on the window; the viewer itself ignores
    // keys while closed.
    let _ = window_event_listener(ev::keydown, move |ev| {
        if gallery.viewer.with_untracked(Viewer::is_open) {
            let key = ev.key();
            gallery.dispatch(|v| v.handle_key(&key));
        }
    });
    let _ = window_event_listener(ev::mousemove, move |ev| {
        gallery.drag_move(ev.client_x() as f64);
    });
    let _ = window_event_listener(ev::mouseup, move |_| gallery.drag_end());
    let _ = window_event_listener(ev::touchmove, move |ev| {
        if let Some(x) = first_touch_x(&ev) {
            gallery.drag_move(x);
        }
    });
    let _ = window_event_listener(ev::touchend, move |_| gallery.drag_end());

    let on_overlay_press = move |ev: MouseEvent| {
        gallery.overlay_press(ev.target() == ev.current_target());
    };

    let on_backdrop_click = move |ev: MouseEvent| {
        let on_backdrop = ev.target() == ev.current_target();
        gallery.dispatch(|v| v.backdrop_click(on_backdrop));
    };

    let on_mouse_down = move |ev: MouseEvent| {
        if gallery.drag_start(ev.client_x() as f64) {
            ev.prevent_default();
        }
    };

    let on_touch_start = move |ev: TouchEvent| {
        if let Some(x) = first_touch_x(&ev) {
            gallery.drag_start(x);
        }
    };

    let busy = move || gallery.with(Viewer::controls_busy);

    view! {
        <div
            class="lightbox"
            class:active=move || gallery.with(Viewer::is_open)
            class:grabbing=move || gallery.with(Viewer::is_dragging)
            style=move || {
                if gallery.with(Viewer::overlay_visible) { "opacity: 1;" } else { "opacity: 0;" }
            }
            on:mousedown=on_overlay_press
            on:click=on_backdrop_click
        >
            <div class="lightbox__content">
                <img
                    class="lightbox__image"
                    draggable="false"
                    src=move || gallery.with(|v| v.displayed().map(|d| d.src.clone()).unwrap_or_default())
                    alt=move || gallery.with(|v| v.displayed().map(|d| d.alt.clone()).unwrap_or_default())
                    style=move || gallery.with(Viewer::image_css)
                    on:mousedown=on_mouse_down
                    on:touchstart=on_touch_start
                />
            </div>
            <div class="lightbox__controls">
                <button
                    class="lightbox__nav lightbox__nav--prev"
                    class:loading=busy
                    aria-label="Предыдущее фото"
                    on:click=move |_| gallery.dispatch(Viewer::previous)
                >
                    <i class="fas fa-chevron-left"></i>
                </button>
                <div class="lightbox__counter">{move || gallery.with(Viewer::counter_label)}</div>
                <button
                    class="lightbox__nav lightbox__nav--next"
                    class:loading=busy
                    aria-label="Следующее фото"
                    on:click=move |_| gallery.dispatch(Viewer::next)
                >
                    <i class="fas fa-chevron-right"></i>
                </button>
            </div>
            <button
                class="lightbox__close"
                aria-label="Закрыть галерею"
                on:click=move |_| gallery.dispatch(Viewer::close)
            >
                <i class="fas fa-times"></i>
            </button>
        </div>
    }
}
