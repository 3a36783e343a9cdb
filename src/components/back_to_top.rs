use crate::page::{back_to_top_visible, scroll_to_top, scroll_y};
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn BackToTop() -> impl IntoView {
    let (visible, set_visible) = signal(false);

    let _ = window_event_listener(ev::scroll, move |_| {
        let show = back_to_top_visible(scroll_y());
        if show != visible.get_untracked() {
            set_visible.set(show);
        }
    });

    view! {
        <button
            id="backToTop"
            class="back-to-top"
            class:visible=move || visible.get()
            aria-label="Наверх"
            on:click=move |_| scroll_to_top()
        >
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}
