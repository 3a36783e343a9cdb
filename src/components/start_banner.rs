use crate::page::{fit_on_one_line, Debounce};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

const RESIZE_DEBOUNCE_MS: u32 = 200;

#[component]
pub fn StartBanner(start_date: ReadSignal<String>, enroll: RwSignal<bool>) -> impl IntoView {
    let date_ref = NodeRef::<html::Strong>::new();
    let resize = StoredValue::new(Debounce::default());

    let fit = move || {
        if let Some(el) = date_ref.get_untracked() {
            fit_on_one_line(&el);
        }
    };

    // Refit whenever the date text changes, including the first render.
    Effect::new(move |_| {
        start_date.track();
        if date_ref.get().is_some() {
            fit();
        }
    });

    let _ = window_event_listener(ev::resize, move |_| {
        let ticket = resize.try_update_value(Debounce::arm).unwrap_or_default();
        spawn_local(async move {
            TimeoutFuture::new(RESIZE_DEBOUNCE_MS).await;
            if resize.with_value(|d| d.fires(ticket)) {
                fit();
            }
        });
    });

    view! {
        <div class="start-banner">
            <div class="container start-banner__inner">
                <i class="fas fa-calendar-alt"></i>
                <span>
                    "Старт новой группы: "
                    <strong class="start-banner__date start-date" node_ref=date_ref>
                        {move || start_date.get()}
                    </strong>
                </span>
                <button class="btn btn--small" on:click=move |_| enroll.set(true)>
                    "Записаться"
                </button>
            </div>
        </div>
    }
}
