use crate::page::{prefers_reduced_motion, viewport_height};
use crate::stats::{visible_fraction, Playback, FRAME_MS, STATS, TRIGGER_RATIO};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Stats() -> impl IntoView {
    let playback = Playback::new(STATS);
    let (frame, set_frame) = signal(playback.initial());
    let played = StoredValue::new(false);
    let section_ref = NodeRef::<html::Section>::new();

    let play = move || {
        if played.get_value() {
            return;
        }
        played.set_value(true);
        spawn_local(async move {
            let start = js_sys::Date::now();
            loop {
                let next = playback.frame(js_sys::Date::now() - start);
                let done = next.done;
                set_frame.set(next);
                if done {
                    break;
                }
                TimeoutFuture::new(FRAME_MS).await;
            }
        });
    };

    let check_visible = move || {
        if played.get_value() {
            return;
        }
        let Some(section) = section_ref.get_untracked() else {
            return;
        };
        let rect = section.get_bounding_client_rect();
        if visible_fraction(rect.top(), rect.bottom(), viewport_height()) >= TRIGGER_RATIO {
            play();
        }
    };

    Effect::new(move |_| {
        if section_ref.get().is_none() {
            return;
        }
        if prefers_reduced_motion() {
            played.set_value(true);
            set_frame.set(playback.finished());
        } else {
            check_visible();
        }
    });

    let _ = window_event_listener(ev::scroll, move |_| check_visible());

    let cards = STATS
        .iter()
        .enumerate()
        .map(|(i, card)| {
            view! {
                <div class="stat">
                    <div class="stat__value">
                        {move || frame.with(|f| format!("{}{}", f.values[i], card.suffix))}
                    </div>
                    <div class="stat__label">{card.label}</div>
                </div>
            }
        })
        .collect_view();

    let progress = move || frame.with(|f| f.progress);

    view! {
        <section id="stats" class="stats" node_ref=section_ref>
            <div class="container">
                <div class="stats__grid">{cards}</div>
                <div
                    class="stats__progress"
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=move || progress().to_string()
                >
                    <div class="stats__progress-fill" style=move || format!("width: {}%;", progress())></div>
                    <div class="stats__progress-marker" style=move || format!("left: {}%;", progress())></div>
                </div>
            </div>
        </section>
    }
}
