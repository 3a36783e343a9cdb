use crate::api::{submit_lead, LeadResponse};
use crate::config::CONTACT_PHONE;
use crate::lead::{format_phone, is_bot, validate, PHONE_PREFIX};
use crate::page::{set_scroll_locked, ScrollLockOwner};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{Event, FocusEvent, KeyboardEvent, MouseEvent, SubmitEvent};

const GENERIC_ERROR: &str =
    "Произошла ошибка. Пожалуйста, попробуйте позже или позвоните нам напрямую.";
const BLOCKED_ERROR: &str = "Ошибка отправки. Пожалуйста, попробуйте позже.";

#[derive(Clone, Debug, PartialEq)]
pub enum ModalView {
    Form,
    Success,
    Error(String),
}

fn network_error() -> String {
    format!(
        "Произошла ошибка при отправке заявки. Пожалуйста, позвоните нам напрямую по телефону {}",
        CONTACT_PHONE
    )
}

/// Maps the relay's answer (or the transport failure) to the screen to show.
pub fn outcome(result: Result<LeadResponse, String>) -> ModalView {
    match result {
        Ok(response) if response.success => ModalView::Success,
        Ok(response) => ModalView::Error(
            response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string()),
        ),
        Err(e) => {
            log::error!("lead submission failed: {}", e);
            ModalView::Error(network_error())
        }
    }
}

#[component]
pub fn EnrollModal(open: RwSignal<bool>) -> impl IntoView {
    let (view_state, set_view_state) = signal(ModalView::Form);
    let (name, set_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (website, set_website) = signal(String::new());
    let (name_error, set_name_error) = signal(None::<&'static str>);
    let (phone_error, set_phone_error) = signal(None::<&'static str>);
    let (submitting, set_submitting) = signal(false);

    let reset_form = move || {
        set_name.set(String::new());
        set_phone.set(String::new());
        set_website.set(String::new());
        set_name_error.set(None);
        set_phone_error.set(None);
    };

    Effect::new(move || {
        let is_open = open.get();
        set_scroll_locked(ScrollLockOwner::Enroll, is_open);
        if is_open {
            set_view_state.set(ModalView::Form);
        }
    });

    let close = move || open.set(false);

    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            close();
        }
    });

    let on_overlay_click = move |ev: MouseEvent| {
        if ev.target() == ev.current_target() {
            close();
        }
    };

    let on_phone_input = move |ev: Event| {
        set_phone.set(format_phone(&event_target_value(&ev)));
        set_phone_error.set(None);
    };

    let on_phone_focus = move |_: FocusEvent| {
        if phone.get_untracked().is_empty() {
            set_phone.set(PHONE_PREFIX.to_string());
        }
    };

    let on_phone_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Backspace" && phone.get_untracked() == PHONE_PREFIX {
            ev.prevent_default();
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        if is_bot(&website.get_untracked()) {
            log::warn!("lead form: honeypot filled, dropping submission");
            set_view_state.set(ModalView::Error(BLOCKED_ERROR.to_string()));
            return;
        }

        let name_value = name.get_untracked();
        let phone_value = phone.get_untracked();
        let errors = validate(&name_value, &phone_value);
        if !errors.is_empty() {
            set_name_error.set(errors.name);
            set_phone_error.set(errors.phone);
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            let next = outcome(submit_lead(&name_value, &phone_value).await);
            if next == ModalView::Success {
                reset_form();
            }
            set_submitting.set(false);
            set_view_state.set(next);
        });
    };

    let form_view = move || {
        view! {
            <form class="enroll-form" novalidate=true on:submit=on_submit>
                <div class="form-group" class:has-error=move || name_error.get().is_some()>
                    <input
                        type="text"
                        name="name"
                        placeholder="Ваше имя"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            set_name.set(event_target_value(&ev));
                            set_name_error.set(None);
                        }
                    />
                    <span class="form-error">{move || name_error.get().unwrap_or_default()}</span>
                </div>
                <div class="form-group" class:has-error=move || phone_error.get().is_some()>
                    <input
                        type="tel"
                        name="phone"
                        placeholder="+7 (___) ___-__-__"
                        prop:value=move || phone.get()
                        on:input=on_phone_input
                        on:focus=on_phone_focus
                        on:keydown=on_phone_keydown
                    />
                    <span class="form-error">{move || phone_error.get().unwrap_or_default()}</span>
                </div>
                <input
                    type="text"
                    name="website"
                    class="form-honeypot"
                    tabindex="-1"
                    autocomplete="off"
                    prop:value=move || website.get()
                    on:input=move |ev| set_website.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn--primary" prop:disabled=move || submitting.get()>
                    <Show
                        when=move || submitting.get()
                        fallback=|| view! { <span>"Записаться"</span> }
                    >
                        <span class="spinner"></span>
                    </Show>
                </button>
            </form>
        }
    };

    let body = move || match view_state.get() {
        ModalView::Form => form_view().into_any(),
        ModalView::Success => view! {
            <div class="modal__result modal__result--success">
                <i class="fas fa-check-circle"></i>
                <h3>"Заявка отправлена!"</h3>
                <p>"Мы свяжемся с вами в ближайшее время."</p>
                <button class="btn btn--primary" on:click=move |_| close()>"Закрыть"</button>
            </div>
        }
        .into_any(),
        ModalView::Error(message) => view! {
            <div class="modal__result modal__result--error">
                <i class="fas fa-exclamation-circle"></i>
                <h3>"Не удалось отправить заявку"</h3>
                <p>{message}</p>
                <button
                    class="btn btn--primary"
                    on:click=move |_| set_view_state.set(ModalView::Form)
                >
                    "Попробовать снова"
                </button>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="modal" class:active=move || open.get() on:click=on_overlay_click>
            <div class="modal__content">
                <button class="modal__close" aria-label="Закрыть" on:click=move |_| close()>
                    <i class="fas fa-times"></i>
                </button>
                <h2 class="modal__title">"Запись на обучение"</h2>
                {body}
            </div>
        </div>
    }
}
