use crate::config::{CONTACT_PHONE, CONTACT_PHONE_HREF, SCHOOL_NAME};
use crate::page::{scroll_to_section, set_scroll_locked, ScrollLockOwner};
use leptos::prelude::*;
use web_sys::MouseEvent;

const NAV_LINKS: &[(&str, &str)] = &[
    ("about", "О школе"),
    ("prices", "Стоимость"),
    ("gallery", "Галерея"),
    ("reviews", "Отзывы"),
    ("faq", "Вопросы"),
    ("contacts", "Контакты"),
];

#[component]
pub fn SiteHeader(enroll: RwSignal<bool>) -> impl IntoView {
    let (nav_open, set_nav_open) = signal(false);

    let toggle_nav = move |_: MouseEvent| {
        let open = !nav_open.get_untracked();
        set_nav_open.set(open);
        set_scroll_locked(ScrollLockOwner::Nav, open);
    };

    let links = NAV_LINKS
        .iter()
        .map(|(id, label)| {
            let on_click = move |ev: MouseEvent| {
                ev.prevent_default();
                if nav_open.get_untracked() {
                    set_nav_open.set(false);
                    set_scroll_locked(ScrollLockOwner::Nav, false);
                }
                scroll_to_section(id);
            };
            view! {
                <li>
                    <a class="nav__link" href=format!("#{}", id) on:click=on_click>
                        {*label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <header class="header" id="header">
            <div class="container header__inner">
                <a class="header__logo" href="#">{SCHOOL_NAME}</a>
                <nav class="nav" class:active=move || nav_open.get()>
                    <ul class="nav__list">{links}</ul>
                </nav>
                <a class="header__phone" href=CONTACT_PHONE_HREF>{CONTACT_PHONE}</a>
                <button class="btn btn--primary header__cta" on:click=move |_| enroll.set(true)>
                    "Записаться"
                </button>
                <button
                    class="nav-toggle"
                    class:active=move || nav_open.get()
                    aria-label="Меню"
                    on:click=toggle_nav
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </div>
        </header>
    }
}
