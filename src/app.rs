use crate::api::fetch_start_date;
use crate::components::{
    BackToTop, EnrollModal, Faq, GalleryGrid, GalleryHandle, Lightbox, Reviews, SiteHeader,
    StartBanner, Stats,
};
use crate::config::{gallery_images, ADDRESS, CONTACT_PHONE, CONTACT_PHONE_HREF, DEFAULT_START_DATE, SCHOOL_NAME};
use leptos::prelude::*;
use leptos::task::spawn_local;

const PRICES: &[(&str, &str, &str)] = &[
    ("Категория B, механика", "32 000 ₽", "Теория, 56 часов вождения, внутренний экзамен"),
    ("Категория B, автомат", "34 000 ₽", "Теория, 54 часа вождения, внутренний экзамен"),
    ("Дополнительное занятие", "1 200 ₽", "Один час вождения с инструктором"),
];

#[component]
pub fn App() -> impl IntoView {
    let gallery = GalleryHandle::new(gallery_images());
    let enroll_open = RwSignal::new(false);
    let (start_date, set_start_date) = signal(DEFAULT_START_DATE.to_string());

    // Warm the browser cache so the first lightbox open doesn't wait on the network.
    Effect::new(move || gallery.warm_cache());

    Effect::new(move || {
        spawn_local(async move {
            match fetch_start_date().await {
                Ok(Some(date)) => set_start_date.set(date),
                Ok(None) => log::debug!("start date: relay returned nothing, keeping default"),
                Err(e) => log::warn!("start date: {}", e),
            }
        });
    });

    let prices = PRICES
        .iter()
        .map(|(title, price, details)| {
            view! {
                <div class="price-card">
                    <h3 class="price-card__title">{*title}</h3>
                    <div class="price-card__price">{*price}</div>
                    <p class="price-card__details">{*details}</p>
                    <button class="btn btn--primary" on:click=move |_| enroll_open.set(true)>
                        "Записаться"
                    </button>
                </div>
            }
        })
        .collect_view();

    view! {
        <SiteHeader enroll=enroll_open />
        <StartBanner start_date=start_date enroll=enroll_open />
        <main>
            <section class="hero" id="about">
                <div class="container">
                    <h1 class="hero__title">{SCHOOL_NAME}</h1>
                    <p class="hero__subtitle">
                        "Обучение вождению категории B. Ближайший набор: "
                        <span class="start-date">{move || start_date.get()}</span>
                    </p>
                    <button class="btn btn--primary btn--large" on:click=move |_| enroll_open.set(true)>
                        "Записаться на обучение"
                    </button>
                </div>
            </section>
            <Stats />
            <section class="prices" id="prices">
                <div class="container">
                    <h2 class="section-title">"Стоимость обучения"</h2>
                    <p class="prices__note">
                        "Успейте записаться до "
                        <span class="start-date">{move || start_date.get()}</span>
                    </p>
                    <div class="prices__grid">{prices}</div>
                </div>
            </section>
            <GalleryGrid gallery=gallery />
            <Reviews />
            <Faq />
            <section class="contacts" id="contacts">
                <div class="container">
                    <h2 class="section-title">"Контакты"</h2>
                    <p><i class="fas fa-map-marker-alt"></i>" "{ADDRESS}</p>
                    <p>
                        <i class="fas fa-phone"></i>" "
                        <a href=CONTACT_PHONE_HREF>{CONTACT_PHONE}</a>
                    </p>
                </div>
            </section>
        </main>
        <footer class="footer">
            <div class="container">{SCHOOL_NAME}</div>
        </footer>
        <BackToTop />
        <Lightbox gallery=gallery />
        <EnrollModal open=enroll_open />
    }
}
