use super::lightbox::GalleryHandle;
use leptos::prelude::*;

#[component]
pub fn GalleryGrid(gallery: GalleryHandle) -> impl IntoView {
    let items = gallery
        .images()
        .into_iter()
        .enumerate()
        .map(|(index, image)| {
            view! {
                <button class="gallery-item" on:click=move |_| gallery.open(index)>
                    <img src=image.src alt=image.alt loading="lazy" />
                    <div class="gallery-item__overlay">
                        <i class="fas fa-search-plus"></i>
                    </div>
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="gallery" id="gallery">
            <div class="container">
                <h2 class="section-title">"Наша автошкола"</h2>
                <div class="gallery__grid">{items}</div>
            </div>
        </section>
    }
}
