use crate::carousel::Carousel;
use leptos::prelude::*;

struct Review {
    author: &'static str,
    text: &'static str,
}

const REVIEWS: &[Review] = &[
    Review {
        author: "Анна",
        text: "Сдала экзамен с первого раза. Инструктор спокойно объяснял каждую ошибку, на площадке было не страшно.",
    },
    Review {
        author: "Дмитрий",
        text: "Удобный график, можно было ездить после работы. Теорию разбирали на живых примерах.",
    },
    Review {
        author: "Екатерина",
        text: "Понравилось, что маршруты совпадают с экзаменационными. На экзамене чувствовала себя уверенно.",
    },
    Review {
        author: "Игорь",
        text: "Машины в хорошем состоянии, администраторы всегда на связи. Рекомендую друзьям.",
    },
];

#[component]
pub fn Reviews() -> impl IntoView {
    let carousel = RwSignal::new(Carousel::new(REVIEWS.len()));

    let slides = REVIEWS
        .iter()
        .map(|review| {
            view! {
                <div class="review-card">
                    <p class="review-card__text">{review.text}</p>
                    <span class="review-card__author">{review.author}</span>
                </div>
            }
        })
        .collect_view();

    let dots = (0..REVIEWS.len())
        .map(|index| {
            view! {
                <button
                    class="reviews__dot"
                    class:active=move || carousel.with(|c| c.is_active(index))
                    aria-label=format!("Отзыв {}", index + 1)
                    on:click=move |_| carousel.update(|c| c.go_to(index))
                ></button>
            }
        })
        .collect_view();

    view! {
        <section class="reviews" id="reviews">
            <div class="container">
                <h2 class="section-title">"Отзывы учеников"</h2>
                <div class="reviews__viewport">
                    <div
                        class="reviews__track"
                        style=move || {
                            format!(
                                "transform: translateX({}%);",
                                carousel.with(Carousel::track_offset_percent),
                            )
                        }
                    >
                        {slides}
                    </div>
                </div>
                <div class="reviews__controls">
                    <button
                        class="reviews__nav"
                        aria-label="Предыдущий отзыв"
                        on:click=move |_| carousel.update(Carousel::previous)
                    >
                        <i class="fas fa-chevron-left"></i>
                    </button>
                    <div class="reviews__dots">{dots}</div>
                    <button
                        class="reviews__nav"
                        aria-label="Следующий отзыв"
                        on:click=move |_| carousel.update(Carousel::next)
                    >
                        <i class="fas fa-chevron-right"></i>
                    </button>
                </div>
            </div>
        </section>
    }
}
