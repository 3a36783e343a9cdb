use leptos::prelude::*;

const ITEMS: &[(&str, &str)] = &[
    (
        "Сколько длится обучение?",
        "Теоретический курс занимает около двух месяцев, практические занятия идут параллельно по индивидуальному графику.",
    ),
    (
        "Можно ли оплатить обучение в рассрочку?",
        "Да, стоимость обучения можно разбить на несколько платежей без переплаты.",
    ),
    (
        "Какие документы нужны для записи?",
        "Паспорт, СНИЛС и медицинская справка. Справку можно донести позже, до начала практики.",
    ),
    (
        "Где проходят практические занятия?",
        "Занятия проходят на закрытой площадке и по городским маршрутам, на которых сдаётся экзамен в ГИБДД.",
    ),
    (
        "Что делать, если пропустил занятие?",
        "Пропущенную теорию можно посмотреть в записи, а практическое занятие перенести, предупредив инструктора.",
    ),
];

/// Accordion rule: clicking the open item closes it, clicking another one
/// opens it instead.
pub fn toggle(open: Option<usize>, clicked: usize) -> Option<usize> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[component]
pub fn Faq() -> impl IntoView {
    let (open, set_open) = signal(None::<usize>);

    let items = ITEMS
        .iter()
        .enumerate()
        .map(|(index, (question, answer))| {
            view! {
                <div class="faq-item" class:active=move || open.get() == Some(index)>
                    <button
                        class="faq-question"
                        on:click=move |_| set_open.update(|o| *o = toggle(*o, index))
                    >
                        <span>{*question}</span>
                        <i class="fas fa-chevron-down"></i>
                    </button>
                    <div class="faq-answer">
                        <p>{*answer}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="faq" id="faq">
            <div class="container">
                <h2 class="section-title">"Частые вопросы"</h2>
                <div class="faq__list">{items}</div>
            </div>
        </section>
    }
}
