//! Question inputs bound to the application form state.
//!
//! Each component reads and writes one `formkit::Field` of the page-owned
//! `RwSignal<ModerationApplication>`, and renders the `required` marker from
//! `Field::is_required`.

#[cfg(test)]
#[path = "question_test.rs"]
mod question_test;

use formkit::{Field, ModerationApplication};
use leptos::prelude::*;

/// Single-line or multi-line text question.
#[component]
pub fn TextQuestion(
    form: RwSignal<ModerationApplication>,
    field: Field,
    #[prop(optional)] multiline: bool,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let id = field.key();
    let value = move || form.with(|f| f.get(field).to_owned());
    let on_input = move |ev: leptos::ev::Event| {
        let next = event_target_value(&ev);
        form.update(|f| f.set(field, next));
    };

    let input = if multiline {
        view! {
            <textarea
                id=id
                class="question__textarea"
                placeholder=field.placeholder()
                required=field.is_required()
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=id
                class="question__input"
                type=input_type
                placeholder=field.placeholder()
                required=field.is_required()
                prop:value=value
                on:input=on_input
            />
        }
        .into_any()
    };

    view! {
        <div class="question">
            <label class="question__label" for=id>{field.label()}</label>
            {field.hint().map(|hint| view! { <p class="question__hint">{hint}</p> })}
            {input}
        </div>
    }
}

/// Radio group question. `options` are `(value, label)` pairs in display order.
///
/// With `scale` set to `(low, high)` the options render as a numbered row
/// between the two captions.
#[component]
pub fn RadioQuestion(
    form: RwSignal<ModerationApplication>,
    field: Field,
    options: Vec<(&'static str, &'static str)>,
    #[prop(optional)] scale: Option<(&'static str, &'static str)>,
) -> impl IntoView {
    let name = field.key();
    let items = options
        .into_iter()
        .map(|(value, label)| {
            let id = option_id(field, value);
            let checked = move || form.with(|f| f.get(field) == value);
            let on_change = move |_: leptos::ev::Event| form.update(|f| f.set(field, value));
            view! {
                <div class="radio-group__item">
                    <input
                        type="radio"
                        id=id.clone()
                        name=name
                        value=value
                        required=field.is_required()
                        prop:checked=checked
                        on:change=on_change
                    />
                    <label for=id>{label}</label>
                </div>
            }
        })
        .collect_view();

    let captions = scale.map(|(low, high)| {
        view! {
            <div class="radio-group__scale">
                <span>{low}</span>
                <span>{high}</span>
            </div>
        }
    });

    view! {
        <div class="question">
            <p class="question__label">{field.label()}</p>
            {field.hint().map(|hint| view! { <p class="question__hint">{hint}</p> })}
            <div class=group_class(scale.is_some()) role="radiogroup">
                {captions}
                <div class="radio-group__options">{items}</div>
            </div>
        </div>
    }
}

/// DOM id for one radio option, e.g. `voiceChat-listen-only`.
fn option_id(field: Field, value: &str) -> String {
    format!("{}-{value}", field.key())
}

fn group_class(scaled: bool) -> &'static str {
    if scaled { "radio-group radio-group--scale" } else { "radio-group" }
}
