//! Paginated form card driven by `formkit::StepController`.
//!
//! DESIGN
//! ======
//! The component owns navigation only. The host passes the page views in
//! order and wraps the card in its own `<form>`; the submit button rendered
//! on the final step is a plain `type="submit"` so the host's `on:submit`
//! handler decides what submitting means.
//!
//! Every committed step change bumps `focus_seq` from the controller's
//! focus handler; an effect watching the counter scrolls the card into
//! view once the new page has been committed. The initial render never
//! scrolls.

#[cfg(test)]
#[path = "multi_step_form_test.rs"]
mod multi_step_form_test;

use formkit::StepController;
use leptos::children::ViewFn;
use leptos::prelude::*;

type Controller = RwSignal<StepController<ViewFn>>;

/// Multi-step card with back / numbered / next / submit controls.
///
/// `jump_request` lets the host move the form, e.g. to reveal the section
/// holding a validation error. The request is cleared once handled.
#[component]
pub fn MultiStepForm(
    pages: Vec<ViewFn>,
    #[prop(optional)] jump_request: Option<RwSignal<Option<usize>>>,
    #[prop(into, default = Signal::stored(false))] submit_disabled: Signal<bool>,
) -> impl IntoView {
    let focus_seq = RwSignal::new(0_u64);
    let controller = match new_controller(pages, focus_seq) {
        Ok(c) => c,
        Err(e) => {
            return view! { <p class="form-card form-card--broken">{e.to_string()}</p> }.into_any();
        }
    };
    let card_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        if !scroll_pending(focus_seq.get()) {
            return;
        }
        #[cfg(feature = "hydrate")]
        if let Some(card) = card_ref.get_untracked() {
            crate::util::browser::scroll_into_view(&card);
        }
    });

    if let Some(request) = jump_request {
        Effect::new(move || {
            if request.with(Option::is_some) {
                take_jump_request(controller, request);
            }
        });
    }

    let nav = move || controller.with(StepController::navigation_state);
    let position = move || controller.with(StepController::position);
    let page_count = controller.with_untracked(StepController::page_count);
    let current = move || controller.with(|c| c.current_page().clone()).run();

    let on_back = move |_: leptos::ev::MouseEvent| {
        controller.update(|c| {
            c.retreat();
        });
    };
    let on_next = move |_: leptos::ev::MouseEvent| {
        controller.update(|c| {
            c.advance();
        });
    };

    let links = (0..page_count)
        .map(|index| {
            let active = move || position() == index;
            view! {
                <li class="pagination__item">
                    <a
                        href="#"
                        class=move || link_class(active())
                        aria-current=move || active().then_some("step")
                        on:click=move |ev| {
                            ev.prevent_default();
                            go_to(controller, index);
                        }
                    >
                        {link_label(index)}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="form-card" node_ref=card_ref>
            {current}
            <div class="form-card__footer">
                <div class="form-card__back">
                    <Show when=move || nav().can_go_back>
                        <button type="button" class="button button--ghost" on:click=on_back>
                            "Go Back"
                        </button>
                    </Show>
                </div>
                <nav class="pagination" aria-label="Form sections">
                    <ul class="pagination__list">{links}</ul>
                </nav>
                <div class="form-card__forward">
                    <Show when=move || nav().can_go_next>
                        <button type="button" class="button" on:click=on_next>
                            "Next"
                        </button>
                    </Show>
                    <Show when=move || nav().is_final_step>
                        <button type="submit" class="button" disabled=move || submit_disabled.get()>
                            "Submit"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
    .into_any()
}

/// Controller over `pages` whose committed step changes bump `focus_seq`.
fn new_controller(pages: Vec<ViewFn>, focus_seq: RwSignal<u64>) -> Result<Controller, formkit::StepError> {
    let controller = StepController::new(pages)?.with_focus_handler(move |_| focus_seq.update(|n| *n += 1));
    Ok(RwSignal::new(controller))
}

/// Apply and clear a pending jump request. Returns whether one was pending.
fn take_jump_request(controller: Controller, request: RwSignal<Option<usize>>) -> bool {
    let Some(index) = request.get_untracked() else {
        return false;
    };
    go_to(controller, index);
    request.set(None);
    true
}

/// The initial render leaves `focus_seq` at zero and never scrolls.
fn scroll_pending(focus_seq: u64) -> bool {
    focus_seq > 0
}

/// Jump the controller, logging (not panicking) on an out-of-range index.
fn go_to(controller: Controller, index: usize) {
    controller.update(|c| {
        if let Err(e) = c.jump_to(index) {
            #[cfg(feature = "hydrate")]
            log::warn!("ignoring step jump: {e}");
            #[cfg(not(feature = "hydrate"))]
            let _ = e;
        }
    });
}

/// One-based label shown on a pagination link.
fn link_label(index: usize) -> String {
    (index + 1).to_string()
}

fn link_class(active: bool) -> &'static str {
    if active { "pagination__link pagination__link--active" } else { "pagination__link" }
}
