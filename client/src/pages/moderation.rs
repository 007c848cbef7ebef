//! Moderation staff application page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gated route: waits for auth to settle, redirects signed-out visitors to
//! `/login`, then renders the three application sections through
//! `MultiStepForm`. The page owns the answers and the submit action; the
//! form component only pages between sections.
//!
//! ERROR HANDLING
//! ==============
//! Answers are validated before posting. A failure (local or reported by
//! the server) jumps the form to the section holding the offending field
//! and shows the reason under the card.

#[cfg(test)]
#[path = "moderation_test.rs"]
mod moderation_test;

use formkit::application::BOT_EXPERIENCE_SCALE;
use formkit::{Field, ModerationApplication, VoiceChat};
use leptos::children::ViewFn;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::multi_step_form::MultiStepForm;
use crate::components::question::{RadioQuestion, TextQuestion};
use crate::components::user_card::UserCard;
use crate::state::auth::AuthState;
use crate::state::submission::SubmissionStatus;
use crate::util::auth::install_unauth_redirect;

const BANNER_SRC: &str = "/mod-form-banner.png";

const IMPORTANT_INFORMATION: [&str; 5] = [
    "Please ensure you are genuinely interested in a staff position before applying.",
    "Complete the application accurately and thoroughly.",
    "Experience is valued, but not required. We encourage all interested candidates to apply.",
    "We are looking for serious applicants dedicated to contributing to our community.",
    "This is a volunteer role, and there is no monetary compensation.",
];

const RESPONSIBILITIES: &str = "This is a volunteer moderator position. Your role will involve handling highly graphic content (images and text), including but not limited to violence, self-harm, and hate speech. Moderators may also face threats and harassment. This is a serious responsibility that requires maturity and resilience, not just a title. While challenging, it can be a rewarding experience.";

const SCENARIO_INSTRUCTIONS: &str = "For the following scenarios, describe what action you would take. You can decide that no action should be taken or decide that a user should be warned, temporarily muted, temporarily banned, or permanently banned. Don't overthink these. The goal is to see your thought process more than which you choose.";

#[component]
pub fn ModerationPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let form = RwSignal::new(ModerationApplication::default());
    let status = RwSignal::new(SubmissionStatus::Idle);
    let jump = RwSignal::new(None::<usize>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_locked() {
            return;
        }
        let application = form.get_untracked();
        if let Err(err) = application.validate() {
            jump.set(Some(err.section()));
            status.set(SubmissionStatus::Invalid(err.to_string()));
            return;
        }
        status.set(SubmissionStatus::Submitting);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let next = match crate::net::api::submit_moderation_application(&application).await {
                Ok(()) => SubmissionStatus::Submitted,
                Err(failure) => {
                    if let Some(section) = failure.section() {
                        jump.set(Some(section));
                    }
                    SubmissionStatus::Failed(failure.message)
                }
            };
            status.set(next);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = application;
    };

    let status_line = move || {
        let current = status.get();
        current.message().map(|message| {
            view! { <p class=current.css_class() role="status">{message}</p> }
        })
    };

    view! {
        <div class="page">
            <Show
                when=move || !auth.get().loading
                fallback=|| view! { <div class="page__loading">"Loading..."</div> }
            >
                <Show when=move || auth.get().is_authenticated()>
                    <form class="application-form" on:submit=on_submit>
                        <MultiStepForm
                            pages=application_sections(form, auth)
                            jump_request=jump
                            submit_disabled=move || status.get().is_locked()
                        />
                    </form>
                    {status_line}
                </Show>
            </Show>
        </div>
    }
}

/// The three form sections, in order. Indices match `Field::section`.
fn application_sections(form: RwSignal<ModerationApplication>, auth: RwSignal<AuthState>) -> Vec<ViewFn> {
    vec![
        ViewFn::from(move || view! { <IntroSection form auth/> }),
        ViewFn::from(move || view! { <QuestionsSection form/> }),
        ViewFn::from(move || view! { <ScenariosSection form/> }),
    ]
}

fn voice_chat_options() -> Vec<(&'static str, &'static str)> {
    VoiceChat::ALL.into_iter().map(|choice| (choice.value(), choice.label())).collect()
}

fn bot_experience_options() -> Vec<(&'static str, &'static str)> {
    BOT_EXPERIENCE_SCALE.into_iter().map(|value| (value, value)).collect()
}

#[component]
fn Banner() -> impl IntoView {
    view! {
        <img class="form-card__banner" src=BANNER_SRC alt="Staff Application Banner" width="800" height="200"/>
    }
}

#[component]
fn IntroSection(form: RwSignal<ModerationApplication>, auth: RwSignal<AuthState>) -> impl IntoView {
    let user = move || auth.get().user.map(|user| view! { <UserCard user/> });
    let on_ack = move |ev: leptos::ev::Event| {
        let checked = event_target_checked(&ev);
        form.update(|f| f.understand = checked);
    };

    view! {
        <section class="form-section">
            <Banner/>
            <header class="form-section__header">
                <h1 class="form-section__title">"Among Us India Staff Applications"</h1>
                <p class="form-section__description">
                    "Welcome! We appreciate your interest in joining our moderation team."
                </p>
            </header>
            {user}
            <div class="notice">
                <p class="notice__title">"Important Information:"</p>
                <ul class="notice__list">
                    {IMPORTANT_INFORMATION
                        .into_iter()
                        .map(|text| view! { <li class="notice__item">{text}</li> })
                        .collect_view()}
                </ul>
            </div>
            <div class="notice">
                <p class="notice__title">"Please Read Carefully"</p>
                <p class="notice__body">{RESPONSIBILITIES}</p>
                <div class="checkbox">
                    <input
                        type="checkbox"
                        id="understand"
                        required=true
                        prop:checked=move || form.with(|f| f.understand)
                        on:change=on_ack
                    />
                    <label for="understand">
                        "I have read and understood the responsibilities of this role."
                    </label>
                </div>
            </div>
        </section>
    }
}

#[component]
fn QuestionsSection(form: RwSignal<ModerationApplication>) -> impl IntoView {
    view! {
        <section class="form-section">
            <Banner/>
            <header class="form-section__header">
                <h2 class="form-section__title">"Staff Applications"</h2>
            </header>
            <TextQuestion form field=Field::Country/>
            <TextQuestion form field=Field::ContributionTime/>
            <TextQuestion form field=Field::Age input_type="number"/>
            <TextQuestion form field=Field::ModerationDefinition multiline=true/>
            <TextQuestion form field=Field::PastExperience multiline=true/>
            <RadioQuestion form field=Field::VoiceChat options=voice_chat_options()/>
            <TextQuestion form field=Field::AboutYourself multiline=true/>
            <TextQuestion form field=Field::ServerImprovement multiline=true/>
            <TextQuestion form field=Field::ServiceDuration multiline=true/>
        </section>
    }
}

#[component]
fn ScenariosSection(form: RwSignal<ModerationApplication>) -> impl IntoView {
    view! {
        <section class="form-section">
            <Banner/>
            <header class="form-section__header">
                <h2 class="form-section__title">"Moderation Scenarios"</h2>
                <p class="form-section__description">{SCENARIO_INSTRUCTIONS}</p>
            </header>
            <TextQuestion form field=Field::StaffViolation multiline=true/>
            <RadioQuestion
                form
                field=Field::BotExperience
                options=bot_experience_options()
                scale=("Very Poor", "Very Familiar")
            />
            <TextQuestion form field=Field::ArgumentScenario multiline=true/>
            <TextQuestion form field=Field::OtherServerExperience multiline=true/>
            <TextQuestion form field=Field::WhyQualified multiline=true/>
        </section>
    }
}
