use futures::future::join_all;
use shared::{
    can_advance, plan_goal_submit, AiHabitCandidate, AiReviewState, GoalDraft, GoalWizardStep,
    User, MAX_GOAL_DESCRIPTION_LEN, MAX_GOAL_TITLE_LEN,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::ai::AiClient;
use crate::services::api::ApiClient;

const EMOJI_CHOICES: [&str; 12] = [
    "🎯", "🏃", "📚", "💪", "🧘", "🎸", "💼", "🌱", "✈️", "💰", "🎨", "🍎",
];

#[derive(Properties, PartialEq)]
pub struct GoalWizardProps {
    pub user: User,
    pub api_client: ApiClient,
    pub ai_client: AiClient,
    /// Fired after a successful submit, regardless of per-habit failures
    pub on_complete: Callback<()>,
    pub on_cancel: Callback<MouseEvent>,
}

/// Linear seven-step goal creation wizard. Step transitions and guards live
/// in the shared state machine; this component renders and wires them.
#[function_component(GoalWizard)]
pub fn goal_wizard(props: &GoalWizardProps) -> Html {
    let step = use_state(|| GoalWizardStep::Title);
    let draft = use_state(GoalDraft::default);
    let ai = use_state(AiReviewState::default);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    let fetch_recommendations = {
        let ai_client = props.ai_client.clone();
        let draft = draft.clone();
        let ai = ai.clone();

        use_callback((), move |_, _| {
            let ai_client = ai_client.clone();
            let ai = ai.clone();
            let title = draft.title.clone();
            let description = draft.description.clone();

            spawn_local(async move {
                ai.set(AiReviewState::Loading);

                match ai_client
                    .generate_habit_recommendations(&title, &description)
                    .await
                {
                    Ok(response) => {
                        ai.set(AiReviewState::Loaded {
                            reasoning: response.reasoning,
                            candidates: response.habits.into_iter().map(Into::into).collect(),
                        });
                    }
                    Err(message) => {
                        gloo::console::warn!("Habit recommendations failed:", message.clone());
                        ai.set(AiReviewState::Failed { message });
                    }
                }
            });
        })
    };

    // Entering the suggestion step for the first time fires exactly one fetch
    use_effect_with(*step, {
        let ai = ai.clone();
        let fetch_recommendations = fetch_recommendations.clone();
        move |step| {
            if *step == GoalWizardStep::AiReview && *ai == AiReviewState::NotRequested {
                fetch_recommendations.emit(());
            }
            || ()
        }
    });

    let on_next = {
        let step = step.clone();
        let draft = draft.clone();
        let ai = ai.clone();
        use_callback((), move |_: MouseEvent, _| {
            if can_advance(*step, &draft, &ai) {
                if let Some(next) = step.next() {
                    step.set(next);
                }
            }
        })
    };

    let on_back = {
        let step = step.clone();
        use_callback((), move |_: MouseEvent, _| {
            if let Some(back) = step.back() {
                step.set(back);
            }
        })
    };

    let on_skip = {
        let step = step.clone();
        use_callback((), move |_: MouseEvent, _| {
            if step.is_skippable() {
                if let Some(next) = step.next() {
                    step.set(next);
                }
            }
        })
    };

    // Explicit opt-out; the skipped flag suppresses re-fetch on re-entry
    let on_skip_suggestions = {
        let step = step.clone();
        let ai = ai.clone();
        use_callback((), move |_: MouseEvent, _| {
            ai.set(AiReviewState::Skipped);
            step.set(GoalWizardStep::Review);
        })
    };

    let on_retry_suggestions = {
        let fetch_recommendations = fetch_recommendations.clone();
        use_callback((), move |_: MouseEvent, _| {
            fetch_recommendations.emit(());
        })
    };

    let on_toggle_candidate = {
        let ai = ai.clone();
        use_callback((), move |index: usize, _| {
            if let AiReviewState::Loaded {
                reasoning,
                candidates,
            } = &*ai
            {
                let mut candidates = candidates.clone();
                if let Some(candidate) = candidates.get_mut(index) {
                    candidate.accepted = !candidate.accepted;
                }
                ai.set(AiReviewState::Loaded {
                    reasoning: reasoning.clone(),
                    candidates,
                });
            }
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let user_id = props.user.id;
        let draft = draft.clone();
        let ai = ai.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let on_complete = props.on_complete.clone();

        use_callback((), move |_: MouseEvent, _| {
            let api_client = api_client.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let on_complete = on_complete.clone();
            let (goal_request, planned_habits) = plan_goal_submit(&draft, &ai, user_id);

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                // Goal creation failure aborts the whole submit
                let goal = match api_client.create_goal(goal_request).await {
                    Ok(goal) => goal,
                    Err(e) => {
                        error.set(Some(e));
                        submitting.set(false);
                        return;
                    }
                };

                // Habit creations run concurrently and are independently
                // fault-tolerant; failures never roll back the goal
                let results = join_all(planned_habits.into_iter().map(|planned| {
                    let api_client = api_client.clone();
                    let request = planned.into_request(&goal);
                    async move {
                        let name = request.name.clone();
                        (name, api_client.create_habit(request).await)
                    }
                }))
                .await;

                for (name, result) in &results {
                    if let Err(e) = result {
                        gloo::console::error!("Failed to create habit", name.clone(), e.clone());
                    }
                }

                submitting.set(false);
                on_complete.emit(());
            });
        })
    };

    let on_title_change = input_handler(&draft, |draft, value| draft.title = value);
    let on_description_change = textarea_handler(&draft, |draft, value| draft.description = value);
    let on_image_change = input_handler(&draft, |draft, value| draft.image_url = value);
    let on_start_date_change = input_handler(&draft, |draft, value| draft.start_date = value);
    let on_end_date_change = input_handler(&draft, |draft, value| draft.end_date = value);

    let total_steps = GoalWizardStep::ALL.len();
    let progress = ((step.index() + 1) * 100) / total_steps;
    let advance_allowed = can_advance(*step, &draft, &ai);

    html! {
        <div class="wizard-backdrop">
            <div class="wizard">
                <div class="wizard-top">
                    <button class="wizard-cancel" onclick={props.on_cancel.clone()}>
                        {"Back to Dashboard"}
                    </button>
                    <span class="wizard-progress-label">
                        {format!("Step {} of {}", step.index() + 1, total_steps)}
                    </span>
                </div>

                <div class="wizard-progress-track">
                    <div class="wizard-progress-fill" style={format!("width: {}%;", progress)} />
                </div>

                {if let Some(message) = (*error).as_ref() {
                    html! { <div class="form-message error">{message}</div> }
                } else {
                    html! {}
                }}

                <div class="wizard-body">
                    <h1 class="wizard-heading">{step.heading()}</h1>

                    {match *step {
                        GoalWizardStep::Title => html! {
                            <div class="wizard-step">
                                <input
                                    type="text"
                                    class="wizard-input"
                                    placeholder="e.g., Run a marathon, Learn Spanish, Build an app..."
                                    maxlength={MAX_GOAL_TITLE_LEN.to_string()}
                                    value={draft.title.clone()}
                                    onchange={on_title_change}
                                />
                                <div class="wizard-hint">
                                    {format!("{}/{} characters", draft.title.chars().count(), MAX_GOAL_TITLE_LEN)}
                                </div>
                            </div>
                        },

                        GoalWizardStep::Description => html! {
                            <div class="wizard-step">
                                <textarea
                                    class="wizard-textarea"
                                    rows="6"
                                    placeholder="Why is this goal important to you? What will you achieve?"
                                    maxlength={MAX_GOAL_DESCRIPTION_LEN.to_string()}
                                    value={draft.description.clone()}
                                    onchange={on_description_change}
                                />
                                <div class="wizard-hint">
                                    {format!("{}/{} characters", draft.description.chars().count(), MAX_GOAL_DESCRIPTION_LEN)}
                                </div>
                            </div>
                        },

                        GoalWizardStep::Emoji => html! {
                            <div class="wizard-step">
                                <div class="emoji-grid">
                                    {for EMOJI_CHOICES.iter().map(|emoji| {
                                        let selected = draft.emoji == *emoji;
                                        let onclick = {
                                            let draft = draft.clone();
                                            let emoji = emoji.to_string();
                                            Callback::from(move |_: MouseEvent| {
                                                let mut next = (*draft).clone();
                                                next.emoji = emoji.clone();
                                                draft.set(next);
                                            })
                                        };
                                        html! {
                                            <button
                                                type="button"
                                                class={if selected { "emoji-choice emoji-choice-selected" } else { "emoji-choice" }}
                                                {onclick}
                                            >
                                                {*emoji}
                                            </button>
                                        }
                                    })}
                                </div>
                            </div>
                        },

                        GoalWizardStep::Image => html! {
                            <div class="wizard-step">
                                <input
                                    type="url"
                                    class="wizard-input"
                                    placeholder="Paste an image URL (https://...)"
                                    value={draft.image_url.clone()}
                                    onchange={on_image_change}
                                />
                                {if !draft.image_url.is_empty() {
                                    html! {
                                        <div class="wizard-image-preview">
                                            <img src={draft.image_url.clone()} alt="Goal preview" />
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }}
                            </div>
                        },

                        GoalWizardStep::Dates => html! {
                            <div class="wizard-step">
                                <div class="wizard-date-row">
                                    <div class="form-group">
                                        <label>{"Start Date"}</label>
                                        <input
                                            type="date"
                                            value={draft.start_date.clone()}
                                            onchange={on_start_date_change}
                                        />
                                    </div>
                                    <div class="form-group">
                                        <label>{"Target End Date"}</label>
                                        <input
                                            type="date"
                                            min={draft.start_date.clone()}
                                            value={draft.end_date.clone()}
                                            onchange={on_end_date_change}
                                        />
                                    </div>
                                </div>
                                {if !draft.start_date.is_empty()
                                    && !draft.end_date.is_empty()
                                    && draft.start_date > draft.end_date {
                                    html! {
                                        <div class="form-message error">
                                            {"End date must be after start date"}
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }}
                            </div>
                        },

                        GoalWizardStep::AiReview => render_ai_review(
                            &ai,
                            &on_toggle_candidate,
                            &on_retry_suggestions,
                            &on_skip_suggestions,
                        ),

                        GoalWizardStep::Review => render_review(&draft, &ai),
                    }}
                </div>

                <div class="wizard-footer">
                    <button
                        class="wizard-button wizard-button-secondary"
                        onclick={on_back}
                        disabled={step.back().is_none() || *submitting}
                    >
                        {"Back"}
                    </button>

                    <div class="wizard-footer-right">
                        {if step.is_skippable() {
                            html! {
                                <button class="wizard-button wizard-button-secondary" onclick={on_skip}>
                                    {"Skip"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}

                        {if *step == GoalWizardStep::Review {
                            html! {
                                <button
                                    class="wizard-button wizard-button-primary"
                                    onclick={on_submit}
                                    disabled={*submitting}
                                >
                                    {if *submitting { "Creating..." } else { "Create Goal" }}
                                </button>
                            }
                        } else {
                            html! {
                                <button
                                    class="wizard-button wizard-button-primary"
                                    onclick={on_next}
                                    disabled={!advance_allowed}
                                >
                                    {"Continue"}
                                </button>
                            }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

fn render_ai_review(
    ai: &AiReviewState,
    on_toggle: &Callback<usize>,
    on_retry: &Callback<MouseEvent>,
    on_skip: &Callback<MouseEvent>,
) -> Html {
    match ai {
        AiReviewState::NotRequested | AiReviewState::Loading => html! {
            <div class="wizard-step">
                <div class="loading">{"Asking your coach for habit suggestions..."}</div>
            </div>
        },

        AiReviewState::Failed { message } => html! {
            <div class="wizard-step">
                <div class="form-message error">{message}</div>
                <div class="ai-review-actions">
                    <button class="wizard-button wizard-button-secondary" onclick={on_retry.clone()}>
                        {"Try Again"}
                    </button>
                    <button class="wizard-button wizard-button-secondary" onclick={on_skip.clone()}>
                        {"Skip Suggestions"}
                    </button>
                </div>
            </div>
        },

        AiReviewState::Skipped => html! {
            <div class="wizard-step">
                <p class="wizard-hint">{"Suggestions skipped. You can add habits later."}</p>
            </div>
        },

        AiReviewState::Loaded {
            reasoning,
            candidates,
        } => html! {
            <div class="wizard-step">
                <p class="ai-reasoning">{reasoning.clone()}</p>
                <div class="ai-candidates">
                    {for candidates.iter().enumerate().map(|(index, candidate)| {
                        render_candidate(index, candidate, on_toggle)
                    })}
                </div>
                <div class="ai-review-actions">
                    <button class="wizard-button wizard-button-secondary" onclick={on_skip.clone()}>
                        {"Skip Suggestions"}
                    </button>
                </div>
            </div>
        },
    }
}

fn render_candidate(index: usize, candidate: &AiHabitCandidate, on_toggle: &Callback<usize>) -> Html {
    let onchange = {
        let on_toggle = on_toggle.clone();
        Callback::from(move |_: Event| {
            on_toggle.emit(index);
        })
    };

    let suggestion = &candidate.suggestion;

    html! {
        <label class={if candidate.accepted { "ai-candidate ai-candidate-accepted" } else { "ai-candidate" }}>
            <input type="checkbox" checked={candidate.accepted} {onchange} />
            <div class="ai-candidate-body">
                <span class="ai-candidate-name">{&suggestion.name}</span>
                <span class="ai-candidate-description">{&suggestion.description}</span>
                <span class="ai-candidate-days">{suggestion.days_of_week.join(", ")}</span>
                <span class="ai-candidate-rationale">{&suggestion.rationale}</span>
            </div>
        </label>
    }
}

fn render_review(draft: &GoalDraft, ai: &AiReviewState) -> Html {
    let accepted_count = match ai {
        AiReviewState::Loaded { candidates, .. } => {
            candidates.iter().filter(|c| c.accepted).count()
        }
        _ => 0,
    };

    html! {
        <div class="wizard-step">
            <div class="review-item">
                <h3>{"Goal Title"}</h3>
                <p>{format!("{} {}", draft.emoji, draft.title).trim().to_string()}</p>
            </div>
            {if !draft.description.trim().is_empty() {
                html! {
                    <div class="review-item">
                        <h3>{"Description"}</h3>
                        <p>{draft.description.clone()}</p>
                    </div>
                }
            } else {
                html! {}
            }}
            <div class="review-item review-dates">
                <div>
                    <h3>{"Start Date"}</h3>
                    <p>{crate::services::date_utils::format_date_for_display(&draft.start_date)}</p>
                </div>
                <div>
                    <h3>{"Target End Date"}</h3>
                    <p>{crate::services::date_utils::format_date_for_display(&draft.end_date)}</p>
                </div>
            </div>
            <div class="review-item">
                <h3>{"Habits"}</h3>
                <p>
                    {if accepted_count == 0 {
                        "No suggested habits accepted".to_string()
                    } else {
                        format!("{} suggested habit(s) will be created", accepted_count)
                    }}
                </p>
            </div>
        </div>
    }
}

fn input_handler(
    draft: &UseStateHandle<GoalDraft>,
    apply: fn(&mut GoalDraft, String),
) -> Callback<Event> {
    let draft = draft.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*draft).clone();
        apply(&mut next, input.value());
        draft.set(next);
    })
}

fn textarea_handler(
    draft: &UseStateHandle<GoalDraft>,
    apply: fn(&mut GoalDraft, String),
) -> Callback<Event> {
    let draft = draft.clone();
    Callback::from(move |e: Event| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        let mut next = (*draft).clone();
        apply(&mut next, input.value());
        draft.set(next);
    })
}
