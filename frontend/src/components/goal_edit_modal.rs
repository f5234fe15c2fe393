use shared::{Goal, UpdateGoalRequest, MAX_GOAL_DESCRIPTION_LEN, MAX_GOAL_TITLE_LEN};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct GoalEditModalProps {
    pub goal: Goal,
    pub api_client: ApiClient,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

/// Edit form for an existing goal. Status changes have their own action on
/// the card; this edits the descriptive fields and the date range.
#[function_component(GoalEditModal)]
pub fn goal_edit_modal(props: &GoalEditModalProps) -> Html {
    let title = use_state(|| props.goal.title.clone());
    let description = use_state(|| props.goal.description.clone().unwrap_or_default());
    let emoji = use_state(|| props.goal.emoji.clone().unwrap_or_default());
    let image_url = use_state(|| props.goal.image_url.clone().unwrap_or_default());
    let start_date = use_state(|| props.goal.start_date.clone());
    let end_date = use_state(|| props.goal.end_date.clone());
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let valid = !title.trim().is_empty()
        && title.trim().chars().count() <= MAX_GOAL_TITLE_LEN
        && !start_date.is_empty()
        && !end_date.is_empty()
        && *start_date <= *end_date;

    let handle_close = {
        let on_close = props.on_close.clone();
        let saving = saving.clone();
        Callback::from(move |_: MouseEvent| {
            if !*saving {
                on_close.emit(());
            }
        })
    };

    let handle_save = {
        let api_client = props.api_client.clone();
        let goal_id = props.goal.id;
        let on_saved = props.on_saved.clone();
        let on_close = props.on_close.clone();
        let title = title.clone();
        let description = description.clone();
        let emoji = emoji.clone();
        let image_url = image_url.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let saving = saving.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            if !*saving {
                let api_client = api_client.clone();
                let on_saved = on_saved.clone();
                let on_close = on_close.clone();
                let saving = saving.clone();
                let error = error.clone();

                let non_empty = |s: &str| {
                    let t = s.trim();
                    (!t.is_empty()).then(|| t.to_string())
                };
                let request = UpdateGoalRequest {
                    title: Some(title.trim().to_string()),
                    description: non_empty(&description),
                    image_url: non_empty(&image_url),
                    emoji: non_empty(&emoji),
                    start_date: Some((*start_date).clone()),
                    end_date: Some((*end_date).clone()),
                    status: None,
                };

                spawn_local(async move {
                    saving.set(true);
                    error.set(None);

                    match api_client.update_goal(goal_id, request).await {
                        Ok(_) => {
                            saving.set(false);
                            on_saved.emit(());
                            on_close.emit(());
                        }
                        Err(e) => {
                            error.set(Some(e));
                            saving.set(false);
                        }
                    }
                });
            }
        })
    };

    let text_input = |state: &UseStateHandle<String>| -> Callback<Event> {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal goal-edit-modal">
                <div class="modal-header">
                    <h2>{"Edit Goal"}</h2>
                    <button class="modal-close" onclick={handle_close.clone()}>{"×"}</button>
                </div>

                <div class="modal-form">
                    {if let Some(message) = (*error).as_ref() {
                        html! { <div class="form-message error">{message}</div> }
                    } else {
                        html! {}
                    }}

                    <div class="form-group">
                        <label>{"Title"}</label>
                        <input
                            type="text"
                            maxlength={MAX_GOAL_TITLE_LEN.to_string()}
                            value={(*title).clone()}
                            onchange={text_input(&title)}
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Description"}</label>
                        <textarea
                            rows="4"
                            maxlength={MAX_GOAL_DESCRIPTION_LEN.to_string()}
                            value={(*description).clone()}
                            onchange={{
                                let description = description.clone();
                                Callback::from(move |e: Event| {
                                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                                    description.set(input.value());
                                })
                            }}
                        />
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Emoji"}</label>
                            <input
                                type="text"
                                maxlength="2"
                                placeholder="🎯"
                                value={(*emoji).clone()}
                                onchange={text_input(&emoji)}
                            />
                        </div>
                        <div class="form-group">
                            <label>{"Image URL"}</label>
                            <input
                                type="url"
                                placeholder="https://..."
                                value={(*image_url).clone()}
                                onchange={text_input(&image_url)}
                            />
                        </div>
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Start Date"}</label>
                            <input
                                type="date"
                                value={(*start_date).clone()}
                                onchange={text_input(&start_date)}
                            />
                        </div>
                        <div class="form-group">
                            <label>{"End Date"}</label>
                            <input
                                type="date"
                                min={(*start_date).clone()}
                                value={(*end_date).clone()}
                                onchange={text_input(&end_date)}
                            />
                        </div>
                    </div>

                    {if !start_date.is_empty() && !end_date.is_empty() && *start_date > *end_date {
                        html! {
                            <div class="form-message error">{"End date must be after start date"}</div>
                        }
                    } else {
                        html! {}
                    }}

                    <div class="modal-actions">
                        <button
                            type="button"
                            class="modal-button modal-button-secondary"
                            onclick={handle_close}
                            disabled={*saving}
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="button"
                            class="modal-button modal-button-primary"
                            onclick={handle_save}
                            disabled={!valid || *saving}
                        >
                            {if *saving { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
