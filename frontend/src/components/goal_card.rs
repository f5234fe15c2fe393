use shared::{Goal, GoalStatus};
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct GoalCardProps {
    pub goal: Goal,
    pub selected: bool,
    pub on_select: Callback<i64>,
    pub on_status_change: Callback<(i64, GoalStatus)>,
    pub on_edit: Callback<Goal>,
    /// Only fired after the user confirms
    pub on_delete: Callback<i64>,
}

#[function_component(GoalCard)]
pub fn goal_card(props: &GoalCardProps) -> Html {
    let show_delete_confirm = use_state(|| false);
    let goal = &props.goal;

    let on_card_click = {
        let on_select = props.on_select.clone();
        let goal_id = goal.id;
        Callback::from(move |_: MouseEvent| {
            on_select.emit(goal_id);
        })
    };

    let on_status_select = {
        let on_status_change = props.on_status_change.clone();
        let goal_id = goal.id;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = GoalStatus::parse(&select.value()) {
                on_status_change.emit((goal_id, status));
            }
        })
    };

    let on_edit_click = {
        let on_edit = props.on_edit.clone();
        let goal = goal.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_edit.emit(goal.clone());
        })
    };

    let on_delete_request = {
        let show_delete_confirm = show_delete_confirm.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            show_delete_confirm.set(true);
        })
    };

    let on_delete_cancel = {
        let show_delete_confirm = show_delete_confirm.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            show_delete_confirm.set(false);
        })
    };

    let on_delete_confirm = {
        let show_delete_confirm = show_delete_confirm.clone();
        let on_delete = props.on_delete.clone();
        let goal_id = goal.id;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            show_delete_confirm.set(false);
            on_delete.emit(goal_id);
        })
    };

    let status_class = format!(
        "goal-status goal-status-{}",
        goal.status.as_str().to_lowercase()
    );

    html! {
        <div
            class={if props.selected { "goal-card goal-card-selected" } else { "goal-card" }}
            onclick={on_card_click}
        >
            {if let Some(image_url) = goal.image_url.as_ref() {
                html! {
                    <div class="goal-card-image">
                        <img src={image_url.clone()} alt={goal.title.clone()} />
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="goal-card-body">
                <h3 class="goal-card-title">
                    {if let Some(emoji) = goal.emoji.as_ref() {
                        html! { <span class="goal-card-emoji">{emoji}{" "}</span> }
                    } else {
                        html! {}
                    }}
                    {&goal.title}
                </h3>

                {if let Some(description) = goal.description.as_ref() {
                    html! { <p class="goal-card-description">{description}</p> }
                } else {
                    html! {}
                }}

                <p class="goal-card-dates">
                    {format!(
                        "{} → {}",
                        date_utils::format_date_for_display(&goal.start_date),
                        date_utils::format_date_for_display(&goal.end_date)
                    )}
                </p>

                <div class="goal-card-footer">
                    <select class={status_class} onchange={on_status_select}>
                        {for GoalStatus::ALL.iter().map(|status| html! {
                            <option
                                value={status.as_str()}
                                selected={goal.status == *status}
                            >
                                {status.label()}
                            </option>
                        })}
                    </select>

                    {if *show_delete_confirm {
                        html! {
                            <div class="goal-delete-confirm">
                                <span>{"Delete this goal?"}</span>
                                <button class="goal-delete-yes" onclick={on_delete_confirm}>{"Delete"}</button>
                                <button onclick={on_delete_cancel}>{"Cancel"}</button>
                            </div>
                        }
                    } else {
                        html! {
                            <div class="goal-card-actions">
                                <button class="goal-edit-button" onclick={on_edit_click}>
                                    {"Edit"}
                                </button>
                                <button class="goal-delete-button" onclick={on_delete_request}>
                                    {"Delete"}
                                </button>
                            </div>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
