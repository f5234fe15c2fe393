use futures::future::join_all;
use shared::{
    auto_tasks_for_week, join_day_codes, start_of_week, validate_habit_form, AutoTask,
    CreateHabitRequest, CreateTaskRequest, Goal, HabitFormError, DAYS_OF_WEEK, HABIT_COLORS,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct CreateHabitModalProps {
    pub is_open: bool,
    pub user_id: i64,
    pub goals: Vec<Goal>,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    pub on_success: Callback<()>,
}

/// Standalone habit creation. Submitting creates the habit, then issues the
/// pre-generated current-week tasks concurrently once the habit id is known.
#[function_component(CreateHabitModal)]
pub fn create_habit_modal(props: &CreateHabitModalProps) -> Html {
    let name = use_state(String::new);
    let description = use_state(String::new);
    let color = use_state(|| HABIT_COLORS[0].to_string());
    let goal_id = use_state(|| None::<i64>);
    let selected_days = use_state(Vec::<String>::new);
    let start_date = use_state(String::new);
    let end_date = use_state(String::new);
    let auto_tasks = use_state(Vec::<AutoTask>::new);
    let errors = use_state(Vec::<HabitFormError>::new);
    let submit_error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    // Reset the form whenever the modal opens
    use_effect_with(props.is_open, {
        let name = name.clone();
        let description = description.clone();
        let color = color.clone();
        let goal_id = goal_id.clone();
        let selected_days = selected_days.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let auto_tasks = auto_tasks.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();

        move |is_open| {
            if *is_open {
                name.set(String::new());
                description.set(String::new());
                color.set(HABIT_COLORS[0].to_string());
                goal_id.set(None);
                selected_days.set(Vec::new());
                start_date.set(String::new());
                end_date.set(String::new());
                auto_tasks.set(Vec::new());
                errors.set(Vec::new());
                submit_error.set(None);
            }
        }
    });

    // Default to the first goal once goals are available
    use_effect_with((props.goals.clone(), props.is_open), {
        let goal_id = goal_id.clone();
        move |(goals, is_open): &(Vec<Goal>, bool)| {
            if *is_open && goal_id.is_none() {
                if let Some(first) = goals.first() {
                    goal_id.set(Some(first.id));
                }
            }
        }
    });

    // Regenerate the current-week task preview when the inputs change.
    // Only the current week is pre-generated; later weeks are created on
    // demand, not here.
    use_effect_with(((*name).clone(), (*selected_days).clone(), (*start_date).clone()), {
        let auto_tasks = auto_tasks.clone();
        move |(name, selected_days, start_date): &(String, Vec<String>, String)| {
            if !selected_days.is_empty() && !start_date.is_empty() {
                auto_tasks.set(auto_tasks_for_week(
                    name,
                    selected_days,
                    start_of_week(date_utils::today()),
                ));
            } else {
                auto_tasks.set(Vec::new());
            }
        }
    });

    let toggle_day = {
        let selected_days = selected_days.clone();
        use_callback((), move |code: String, _| {
            let mut days = (*selected_days).clone();
            if let Some(position) = days.iter().position(|d| *d == code) {
                days.remove(position);
            } else {
                days.push(code);
            }
            selected_days.set(days);
        })
    };

    let update_task_name = {
        let auto_tasks = auto_tasks.clone();
        use_callback((), move |(index, new_name): (usize, String), _| {
            let mut tasks = (*auto_tasks).clone();
            if let Some(task) = tasks.get_mut(index) {
                task.name = new_name;
            }
            auto_tasks.set(tasks);
        })
    };

    let handle_close = {
        let on_close = props.on_close.clone();
        let submitting = submitting.clone();
        Callback::from(move |_: MouseEvent| {
            if !*submitting {
                on_close.emit(());
            }
        })
    };

    let handle_submit = {
        let api_client = props.api_client.clone();
        let user_id = props.user_id;
        let on_success = props.on_success.clone();
        let on_close = props.on_close.clone();
        let name = name.clone();
        let description = description.clone();
        let color = color.clone();
        let goal_id = goal_id.clone();
        let selected_days = selected_days.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let auto_tasks = auto_tasks.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();
        let submitting = submitting.clone();

        use_callback((), move |e: SubmitEvent, _| {
            e.prevent_default();

            let validation = validate_habit_form(
                &name,
                &description,
                *goal_id,
                &selected_days,
                &start_date,
                &end_date,
            );
            if !validation.is_empty() {
                errors.set(validation);
                return;
            }
            errors.set(Vec::new());

            let Some(goal_id_value) = *goal_id else {
                return;
            };

            let api_client = api_client.clone();
            let on_success = on_success.clone();
            let on_close = on_close.clone();
            let submit_error = submit_error.clone();
            let submitting = submitting.clone();
            let tasks = (*auto_tasks).clone();
            let request = CreateHabitRequest {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
                days_of_week: join_day_codes(&selected_days),
                start_date: (*start_date).clone(),
                end_date: (*end_date).clone(),
                color: (*color).clone(),
                goal_id: goal_id_value,
                user_id,
            };

            spawn_local(async move {
                submitting.set(true);
                submit_error.set(None);

                let habit = match api_client.create_habit(request).await {
                    Ok(habit) => habit,
                    Err(e) => {
                        submit_error.set(Some(e));
                        submitting.set(false);
                        return;
                    }
                };

                // Task creations are issued together after the habit call
                // resolves; individual failures do not abort the rest
                let results = join_all(tasks.into_iter().map(|task| {
                    let api_client = api_client.clone();
                    let request = CreateTaskRequest {
                        name: task.name,
                        date: task.date,
                        habit_id: habit.id,
                        user_id,
                    };
                    async move {
                        let date = request.date.clone();
                        (date, api_client.create_task(request).await)
                    }
                }))
                .await;

                for (date, result) in &results {
                    if let Err(e) = result {
                        gloo::console::error!("Failed to create task for", date.clone(), e.clone());
                    }
                }

                submitting.set(false);
                on_success.emit(());
                on_close.emit(());
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let field_error = |error: HabitFormError| -> Html {
        if errors.contains(&error) {
            html! { <p class="field-error">{error.message()}</p> }
        } else {
            html! {}
        }
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal create-habit-modal">
                <div class="modal-header">
                    <h2>{"Create New Habit"}</h2>
                    <button class="modal-close" onclick={handle_close.clone()}>{"×"}</button>
                </div>

                <form class="modal-form" onsubmit={handle_submit}>
                    <div class="form-group">
                        <label>{"Habit Name"}</label>
                        <input
                            type="text"
                            placeholder="e.g., Morning Exercise"
                            value={(*name).clone()}
                            onchange={{
                                let name = name.clone();
                                Callback::from(move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    name.set(input.value());
                                })
                            }}
                        />
                        {field_error(HabitFormError::EmptyName)}
                    </div>

                    <div class="form-group">
                        <label>{"Description"}</label>
                        <textarea
                            rows="3"
                            placeholder="Describe your habit..."
                            value={(*description).clone()}
                            onchange={{
                                let description = description.clone();
                                Callback::from(move |e: Event| {
                                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                                    description.set(input.value());
                                })
                            }}
                        />
                        {field_error(HabitFormError::EmptyDescription)}
                    </div>

                    <div class="form-group">
                        <label>{"Color"}</label>
                        <div class="color-picker">
                            {for HABIT_COLORS.iter().map(|value| {
                                let selected = *color == *value;
                                let onclick = {
                                    let color = color.clone();
                                    let value = value.to_string();
                                    Callback::from(move |_: MouseEvent| {
                                        color.set(value.clone());
                                    })
                                };
                                html! {
                                    <button
                                        type="button"
                                        class={if selected { "color-swatch color-swatch-selected" } else { "color-swatch" }}
                                        style={format!("background-color: {};", value)}
                                        {onclick}
                                    />
                                }
                            })}
                        </div>
                    </div>

                    <div class="form-group">
                        <label>{"Associated Goal"}</label>
                        <select
                            onchange={{
                                let goal_id = goal_id.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    goal_id.set(select.value().parse::<i64>().ok());
                                })
                            }}
                        >
                            <option value="" selected={goal_id.is_none()}>{"Select a goal..."}</option>
                            {for props.goals.iter().map(|goal| html! {
                                <option
                                    value={goal.id.to_string()}
                                    selected={*goal_id == Some(goal.id)}
                                >
                                    {&goal.title}
                                </option>
                            })}
                        </select>
                        {field_error(HabitFormError::MissingGoal)}
                    </div>

                    <div class="form-group">
                        <label>{"Days of Week"}</label>
                        <div class="day-picker">
                            {for DAYS_OF_WEEK.iter().map(|(code, _)| {
                                let selected = selected_days.iter().any(|d| d == code);
                                let onclick = {
                                    let toggle_day = toggle_day.clone();
                                    let code = code.to_string();
                                    Callback::from(move |_: MouseEvent| {
                                        toggle_day.emit(code.clone());
                                    })
                                };
                                html! {
                                    <button
                                        type="button"
                                        class={if selected { "day-button day-button-selected" } else { "day-button" }}
                                        {onclick}
                                    >
                                        {*code}
                                    </button>
                                }
                            })}
                        </div>
                        {field_error(HabitFormError::NoDaysSelected)}
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Start Date"}</label>
                            <input
                                type="date"
                                value={(*start_date).clone()}
                                onchange={{
                                    let start_date = start_date.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        start_date.set(input.value());
                                    })
                                }}
                            />
                            {field_error(HabitFormError::MissingStartDate)}
                        </div>
                        <div class="form-group">
                            <label>{"End Date"}</label>
                            <input
                                type="date"
                                value={(*end_date).clone()}
                                onchange={{
                                    let end_date = end_date.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        end_date.set(input.value());
                                    })
                                }}
                            />
                            {field_error(HabitFormError::MissingEndDate)}
                            {field_error(HabitFormError::EndNotAfterStart)}
                        </div>
                    </div>

                    {if !auto_tasks.is_empty() {
                        html! {
                            <div class="form-group">
                                <label>{format!("Tasks for This Week ({})", auto_tasks.len())}</label>
                                <div class="auto-task-list">
                                    {for auto_tasks.iter().enumerate().map(|(index, task)| {
                                        let onchange = {
                                            let update_task_name = update_task_name.clone();
                                            Callback::from(move |e: Event| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                update_task_name.emit((index, input.value()));
                                            })
                                        };
                                        html! {
                                            <div class="auto-task-row">
                                                <span class="auto-task-day">{&task.day_name}</span>
                                                <input
                                                    type="text"
                                                    value={task.name.clone()}
                                                    {onchange}
                                                />
                                            </div>
                                        }
                                    })}
                                </div>
                                <p class="form-help">
                                    {"These tasks will be created automatically based on your selected days"}
                                </p>
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    {if let Some(message) = (*submit_error).as_ref() {
                        html! { <div class="form-message error">{message}</div> }
                    } else {
                        html! {}
                    }}

                    <div class="modal-actions">
                        <button
                            type="button"
                            class="modal-button modal-button-secondary"
                            onclick={handle_close}
                            disabled={*submitting}
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            class="modal-button modal-button-primary"
                            disabled={*submitting}
                        >
                            {if *submitting { "Creating..." } else { "Create Habit" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
