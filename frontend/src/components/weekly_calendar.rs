use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use shared::{date_key, day_code_for, Task, WeekWindow};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::task_card::TaskCard;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct WeeklyCalendarProps {
    pub window: WeekWindow,
    /// Tasks bucketed by date key; days without an entry render empty
    pub buckets: HashMap<String, Vec<Task>>,
    pub loading: bool,
    pub today: NaiveDate,
    pub on_previous: Callback<MouseEvent>,
    pub on_next: Callback<MouseEvent>,
    pub on_today: Callback<MouseEvent>,
    pub on_toggle_task: Callback<i64>,
}

/// Seven Sunday-to-Saturday day columns for the current week window
#[function_component(WeeklyCalendar)]
pub fn weekly_calendar(props: &WeeklyCalendarProps) -> Html {
    static EMPTY: Vec<Task> = Vec::new();

    let days = props.window.days();

    html! {
        <div class="weekly-calendar">
            <div class="weekly-calendar-header">
                <div>
                    <h3 class="weekly-calendar-title">{date_utils::week_title(&props.window)}</h3>
                    <p class="weekly-calendar-subtitle">
                        {format!("Week of {}", date_utils::format_date_for_display(&props.window.start_key()))}
                    </p>
                </div>
                <div class="weekly-calendar-nav">
                    <button class="calendar-nav-btn" onclick={props.on_previous.clone()}>{"‹"}</button>
                    <button class="calendar-nav-btn calendar-today-btn" onclick={props.on_today.clone()}>{"Today"}</button>
                    <button class="calendar-nav-btn" onclick={props.on_next.clone()}>{"›"}</button>
                </div>
            </div>

            {if props.loading {
                html! { <div class="loading">{"Loading tasks..."}</div> }
            } else {
                html! {}
            }}

            <div class="weekly-calendar-grid">
                {for days.iter().enumerate().map(|(index, day)| {
                    let key = date_key(*day);
                    let tasks = props.buckets.get(&key).unwrap_or(&EMPTY);
                    let is_today = *day == props.today;
                    let is_weekend = index == 0 || index == 6;

                    let mut column_class = classes!("calendar-day-column");
                    if is_weekend {
                        column_class.push("calendar-day-weekend");
                    }

                    html! {
                        <div class={column_class}>
                            <div class={if is_today { "calendar-day-header calendar-day-today" } else { "calendar-day-header" }}>
                                <span class="calendar-day-code">{day_code_for(*day)}</span>
                                {if is_today {
                                    html! { <span class="calendar-day-number calendar-day-number-today">{day.day()}</span> }
                                } else {
                                    html! { <span class="calendar-day-number">{day.day()}</span> }
                                }}
                            </div>
                            <div class="calendar-day-tasks">
                                {if tasks.is_empty() {
                                    html! { <div class="calendar-day-empty">{"No tasks"}</div> }
                                } else {
                                    html! {
                                        {for tasks.iter().map(|task| html! {
                                            <TaskCard
                                                key={task.id}
                                                task={task.clone()}
                                                on_toggle={props.on_toggle_task.clone()}
                                            />
                                        })}
                                    }
                                }}
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
