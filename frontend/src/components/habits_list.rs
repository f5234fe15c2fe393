use shared::{split_day_codes, Habit};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HabitsListProps {
    pub habits: Vec<Habit>,
    pub loading: bool,
    pub on_delete: Callback<i64>,
}

/// Habit strip under the weekly calendar: color, name, schedule, streak.
/// Streak counts come from the server and refresh after task toggles.
#[function_component(HabitsList)]
pub fn habits_list(props: &HabitsListProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Loading habits..."}</div> };
    }

    if props.habits.is_empty() {
        return html! {
            <p class="habits-empty">{"No habits yet. Create one to start building streaks."}</p>
        };
    }

    html! {
        <div class="habits-list">
            {for props.habits.iter().map(|habit| {
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let habit_id = habit.id;
                    Callback::from(move |_: MouseEvent| {
                        on_delete.emit(habit_id);
                    })
                };

                html! {
                    <div class="habit-chip" key={habit.id}>
                        <span
                            class="habit-color-dot"
                            style={format!("background-color: {};", habit.color)}
                        />
                        <div class="habit-chip-body">
                            <span class="habit-chip-name" title={habit.description.clone()}>
                                {&habit.name}
                            </span>
                            <span class="habit-chip-days">
                                {split_day_codes(&habit.days_of_week).join(" · ")}
                            </span>
                        </div>
                        <span class="habit-streak" title="Current streak">
                            {format!("🔥 {}", habit.streak_status)}
                        </span>
                        <button class="habit-delete" onclick={on_delete}>{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
