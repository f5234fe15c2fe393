use shared::Task;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
    pub task: Task,
    pub on_toggle: Callback<i64>,
}

/// One task chip in a calendar day column. Clicking toggles completion.
#[function_component(TaskCard)]
pub fn task_card(props: &TaskCardProps) -> Html {
    let task = &props.task;

    let onclick = {
        let on_toggle = props.on_toggle.clone();
        let task_id = task.id;
        Callback::from(move |_: MouseEvent| {
            on_toggle.emit(task_id);
        })
    };

    let class = if task.completed {
        "task-card task-card-completed"
    } else {
        "task-card"
    };

    html! {
        <div
            {class}
            style={format!("border-left: 4px solid {};", task.color)}
            title={task.habit_name.clone()}
            {onclick}
        >
            <span class="task-card-name">{&task.name}</span>
            {if task.completed {
                html! { <span class="task-card-check">{"✓"}</span> }
            } else {
                html! {}
            }}
        </div>
    }
}
