use std::collections::HashMap;

use shared::{
    apply_completion_toggle, bucket_tasks_by_date, revert_completion_toggle, Task, WeekWindow,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Clone)]
pub struct WeekTasksState {
    pub window: WeekWindow,
    pub tasks: Vec<Task>,
    /// Date-key buckets derived from `tasks`, rebuilt on every change
    pub buckets: HashMap<String, Vec<Task>>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseWeekTasksResult {
    pub state: WeekTasksState,
    pub actions: UseWeekTasksActions,
}

#[derive(Clone)]
pub struct UseWeekTasksActions {
    pub previous_week: Callback<MouseEvent>,
    pub next_week: Callback<MouseEvent>,
    pub jump_to_today: Callback<MouseEvent>,
    pub refresh: Callback<()>,
    pub toggle_task: Callback<i64>,
    pub dismiss_error: Callback<MouseEvent>,
}

/// Week cursor plus the tasks fetched for its window. Every navigation
/// refetches the new window; responses are not de-duplicated, so the last
/// one to resolve wins.
#[hook]
pub fn use_week_tasks(
    api_client: &ApiClient,
    user_id: i64,
    on_task_toggled: Callback<()>,
) -> UseWeekTasksResult {
    let window = use_state(|| WeekWindow::containing(date_utils::today()));
    let tasks = use_state(Vec::<Task>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let window = window.clone();
        let tasks = tasks.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(user_id, move |_, user_id| {
            let api_client = api_client.clone();
            let tasks = tasks.clone();
            let loading = loading.clone();
            let error = error.clone();
            let user_id = *user_id;
            let current = *window;

            spawn_local(async move {
                loading.set(true);

                match api_client
                    .get_tasks_by_date_range(user_id, &current.start_key(), &current.end_key())
                    .await
                {
                    Ok(data) => {
                        tasks.set(data);
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch tasks:", e.clone());
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    // Navigation callbacks; each transition triggers a refetch below
    let previous_week = {
        let window = window.clone();
        use_callback((), move |_: MouseEvent, _| {
            window.set(window.previous());
        })
    };

    let next_week = {
        let window = window.clone();
        use_callback((), move |_: MouseEvent, _| {
            window.set(window.next());
        })
    };

    let jump_to_today = {
        let window = window.clone();
        use_callback((), move |_: MouseEvent, _| {
            window.set(WeekWindow::containing(date_utils::today()));
        })
    };

    let toggle_task = {
        let api_client = api_client.clone();
        let tasks = tasks.clone();
        let error = error.clone();
        let on_task_toggled = on_task_toggled.clone();

        use_callback((), move |task_id: i64, _| {
            let api_client = api_client.clone();
            let tasks = tasks.clone();
            let error = error.clone();
            let on_task_toggled = on_task_toggled.clone();

            // Optimistic flip before the remote call
            let mut updated = (*tasks).clone();
            let previous = match apply_completion_toggle(&mut updated, task_id) {
                Some(previous) => previous,
                None => return,
            };
            tasks.set(updated);

            spawn_local(async move {
                match api_client.toggle_task_completion(task_id).await {
                    Ok(_) => {
                        // Streak counters are server-owned; let the page
                        // refresh habit state
                        on_task_toggled.emit(());
                    }
                    Err(e) => {
                        let mut reverted = (*tasks).clone();
                        revert_completion_toggle(&mut reverted, task_id, previous);
                        tasks.set(reverted);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let dismiss_error = {
        let error = error.clone();
        use_callback((), move |_: MouseEvent, _| {
            error.set(None);
        })
    };

    // Refetch whenever the window moves (and once at mount)
    use_effect_with(*window, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = WeekTasksState {
        window: *window,
        buckets: bucket_tasks_by_date(&tasks),
        tasks: (*tasks).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseWeekTasksActions {
        previous_week,
        next_week,
        jump_to_today,
        refresh,
        toggle_task,
        dismiss_error,
    };

    UseWeekTasksResult { state, actions }
}
