use shared::{Goal, GoalStatus};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Clone)]
pub struct GoalsState {
    pub goals: Vec<Goal>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseGoalsResult {
    pub state: GoalsState,
    pub actions: UseGoalsActions,
}

#[derive(Clone)]
pub struct UseGoalsActions {
    pub refresh: Callback<()>,
    pub update_status: Callback<(i64, GoalStatus)>,
    pub delete_goal: Callback<i64>,
    pub dismiss_error: Callback<web_sys::MouseEvent>,
}

#[hook]
pub fn use_goals(api_client: &ApiClient, user_id: i64) -> UseGoalsResult {
    let goals = use_state(Vec::<Goal>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let goals = goals.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(user_id, move |_, user_id| {
            let api_client = api_client.clone();
            let goals = goals.clone();
            let loading = loading.clone();
            let error = error.clone();
            let user_id = *user_id;

            spawn_local(async move {
                loading.set(true);

                match api_client.get_goals_by_user(user_id).await {
                    Ok(data) => {
                        goals.set(data);
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch goals:", e.clone());
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    // Status changes replace the one goal in place instead of refetching
    let update_status = {
        let api_client = api_client.clone();
        let goals = goals.clone();
        let error = error.clone();

        use_callback((), move |(goal_id, status): (i64, GoalStatus), _| {
            let api_client = api_client.clone();
            let goals = goals.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.update_goal_status(goal_id, status).await {
                    Ok(updated) => {
                        let next = (*goals)
                            .iter()
                            .map(|g| if g.id == updated.id { updated.clone() } else { g.clone() })
                            .collect();
                        goals.set(next);
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let delete_goal = {
        let api_client = api_client.clone();
        let goals = goals.clone();
        let error = error.clone();

        use_callback((), move |goal_id: i64, _| {
            let api_client = api_client.clone();
            let goals = goals.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.delete_goal(goal_id).await {
                    Ok(()) => {
                        let next = (*goals).iter().filter(|g| g.id != goal_id).cloned().collect();
                        goals.set(next);
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let dismiss_error = {
        let error = error.clone();
        use_callback((), move |_, _| {
            error.set(None);
        })
    };

    // Load initial goals
    use_effect_with(user_id, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = GoalsState {
        goals: (*goals).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseGoalsActions {
        refresh,
        update_status,
        delete_goal,
        dismiss_error,
    };

    UseGoalsResult { state, actions }
}
