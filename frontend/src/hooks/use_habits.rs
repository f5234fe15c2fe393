use shared::Habit;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Clone)]
pub struct HabitsState {
    pub habits: Vec<Habit>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseHabitsResult {
    pub state: HabitsState,
    pub actions: UseHabitsActions,
}

#[derive(Clone)]
pub struct UseHabitsActions {
    pub refresh: Callback<()>,
    pub delete_habit: Callback<i64>,
}

/// All habits for the user, refreshed after task toggles so the
/// server-maintained streak counters stay current.
#[hook]
pub fn use_habits(api_client: &ApiClient, user_id: i64) -> UseHabitsResult {
    let habits = use_state(Vec::<Habit>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let habits = habits.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(user_id, move |_, user_id| {
            let api_client = api_client.clone();
            let habits = habits.clone();
            let loading = loading.clone();
            let error = error.clone();
            let user_id = *user_id;

            spawn_local(async move {
                loading.set(true);

                match api_client.get_habits_by_user(user_id).await {
                    Ok(data) => {
                        habits.set(data);
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch habits:", e.clone());
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let delete_habit = {
        let api_client = api_client.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |habit_id: i64, _| {
            let api_client = api_client.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.delete_habit(habit_id).await {
                    Ok(()) => {
                        refresh.emit(());
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    // Load initial habits
    use_effect_with(user_id, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = HabitsState {
        habits: (*habits).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseHabitsActions {
        refresh,
        delete_habit,
    };

    UseHabitsResult { state, actions }
}
