use shared::{CreateNoteRequest, Note, UpdateNoteRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Clone)]
pub struct NotesState {
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseNotesResult {
    pub state: NotesState,
    pub actions: UseNotesActions,
}

#[derive(Clone)]
pub struct UseNotesActions {
    pub refresh: Callback<()>,
    pub add_note: Callback<String>,
    pub update_note: Callback<(i64, String)>,
    pub delete_note: Callback<i64>,
    pub dismiss_error: Callback<web_sys::MouseEvent>,
}

/// Notes for the selected goal, newest first. `goal_id` is None until the
/// user picks a goal.
#[hook]
pub fn use_notes(api_client: &ApiClient, goal_id: Option<i64>) -> UseNotesResult {
    let notes = use_state(Vec::<Note>::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let notes = notes.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(goal_id, move |_, goal_id| {
            let api_client = api_client.clone();
            let notes = notes.clone();
            let loading = loading.clone();
            let error = error.clone();

            let Some(goal_id) = *goal_id else {
                notes.set(Vec::new());
                return;
            };

            spawn_local(async move {
                loading.set(true);

                match api_client.get_notes_by_goal(goal_id).await {
                    Ok(mut data) => {
                        // Newest first regardless of collaborator ordering;
                        // RFC 3339 strings sort chronologically
                        data.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                        notes.set(data);
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch notes:", e.clone());
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let add_note = {
        let api_client = api_client.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback(goal_id, move |content: String, goal_id| {
            let api_client = api_client.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            let Some(goal_id) = *goal_id else {
                return;
            };
            if content.trim().is_empty() {
                return;
            }

            spawn_local(async move {
                let request = CreateNoteRequest {
                    content: content.trim().to_string(),
                    goal_id,
                };

                match api_client.create_note(request).await {
                    Ok(_) => {
                        refresh.emit(());
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let update_note = {
        let api_client = api_client.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |(note_id, content): (i64, String), _| {
            let api_client = api_client.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            if content.trim().is_empty() {
                return;
            }

            spawn_local(async move {
                let request = UpdateNoteRequest {
                    content: content.trim().to_string(),
                };

                match api_client.update_note(note_id, request).await {
                    Ok(_) => {
                        refresh.emit(());
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let delete_note = {
        let api_client = api_client.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |note_id: i64, _| {
            let api_client = api_client.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.delete_note(note_id).await {
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

    let dismiss_error = {
        let error = error.clone();
        use_callback((), move |_, _| {
            error.set(None);
        })
    };

    // Reload whenever the selected goal changes
    use_effect_with(goal_id, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = NotesState {
        notes: (*notes).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseNotesActions {
        refresh,
        add_note,
        update_note,
        delete_note,
        dismiss_error,
    };

    UseNotesResult { state, actions }
}
