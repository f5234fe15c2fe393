mod components;
mod hooks;
mod services;

use shared::User;
use web_sys::MouseEvent;
use yew::prelude::*;

use components::create_habit_modal::CreateHabitModal;
use components::goal_card::GoalCard;
use components::goal_edit_modal::GoalEditModal;
use components::goal_wizard::GoalWizard;
use components::habits_list::HabitsList;
use components::header::{Header, Page};
use components::notes_list::NotesList;
use components::weekly_calendar::WeeklyCalendar;
use hooks::use_goals::use_goals;
use hooks::use_habits::use_habits;
use hooks::use_notes::use_notes;
use hooks::use_session::{use_session, AuthSession, SessionState};
use hooks::use_week_tasks::use_week_tasks;
use services::ai::AiClient;
use services::api::ApiClient;
use services::date_utils;

const OAUTH_LOGIN_URL: &str = "http://localhost:8080/oauth2/authorization/github";

/// Session handover from the OAuth callback page. The provider flow writes
/// these keys before redirecting back into the app.
fn stored_session() -> Option<AuthSession> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let provider = storage.get_item("mercury.provider").ok()??;
    let provider_id = storage.get_item("mercury.providerId").ok()??;
    Some(AuthSession {
        provider,
        provider_id,
    })
}

fn clear_stored_session() {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item("mercury.provider");
        let _ = storage.remove_item("mercury.providerId");
    }
}

fn stored_ai_key() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item("mercury.openaiKey").ok()?
}

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let auth = use_state(stored_session);
    let session = use_session(&api_client, &auth);

    let on_sign_out = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            clear_stored_session();
            auth.set(None);
        })
    };

    match session {
        SessionState::Loading => html! {
            <div class="page-center">
                <div class="spinner" />
            </div>
        },
        SessionState::Unauthenticated => html! {
            <div class="page-center login-page">
                <h1>{"Mercury"}</h1>
                <p>{"Track your goals, habits and daily tasks."}</p>
                <a class="login-button" href={OAUTH_LOGIN_URL}>
                    {"Sign in with GitHub"}
                </a>
            </div>
        },
        SessionState::Authenticated(user) => html! {
            <AuthenticatedApp {user} {api_client} {on_sign_out} />
        },
    }
}

#[derive(Properties, PartialEq)]
struct AuthenticatedAppProps {
    user: User,
    api_client: ApiClient,
    on_sign_out: Callback<MouseEvent>,
}

#[function_component(AuthenticatedApp)]
fn authenticated_app(props: &AuthenticatedAppProps) -> Html {
    let api_client = props.api_client.clone();
    let ai_client = AiClient::new(stored_ai_key());
    let user = &props.user;

    let page = use_state(|| Page::Dashboard);
    let show_habit_modal = use_state(|| false);
    let selected_goal_id = use_state(|| None::<i64>);
    let editing_goal = use_state(|| None::<shared::Goal>);

    let goals = use_goals(&api_client, user.id);
    let habits = use_habits(&api_client, user.id);
    // Toggling a task updates server-side streaks; refresh habits afterwards
    let week = use_week_tasks(&api_client, user.id, habits.actions.refresh.clone());
    let notes = use_notes(&api_client, *selected_goal_id);

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            page.set(next);
        })
    };

    let on_select_goal = {
        let selected_goal_id = selected_goal_id.clone();
        Callback::from(move |goal_id: i64| {
            selected_goal_id.set(Some(goal_id));
        })
    };

    let on_delete_goal = {
        let selected_goal_id = selected_goal_id.clone();
        let delete_goal = goals.actions.delete_goal.clone();
        let habits_refresh = habits.actions.refresh.clone();
        let week_refresh = week.actions.refresh.clone();
        Callback::from(move |goal_id: i64| {
            if *selected_goal_id == Some(goal_id) {
                selected_goal_id.set(None);
            }
            delete_goal.emit(goal_id);
            // The backend cascades habit and task deletion
            habits_refresh.emit(());
            week_refresh.emit(());
        })
    };

    let on_wizard_complete = {
        let page = page.clone();
        let goals_refresh = goals.actions.refresh.clone();
        let habits_refresh = habits.actions.refresh.clone();
        Callback::from(move |_| {
            goals_refresh.emit(());
            habits_refresh.emit(());
            page.set(Page::Dashboard);
        })
    };

    let on_wizard_cancel = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            page.set(Page::Dashboard);
        })
    };

    let on_habit_modal_close = {
        let show_habit_modal = show_habit_modal.clone();
        Callback::from(move |_| {
            show_habit_modal.set(false);
        })
    };

    let on_edit_goal = {
        let editing_goal = editing_goal.clone();
        Callback::from(move |goal: shared::Goal| {
            editing_goal.set(Some(goal));
        })
    };

    let on_edit_close = {
        let editing_goal = editing_goal.clone();
        Callback::from(move |_| {
            editing_goal.set(None);
        })
    };

    let on_habit_created = {
        let habits_refresh = habits.actions.refresh.clone();
        let week_refresh = week.actions.refresh.clone();
        Callback::from(move |_| {
            habits_refresh.emit(());
            week_refresh.emit(());
        })
    };

    if *page == Page::NewGoal {
        return html! {
            <GoalWizard
                user={user.clone()}
                api_client={api_client.clone()}
                ai_client={ai_client}
                on_complete={on_wizard_complete}
                on_cancel={on_wizard_cancel}
            />
        };
    }

    html! {
        <>
            <Header
                user={user.clone()}
                active_page={*page}
                on_navigate={on_navigate}
                on_sign_out={props.on_sign_out.clone()}
            />

            <main class="main">
                {match *page {
                    Page::Dashboard => html! {
                        <div class="dashboard-page">
                            <div class="page-heading">
                                <h2>{"Your Goals"}</h2>
                                <button
                                    class="primary-button"
                                    onclick={{
                                        let page = page.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            page.set(Page::NewGoal);
                                        })
                                    }}
                                >
                                    {"New Goal"}
                                </button>
                            </div>

                            {if let Some(message) = goals.state.error.as_ref() {
                                html! {
                                    <div class="form-message error" onclick={goals.actions.dismiss_error.clone()}>
                                        {message}
                                    </div>
                                }
                            } else {
                                html! {}
                            }}

                            {if goals.state.loading {
                                html! { <div class="loading">{"Loading goals..."}</div> }
                            } else if goals.state.goals.is_empty() {
                                html! {
                                    <p class="goals-empty">
                                        {"No goals yet. Create your first one to get started."}
                                    </p>
                                }
                            } else {
                                html! {
                                    <div class="goal-grid">
                                        {for goals.state.goals.iter().map(|goal| html! {
                                            <GoalCard
                                                key={goal.id}
                                                goal={goal.clone()}
                                                selected={*selected_goal_id == Some(goal.id)}
                                                on_select={on_select_goal.clone()}
                                                on_status_change={goals.actions.update_status.clone()}
                                                on_edit={on_edit_goal.clone()}
                                                on_delete={on_delete_goal.clone()}
                                            />
                                        })}
                                    </div>
                                }
                            }}

                            {if selected_goal_id.is_some() {
                                html! {
                                    <NotesList
                                        notes={notes.state.notes.clone()}
                                        loading={notes.state.loading}
                                        error={notes.state.error.clone()}
                                        on_add={notes.actions.add_note.clone()}
                                        on_update={notes.actions.update_note.clone()}
                                        on_delete={notes.actions.delete_note.clone()}
                                        on_dismiss_error={notes.actions.dismiss_error.clone()}
                                    />
                                }
                            } else {
                                html! {}
                            }}
                        </div>
                    },

                    Page::Tasks => html! {
                        <div class="tasks-page">
                            <div class="page-heading">
                                <div>
                                    <h2>{"Weekly Tasks"}</h2>
                                    <p class="page-subtitle">
                                        {"Plan and organize your recurring tasks throughout the week"}
                                    </p>
                                </div>
                                <button
                                    class="primary-button"
                                    onclick={{
                                        let show_habit_modal = show_habit_modal.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            show_habit_modal.set(true);
                                        })
                                    }}
                                >
                                    {"New Habit"}
                                </button>
                            </div>

                            {if let Some(message) = week.state.error.as_ref() {
                                html! {
                                    <div class="form-message error" onclick={week.actions.dismiss_error.clone()}>
                                        {message}
                                    </div>
                                }
                            } else {
                                html! {}
                            }}

                            <WeeklyCalendar
                                window={week.state.window}
                                buckets={week.state.buckets.clone()}
                                loading={week.state.loading}
                                today={date_utils::today()}
                                on_previous={week.actions.previous_week.clone()}
                                on_next={week.actions.next_week.clone()}
                                on_today={week.actions.jump_to_today.clone()}
                                on_toggle_task={week.actions.toggle_task.clone()}
                            />

                            <HabitsList
                                habits={habits.state.habits.clone()}
                                loading={habits.state.loading}
                                on_delete={habits.actions.delete_habit.clone()}
                            />
                        </div>
                    },

                    // Handled by the early return above
                    Page::NewGoal => html! {},
                }}
            </main>

            <CreateHabitModal
                is_open={*show_habit_modal}
                user_id={user.id}
                goals={goals.state.goals.clone()}
                api_client={api_client.clone()}
                on_close={on_habit_modal_close}
                on_success={on_habit_created}
            />

            {if let Some(goal) = (*editing_goal).clone() {
                html! {
                    <GoalEditModal
                        key={goal.id}
                        goal={goal.clone()}
                        api_client={api_client.clone()}
                        on_saved={goals.actions.refresh.clone()}
                        on_close={on_edit_close}
                    />
                }
            } else {
                html! {}
            }}
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
