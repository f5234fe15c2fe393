use shared::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Identity handed over by the OAuth provider after sign-in.
/// The provider flow itself is outside this app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub provider: String,
    pub provider_id: String,
}

/// Session context passed explicitly to components that need identity,
/// rather than ambient global state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

/// Resolve the injected session to a backend user record. A missing session
/// resolves straight to Unauthenticated without a collaborator call.
#[hook]
pub fn use_session(api_client: &ApiClient, session: &Option<AuthSession>) -> SessionState {
    let state = use_state(SessionState::default);

    use_effect_with(session.clone(), {
        let api_client = api_client.clone();
        let state = state.clone();

        move |session: &Option<AuthSession>| {
            let api_client = api_client.clone();
            let state = state.clone();

            let Some(session) = session.clone() else {
                state.set(SessionState::Unauthenticated);
                return;
            };

            spawn_local(async move {
                state.set(SessionState::Loading);

                match api_client
                    .get_user_by_provider(&session.provider, &session.provider_id)
                    .await
                {
                    Ok(Some(user)) => {
                        state.set(SessionState::Authenticated(user));
                    }
                    Ok(None) => {
                        state.set(SessionState::Unauthenticated);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to resolve session user:", e);
                        state.set(SessionState::Unauthenticated);
                    }
                }
            });
        }
    });

    (*state).clone()
}
