use shared::User;
use web_sys::MouseEvent;
use yew::prelude::*;

/// Top-level pages the header can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Tasks,
    NewGoal,
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: User,
    pub active_page: Page,
    pub on_navigate: Callback<Page>,
    pub on_sign_out: Callback<MouseEvent>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav_button = |page: Page, label: &str| -> Html {
        let onclick = {
            let on_navigate = props.on_navigate.clone();
            Callback::from(move |_: MouseEvent| {
                on_navigate.emit(page);
            })
        };
        let class = if props.active_page == page {
            "nav-button nav-button-active"
        } else {
            "nav-button"
        };
        html! {
            <button {class} {onclick}>{label}</button>
        }
    };

    let display_name = props
        .user
        .name
        .clone()
        .unwrap_or_else(|| props.user.username.clone());

    html! {
        <nav class="header">
            <div class="header-left">
                <h1 class="header-brand">{"Mercury"}</h1>
                <div class="header-nav">
                    {nav_button(Page::Dashboard, "Dashboard")}
                    {nav_button(Page::Tasks, "Tasks")}
                </div>
            </div>
            <div class="header-right">
                {if let Some(avatar_url) = props.user.avatar_url.as_ref() {
                    html! { <img class="header-avatar" src={avatar_url.clone()} alt="Profile" /> }
                } else {
                    html! {}
                }}
                <span class="header-username">{display_name}</span>
                <button class="header-sign-out" onclick={props.on_sign_out.clone()}>
                    {"Sign Out"}
                </button>
            </div>
        </nav>
    }
}
