use shared::Note;
use web_sys::{HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct NotesListProps {
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<String>,
    pub on_add: Callback<String>,
    pub on_update: Callback<(i64, String)>,
    pub on_delete: Callback<i64>,
    pub on_dismiss_error: Callback<MouseEvent>,
}

/// Progress notes for the selected goal, newest first
#[function_component(NotesList)]
pub fn notes_list(props: &NotesListProps) -> Html {
    let new_content = use_state(String::new);
    let editing = use_state(|| None::<(i64, String)>);

    let on_new_content_change = {
        let new_content = new_content.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            new_content.set(input.value());
        })
    };

    let on_add_click = {
        let new_content = new_content.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| {
            if !new_content.trim().is_empty() {
                on_add.emit((*new_content).clone());
                new_content.set(String::new());
            }
        })
    };

    html! {
        <div class="notes-list">
            <h3 class="notes-title">{"Progress Notes"}</h3>

            {if let Some(message) = props.error.as_ref() {
                html! {
                    <div class="form-message error" onclick={props.on_dismiss_error.clone()}>
                        {message}
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="note-add">
                <textarea
                    rows="2"
                    placeholder="What progress did you make?"
                    value={(*new_content).clone()}
                    onchange={on_new_content_change}
                />
                <button
                    class="note-add-button"
                    onclick={on_add_click}
                    disabled={new_content.trim().is_empty()}
                >
                    {"Add Note"}
                </button>
            </div>

            {if props.loading {
                html! { <div class="loading">{"Loading notes..."}</div> }
            } else if props.notes.is_empty() {
                html! { <p class="notes-empty">{"No notes yet. Write your first one!"}</p> }
            } else {
                html! {
                    <ul class="note-items">
                        {for props.notes.iter().map(|note| {
                            let is_editing = editing
                                .as_ref()
                                .map(|(id, _)| *id == note.id)
                                .unwrap_or(false);

                            if is_editing {
                                let content = editing
                                    .as_ref()
                                    .map(|(_, c)| c.clone())
                                    .unwrap_or_default();

                                let on_edit_change = {
                                    let editing = editing.clone();
                                    let note_id = note.id;
                                    Callback::from(move |e: Event| {
                                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                                        editing.set(Some((note_id, input.value())));
                                    })
                                };

                                let on_save = {
                                    let editing = editing.clone();
                                    let on_update = props.on_update.clone();
                                    let note_id = note.id;
                                    Callback::from(move |_: MouseEvent| {
                                        if let Some((_, content)) = &*editing {
                                            if !content.trim().is_empty() {
                                                on_update.emit((note_id, content.clone()));
                                                editing.set(None);
                                            }
                                        }
                                    })
                                };

                                let on_cancel = {
                                    let editing = editing.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        editing.set(None);
                                    })
                                };

                                html! {
                                    <li class="note-item note-item-editing" key={note.id}>
                                        <textarea rows="2" value={content} onchange={on_edit_change} />
                                        <div class="note-item-actions">
                                            <button onclick={on_save}>{"Save"}</button>
                                            <button onclick={on_cancel}>{"Cancel"}</button>
                                        </div>
                                    </li>
                                }
                            } else {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let note_id = note.id;
                                    let content = note.content.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        editing.set(Some((note_id, content.clone())));
                                    })
                                };

                                let on_delete = {
                                    let on_delete = props.on_delete.clone();
                                    let note_id = note.id;
                                    Callback::from(move |_: MouseEvent| {
                                        on_delete.emit(note_id);
                                    })
                                };

                                html! {
                                    <li class="note-item" key={note.id}>
                                        <span class="note-timestamp">
                                            {date_utils::format_timestamp_for_display(&note.created_at)}
                                        </span>
                                        <p class="note-content">{&note.content}</p>
                                        <div class="note-item-actions">
                                            <button onclick={on_edit}>{"Edit"}</button>
                                            <button onclick={on_delete}>{"Delete"}</button>
                                        </div>
                                    </li>
                                }
                            }
                        })}
                    </ul>
                }
            }}
        </div>
    }
}
