use crate::api::SharedBackend;
use crate::session::ChatSession;
use crate::types::{Message, Sender};
use dioxus::events::{Key, Modifiers};
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

const CHAT_END_ID: &str = "chat-end";
const SCROLL_TO_END_JS: &str = r#"document.getElementById("chat-end")?.scrollIntoView({ behavior: "smooth", block: "nearest", inline: "nearest" });"#;

const WELCOME_TITLE: &str = "Mirësevini në Këshilltarin Ligjor";
const WELCOME_BODY: &str = "Jam këtu për t'ju ndihmuar me çështje ligjore të biznesit, detyrime tatimore, procedura administrative dhe të drejtat tuaja.";
const TYPING_LABEL: &str = "Duke analizuar...";
const COMPOSER_PLACEHOLDER: &str = "Shkruani pyetjen tuaj ligjore këtu...";
const COMPOSER_NOTE: &str = "Komunikimi juaj është i enkriptuar dhe konfidencial";

pub fn format_message_time(time: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = time?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

/// Enter sends; Shift+Enter is left to the input.
fn submits_on_key(key: &Key, modifiers: Modifiers) -> bool {
    *key == Key::Enter && !modifiers.shift()
}

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    }
}

#[component]
pub fn ConversationPanel(session: Signal<ChatSession>) -> Element {
    let scroll_key = use_memo(move || {
        let state = session.read();
        (state.messages().len(), state.is_loading())
    });
    use_effect(move || {
        let (count, loading) = scroll_key();
        tracing::trace!(count, loading, "scrolling to newest message");
        let _ = document::eval(SCROLL_TO_END_JS);
    });

    let (messages, loading) = {
        let state = session.read();
        (state.messages().to_vec(), state.is_loading())
    };

    rsx! {
        div { class: "chat-list",
            if messages.is_empty() {
                WelcomePanel {}
            }
            for (i, msg) in messages.into_iter().enumerate() {
                MessageRow { key: "{i}", message: msg }
            }
            if loading {
                TypingIndicator {}
            }
            div { id: CHAT_END_ID }
        }
    }
}

#[component]
fn MessageRow(message: Message) -> Element {
    let side = sender_class(message.sender);
    rsx! {
        div { class: format_args!("message-row {}", side),
            if message.sender == Sender::Bot {
                div { class: "avatar bot", "⚖" }
            }
            div { class: "message-stack",
                div { class: format_args!("bubble {}", side), "{message.text}" }
                if let Some(ts) = format_message_time(message.time) {
                    span { class: format_args!("message-time {}", side), "{ts}" }
                }
            }
        }
    }
}

#[component]
fn WelcomePanel() -> Element {
    rsx! {
        div { class: "welcome",
            div { class: "welcome-icon", "⚖" }
            h4 { class: "welcome-title", "{WELCOME_TITLE}" }
            p { class: "welcome-body", "{WELCOME_BODY}" }
            div { class: "welcome-tags",
                span { "Konfidencial" }
                span { "I Certifikuar" }
            }
        }
    }
}

#[component]
fn TypingIndicator() -> Element {
    rsx! {
        div { class: "message-row bot typing",
            div { class: "avatar bot", "⚖" }
            div { class: "bubble bot",
                span { class: "typing-dots",
                    span { class: "dot" }
                    span { class: "dot" }
                    span { class: "dot" }
                }
                span { class: "typing-label", "{TYPING_LABEL}" }
            }
        }
    }
}

/// Starts a send from the composer's current text, if the session allows it.
fn submit_message(session: Signal<ChatSession>, backend: SharedBackend) {
    let mut session = session;
    let Some(text) = session.with_mut(|state| state.begin_send(OffsetDateTime::now_utc())) else {
        return;
    };
    spawn(async move {
        let reply = backend.send_message(&text).await;
        session.with_mut(|state| state.finish_send(reply, OffsetDateTime::now_utc()));
    });
}

#[component]
pub fn Composer(session: Signal<ChatSession>) -> Element {
    let backend = use_context::<SharedBackend>();
    let key_backend = backend.clone();
    let mut draft_session = session;

    let (draft, can_send) = {
        let state = session.read();
        (state.input().to_string(), state.can_send())
    };

    rsx! {
        div { class: "composer",
            div { class: "composer-inner",
                input {
                    r#type: "text",
                    value: "{draft}",
                    placeholder: COMPOSER_PLACEHOLDER,
                    oninput: move |ev| draft_session.with_mut(|state| state.set_input(ev.value())),
                    onkeydown: move |ev| {
                        if submits_on_key(&ev.key(), ev.modifiers()) {
                            ev.prevent_default();
                            submit_message(session, key_backend.clone());
                        }
                    },
                }
                button {
                    class: "send-btn",
                    r#type: "button",
                    title: "Dërgo",
                    disabled: !can_send,
                    onclick: move |_| submit_message(session, backend.clone()),
                    "➤"
                }
            }
            div { class: "composer-note", "{COMPOSER_NOTE}" }
        }
    }
}
