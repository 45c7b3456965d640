use crate::api::{HttpBackend, SharedBackend};
use crate::config::WidgetConfig;
use crate::session::ChatSession;
use crate::views::{Composer, ConfirmationPrompt, ConversationPanel, RatingPrompt};
use dioxus::prelude::*;
use std::sync::Arc;

const WIDGET_CSS: Asset = asset!("/assets/widget.css");

const ADVISOR_TITLE: &str = "Këshilltar Ligjor";
const ADVISOR_STATUS: &str = "Aktiv • I Sigurt • Konfidencial";

#[component]
pub fn App() -> Element {
    let config = use_hook(WidgetConfig::from_env);
    rsx! {
        document::Link { rel: "stylesheet", href: WIDGET_CSS }
        ChatWidget { config }
    }
}

#[component]
pub fn ChatWidget(config: WidgetConfig) -> Element {
    let backend = use_context_provider(|| -> SharedBackend {
        Arc::new(HttpBackend::from_config(&config))
    });
    let session = use_signal(|| ChatSession::new(config.start_minimized));

    use_history_seed(session, backend);

    let (minimized, show_rating, show_confirmation) = {
        let state = session.read();
        (
            state.is_minimized(),
            state.is_rating_visible(),
            state.is_confirmation_visible(),
        )
    };

    if minimized {
        return rsx! { Launcher { session } };
    }

    rsx! {
        div { class: "chat-widget",
            WidgetHeader { session }
            ConversationPanel { session }
            Composer { session }
        }
        if show_rating {
            RatingPrompt { session }
        }
        if show_confirmation {
            ConfirmationPrompt { session }
        }
    }
}

/// Loads prior messages once, when the widget mounts.
fn use_history_seed(session: Signal<ChatSession>, backend: SharedBackend) {
    use_future(move || {
        let backend = backend.clone();
        let mut session = session;
        async move {
            let history = backend.fetch_messages().await;
            session.with_mut(|state| state.apply_history(history));
        }
    });
}

#[component]
fn WidgetHeader(session: Signal<ChatSession>) -> Element {
    let mut session = session;
    rsx! {
        div { class: "widget-header",
            div { class: "header-identity",
                div { class: "header-avatar",
                    span { class: "avatar-mark", "⚖" }
                    span { class: "online-dot" }
                }
                div {
                    h3 { class: "header-title", "{ADVISOR_TITLE}" }
                    p { class: "header-status", "{ADVISOR_STATUS}" }
                }
            }
            button {
                class: "header-btn",
                r#type: "button",
                title: "Minimizo",
                onclick: move |_| session.with_mut(|state| state.set_minimized(true)),
                "–"
            }
        }
    }
}

#[component]
fn Launcher(session: Signal<ChatSession>) -> Element {
    let mut session = session;
    rsx! {
        div { class: "launcher-wrap",
            button {
                class: "launcher",
                r#type: "button",
                title: "{ADVISOR_TITLE}",
                onclick: move |_| session.with_mut(|state| state.set_minimized(false)),
                span { class: "launcher-icon", "💬" }
                span { class: "launcher-badge" }
            }
        }
    }
}
