use crate::api::SharedBackend;
use crate::session::ChatSession;
use crate::types::{Rating, RatingError};
use dioxus::prelude::*;

const RATING_TITLE: &str = "Vlerësoni Shërbimin";
const RATING_SUBTITLE: &str =
    "Mendimi juaj është i rëndësishëm për përmirësimin e këshillimit ligjor";
const CONFIRMATION_TITLE: &str = "Faleminderit!";
const CONFIRMATION_BODY: &str = "Vlerësimi juaj na ndihmon të përmirësohemi.";

fn star_class(selected: Option<Rating>, star: Rating) -> &'static str {
    if selected.is_some_and(|chosen| chosen >= star) {
        "star lit"
    } else {
        "star"
    }
}

/// Blocking browser alert, used for input validation.
fn show_alert(message: &str) {
    let script = format!("alert({});", serde_json::Value::from(message));
    let _ = document::eval(&script);
}

fn submit_rating(session: Signal<ChatSession>, backend: SharedBackend) {
    let mut session = session;
    match session.with_mut(|state| state.begin_rating_submit()) {
        Ok(rating) => {
            spawn(async move {
                let result = backend.submit_rating(rating).await;
                session.with_mut(|state| state.finish_rating_submit(result));
            });
        }
        Err(RatingError::NotSelected) => show_alert(&RatingError::NotSelected.to_string()),
        Err(err) => tracing::warn!("rating not submitted: {err}"),
    }
}

#[component]
pub fn RatingPrompt(session: Signal<ChatSession>) -> Element {
    let backend = use_context::<SharedBackend>();
    let mut session = session;
    let (selected, in_flight) = {
        let state = session.read();
        (state.rating(), state.is_rating_in_flight())
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal rating-modal",
                div { class: "modal-header",
                    div { class: "modal-icon", "★" }
                    h3 { class: "modal-title", "{RATING_TITLE}" }
                    p { class: "modal-subtitle", "{RATING_SUBTITLE}" }
                }
                div { class: "modal-body",
                    div { class: "stars",
                        for (star, value) in Rating::all().map(|star| (star, star.value())) {
                            button {
                                key: "{value}",
                                class: star_class(selected, star),
                                r#type: "button",
                                title: "{value}",
                                onclick: move |_| session.with_mut(|state| state.select_rating(star)),
                                "★"
                            }
                        }
                    }
                    if let Some(rating) = selected {
                        div { class: "rating-ack",
                            p { class: "ack-text", "{rating.acknowledgment()}" }
                            p { class: "ack-summary", "{rating.summary()}" }
                        }
                    }
                    div { class: "modal-actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| session.with_mut(|state| state.dismiss_rating()),
                            "Më Vonë"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: in_flight,
                            onclick: move |_| submit_rating(session, backend.clone()),
                            "Dërgo Vlerësimin"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ConfirmationPrompt(session: Signal<ChatSession>) -> Element {
    let mut session = session;
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal confirmation-modal",
                div { class: "modal-icon success", "✓" }
                h3 { class: "modal-title", "{CONFIRMATION_TITLE}" }
                p { class: "modal-subtitle", "{CONFIRMATION_BODY}" }
                button {
                    class: "btn btn-dark",
                    r#type: "button",
                    onclick: move |_| session.with_mut(|state| state.dismiss_confirmation()),
                    "Vazhdo Konsultën"
                }
            }
        }
    }
}
