//! Conversation and prompt state for one widget instance.
//!
//! `ChatSession` owns the message log and the visibility flags. Every method
//! is a discrete UI transition; network calls happen outside and their
//! results are fed back through the `finish_*` / `apply_*` methods.

use crate::api::ApiResult;
use crate::types::{Message, Rating, RatingError};
use time::OffsetDateTime;

/// Phrases that open the rating prompt when found in the user's last message.
pub const FAREWELL_TOKENS: &[&str] = &["bye", "goodbye", "see you", "exit"];

pub fn is_farewell(text: &str) -> bool {
    let lowered = text.to_lowercase();
    FAREWELL_TOKENS.iter().any(|token| lowered.contains(token))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    loading: bool,
    rating: Option<Rating>,
    rating_in_flight: bool,
    show_rating: bool,
    show_confirmation: bool,
    minimized: bool,
}

impl ChatSession {
    pub fn new(minimized: bool) -> Self {
        Self {
            minimized,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the send button should accept a click.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn is_rating_visible(&self) -> bool {
        self.show_rating
    }

    pub fn is_rating_in_flight(&self) -> bool {
        self.rating_in_flight
    }

    pub fn is_confirmation_visible(&self) -> bool {
        self.show_confirmation
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Seeds the log with the backend's history. Anything the user already
    /// typed before the history arrived stays after it.
    pub fn apply_history(&mut self, history: ApiResult<Vec<Message>>) {
        match history {
            Ok(history) => {
                tracing::info!(count = history.len(), "loaded conversation history");
                // Messages typed before the history arrived are newer than
                // any of it, so they go after it instead of being dropped.
                let local = std::mem::replace(&mut self.messages, history);
                self.messages.extend(local);
                self.after_messages_changed();
            }
            Err(err) => tracing::error!("error fetching messages: {err}"),
        }
    }

    /// Starts a send from the current input. Returns the text to deliver, or
    /// `None` when the input is blank or a reply is still pending.
    pub fn begin_send(&mut self, now: OffsetDateTime) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        if self.loading {
            tracing::warn!("ignoring submit while a reply is pending");
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.push(Message::user(text.clone(), now));
        self.loading = true;
        tracing::debug!("message send started");
        Some(text)
    }

    /// Completes a send. The pending flag is cleared whatever the outcome.
    pub fn finish_send(&mut self, reply: ApiResult<String>, now: OffsetDateTime) {
        match reply {
            Ok(text) => self.push(Message::bot(text, now)),
            Err(err) => tracing::error!("error sending message: {err}"),
        }
        self.loading = false;
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.after_messages_changed();
    }

    fn after_messages_changed(&mut self) {
        let farewell = self
            .messages
            .last()
            .is_some_and(|last| last.is_from_user() && is_farewell(&last.text));
        if farewell {
            tracing::debug!("farewell detected, opening rating prompt");
            self.show_rating = true;
        }
    }

    pub fn select_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// Acknowledgment line for the current selection.
    pub fn acknowledgment(&self) -> Option<&'static str> {
        self.rating.map(Rating::acknowledgment)
    }

    /// The "later" button: hide the prompt and forget the selection.
    pub fn dismiss_rating(&mut self) {
        self.show_rating = false;
        self.rating = None;
    }

    /// Validates the selection before it is posted.
    pub fn begin_rating_submit(&mut self) -> Result<Rating, RatingError> {
        if self.rating_in_flight {
            return Err(RatingError::InFlight);
        }
        let rating = self.rating.ok_or(RatingError::NotSelected)?;
        self.rating_in_flight = true;
        Ok(rating)
    }

    /// On success the confirmation replaces the prompt. On failure the
    /// prompt stays open with its selection so the user can retry.
    pub fn finish_rating_submit(&mut self, result: ApiResult<()>) {
        self.rating_in_flight = false;
        match result {
            Ok(()) => {
                self.show_confirmation = true;
                self.rating = None;
                self.show_rating = false;
            }
            Err(err) => tracing::error!("error submitting rating: {err}"),
        }
    }

    pub fn dismiss_confirmation(&mut self) {
        self.show_confirmation = false;
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }
}
