//! Conversation flow tests
//!
//! Drives `ChatSession` through the same steps the widget takes, against a
//! scripted backend that records every call.

use async_trait::async_trait;
use chat_widget::api::{ApiError, ApiResult, ChatBackend, SharedBackend};
use chat_widget::session::ChatSession;
use chat_widget::types::{Message, Rating, RatingError, Sender};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

#[derive(Default)]
struct ScriptedBackend {
    history: Mutex<Vec<Message>>,
    replies: Mutex<VecDeque<ApiResult<String>>>,
    sent: Mutex<Vec<String>>,
    ratings: Mutex<Vec<u8>>,
}

impl ScriptedBackend {
    fn with_replies(replies: Vec<ApiResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn ratings(&self) -> Vec<u8> {
        self.ratings.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn fetch_messages(&self) -> ApiResult<Vec<Message>> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn send_message(&self, text: &str) -> ApiResult<String> {
        self.sent.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn submit_rating(&self, rating: Rating) -> ApiResult<()> {
        self.ratings.lock().unwrap().push(rating.value());
        Ok(())
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: reqwest::StatusCode::BAD_GATEWAY,
        body: String::new(),
    }
}

/// One composer submission, the way the view performs it.
async fn submit(session: &mut ChatSession, backend: &SharedBackend, text: &str) {
    session.set_input(text);
    if let Some(outgoing) = session.begin_send(OffsetDateTime::now_utc()) {
        let reply = backend.send_message(&outgoing).await;
        session.finish_send(reply, OffsetDateTime::now_utc());
    }
}

/// One press of the rating submit button.
async fn press_submit_rating(
    session: &mut ChatSession,
    backend: &SharedBackend,
) -> Result<(), RatingError> {
    let rating = session.begin_rating_submit()?;
    let result = backend.submit_rating(rating).await;
    session.finish_rating_submit(result);
    Ok(())
}

fn transcript(session: &ChatSession) -> Vec<(Sender, &str)> {
    session
        .messages()
        .iter()
        .map(|msg| (msg.sender, msg.text.as_str()))
        .collect()
}

mod conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_greeting_yields_user_then_bot_message() {
        let scripted = ScriptedBackend::with_replies(vec![Ok("Hello, how can I help?".into())]);
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        submit(&mut session, &backend, "Hi").await;

        assert_eq!(
            transcript(&session),
            vec![
                (Sender::User, "Hi"),
                (Sender::Bot, "Hello, how can I help?")
            ]
        );
        assert!(!session.is_loading());
        assert!(!session.is_rating_visible());
        assert_eq!(scripted.sent(), vec!["Hi".to_string()]);
    }

    #[tokio::test]
    async fn test_messages_keep_creation_order_across_sends() {
        let scripted = ScriptedBackend::with_replies(vec![
            Ok("one".into()),
            Err(server_error()),
            Ok("three".into()),
        ]);
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        for text in ["a", "b", "c"] {
            submit(&mut session, &backend, text).await;
        }

        assert_eq!(
            transcript(&session),
            vec![
                (Sender::User, "a"),
                (Sender::Bot, "one"),
                (Sender::User, "b"),
                (Sender::User, "c"),
                (Sender::Bot, "three"),
            ]
        );
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_blank_submission_never_reaches_backend() {
        let scripted = ScriptedBackend::with_replies(Vec::new());
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        submit(&mut session, &backend, "   ").await;

        assert!(session.messages().is_empty());
        assert!(scripted.sent().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_history_can_open_rating_prompt() {
        let scripted = ScriptedBackend::with_replies(Vec::new());
        scripted
            .history
            .lock()
            .unwrap()
            .push(Message::user("Goodbye", OffsetDateTime::UNIX_EPOCH));
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        session.apply_history(backend.fetch_messages().await);

        assert_eq!(session.messages().len(), 1);
        assert!(session.is_rating_visible());
    }
}

mod rating_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_goodbye_rating_and_confirmation() {
        let scripted = ScriptedBackend::with_replies(vec![Ok("Mirupafshim!".into())]);
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        session.set_input("Goodbye");
        session
            .begin_send(OffsetDateTime::now_utc())
            .expect("send starts");
        assert!(session.is_rating_visible());

        session.select_rating(Rating::new(4).unwrap());
        assert_eq!(session.acknowledgment(), Some("Jemi të lumtur që ju pëlqeu"));

        press_submit_rating(&mut session, &backend)
            .await
            .expect("rating selected");

        assert!(session.is_confirmation_visible());
        assert!(!session.is_rating_visible());
        assert_eq!(session.rating(), None);
        assert_eq!(scripted.ratings(), vec![4]);
    }

    #[tokio::test]
    async fn test_submit_without_selection_skips_endpoint() {
        let scripted = ScriptedBackend::with_replies(vec![Ok("bye!".into())]);
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        submit(&mut session, &backend, "see you").await;
        let outcome = press_submit_rating(&mut session, &backend).await;

        assert_eq!(outcome, Err(RatingError::NotSelected));
        assert!(scripted.ratings().is_empty());
        assert!(session.is_rating_visible());
        assert!(!session.is_confirmation_visible());
    }

    #[test]
    fn test_each_star_maps_to_its_own_acknowledgment() {
        let expected = [
            (1, "Na vjen keq për përvojën tuaj"),
            (2, "Do të përmirësohemi"),
            (3, "Faleminderit për vlerësimin"),
            (4, "Jemi të lumtur që ju pëlqeu"),
            (5, "Shumë faleminderit për 5 yjet"),
        ];
        let mut session = ChatSession::default();
        for (value, text) in expected {
            session.select_rating(Rating::new(value).unwrap());
            assert_eq!(session.acknowledgment(), Some(text));
        }
    }

    #[tokio::test]
    async fn test_later_then_new_farewell_reopens_prompt() {
        let scripted = ScriptedBackend::with_replies(vec![Ok("ok".into()), Ok("ok".into())]);
        let backend: SharedBackend = scripted.clone();
        let mut session = ChatSession::default();

        session.set_input("exit");
        session.begin_send(OffsetDateTime::now_utc());
        session.select_rating(Rating::new(3).unwrap());
        session.dismiss_rating();
        assert!(!session.is_rating_visible());
        session.finish_send(Ok("ok".into()), OffsetDateTime::now_utc());

        submit(&mut session, &backend, "BYE").await;
        // the bot reply is now last, but the prompt stays open until dismissed
        assert!(session.is_rating_visible());
        assert_eq!(session.rating(), None);
    }
}
