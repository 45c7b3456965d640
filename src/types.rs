use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the conversation log. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time: Option<OffsetDateTime>,
}

impl Message {
    pub fn user(text: impl Into<String>, time: OffsetDateTime) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            time: Some(time),
        }
    }

    pub fn bot(text: impl Into<String>, time: OffsetDateTime) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            time: Some(time),
        }
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("Please give a rating before submitting.")]
    NotSelected,

    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),

    #[error("a rating submission is already in flight")]
    InFlight,
}

/// A satisfaction score from one to five stars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every star value, lowest first.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    pub fn acknowledgment(self) -> &'static str {
        match self.0 {
            1 => "Na vjen keq për përvojën tuaj",
            2 => "Do të përmirësohemi",
            3 => "Faleminderit për vlerësimin",
            4 => "Jemi të lumtur që ju pëlqeu",
            _ => "Shumë faleminderit për 5 yjet",
        }
    }

    pub fn summary(self) -> String {
        format!("Ju zgjodhët {} yje", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}
