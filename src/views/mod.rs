pub mod conversation;
pub mod prompts;

pub use conversation::{Composer, ConversationPanel};
pub use prompts::{ConfirmationPrompt, RatingPrompt};
