//! Direct-messaging domain logic.

pub mod conversation;

pub use conversation::{Conversation, ConversationPhase, SelectOutcome, TYPING_VISIBLE_MS};
