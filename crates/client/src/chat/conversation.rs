//! Per-peer conversation state machine.
//!
//! The messaging view drives this model and renders from it; the model
//! itself knows nothing about the UI or the network. A conversation moves
//! through three phases:
//!
//! ```text
//! Idle ──select_peer──▶ RoomResolving ──room_ready──▶ RoomActive
//!   ▲                                                     │
//!   └──────────────── clear / select_peer ────────────────┘
//! ```
//!
//! Messages are kept in arrival order. Confirmed ids are deduplicated on
//! every insertion path, so a race between the send response and the
//! realtime push of the same message leaves exactly one copy.

use chrono::{DateTime, Utc};
use chirp_shared::{ChatMessage, User};

/// How long the "peer is typing" flag stays visible after the most recent
/// typing event.
pub const TYPING_VISIBLE_MS: i64 = 3_000;

/// Prefix marking locally fabricated placeholder ids. Server ids are
/// opaque tokens that never start with this, so the id spaces are
/// disjoint.
const PROVISIONAL_PREFIX: &str = "temp-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    /// No peer selected.
    Idle,
    /// Room lookup/create and history fetch in flight.
    RoomResolving,
    /// Room bound, history loaded, realtime events being merged.
    RoomActive,
}

/// Result of selecting a peer: the room to leave (if any) and the
/// generation token async completions must present to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    pub leave_room: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    phase: ConversationPhase,
    peer: Option<User>,
    room_id: Option<String>,
    messages: Vec<ChatMessage>,
    typing_until: Option<i64>,
    generation: u64,
    send_seq: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            phase: ConversationPhase::Idle,
            peer: None,
            room_id: None,
            messages: Vec::new(),
            typing_until: None,
            generation: 0,
            send_seq: 0,
        }
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn peer(&self) -> Option<&User> {
        self.peer.as_ref()
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Generation token that invalidates in-flight completions whenever
    /// the selection changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Select a peer, tearing down the current room. Valid from any phase.
    pub fn select_peer(&mut self, peer: User) -> SelectOutcome {
        let leave_room = self.room_id.take();
        self.phase = ConversationPhase::RoomResolving;
        self.peer = Some(peer);
        self.messages.clear();
        self.typing_until = None;
        self.generation += 1;
        SelectOutcome {
            leave_room,
            generation: self.generation,
        }
    }

    /// Deselect (peer deselection or view unmount). Returns the room to
    /// leave, if one was active.
    pub fn clear(&mut self) -> Option<String> {
        let leave_room = self.room_id.take();
        self.phase = ConversationPhase::Idle;
        self.peer = None;
        self.messages.clear();
        self.typing_until = None;
        self.generation += 1;
        leave_room
    }

    /// Bind the resolved room and its history. `newest_first` is the
    /// server's ordering; it is reversed into chronological order for
    /// display. Returns `false` (and changes nothing) when the completion
    /// is stale, i.e. the peer changed while the lookup was in flight.
    pub fn room_ready(
        &mut self,
        generation: u64,
        room_id: String,
        newest_first: Vec<ChatMessage>,
    ) -> bool {
        if generation != self.generation || self.phase != ConversationPhase::RoomResolving {
            return false;
        }
        self.room_id = Some(room_id);
        self.messages = newest_first;
        self.messages.reverse();
        self.phase = ConversationPhase::RoomActive;
        true
    }

    /// Merge a realtime message push. Accepted only while `RoomActive` and
    /// only when the message involves the selected peer; duplicates (by
    /// id) are dropped. Returns whether the message was appended.
    pub fn accept_push(&mut self, message: &ChatMessage) -> bool {
        if self.phase != ConversationPhase::RoomActive {
            return false;
        }
        let Some(peer) = self.peer.as_ref() else {
            return false;
        };
        if message.sender_id != peer.id && message.receiver_id != peer.id {
            return false;
        }
        if self.messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.messages.push(message.clone());
        true
    }

    /// Append a provisional entry for an outgoing message. Returns the
    /// placeholder (with its temporary id) or `None` when no room is
    /// active.
    pub fn begin_send(
        &mut self,
        self_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Option<ChatMessage> {
        if self.phase != ConversationPhase::RoomActive {
            return None;
        }
        let peer = self.peer.as_ref()?;
        self.send_seq += 1;
        let provisional = ChatMessage {
            id: format!("{PROVISIONAL_PREFIX}{}-{}", now.timestamp_millis(), self.send_seq),
            sender_id: self_id.to_string(),
            receiver_id: peer.id.clone(),
            content: content.to_string(),
            created_at: now,
        };
        self.messages.push(provisional.clone());
        Some(provisional)
    }

    /// Reconcile a successful send: drop the placeholder and insert the
    /// confirmed message unless the realtime push already delivered it.
    pub fn confirm_send(&mut self, provisional_id: &str, confirmed: ChatMessage) {
        self.messages.retain(|m| m.id != provisional_id);
        if self.phase != ConversationPhase::RoomActive {
            return;
        }
        if self.messages.iter().any(|m| m.id == confirmed.id) {
            return;
        }
        self.messages.push(confirmed);
    }

    /// Reconcile a failed send: the placeholder disappears, nothing else
    /// changes.
    pub fn fail_send(&mut self, provisional_id: &str) {
        self.messages.retain(|m| m.id != provisional_id);
    }

    /// Whether `id` names a provisional (not yet confirmed) entry.
    pub fn is_provisional(id: &str) -> bool {
        id.starts_with(PROVISIONAL_PREFIX)
    }

    /// Note a typing event. Accepted only for the active room and only
    /// from a user other than self; each accepted event pushes the
    /// visibility deadline to `now + TYPING_VISIBLE_MS`.
    pub fn note_typing(&mut self, room_id: &str, user_id: &str, self_id: &str, now_ms: i64) -> bool {
        if user_id == self_id {
            return false;
        }
        if self.room_id.as_deref() != Some(room_id) {
            return false;
        }
        self.typing_until = Some(now_ms + TYPING_VISIBLE_MS);
        true
    }

    /// Whether the "peer is typing" flag is visible at `now_ms`.
    pub fn typing_visible(&self, now_ms: i64) -> bool {
        self.typing_until.is_some_and(|until| now_ms < until)
    }

    /// Drop an expired typing deadline. Returns `true` when the flag was
    /// cleared (callers use this to trigger a re-render).
    pub fn refresh_typing(&mut self, now_ms: i64) -> bool {
        match self.typing_until {
            Some(until) if now_ms >= until => {
                self.typing_until = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(id: &str) -> User {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "username": "{id}", "email": "{id}@example.com",
                "firstName": "", "lastName": "", "avatar": null}}"#
        ))
        .unwrap()
    }

    fn message(id: &str, sender: &str, receiver: &str, content: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 11, 4, 10, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 4, 12, 0, 0).unwrap()
    }

    fn active_conversation(peer_id: &str, room_id: &str) -> Conversation {
        let mut conv = Conversation::new();
        let outcome = conv.select_peer(user(peer_id));
        assert!(conv.room_ready(outcome.generation, room_id.to_string(), Vec::new()));
        conv
    }

    #[test]
    fn selecting_a_second_peer_tears_down_the_first_room() {
        let mut conv = active_conversation("alice", "room-a");
        let outcome = conv.select_peer(user("bob"));
        assert_eq!(outcome.leave_room.as_deref(), Some("room-a"));
        assert_eq!(conv.phase(), ConversationPhase::RoomResolving);
        assert!(conv.messages().is_empty());
    }

    #[test]
    fn stale_room_resolution_is_discarded() {
        let mut conv = Conversation::new();
        let first = conv.select_peer(user("alice"));
        // Peer changes while the first lookup is still in flight.
        let second = conv.select_peer(user("bob"));
        assert!(!conv.room_ready(first.generation, "room-a".into(), Vec::new()));
        assert_eq!(conv.room_id(), None);
        assert!(conv.room_ready(second.generation, "room-b".into(), Vec::new()));
        assert_eq!(conv.room_id(), Some("room-b"));
    }

    #[test]
    fn history_is_reversed_into_chronological_order() {
        let mut conv = Conversation::new();
        let outcome = conv.select_peer(user("alice"));
        let newest_first = vec![
            message("m3", "alice", "me", "third"),
            message("m2", "me", "alice", "second"),
            message("m1", "alice", "me", "first"),
        ];
        assert!(conv.room_ready(outcome.generation, "room-a".into(), newest_first));
        let ids: Vec<&str> = conv.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1", "m2", "m3"]);
    }

    #[test]
    fn push_for_other_conversations_is_filtered_out() {
        let mut conv = active_conversation("alice", "room-a");
        assert!(conv.accept_push(&message("m1", "alice", "me", "hi")));
        assert!(conv.accept_push(&message("m2", "me", "alice", "hello")));
        // Neither side of this message is the selected peer.
        assert!(!conv.accept_push(&message("m3", "carol", "me", "psst")));
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn duplicate_push_is_a_no_op() {
        let mut conv = active_conversation("alice", "room-a");
        let msg = message("m1", "alice", "me", "hi");
        assert!(conv.accept_push(&msg));
        assert!(!conv.accept_push(&msg));
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn send_inserts_exactly_one_provisional_entry() {
        let mut conv = active_conversation("alice", "room-a");
        let provisional = conv.begin_send("me", "hello", now()).unwrap();
        assert!(Conversation::is_provisional(&provisional.id));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].content, "hello");
    }

    #[test]
    fn successful_send_leaves_exactly_one_confirmed_entry() {
        let mut conv = active_conversation("alice", "room-a");
        let provisional = conv.begin_send("me", "hello", now()).unwrap();
        conv.confirm_send(&provisional.id, message("m1", "me", "alice", "hello"));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].id, "m1");
    }

    #[test]
    fn send_confirmation_races_with_realtime_push() {
        let mut conv = active_conversation("alice", "room-a");
        let provisional = conv.begin_send("me", "hello", now()).unwrap();
        // The push of our own message beats the request response.
        assert!(conv.accept_push(&message("m1", "me", "alice", "hello")));
        conv.confirm_send(&provisional.id, message("m1", "me", "alice", "hello"));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].id, "m1");
    }

    #[test]
    fn failed_send_removes_the_placeholder() {
        let mut conv = active_conversation("alice", "room-a");
        let provisional = conv.begin_send("me", "hello", now()).unwrap();
        conv.fail_send(&provisional.id);
        assert!(conv.messages().is_empty());
    }

    #[test]
    fn provisional_ids_are_unique_even_within_one_millisecond() {
        let mut conv = active_conversation("alice", "room-a");
        let a = conv.begin_send("me", "one", now()).unwrap();
        let b = conv.begin_send("me", "two", now()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn begin_send_requires_an_active_room() {
        let mut conv = Conversation::new();
        assert!(conv.begin_send("me", "hello", now()).is_none());
        conv.select_peer(user("alice"));
        assert!(conv.begin_send("me", "hello", now()).is_none());
    }

    #[test]
    fn typing_flag_clears_after_the_deadline() {
        let mut conv = active_conversation("alice", "room-a");
        assert!(conv.note_typing("room-a", "alice", "me", 1_000));
        assert!(conv.typing_visible(1_000 + TYPING_VISIBLE_MS - 1));
        assert!(!conv.typing_visible(1_000 + TYPING_VISIBLE_MS));
    }

    #[test]
    fn typing_deadline_extends_from_the_most_recent_event() {
        let mut conv = active_conversation("alice", "room-a");
        assert!(conv.note_typing("room-a", "alice", "me", 1_000));
        assert!(conv.note_typing("room-a", "alice", "me", 2_500));
        // Visible past the first event's deadline...
        assert!(conv.typing_visible(1_000 + TYPING_VISIBLE_MS));
        // ...and cleared TYPING_VISIBLE_MS after the second.
        assert!(!conv.typing_visible(2_500 + TYPING_VISIBLE_MS));
    }

    #[test]
    fn typing_from_self_or_other_rooms_is_ignored() {
        let mut conv = active_conversation("alice", "room-a");
        assert!(!conv.note_typing("room-a", "me", "me", 1_000));
        assert!(!conv.note_typing("room-b", "alice", "me", 1_000));
        assert!(!conv.typing_visible(1_001));
    }

    #[test]
    fn refresh_typing_reports_the_transition_once() {
        let mut conv = active_conversation("alice", "room-a");
        conv.note_typing("room-a", "alice", "me", 1_000);
        assert!(!conv.refresh_typing(1_500));
        assert!(conv.refresh_typing(1_000 + TYPING_VISIBLE_MS));
        assert!(!conv.refresh_typing(10_000));
    }

    #[test]
    fn clear_returns_the_room_to_leave() {
        let mut conv = active_conversation("alice", "room-a");
        assert_eq!(conv.clear().as_deref(), Some("room-a"));
        assert_eq!(conv.phase(), ConversationPhase::Idle);
        assert_eq!(conv.clear(), None);
    }

    #[test]
    fn empty_history_yields_an_empty_active_room() {
        // A first conversation with a newly created room shows no
        // messages, not an error.
        let conv = active_conversation("alice", "room-new");
        assert_eq!(conv.phase(), ConversationPhase::RoomActive);
        assert!(conv.messages().is_empty());
    }
}
