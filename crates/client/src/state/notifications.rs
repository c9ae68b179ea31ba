//! Notification state shared between the sidebar badge and the
//! notifications view.

use chirp_shared::Notification;
use dioxus::prelude::*;

/// Injectable notification store.
#[derive(Clone, Copy)]
pub struct NotificationState {
    pub items: Signal<Vec<Notification>>,
    /// Whether an initial fetch has completed.
    pub loaded: Signal<bool>,
}

/// Provider component for [`NotificationState`].
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let items = use_signal(Vec::new);
    let loaded = use_signal(|| false);
    use_context_provider(|| NotificationState { items, loaded });
    children
}

impl NotificationState {
    /// Replace the list with a fresh server response.
    pub fn set_all(&mut self, notifications: Vec<Notification>) {
        self.items.set(notifications);
        self.loaded.set(true);
    }

    pub fn unread_count(&self) -> usize {
        count_unread(&self.items.read())
    }

    /// Local patch after the mark-one-read request succeeded.
    pub fn mark_read(&mut self, notification_id: &str) {
        mark_read_in(&mut self.items.write(), notification_id);
    }

    /// Local patch after the mark-all-read request succeeded.
    pub fn mark_all_read(&mut self) {
        for notification in self.items.write().iter_mut() {
            notification.is_read = true;
        }
    }

    /// Drop everything (logout).
    pub fn clear(&mut self) {
        self.items.write().clear();
        self.loaded.set(false);
    }
}

fn count_unread(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.is_read).count()
}

fn mark_read_in(items: &mut [Notification], notification_id: &str) {
    if let Some(notification) = items.iter_mut().find(|n| n.id == notification_id) {
        notification.is_read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chirp_shared::NotificationKind;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            user_id: "me".into(),
            actor_id: "them".into(),
            post_id: None,
            comment_id: None,
            kind: NotificationKind::NewFollower,
            title: String::new(),
            body: String::new(),
            is_read,
            created_at: Utc.with_ymd_and_hms(2025, 11, 4, 10, 0, 0).unwrap(),
            actor: None,
        }
    }

    #[test]
    fn unread_count_ignores_read_items() {
        let items = vec![
            notification("a", false),
            notification("b", true),
            notification("c", false),
        ];
        assert_eq!(count_unread(&items), 2);
    }

    #[test]
    fn mark_read_targets_one_item() {
        let mut items = vec![notification("a", false), notification("b", false)];
        mark_read_in(&mut items, "a");
        assert!(items[0].is_read);
        assert!(!items[1].is_read);
        // Unknown ids change nothing.
        mark_read_in(&mut items, "zzz");
        assert_eq!(count_unread(&items), 1);
    }
}
