//! Watchlist reconciliation
//!
//! Membership is decided by the string-coerced identity (`id`, else `_id`), so
//! `7` and `"7"` name the same item.

use event_core::{Event, EventId};
use serde::{Deserialize, Serialize};

/// `id ?? _id`
pub fn resolve_id(item: &Event) -> Option<&EventId> {
    item.identity()
}

/// Whether an item with the same identity is already saved
///
/// Items without identity are never considered saved.
pub fn is_watchlisted(list: &[Event], item: &Event) -> bool {
    match item.identity_key() {
        Some(key) => list.iter().any(|w| w.identity_key().as_deref() == Some(key.as_str())),
        None => false,
    }
}

/// Add or remove `item`, returning the new list
///
/// Unidentified items leave the list unchanged. A saved item is removed;
/// otherwise the item is prepended so the most recently saved comes first.
pub fn toggle_watchlist(list: &[Event], item: &Event) -> Vec<Event> {
    let mut watchlist = Watchlist::from(list.to_vec());
    watchlist.toggle(item.clone());
    watchlist.into_inner()
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistChange {
    Added,
    Removed,
    /// Item had no identity
    Ignored,
}

/// Saved items, most recently added first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    items: Vec<Event>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, item: Event) -> WatchlistChange {
        let Some(key) = item.identity_key() else {
            tracing::debug!(title = ?item.title, "ignoring watchlist toggle for item without id");
            return WatchlistChange::Ignored;
        };

        let before = self.items.len();
        self.items
            .retain(|w| w.identity_key().as_deref() != Some(key.as_str()));

        if self.items.len() < before {
            tracing::debug!(id = %key, "removed from watchlist");
            WatchlistChange::Removed
        } else {
            tracing::debug!(id = %key, "added to watchlist");
            self.items.insert(0, item);
            WatchlistChange::Added
        }
    }

    pub fn contains(&self, item: &Event) -> bool {
        is_watchlisted(&self.items, item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<Event> {
        self.items
    }
}

impl From<Vec<Event>> for Watchlist {
    fn from(items: Vec<Event>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(id: &str, title: &str) -> Event {
        let mut e = Event::new(id);
        e.title = Some(title.to_string());
        e
    }

    #[test]
    fn test_toggle_adds_to_front_then_removes() {
        let list = vec![Event::new("a"), Event::new("b")];
        let item = Event::new("c");

        let added = toggle_watchlist(&list, &item);
        let ids: Vec<_> = added.iter().filter_map(|e| e.identity_key()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let removed = toggle_watchlist(&added, &item);
        assert_eq!(removed, list);
    }

    #[test]
    fn test_numeric_and_string_ids_match() {
        let list = vec![Event::new(42i64)];
        let item = Event::new("42");

        assert!(is_watchlisted(&list, &item));
        assert!(toggle_watchlist(&list, &item).is_empty());
    }

    #[test]
    fn test_storage_id_used_when_id_missing() {
        let mut stored = Event::default();
        stored.storage_id = Some(EventId::from("mongo-1"));
        let list = vec![stored.clone()];

        assert_eq!(resolve_id(&stored).map(EventId::key).as_deref(), Some("mongo-1"));
        assert!(is_watchlisted(&list, &Event::new("mongo-1")));
    }

    #[test]
    fn test_unidentified_item_is_ignored() {
        let list = vec![Event::new("a")];
        let orphan = Event {
            title: Some("no id".to_string()),
            ..Default::default()
        };

        assert!(!is_watchlisted(&list, &orphan));
        assert_eq!(toggle_watchlist(&list, &orphan), list);

        let mut watchlist = Watchlist::from(list);
        assert_eq!(watchlist.toggle(orphan), WatchlistChange::Ignored);
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn test_empty_string_id_is_not_an_identity() {
        let list = vec![Event::new("")];
        let item = Event::new("");
        assert!(!is_watchlisted(&list, &item));
        assert_eq!(toggle_watchlist(&list, &item).len(), 1);
    }

    #[test]
    fn test_toggle_is_involution() {
        let list = vec![titled("1", "first"), titled("2", "second")];
        for item in [titled("2", "second"), titled("3", "third")] {
            let once = toggle_watchlist(&list, &item);
            let twice = toggle_watchlist(&once, &item);
            let ids = |l: &[Event]| l.iter().filter_map(|e| e.identity_key()).collect::<Vec<_>>();
            assert_eq!(
                ids(&twice).into_iter().collect::<std::collections::BTreeSet<_>>(),
                ids(&list).into_iter().collect::<std::collections::BTreeSet<_>>()
            );
        }
    }

    #[test]
    fn test_watchlist_newtype() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.is_empty());

        assert_eq!(watchlist.toggle(Event::new("x")), WatchlistChange::Added);
        assert_eq!(watchlist.toggle(Event::new("y")), WatchlistChange::Added);
        assert!(watchlist.contains(&Event::new("x")));
        assert_eq!(watchlist.iter().next().and_then(|e| e.identity_key()).as_deref(), Some("y"));

        assert_eq!(watchlist.toggle(Event::new("x")), WatchlistChange::Removed);
        assert_eq!(watchlist.len(), 1);
        assert_eq!((&watchlist).into_iter().count(), 1);
    }

    #[test]
    fn test_watchlist_serializes_as_plain_array() {
        let watchlist = Watchlist::from(vec![Event::new("a")]);
        let json = serde_json::to_string(&watchlist).unwrap();
        assert_eq!(json, r#"[{"id":"a"}]"#);

        let back: Watchlist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, watchlist);
    }
}
