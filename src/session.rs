//! Session state shared across commands.
//!
//! Three concerns live here, all process-lifetime and keyed by Discord ids:
//! completed `get` sessions per user, the most recent search results per
//! channel (what `!message` consumes), and the set of interactive dialogs in
//! flight. Dialog activity is scoped per (user, channel) and released through
//! an RAII guard so no exit path can leak a stuck dialog.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serenity::model::id::{ChannelId, UserId};
use tokio::sync::mpsc;

use crate::yelp::BusinessRecord;

/// Everything a completed `get` dialog collected. A second completed dialog
/// replaces the previous session wholesale.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub business_type: String,
    pub zipcode: String,
    /// (question, answer) pairs in the order they were asked.
    pub answers: Vec<(String, String)>,
}

type DialogKey = (UserId, ChannelId);

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, UserSession>>,
    last_results: Mutex<HashMap<ChannelId, Vec<BusinessRecord>>>,
    active_dialogs: Arc<Mutex<HashSet<DialogKey>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_session(&self, user: UserId, session: UserSession) {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .insert(user, session);
    }

    pub fn session(&self, user: UserId) -> Option<UserSession> {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .get(&user)
            .cloned()
    }

    /// Remember the records behind the most recent rendered listing in a
    /// channel so `!message` can reuse them instead of scraping chat output.
    pub fn store_results(&self, channel: ChannelId, records: Vec<BusinessRecord>) {
        self.last_results
            .lock()
            .expect("results map poisoned")
            .insert(channel, records);
    }

    pub fn results(&self, channel: ChannelId) -> Option<Vec<BusinessRecord>> {
        self.last_results
            .lock()
            .expect("results map poisoned")
            .get(&channel)
            .cloned()
    }

    /// Try to mark a dialog active for (user, channel). Returns `None` when
    /// one is already running for that key; otherwise the returned guard
    /// holds the slot until dropped.
    pub fn begin_dialog(&self, user: UserId, channel: ChannelId) -> Option<DialogGuard> {
        let mut active = self.active_dialogs.lock().expect("dialog set poisoned");
        if !active.insert((user, channel)) {
            return None;
        }
        Some(DialogGuard {
            key: (user, channel),
            set: Arc::clone(&self.active_dialogs),
        })
    }

    /// Whether any user's dialog is running in this channel. The ambient
    /// responder stays silent while one is, so it cannot race the dialog's
    /// own prompts.
    pub fn dialog_active_in_channel(&self, channel: ChannelId) -> bool {
        self.active_dialogs
            .lock()
            .expect("dialog set poisoned")
            .iter()
            .any(|(_, c)| *c == channel)
    }
}

/// Releases the dialog slot on drop; success, rejection, timeout, and panic
/// paths all funnel through here.
pub struct DialogGuard {
    key: DialogKey,
    set: Arc<Mutex<HashSet<DialogKey>>>,
}

impl Drop for DialogGuard {
    fn drop(&mut self) {
        if let Ok(mut active) = self.set.lock() {
            active.remove(&self.key);
        }
    }
}

/// Bounded wait-for-reply primitive.
///
/// A dialog registers interest in the next message from (author, channel);
/// the event handler offers every inbound non-command message here first and
/// drops it from normal processing when a waiter consumes it.
#[derive(Default)]
pub struct ReplyRouter {
    waiters: Mutex<HashMap<DialogKey, mpsc::UnboundedSender<String>>>,
}

impl ReplyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an inbound message to a registered waiter. Returns true when it
    /// was consumed.
    pub fn offer(&self, author: UserId, channel: ChannelId, content: &str) -> bool {
        let waiters = self.waiters.lock().expect("waiter map poisoned");
        match waiters.get(&(author, channel)) {
            Some(tx) => tx.send(content.to_string()).is_ok(),
            None => false,
        }
    }

    /// Wait up to `timeout` for the next message from (author, channel).
    /// `Err(Elapsed)` is the timeout variant; the registration is removed on
    /// every path.
    pub async fn wait_for_reply(
        &self,
        author: UserId,
        channel: ChannelId,
        timeout: Duration,
    ) -> Result<String, tokio::time::error::Elapsed> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut waiters = self.waiters.lock().expect("waiter map poisoned");
            waiters.insert((author, channel), tx);
        }

        let result = tokio::time::timeout(timeout, rx.recv()).await;

        {
            let mut waiters = self.waiters.lock().expect("waiter map poisoned");
            waiters.remove(&(author, channel));
        }

        match result {
            Ok(Some(content)) => Ok(content),
            // Sender dropped without a message (a newer registration for the
            // same key displaced ours); report it as a timeout.
            Ok(None) => Err(expired().await),
            Err(elapsed) => Err(elapsed),
        }
    }
}

// tokio's Elapsed has no public constructor; manufacture one from an
// already-expired timeout.
async fn expired() -> tokio::time::error::Elapsed {
    tokio::time::timeout(Duration::from_millis(0), std::future::pending::<()>())
        .await
        .expect_err("zero-length timeout always elapses")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(n: u64) -> UserId {
        UserId::new(n)
    }

    fn channel(n: u64) -> ChannelId {
        ChannelId::new(n)
    }

    #[test]
    fn second_dialog_for_same_key_is_refused() {
        let store = SessionStore::new();
        let guard = store.begin_dialog(user(1), channel(10));
        assert!(guard.is_some());
        assert!(store.begin_dialog(user(1), channel(10)).is_none());
        // Different user or channel is fine.
        assert!(store.begin_dialog(user(2), channel(10)).is_some());
        assert!(store.begin_dialog(user(1), channel(11)).is_some());
    }

    #[test]
    fn dropping_the_guard_releases_the_slot() {
        let store = SessionStore::new();
        {
            let _guard = store.begin_dialog(user(1), channel(10)).unwrap();
            assert!(store.dialog_active_in_channel(channel(10)));
        }
        assert!(!store.dialog_active_in_channel(channel(10)));
        assert!(store.begin_dialog(user(1), channel(10)).is_some());
    }

    #[test]
    fn completed_session_replaces_previous() {
        let store = SessionStore::new();
        store.store_session(
            user(1),
            UserSession {
                business_type: "dentist".into(),
                zipcode: "94107".into(),
                answers: vec![],
            },
        );
        store.store_session(
            user(1),
            UserSession {
                business_type: "movers".into(),
                zipcode: "90210".into(),
                answers: vec![("When?".into(), "June".into())],
            },
        );
        let session = store.session(user(1)).unwrap();
        assert_eq!(session.business_type, "movers");
        assert_eq!(session.zipcode, "90210");
        assert_eq!(session.answers.len(), 1);
    }

    #[tokio::test]
    async fn offered_message_reaches_the_waiter() {
        let router = Arc::new(ReplyRouter::new());
        let r = Arc::clone(&router);
        let waiter = tokio::spawn(async move {
            r.wait_for_reply(user(1), channel(10), Duration::from_secs(5))
                .await
        });
        // Give the waiter a moment to register.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(router.offer(user(1), channel(10), "94107"));
        assert_eq!(waiter.await.unwrap().unwrap(), "94107");
    }

    #[tokio::test]
    async fn unmatched_offer_is_not_consumed() {
        let router = ReplyRouter::new();
        assert!(!router.offer(user(1), channel(10), "hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_times_out_without_a_message() {
        let router = ReplyRouter::new();
        let result = router
            .wait_for_reply(user(1), channel(10), Duration::from_secs(30))
            .await;
        assert!(result.is_err());
    }
}
