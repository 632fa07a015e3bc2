//! Session-scoped registry of progress subscriptions and option snapshots.
//!
//! Responsibilities:
//! - Hand out at most one progress subscription per server name.
//! - Keep the last saved option set of each server for change tracking.
//!
//! Does NOT handle:
//! - Running the listeners (see `runtime::streams`).
//!
//! Invariants:
//! - `subscribe` returns a token only if no subscription for the name exists.
//! - Every subscription token is a child of the session token, so cancelling
//!   the session ends all listeners.
//! - Snapshots change only on a successful save or revert (and initial load).

use std::collections::{BTreeMap, HashMap};

use hub_client::UserOptions;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct SessionRegistry {
    session: CancellationToken,
    subscriptions: HashMap<String, CancellationToken>,
    snapshots: BTreeMap<String, UserOptions>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl SessionRegistry {
    pub fn new(session: CancellationToken) -> Self {
        Self {
            session,
            subscriptions: HashMap::new(),
            snapshots: BTreeMap::new(),
        }
    }

    /// Register a progress subscription for `name`.
    ///
    /// Returns the token the listener must watch, or `None` if `name` is
    /// already subscribed.
    pub fn subscribe(&mut self, name: &str) -> Option<CancellationToken> {
        if self.subscriptions.contains_key(name) {
            return None;
        }
        let token = self.session.child_token();
        self.subscriptions.insert(name.to_string(), token.clone());
        Some(token)
    }

    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscriptions.contains_key(name)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Forget the subscription of `name` after its listener ended.
    pub fn subscription_closed(&mut self, name: &str) {
        self.subscriptions.remove(name);
    }

    /// Cancel and forget the subscription of `name`.
    pub fn unsubscribe(&mut self, name: &str) {
        if let Some(token) = self.subscriptions.remove(name) {
            token.cancel();
        }
    }

    pub fn snapshot(&self, name: &str) -> Option<&UserOptions> {
        self.snapshots.get(name)
    }

    pub fn set_snapshot(&mut self, name: &str, options: UserOptions) {
        self.snapshots.insert(name.to_string(), options);
    }

    /// Drop everything known about `name`.
    pub fn remove(&mut self, name: &str) {
        self.unsubscribe(name);
        self.snapshots.remove(name);
    }

    /// Cancel every listener of the session.
    pub fn shutdown(&mut self) {
        self.session.cancel();
        self.subscriptions.clear();
    }

    pub fn session_token(&self) -> CancellationToken {
        self.session.clone()
    }
}
