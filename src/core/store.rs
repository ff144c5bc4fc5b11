//! Keyed user-state storage
//!
//! The store hands out per-user handles guarded by their own mutex, so two
//! audits for the same user serialize while different users never contend.
//! The map-level lock is held only long enough to clone a handle out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::types::{Level, LevelUpNotification, UserLevelState};

/// Everything the leveling subsystem owns for one user
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub state: UserLevelState,
    /// All notifications ever created for this user, oldest first
    pub notifications: Vec<LevelUpNotification>,
}

impl UserAccount {
    pub fn new(user_id: impl Into<String>, level: Level) -> Self {
        Self {
            state: UserLevelState::new(user_id, level),
            notifications: Vec::new(),
        }
    }

    /// The unresolved notification, if one is open
    pub fn pending_notification(&self) -> Option<&LevelUpNotification> {
        self.notifications.iter().find(|n| n.is_pending())
    }

    /// Notifications accepted so far
    pub fn accepted_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.accepted).count()
    }
}

/// Keyed store abstraction over user accounts.
///
/// Backends must return stable per-user handles: the same user id yields the
/// same `Arc<Mutex<_>>` until eviction, which is what gives audits their
/// single-writer-per-user semantics.
pub trait UserStateStore: Send + Sync {
    /// Handle for an existing user
    fn get(&self, user_id: &str) -> Option<Arc<Mutex<UserAccount>>>;

    /// Handle for a user, creating the account at `default_level` on first
    /// touch
    fn get_or_create(&self, user_id: &str, default_level: Level) -> Arc<Mutex<UserAccount>>;

    /// Drop a user entirely. Returns whether anything was removed.
    fn evict(&self, user_id: &str) -> bool;

    /// Handles for every registered user, for aggregate reporting
    fn accounts(&self) -> Vec<Arc<Mutex<UserAccount>>>;

    /// Registered user count
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local backend over a guarded hash map
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<String, Arc<Mutex<UserAccount>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStateStore for InMemoryStore {
    fn get(&self, user_id: &str) -> Option<Arc<Mutex<UserAccount>>> {
        self.accounts.read().unwrap().get(user_id).cloned()
    }

    fn get_or_create(&self, user_id: &str, default_level: Level) -> Arc<Mutex<UserAccount>> {
        if let Some(handle) = self.get(user_id) {
            return handle;
        }
        let mut map = self.accounts.write().unwrap();
        map.entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(UserAccount::new(user_id, default_level))))
            .clone()
    }

    fn evict(&self, user_id: &str) -> bool {
        self.accounts.write().unwrap().remove(user_id).is_some()
    }

    fn accounts(&self) -> Vec<Arc<Mutex<UserAccount>>> {
        self.accounts.read().unwrap().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.accounts.read().unwrap().len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_stable() {
        let store = InMemoryStore::new();
        let first = store.get_or_create("u1", Level::B1);
        let second = store.get_or_create("u1", Level::C1);

        // Same handle, and the original level survives the second call
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().unwrap().state.registered_level, Level::B1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_does_not_create() {
        let store = InMemoryStore::new();
        assert!(store.get("ghost").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_removes_user() {
        let store = InMemoryStore::new();
        store.get_or_create("u1", Level::B2);
        assert!(store.evict("u1"));
        assert!(!store.evict("u1"));
        assert!(store.get("u1").is_none());
    }

    #[test]
    fn test_pending_notification_lookup() {
        let mut account = UserAccount::new("u1", Level::B2);
        assert!(account.pending_notification().is_none());

        let mut accepted = LevelUpNotification::new("u1", Level::B1, Level::B2, vec![3]);
        accepted.accepted = true;
        account.notifications.push(accepted);
        let open = LevelUpNotification::new("u1", Level::B2, Level::C1, vec![4]);
        account.notifications.push(open);

        assert_eq!(account.accepted_count(), 1);
        let pending = account.pending_notification().unwrap();
        assert_eq!(pending.to_level, Level::C1);
    }
}
