//! Session identity and the post-login redirect slot.
//!
//! Both live under their own storage keys, outside the [`crate::Database`]
//! snapshot: the session holds the logged-in [`User`] (or nothing), the
//! redirect slot holds a one-shot `{page, id}` instruction that is consumed
//! the first time it is read.

use sakan_shared::constants::{KEY_CURRENT_USER, KEY_PENDING_REDIRECT};
use sakan_shared::models::{PendingRedirect, User};

use crate::store::DataStore;

impl DataStore {
    /// The authenticated identity, if any.  Includes the synthesized admin.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Set or clear the session identity, mirroring it to storage.
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.storage().write(KEY_CURRENT_USER, &user);
        self.current_user = user;
    }

    /// Record where the UI should land after the login flow completes.
    pub fn set_pending_redirect(&mut self, redirect: PendingRedirect) {
        self.storage().write(KEY_PENDING_REDIRECT, &redirect);
    }

    /// Consume the pending redirect: returns it once, then it is gone.
    pub fn take_pending_redirect(&mut self) -> Option<PendingRedirect> {
        let redirect: Option<PendingRedirect> = self.storage().read(KEY_PENDING_REDIRECT, None);
        if redirect.is_some() {
            self.storage().remove(KEY_PENDING_REDIRECT);
        }
        redirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use chrono::Utc;
    use sakan_shared::models::Page;

    fn test_user(id: &str) -> User {
        User {
            id: id.into(),
            name: "Test".into(),
            phone: "0501".into(),
            password: Some("pw".into()),
            favorite_property_ids: Vec::new(),
            points: 0,
            referral_code: "TEST-0001".into(),
            referred_by_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let mut store = DataStore::open(Storage::open_at(&path).unwrap());
            store.set_current_user(Some(test_user("u1")));
        }

        let store = DataStore::open(Storage::open_at(&path).unwrap());
        assert_eq!(store.current_user().map(|u| u.id.as_str()), Some("u1"));
    }

    #[test]
    fn logout_clears_the_slot() {
        let mut store = DataStore::open(Storage::open_in_memory().unwrap());
        store.set_current_user(Some(test_user("u1")));
        store.set_current_user(None);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn redirect_is_consumed_exactly_once() {
        let mut store = DataStore::open(Storage::open_in_memory().unwrap());
        store.set_pending_redirect(PendingRedirect {
            page: Page::Property,
            id: Some("prop-1001".into()),
        });

        let first = store.take_pending_redirect().expect("should be present");
        assert_eq!(first.page, Page::Property);
        assert_eq!(first.id.as_deref(), Some("prop-1001"));

        assert!(store.take_pending_redirect().is_none());
    }
}
