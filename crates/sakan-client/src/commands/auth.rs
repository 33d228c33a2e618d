//! Authentication: login, registration with referral bonus, logout, and
//! profile updates.
//!
//! Identity moves anonymous -> authenticated -> anonymous.  The reserved
//! admin identity is synthesized from constants at login and never stored in
//! the users collection.  Credentials are stored and compared in plaintext;
//! there is no hashing, lockout, or rate limiting.

use chrono::Utc;
use tracing::info;

use sakan_shared::constants::{
    ADMIN_DISPLAY_NAME, ADMIN_ID, ADMIN_PASSWORD, ADMIN_USERNAME, PREFIX_USER,
};
use sakan_shared::models::User;
use sakan_shared::referral;

use crate::state::AppState;

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The reserved back-office identity.
    Admin(User),
    /// A registered user matched by `(phone, password)`.
    User(User),
    /// No match; the session is left unchanged.
    Failed,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// The new user was appended and is now the session identity.
    Success(User),
    /// The phone number already belongs to an account; nothing changed.
    PhoneExists,
    /// A referral code was supplied but matches no user; nothing changed.
    InvalidReferral,
}

/// Registration form fields.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub referral_code: Option<String>,
}

/// Synthesize the admin identity.  Not read from (or written to) the users
/// collection.
fn admin_user() -> User {
    User {
        id: ADMIN_ID.into(),
        name: ADMIN_DISPLAY_NAME.into(),
        phone: ADMIN_USERNAME.into(),
        password: None,
        favorite_property_ids: Vec::new(),
        points: 0,
        referral_code: String::new(),
        referred_by_code: None,
        created_at: Utc::now(),
    }
}

/// Attempt to log in with the given identifier (admin username or phone
/// number) and secret.
pub fn login(state: &mut AppState, identifier: &str, secret: &str) -> LoginOutcome {
    if identifier == ADMIN_USERNAME && secret == ADMIN_PASSWORD {
        let admin = admin_user();
        state.store.set_current_user(Some(admin.clone()));
        info!("admin logged in");
        return LoginOutcome::Admin(admin);
    }

    let matched = state
        .store
        .db()
        .users
        .iter()
        .find(|u| u.phone == identifier && u.password.as_deref() == Some(secret))
        .cloned();

    match matched {
        Some(user) => {
            state.store.set_current_user(Some(user.clone()));
            info!(user = %user.id, "user logged in");
            LoginOutcome::User(user)
        }
        None => LoginOutcome::Failed,
    }
}

/// Register a new account.  On success the new user becomes the session
/// identity; the referrer (if any) is credited before the append.
pub fn register(state: &mut AppState, form: RegisterForm) -> RegisterOutcome {
    let referral_code = form
        .referral_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    // Resolve everything we need from the snapshot before mutating.
    let (referrer_id, bonus) = {
        let db = state.store.db();

        if db.users.iter().any(|u| u.phone == form.phone) {
            return RegisterOutcome::PhoneExists;
        }

        let referrer_id = match &referral_code {
            Some(code) => {
                match db
                    .users
                    .iter()
                    .find(|u| referral::codes_match(&u.referral_code, code))
                {
                    Some(referrer) => Some(referrer.id.clone()),
                    None => return RegisterOutcome::InvalidReferral,
                }
            }
            None => None,
        };

        let bonus = if db.settings.points_enabled {
            db.settings.referral_bonus
        } else {
            0
        };

        (referrer_id, bonus)
    };

    if let Some(referrer_id) = &referrer_id {
        if bonus > 0 {
            let referrer_id = referrer_id.clone();
            state.store.update_users(|prev| {
                prev.iter()
                    .map(|u| {
                        if u.id == referrer_id {
                            User {
                                points: u.points + bonus,
                                ..u.clone()
                            }
                        } else {
                            u.clone()
                        }
                    })
                    .collect()
            });
            info!(referrer = %referrer_id, bonus, "referral bonus credited");
        }
    }

    let user = User {
        id: state.ids.next_id(PREFIX_USER),
        name: form.name.trim().to_string(),
        phone: form.phone,
        password: Some(form.password),
        favorite_property_ids: Vec::new(),
        points: 0,
        referral_code: referral::generate_code(&form.name),
        referred_by_code: referral_code,
        created_at: Utc::now(),
    };

    state.store.update_users(|prev| {
        let mut next = prev.to_vec();
        next.push(user.clone());
        next
    });
    state.store.set_current_user(Some(user.clone()));

    info!(user = %user.id, "user registered");
    RegisterOutcome::Success(user)
}

/// Clear the session identity.  The users collection is untouched.
pub fn logout(state: &mut AppState) {
    state.store.set_current_user(None);
    info!("logged out");
}

/// Replace the matching user in the collection.  If the updated identity is
/// also the session identity, the session is refreshed to match.
pub fn update_user(state: &mut AppState, updated: User) {
    let id = updated.id.clone();
    let replacement = updated.clone();

    state.store.update_users(|prev| {
        prev.iter()
            .map(|u| {
                if u.id == id {
                    replacement.clone()
                } else {
                    u.clone()
                }
            })
            .collect()
    });

    if state.store.current_user().map(|u| u.id.as_str()) == Some(id.as_str()) {
        state.store.set_current_user(Some(updated));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sakan_shared::ids::SequentialGenerator;
    use sakan_store::{DataStore, Storage};

    fn test_state() -> AppState {
        AppState::with_ids(
            DataStore::open(Storage::open_in_memory().unwrap()),
            Box::new(SequentialGenerator::default()),
        )
    }

    fn form(name: &str, phone: &str, referral: Option<&str>) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            phone: phone.into(),
            password: "secret".into(),
            referral_code: referral.map(str::to_string),
        }
    }

    #[test]
    fn admin_login_works_regardless_of_user_collection() {
        let mut state = test_state();
        assert!(state.store.db().users.is_empty());

        match login(&mut state, "karim", "karim123") {
            LoginOutcome::Admin(admin) => assert_eq!(admin.id, ADMIN_ID),
            other => panic!("expected admin outcome, got {other:?}"),
        }
        assert!(state.store.current_user().unwrap().is_admin());
    }

    #[test]
    fn registered_user_can_log_in_and_bad_secret_fails() {
        let mut state = test_state();
        let user = match register(&mut state, form("Layla", "0501234567", None)) {
            RegisterOutcome::Success(user) => user,
            other => panic!("expected success, got {other:?}"),
        };
        logout(&mut state);
        assert!(state.store.current_user().is_none());

        assert_eq!(
            login(&mut state, "0501234567", "secret"),
            LoginOutcome::User(user)
        );

        logout(&mut state);
        assert_eq!(login(&mut state, "0501234567", "wrong"), LoginOutcome::Failed);
        assert!(state.store.current_user().is_none());
    }

    #[test]
    fn duplicate_phone_is_rejected_without_mutation() {
        let mut state = test_state();
        register(&mut state, form("Layla", "0501234567", None));
        let before = state.store.db().users.clone();

        assert_eq!(
            register(&mut state, form("Omar", "0501234567", None)),
            RegisterOutcome::PhoneExists
        );
        assert_eq!(state.store.db().users, before);
    }

    #[test]
    fn unknown_referral_code_is_rejected_without_mutation() {
        let mut state = test_state();
        register(&mut state, form("Layla", "0501234567", None));
        let before = state.store.db().users.clone();

        assert_eq!(
            register(&mut state, form("Omar", "0507654321", Some("NOPE-0000"))),
            RegisterOutcome::InvalidReferral
        );
        assert_eq!(state.store.db().users, before);
    }

    #[test]
    fn referral_bonus_credits_exactly_the_referrer() {
        let mut state = test_state();
        let referrer = match register(&mut state, form("Layla", "0501234567", None)) {
            RegisterOutcome::Success(user) => user,
            other => panic!("expected success, got {other:?}"),
        };
        register(&mut state, form("Noor", "0500000001", None));

        let bonus = state.store.db().settings.referral_bonus;
        assert!(bonus > 0);

        // Case-insensitive match on the referrer's code.
        let code = referrer.referral_code.to_lowercase();
        let outcome = register(&mut state, form("Omar", "0507654321", Some(&code)));
        assert!(matches!(outcome, RegisterOutcome::Success(_)));

        let db = state.store.db();
        for user in &db.users {
            let expected = if user.id == referrer.id { bonus } else { 0 };
            assert_eq!(user.points, expected, "points of {}", user.id);
        }
    }

    #[test]
    fn no_bonus_when_points_disabled() {
        let mut state = test_state();
        state.store.update_settings(|s| {
            let mut next = s.clone();
            next.points_enabled = false;
            next
        });

        let referrer = match register(&mut state, form("Layla", "0501234567", None)) {
            RegisterOutcome::Success(user) => user,
            other => panic!("expected success, got {other:?}"),
        };
        let code = referrer.referral_code.clone();
        register(&mut state, form("Omar", "0507654321", Some(&code)));

        let db = state.store.db();
        let layla = db.users.iter().find(|u| u.id == referrer.id).unwrap();
        assert_eq!(layla.points, 0);
    }

    #[test]
    fn new_users_start_clean_and_become_the_session() {
        let mut state = test_state();
        let user = match register(&mut state, form("Layla", "0501234567", None)) {
            RegisterOutcome::Success(user) => user,
            other => panic!("expected success, got {other:?}"),
        };

        assert!(user.id.starts_with("usr-"));
        assert_eq!(user.points, 0);
        assert!(user.favorite_property_ids.is_empty());
        assert!(user.referral_code.starts_with("LAYL-"));
        assert_eq!(
            state.store.current_user().map(|u| u.id.as_str()),
            Some(user.id.as_str())
        );
    }

    #[test]
    fn update_user_refreshes_a_matching_session() {
        let mut state = test_state();
        let user = match register(&mut state, form("Layla", "0501234567", None)) {
            RegisterOutcome::Success(user) => user,
            other => panic!("expected success, got {other:?}"),
        };

        let renamed = User {
            name: "Layla H.".into(),
            ..user
        };
        update_user(&mut state, renamed.clone());

        assert_eq!(state.store.db().users[0].name, "Layla H.");
        assert_eq!(state.store.current_user(), Some(&renamed));
    }
}
