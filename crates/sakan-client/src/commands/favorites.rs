//! Per-user favorites, derived from the session identity and persisted via
//! the user update path.

use sakan_shared::models::User;

use crate::commands::auth;
use crate::state::AppState;

/// Result of a toggle attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteOutcome {
    /// The new favorites list after the toggle.
    Updated(Vec<String>),
    /// Anonymous or admin session; nothing was mutated and the UI should
    /// prompt for sign-in.
    SignInRequired,
}

/// The current user's favorite property ids.  Empty for anonymous or admin
/// sessions.
pub fn favorite_ids(state: &AppState) -> Vec<String> {
    match state.store.current_user() {
        Some(user) if !user.is_admin() => user.favorite_property_ids.clone(),
        _ => Vec::new(),
    }
}

/// Add the property id if absent, remove it if present.
pub fn toggle_favorite(state: &mut AppState, property_id: &str) -> FavoriteOutcome {
    let Some(user) = state
        .store
        .current_user()
        .filter(|u| !u.is_admin())
        .cloned()
    else {
        return FavoriteOutcome::SignInRequired;
    };

    let mut favorites = user.favorite_property_ids.clone();
    match favorites.iter().position(|id| id == property_id) {
        Some(pos) => {
            favorites.remove(pos);
        }
        None => favorites.push(property_id.to_string()),
    }

    auth::update_user(
        state,
        User {
            favorite_property_ids: favorites.clone(),
            ..user
        },
    );

    FavoriteOutcome::Updated(favorites)
}
