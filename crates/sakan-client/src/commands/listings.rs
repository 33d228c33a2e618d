//! Listing pages: the availability filter, viewing requests, and the
//! AI-assisted search.

use chrono::Utc;
use tracing::info;

use sakan_shared::constants::PREFIX_VIEWING;
use sakan_shared::models::{Property, PropertyStatus, RequestStatus, ViewingRequest};
use sakan_store::Database;

use crate::ai::{Assistant, AssistantError};
use crate::state::AppState;

/// Viewing request form fields.
#[derive(Debug, Clone)]
pub struct ViewingForm {
    pub property_id: String,
    pub name: String,
    pub phone: String,
    pub preferred_time: String,
}

/// Listings shown to the public: available units only.
pub fn available_properties(db: &Database) -> Vec<&Property> {
    db.properties
        .iter()
        .filter(|p| p.status == PropertyStatus::Available)
        .collect()
}

/// Append a viewing request (newest first) with a fresh id and the `New`
/// status.
pub fn submit_viewing_request(state: &mut AppState, form: ViewingForm) -> ViewingRequest {
    let request = ViewingRequest {
        id: state.ids.next_id(PREFIX_VIEWING),
        property_id: form.property_id,
        name: form.name,
        phone: form.phone,
        preferred_time: form.preferred_time,
        status: RequestStatus::New,
        request_date: Utc::now(),
    };

    state.store.update_viewing_requests(|prev| {
        let mut next = Vec::with_capacity(prev.len() + 1);
        next.push(request.clone());
        next.extend_from_slice(prev);
        next
    });

    info!(request = %request.id, property = %request.property_id, "viewing request submitted");
    request
}

/// AI-assisted search: rank the available listings against a free-text
/// query and resolve the ranked ids back to live snapshot entries, keeping
/// the assistant's order and dropping ids it hallucinated.
pub async fn search_properties(
    state: &AppState,
    assistant: &dyn Assistant,
    query: &str,
) -> Result<Vec<(Property, String)>, AssistantError> {
    let db = state.store.db();
    let candidates: Vec<Property> = available_properties(db).into_iter().cloned().collect();

    let ranked = assistant.rank_properties(query, &candidates).await?;

    Ok(ranked
        .into_iter()
        .filter_map(|hit| {
            candidates
                .iter()
                .find(|p| p.id == hit.property_id)
                .map(|p| (p.clone(), hit.reason))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RankedProperty;
    use async_trait::async_trait;
    use sakan_shared::ids::SequentialGenerator;
    use sakan_shared::models::IssueAnalysis;
    use sakan_store::{DataStore, Storage};

    fn test_state() -> AppState {
        AppState::with_ids(
            DataStore::open(Storage::open_in_memory().unwrap()),
            Box::new(SequentialGenerator::default()),
        )
    }

    #[test]
    fn available_filter_excludes_rented_units() {
        let state = test_state();
        let listings = available_properties(state.store.db());
        assert!(!listings.is_empty());
        assert!(listings.iter().all(|p| p.status == PropertyStatus::Available));
        assert!(!listings.iter().any(|p| p.id == "prop-1003"));
    }

    #[test]
    fn viewing_requests_are_prepended_newest_first() {
        let mut state = test_state();

        let first = submit_viewing_request(
            &mut state,
            ViewingForm {
                property_id: "prop-1001".into(),
                name: "Layla".into(),
                phone: "0501234567".into(),
                preferred_time: "Friday afternoon".into(),
            },
        );
        let second = submit_viewing_request(
            &mut state,
            ViewingForm {
                property_id: "prop-1002".into(),
                name: "Omar".into(),
                phone: "0507654321".into(),
                preferred_time: "Saturday morning".into(),
            },
        );

        let requests = &state.store.db().viewing_requests;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].id, second.id);
        assert_eq!(requests[1].id, first.id);
        assert_eq!(requests[0].status, RequestStatus::New);
    }

    /// Canned assistant: echoes a fixed ranking.
    struct FixedAssistant(Vec<RankedProperty>);

    #[async_trait]
    impl Assistant for FixedAssistant {
        async fn rank_properties(
            &self,
            _query: &str,
            _candidates: &[Property],
        ) -> Result<Vec<RankedProperty>, AssistantError> {
            Ok(self.0.clone())
        }

        async fn analyze_issue(
            &self,
            _description: &str,
            _image: Option<&[u8]>,
        ) -> Result<IssueAnalysis, AssistantError> {
            unimplemented!("not used in these tests")
        }
    }

    #[tokio::test]
    async fn search_keeps_assistant_order_and_drops_unknown_ids() {
        let state = test_state();
        let assistant = FixedAssistant(vec![
            RankedProperty {
                property_id: "prop-1002".into(),
                reason: "close to campus".into(),
            },
            RankedProperty {
                property_id: "prop-9999".into(),
                reason: "does not exist".into(),
            },
            RankedProperty {
                property_id: "prop-1001".into(),
                reason: "family friendly".into(),
            },
        ]);

        let hits = search_properties(&state, &assistant, "near the university")
            .await
            .unwrap();

        let ids: Vec<&str> = hits.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prop-1002", "prop-1001"]);
        assert_eq!(hits[0].1, "close to campus");
    }
}
