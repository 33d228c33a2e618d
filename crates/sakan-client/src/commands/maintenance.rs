//! Maintenance flows: direct requests, the job-post marketplace, and offer
//! acceptance.

use chrono::Utc;
use tracing::info;

use sakan_shared::constants::{PREFIX_JOB_POST, PREFIX_MAINTENANCE, PREFIX_OFFER};
use sakan_shared::models::{
    IssueAnalysis, JobStatus, MaintenanceJobPost, MaintenanceOffer, MaintenanceRequest,
    OfferStatus, RequestStatus,
};

use crate::state::AppState;

/// Direct maintenance request form fields.
#[derive(Debug, Clone)]
pub struct MaintenanceForm {
    pub name: String,
    pub phone: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Attached when the submitter ran the assistant before sending.
    pub analysis: Option<IssueAnalysis>,
}

/// Job post form fields.
#[derive(Debug, Clone)]
pub struct JobPostForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: Option<i64>,
}

/// Offer form fields.
#[derive(Debug, Clone)]
pub struct OfferForm {
    pub job_post_id: String,
    pub provider_name: String,
    pub phone: String,
    pub amount: i64,
    pub message: String,
}

/// Result of accepting an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// Unknown post, unknown offer, or an offer on a different post.
    NotFound,
}

/// Prepend a direct maintenance request with the `New` status.
pub fn submit_maintenance_request(
    state: &mut AppState,
    form: MaintenanceForm,
) -> MaintenanceRequest {
    let request = MaintenanceRequest {
        id: state.ids.next_id(PREFIX_MAINTENANCE),
        name: form.name,
        phone: form.phone,
        category: form.category,
        description: form.description,
        image_url: form.image_url,
        analysis: form.analysis,
        status: RequestStatus::New,
        request_date: Utc::now(),
    };

    state.store.update_maintenance_requests(|prev| {
        let mut next = Vec::with_capacity(prev.len() + 1);
        next.push(request.clone());
        next.extend_from_slice(prev);
        next
    });

    info!(request = %request.id, category = %request.category, "maintenance request submitted");
    request
}

/// Prepend an open job post for providers to bid on.
pub fn post_job(state: &mut AppState, posted_by: &str, form: JobPostForm) -> MaintenanceJobPost {
    let post = MaintenanceJobPost {
        id: state.ids.next_id(PREFIX_JOB_POST),
        posted_by: posted_by.to_string(),
        title: form.title,
        description: form.description,
        category: form.category,
        budget: form.budget,
        status: JobStatus::Open,
        accepted_offer_id: None,
        created_at: Utc::now(),
    };

    state.store.update_job_posts(|prev| {
        let mut next = Vec::with_capacity(prev.len() + 1);
        next.push(post.clone());
        next.extend_from_slice(prev);
        next
    });

    info!(post = %post.id, "job posted");
    post
}

/// Prepend a pending offer on a job post.
pub fn submit_offer(state: &mut AppState, form: OfferForm) -> MaintenanceOffer {
    let offer = MaintenanceOffer {
        id: state.ids.next_id(PREFIX_OFFER),
        job_post_id: form.job_post_id,
        provider_name: form.provider_name,
        phone: form.phone,
        amount: form.amount,
        message: form.message,
        status: OfferStatus::Pending,
        created_at: Utc::now(),
    };

    state.store.update_job_offers(|prev| {
        let mut next = Vec::with_capacity(prev.len() + 1);
        next.push(offer.clone());
        next.extend_from_slice(prev);
        next
    });

    info!(offer = %offer.id, post = %offer.job_post_id, "offer submitted");
    offer
}

/// Accept one offer for a job post.  A single transaction: the accepted
/// offer, every other offer on the same post (all rejected), and the post
/// itself (`Assigned` + `accepted_offer_id`) change together, so no reader
/// ever sees a partial state.
pub fn accept_offer(state: &mut AppState, job_post_id: &str, offer_id: &str) -> AcceptOutcome {
    let known = {
        let db = state.store.db();
        db.job_posts.iter().any(|p| p.id == job_post_id)
            && db
                .job_offers
                .iter()
                .any(|o| o.id == offer_id && o.job_post_id == job_post_id)
    };
    if !known {
        return AcceptOutcome::NotFound;
    }

    state.store.transact(|db| {
        for offer in &mut db.job_offers {
            if offer.job_post_id == job_post_id {
                offer.status = if offer.id == offer_id {
                    OfferStatus::Accepted
                } else {
                    OfferStatus::Rejected
                };
            }
        }
        for post in &mut db.job_posts {
            if post.id == job_post_id {
                post.status = JobStatus::Assigned;
                post.accepted_offer_id = Some(offer_id.to_string());
            }
        }
    });

    info!(post = %job_post_id, offer = %offer_id, "offer accepted");
    AcceptOutcome::Accepted
}
