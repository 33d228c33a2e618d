//! Domain model structs persisted in the local store.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be written
//! straight to the key-value storage and handed to the UI layer unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ADMIN_ID;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.  The reserved admin identity (`id == "admin"`) is
/// never stored in the users collection; it is synthesized at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, generated at registration, immutable.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Phone number, used as the login identifier.  Unique.
    pub phone: String,
    /// Plaintext password.  `None` for synthesized identities.
    pub password: Option<String>,
    /// Property ids favorited by this user.  No duplicates.
    pub favorite_property_ids: Vec<String>,
    /// Loyalty points balance.
    pub points: u32,
    /// Unique code this user hands out to refer others.
    pub referral_code: String,
    /// Code of the user who referred this one, if any.
    pub referred_by_code: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.id == ADMIN_ID
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// Listing status.  Only `Available` units appear in public listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Rented,
    Hidden,
}

/// A rental unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    /// District / neighbourhood label shown in listings.
    pub district: String,
    /// Monthly rent, in whole currency units.
    pub price: i64,
    pub rooms: u32,
    pub area_sqm: u32,
    /// Image URLs.
    pub images: Vec<String>,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Viewing request
// ---------------------------------------------------------------------------

/// Lifecycle shared by viewing and maintenance requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    New,
    Contacted,
    Closed,
}

/// A request to visit a unit, submitted from a listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewingRequest {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub phone: String,
    /// Free-text preferred date/time as entered in the form.
    pub preferred_time: String,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Maintenance request
// ---------------------------------------------------------------------------

/// Structured result of the AI issue analysis, attached to a request when
/// the submitter ran the assistant before sending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueAnalysis {
    pub severity: String,
    pub likely_cause: String,
    pub recommended_specialist: String,
    pub estimated_cost_range: Option<String>,
}

/// A direct maintenance request (handled by the back office, not bid on).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Trade category (plumbing, electrical, ...), free text from the form.
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub analysis: Option<IssueAnalysis>,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Maintenance marketplace: job posts and offers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Assigned,
    Completed,
}

/// A maintenance job posted for providers to bid on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceJobPost {
    pub id: String,
    /// Id of the user who posted the job.
    pub posted_by: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Optional budget ceiling, in whole currency units.
    pub budget: Option<i64>,
    pub status: JobStatus,
    /// Set when an offer is accepted.  At most one offer per post may be
    /// accepted; accepting it rejects every other offer on the same post.
    pub accepted_offer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A provider's bid on a job post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceOffer {
    pub id: String,
    pub job_post_id: String,
    pub provider_name: String,
    pub phone: String,
    /// Quoted amount, in whole currency units.
    pub amount: i64,
    pub message: String,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A reservation of a unit ahead of signing an agreement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub phone: String,
    /// Free-text requested move-in date as entered in the form.
    pub scheduled_for: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Rental agreement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

/// A signed lease.  Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentalAgreement {
    pub id: String,
    pub property_id: String,
    pub tenant_name: String,
    pub tenant_phone: String,
    /// Property price plus commission at the time of signing.
    pub amount_paid: i64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Site settings
// ---------------------------------------------------------------------------

/// Back-office configurable settings, stored as a singleton.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    /// Flat commission added on top of the rent when an agreement is signed.
    pub commission: i64,
    /// Whether the loyalty points feature is active.
    pub points_enabled: bool,
    /// Points granted to a referrer per successful referred registration.
    pub referral_bonus: u32,
    pub contact_phone: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Sakan".into(),
            commission: 500,
            points_enabled: true,
            referral_bonus: 100,
            contact_phone: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Pages of the single-page UI, used by the post-login redirect slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Listings,
    Property,
    Maintenance,
    Jobs,
    Account,
    Admin,
}

/// A one-shot instruction written before the login flow and consumed once
/// afterwards (read then deleted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingRedirect {
    pub page: Page,
    /// Entity id to open on the target page, if any.
    pub id: Option<String>,
}
