//! The aggregate [`Database`] snapshot and its first-run seed values.
//!
//! One struct holds every collection.  Loading falls back per key to the
//! seed default, so a collection key is never absent from the snapshot.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use sakan_shared::models::{
    Booking, MaintenanceJobPost, MaintenanceOffer, MaintenanceRequest, Property, PropertyStatus,
    RentalAgreement, SiteSettings, User, ViewingRequest,
};

/// The complete application state persisted to local storage, one entry per
/// field.  Request-like collections are ordered newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Database {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    pub viewing_requests: Vec<ViewingRequest>,
    pub maintenance_requests: Vec<MaintenanceRequest>,
    pub job_posts: Vec<MaintenanceJobPost>,
    pub job_offers: Vec<MaintenanceOffer>,
    pub bookings: Vec<Booking>,
    pub rental_agreements: Vec<RentalAgreement>,
    pub settings: SiteSettings,
}

impl Database {
    /// The value a fresh installation starts from.
    pub fn seed() -> Self {
        Self {
            users: Vec::new(),
            properties: seed_properties(),
            viewing_requests: Vec::new(),
            maintenance_requests: Vec::new(),
            job_posts: Vec::new(),
            job_offers: Vec::new(),
            bookings: Vec::new(),
            rental_agreements: Vec::new(),
            settings: SiteSettings::default(),
        }
    }
}

/// Demo listings shown before the back office adds real inventory.
fn seed_properties() -> Vec<Property> {
    let now = Utc::now();
    vec![
        Property {
            id: "prop-1001".into(),
            title: "Two-bedroom apartment, Al Nakheel".into(),
            description: "Bright second-floor apartment close to schools and the corniche."
                .into(),
            district: "Al Nakheel".into(),
            price: 4500,
            rooms: 2,
            area_sqm: 110,
            images: vec!["/img/prop-1001-1.jpg".into(), "/img/prop-1001-2.jpg".into()],
            status: PropertyStatus::Available,
            created_at: now,
        },
        Property {
            id: "prop-1002".into(),
            title: "Furnished studio near the university".into(),
            description: "Compact studio with new appliances, five minutes from campus.".into(),
            district: "Al Jamiah".into(),
            price: 2200,
            rooms: 1,
            area_sqm: 45,
            images: vec!["/img/prop-1002-1.jpg".into()],
            status: PropertyStatus::Available,
            created_at: now,
        },
        Property {
            id: "prop-1003".into(),
            title: "Family villa with garden, Al Rawda".into(),
            description: "Four bedrooms, private garden, covered parking for two cars.".into(),
            district: "Al Rawda".into(),
            price: 9800,
            rooms: 4,
            area_sqm: 320,
            images: vec!["/img/prop-1003-1.jpg".into()],
            status: PropertyStatus::Rented,
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_available_listings() {
        let db = Database::seed();
        assert!(db
            .properties
            .iter()
            .any(|p| p.status == PropertyStatus::Available));
        assert!(db.users.is_empty());
    }

    #[test]
    fn seed_enables_points_with_positive_bonus() {
        let db = Database::seed();
        assert!(db.settings.points_enabled);
        assert!(db.settings.referral_bonus > 0);
    }
}
