//! Bookings and rental agreements.

use chrono::Utc;
use tracing::info;

use sakan_shared::constants::{PREFIX_AGREEMENT, PREFIX_BOOKING};
use sakan_shared::models::{
    Booking, BookingStatus, PaymentMethod, PropertyStatus, RentalAgreement,
};

use crate::state::AppState;

/// Booking form fields.
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub property_id: String,
    pub name: String,
    pub phone: String,
    pub scheduled_for: String,
}

/// Agreement form fields.
#[derive(Debug, Clone)]
pub struct AgreementForm {
    pub property_id: String,
    pub tenant_name: String,
    pub tenant_phone: String,
    pub payment_method: PaymentMethod,
}

/// Result of signing an agreement.
#[derive(Debug, Clone, PartialEq)]
pub enum RentOutcome {
    Signed(RentalAgreement),
    /// The unit is unknown or no longer available.
    PropertyUnavailable,
}

/// Prepend a pending booking.
pub fn book_property(state: &mut AppState, form: BookingForm) -> Booking {
    let booking = Booking {
        id: state.ids.next_id(PREFIX_BOOKING),
        property_id: form.property_id,
        name: form.name,
        phone: form.phone,
        scheduled_for: form.scheduled_for,
        status: BookingStatus::Pending,
        created_at: Utc::now(),
    };

    state.store.update_bookings(|prev| {
        let mut next = Vec::with_capacity(prev.len() + 1);
        next.push(booking.clone());
        next.extend_from_slice(prev);
        next
    });

    info!(booking = %booking.id, property = %booking.property_id, "booking created");
    booking
}

/// Sign a rental agreement for an available unit.  One transaction: the
/// immutable agreement (amount = rent + commission) is prepended and the
/// unit flips to `Rented`, so it drops out of the available listings in the
/// same snapshot change.
pub fn create_rental_agreement(state: &mut AppState, form: AgreementForm) -> RentOutcome {
    let (price, commission) = {
        let db = state.store.db();
        let Some(property) = db
            .properties
            .iter()
            .find(|p| p.id == form.property_id && p.status == PropertyStatus::Available)
        else {
            return RentOutcome::PropertyUnavailable;
        };
        (property.price, db.settings.commission)
    };

    let agreement = RentalAgreement {
        id: state.ids.next_id(PREFIX_AGREEMENT),
        property_id: form.property_id.clone(),
        tenant_name: form.tenant_name,
        tenant_phone: form.tenant_phone,
        amount_paid: price + commission,
        payment_method: form.payment_method,
        created_at: Utc::now(),
    };

    let property_id = form.property_id;
    let record = agreement.clone();
    state.store.transact(|db| {
        db.rental_agreements.insert(0, record);
        for property in &mut db.properties {
            if property.id == property_id {
                property.status = PropertyStatus::Rented;
            }
        }
    });

    info!(
        agreement = %agreement.id,
        property = %agreement.property_id,
        amount = agreement.amount_paid,
        "rental agreement signed"
    );
    RentOutcome::Signed(agreement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::listings::available_properties;
    use sakan_shared::ids::SequentialGenerator;
    use sakan_store::{DataStore, Storage};

    fn test_state() -> AppState {
        AppState::with_ids(
            DataStore::open(Storage::open_in_memory().unwrap()),
            Box::new(SequentialGenerator::default()),
        )
    }

    fn agreement_form(property_id: &str) -> AgreementForm {
        AgreementForm {
            property_id: property_id.into(),
            tenant_name: "Layla".into(),
            tenant_phone: "0501234567".into(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn bookings_are_prepended_pending() {
        let mut state = test_state();
        let booking = book_property(
            &mut state,
            BookingForm {
                property_id: "prop-1001".into(),
                name: "Layla".into(),
                phone: "0501234567".into(),
                scheduled_for: "1st of next month".into(),
            },
        );
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(state.store.db().bookings[0].id, booking.id);
    }

    #[test]
    fn signing_rents_the_unit_and_hides_it_from_listings() {
        let mut state = test_state();
        let price = state.store.db().properties[0].price;
        let commission = state.store.db().settings.commission;

        let agreement = match create_rental_agreement(&mut state, agreement_form("prop-1001")) {
            RentOutcome::Signed(agreement) => agreement,
            other => panic!("expected signed, got {other:?}"),
        };

        assert_eq!(agreement.property_id, "prop-1001");
        assert_eq!(agreement.amount_paid, price + commission);

        let db = state.store.db();
        assert_eq!(db.rental_agreements[0], agreement);

        let unit = db.properties.iter().find(|p| p.id == "prop-1001").unwrap();
        assert_eq!(unit.status, PropertyStatus::Rented);
        assert!(!available_properties(db).iter().any(|p| p.id == "prop-1001"));
    }

    #[test]
    fn already_rented_units_cannot_be_signed_again() {
        let mut state = test_state();
        create_rental_agreement(&mut state, agreement_form("prop-1001"));

        assert_eq!(
            create_rental_agreement(&mut state, agreement_form("prop-1001")),
            RentOutcome::PropertyUnavailable
        );
        assert_eq!(state.store.db().rental_agreements.len(), 1);
    }

    #[test]
    fn unknown_units_cannot_be_signed() {
        let mut state = test_state();
        assert_eq!(
            create_rental_agreement(&mut state, agreement_form("prop-404")),
            RentOutcome::PropertyUnavailable
        );
        assert!(state.store.db().rental_agreements.is_empty());
    }
}
