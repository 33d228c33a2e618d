//! The central data store.
//!
//! [`DataStore`] owns the canonical [`Database`] snapshot and the storage
//! backend.  It loads every collection once at construction (falling back to
//! the seed defaults) and mirrors the snapshot back to storage after every
//! change.  Readers only ever get `&Database`; every mutation goes through a
//! setter or [`DataStore::transact`], so no consumer can bypass persistence.

use sakan_shared::constants::{
    KEY_BOOKINGS, KEY_CURRENT_USER, KEY_JOB_OFFERS, KEY_JOB_POSTS, KEY_MAINTENANCE_REQUESTS,
    KEY_PROPERTIES, KEY_RENTAL_AGREEMENTS, KEY_SETTINGS, KEY_USERS, KEY_VIEWING_REQUESTS,
};
use sakan_shared::models::{
    Booking, MaintenanceJobPost, MaintenanceOffer, MaintenanceRequest, Property, RentalAgreement,
    SiteSettings, User, ViewingRequest,
};

use crate::database::Database;
use crate::storage::Storage;

/// Owner of the canonical application state.
pub struct DataStore {
    db: Database,
    storage: Storage,
    /// Cached session identity, mirrored under its own storage key.
    pub(crate) current_user: Option<User>,
}

impl DataStore {
    /// Load the snapshot from storage, collection by collection, falling
    /// back to the seed default for any key that is absent or unparsable.
    pub fn open(storage: Storage) -> Self {
        let seed = Database::seed();

        let db = Database {
            users: storage.read(KEY_USERS, seed.users),
            properties: storage.read(KEY_PROPERTIES, seed.properties),
            viewing_requests: storage.read(KEY_VIEWING_REQUESTS, seed.viewing_requests),
            maintenance_requests: storage.read(KEY_MAINTENANCE_REQUESTS, seed.maintenance_requests),
            job_posts: storage.read(KEY_JOB_POSTS, seed.job_posts),
            job_offers: storage.read(KEY_JOB_OFFERS, seed.job_offers),
            bookings: storage.read(KEY_BOOKINGS, seed.bookings),
            rental_agreements: storage.read(KEY_RENTAL_AGREEMENTS, seed.rental_agreements),
            settings: storage.read(KEY_SETTINGS, seed.settings),
        };

        let current_user = storage.read(KEY_CURRENT_USER, None);

        tracing::info!(
            users = db.users.len(),
            properties = db.properties.len(),
            "data store loaded"
        );

        Self {
            db,
            storage,
            current_user,
        }
    }

    /// The current snapshot.  Immutable: mutation only happens through the
    /// setters and [`DataStore::transact`].
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Apply a multi-collection command.  All replacements land on the
    /// snapshot before any reader can observe it, then storage is updated in
    /// one pass, with no torn reads between dependent collection updates.
    pub fn transact(&mut self, f: impl FnOnce(&mut Database)) {
        f(&mut self.db);
        self.persist();
    }

    /// Mirror the whole snapshot to storage, one entry per collection.
    fn persist(&self) {
        self.storage.write(KEY_USERS, &self.db.users);
        self.storage.write(KEY_PROPERTIES, &self.db.properties);
        self.storage
            .write(KEY_VIEWING_REQUESTS, &self.db.viewing_requests);
        self.storage
            .write(KEY_MAINTENANCE_REQUESTS, &self.db.maintenance_requests);
        self.storage.write(KEY_JOB_POSTS, &self.db.job_posts);
        self.storage.write(KEY_JOB_OFFERS, &self.db.job_offers);
        self.storage.write(KEY_BOOKINGS, &self.db.bookings);
        self.storage
            .write(KEY_RENTAL_AGREEMENTS, &self.db.rental_agreements);
        self.storage.write(KEY_SETTINGS, &self.db.settings);
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Replace the users collection.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.db.users = users;
        self.persist();
    }

    /// Atomic read-modify-write against the latest in-memory users.
    pub fn update_users(&mut self, f: impl FnOnce(&[User]) -> Vec<User>) {
        self.db.users = f(&self.db.users);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.db.properties = properties;
        self.persist();
    }

    pub fn update_properties(&mut self, f: impl FnOnce(&[Property]) -> Vec<Property>) {
        self.db.properties = f(&self.db.properties);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Viewing requests
    // ------------------------------------------------------------------

    pub fn set_viewing_requests(&mut self, requests: Vec<ViewingRequest>) {
        self.db.viewing_requests = requests;
        self.persist();
    }

    pub fn update_viewing_requests(
        &mut self,
        f: impl FnOnce(&[ViewingRequest]) -> Vec<ViewingRequest>,
    ) {
        self.db.viewing_requests = f(&self.db.viewing_requests);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Maintenance requests
    // ------------------------------------------------------------------

    pub fn set_maintenance_requests(&mut self, requests: Vec<MaintenanceRequest>) {
        self.db.maintenance_requests = requests;
        self.persist();
    }

    pub fn update_maintenance_requests(
        &mut self,
        f: impl FnOnce(&[MaintenanceRequest]) -> Vec<MaintenanceRequest>,
    ) {
        self.db.maintenance_requests = f(&self.db.maintenance_requests);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Job posts / offers
    // ------------------------------------------------------------------

    pub fn set_job_posts(&mut self, posts: Vec<MaintenanceJobPost>) {
        self.db.job_posts = posts;
        self.persist();
    }

    pub fn update_job_posts(
        &mut self,
        f: impl FnOnce(&[MaintenanceJobPost]) -> Vec<MaintenanceJobPost>,
    ) {
        self.db.job_posts = f(&self.db.job_posts);
        self.persist();
    }

    pub fn set_job_offers(&mut self, offers: Vec<MaintenanceOffer>) {
        self.db.job_offers = offers;
        self.persist();
    }

    pub fn update_job_offers(
        &mut self,
        f: impl FnOnce(&[MaintenanceOffer]) -> Vec<MaintenanceOffer>,
    ) {
        self.db.job_offers = f(&self.db.job_offers);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    pub fn set_bookings(&mut self, bookings: Vec<Booking>) {
        self.db.bookings = bookings;
        self.persist();
    }

    pub fn update_bookings(&mut self, f: impl FnOnce(&[Booking]) -> Vec<Booking>) {
        self.db.bookings = f(&self.db.bookings);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Rental agreements
    // ------------------------------------------------------------------

    pub fn set_rental_agreements(&mut self, agreements: Vec<RentalAgreement>) {
        self.db.rental_agreements = agreements;
        self.persist();
    }

    pub fn update_rental_agreements(
        &mut self,
        f: impl FnOnce(&[RentalAgreement]) -> Vec<RentalAgreement>,
    ) {
        self.db.rental_agreements = f(&self.db.rental_agreements);
        self.persist();
    }

    // ------------------------------------------------------------------
    // Settings (singleton)
    // ------------------------------------------------------------------

    pub fn set_settings(&mut self, settings: SiteSettings) {
        self.db.settings = settings;
        self.persist();
    }

    pub fn update_settings(&mut self, f: impl FnOnce(&SiteSettings) -> SiteSettings) {
        self.db.settings = f(&self.db.settings);
        self.persist();
    }
}
