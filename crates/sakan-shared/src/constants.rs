/// Application name
pub const APP_NAME: &str = "Sakan";

/// Reserved admin identity.  Never present in the users collection; the
/// auth layer synthesizes it at login time.
pub const ADMIN_ID: &str = "admin";
pub const ADMIN_USERNAME: &str = "karim";
pub const ADMIN_PASSWORD: &str = "karim123";
pub const ADMIN_DISPLAY_NAME: &str = "Karim";

/// Storage keys, one entry per top-level collection.
pub const KEY_USERS: &str = "users";
pub const KEY_PROPERTIES: &str = "properties";
pub const KEY_VIEWING_REQUESTS: &str = "viewing_requests";
pub const KEY_MAINTENANCE_REQUESTS: &str = "maintenance_requests";
pub const KEY_JOB_POSTS: &str = "job_posts";
pub const KEY_JOB_OFFERS: &str = "job_offers";
pub const KEY_BOOKINGS: &str = "bookings";
pub const KEY_RENTAL_AGREEMENTS: &str = "rental_agreements";
pub const KEY_SETTINGS: &str = "settings";

/// Storage keys for the session slots (outside the database snapshot).
pub const KEY_CURRENT_USER: &str = "session.current_user";
pub const KEY_PENDING_REDIRECT: &str = "session.pending_redirect";

/// Id prefixes, one per domain collection.
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_PROPERTY: &str = "prop";
pub const PREFIX_VIEWING: &str = "view";
pub const PREFIX_MAINTENANCE: &str = "mnt";
pub const PREFIX_JOB_POST: &str = "job";
pub const PREFIX_OFFER: &str = "off";
pub const PREFIX_BOOKING: &str = "bkg";
pub const PREFIX_AGREEMENT: &str = "agr";

/// Referral code shape: `<name prefix><random suffix>`.
pub const REFERRAL_PREFIX_LEN: usize = 4;
pub const REFERRAL_SUFFIX_LEN: usize = 4;
