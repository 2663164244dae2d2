//! Application constants
//!
//! Centralized location for all wire-level constants used throughout the
//! client.

// API origins
pub const PRODUCTION_ORIGIN: &str = "https://api.artsy.net";
pub const STAGING_ORIGIN: &str = "https://stagingapi.artsy.net";

// Guest (app token) authentication
pub const XAPP_TOKEN_HEADER: &str = "X-Xapp-Token";

// User session authentication
pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";
pub const PIN_HEADER: &str = "pin";
pub const NUMBER_HEADER: &str = "number";
pub const SALE_ID_HEADER: &str = "sale_id";

// Credential exchange
pub const CREDENTIALS_GRANT_TYPE: &str = "credentials";

// Bidder lookup answers with a redirect to the bidder resource when the
// registration exists.
pub const BIDDER_RESOURCE_MARKER: &str = "v1/bidder/";

// Transport defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
