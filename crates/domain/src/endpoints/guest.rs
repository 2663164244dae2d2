//! Operations usable without a user session.

use serde_json::json;

use super::params::{bag, Parameters};
use super::{Endpoint, HttpMethod};
use crate::config::ApiKeys;
use crate::constants::CREDENTIALS_GRANT_TYPE;

/// Guest-scope API operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GuestEndpoint {
    /// Issue a fresh app token
    XApp,
    /// Exchange email and password for a user access token
    XAuth { email: String, password: String },
    TrustToken { number: String, auction_pin: String },

    SystemTime,
    Ping,

    Artwork { id: String },
    Artist { id: String },

    Auctions,
    AuctionListings { id: String, page: u32, page_size: u32 },
    AuctionInfo { auction_id: String },
    AuctionInfoForArtwork { auction_id: String, artwork_id: String },
    FindBidderRegistration { auction_id: String, phone: String },
    ActiveAuctions,

    CreateUser { email: String, password: String, phone: String, post_code: String, name: String },

    BidderDetailsNotification { auction_id: String, identifier: String },

    LostPasswordNotification { email: String },
    FindExistingEmailRegistration { email: String },
}

impl GuestEndpoint {
    /// Stable operation name for logs and filters.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::XApp => "XApp",
            Self::XAuth { .. } => "XAuth",
            Self::TrustToken { .. } => "TrustToken",
            Self::SystemTime => "SystemTime",
            Self::Ping => "Ping",
            Self::Artwork { .. } => "Artwork",
            Self::Artist { .. } => "Artist",
            Self::Auctions => "Auctions",
            Self::AuctionListings { .. } => "AuctionListings",
            Self::AuctionInfo { .. } => "AuctionInfo",
            Self::AuctionInfoForArtwork { .. } => "AuctionInfoForArtwork",
            Self::FindBidderRegistration { .. } => "FindBidderRegistration",
            Self::ActiveAuctions => "ActiveAuctions",
            Self::CreateUser { .. } => "CreateUser",
            Self::BidderDetailsNotification { .. } => "BidderDetailsNotification",
            Self::LostPasswordNotification { .. } => "LostPasswordNotification",
            Self::FindExistingEmailRegistration { .. } => "FindExistingEmailRegistration",
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::XApp => "/api/v1/xapp_token".to_string(),
            Self::XAuth { .. } => "/oauth2/access_token".to_string(),
            Self::TrustToken { .. } => "/api/v1/me/trust_token".to_string(),
            Self::SystemTime => "/api/v1/system/time".to_string(),
            Self::Ping => "/api/v1/system/ping".to_string(),
            Self::Artwork { id } => format!("/api/v1/artwork/{id}"),
            Self::Artist { id } => format!("/api/v1/artist/{id}"),
            Self::Auctions | Self::ActiveAuctions => "/api/v1/sales".to_string(),
            Self::AuctionListings { id, .. } => format!("/api/v1/sale/{id}/sale_artworks"),
            Self::AuctionInfo { auction_id } => format!("/api/v1/sale/{auction_id}"),
            Self::AuctionInfoForArtwork { auction_id, artwork_id } => {
                format!("/api/v1/sale/{auction_id}/sale_artwork/{artwork_id}")
            }
            Self::FindBidderRegistration { .. } => "/api/v1/bidder".to_string(),
            Self::CreateUser { .. } | Self::FindExistingEmailRegistration { .. } => {
                "/api/v1/user".to_string()
            }
            Self::BidderDetailsNotification { .. } => {
                "/api/v1/bidder/bidding_details_notification".to_string()
            }
            Self::LostPasswordNotification { .. } => {
                "/api/v1/users/send_reset_password_instructions".to_string()
            }
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::LostPasswordNotification { .. } | Self::CreateUser { .. } => HttpMethod::Post,
            Self::FindExistingEmailRegistration { .. } => HttpMethod::Head,
            Self::BidderDetailsNotification { .. } => HttpMethod::Put,
            Self::XApp
            | Self::XAuth { .. }
            | Self::TrustToken { .. }
            | Self::SystemTime
            | Self::Ping
            | Self::Artwork { .. }
            | Self::Artist { .. }
            | Self::Auctions
            | Self::ActiveAuctions
            | Self::AuctionListings { .. }
            | Self::AuctionInfo { .. }
            | Self::AuctionInfoForArtwork { .. }
            | Self::FindBidderRegistration { .. } => HttpMethod::Get,
        }
    }

    /// Request parameters; token requests embed the client keys.
    #[must_use]
    pub fn parameters(&self, keys: &ApiKeys) -> Option<Parameters> {
        match self {
            Self::XApp => bag(json!({
                "client_id": keys.key,
                "client_secret": keys.secret,
            })),
            Self::XAuth { email, password } => bag(json!({
                "client_id": keys.key,
                "client_secret": keys.secret,
                "email": email,
                "password": password,
                "grant_type": CREDENTIALS_GRANT_TYPE,
            })),
            Self::Auctions => bag(json!({ "is_auction": "true" })),
            Self::TrustToken { number, auction_pin } => {
                bag(json!({ "number": number, "auction_pin": auction_pin }))
            }
            Self::CreateUser { email, password, phone, post_code, name } => bag(json!({
                "email": email,
                "password": password,
                "phone": phone,
                "name": name,
                "location": { "postal_code": post_code },
            })),
            Self::BidderDetailsNotification { auction_id, identifier } => {
                bag(json!({ "sale_id": auction_id, "identifier": identifier }))
            }
            Self::LostPasswordNotification { email }
            | Self::FindExistingEmailRegistration { email } => bag(json!({ "email": email })),
            Self::FindBidderRegistration { auction_id, phone } => {
                bag(json!({ "sale_id": auction_id, "number": phone }))
            }
            Self::AuctionListings { page, page_size, .. } => {
                bag(json!({ "size": page_size, "page": page }))
            }
            Self::ActiveAuctions => bag(json!({ "is_auction": true, "live": true })),
            Self::SystemTime
            | Self::Ping
            | Self::Artwork { .. }
            | Self::Artist { .. }
            | Self::AuctionInfo { .. }
            | Self::AuctionInfoForArtwork { .. } => None,
        }
    }

    /// Token issuance and credential exchange run without an app token;
    /// everything else needs one.
    #[must_use]
    pub const fn requires_app_token(&self) -> bool {
        !matches!(self, Self::XApp | Self::XAuth { .. })
    }

    #[must_use]
    pub fn descriptor(&self, keys: &ApiKeys) -> Endpoint {
        Endpoint {
            path: self.path(),
            method: self.method(),
            parameters: self.parameters(keys),
            requires_app_token: self.requires_app_token(),
        }
    }

    #[must_use]
    pub const fn sample_response(&self) -> &'static str {
        match self {
            Self::XApp => {
                r#"{"xapp_token":"stubbed-xapp-token","expires_in":"2099-01-01T00:00:00Z"}"#
            }
            Self::XAuth { .. } | Self::TrustToken { .. } => {
                r#"{"access_token":"stubbed-access-token","expires_in":"2099-01-01T00:00:00Z"}"#
            }
            Self::SystemTime => r#"{"time":"2015-03-01T12:00:00Z","unix":1425211200}"#,
            Self::Ping => r#"{"ping":"pong"}"#,
            Self::Artwork { .. } => {
                r#"{"id":"artwork-1","title":"Untitled","date":"1970","artist":{"id":"artist-1","name":"Anonymous"}}"#
            }
            Self::Artist { .. } => r#"{"id":"artist-1","name":"Anonymous","sortable_id":"anonymous"}"#,
            Self::Auctions | Self::ActiveAuctions => {
                r#"[{"id":"auction-1","name":"Benefit Auction","is_auction":true,"start_at":"2015-03-01T00:00:00Z","end_at":"2099-01-01T00:00:00Z"}]"#
            }
            Self::AuctionListings { .. } => {
                r#"[{"id":"sale-artwork-1","lot_number":1,"opening_bid_cents":10000,"bidder_positions_count":0,"artwork":{"id":"artwork-1","title":"Untitled"}}]"#
            }
            Self::AuctionInfo { .. } => {
                r#"{"id":"auction-1","name":"Benefit Auction","is_auction":true,"start_at":"2015-03-01T00:00:00Z","end_at":"2099-01-01T00:00:00Z"}"#
            }
            Self::AuctionInfoForArtwork { .. } => {
                r#"{"id":"sale-artwork-1","lot_number":1,"opening_bid_cents":10000,"highest_bid":{"amount_cents":12000}}"#
            }
            Self::FindBidderRegistration { .. } | Self::CreateUser { .. } => {
                r#"{"id":"user-1","email":"bidder@example.com","name":"Kiosk Bidder","paddle_number":"1234"}"#
            }
            Self::BidderDetailsNotification { .. } => {
                r#"{"id":"bidder-1","sale":{"id":"auction-1"},"pin":"1234"}"#
            }
            Self::LostPasswordNotification { .. } | Self::FindExistingEmailRegistration { .. } => {
                r#"{"status":"success"}"#
            }
        }
    }
}
