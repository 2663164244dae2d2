//! Operations that need a user session.

use serde_json::json;

use super::params::{bag, Parameters};
use super::{Endpoint, HttpMethod};

/// Authenticated-scope API operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserEndpoint {
    MyCreditCards,
    CreatePinForBidder { bidder_id: String },
    RegisterToBid { auction_id: String },
    MyBiddersForAuction { auction_id: String },
    MyBidPositionsForAuctionArtwork { auction_id: String, artwork_id: String },
    MyBidPosition { id: String },
    PlaceABid { auction_id: String, artwork_id: String, max_bid_cents: u64 },

    UpdateMe { email: String, phone: String, post_code: String, name: String },
    RegisterCard { stripe_token: String, swiped: bool },
    Me,
}

impl UserEndpoint {
    /// Stable operation name for logs and filters.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MyCreditCards => "MyCreditCards",
            Self::CreatePinForBidder { .. } => "CreatePinForBidder",
            Self::RegisterToBid { .. } => "RegisterToBid",
            Self::MyBiddersForAuction { .. } => "MyBiddersForAuction",
            Self::MyBidPositionsForAuctionArtwork { .. } => "MyBidPositionsForAuctionArtwork",
            Self::MyBidPosition { .. } => "MyBidPosition",
            Self::PlaceABid { .. } => "PlaceABid",
            Self::UpdateMe { .. } => "UpdateMe",
            Self::RegisterCard { .. } => "RegisterCard",
            Self::Me => "Me",
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::RegisterToBid { .. } => "/api/v1/bidder".to_string(),
            Self::MyCreditCards | Self::RegisterCard { .. } => "/api/v1/me/credit_cards".to_string(),
            Self::CreatePinForBidder { bidder_id } => format!("/api/v1/bidder/{bidder_id}/pin"),
            Self::Me | Self::UpdateMe { .. } => "/api/v1/me".to_string(),
            Self::MyBiddersForAuction { .. } => "/api/v1/me/bidders".to_string(),
            Self::MyBidPositionsForAuctionArtwork { .. } => "/api/v1/me/bidder_positions".to_string(),
            Self::MyBidPosition { id } => format!("/api/v1/me/bidder_position/{id}"),
            Self::PlaceABid { .. } => "/api/v1/me/bidder_position".to_string(),
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::PlaceABid { .. }
            | Self::RegisterCard { .. }
            | Self::RegisterToBid { .. }
            | Self::CreatePinForBidder { .. } => HttpMethod::Post,
            Self::UpdateMe { .. } => HttpMethod::Put,
            Self::MyCreditCards
            | Self::MyBiddersForAuction { .. }
            | Self::MyBidPositionsForAuctionArtwork { .. }
            | Self::MyBidPosition { .. }
            | Self::Me => HttpMethod::Get,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> Option<Parameters> {
        match self {
            Self::RegisterToBid { auction_id } | Self::MyBiddersForAuction { auction_id } => {
                bag(json!({ "sale_id": auction_id }))
            }
            Self::PlaceABid { auction_id, artwork_id, max_bid_cents } => bag(json!({
                "sale_id": auction_id,
                "artwork_id": artwork_id,
                "max_bid_amount_cents": max_bid_cents,
            })),
            Self::UpdateMe { email, phone, post_code, name } => bag(json!({
                "email": email,
                "phone": phone,
                "name": name,
                "location": { "postal_code": post_code },
            })),
            Self::RegisterCard { stripe_token, swiped } => bag(json!({
                "provider": "stripe",
                "token": stripe_token,
                "created_by_trusted_client": swiped,
            })),
            Self::MyBidPositionsForAuctionArtwork { auction_id, artwork_id } => {
                bag(json!({ "sale_id": auction_id, "artwork_id": artwork_id }))
            }
            Self::MyCreditCards
            | Self::CreatePinForBidder { .. }
            | Self::MyBidPosition { .. }
            | Self::Me => None,
        }
    }

    /// User requests are authorized by session headers, never the app token.
    #[must_use]
    pub fn descriptor(&self) -> Endpoint {
        Endpoint {
            path: self.path(),
            method: self.method(),
            parameters: self.parameters(),
            requires_app_token: false,
        }
    }

    #[must_use]
    pub const fn sample_response(&self) -> &'static str {
        match self {
            Self::CreatePinForBidder { .. } => r#"{"pin":"1234"}"#,
            Self::MyCreditCards => r#"[{"id":"card-1","brand":"Visa","last_digits":"4242"}]"#,
            Self::RegisterToBid { .. } => r#"{"id":"bidder-1","sale":{"id":"auction-1"}}"#,
            Self::MyBiddersForAuction { .. } => r#"[{"id":"bidder-1","sale":{"id":"auction-1"}}]"#,
            Self::Me | Self::UpdateMe { .. } => {
                r#"{"id":"user-1","email":"bidder@example.com","name":"Kiosk Bidder","paddle_number":"1234"}"#
            }
            Self::PlaceABid { .. } => {
                r#"{"id":"bidder-position-1","max_bid_amount_cents":12000,"processed_at":null}"#
            }
            Self::RegisterCard { .. } => r#"{"id":"card-1","brand":"Visa","last_digits":"4242"}"#,
            Self::MyBidPositionsForAuctionArtwork { .. } => {
                r#"[{"id":"bidder-position-1","max_bid_amount_cents":12000}]"#
            }
            Self::MyBidPosition { .. } => {
                r#"{"id":"bidder-position-1","max_bid_amount_cents":12000,"processed_at":"2015-03-01T12:00:00Z","active":true}"#
            }
        }
    }
}
