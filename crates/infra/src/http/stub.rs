//! Offline transport answering from catalog sample responses

use async_trait::async_trait;
use bidkiosk_core::{HttpTransport, TransportRequest, TransportResponse};
use bidkiosk_domain::{ApiError, ApiTarget, GuestEndpoint, HttpMethod, Result, UserEndpoint};
use tracing::{debug, warn};
use url::Url;

const WILDCARD: &str = "*";

/// Transport that never touches the network
///
/// Requests are matched back to their catalog entry by method and path and
/// answered with that entry's sample body and status 200.
#[derive(Debug, Clone)]
pub struct StubTransport {
    routes: Vec<(HttpMethod, String, &'static str)>,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Self {
        let routes = prototypes()
            .into_iter()
            .map(|target| {
                let endpoint = match &target {
                    ApiTarget::Guest(guest) => (guest.method(), guest.path()),
                    ApiTarget::User(user) => (user.method(), user.path()),
                };
                (endpoint.0, endpoint.1, target.sample_response())
            })
            .collect();
        Self { routes }
    }

    fn sample_for(&self, method: HttpMethod, path: &str) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|(route_method, pattern, _)| *route_method == method && path_matches(pattern, path))
            .map(|(_, _, body)| *body)
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let parsed = Url::parse(&request.url).map_err(|e| ApiError::Transport {
            url: Some(request.url.clone()),
            message: format!("Invalid URL: {e}"),
            is_redirect: false,
        })?;

        match self.sample_for(request.method, parsed.path()) {
            Some(body) => {
                debug!(method = %request.method, url = %request.url, "serving stubbed response");
                Ok(TransportResponse {
                    status: 200,
                    url: request.url,
                    location: None,
                    body: body.as_bytes().to_vec(),
                })
            }
            None => {
                warn!(method = %request.method, url = %request.url, "no stubbed response");
                Ok(TransportResponse {
                    status: 404,
                    url: request.url,
                    location: None,
                    body: br#"{"error":"not stubbed"}"#.to_vec(),
                })
            }
        }
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    pattern.len() == path.len()
        && pattern.iter().zip(&path).all(|(expected, actual)| *expected == WILDCARD || expected == actual)
}

/// One value per catalog operation, identifiers replaced by wildcards.
fn prototypes() -> Vec<ApiTarget> {
    let any = || WILDCARD.to_string();
    vec![
        GuestEndpoint::XApp.into(),
        GuestEndpoint::XAuth { email: any(), password: any() }.into(),
        GuestEndpoint::TrustToken { number: any(), auction_pin: any() }.into(),
        GuestEndpoint::SystemTime.into(),
        GuestEndpoint::Ping.into(),
        GuestEndpoint::Artwork { id: any() }.into(),
        GuestEndpoint::Artist { id: any() }.into(),
        GuestEndpoint::Auctions.into(),
        GuestEndpoint::ActiveAuctions.into(),
        GuestEndpoint::AuctionListings { id: any(), page: 1, page_size: 1 }.into(),
        GuestEndpoint::AuctionInfo { auction_id: any() }.into(),
        GuestEndpoint::AuctionInfoForArtwork { auction_id: any(), artwork_id: any() }.into(),
        GuestEndpoint::FindBidderRegistration { auction_id: any(), phone: any() }.into(),
        GuestEndpoint::CreateUser {
            email: any(),
            password: any(),
            phone: any(),
            post_code: any(),
            name: any(),
        }
        .into(),
        GuestEndpoint::BidderDetailsNotification { auction_id: any(), identifier: any() }.into(),
        GuestEndpoint::LostPasswordNotification { email: any() }.into(),
        GuestEndpoint::FindExistingEmailRegistration { email: any() }.into(),
        UserEndpoint::MyCreditCards.into(),
        UserEndpoint::CreatePinForBidder { bidder_id: any() }.into(),
        UserEndpoint::RegisterToBid { auction_id: any() }.into(),
        UserEndpoint::MyBiddersForAuction { auction_id: any() }.into(),
        UserEndpoint::MyBidPositionsForAuctionArtwork { auction_id: any(), artwork_id: any() }
            .into(),
        UserEndpoint::MyBidPosition { id: any() }.into(),
        UserEndpoint::PlaceABid { auction_id: any(), artwork_id: any(), max_bid_cents: 0 }.into(),
        UserEndpoint::UpdateMe { email: any(), phone: any(), post_code: any(), name: any() }.into(),
        UserEndpoint::RegisterCard { stripe_token: any(), swiped: false }.into(),
        UserEndpoint::Me.into(),
    ]
}
