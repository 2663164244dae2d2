//! Bidder registration lookup
//!
//! The registration lookup answers with a redirect to the bidder resource
//! when the phone number is registered for the auction. Whether the redirect
//! was followed, stopped at a 3xx, or failed afterwards, the URL involved
//! contains the bidder path. This is a server behavior, not a contract.

use bidkiosk_domain::constants::BIDDER_RESOURCE_MARKER;
use bidkiosk_domain::{BidderLookup, Result};

use crate::http::ApiResponse;

/// Classify the outcome of a `FindBidderRegistration` request.
#[must_use]
pub fn classify_bidder_lookup(result: &Result<ApiResponse>) -> BidderLookup {
    let mentions_bidder = |url: &str| url.contains(BIDDER_RESOURCE_MARKER);

    let found = match result {
        Ok(response) => {
            response.location().is_some_and(mentions_bidder) || mentions_bidder(response.url())
        }
        Err(err) => err.url().is_some_and(mentions_bidder),
    };

    if found {
        BidderLookup::Found
    } else {
        BidderLookup::NotFound
    }
}
