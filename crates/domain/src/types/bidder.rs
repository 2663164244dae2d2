//! Bidder identification inputs and lookup outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of looking up a bidder registration by phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidderLookup {
    Found,
    NotFound,
}

impl BidderLookup {
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Whatever the bidder typed in at the kiosk
///
/// Paddle number plus PIN takes precedence; email and password are only used
/// when either of those is missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BidderCredentials {
    pub paddle_number: Option<String>,
    pub pin: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub auction_id: String,
}

impl BidderCredentials {
    #[must_use]
    pub fn for_auction(auction_id: impl Into<String>) -> Self {
        Self { auction_id: auction_id.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_paddle(mut self, paddle_number: impl Into<String>, pin: impl Into<String>) -> Self {
        self.paddle_number = Some(paddle_number.into());
        self.pin = Some(pin.into());
        self
    }

    #[must_use]
    pub fn with_login(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Paddle number and PIN, when both were entered.
    #[must_use]
    pub fn paddle_and_pin(&self) -> Option<(&str, &str)> {
        match (self.paddle_number.as_deref(), self.pin.as_deref()) {
            (Some(number), Some(pin)) => Some((number, pin)),
            _ => None,
        }
    }
}

impl fmt::Debug for BidderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidderCredentials")
            .field("paddle_number", &self.paddle_number)
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auction_id", &self.auction_id)
            .finish()
    }
}
