//! User session authorization

use std::fmt;

use crate::constants::{ACCESS_TOKEN_HEADER, NUMBER_HEADER, PIN_HEADER, SALE_ID_HEADER};

/// Paddle (or phone) number and PIN registered for one auction
#[derive(Clone, PartialEq, Eq)]
pub struct PaddleCredentials {
    pub paddle_number: String,
    pub pin: String,
    pub auction_id: String,
}

impl PaddleCredentials {
    #[must_use]
    pub fn new(
        paddle_number: impl Into<String>,
        pin: impl Into<String>,
        auction_id: impl Into<String>,
    ) -> Self {
        Self { paddle_number: paddle_number.into(), pin: pin.into(), auction_id: auction_id.into() }
    }
}

impl fmt::Debug for PaddleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddleCredentials")
            .field("paddle_number", &self.paddle_number)
            .field("pin", &"<redacted>")
            .field("auction_id", &self.auction_id)
            .finish()
    }
}

/// How a user session authorizes its requests
#[derive(Clone, PartialEq, Eq)]
pub enum UserAuth {
    /// OAuth access token from a credential exchange
    AccessToken(String),
    /// Static paddle headers, no exchange needed
    Paddle(PaddleCredentials),
}

impl UserAuth {
    /// Headers injected into every request of the session.
    #[must_use]
    pub fn headers(&self) -> Vec<(String, String)> {
        match self {
            Self::AccessToken(token) => vec![(ACCESS_TOKEN_HEADER.to_string(), token.clone())],
            Self::Paddle(credentials) => vec![
                (PIN_HEADER.to_string(), credentials.pin.clone()),
                (NUMBER_HEADER.to_string(), credentials.paddle_number.clone()),
                (SALE_ID_HEADER.to_string(), credentials.auction_id.clone()),
            ],
        }
    }
}

impl fmt::Debug for UserAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::Paddle(credentials) => f.debug_tuple("Paddle").field(credentials).finish(),
        }
    }
}
