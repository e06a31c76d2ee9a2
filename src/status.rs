/*!
 # Status mapping

 Translates the HTTP status of every effects request into a domain
 outcome before the body is looked at. Rules are checked in order and
 the first match wins: 401, then 404, then the expected success code.
*/

use tracing::warn;

use crate::transport::Response;
use crate::{Error, Result};

pub const OK: u16 = 200;
pub const NO_CONTENT: u16 = 204;
pub const UNAUTHORIZED: u16 = 401;
pub const NOT_FOUND: u16 = 404;

/// What a successful response looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// 200 with a body to decode
    Body,
    /// 204 without a body
    NoContent,
}

impl Expect {
    fn status(self) -> u16 {
        match self {
            Expect::Body => OK,
            Expect::NoContent => NO_CONTENT,
        }
    }
}

/// What a 404 means for the operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The operation names an effect
    Effect,
    /// The operation addresses an endpoint, not an effect
    Endpoint,
}

/// Checks `response` against the expected outcome
pub fn check(response: &Response, expect: Expect, target: Target) -> Result<()> {
    match response.status {
        UNAUTHORIZED => Err(Error::Unauthorized),
        NOT_FOUND => Err(match target {
            Target::Effect => Error::EffectNotFound,
            Target::Endpoint => Error::ResourceNotFound,
        }),
        status if status == expect.status() => Ok(()),
        status => {
            warn!("Expected status {}, got {}", expect.status(), status);
            Err(Error::UnexpectedResponse(status))
        }
    }
}
