//! Status mapping and body decoding, kept free of I/O.

use reqwest::StatusCode;

use crate::error::{AuthError, FetchError};
use crate::models::wire::{BuddyList, TokenResponse};
use crate::models::Friend;
use crate::urls::UrlBuilder;

/// Map a response status onto the failure taxonomy.
pub(crate) fn check_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(AuthError::Unauthorized.into()),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
        s if s.is_success() => Ok(()),
        s => Err(FetchError::Status(s.as_u16())),
    }
}

pub(crate) fn decode_token(body: &[u8]) -> Result<TokenResponse, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a buddy list and reverse it relative to server order.
pub(crate) fn decode_friends(body: &[u8], urls: &UrlBuilder) -> Result<Vec<Friend>, FetchError> {
    let list: BuddyList = serde_json::from_slice(body)?;
    Ok(list
        .friends
        .into_iter()
        .rev()
        .map(|wire| Friend::from_wire(wire, urls))
        .collect())
}
