//! Wire formats and the decoded friend-activity model.

mod friend;
pub(crate) mod wire;

pub use friend::{Album, Artist, Context, Friend, Track, User};
pub use wire::TokenResponse;
