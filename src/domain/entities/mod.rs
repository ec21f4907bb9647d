//! Domain entity definitions.

mod request;
mod token;
mod user;

pub use request::{AUTHORIZATION, ApiRequest, ApiResponse, HttpMethod};
pub use token::AuthToken;
pub use user::UserProfile;
