mod middleware;
mod token;

pub use middleware::{AuthError, RequireAdmin};
pub use token::{TokenGenerator, parse_token};
