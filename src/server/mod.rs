mod bookings;
pub mod dto;
mod posts;
pub mod response;
mod router;
mod settings;

pub use router::{AppState, create_router};
