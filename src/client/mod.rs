mod http;
mod state;

pub use http::ApiClient;
pub use state::{BookingForm, FormPhase, SUCCESS_DISPLAY, SiteState};
