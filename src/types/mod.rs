mod models;
mod settings;

pub use models::{Booking, BookingStatus, NewBooking, NewPost, Post, Setting, Token};
pub use settings::{
    DEFAULT_HERO_TITLE, DEFAULT_PRIMARY_COLOR, DEFAULT_SITE_NAME, SiteSettings,
};
