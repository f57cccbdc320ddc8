pub mod seed;

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Post operations
    fn create_post(&self, post: &NewPost) -> Result<i64>;
    fn list_posts(&self) -> Result<Vec<Post>>;
    fn count_posts(&self) -> Result<i64>;
    fn delete_post(&self, id: i64) -> Result<bool>;
    /// Rewrites title and/or content of posts whose title exactly matches
    /// `old_title`. Returns the number of rows touched. Used by the one-shot
    /// sample-content patches at boot.
    fn rewrite_post_by_title(
        &self,
        old_title: &str,
        new_title: Option<&str>,
        new_content: Option<&str>,
    ) -> Result<usize>;

    // Setting operations
    fn list_settings(&self) -> Result<Vec<Setting>>;
    fn upsert_setting(&self, key: &str, value: &str) -> Result<()>;
    /// Insert-if-absent; never overwrites an existing value.
    fn seed_setting(&self, key: &str, value: &str) -> Result<()>;

    // Booking operations
    fn create_booking(&self, booking: &NewBooking) -> Result<i64>;
    fn list_bookings(&self) -> Result<Vec<Booking>>;
    fn update_booking_status(&self, id: i64, status: BookingStatus) -> Result<bool>;
    fn delete_booking(&self, id: i64) -> Result<bool>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>>;
    fn update_token_last_used(&self, id: &str) -> Result<()>;
    fn has_admin_token(&self) -> Result<bool>;
}
