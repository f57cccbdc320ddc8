//! In-memory client state: a disposable read-through copy of the server's
//! three resources, rebuilt wholesale after every mutation. There is no
//! incremental patching or merge logic; the last full fetch wins.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::{Booking, BookingStatus, NewBooking, NewPost, Post, SiteSettings};

use super::ApiClient;

/// How long the booking form shows its confirmation before returning to
/// the editing state.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

const DEFAULT_SERVICE: &str = "사주 운명 상담";

/// Single source of truth for the rendered site and the admin panel.
///
/// Bookings are an admin-only resource; without a token the reload skips
/// them and they stay empty.
pub struct SiteState {
    api: ApiClient,
    pub posts: Vec<Post>,
    pub settings: SiteSettings,
    pub bookings: Vec<Booking>,
    /// Mirror of `settings.primary_color`, updated eagerly so a color change
    /// is visible without waiting for the next full fetch.
    pub theme_color: String,
}

impl SiteState {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let settings = SiteSettings::default();
        let theme_color = settings.primary_color.clone();
        Self {
            api,
            posts: Vec::new(),
            settings,
            bookings: Vec::new(),
            theme_color,
        }
    }

    /// The invalidate-and-reload primitive: discards the cached copy and
    /// refetches every resource. Called on initial load and after every
    /// mutation; consistency is eventual, not transactional.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.posts = self.api.fetch_posts()?;
        self.settings = self.api.fetch_settings()?;
        self.theme_color = self.settings.primary_color.clone();
        if self.api.has_token() {
            self.bookings = self.api.fetch_bookings()?;
        }
        Ok(())
    }

    pub fn add_post(&mut self, post: &NewPost) -> anyhow::Result<i64> {
        let id = self.api.create_post(post)?;
        self.reload()?;
        Ok(id)
    }

    pub fn remove_post(&mut self, id: i64) -> anyhow::Result<()> {
        self.api.delete_post(id)?;
        self.reload()
    }

    /// Saves the submitted keys and applies a submitted primary color to the
    /// theme immediately, before the reload lands.
    pub fn save_settings(&mut self, settings: &BTreeMap<String, String>) -> anyhow::Result<()> {
        self.api.save_settings(settings)?;
        if let Some(color) = settings.get("primary_color") {
            self.theme_color = color.clone();
        }
        self.reload()
    }

    pub fn set_booking_status(&mut self, id: i64, status: BookingStatus) -> anyhow::Result<()> {
        self.api.set_booking_status(id, status)?;
        self.reload()
    }

    pub fn remove_booking(&mut self, id: i64) -> anyhow::Result<()> {
        self.api.delete_booking(id)?;
        self.reload()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    /// Confirmation showing; cleared after `SUCCESS_DISPLAY` or on dismiss.
    Success,
    /// Submission failed; the fields are retained for retry.
    Failed,
}

/// The public booking submission form.
///
/// `Editing → Submitting → Success → Editing` on the happy path;
/// `Submitting → Failed → Editing` when the request errors.
pub struct BookingForm {
    pub fields: NewBooking,
    pub phase: FormPhase,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: empty_fields(),
            phase: FormPhase::Editing,
        }
    }

    /// Fire-and-forget submission. On success the form resets and shows the
    /// confirmation; on any error the fields stay populated for retry.
    pub fn submit(&mut self, api: &ApiClient) -> anyhow::Result<()> {
        self.phase = FormPhase::Submitting;
        match api.create_booking(&self.fields) {
            Ok(_id) => {
                self.fields = empty_fields();
                self.phase = FormPhase::Success;
                Ok(())
            }
            Err(e) => {
                self.phase = FormPhase::Failed;
                Err(e)
            }
        }
    }

    /// User action returning the form to the editing state.
    pub fn dismiss(&mut self) {
        if matches!(self.phase, FormPhase::Success | FormPhase::Failed) {
            self.phase = FormPhase::Editing;
        }
    }

    /// Clears the confirmation once it has been shown long enough.
    pub fn tick(&mut self, shown_for: Duration) {
        if self.phase == FormPhase::Success && shown_for >= SUCCESS_DISPLAY {
            self.phase = FormPhase::Editing;
        }
    }
}

fn empty_fields() -> NewBooking {
    NewBooking {
        name: String::new(),
        phone: String::new(),
        service: DEFAULT_SERVICE.to_string(),
        date: String::new(),
        time: String::new(),
        message: None,
    }
}
