use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::BookingStatus;

/// Body of POST /api/settings: a mapping of keys to upsert. Keys not present
/// retain their prior values.
#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    pub settings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
