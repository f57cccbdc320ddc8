use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::types::{Booking, BookingStatus, NewBooking, NewPost, Post, SiteSettings};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdBody {
    id: i64,
}

#[derive(Debug, Serialize)]
struct SaveSettingsBody<'a> {
    settings: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: BookingStatus,
}

/// Blocking HTTP wrapper over the REST surface, one method per
/// resource-operation pair. Admin operations require a token; the public
/// reads and the booking form do not.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn fetch_posts(&self) -> anyhow::Result<Vec<Post>> {
        self.get("/api/posts")
    }

    pub fn create_post(&self, post: &NewPost) -> anyhow::Result<i64> {
        let body: IdBody = self.send(self.client.post(self.url("/api/posts")).json(post))?;
        Ok(body.id)
    }

    pub fn delete_post(&self, id: i64) -> anyhow::Result<()> {
        let _: serde_json::Value =
            self.send(self.client.delete(self.url(&format!("/api/posts/{id}"))))?;
        Ok(())
    }

    pub fn fetch_settings(&self) -> anyhow::Result<SiteSettings> {
        self.get("/api/settings")
    }

    pub fn save_settings(&self, settings: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let _: serde_json::Value = self.send(
            self.client
                .post(self.url("/api/settings"))
                .json(&SaveSettingsBody { settings }),
        )?;
        Ok(())
    }

    pub fn fetch_bookings(&self) -> anyhow::Result<Vec<Booking>> {
        self.get("/api/bookings")
    }

    /// The booking form submission. Deliberately sent without a credential.
    pub fn create_booking(&self, booking: &NewBooking) -> anyhow::Result<i64> {
        let resp = self
            .client
            .post(self.url("/api/bookings"))
            .json(booking)
            .send()?;
        let body: IdBody = Self::parse(resp)?;
        Ok(body.id)
    }

    pub fn set_booking_status(&self, id: i64, status: BookingStatus) -> anyhow::Result<()> {
        let _: serde_json::Value = self.send(
            self.client
                .patch(self.url(&format!("/api/bookings/{id}")))
                .json(&StatusBody { status }),
        )?;
        Ok(())
    }

    pub fn delete_booking(&self, id: i64) -> anyhow::Result<()> {
        let _: serde_json::Value =
            self.send(self.client.delete(self.url(&format!("/api/bookings/{id}"))))?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        self.send(self.client.get(self.url(path)))
    }

    fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> anyhow::Result<T> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        Self::parse(req.send()?)
    }

    fn parse<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> anyhow::Result<T> {
        if resp.status().is_success() {
            Ok(resp.json()?)
        } else {
            let status = resp.status();
            let message = resp
                .json::<ErrorBody>()
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("server error ({status})"));
            Err(anyhow::anyhow!(message))
        }
    }
}
