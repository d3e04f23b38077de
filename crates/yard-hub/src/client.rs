//! REST client for the positioning platform.
//!
//! The orchestration crates consume the [`Positioning`] trait so the
//! scheduler can run against a mock in tests; [`HubClient`] is the reqwest
//! implementation.  Provisioning endpoints (zones, fences, providers, bulk
//! delete) are not part of the trait — only the one-shot setup binaries use
//! them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use yard_core::{FenceId, TrackableId};

use crate::error::{HubError, HubResult};
use crate::trackable::{Fence, Provider, Trackable, Zone};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// The platform operations the orchestration core depends on.
///
/// All reads are possibly stale; `update_trackable` is a full-document
/// replace.  `get_trackable` maps "not found" to `Ok(None)` because the
/// transiting-product protocol treats deletion as a signal.
#[async_trait]
pub trait Positioning: Send + Sync {
    async fn get_trackable(&self, id: &TrackableId) -> HubResult<Option<Trackable>>;

    async fn all_trackables(&self) -> HubResult<Vec<Trackable>>;

    /// Trackables currently inside `fence` (spatial query).
    async fn trackables_in_fence(&self, fence: &FenceId) -> HubResult<Vec<Trackable>>;

    /// Create a trackable; the platform assigns the id and forces an
    /// initial location update.
    async fn create_trackable(&self, trackable: &Trackable) -> HubResult<Trackable>;

    /// Full-document replace keyed by `trackable.id`.
    async fn update_trackable(&self, trackable: &Trackable) -> HubResult<Trackable>;

    async fn delete_trackable(&self, id: &TrackableId) -> HubResult<()>;

    async fn all_fences(&self) -> HubResult<Vec<Fence>>;
}

// ── HubClient ─────────────────────────────────────────────────────────────────

/// reqwest-backed [`Positioning`] implementation.
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Client for the platform at `base_url` (e.g.
    /// `http://localhost:8081/deephub/v1`).
    pub fn new(base_url: impl Into<String>) -> HubResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map non-2xx responses to [`HubError::Status`].
    async fn checked(response: Response, path: &str) -> HubResult<Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status {
                status: status.as_u16(),
                path: path.to_owned(),
            });
        }
        Ok(response)
    }

    // ── Provisioning (setup binaries only) ────────────────────────────────

    pub async fn create_zone(&self, zone: &Zone) -> HubResult<Zone> {
        let path = "zones";
        let response = self.http.post(self.url(path)).json(zone).send().await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }

    pub async fn create_fence(&self, fence: &Fence) -> HubResult<Fence> {
        let path = "fences";
        let response = self.http.post(self.url(path)).json(fence).send().await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }

    pub async fn create_provider(&self, provider: &Provider) -> HubResult<Provider> {
        let path = "providers";
        let response = self.http.post(self.url(path)).json(provider).send().await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }

    /// Bulk-delete every trackable on the platform.
    pub async fn delete_all_trackables(&self) -> HubResult<()> {
        let path = "trackables";
        let response = self.http.delete(self.url(path)).send().await?;
        Self::checked(response, path).await?;
        Ok(())
    }
}

#[async_trait]
impl Positioning for HubClient {
    async fn get_trackable(&self, id: &TrackableId) -> HubResult<Option<Trackable>> {
        let path = format!("trackables/{id}");
        let response = self.http.get(self.url(&path)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: Value = Self::checked(response, &path).await?.json().await?;

        // Some platform builds answer 200 with a `{"type": "not found"}` body.
        if body.get("type").and_then(Value::as_str) == Some("not found") {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(body)?))
    }

    async fn all_trackables(&self) -> HubResult<Vec<Trackable>> {
        let path = "trackables/summary";
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }

    async fn trackables_in_fence(&self, fence: &FenceId) -> HubResult<Vec<Trackable>> {
        let path = format!("fences/{fence}/trackables");
        let response = self
            .http
            .get(self.url(&path))
            .query(&[("spatial_query", "true")])
            .send()
            .await?;
        Ok(Self::checked(response, &path).await?.json().await?)
    }

    async fn create_trackable(&self, trackable: &Trackable) -> HubResult<Trackable> {
        let path = "trackables";
        let response = self
            .http
            .post(self.url(path))
            .query(&[("force_location_update", "true")])
            .json(trackable)
            .send()
            .await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }

    async fn update_trackable(&self, trackable: &Trackable) -> HubResult<Trackable> {
        let path = format!("trackables/{}", trackable.id);
        let response = self
            .http
            .put(self.url(&path))
            .json(trackable)
            .send()
            .await?;
        Ok(Self::checked(response, &path).await?.json().await?)
    }

    async fn delete_trackable(&self, id: &TrackableId) -> HubResult<()> {
        let path = format!("trackables/{id}");
        let response = self.http.delete(self.url(&path)).send().await?;
        Self::checked(response, &path).await?;
        Ok(())
    }

    async fn all_fences(&self) -> HubResult<Vec<Fence>> {
        let path = "fences/summary";
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::checked(response, path).await?.json().await?)
    }
}
