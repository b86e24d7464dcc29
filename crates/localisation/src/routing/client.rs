//! HTTP binding of the transit routing service.
//!
//! Both endpoints take a JSON body and answer with the status-tagged payloads
//! described in [`super`]. Non-2xx answers are reported as
//! [`RoutingServiceError::Status`].

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{
    AccessibilityMapQuery, AccessibilityMapResponse, RoutingMode, RoutingService,
    RoutingServiceError, TimeDistanceByMode, TimeDistanceQuery,
};

#[derive(Debug, Clone)]
pub struct HttpRoutingService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeDistanceRequest<'a> {
    modes: &'a [RoutingMode],
    #[serde(flatten)]
    query: &'a TimeDistanceQuery,
}

impl HttpRoutingService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RoutingServiceError>
    where
        B: Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        debug!(%url, "calling routing service");

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RoutingServiceError::Status {
                status: status.as_u16(),
            });
        }

        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl RoutingService for HttpRoutingService {
    async fn transit_accessibility_map(
        &self,
        query: &AccessibilityMapQuery,
    ) -> Result<AccessibilityMapResponse, RoutingServiceError> {
        self.post("accessibility-map", query).await
    }

    async fn time_distance_by_mode(
        &self,
        modes: &[RoutingMode],
        query: &TimeDistanceQuery,
    ) -> Result<TimeDistanceByMode, RoutingServiceError> {
        let request = TimeDistanceRequest { modes, query };
        self.post("time-distance", &request).await
    }
}
