//! Braze REST API client.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::types::*;

const USERS_TRACK_PATH: &str = "/users/track";
const USERS_DELETE_PATH: &str = "/users/delete";
const USERS_MERGE_PATH: &str = "/users/merge";
const USERS_EXPORT_IDS_PATH: &str = "/users/export/ids";
const MESSAGES_SEND_PATH: &str = "/messages/send";
const CAMPAIGNS_TRIGGER_SEND_PATH: &str = "/campaigns/trigger/send";

/// Client for the Braze REST API.
///
/// The client is cheap to clone and safe to share across tasks. Every
/// endpoint method takes a [`CancellationToken`]; cancelling it abandons
/// the request, aborting the connection if one is in flight. The Braze
/// request may still reach the server in that case, so cancellation is not
/// a rollback.
#[derive(Clone)]
pub struct BrazeClient {
    base_url: Url,
    auth: HeaderValue,
    http: reqwest::Client,
}

impl BrazeClient {
    /// Build a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            Error::InvalidRequest("API key is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);

        let http = match config.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.timeout)
                .build()?,
        };

        Ok(Self {
            base_url,
            auth,
            http,
        })
    }

    // ---------- Users ----------

    /// Record attributes, events and purchases for one or more users
    /// (`POST /users/track`).
    ///
    /// Braze may accept part of a batch and report the rest in
    /// [`ApiResponse::errors`]; such partial acceptance is still `Ok`.
    pub async fn track_users(
        &self,
        ctx: &CancellationToken,
        request: &UsersTrackRequest,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, USERS_TRACK_PATH, Some(request))
            .await
    }

    /// Delete users by identifier (`POST /users/delete`).
    pub async fn delete_users(
        &self,
        ctx: &CancellationToken,
        request: &UsersDeleteRequest,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, USERS_DELETE_PATH, Some(request))
            .await
    }

    /// Not supported yet; fails with [`Error::NotImplemented`].
    pub async fn identify_users(
        &self,
        _ctx: &CancellationToken,
        _request: &UsersIdentifyRequest,
    ) -> Result<ApiResponse> {
        Err(Error::NotImplemented("users/identify"))
    }

    /// Not supported yet; fails with [`Error::NotImplemented`].
    pub async fn create_user_alias(
        &self,
        _ctx: &CancellationToken,
        _request: &UsersCreateAliasRequest,
    ) -> Result<ApiResponse> {
        Err(Error::NotImplemented("users/alias/new"))
    }

    /// Merge duplicate user profiles (`POST /users/merge`).
    pub async fn merge_users(
        &self,
        ctx: &CancellationToken,
        request: &UsersMergeRequest,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, USERS_MERGE_PATH, Some(request))
            .await
    }

    /// Export user profiles by identifier (`POST /users/export/ids`).
    pub async fn export_user_ids(
        &self,
        ctx: &CancellationToken,
        request: &UsersExportIdsRequest,
    ) -> Result<UsersExportIdsResponse> {
        self.execute(ctx, Method::POST, USERS_EXPORT_IDS_PATH, Some(request))
            .await
    }

    // ---------- Messaging ----------

    /// Send messages to the targeted users (`POST /messages/send`).
    pub async fn send_messages(
        &self,
        ctx: &CancellationToken,
        request: &SendMessagesRequest,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, MESSAGES_SEND_PATH, Some(request))
            .await
    }

    /// Trigger an API-triggered campaign send
    /// (`POST /campaigns/trigger/send`).
    pub async fn trigger_campaign(
        &self,
        ctx: &CancellationToken,
        request: &TriggerCampaignRequest,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, CAMPAIGNS_TRIGGER_SEND_PATH, Some(request))
            .await
    }

    /// Send a transactional campaign message to a single user
    /// (`POST /transactional/v1/campaigns/{campaign_id}/send`).
    pub async fn send_transactional(
        &self,
        ctx: &CancellationToken,
        campaign_id: &str,
        request: &TransactionalSendRequest,
    ) -> Result<ApiResponse> {
        let path = format!("/transactional/v1/campaigns/{campaign_id}/send");
        self.execute(ctx, Method::POST, &path, Some(request)).await
    }

    // ---------- Preference center ----------

    /// Generate a preference center link for a user
    /// (`POST /preference_center/v1/{id}/url/{user_id}`).
    pub async fn create_preference_center_url(
        &self,
        ctx: &CancellationToken,
        request: &PreferenceCenterUrlRequest,
    ) -> Result<PreferenceCenterUrlResponse> {
        request.validate()?;
        let path = format!(
            "/preference_center/v1/{}/url/{}",
            request.preference_center_id, request.user_id
        );
        self.execute(ctx, Method::POST, &path, Some(request)).await
    }

    // ---------- Dispatch ----------

    /// Send one request and classify the response.
    ///
    /// The request is never dispatched on an already-cancelled token, and a
    /// token cancelled mid-flight abandons the connection, whether the call
    /// is still waiting on the response or already reading its body.
    async fn execute<B, T>(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.base_url.join(path)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, self.auth.clone());
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(Error::Serialize)?;
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }

        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }

        debug!(%method, %url, "sending request");
        // One race covers the whole exchange: cancelling the token aborts
        // the call while it awaits the response head or reads the body.
        tokio::select! {
            _ = ctx.cancelled() => Err(Error::Cancelled),
            result = async {
                let response = request.send().await?;
                let status = response.status().as_u16();
                debug!(status, %url, "received response");
                match status {
                    // Accepted, possibly with minor per-item errors in the body.
                    200 | 201 | 202 => {
                        let body = response.bytes().await?;
                        if body.is_empty() {
                            return Ok(T::default());
                        }
                        serde_json::from_slice(&body).map_err(Error::Decode)
                    }
                    // Statuses documented to carry an error envelope.
                    400 | 401 | 403 | 404 | 422 | 429 => {
                        let body = response.bytes().await?;
                        let envelope: ApiResponse =
                            serde_json::from_slice(&body).map_err(Error::Decode)?;
                        Err(Error::Api(ApiError {
                            status,
                            response: envelope,
                        }))
                    }
                    // Anything else: report the status, never touch the body.
                    _ => Err(Error::Api(ApiError {
                        status,
                        response: ApiResponse::default(),
                    })),
                }
            } => result,
        }
    }
}
