//! REST client for the game backend
//!
//! `GameApi` is the seam between the controller/host and the network;
//! the browser implementation rides `fetch`, tests provide mocks.

use crate::error::Result;
use crate::types::{
    BlendRequest, BlendResponse, GameObject, LeaderboardResponse, SessionResponse,
};

/// Default backend base URL for local development
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Backend operations the game consumes
#[allow(async_fn_in_trait)]
pub trait GameApi {
    /// `GET /api/scores/session/{session_id}`
    async fn fetch_session(&self, session_id: &str) -> Result<SessionResponse>;

    /// `GET /api/objects/random/{blend_count}/{count}`
    async fn random_objects(&self, blend_count: u32, count: u32) -> Result<Vec<GameObject>>;

    /// `GET /api/objects/available/{blend_count}`
    async fn available_objects(&self, blend_count: u32) -> Result<Vec<GameObject>>;

    /// `POST /api/scores/blend`
    async fn blend(&self, request: &BlendRequest) -> Result<BlendResponse>;

    /// `GET /api/leaderboard/`
    async fn available_leaderboards(&self) -> Result<Vec<String>>;

    /// `GET /api/leaderboard/{system}?limit=N`
    async fn leaderboard(&self, system: &str, limit: u32) -> Result<LeaderboardResponse>;

    /// `POST /api/leaderboard/submit/{session_id}?player_name=...`
    async fn submit_score(&self, session_id: &str, player_name: &str) -> Result<()>;
}

/// Fetch-backed client (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct HttpApi {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        use crate::error::GameError;
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let opts = web_sys::RequestInit::new();
        opts.set_method(method);
        let has_body = body.is_some();
        if let Some(body) = body {
            opts.set_body(&wasm_bindgen::JsValue::from_str(&body));
        }

        let url = format!("{}{}", self.base_url, path);
        let request = web_sys::Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| GameError::Network(format!("request init failed: {e:?}")))?;
        if has_body {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| GameError::Network(format!("header set failed: {e:?}")))?;
        }

        let window = web_sys::window()
            .ok_or_else(|| GameError::Network("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| GameError::Network(format!("fetch failed: {e:?}")))?;
        let resp: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|e| GameError::Network(format!("response cast failed: {e:?}")))?;

        if !resp.ok() {
            return Err(GameError::Api {
                status: resp.status(),
            });
        }

        let text = JsFuture::from(
            resp.text()
                .map_err(|e| GameError::Network(format!("body read failed: {e:?}")))?,
        )
        .await
        .map_err(|e| GameError::Network(format!("body await failed: {e:?}")))?;
        let text = text
            .as_string()
            .ok_or_else(|| GameError::Network("non-text response".to_string()))?;

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(target_arch = "wasm32")]
impl GameApi for HttpApi {
    async fn fetch_session(&self, session_id: &str) -> Result<SessionResponse> {
        self.request_json("GET", &format!("/api/scores/session/{session_id}"), None)
            .await
    }

    async fn random_objects(&self, blend_count: u32, count: u32) -> Result<Vec<GameObject>> {
        self.request_json(
            "GET",
            &format!("/api/objects/random/{blend_count}/{count}"),
            None,
        )
        .await
    }

    async fn available_objects(&self, blend_count: u32) -> Result<Vec<GameObject>> {
        self.request_json("GET", &format!("/api/objects/available/{blend_count}"), None)
            .await
    }

    async fn blend(&self, request: &BlendRequest) -> Result<BlendResponse> {
        let body = serde_json::to_string(request)?;
        self.request_json("POST", "/api/scores/blend", Some(body)).await
    }

    async fn available_leaderboards(&self) -> Result<Vec<String>> {
        self.request_json("GET", "/api/leaderboard/", None).await
    }

    async fn leaderboard(&self, system: &str, limit: u32) -> Result<LeaderboardResponse> {
        self.request_json("GET", &format!("/api/leaderboard/{system}?limit={limit}"), None)
            .await
    }

    async fn submit_score(&self, session_id: &str, player_name: &str) -> Result<()> {
        let name = String::from(js_sys::encode_uri_component(player_name));
        let _: serde_json::Value = self
            .request_json(
                "POST",
                &format!("/api/leaderboard/submit/{session_id}?player_name={name}"),
                None,
            )
            .await?;
        Ok(())
    }
}
