use anyhow::Context;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;

// https://developers.google.com/identity/protocols/oauth2/native-app#offline

const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// OAuth client credentials as downloaded from the Google cloud console.
/// Both the "installed" and the "web" application shapes are understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretCredentials {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    #[serde(default)]
    installed: Option<ClientSecretCredentials>,
    #[serde(default)]
    web: Option<ClientSecretCredentials>,
}

impl ClientSecret {
    pub fn from_json(bytes: &[u8]) -> anyhow::Result<Self> {
        let file: ClientSecretFile =
            serde_json::from_slice(bytes).context("Client secret file is not valid JSON")?;
        let credentials = file
            .installed
            .or(file.web)
            .context("Client secret file has neither an installed nor a web client")?;

        Ok(Self {
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            token_uri: credentials
                .token_uri
                .unwrap_or_else(|| DEFAULT_TOKEN_ENDPOINT.to_string()),
        })
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Unable to read client secret file: {}", path))?;
        Self::from_json(&bytes)
    }
}

#[derive(Debug, Deserialize)]
struct RefreshTokenResponse {
    access_token: String,
    // Access token expires in specified in seconds
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    access_token: String,
    expires_ts: i64,
}

/// Mints access tokens from the long lived refresh token and keeps the
/// latest one around until it is about to expire
pub struct GoogleAuthProvider {
    client: Client,
    secret: ClientSecret,
    refresh_token: String,
    token: Mutex<Option<AccessToken>>,
}

impl GoogleAuthProvider {
    pub fn new(secret: ClientSecret, refresh_token: String) -> Self {
        Self {
            client: Client::new(),
            secret,
            refresh_token,
            token: Mutex::new(None),
        }
    }

    async fn refresh_access_token(&self) -> anyhow::Result<RefreshTokenResponse> {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let res = self
            .client
            .post(&self.secret.token_uri)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<RefreshTokenResponse>().await?)
    }

    pub async fn get_access_token(&self) -> anyhow::Result<String> {
        let mut token = self.token.lock().await;

        let now = Utc::now().timestamp_millis();
        let one_minute_in_millis = 1000 * 60;
        if let Some(token) = token.as_ref() {
            if now + one_minute_in_millis <= token.expires_ts {
                // Current access token is still valid for at least one minute so return it
                return Ok(token.access_token.clone());
            }
        }

        let tokens = self.refresh_access_token().await.map_err(|e| {
            warn!("Unable to refresh youtube access token. Error: {:?}", e);
            e
        })?;
        let now = Utc::now().timestamp_millis();
        let access_token = tokens.access_token.clone();
        *token = Some(AccessToken {
            access_token: tokens.access_token,
            expires_ts: now + tokens.expires_in * 1000,
        });

        Ok(access_token)
    }
}
