//! Service-account authentication
//!
//! Implements the OAuth 2.0 JWT-bearer grant: a claim set naming the
//! requested scopes is signed with the service account's RSA key and
//! exchanged at the key's token endpoint for a short-lived access token.

use crate::{SheetError, SheetResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scopes needed to find a spreadsheet by name and edit it
pub const SCOPES: &[&str] = &[
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields of a service-account JSON key file this crate uses
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Claim set of the signed assertion
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// A bearer token for the spreadsheet APIs
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ServiceAccountKey {
    /// Reads a service-account key file
    pub fn from_file(path: &Path) -> SheetResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses the JSON content of a service-account key file
    pub fn from_json(content: &str) -> SheetResult<Self> {
        let key: Self =
            serde_json::from_str(content).map_err(|e| SheetError::Credentials(e.to_string()))?;

        if key.client_email.is_empty() {
            return Err(SheetError::Credentials("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetError::Credentials(
                "private_key is not a PEM-encoded key".to_string(),
            ));
        }

        Ok(key)
    }

    /// Signs an RS256 assertion for the given scopes, valid for one hour from `now`
    pub fn assertion(&self, scopes: &[&str], now: DateTime<Utc>) -> SheetResult<String> {
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: scopes.join(" "),
            aud: self.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &key)?)
    }
}

/// Exchanges a signed assertion for an access token
///
/// # Arguments
///
/// * `client` - HTTP client used for the token request
/// * `key` - Service-account key; its `token_uri` receives the request
/// * `scopes` - OAuth scopes requested for the token
///
/// # Returns
///
/// * `Ok(AccessToken)` - Bearer token, with its expiry when reported
/// * `Err(SheetError::Api)` - The token endpoint answered with an error status
/// * `Err(SheetError)` - Signing or transport failed
pub async fn fetch_access_token(
    client: &Client,
    key: &ServiceAccountKey,
    scopes: &[&str],
) -> SheetResult<AccessToken> {
    let now = Utc::now();
    let assertion = key.assertion(scopes, now)?;

    tracing::debug!("Requesting access token for {}", key.client_email);
    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SheetError::Api {
            url: key.token_uri.clone(),
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(AccessToken {
        token: token.access_token,
        expires_at: token.expires_in.map(|secs| now + Duration::seconds(secs)),
    })
}
