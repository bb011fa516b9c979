//! Authorized sessions
//!
//! The exporter treats authentication as an opaque capability: something
//! that hands out a bearer token or fails. Two sources exist: a token given
//! through the environment, and the OAuth installed-application flow with a
//! cached refresh token.

use super::error::SheetsError;
use crate::consts::export_consts::{
    CONNECT_TIMEOUT_SECS, DEFAULT_AUTH_URI, DEFAULT_TOKEN_URI, OAUTH_REDIRECT_URI,
    REQUEST_TIMEOUT_SECS, SHEETS_SCOPE,
};
use crate::print_cmd_info;
use log::{info, warn};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// A token obtained elsewhere.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, SheetsError> {
        if self.0.trim().is_empty() {
            return Err(SheetsError::Auth("empty access token".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// Client secrets as downloaded from the cloud console.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Reads an `installed` (or `web`) client secrets file.
    pub fn load_from_file(path: &Path) -> Result<Self, SheetsError> {
        let buf = fs::read(path).map_err(|e| {
            SheetsError::Auth(format!(
                "client secrets not readable at {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: ClientSecretsFile = serde_json::from_slice(&buf)?;
        file.installed.or(file.web).ok_or_else(|| {
            SheetsError::Auth(format!(
                "{} has neither an 'installed' nor a 'web' section",
                path.display()
            ))
        })
    }
}

/// Cached credentials that can mint new access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizedUser {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl AuthorizedUser {
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Saves the credentials, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// OAuth installed-application flow.
///
/// Reuses the cached authorized user when possible; otherwise asks the user
/// to visit the consent page and paste back the redirect URL. The access
/// token is kept for the rest of the run.
pub struct InstalledAppFlow {
    http: Client,
    credentials_path: Option<PathBuf>,
    token_cache_path: Option<PathBuf>,
    token: Mutex<Option<String>>,
}

impl InstalledAppFlow {
    pub fn new(
        credentials_path: Option<PathBuf>,
        token_cache_path: Option<PathBuf>,
    ) -> Result<Self, SheetsError> {
        Ok(Self {
            http: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            credentials_path,
            token_cache_path,
            token: Mutex::new(None),
        })
    }

    fn cached_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn remember(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn authorized_user(&self) -> Option<AuthorizedUser> {
        let path = self.token_cache_path.as_deref()?;
        match AuthorizedUser::load_from_file(path) {
            Ok(user) => Some(user),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Ignoring unreadable token cache {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn refresh(&self, user: &AuthorizedUser) -> Result<String, SheetsError> {
        let response = self
            .http
            .post(&user.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", user.client_id.as_str()),
                ("client_secret", user.client_secret.as_str()),
                ("refresh_token", user.refresh_token.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SheetsError::from_response(response).await);
        }
        let token: TokenResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(token.access_token)
    }

    async fn consent(&self) -> Result<String, SheetsError> {
        let path = self
            .credentials_path
            .as_deref()
            .ok_or_else(|| SheetsError::Auth("no client secrets configured".to_string()))?;
        let secrets = ClientSecrets::load_from_file(path)?;

        print_cmd_info!(
            "Authorization required",
            "Open this URL, approve access and paste the address you are redirected to:\n{}",
            consent_url(&secrets)
        );
        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        let code = extract_code(&line)
            .ok_or_else(|| SheetsError::Auth("no authorization code supplied".to_string()))?;

        let response = self
            .http
            .post(&secrets.token_uri)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("client_id", secrets.client_id.as_str()),
                ("client_secret", secrets.client_secret.as_str()),
                ("redirect_uri", OAUTH_REDIRECT_URI),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SheetsError::from_response(response).await);
        }
        let token: TokenResponse = serde_json::from_slice(&response.bytes().await?)?;

        if let (Some(refresh_token), Some(cache)) = (token.refresh_token, &self.token_cache_path) {
            let user = AuthorizedUser {
                client_id: secrets.client_id,
                client_secret: secrets.client_secret,
                refresh_token,
                token_uri: secrets.token_uri,
            };
            match user.save(cache) {
                Ok(()) => info!("Saved authorized user to {}", cache.display()),
                Err(e) => warn!("Could not save authorized user: {}", e),
            }
        }
        Ok(token.access_token)
    }
}

#[async_trait::async_trait]
impl TokenSource for InstalledAppFlow {
    async fn access_token(&self) -> Result<String, SheetsError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let token = match self.authorized_user() {
            Some(user) => match self.refresh(&user).await {
                Ok(token) => token,
                Err(e) => {
                    warn!("Refreshing cached credentials failed: {}", e);
                    self.consent().await?
                }
            },
            None => self.consent().await?,
        };
        self.remember(&token);
        Ok(token)
    }
}

/// Consent page URL for the installed-application flow.
pub fn consent_url(secrets: &ClientSecrets) -> String {
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&access_type=offline&prompt=consent",
        secrets.auth_uri,
        urlencoding::encode(&secrets.client_id),
        urlencoding::encode(OAUTH_REDIRECT_URI),
        urlencoding::encode(SHEETS_SCOPE)
    )
}

/// Accepts either the bare code or the full redirect URL.
pub fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let Some((_, query)) = input.split_once('?') else {
        return Some(input.to_string());
    };
    query
        .split(['&', '#'])
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "code")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|code| code.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extracts_code_from_redirect_url() {
        assert_eq!(
            extract_code("http://localhost/?state=x&code=4%2F0Abc&scope=s\n").as_deref(),
            Some("4/0Abc")
        );
        assert_eq!(extract_code("  4/0Abc  ").as_deref(), Some("4/0Abc"));
        assert_eq!(extract_code("http://localhost/?error=access_denied"), None);
        assert_eq!(extract_code("\n"), None);
    }

    #[test]
    fn reads_installed_client_secrets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"{"installed": {"client_id": "id.apps", "client_secret": "s3cret"}}"#,
        )
        .unwrap();

        let secrets = ClientSecrets::load_from_file(&path).unwrap();

        assert_eq!(secrets.client_id, "id.apps");
        assert_eq!(secrets.token_uri, DEFAULT_TOKEN_URI);
        let url = consent_url(&secrets);
        assert!(url.starts_with(DEFAULT_AUTH_URI));
        assert!(url.contains("client_id=id.apps"));
        assert!(url.contains("spreadsheets.readonly"));
    }

    #[test]
    fn authorized_user_survives_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gspread").join("authorized_user.json");
        let user = AuthorizedUser {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: "refresh".into(),
            token_uri: DEFAULT_TOKEN_URI.into(),
        };

        user.save(&path).unwrap();

        assert_eq!(AuthorizedUser::load_from_file(&path).unwrap(), user);
    }

    #[tokio::test]
    // Without secrets or a cache the flow fails before prompting.
    async fn missing_secrets_is_an_auth_error() {
        let dir = tempdir().unwrap();
        let flow = InstalledAppFlow::new(
            Some(dir.path().join("credentials.json")),
            Some(dir.path().join("authorized_user.json")),
        )
        .unwrap();

        let err = flow.access_token().await.unwrap_err();

        assert!(matches!(err, SheetsError::Auth(_)));
    }

    #[tokio::test]
    async fn static_token_rejects_blank_values() {
        assert_eq!(StaticToken::new("abc").access_token().await.unwrap(), "abc");
        assert!(StaticToken::new("  ").access_token().await.is_err());
    }
}
