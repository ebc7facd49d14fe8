//! Google OAuth 2.0 authorization for the Google Drive sink.
//!
//! Implements the installed-application flow with PKCE:
//!
//! 1. **PKCE Setup**: random code verifier and its SHA256 challenge
//! 2. **Server Start**: local callback server on the configured address
//! 3. **Browser Launch**: the consent page opens in the default browser
//! 4. **Callback Handling**: the callback exchanges the code for a token
//! 5. **Wait**: [`authorize`] polls the shared state until a token arrives
//!
//! The resulting [`Token`] is the opaque session [`crate::storage::GoogleDrive`]
//! is built from. Tokens are not cached between runs.

use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::GoogleSection,
    error::{BackupError, Result},
    http::send_checked,
    info,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

const MAX_WAIT: Duration = Duration::from_secs(120);

pub type SharedAuthState = Arc<Mutex<Option<PkceToken>>>;

/// Client registration needed by the callback to finish the exchange.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub token_url: String,
}

impl From<&GoogleSection> for OAuthClient {
    fn from(google: &GoogleSection) -> Self {
        Self {
            client_id: google.client_id.clone(),
            client_secret: google.client_secret.clone(),
            redirect_uri: google.redirect_uri(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Runs the browser authorization flow and returns an access token.
///
/// # Errors
///
/// Fails when the callback address cannot be bound or no token arrives
/// within two minutes.
pub async fn authorize(google: &GoogleSection) -> Result<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let oauth = Arc::new(OAuthClient::from(google));

    let addr = SocketAddr::from_str(&google.redirect_addr)
        .map_err(|e| BackupError::Auth(format!("invalid redirect address: {e}")))?;
    let listener = TcpListener::bind(addr).await?;

    let shared_state: SharedAuthState = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server_oauth = Arc::clone(&oauth);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_state, server_oauth).await {
            log::error!("OAuth callback server stopped: {e}");
        }
    });

    let auth_url = authorization_url(&oauth, &code_challenge);
    info!("Authorize Google Drive access in your browser");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    match token {
        Some(token) => {
            log::info!("Google Drive authorization succeeded");
            Ok(token)
        }
        None => Err(BackupError::Auth(
            "authentication failed or timed out".to_string(),
        )),
    }
}

pub fn authorization_url(oauth: &OAuthClient, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}&access_type=offline",
        auth_url = GOOGLE_AUTH_URL,
        client_id = oauth.client_id,
        redirect_uri = oauth.redirect_uri,
        code_challenge = code_challenge,
        scope = DRIVE_SCOPE,
    )
}

async fn wait_for_token(shared_state: SharedAuthState) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token using PKCE.
pub async fn exchange_code_pkce(oauth: &OAuthClient, code: &str, verifier: &str) -> Result<Token> {
    let client = Client::new();
    let request = client.post(&oauth.token_url).form(&[
        ("grant_type", "authorization_code"),
        ("client_id", oauth.client_id.as_str()),
        ("client_secret", oauth.client_secret.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", oauth.redirect_uri.as_str()),
    ]);

    let response = send_checked(request, "exchanging authorization code").await?;
    let json: TokenResponse = response.json().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token,
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
