use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config, info,
    management::TokenManager,
    server::start_api_server,
    types::{AuthSession, Credentials, Token},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res.refresh_token.unwrap_or_default(),
            scope: res.scope.unwrap_or_default(),
            expires_in: res.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Returns a token manager for `credentials`, authorizing only when needed.
///
/// A cached token is reused when it grants every scope in `scope`; otherwise
/// the interactive flow from [`auth`] runs. Errors here mean the user could
/// not be authenticated and nothing else should be attempted.
pub async fn authorize(credentials: &Credentials, scope: &str) -> Result<TokenManager, String> {
    if let Ok(mut manager) = TokenManager::load(credentials.clone()).await {
        if manager.current_token().covers_scope(scope) && manager.get_valid_token().await.is_ok() {
            return Ok(manager);
        }
        info!("Cached token is expired or lacks the required scope, authorizing again.");
    }

    auth(credentials, scope).await
}

/// Runs the OAuth authorization code flow and persists the resulting token.
///
/// 1. Starts the local callback server
/// 2. Opens the authorization URL in the browser (or prints it)
/// 3. Waits up to 60 seconds for the callback to deliver a token
/// 4. Stops the server and writes the token to the cache
///
/// With a client secret the code is exchanged using HTTP basic auth. Without
/// one the PKCE verifier stored in the session proves the request origin.
pub async fn auth(credentials: &Credentials, scope: &str) -> Result<TokenManager, String> {
    let code_verifier = utils::generate_code_verifier();
    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        credentials,
        &config::spotify_redirect_uri(),
        scope,
        &code_verifier,
    )?;

    let shared_state = Arc::new(Mutex::new(AuthSession {
        credentials: credentials.clone(),
        code_verifier,
        token: None,
        error: None,
    }));

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_token(shared_state).await;
    server.abort();

    let token = result?;
    let manager = TokenManager::new(token, credentials.clone());
    manager
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    Ok(manager)
}

async fn wait_for_token(shared_state: Arc<Mutex<AuthSession>>) -> Result<Token, String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let session = shared_state.lock().await;
        if let Some(err) = &session.error {
            return Err(format!("Authorization was not granted: {}", err));
        }
        if let Some(token) = &session.token {
            return Ok(token.clone());
        }
        drop(session);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err("Authentication timed out.".to_string())
}

fn with_client_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match &credentials.client_secret {
        Some(secret) => request.basic_auth(&credentials.client_id, Some(secret)),
        None => request,
    }
}

async fn request_token(request: RequestBuilder) -> Result<Token, String> {
    let res = request.send().await.map_err(|e| e.to_string())?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint responded with {}: {}", status, body));
    }

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(json.into())
}

/// Exchanges a refresh token for a new access token.
pub async fn refresh_token(refresh_token: &str, credentials: &Credentials) -> Result<Token, String> {
    let client = Client::new();
    let request = client.post(config::spotify_apitoken_url()).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", credentials.client_id.as_str()),
    ]);

    request_token(with_client_auth(request, credentials)).await
}

/// Exchanges the authorization code received by the callback for a token.
pub async fn exchange_code(code: &str, session: &AuthSession) -> Result<Token, String> {
    let redirect_uri = config::spotify_redirect_uri();
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri.as_str()),
        ("client_id", session.credentials.client_id.as_str()),
    ];
    if session.credentials.client_secret.is_none() {
        form.push(("code_verifier", session.code_verifier.as_str()));
    }

    let client = Client::new();
    let request = client.post(config::spotify_apitoken_url()).form(&form);

    request_token(with_client_auth(request, &session.credentials)).await
}
