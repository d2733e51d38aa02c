use crate::{cli::prompt, config, error, spotify, success};

/// Runs the authorization flow even if a cached token exists.
pub async fn auth() {
    let credentials = prompt::credentials();
    match spotify::auth::auth(&credentials, &config::spotify_scope()).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
