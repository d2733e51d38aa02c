use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::types::Credentials;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the URL the user opens to grant the requested scope.
///
/// Without a client secret the PKCE challenge derived from `code_verifier`
/// is attached; with a secret the plain authorization code flow is used.
pub fn build_authorize_url(
    auth_url: &str,
    credentials: &Credentials,
    redirect_uri: &str,
    scope: &str,
    code_verifier: &str,
) -> Result<String, String> {
    let mut url = Url::parse(auth_url).map_err(|e| e.to_string())?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", &credentials.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", scope);

        if credentials.client_secret.is_none() {
            query
                .append_pair("code_challenge", &generate_code_challenge(code_verifier))
                .append_pair("code_challenge_method", "S256");
        }
    }

    Ok(url.to_string())
}
