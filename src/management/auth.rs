use std::path::PathBuf;

use chrono::Utc;

use crate::{
    spotify,
    types::{Credentials, Token},
    warning,
};

pub struct TokenManager {
    token: Token,
    credentials: Credentials,
    cache_path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, credentials: Credentials) -> Self {
        TokenManager {
            token,
            credentials,
            cache_path: Self::token_path(),
        }
    }

    /// Stores the token at `path` instead of the default cache location.
    pub fn with_cache_path(mut self, path: PathBuf) -> Self {
        self.cache_path = path;
        self
    }

    pub async fn load(credentials: Credentials) -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(token, credentials))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = &self.cache_path;
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first if it is
    /// about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let mut new_token =
                spotify::auth::refresh_token(&self.token.refresh_token, &self.credentials).await?;
            // Spotify may omit the refresh token when it is not rotated.
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            if new_token.scope.is_empty() {
                new_token.scope = self.token.scope.clone();
            }
            self.token = new_token;
            if let Err(e) = self.persist().await {
                warning!("Failed to save refreshed token to cache: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + 240 >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spshuffle/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
