use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::AuthSession, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<AuthSession>>>,
) -> Html<&'static str> {
    if let Some(err) = params.get("error") {
        shared_state.lock().await.error = Some(err.clone());
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    // exchange outside the lock so the waiting flow keeps polling
    let session = shared_state.lock().await.clone();

    match spotify::auth::exchange_code(code, &session).await {
        Ok(token) => {
            shared_state.lock().await.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            shared_state.lock().await.error = Some(e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
