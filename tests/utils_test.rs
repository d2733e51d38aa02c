use std::time::Duration;

use serde_json::json;
use spshuffle::shuffle::{MAX_ITEMS_PER_REQUEST, PlaylistRef, RetryPolicy, batch};
use spshuffle::types::{
    AddTrackToPlaylistRequest, ApiErrorResponse, Credentials, PlaylistItem, PlaylistMetadata,
    PlaylistResponse, RemoveTracksFromPlaylistRequest, Token, TrackUri,
};
use spshuffle::utils::*;

// Helper function to create a token with the given scope
fn create_test_token(scope: &str) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: scope.to_string(),
        expires_in: 3600,
        obtained_at: 0,
    }
}

fn numbered(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("spotify:track:T{}", i)).collect()
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 digest is 32 bytes, 43 chars in unpadded URL-safe base64
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_build_authorize_url_pkce() {
    let credentials = Credentials {
        client_id: "my-client".to_string(),
        client_secret: None,
    };
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        &credentials,
        "http://127.0.0.1:8080/callback",
        "playlist-read-private playlist-modify-public",
        "verifier",
    )
    .unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=my-client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fcallback"));
    assert!(url.contains("scope=playlist-read-private+playlist-modify-public"));
    assert!(url.contains(&format!(
        "code_challenge={}",
        generate_code_challenge("verifier")
    )));
    assert!(url.contains("code_challenge_method=S256"));
}

#[test]
fn test_build_authorize_url_with_secret_skips_challenge() {
    let credentials = Credentials {
        client_id: "my-client".to_string(),
        client_secret: Some("secret".to_string()),
    };
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        &credentials,
        "http://127.0.0.1:8080/callback",
        "playlist-read-private",
        "verifier",
    )
    .unwrap();

    assert!(!url.contains("code_challenge"));
    assert!(!url.contains("secret"));
}

#[test]
fn test_build_authorize_url_rejects_invalid_base() {
    let credentials = Credentials {
        client_id: "id".to_string(),
        client_secret: None,
    };
    assert!(build_authorize_url("not a url", &credentials, "x", "y", "z").is_err());
}

#[test]
fn test_playlist_ref_forms_normalize_to_same_id() {
    let id = "37i9dQZF1DXcBWIGoYBM5M";
    let bare = PlaylistRef::parse(id);
    let uri = PlaylistRef::parse("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M");
    let url = PlaylistRef::parse(
        "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=018f62b3b9bf4513",
    );

    assert_eq!(bare.id(), id);
    assert_eq!(bare, uri);
    assert_eq!(bare, url);
}

#[test]
fn test_playlist_ref_edge_cases() {
    // Surrounding whitespace from prompts
    assert_eq!(PlaylistRef::parse("  abc123 \n").id(), "abc123");

    // URL without query string, with trailing slash or fragment
    assert_eq!(
        PlaylistRef::parse("https://open.spotify.com/playlist/abc123").id(),
        "abc123"
    );
    assert_eq!(
        PlaylistRef::parse("https://open.spotify.com/playlist/abc123/").id(),
        "abc123"
    );
    assert_eq!(
        PlaylistRef::parse("open.spotify.com/playlist/abc123#top").id(),
        "abc123"
    );

    // Legacy user URIs still carry the playlist marker
    assert_eq!(
        PlaylistRef::parse("spotify:user:someone:playlist:abc123").id(),
        "abc123"
    );

    assert!(PlaylistRef::parse("").is_empty());
    assert!(PlaylistRef::parse("   ").is_empty());
    assert_eq!(PlaylistRef::parse("abc123").to_string(), "abc123");
}

#[test]
fn test_playlist_ref_localized_urls() {
    assert_eq!(
        PlaylistRef::parse("https://open.spotify.com/intl-de/playlist/abc123?si=xyz").id(),
        "abc123"
    );
    assert_eq!(
        PlaylistRef::parse("https://open.spotify.com/intl-pt/playlist/abc123").id(),
        "abc123"
    );

    // the query string never selects the segment
    assert_eq!(
        PlaylistRef::parse("https://open.spotify.com/intl-fr/playlist/abc123?ref=playlist/other").id(),
        "abc123"
    );
}

#[test]
fn test_remove_request_shape() {
    let body = RemoveTracksFromPlaylistRequest {
        tracks: vec![
            TrackUri {
                uri: "spotify:track:a".to_string(),
            },
            TrackUri {
                uri: "spotify:track:b".to_string(),
            },
        ],
    };

    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({"tracks": [{"uri": "spotify:track:a"}, {"uri": "spotify:track:b"}]})
    );
}

#[test]
fn test_add_request_shape() {
    let body = AddTrackToPlaylistRequest {
        uris: vec!["spotify:track:b".to_string(), "spotify:track:a".to_string()],
    };

    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({"uris": ["spotify:track:b", "spotify:track:a"]})
    );
}

#[test]
fn test_api_error_body_decodes() {
    let json = r#"{"error": {"status": 404, "message": "Invalid playlist Id"}}"#;
    let res: ApiErrorResponse = serde_json::from_str(json).unwrap();

    assert_eq!(res.error.status, 404);
    assert_eq!(res.error.message, "Invalid playlist Id");
}

#[test]
fn test_batch_reassembles_input() {
    for len in [0, 1, 99, 100, 101, 150, 200, 237] {
        let items = numbered(len);
        let batches = batch(&items, MAX_ITEMS_PER_REQUEST);

        let joined: Vec<String> = batches.iter().flat_map(|b| b.iter().cloned()).collect();
        assert_eq!(joined, items, "len {}", len);

        assert_eq!(batches.len(), len.div_ceil(MAX_ITEMS_PER_REQUEST));
        assert!(batches.iter().all(|b| b.len() <= MAX_ITEMS_PER_REQUEST));
        if let Some((_, full)) = batches.split_last() {
            assert!(full.iter().all(|b| b.len() == MAX_ITEMS_PER_REQUEST));
        }
    }
}

#[test]
fn test_batch_sizes() {
    let items = numbered(237);
    let sizes: Vec<usize> = batch(&items, 100).iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100, 37]);

    let items = numbered(200);
    let sizes: Vec<usize> = batch(&items, 100).iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100]);

    let items = numbered(5);
    let sizes: Vec<usize> = batch(&items, 2).iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn test_batch_empty_and_zero_max() {
    let empty: Vec<String> = Vec::new();
    assert!(batch(&empty, 100).is_empty());

    let items = numbered(3);
    let batches = batch(&items, 0);
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|b| b.len() == 1));
}

#[test]
fn test_token_covers_scope() {
    let token = create_test_token("playlist-modify-public playlist-read-private playlist-modify-private");

    assert!(token.covers_scope("playlist-read-private playlist-modify-private"));
    assert!(token.covers_scope(""));
    assert!(!token.covers_scope("playlist-read-private user-follow-read"));

    let empty = create_test_token("");
    assert!(!empty.covers_scope("playlist-read-private"));
}

#[test]
fn test_playlist_item_uri() {
    assert_eq!(
        PlaylistItem::track("spotify:track:1").uri(),
        Some("spotify:track:1")
    );
    assert_eq!(PlaylistItem::unavailable().uri(), None);
    assert_eq!(PlaylistItem::track("").uri(), None);
}

#[test]
fn test_playlist_items_deserialize_null_tracks() {
    let json = r#"{
        "items": [
            {"track": {"uri": "spotify:track:a", "name": "A"}},
            {"track": null},
            {"track": {"uri": "spotify:track:b"}}
        ],
        "next": null,
        "total": 3
    }"#;

    let page: spshuffle::types::PlaylistItemsResponse = serde_json::from_str(json).unwrap();
    let uris: Vec<&str> = page.items.iter().filter_map(|i| i.uri()).collect();

    assert_eq!(page.items.len(), 3);
    assert_eq!(uris, vec!["spotify:track:a", "spotify:track:b"]);
}

#[test]
fn test_playlist_metadata_from_response() {
    let json = r#"{
        "name": "Road Trip",
        "external_urls": {"spotify": "https://open.spotify.com/playlist/abc"},
        "tracks": {"total": 42}
    }"#;

    let res: PlaylistResponse = serde_json::from_str(json).unwrap();
    let metadata = PlaylistMetadata::from(res);

    assert_eq!(metadata.name, "Road Trip");
    assert_eq!(metadata.external_url, "https://open.spotify.com/playlist/abc");
    assert_eq!(metadata.total_tracks, 42);
}

#[test]
fn test_default_retry_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_secs(5));
}
