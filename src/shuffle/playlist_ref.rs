use std::fmt;

const URI_SCHEME: &str = "spotify:";
const URI_MARKER: &str = ":playlist:";
const URL_HOST: &str = "open.spotify.com/";
const URL_SEGMENT: &str = "playlist";

/// Normalized identifier of a remote playlist.
///
/// Accepts a bare ID, a `spotify:playlist:<id>` URI (also the older
/// `spotify:user:<name>:playlist:<id>` form) or an
/// `https://open.spotify.com/playlist/<id>?si=...` URL, including localized
/// paths such as `/intl-de/playlist/<id>`. All three forms of the same
/// playlist parse to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistRef(String);

impl PlaylistRef {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let uri_marker = input
            .starts_with(URI_SCHEME)
            .then(|| input.rfind(URI_MARKER))
            .flatten();

        let id = if let Some(pos) = uri_marker {
            let rest = &input[pos + URI_MARKER.len()..];
            rest.split(':').next().unwrap_or(rest)
        } else if let Some(rest) = url_playlist_path(input) {
            rest.split(['/', '?', '#']).next().unwrap_or(rest)
        } else {
            input
        };

        Self(id.to_string())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the rest of an open.spotify.com URL path after its `playlist` segment.
fn url_playlist_path(input: &str) -> Option<&str> {
    let host = input.find(URL_HOST)?;
    let path = &input[host + URL_HOST.len()..];
    let path = path.split(['?', '#']).next().unwrap_or(path);

    let mut offset = 0;
    for segment in path.split('/') {
        if segment == URL_SEGMENT {
            return path.get(offset + segment.len() + 1..);
        }
        offset += segment.len() + 1;
    }
    None
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaylistRef {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}
