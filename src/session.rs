use url::Url;

/// Storage key the session token is persisted under.
pub const SESSION_KEY: &str = "spotify_session";

/// Query parameter carrying the session on the authorization redirect and on API calls.
pub const SESSION_PARAM: &str = "session_id";

/// Query parameter the backend sets on a failed authorization redirect.
const ERROR_PARAM: &str = "error";

/// Opaque credential handed out by the backend after Spotify consent.
/// Expiry is the backend's concern; the client keeps it until told otherwise.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns `None` for blank input, so an empty `session_id=` is no session at all.
    pub fn new(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Outcome of reading what the authorization redirect handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    /// `session_id` was present.
    Session(SessionToken),
    /// The backend redirected with `error=<reason>` (`auth_failed`, `token_failed`).
    Failed(String),
    /// Nothing usable in the input.
    Missing,
}

/// Parse the redirect the user pasted back after authorizing.
///
/// Accepts a full URL (`https://host/?session_id=abc`), a bare query or path
/// (`?session_id=abc`, `/?session_id=abc`), or the bare identifier itself.
pub fn parse_handoff(input: &str) -> Handoff {
    let input = input.trim();
    if input.is_empty() {
        return Handoff::Missing;
    }

    let parsed = Url::parse(input).ok().filter(|url| !url.cannot_be_a_base()).or_else(|| {
        if input.starts_with('?') || input.starts_with('/') || input.contains('=') {
            // Prepend a scheme+host so the query can be parsed.
            let relative = if input.starts_with('/') || input.starts_with('?') {
                input.to_string()
            } else {
                format!("?{input}")
            };
            Url::parse("http://localhost/").ok()?.join(&relative).ok()
        } else {
            None
        }
    });

    match parsed {
        Some(url) => from_query(&url),
        None => SessionToken::new(input).map_or(Handoff::Missing, Handoff::Session),
    }
}

fn from_query(url: &Url) -> Handoff {
    let mut error = None;
    for (key, value) in url.query_pairs() {
        if key == SESSION_PARAM {
            if let Some(token) = SessionToken::new(&value) {
                return Handoff::Session(token);
            }
        } else if key == ERROR_PARAM && error.is_none() {
            error = Some(value.into_owned());
        }
    }
    match error {
        Some(reason) => Handoff::Failed(reason),
        None => Handoff::Missing,
    }
}
