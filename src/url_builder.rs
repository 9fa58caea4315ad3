//! A small URL builder that safely appends path segments and query
//! parameters to a base URL.
//!
//! The builder is single-use: it accumulates state for exactly one URL and
//! every chained call takes ownership, so a finished builder cannot be
//! reused or shared.

use std::borrow::Cow;

use url::Url;

use crate::error::OnvoError;

/// Builds a URL from a validated absolute base plus ordered path segments
/// and ordered (possibly repeated) query parameters.
///
/// ```
/// use onvopay::UrlBuilder;
///
/// let url = UrlBuilder::from("https://api.example.com")?
///     .path_segment("customers")
///     .query_param("limit", "10")
///     .build();
/// assert_eq!(url, "https://api.example.com/customers?limit=10");
/// # Ok::<(), onvopay::OnvoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: String,
    segments: Vec<String>,
    // Ordered multimap: key order fixed by first insertion, values per key
    // accumulate in call order. `None` marks a key-only parameter.
    query: Vec<(String, Vec<Option<String>>)>,
}

impl UrlBuilder {
    /// Start a builder from an absolute base URL.
    ///
    /// Fails with [`OnvoError::Config`] unless `base` parses as an absolute
    /// URL with an authority.
    pub fn from(base: impl Into<String>) -> Result<Self, OnvoError> {
        let base = base.into();
        let parsed = Url::parse(&base)
            .map_err(|err| OnvoError::Config(format!("invalid base URL '{base}': {err}")))?;
        if !parsed.has_host() {
            return Err(OnvoError::Config(format!(
                "invalid base URL '{base}': missing authority"
            )));
        }
        Ok(Self {
            base,
            segments: Vec::new(),
            query: Vec::new(),
        })
    }

    /// Append one path segment.
    ///
    /// Leading and trailing slashes are trimmed; a segment that is empty
    /// after trimming is dropped. Any character left inside the segment,
    /// including `/`, is percent-encoded at build time so a segment can
    /// never introduce a path boundary.
    pub fn path_segment(mut self, segment: impl AsRef<str>) -> Self {
        let trimmed = segment.as_ref().trim_matches('/');
        if !trimmed.is_empty() {
            self.segments.push(trimmed.to_owned());
        }
        self
    }

    /// Append several path segments in order.
    pub fn path_segments<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(self, |builder, segment| builder.path_segment(segment))
    }

    /// Append a `key=value` query parameter.
    ///
    /// Repeated keys are preserved in call order and never deduplicated.
    /// Calls with an empty key are ignored.
    pub fn query_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_query(key.into(), Some(value.into()))
    }

    /// Append a key-only query parameter (emitted without `=`).
    pub fn query_flag(self, key: impl Into<String>) -> Self {
        self.push_query(key.into(), None)
    }

    /// Append several `key=value` parameters in iteration order.
    pub fn query_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(self, |builder, (key, value)| builder.query_param(key, value))
    }

    fn push_query(mut self, key: String, value: Option<String>) -> Self {
        if key.is_empty() {
            return self;
        }
        match self.query.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => self.query.push((key, vec![value])),
        }
        self
    }

    /// Build the final URL string.
    pub fn build(self) -> String {
        let parts = split_base(&self.base);

        let mut full = String::from(parts.scheme_and_authority);
        let mut base_path = parts.path;
        if base_path == "/" {
            base_path = "";
        }
        let base_path = base_path.strip_suffix('/').unwrap_or(base_path);
        full.push_str(base_path);

        for segment in &self.segments {
            if !full.ends_with('/') {
                full.push('/');
            }
            full.push_str(&encode_path_segment(segment));
        }

        let new_query = self.query_string();
        match (parts.query, new_query.as_str()) {
            (None, "") => {}
            (Some(existing), "") => {
                full.push('?');
                full.push_str(existing);
            }
            (None, added) => {
                full.push('?');
                full.push_str(added);
            }
            (Some(existing), added) => {
                full.push('?');
                full.push_str(existing);
                full.push('&');
                full.push_str(added);
            }
        }

        if let Some(fragment) = parts.fragment {
            full.push('#');
            full.push_str(fragment);
        }
        full
    }

    /// Build the final URL as a parsed [`Url`].
    ///
    /// The parse normalizes an empty path to `/`; use [`build`](Self::build)
    /// for the verbatim string form.
    pub fn build_url(self) -> Result<Url, OnvoError> {
        let built = self.build();
        Url::parse(&built).map_err(|err| OnvoError::Config(format!("invalid URL '{built}': {err}")))
    }

    fn query_string(&self) -> String {
        let mut qs = String::new();
        for (key, values) in &self.query {
            for value in values {
                if !qs.is_empty() {
                    qs.push('&');
                }
                qs.push_str(&encode_query_component(key));
                if let Some(value) = value {
                    qs.push('=');
                    qs.push_str(&encode_query_component(value));
                }
            }
        }
        qs
    }
}

struct BaseParts<'a> {
    scheme_and_authority: &'a str,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

/// Split a raw absolute URL into its components without re-encoding, so the
/// scheme, authority, existing query, and fragment are carried over verbatim.
fn split_base(raw: &str) -> BaseParts<'_> {
    let (without_fragment, fragment) = match raw.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (raw, None),
    };
    let (without_query, query) = match without_fragment.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (without_fragment, None),
    };

    // Construction validated the base as absolute-with-authority, so the
    // scheme separator is present.
    let authority_start = without_query.find("://").map_or(0, |idx| idx + 3);
    let path_start = without_query[authority_start..]
        .find('/')
        .map_or(without_query.len(), |idx| authority_start + idx);

    BaseParts {
        scheme_and_authority: &without_query[..path_start],
        path: &without_query[path_start..],
        query: query.filter(|q| !q.is_empty()),
        fragment: fragment.filter(|f| !f.is_empty()),
    }
}

/// Percent-encode a path segment: `[A-Za-z0-9._~-]` pass through, every
/// other character is encoded per its UTF-8 bytes with uppercase hex.
pub(crate) fn encode_path_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Form-style encoding for query keys and values (space becomes `+`).
pub(crate) fn encode_query_component(component: &str) -> String {
    urlencoding::encode(component).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_base_only() {
        let url = UrlBuilder::from("https://api.example.com").unwrap().build();
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn appends_single_path_segment() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .path_segment("customers")
            .build();
        assert_eq!(url, "https://api.example.com/customers");
    }

    #[test]
    fn appends_multiple_path_segments_and_normalizes_slashes() {
        let url = UrlBuilder::from("https://api.example.com/")
            .unwrap()
            .path_segments(["/v1/", "/customers/", "123 "])
            .build();
        // space must be %20 in the path
        assert_eq!(url, "https://api.example.com/v1/customers/123%20");
    }

    #[test]
    fn drops_empty_segments() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .path_segments(["", "//", "v1"])
            .build();
        assert_eq!(url, "https://api.example.com/v1");
    }

    #[test]
    fn preserves_base_path() {
        let url = UrlBuilder::from("https://api.example.com/base")
            .unwrap()
            .path_segments(["v1", "customers"])
            .build();
        assert_eq!(url, "https://api.example.com/base/v1/customers");
    }

    #[test]
    fn encodes_path_special_characters() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .path_segments(["a b", "c+d", "x/y"])
            .build();
        // space => %20, '+' encoded, '/' inside a segment encoded
        assert_eq!(url, "https://api.example.com/a%20b/c%2Bd/x%2Fy");
    }

    #[test]
    fn adds_query_params_and_encodes_values() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .path_segment("search")
            .query_param("q", "foo bar")
            .query_param("lang", "en-US")
            .build();
        assert_eq!(url, "https://api.example.com/search?q=foo+bar&lang=en-US");
    }

    #[test]
    fn allows_repeated_query_keys_and_key_only() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .query_flag("flag")
            .query_param("id", "1")
            .query_param("id", "2")
            .build();
        assert_eq!(url, "https://api.example.com?flag&id=1&id=2");
    }

    #[test]
    fn ignores_empty_query_keys() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .query_param("", "x")
            .query_flag("")
            .query_param("a", "1")
            .build();
        assert_eq!(url, "https://api.example.com?a=1");
    }

    #[test]
    fn adds_query_params_from_pairs() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .query_params([("a", "1"), ("b", "2")])
            .build();
        assert_eq!(url, "https://api.example.com?a=1&b=2");
    }

    #[test]
    fn keeps_existing_base_query_first() {
        let url = UrlBuilder::from("https://api.example.com/p?x=1")
            .unwrap()
            .query_param("y", "2")
            .build();
        assert_eq!(url, "https://api.example.com/p?x=1&y=2");
    }

    #[test]
    fn keeps_base_fragment_last() {
        let url = UrlBuilder::from("https://api.example.com/docs#section")
            .unwrap()
            .query_param("a", "1")
            .build();
        assert_eq!(url, "https://api.example.com/docs?a=1#section");
    }

    #[test]
    fn build_url_returns_parsed_url() {
        let url = UrlBuilder::from("https://api.example.com")
            .unwrap()
            .path_segment("v1")
            .query_param("x", "y")
            .build_url()
            .unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.example.com"));
        assert_eq!(url.path(), "/v1");
        assert_eq!(url.query(), Some("x=y"));
    }

    #[test]
    fn build_url_round_trips_the_built_string() {
        let builder = UrlBuilder::from("https://api.example.com/base")
            .unwrap()
            .path_segment("customers")
            .query_param("limit", "10")
            .query_flag("expand");
        let built = builder.clone().build();
        assert_eq!(builder.build_url().unwrap().as_str(), built);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            UrlBuilder::from("not a url"),
            Err(OnvoError::Config(_))
        ));
    }

    #[test]
    fn base_url_without_authority_is_rejected() {
        assert!(matches!(
            UrlBuilder::from("mailto:x@example.com"),
            Err(OnvoError::Config(_))
        ));
    }

    #[test]
    fn preserves_authority_with_port_and_userinfo() {
        let url = UrlBuilder::from("https://user:pw@api.example.com:8443/v1")
            .unwrap()
            .path_segment("customers")
            .build();
        assert_eq!(url, "https://user:pw@api.example.com:8443/v1/customers");
    }
}
