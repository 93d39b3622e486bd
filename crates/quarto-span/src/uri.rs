//! File identity carried by spans

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// A `file://` URI naming the file a [`Span`](crate::Span) refers to
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SpanUri(String);

impl SpanUri {
    /// Build a URI from a filename
    ///
    /// Relative names are resolved against the current directory. Names
    /// that cannot be expressed as a `file://` URL are kept verbatim, and an
    /// empty name gives the empty URI.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return SpanUri::default();
        }
        std::path::absolute(path)
            .ok()
            .and_then(|abs| Url::from_file_path(abs).ok())
            .map_or_else(
                || SpanUri(path.to_string_lossy().into_owned()),
                |url| SpanUri(url.into()),
            )
    }

    /// Wrap an already formed URI string
    pub fn new(uri: impl Into<String>) -> Self {
        SpanUri(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The filename this URI refers to
    ///
    /// URIs that are not `file://` URLs are returned as they are.
    pub fn filename(&self) -> PathBuf {
        Url::parse(&self.0)
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(&self.0))
    }
}

impl fmt::Display for SpanUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
