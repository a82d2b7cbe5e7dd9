//! Page identity used for transform resolution and outbound frames

use serde::{Deserialize, Serialize};
use std::fmt;

/// The location of the page hosting the synchronized surfaces
///
/// Only the host and path are modeled; the destination site cannot change
/// without a full page reload, so a location is fixed for a page's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    /// Host portion of the page URL (e.g. "app.slack.com")
    pub host: String,
    /// Path portion of the page URL, "/" when absent
    pub path: String,
}

impl PageLocation {
    /// Creates a page location from host and path
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Creates a page location with a bare host and root path
    pub fn from_host(host: impl Into<String>) -> Self {
        Self::new(host, "/")
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

/// Page metadata included in every outbound frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Document title
    pub title: String,
    /// Page location
    pub location: PageLocation,
    /// Syntax hint for the external editor, empty when unknown
    pub syntax: String,
}

impl PageMeta {
    /// Creates page metadata
    pub fn new(title: impl Into<String>, location: PageLocation, syntax: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location,
            syntax: syntax.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = PageLocation::new("mail.example.com", "/compose");
        assert_eq!(format!("{}", loc), "mail.example.com/compose");
    }

    #[test]
    fn test_from_host_uses_root_path() {
        let loc = PageLocation::from_host("app.slack.com");
        assert_eq!(loc.path, "/");
    }

    #[test]
    fn test_page_meta_fields() {
        let meta = PageMeta::new("Inbox", PageLocation::from_host("mail.example.com"), "");
        assert_eq!(meta.title, "Inbox");
        assert_eq!(meta.syntax, "");
        assert_eq!(meta.location.host, "mail.example.com");
    }
}
