//! # Site Transforms
//!
//! Ordered registry mapping a destination-site pattern to the pair of pure
//! text functions applied when text crosses the page/editor boundary.
//!
//! ## Philosophy
//!
//! - **Mechanism over data**: the ordered table, first-match resolution and
//!   identity fallback are the contract; the per-site substitutions are
//!   replaceable data
//! - **Pure pairs**: transform functions produce a new string and nothing
//!   else, and tolerate empty or already-transformed input
//! - **Resolve once**: the destination site cannot change without a full
//!   page reload, so resolution is cached by the caller for the page's
//!   lifetime

pub mod rules;

use regex::Regex;
use sync_types::PageLocation;
use thiserror::Error;

pub use rules::default_table;

/// Transform registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("invalid site pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("transform failed: {reason}")]
    Failed { reason: String },
}

/// A pure text transform
///
/// Must not observe or mutate anything beyond its input, and must accept
/// boundary-case input (empty string, text already in the target format)
/// without failing.
pub type TransformFn = fn(&str) -> Result<String, TransformError>;

fn pass_through(text: &str) -> Result<String, TransformError> {
    Ok(text.to_string())
}

/// The (send, receive) pair applied at the boundary
///
/// `send` runs on outgoing local text immediately before transmission;
/// `receive` runs on incoming remote text before it reaches the surface.
#[derive(Debug, Clone, Copy)]
pub struct TransformPair {
    /// Page representation → editor representation
    pub send: TransformFn,
    /// Editor representation → page representation
    pub receive: TransformFn,
}

impl TransformPair {
    /// The no-op pair used when no site rule matches
    pub fn identity() -> Self {
        Self {
            send: pass_through,
            receive: pass_through,
        }
    }
}

/// One table entry: a compiled host pattern and its pair
struct SiteRule {
    pattern: Regex,
    pair: TransformPair,
}

/// Ordered site → transform-pair table
///
/// Lookup order is significant: patterns may overlap (a broad any-subdomain
/// pattern vs. a specific host), and the first match wins.
#[derive(Default)]
pub struct TransformTable {
    rules: Vec<SiteRule>,
}

impl TransformTable {
    /// Creates an empty table (every lookup resolves to identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule; earlier rules take precedence
    pub fn with_rule(mut self, pattern: &str, pair: TransformPair) -> Result<Self, TransformError> {
        let compiled = Regex::new(pattern).map_err(|e| TransformError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.rules.push(SiteRule {
            pattern: compiled,
            pair,
        });
        Ok(self)
    }

    /// Resolves the pair applicable to a page
    ///
    /// Patterns are tested against the host, then against host+path, in
    /// table order; the first match wins. Falls back to the identity pair.
    pub fn resolve(&self, location: &PageLocation) -> TransformPair {
        let full = location.to_string();
        for rule in &self.rules {
            if rule.pattern.is_match(&location.host) || rule.pattern.is_match(&full) {
                return rule.pair;
            }
        }
        TransformPair::identity()
    }

    /// Returns the number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
