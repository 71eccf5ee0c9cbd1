//! Composite path-table keys: `"<idA>--><idB> (m<N>)"`.
//!
//! The key is the only addressing scheme reporting layers may rely on, so it
//! is both formatted and parsed here.

use std::str::FromStr;

use crate::error::PathError;

const ARROW: &str = "-->";
const MODEL_OPEN: &str = " (m";
const MODEL_CLOSE: &str = ")";

/// Key of one attribute pair within one model (1-based model index).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey {
    /// First attribute id, prefix stripped.
    pub source: String,
    /// Second attribute id, prefix stripped.
    pub target: String,
    /// 1-based index of the model in registration order.
    pub model: usize,
}

impl PathKey {
    /// Build a key, removing every occurrence of `attribute_prefix` from
    /// both ids.
    pub fn new(source: &str, target: &str, model: usize, attribute_prefix: Option<&str>) -> Self {
        Self {
            source: strip_prefix(source, attribute_prefix),
            target: strip_prefix(target, attribute_prefix),
            model,
        }
    }
}

fn strip_prefix(id: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(p) if !p.is_empty() => id.replace(p, ""),
        _ => id.to_string(),
    }
}

impl std::fmt::Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{ARROW}{}{MODEL_OPEN}{}{MODEL_CLOSE}",
            self.source, self.target, self.model
        )
    }
}

impl FromStr for PathKey {
    type Err = PathError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || PathError::MalformedKey {
            key: key.to_string(),
        };

        let body = key.strip_suffix(MODEL_CLOSE).ok_or_else(malformed)?;
        let (pair, model) = body.rsplit_once(MODEL_OPEN).ok_or_else(malformed)?;
        let model: usize = model.parse().map_err(|_| malformed())?;
        let (source, target) = pair.split_once(ARROW).ok_or_else(malformed)?;
        if model == 0 || source.is_empty() || target.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
            model,
        })
    }
}
