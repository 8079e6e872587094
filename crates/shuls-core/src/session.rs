//! Search session tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlates a run of keystroke-driven searches with the selection that ends it.
///
/// The gateway forwards the token to the provider for usage attribution. A new
/// token is issued after every completed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    token: String,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
        }
    }

    /// Wraps an externally issued token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Replaces this session with a fresh one and returns the finished one.
    pub fn rotate(&mut self) -> SearchSession {
        std::mem::replace(self, SearchSession::new())
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_issues_new_token() {
        let mut session = SearchSession::with_token("first");
        let finished = session.rotate();
        assert_eq!(finished.token(), "first");
        assert_ne!(session.token(), "first");
        assert!(!session.token().is_empty());
    }

    #[test]
    fn test_new_sessions_are_unique() {
        assert_ne!(SearchSession::new(), SearchSession::new());
    }
}
