//! Pending request tokens
//!
//! Each open mints a token; only the most recently minted token of an issuer
//! is authoritative for that issuer's panel.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestToken {
    issuer: Uuid,
    seq: u64,
}

impl RequestToken {
    pub fn issuer(&self) -> Uuid {
        self.issuer
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.issuer.simple(), self.seq)
    }
}

#[derive(Debug)]
pub struct TokenIssuer {
    id: Uuid,
    last: AtomicU64,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            last: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mint(&self) -> RequestToken {
        let seq = self.last.fetch_add(1, Ordering::AcqRel) + 1;
        RequestToken {
            issuer: self.id,
            seq,
        }
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic() {
        let issuer = TokenIssuer::new();
        let first = issuer.mint();
        let second = issuer.mint();

        assert_ne!(first, second);
        assert_eq!(first.issuer(), issuer.id());
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn test_tokens_from_other_issuers_differ() {
        let a = TokenIssuer::new().mint();
        let b = TokenIssuer::new().mint();
        assert_eq!(a.seq(), b.seq());
        assert_ne!(a.issuer(), b.issuer());
        assert_ne!(a, b);
    }
}
