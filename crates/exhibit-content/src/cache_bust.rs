//! Cache-busting request stamps
//!
//! Remote slots are always re-read from their authoritative location. Each
//! request carries a query parameter whose value never repeats for a buster.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const DEFAULT_PARAM: &str = "t";

#[derive(Debug)]
pub struct CacheBuster {
    param: String,
    last: AtomicI64,
}

impl CacheBuster {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            last: AtomicI64::new(0),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    /// Millisecond timestamp, bumped past the previous stamp when two requests
    /// land in the same millisecond.
    pub fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn request(&self, path: &str) -> FetchRequest {
        FetchRequest {
            path: path.to_string(),
            param: self.param.clone(),
            stamp: self.next_stamp(),
        }
    }
}

impl Default for CacheBuster {
    fn default() -> Self {
        Self::new(DEFAULT_PARAM)
    }
}

/// One remote read, as issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Path exactly as the page referenced it
    pub path: String,
    pub param: String,
    pub stamp: i64,
}

impl FetchRequest {
    /// The path with the cache-busting pair appended to its query.
    pub fn target(&self) -> String {
        let (base, fragment) = match self.path.find('#') {
            Some(idx) => self.path.split_at(idx),
            None => (self.path.as_str(), ""),
        };
        let sep = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}{}", base, sep, self.param, self.stamp, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps_never_repeat() {
        let buster = CacheBuster::default();
        let stamps: Vec<i64> = (0..50).map(|_| buster.next_stamp()).collect();
        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_same_path_gets_distinct_targets() {
        let buster = CacheBuster::default();
        let first = buster.request("/codes/out.txt");
        let second = buster.request("/codes/out.txt");

        assert_eq!(first.path, second.path);
        assert_ne!(first.target(), second.target());
        assert!(first.target().starts_with("/codes/out.txt?t="));
    }

    #[test]
    fn test_target_keeps_existing_query_and_fragment() {
        let request = FetchRequest {
            path: "codes/a.cpp?raw=1#L10".to_string(),
            param: "v".to_string(),
            stamp: 42,
        };
        assert_eq!(request.target(), "codes/a.cpp?raw=1&v=42#L10");
    }
}
