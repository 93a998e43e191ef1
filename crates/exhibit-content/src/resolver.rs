//! Content resolver
//!
//! Absent and inline slots resolve immediately. Remote slots are issued as
//! independent tasks; each result goes back through a [`ContentSink`] together
//! with the token it was issued under, and the sink decides whether it is
//! still current. Fetch failures become diagnostic text here and never reach
//! the caller as errors.

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::cache_bust::{CacheBuster, FetchRequest};
use crate::content::{ResolvedContent, SlotContent};
use crate::fetch::Fetcher;
use crate::slot::Slot;
use crate::source::{ExhibitSource, SlotSource};
use crate::token::RequestToken;

/// Receiver of asynchronously resolved slots
pub trait ContentSink: Send + Sync {
    /// Returns false if `token` has been superseded and the slot was dropped.
    fn apply(&self, token: RequestToken, slot: Slot, content: SlotContent) -> bool;
}

/// A remote slot awaiting its fetch
#[derive(Debug, Clone)]
pub struct RemoteSlot {
    pub slot: Slot,
    pub request: FetchRequest,
}

/// Immediate result of starting a resolution
#[derive(Debug)]
pub struct Resolution {
    /// Absent and inline slots final, remote slots loading
    pub content: ResolvedContent,
    pub remote: Vec<RemoteSlot>,
}

#[derive(Clone)]
pub struct ContentResolver {
    fetcher: Arc<dyn Fetcher>,
    buster: Arc<CacheBuster>,
}

impl ContentResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, buster: CacheBuster) -> Self {
        Self {
            fetcher,
            buster: Arc::new(buster),
        }
    }

    /// Resolve everything that needs no I/O and stamp a request for every
    /// remote slot.
    pub fn begin(&self, source: &ExhibitSource, token: RequestToken) -> Resolution {
        let mut content = ResolvedContent::new(token);
        let mut remote = Vec::new();

        for slot in Slot::ALL {
            match source.get(slot) {
                SlotSource::Absent => content.set(slot, SlotContent::Absent),
                SlotSource::Inline(text) => content.set(slot, SlotContent::ready(text.clone())),
                SlotSource::Remote(path) => {
                    content.set(slot, SlotContent::Loading { path: path.clone() });
                    remote.push(RemoteSlot {
                        slot,
                        request: self.buster.request(path),
                    });
                }
            }
        }

        Resolution { content, remote }
    }

    /// Fetch one remote slot, turning any failure into diagnostic content.
    pub async fn fetch_slot(&self, remote: &RemoteSlot) -> SlotContent {
        match self.fetcher.fetch(&remote.request).await {
            Ok(text) => SlotContent::Ready { text },
            Err(e) => {
                tracing::warn!(
                    slot = %remote.slot,
                    path = %remote.request.path,
                    error = %e,
                    "Failed to load exhibit slot"
                );
                SlotContent::Failed {
                    path: remote.request.path.clone(),
                    detail: e.to_string(),
                }
            }
        }
    }

    /// Spawn one task per remote slot. Each task resolves to whether its
    /// result was applied.
    pub fn spawn(
        &self,
        token: RequestToken,
        remote: Vec<RemoteSlot>,
        sink: Arc<dyn ContentSink>,
    ) -> Vec<JoinHandle<bool>> {
        remote
            .into_iter()
            .map(|remote| {
                let resolver = self.clone();
                let sink = Arc::clone(&sink);
                tokio::spawn(async move {
                    let content = resolver.fetch_slot(&remote).await;
                    let applied = sink.apply(token, remote.slot, content);
                    if !applied {
                        tracing::debug!(
                            token = %token,
                            slot = %remote.slot,
                            "Dropped stale slot response"
                        );
                    }
                    applied
                })
            })
            .collect()
    }

    /// Resolve all three slots and wait for every remote slot to settle.
    pub async fn resolve(&self, source: &ExhibitSource, token: RequestToken) -> ResolvedContent {
        let Resolution {
            mut content,
            remote,
        } = self.begin(source, token);

        let fetched = join_all(remote.iter().map(|r| self.fetch_slot(r))).await;
        for (remote, result) in remote.iter().zip(fetched) {
            content.apply(token, remote.slot, result);
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::token::TokenIssuer;
    use crate::Result;
    use futures_util::future::BoxFuture;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves fixed bodies, optionally after a delay; unknown paths are 404.
    struct FakeFetcher {
        files: HashMap<String, (String, Duration)>,
    }

    impl FakeFetcher {
        fn new(files: &[(&str, &str, u64)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, body, ms)| {
                        (
                            path.to_string(),
                            (body.to_string(), Duration::from_millis(*ms)),
                        )
                    })
                    .collect(),
            }
        }
    }

    impl Fetcher for FakeFetcher {
        fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>> {
            Box::pin(async move {
                match self.files.get(&request.path) {
                    Some((body, delay)) => {
                        tokio::time::sleep(*delay).await;
                        Ok(body.clone())
                    }
                    None => Err(FetchError::Status {
                        status: 404,
                        reason: "Not Found".to_string(),
                    }),
                }
            })
        }
    }

    /// Sink that accepts only one token and records what it applied
    struct Recorder {
        current: Mutex<RequestToken>,
        applied: Mutex<Vec<(Slot, SlotContent)>>,
    }

    impl ContentSink for Recorder {
        fn apply(&self, token: RequestToken, slot: Slot, content: SlotContent) -> bool {
            if *self.current.lock().unwrap() != token {
                return false;
            }
            self.applied.lock().unwrap().push((slot, content));
            true
        }
    }

    fn resolver(fetcher: FakeFetcher) -> ContentResolver {
        ContentResolver::new(Arc::new(fetcher), CacheBuster::default())
    }

    #[tokio::test]
    async fn test_inline_absent_and_missing_remote() {
        let resolver = resolver(FakeFetcher::new(&[]));
        let source = ExhibitSource::absent()
            .with(Slot::Code, SlotSource::Inline("int main(){}".to_string()))
            .with(Slot::Output, SlotSource::Remote("/codes/out.txt".to_string()));
        let token = TokenIssuer::new().mint();

        let content = resolver.resolve(&source, token).await;

        assert_eq!(content.text(Slot::Code), "int main(){}");
        assert!(content.text(Slot::Input).contains("input"));
        let output = content.text(Slot::Output);
        assert!(output.contains("/codes/out.txt"));
        assert!(output.contains("404"));
        assert!(content.is_settled());
    }

    #[tokio::test]
    async fn test_begin_marks_remote_loading() {
        let resolver = resolver(FakeFetcher::new(&[("/codes/a.cpp", "a", 0)]));
        let source =
            ExhibitSource::absent().with(Slot::Code, SlotSource::Remote("/codes/a.cpp".to_string()));
        let token = TokenIssuer::new().mint();

        let resolution = resolver.begin(&source, token);
        assert!(resolution.content.get(Slot::Code).is_loading());
        assert_eq!(resolution.content.text(Slot::Code), "Loading /codes/a.cpp...");
        assert_eq!(resolution.remote.len(), 1);
        assert!(!resolution.content.is_settled());
    }

    #[tokio::test]
    async fn test_each_resolution_busts_cache_differently() {
        let resolver = resolver(FakeFetcher::new(&[]));
        let source =
            ExhibitSource::absent().with(Slot::Code, SlotSource::Remote("/codes/a.cpp".to_string()));
        let issuer = TokenIssuer::new();

        let first = resolver.begin(&source, issuer.mint());
        let second = resolver.begin(&source, issuer.mint());

        assert_ne!(
            first.remote[0].request.target(),
            second.remote[0].request.target()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_token_is_dropped() {
        let resolver = resolver(FakeFetcher::new(&[("/slow.txt", "slow", 500)]));
        let issuer = TokenIssuer::new();
        let old = issuer.mint();
        let source =
            ExhibitSource::absent().with(Slot::Output, SlotSource::Remote("/slow.txt".to_string()));

        let recorder = Arc::new(Recorder {
            current: Mutex::new(old),
            applied: Mutex::new(Vec::new()),
        });

        let resolution = resolver.begin(&source, old);
        let handles = resolver.spawn(old, resolution.remote, recorder.clone());

        // A newer open takes over before the slow response lands
        *recorder.current.lock().unwrap() = issuer.mint();

        for handle in handles {
            assert!(!handle.await.unwrap());
        }
        assert!(recorder.applied.lock().unwrap().is_empty());
    }
}
