use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// The page that issued a request was left before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Page was left before the request finished")]
pub struct Cancelled;

/// Lifetime of a single page visit.
///
/// Every request a page makes runs inside its scope. Leaving the page cancels
/// the scope, which drops any request still in flight, so a late response can
/// never write into the session of a page that is gone.
#[derive(Debug, Clone, Default)]
pub struct PageScope {
    token: CancellationToken,
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that cancels this scope. Cancelling it abandons the page.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Drive `fut` to completion unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Cancelled),
            output = fut => {
                // A cancel that lands while the last poll completes still wins.
                if self.token.is_cancelled() {
                    Err(Cancelled)
                } else {
                    Ok(output)
                }
            }
        }
    }
}
