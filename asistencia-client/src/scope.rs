//! View lifetime scope
//!
//! Every view owns a [`ViewScope`]. Requests started through it are dropped
//! as soon as the scope is cancelled or the view goes away, so no response
//! is ever applied to a torn-down view.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that is cancelled together with this one
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Handle that can cancel this scope from elsewhere (e.g. Ctrl-C)
    pub fn canceller(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope is cancelled first
    pub async fn run<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("Request dropped, view scope cancelled");
                Err(ClientError::Cancelled)
            }
            result = fut => result,
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
