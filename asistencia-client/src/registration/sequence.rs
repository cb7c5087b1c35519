//! Next employee-code sequence
//!
//! The sequence is derived from the largest registered user id. The result
//! is advisory only: two consoles may compute the same number, and the
//! backend rejects the duplicate.

use thiserror::Error;

use crate::api::EmployeeApi;
use crate::error::ClientError;
use crate::http::HttpClient;

#[derive(Debug, Error)]
pub enum SequenceError {
    /// The id listing failed and nothing was cached
    #[error("sequence unavailable: {0}")]
    Unavailable(#[source] ClientError),

    /// The backend rejected the session; the cache must not be used
    #[error("session expired: {0}")]
    SessionExpired(#[source] ClientError),
}

impl SequenceError {
    pub fn client_error(&self) -> &ClientError {
        match self {
            Self::Unavailable(e) | Self::SessionExpired(e) => e,
        }
    }
}

/// Where a resolved sequence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSource {
    Fresh,
    Cached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSequence {
    pub sequence: u64,
    pub source: SequenceSource,
}

/// `max(ids) + 1`, never below `floor`
pub fn resolve(ids: &[u64], floor: u64) -> u64 {
    let floor = floor.max(1);
    ids.iter()
        .max()
        .map(|max| max.saturating_add(1))
        .unwrap_or(floor)
        .max(floor)
}

#[derive(Debug, Clone)]
pub struct SequenceResolver {
    floor: u64,
    cached_next: Option<u64>,
}

impl SequenceResolver {
    pub fn new(floor: u64) -> Self {
        Self {
            floor: floor.max(1),
            cached_next: None,
        }
    }

    pub fn floor(&self) -> u64 {
        self.floor
    }

    pub fn cached(&self) -> Option<u64> {
        self.cached_next
    }

    /// Fetch the id listing and compute the next sequence.
    ///
    /// A fresh value never goes below the cached one, so a lagging listing
    /// cannot hand out a number already used by this console.
    pub async fn next<H: HttpClient>(
        &mut self,
        http: &H,
    ) -> Result<ResolvedSequence, SequenceError> {
        match EmployeeApi::new(http).user_ids().await {
            Ok(ids) => {
                let fresh = resolve(&ids, self.floor);
                let sequence = self.cached_next.map_or(fresh, |c| fresh.max(c));
                self.cached_next = Some(sequence);
                Ok(ResolvedSequence {
                    sequence,
                    source: SequenceSource::Fresh,
                })
            }
            Err(e) if e.is_session_expired() => Err(SequenceError::SessionExpired(e)),
            Err(e) if e.is_cancelled() => Err(SequenceError::Unavailable(e)),
            Err(e) => match self.cached_next {
                Some(sequence) => {
                    tracing::warn!(error = %e, sequence, "User id listing failed, using cached sequence");
                    Ok(ResolvedSequence {
                        sequence,
                        source: SequenceSource::Cached,
                    })
                }
                None => {
                    tracing::warn!(error = %e, "User id listing failed, no cached sequence");
                    Err(SequenceError::Unavailable(e))
                }
            },
        }
    }

    /// Record that `sequence` was consumed by a successful registration
    pub fn advance_past(&mut self, sequence: u64) {
        let next = sequence.saturating_add(1).max(self.floor);
        self.cached_next = Some(self.cached_next.map_or(next, |c| c.max(next)));
    }
}

impl Default for SequenceResolver {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_max_plus_one() {
        assert_eq!(resolve(&[3, 7, 1], 1), 8);
        assert_eq!(resolve(&[4], 1), 5);
    }

    #[test]
    fn test_resolve_empty_uses_floor() {
        assert_eq!(resolve(&[], 1), 1);
        assert_eq!(resolve(&[], 100), 100);
        assert_eq!(resolve(&[], 0), 1);
    }

    #[test]
    fn test_resolve_never_below_floor() {
        assert_eq!(resolve(&[2, 3], 50), 50);
        assert_eq!(resolve(&[60], 50), 61);
    }

    #[test]
    fn test_advance_past_is_monotonic() {
        let mut resolver = SequenceResolver::new(1);
        resolver.advance_past(5);
        assert_eq!(resolver.cached(), Some(6));
        resolver.advance_past(3);
        assert_eq!(resolver.cached(), Some(6));
        resolver.advance_past(9);
        assert_eq!(resolver.cached(), Some(10));
    }
}
