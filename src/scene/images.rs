use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::ChartResult;

/// Resolved image metadata; backends map the URL to decoded pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum ImageState {
    Pending,
    Ready(ImageHandle),
}

/// URL-keyed image cache with host-driven resolution.
///
/// The first draw of a URL inserts a `Pending` entry; the host completes it
/// once loading finishes. A draw against a pending entry is skipped for the
/// frame, so images can visibly lag one frame behind the rest of the
/// surface. A failed load evicts the entry so a future draw retries.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: IndexMap<String, ImageState>,
}

impl ImageCache {
    /// Looks up a URL, registering a pending fetch on first use.
    pub fn request(&mut self, url: &str) -> Option<ImageHandle> {
        match self.entries.get(url) {
            Some(ImageState::Ready(handle)) => Some(handle.clone()),
            Some(ImageState::Pending) => None,
            None => {
                trace!(url, "image fetch requested");
                self.entries.insert(url.to_owned(), ImageState::Pending);
                None
            }
        }
    }

    /// Completes a pending fetch: stores the handle on success, evicts the
    /// entry on failure so the next draw can retry.
    pub fn complete(&mut self, url: &str, result: ChartResult<ImageHandle>) {
        match result {
            Ok(handle) => {
                self.entries
                    .insert(url.to_owned(), ImageState::Ready(handle));
            }
            Err(err) => {
                warn!(url, error = %err, "image load failed, evicting cache entry");
                self.entries.shift_remove(url);
            }
        }
    }

    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ImageState::Pending))
    }

    #[must_use]
    pub fn is_ready(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ImageState::Ready(_)))
    }

    /// URLs awaiting host-side loading, in request order.
    #[must_use]
    pub fn pending_urls(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, state)| matches!(state, ImageState::Pending))
            .map(|(url, _)| url.clone())
            .collect()
    }
}
