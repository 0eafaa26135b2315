//! Validation and per-type capping of fetched candidates.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use learning_core::{CandidateItem, ContentType, Quotas, UrlValidator};
use tracing::debug;

/// A candidate waiting to be persisted, with its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged {
    pub item: CandidateItem,
    pub reason: String,
}

impl Staged {
    pub fn new(item: CandidateItem, reason: impl Into<String>) -> Self {
        Self {
            item,
            reason: reason.into(),
        }
    }
}

/// Running per-type counts against a quota.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    quotas: Quotas,
    taken: [usize; 3],
}

fn slot(content_type: ContentType) -> usize {
    match content_type {
        ContentType::Article => 0,
        ContentType::Video => 1,
        ContentType::Course => 2,
    }
}

impl QuotaTracker {
    pub fn new(quotas: Quotas) -> Self {
        Self { quotas, taken: [0; 3] }
    }

    /// Items of this type accepted so far.
    pub fn count(&self, content_type: ContentType) -> usize {
        self.taken[slot(content_type)]
    }

    /// True while another item of this type fits.
    pub fn has_room(&self, content_type: ContentType) -> bool {
        self.count(content_type) < self.quotas.for_type(content_type)
    }

    /// Claim a slot for one item. Returns false when the type is full.
    pub fn try_take(&mut self, content_type: ContentType) -> bool {
        if !self.has_room(content_type) {
            return false;
        }
        self.taken[slot(content_type)] += 1;
        true
    }

    /// True once every type has reached its quota.
    pub fn all_full(&self) -> bool {
        ContentType::ALL.iter().all(|ct| !self.has_room(*ct))
    }
}

/// Keep candidates that pass validation, in order, up to each type's quota.
///
/// Runs after every fetch has finished, so the quota counters are owned by
/// this single pass. Duplicate URLs keep their first occurrence. Link checks
/// run up to `concurrency` at a time; results are consumed in input order.
pub async fn reconcile(
    candidates: Vec<Staged>,
    quotas: Quotas,
    validator: &dyn UrlValidator,
    concurrency: usize,
) -> Vec<Staged> {
    let mut tracker = QuotaTracker::new(quotas);
    let mut seen = HashSet::new();

    let candidates: Vec<Staged> = candidates
        .into_iter()
        .filter(|c| tracker.has_room(c.item.content_type))
        .filter(|c| seen.insert(c.item.url.clone()))
        .collect();

    let mut kept = Vec::new();
    if candidates.is_empty() {
        return kept;
    }

    let mut checked = stream::iter(candidates)
        .map(move |candidate| async move {
            let valid = validator.is_valid(&candidate.item.url).await;
            (candidate, valid)
        })
        .buffered(concurrency.max(1));

    while let Some((candidate, valid)) = checked.next().await {
        if !valid {
            debug!(url = %candidate.item.url, "Dropping unreachable link");
            continue;
        }
        if !tracker.try_take(candidate.item.content_type) {
            debug!(url = %candidate.item.url, "Dropping item over {} quota", candidate.item.content_type);
            continue;
        }

        kept.push(candidate);
        if tracker.all_full() {
            break;
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use learning_core::async_trait;

    struct RejectContaining(&'static str);

    #[async_trait]
    impl UrlValidator for RejectContaining {
        async fn is_valid(&self, url: &str) -> bool {
            !url.contains(self.0)
        }
    }

    fn staged(url: &str, content_type: ContentType) -> Staged {
        Staged::new(CandidateItem::new("t", url, "s", content_type), "")
    }

    #[test]
    fn test_tracker_caps_each_type() {
        let mut tracker = QuotaTracker::new(Quotas::new(1, 0, 2));

        assert!(tracker.try_take(ContentType::Article));
        assert!(!tracker.try_take(ContentType::Article));
        assert!(!tracker.try_take(ContentType::Video));
        assert!(!tracker.all_full());
        assert!(tracker.try_take(ContentType::Course));
        assert!(tracker.try_take(ContentType::Course));
        assert!(tracker.all_full());
        assert_eq!(tracker.count(ContentType::Course), 2);
    }

    #[tokio::test]
    async fn test_invalid_links_do_not_use_quota() {
        let candidates = vec![
            staged("https://dead.example.com/a", ContentType::Article),
            staged("https://ok.example.com/b", ContentType::Article),
            staged("https://ok.example.com/c", ContentType::Article),
        ];

        let kept = reconcile(candidates, Quotas::new(1, 1, 1), &RejectContaining("dead"), 4).await;
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item.url, "https://ok.example.com/b");
    }

    #[tokio::test]
    async fn test_duplicates_and_order() {
        let candidates = vec![
            staged("https://a.dev/1", ContentType::Video),
            staged("https://a.dev/2", ContentType::Article),
            staged("https://a.dev/1", ContentType::Video),
            staged("https://a.dev/3", ContentType::Article),
        ];

        let kept = reconcile(candidates, Quotas::new(5, 5, 5), &RejectContaining("none"), 2).await;
        let urls: Vec<_> = kept.iter().map(|s| s.item.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.dev/1", "https://a.dev/2", "https://a.dev/3"]);
    }

    #[tokio::test]
    async fn test_empty_quota_skips_type() {
        let candidates = vec![staged("https://a.dev/1", ContentType::Course)];
        let kept = reconcile(candidates, Quotas::new(1, 1, 0), &RejectContaining("none"), 1).await;
        assert!(kept.is_empty());
    }
}
