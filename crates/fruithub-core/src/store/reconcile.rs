// ── Snapshot reconciliation ──
//
// Decides what a finished load publishes. Both sides are compared by
// their canonical JSON; equal content keeps the persisted allocation and
// skips the storage write, anything else fully replaces it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

/// Result of comparing a persisted snapshot against a fresh fetch.
#[derive(Debug)]
pub struct Reconciliation<D> {
    /// Value to publish on repository state.
    pub published: Arc<D>,
    /// Serialized snapshot to persist, when the content changed.
    pub write: Option<String>,
}

impl<D> Reconciliation<D> {
    pub fn is_dirty(&self) -> bool {
        self.write.is_some()
    }
}

/// Compare `persisted` with `fetched` and pick the new truth.
///
/// An absent or undecodable snapshot is passed in as the empty value.
pub fn reconcile<D: Serialize>(persisted: Arc<D>, fetched: D) -> Reconciliation<D> {
    let fresh = match serde_json::to_string(&fetched) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "fetched data not serializable, publishing without snapshot");
            return Reconciliation {
                published: Arc::new(fetched),
                write: None,
            };
        }
    };

    let unchanged = serde_json::to_string(&*persisted).is_ok_and(|json| json == fresh);
    if unchanged {
        debug!("fetched data matches snapshot");
        Reconciliation {
            published: persisted,
            write: None,
        }
    } else {
        debug!(bytes = fresh.len(), "fetched data differs from snapshot");
        Reconciliation {
            published: Arc::new(fetched),
            write: Some(fresh),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    struct Row {
        id: String,
        qty: u32,
    }

    fn row(id: &str, qty: u32) -> Row {
        Row {
            id: id.into(),
            qty,
        }
    }

    #[test]
    fn equal_content_keeps_persisted_allocation() {
        let persisted = Arc::new(vec![row("p1", 3)]);
        let outcome = reconcile(Arc::clone(&persisted), vec![row("p1", 3)]);

        assert!(Arc::ptr_eq(&outcome.published, &persisted));
        assert!(!outcome.is_dirty());
    }

    #[test]
    fn differing_content_replaces_and_requests_write() {
        let persisted = Arc::new(vec![row("p1", 3)]);
        let outcome = reconcile(Arc::clone(&persisted), vec![row("p1", 2), row("p2", 1)]);

        assert!(!Arc::ptr_eq(&outcome.published, &persisted));
        assert_eq!(*outcome.published, vec![row("p1", 2), row("p2", 1)]);
        assert_eq!(
            outcome.write.as_deref(),
            Some(r#"[{"id":"p1","qty":2},{"id":"p2","qty":1}]"#)
        );
    }

    #[test]
    fn reorder_counts_as_a_change() {
        let persisted = Arc::new(vec![row("a", 1), row("b", 1)]);
        let outcome = reconcile(persisted, vec![row("b", 1), row("a", 1)]);
        assert!(outcome.is_dirty());
    }

    #[test]
    fn empty_fetch_against_missing_snapshot_is_clean() {
        let outcome = reconcile(Arc::new(Vec::<Row>::new()), Vec::new());
        assert!(!outcome.is_dirty());
        assert!(outcome.published.is_empty());
    }

    #[test]
    fn first_fetch_is_persisted() {
        let outcome = reconcile(Arc::new(Vec::new()), vec![row("p1", 1)]);
        assert!(outcome.is_dirty());
        assert_eq!(outcome.published.len(), 1);
    }
}
