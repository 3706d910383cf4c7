//! Cluster model and merge history for agglomerative clustering.
//!
//! A [`Dendrogram`] records the full merge sequence from singletons down to
//! a single all-documents cluster: one `(to, from)` id pair per merge plus a
//! snapshot of the surviving cluster taken right after each merge. The
//! earliest snapshot is closest to the singleton state; the last one holds
//! every document.

/// A cluster of documents, identified by an integer id.
///
/// Members are document ids indexing into the shared vector table. The
/// `children` list is an append-only audit log of the ids absorbed into
/// this cluster; nothing navigates it, it only records merge history.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: usize,
    members: Vec<usize>,
    children: Vec<usize>,
}

impl Cluster {
    /// Create a singleton cluster holding one document.
    pub fn singleton(id: usize, doc: usize) -> Self {
        Self {
            id,
            members: vec![doc],
            children: Vec::new(),
        }
    }

    /// Absorb another cluster: take over its members and log its id.
    pub fn absorb(&mut self, other: &Cluster) {
        self.members.extend_from_slice(&other.members);
        self.children.push(other.id);
    }

    /// Cluster id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Member document ids, in absorption order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of member documents.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Ids of clusters absorbed into this one, in merge order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// A single merge event: cluster `from` was absorbed into cluster `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Surviving cluster id.
    pub to: usize,
    /// Absorbed cluster id.
    pub from: usize,
}

/// Ordered merge history over a document collection.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    n_docs: usize,
    merges: Vec<Merge>,
    snapshots: Vec<Cluster>,
}

impl Dendrogram {
    pub(crate) fn new(n_docs: usize) -> Self {
        Self {
            n_docs,
            merges: Vec::with_capacity(n_docs.saturating_sub(1)),
            snapshots: Vec::with_capacity(n_docs.saturating_sub(1)),
        }
    }

    pub(crate) fn record(&mut self, to: usize, from: usize, snapshot: Cluster) {
        self.merges.push(Merge { to, from });
        self.snapshots.push(snapshot);
    }

    /// Number of documents clustered.
    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// Number of merges recorded (`n_docs - 1` on normal completion).
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// The ordered merge sequence.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Post-merge cluster snapshots, one per merge, in merge order.
    pub fn snapshots(&self) -> &[Cluster] {
        &self.snapshots
    }

    /// Snapshots viewed in descending member-count order.
    ///
    /// The sort is stable, so equal-sized snapshots keep their merge order;
    /// model selection depends on this determinism.
    pub fn by_size_desc(&self) -> Vec<&Cluster> {
        let mut view: Vec<&Cluster> = self.snapshots.iter().collect();
        view.sort_by(|a, b| b.len().cmp(&a.len()));
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_extends_members_and_logs_child() {
        let mut to = Cluster::singleton(0, 0);
        let from = Cluster::singleton(3, 3);
        to.absorb(&from);

        assert_eq!(to.members(), &[0, 3]);
        assert_eq!(to.children(), &[3]);
        assert_eq!(to.len(), 2);
    }

    #[test]
    fn test_record_keeps_merge_and_snapshot_aligned() {
        let mut dendro = Dendrogram::new(3);
        let mut c0 = Cluster::singleton(0, 0);
        c0.absorb(&Cluster::singleton(1, 1));
        dendro.record(0, 1, c0.clone());
        c0.absorb(&Cluster::singleton(2, 2));
        dendro.record(0, 2, c0);

        assert_eq!(dendro.n_merges(), 2);
        assert_eq!(dendro.merges()[0], Merge { to: 0, from: 1 });
        assert_eq!(dendro.snapshots()[0].members(), &[0, 1]);
        assert_eq!(dendro.snapshots()[1].members(), &[0, 1, 2]);
    }

    #[test]
    fn test_by_size_desc_is_stable() {
        let mut dendro = Dendrogram::new(5);
        let mut a = Cluster::singleton(0, 0);
        a.absorb(&Cluster::singleton(1, 1));
        dendro.record(0, 1, a);
        let mut b = Cluster::singleton(2, 2);
        b.absorb(&Cluster::singleton(3, 3));
        dendro.record(2, 3, b);

        let view = dendro.by_size_desc();
        // Equal sizes: merge order preserved.
        assert_eq!(view[0].id(), 0);
        assert_eq!(view[1].id(), 2);
    }
}
