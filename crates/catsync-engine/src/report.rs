//! Per-category outcomes and run totals.

use crate::resolve::Resolution;

/// Why a category was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The collection-managed flag is absent or false.
    NotManaged,
    /// Neither an explicit search term nor a display name is set.
    NoSearchTerm,
}

/// What happened to one category that reached the sync steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySync {
    pub resolution: Resolution,
    /// `true` when a newly resolved id was written back to the category.
    pub persisted: bool,
    /// Product ids already in the collection before this run.
    pub existing: usize,
    /// `false` when membership listing failed and the diff ran against an
    /// empty snapshot.
    pub membership_listed: bool,
    /// Ids the search returned that were not yet members.
    pub candidates: usize,
    pub appended: usize,
    pub failed_chunks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    Skipped(SkipReason),
    Synced(CategorySync),
    /// Collection resolution failed without being fatal to the run.
    Failed(String),
}

/// Totals for one run, accumulated with [`SyncReport::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub categories: usize,
    pub skipped: usize,
    pub synced: usize,
    pub failed: usize,
    pub collections_created: usize,
    pub ids_persisted: usize,
    pub persist_failures: usize,
    pub membership_failures: usize,
    pub items_appended: usize,
    pub failed_chunks: usize,
}

impl SyncReport {
    pub fn record(&mut self, outcome: &CategoryOutcome) {
        self.categories += 1;
        match outcome {
            CategoryOutcome::Skipped(_) => self.skipped += 1,
            CategoryOutcome::Failed(_) => self.failed += 1,
            CategoryOutcome::Synced(sync) => {
                self.synced += 1;
                if matches!(sync.resolution, Resolution::Created(_)) {
                    self.collections_created += 1;
                }
                if sync.persisted {
                    self.ids_persisted += 1;
                } else if sync.resolution.needs_persist() {
                    self.persist_failures += 1;
                }
                if !sync.membership_listed {
                    self.membership_failures += 1;
                }
                self.items_appended = self.items_appended.saturating_add(sync.appended);
                self.failed_chunks += sync.failed_chunks;
            }
        }
    }

    /// `true` when any category hit a reported (non-fatal) failure.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
            || self.persist_failures > 0
            || self.membership_failures > 0
            || self.failed_chunks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synced(resolution: Resolution, persisted: bool, appended: usize) -> CategoryOutcome {
        CategoryOutcome::Synced(CategorySync {
            resolution,
            persisted,
            existing: 0,
            membership_listed: true,
            candidates: appended,
            appended,
            failed_chunks: 0,
        })
    }

    #[test]
    fn record_accumulates_counts() {
        let mut report = SyncReport::default();
        report.record(&CategoryOutcome::Skipped(SkipReason::NotManaged));
        report.record(&synced(Resolution::Created("A1".into()), true, 2));
        report.record(&synced(Resolution::Cached("A2".into()), false, 5));
        report.record(&CategoryOutcome::Failed("lookup failed".into()));

        assert_eq!(report.categories, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.synced, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.collections_created, 1);
        assert_eq!(report.ids_persisted, 1);
        assert_eq!(report.persist_failures, 0);
        assert_eq!(report.items_appended, 7);
        assert!(report.has_failures());
    }

    #[test]
    fn unpersisted_new_id_counts_as_failure() {
        let mut report = SyncReport::default();
        report.record(&synced(Resolution::Found("A1".into()), false, 0));
        assert_eq!(report.persist_failures, 1);
        assert!(report.has_failures());
    }

    #[test]
    fn clean_run_has_no_failures() {
        let mut report = SyncReport::default();
        report.record(&synced(Resolution::Cached("A1".into()), false, 0));
        assert!(!report.has_failures());
    }
}
