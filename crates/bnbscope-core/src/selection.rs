//! The per-session borough selection and its derived views.
//!
//! This is the state behind the dashboard's comparison panel: a working set
//! of 0-5 selected boroughs, each carrying the metrics snapshot captured at
//! click time. Reconciliation is pure - every operation returns a new set
//! and leaves the input untouched - so the render layer only ever observes
//! complete states.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::borough::Borough;
use crate::ranks::RankTable;

/// Listings/tourism metrics attached to a map click event, captured at
/// render time of the clicked point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub listings: u64,
    pub tourism: f64,
}

/// One entry in the selection set: a borough plus the metric snapshot and
/// reference ranks captured when it was selected. Never mutated in place;
/// toggling replaces the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoroughRecord {
    pub borough: Borough,
    pub listings: u64,
    pub tourism: f64,
    pub crime_rank: u8,
    pub investment_rank: u8,
}

/// Borough filter handed to the metrics provider.
///
/// `All` means the unfiltered/default aggregate over the full enumeration -
/// a distinct query mode, not an empty restriction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoroughFilter {
    All,
    Only(BTreeSet<Borough>),
}

impl BoroughFilter {
    /// Whether a borough is in scope under this filter.
    pub fn includes(&self, borough: Borough) -> bool {
        match self {
            BoroughFilter::All => true,
            BoroughFilter::Only(set) => set.contains(&borough),
        }
    }

    /// The boroughs in scope, in canonical order.
    pub fn boroughs(&self) -> Vec<Borough> {
        Borough::ALL
            .into_iter()
            .filter(|b| self.includes(*b))
            .collect()
    }
}

/// Outcome of applying one interaction event to a selection.
///
/// `NoChange` is distinguishable from an update that happens to produce an
/// equal set: on `NoChange` the caller must skip recomputation and
/// re-rendering entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Updated(SelectionSet),
    NoChange,
}

/// One remove-button indicator from a removal batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoveSignal {
    pub borough: Borough,
    pub fired: bool,
}

/// The working set of currently selected boroughs for one session.
///
/// Size is bounded by the enumeration (0-5 records, at most one per
/// borough). Owned exclusively by one session; events are applied in
/// strict arrival order by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSet {
    records: Vec<BoroughRecord>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn contains(&self, borough: Borough) -> bool {
        self.records.iter().any(|r| r.borough == borough)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[BoroughRecord] {
        &self.records
    }

    /// Toggle membership for a clicked borough.
    ///
    /// Already selected: the record is removed (toggle-off). Not selected: a
    /// new record is built from the click snapshot plus the rank table and
    /// added (toggle-on). This is the only membership rule; any count from
    /// 0 to 5 is valid.
    pub fn toggle(
        &self,
        borough: Borough,
        snapshot: MetricsSnapshot,
        ranks: &RankTable,
    ) -> SelectionSet {
        if self.contains(borough) {
            return self.remove(borough);
        }

        let entry = ranks.get(borough);
        let mut records = self.records.clone();
        records.push(BoroughRecord {
            borough,
            listings: snapshot.listings,
            tourism: snapshot.tourism,
            crime_rank: entry.crime_rank,
            investment_rank: entry.investment_rank,
        });
        SelectionSet { records }
    }

    /// Remove a borough if present. Idempotent: removing an absent borough
    /// returns an equal set (handles the stale remove-button race).
    pub fn remove(&self, target: Borough) -> SelectionSet {
        SelectionSet {
            records: self
                .records
                .iter()
                .filter(|r| r.borough != target)
                .cloned()
                .collect(),
        }
    }

    /// Resolve a batch of remove-button indicators.
    ///
    /// A batch where nothing fired is a no-op, not an empty result: the
    /// caller must skip recomputation entirely. When a signal fired, the
    /// first fired target wins (the UI fires one per click; extras in a
    /// forged batch are ignored).
    pub fn apply_remove_batch(&self, signals: &[RemoveSignal]) -> Reconciled {
        match signals.iter().find(|s| s.fired) {
            Some(signal) => Reconciled::Updated(self.remove(signal.borough)),
            None => Reconciled::NoChange,
        }
    }

    /// The borough with the numerically smallest investment rank, or `None`
    /// for an empty selection (callers render a neutral placeholder).
    ///
    /// Ranks are unique by construction; if the reference data were ever
    /// relaxed, the first record encountered in insertion order wins.
    pub fn best_investment(&self) -> Option<Borough> {
        self.records
            .iter()
            .min_by_key(|r| r.investment_rank)
            .map(|r| r.borough)
    }

    /// Display cards ordered ascending by investment rank (best first).
    pub fn sorted_cards(&self) -> Vec<BoroughRecord> {
        let mut cards = self.records.clone();
        cards.sort_by_key(|r| r.investment_rank);
        cards
    }

    /// The filter used to parameterize chart queries: `All` when nothing is
    /// selected, otherwise the selected borough names.
    pub fn name_filter(&self) -> BoroughFilter {
        if self.records.is_empty() {
            BoroughFilter::All
        } else {
            BoroughFilter::Only(self.records.iter().map(|r| r.borough).collect())
        }
    }
}
