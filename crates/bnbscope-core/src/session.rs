//! One dashboard session: typed interaction events applied in arrival
//! order against a selection, with derived views recomputed only when the
//! selection actually changed.
//!
//! Events arrive as loosely typed JSON at the boundary and are validated
//! here before they reach the reconciler; an unknown borough name fails
//! the whole replay rather than being dropped.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::borough::Borough;
use crate::error::{Result, ScopeError};
use crate::ranks::RankTable;
use crate::selection::{
    BoroughFilter, BoroughRecord, MetricsSnapshot, Reconciled, RemoveSignal, SelectionSet,
};

/// A validated user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Map click with the metrics snapshot captured at render time.
    Click {
        borough: Borough,
        snapshot: MetricsSnapshot,
    },
    /// A batch of remove-button indicators.
    RemoveBatch(Vec<RemoveSignal>),
}

/// Wire form of one event line, before boundary validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawEvent {
    Click {
        borough: String,
        listings: u64,
        tourism: f64,
    },
    Remove(Vec<RawRemoveSignal>),
}

#[derive(Debug, Deserialize)]
struct RawRemoveSignal {
    borough: String,
    fired: bool,
}

impl InteractionEvent {
    fn from_raw(raw: RawEvent) -> Result<Self> {
        match raw {
            RawEvent::Click {
                borough,
                listings,
                tourism,
            } => Ok(InteractionEvent::Click {
                borough: Borough::parse(&borough)?,
                snapshot: MetricsSnapshot { listings, tourism },
            }),
            RawEvent::Remove(signals) => Ok(InteractionEvent::RemoveBatch(
                signals
                    .into_iter()
                    .map(|s| {
                        Ok(RemoveSignal {
                            borough: Borough::parse(&s.borough)?,
                            fired: s.fired,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?,
            )),
        }
    }
}

/// Parse a JSON Lines event stream. Blank lines are skipped; anything else
/// that fails to parse or validate reports its line number.
pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<InteractionEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawEvent =
            serde_json::from_str(&line).map_err(|e| ScopeError::InvalidEvent {
                line: idx + 1,
                reason: e.to_string(),
            })?;
        let event = InteractionEvent::from_raw(raw).map_err(|e| match e {
            ScopeError::UnknownBorough { .. } => e,
            other => ScopeError::InvalidEvent {
                line: idx + 1,
                reason: other.to_string(),
            },
        })?;
        events.push(event);
    }
    Ok(events)
}

/// The derived views rendered after an update: sorted cards, the
/// best-investment highlight, and the chart filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub cards: Vec<BoroughRecord>,
    pub best_investment: Option<Borough>,
    pub filter: FilterView,
}

/// Serializable rendering of the borough filter's two modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterView {
    All,
    Only { boroughs: Vec<Borough> },
}

impl From<&BoroughFilter> for FilterView {
    fn from(filter: &BoroughFilter) -> Self {
        match filter {
            BoroughFilter::All => FilterView::All,
            BoroughFilter::Only(_) => FilterView::Only {
                boroughs: filter.boroughs(),
            },
        }
    }
}

/// Counts from one replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Events that produced a new selection and a re-render
    pub applied: usize,
    /// No-op events short-circuited without recomputation
    pub skipped: usize,
}

/// One browser session's selection state plus its reference data.
#[derive(Debug, Clone)]
pub struct Session {
    ranks: RankTable,
    selection: SelectionSet,
}

impl Session {
    pub fn new(ranks: RankTable) -> Self {
        Session {
            ranks,
            selection: SelectionSet::new(),
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Apply one event. A click always updates (toggle); a remove batch
    /// updates only if some indicator fired.
    pub fn apply(&mut self, event: &InteractionEvent) -> Reconciled {
        let outcome = match event {
            InteractionEvent::Click { borough, snapshot } => {
                Reconciled::Updated(self.selection.toggle(*borough, *snapshot, &self.ranks))
            }
            InteractionEvent::RemoveBatch(signals) => self.selection.apply_remove_batch(signals),
        };

        if let Reconciled::Updated(next) = &outcome {
            self.selection = next.clone();
        }
        outcome
    }

    /// Current derived views.
    pub fn view(&self) -> SessionView {
        SessionView {
            cards: self.selection.sorted_cards(),
            best_investment: self.selection.best_investment(),
            filter: FilterView::from(&self.selection.name_filter()),
        }
    }
}

/// Apply a stream of events in arrival order. `on_update` runs after every
/// event that changed the selection (this is where callers re-query charts
/// and re-render); no-op events skip it entirely. An error from `on_update`
/// or from reconciliation aborts the cycle, leaving the last rendered state
/// in place.
pub fn replay<F>(
    session: &mut Session,
    events: &[InteractionEvent],
    mut on_update: F,
) -> Result<ReplaySummary>
where
    F: FnMut(&SelectionSet) -> Result<()>,
{
    let mut summary = ReplaySummary {
        applied: 0,
        skipped: 0,
    };
    for event in events {
        match session.apply(event) {
            Reconciled::Updated(_) => {
                tracing::debug!(selected = session.selection().len(), "selection_updated");
                on_update(session.selection())?;
                summary.applied += 1;
            }
            Reconciled::NoChange => {
                tracing::debug!("no_op_event");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
