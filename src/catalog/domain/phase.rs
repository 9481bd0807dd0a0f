//! Journey phases and current-phase resolution.

use super::{CatalogError, PhaseId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named window of the relocation journey.
///
/// The window is inclusive on both ends and measured in whole days from the
/// arrival date. Negative offsets are days before arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthoredPhase")]
pub struct JourneyPhase {
    id: PhaseId,
    order: i32,
    min_days_from_arrival: i64,
    max_days_from_arrival: Option<i64>,
    label_key: String,
}

/// Phase as written in catalog data, where the label key is optional.
#[derive(Deserialize)]
struct AuthoredPhase {
    id: PhaseId,
    order: i32,
    min_days_from_arrival: i64,
    #[serde(default)]
    max_days_from_arrival: Option<i64>,
    #[serde(default)]
    label_key: Option<String>,
}

impl From<AuthoredPhase> for JourneyPhase {
    fn from(authored: AuthoredPhase) -> Self {
        let AuthoredPhase {
            id,
            order,
            min_days_from_arrival,
            max_days_from_arrival,
            label_key,
        } = authored;
        let mut phase = Self::new(id, order, min_days_from_arrival, max_days_from_arrival);
        if let Some(key) = label_key.filter(|key| !key.trim().is_empty()) {
            phase.label_key = key;
        }
        phase
    }
}

impl JourneyPhase {
    /// Creates a phase covering `[min_days, max_days]`.
    ///
    /// A `None` upper bound leaves the phase open-ended.
    #[must_use]
    pub fn new(id: PhaseId, order: i32, min_days: i64, max_days: Option<i64>) -> Self {
        let label_key = format!("timeWindows.{id}");
        Self {
            id,
            order,
            min_days_from_arrival: min_days,
            max_days_from_arrival: max_days,
            label_key,
        }
    }

    /// Replaces the localisation key of the phase label.
    #[must_use]
    pub fn with_label_key(mut self, label_key: impl Into<String>) -> Self {
        self.label_key = label_key.into();
        self
    }

    /// Returns the phase identifier.
    #[must_use]
    pub const fn id(&self) -> &PhaseId {
        &self.id
    }

    /// Returns the sort order of the phase.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the lower bound of the window.
    #[must_use]
    pub const fn min_days_from_arrival(&self) -> i64 {
        self.min_days_from_arrival
    }

    /// Returns the upper bound of the window, if bounded.
    #[must_use]
    pub const fn max_days_from_arrival(&self) -> Option<i64> {
        self.max_days_from_arrival
    }

    /// Returns the localisation key of the phase label.
    #[must_use]
    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    /// Returns whether the day offset falls within the window.
    #[must_use]
    pub fn contains(&self, days_from_arrival: i64) -> bool {
        days_from_arrival >= self.min_days_from_arrival
            && self
                .max_days_from_arrival
                .is_none_or(|max| days_from_arrival <= max)
    }
}

/// Non-empty set of journey phases sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyPhases {
    first: JourneyPhase,
    rest: Vec<JourneyPhase>,
}

impl JourneyPhases {
    /// Sorts and validates a phase list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoJourneyPhases`] when the list is empty or
    /// [`CatalogError::DuplicatePhase`] when two phases share an identifier.
    pub fn new(phases: impl IntoIterator<Item = JourneyPhase>) -> Result<Self, CatalogError> {
        let mut sorted: Vec<JourneyPhase> = phases.into_iter().collect();
        sorted.sort_by_key(JourneyPhase::order);

        let mut seen = HashSet::new();
        for phase in &sorted {
            if !seen.insert(phase.id()) {
                return Err(CatalogError::DuplicatePhase(phase.id().clone()));
            }
        }

        let mut iter = sorted.into_iter();
        let first = iter.next().ok_or(CatalogError::NoJourneyPhases)?;
        Ok(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Returns the lowest-order phase.
    #[must_use]
    pub const fn first(&self) -> &JourneyPhase {
        &self.first
    }

    /// Returns the highest-order phase.
    #[must_use]
    pub fn last(&self) -> &JourneyPhase {
        self.rest.last().unwrap_or(&self.first)
    }

    /// Iterates phases in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &JourneyPhase> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Finds a phase by identifier.
    #[must_use]
    pub fn get(&self, id: &PhaseId) -> Option<&JourneyPhase> {
        self.iter().find(|phase| phase.id() == id)
    }

    /// Resolves the phase a traveller is in on `today`.
    ///
    /// Without an arrival date the first phase is returned. Offsets outside
    /// every window resolve to the first phase when they precede it and to
    /// the last phase otherwise, so gaps between windows never leave the
    /// traveller without a phase.
    #[must_use]
    pub fn current(&self, arrival: Option<NaiveDate>, today: NaiveDate) -> &JourneyPhase {
        let sorted: Vec<&JourneyPhase> = self.iter().collect();
        resolve_sorted(&sorted, arrival, today).unwrap_or(&self.first)
    }
}

/// Resolves the current phase from an unsorted phase list.
///
/// Phases are ordered by `order`; ties keep their input order. Returns
/// `None` only when `phases` is empty.
#[must_use]
pub fn current_phase(
    arrival: Option<NaiveDate>,
    phases: &[JourneyPhase],
    today: NaiveDate,
) -> Option<&JourneyPhase> {
    let mut sorted: Vec<&JourneyPhase> = phases.iter().collect();
    sorted.sort_by_key(|phase| phase.order());
    resolve_sorted(&sorted, arrival, today)
}

fn resolve_sorted<'a>(
    sorted: &[&'a JourneyPhase],
    arrival: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<&'a JourneyPhase> {
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    let Some(arrival_date) = arrival else {
        return Some(first);
    };
    let diff_days = today.signed_duration_since(arrival_date).num_days();

    if let Some(phase) = sorted.iter().find(|phase| phase.contains(diff_days)) {
        return Some(*phase);
    }
    if diff_days < first.min_days_from_arrival {
        return Some(first);
    }
    Some(last)
}
