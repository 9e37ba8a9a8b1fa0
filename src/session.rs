use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleCatalog, RuleId, UnknownRuleError};
use crate::projection::{self, SimulationResult};

/// Today's observed acceptance/refusal split, in whole percentage points.
/// Fixed for the lifetime of a session; sums to 100 at initialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Baseline {
    pub accept_pct: i32,
    pub refusal_pct: i32,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            accept_pct: 20,
            refusal_pct: 80,
        }
    }
}

/// Usual target band for the acceptance rate, used by the advisory caption.
pub const TARGET_ACCEPT_MIN: i32 = 25;
pub const TARGET_ACCEPT_MAX: i32 = 35;

pub const CONFIRMATION_MESSAGE: &str = "Simulated action: the selected rules would be \
     forwarded to the decision engine for human validation and rollout. \
     No transmission has taken place.";

/// Per-session on/off state of every catalog rule. Mutated only by explicit
/// toggling; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    active: BTreeMap<RuleId, bool>,
}

impl Selection {
    /// The recommended configuration: every catalog rule pre-selected.
    pub fn all_active(catalog: &RuleCatalog) -> Self {
        Self {
            active: catalog.rules().iter().map(|r| (r.id, true)).collect(),
        }
    }

    pub fn set(&mut self, id: RuleId, value: bool) {
        self.active.insert(id, value);
    }

    pub fn is_active(&self, id: RuleId) -> bool {
        self.active.get(&id).copied().unwrap_or(false)
    }
}

/// One user session of the simulator: the catalog, the baseline, the current
/// selection, and the analysis date read once at construction. Sessions are
/// fully isolated; nothing here is shared or persisted.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: RuleCatalog,
    baseline: Baseline,
    selection: Selection,
    analysis_date: NaiveDate,
}

impl Session {
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    /// Construction with an explicit date, for deterministic tests.
    pub fn with_date(analysis_date: NaiveDate) -> Self {
        let catalog = RuleCatalog::with_defaults();
        let baseline = Baseline::default();
        debug_assert_eq!(baseline.accept_pct + baseline.refusal_pct, 100);
        let selection = Selection::all_active(&catalog);
        Self {
            catalog,
            baseline,
            selection,
            analysis_date,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Analysis date formatted the way the report displays it.
    pub fn analysis_date(&self) -> String {
        self.analysis_date.format("%d/%m/%Y").to_string()
    }

    pub fn toggle_rule(&mut self, id: RuleId, value: bool) {
        self.selection.set(id, value);
    }

    /// String-keyed toggle for surfaces that address rules by name. A name
    /// outside the catalog leaves the selection untouched.
    pub fn toggle_rule_by_name(&mut self, name: &str, value: bool) -> Result<(), UnknownRuleError> {
        let id = RuleId::from_str(name)?;
        self.selection.set(id, value);
        Ok(())
    }

    /// Replace the whole selection from a name-keyed map, as posted by the
    /// HTTP surface. Unknown names are rejected before anything is applied.
    pub fn apply_selection(
        &mut self,
        by_name: &BTreeMap<String, bool>,
    ) -> Result<(), UnknownRuleError> {
        let mut parsed = Vec::with_capacity(by_name.len());
        for (name, value) in by_name {
            parsed.push((RuleId::from_str(name)?, *value));
        }
        for (id, value) in parsed {
            self.selection.set(id, value);
        }
        Ok(())
    }

    pub fn simulate(&self) -> SimulationResult {
        projection::project(&self.catalog, &self.selection, self.baseline)
    }

    /// Second, independent user action: acknowledge the recommended rules.
    /// Purely informational; mutates nothing and transmits nothing.
    pub fn confirm(&self) -> &'static str {
        CONFIRMATION_MESSAGE
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
