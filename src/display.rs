use serde::{Deserialize, Serialize};

use crate::projection::SimulationResult;
use crate::session::{Baseline, Session, TARGET_ACCEPT_MAX, TARGET_ACCEPT_MIN};

/// One metric panel: a label, a percentage value, and an optional delta in
/// points against the baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricPanel {
    pub label: String,
    pub value_pct: i32,
    pub delta_pts: Option<i32>,
}

/// One toggle row, generated strictly from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleRow {
    pub name: String,
    pub description: String,
    pub impact: i32,
    pub active: bool,
}

/// One row of the comparative chart: an indicator with its current and
/// adjusted values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartRow {
    pub indicator: String,
    pub current_pct: i32,
    pub adjusted_pct: i32,
}

/// Everything a rendering layer needs to draw the initial page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionView {
    pub analysis_date: String,
    pub baseline_panels: Vec<MetricPanel>,
    pub advisory: String,
    pub toggles: Vec<ToggleRow>,
}

/// Everything a rendering layer needs to draw one simulation outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationView {
    pub panels: Vec<MetricPanel>,
    pub chart: Vec<ChartRow>,
    pub notice: String,
}

pub const SIMULATION_NOTICE: &str = "Simulation complete. This projection gives a quick read \
     on the business impact before any decision is made.";

pub fn session_view(session: &Session) -> SessionView {
    let baseline = session.baseline();
    SessionView {
        analysis_date: session.analysis_date(),
        baseline_panels: vec![
            MetricPanel {
                label: "Acceptance rate".to_string(),
                value_pct: baseline.accept_pct,
                delta_pts: None,
            },
            MetricPanel {
                label: "Refusal rate".to_string(),
                value_pct: baseline.refusal_pct,
                delta_pts: None,
            },
        ],
        advisory: advisory_caption(baseline),
        toggles: toggle_rows(session),
    }
}

pub fn toggle_rows(session: &Session) -> Vec<ToggleRow> {
    session
        .catalog()
        .rules()
        .iter()
        .map(|rule| ToggleRow {
            name: rule.id.to_string(),
            description: rule.description.to_string(),
            impact: rule.impact,
            active: session.selection().is_active(rule.id),
        })
        .collect()
}

pub fn simulation_view(baseline: Baseline, result: &SimulationResult) -> SimulationView {
    SimulationView {
        panels: vec![
            MetricPanel {
                label: "New acceptance rate".to_string(),
                value_pct: result.new_accept,
                delta_pts: Some(result.delta_accept),
            },
            MetricPanel {
                label: "New refusal rate".to_string(),
                value_pct: result.new_refusal,
                delta_pts: Some(result.delta_refusal),
            },
        ],
        chart: vec![
            ChartRow {
                indicator: "Acceptance".to_string(),
                current_pct: baseline.accept_pct,
                adjusted_pct: result.new_accept,
            },
            ChartRow {
                indicator: "Refusal".to_string(),
                current_pct: baseline.refusal_pct,
                adjusted_pct: result.new_refusal,
            },
        ],
        notice: SIMULATION_NOTICE.to_string(),
    }
}

/// Caption comparing today's acceptance rate to the usual target band.
pub fn advisory_caption(baseline: Baseline) -> String {
    format!(
        "Today's acceptance rate is {}%, against a usual target band of \
         {}%-{}%. Fewer applications are being accepted than expected, which \
         can reduce the volume of financed clients.",
        baseline.accept_pct, TARGET_ACCEPT_MIN, TARGET_ACCEPT_MAX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_view_pre_checks_every_toggle() {
        let view = session_view(&Session::new());
        assert_eq!(view.toggles.len(), 4);
        assert!(view.toggles.iter().all(|t| t.active));
        assert_eq!(view.baseline_panels[0].value_pct, 20);
        assert_eq!(view.baseline_panels[1].value_pct, 80);
        assert!(view.baseline_panels.iter().all(|p| p.delta_pts.is_none()));
    }

    #[test]
    fn simulation_view_pairs_current_and_adjusted_values() {
        let session = Session::new();
        let result = session.simulate();
        let view = simulation_view(session.baseline(), &result);
        assert_eq!(view.panels[0].delta_pts, Some(-10));
        assert_eq!(view.panels[1].delta_pts, Some(10));
        assert_eq!(view.chart[0].current_pct, 20);
        assert_eq!(view.chart[0].adjusted_pct, 10);
        assert_eq!(view.chart[1].current_pct, 80);
        assert_eq!(view.chart[1].adjusted_pct, 90);
    }
}
