use serde::{Deserialize, Serialize};

use crate::catalog::RuleCatalog;
use crate::session::{Baseline, Selection};

/// Outcome of one projection run. Ephemeral: recomputed on demand and never
/// stored between invocations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationResult {
    pub new_accept: i32,
    pub new_refusal: i32,
    pub delta_accept: i32,
    pub delta_refusal: i32,
}

/// Sum of the impact weights of every active rule. Each rule contributes its
/// weight independently; the sum is commutative, so toggle order is
/// irrelevant.
pub fn impact_total(catalog: &RuleCatalog, selection: &Selection) -> i32 {
    catalog
        .rules()
        .iter()
        .filter(|rule| selection.is_active(rule.id))
        .map(|rule| rule.impact)
        .sum()
}

/// Linear projection of the baseline under the current selection.
///
/// The two outputs are clamped independently (acceptance floored at 0,
/// refusal capped at 100) and are NOT re-coupled to sum to 100. The reference
/// behavior works this way and callers rely on it; do not "fix" the pair to
/// be complementary.
pub fn project(
    catalog: &RuleCatalog,
    selection: &Selection,
    baseline: Baseline,
) -> SimulationResult {
    let impact = impact_total(catalog, selection);
    let new_accept = (baseline.accept_pct - impact).max(0);
    let new_refusal = (baseline.refusal_pct + impact).min(100);
    SimulationResult {
        new_accept,
        new_refusal,
        delta_accept: new_accept - baseline.accept_pct,
        delta_refusal: new_refusal - baseline.refusal_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleId;

    fn fixture() -> (RuleCatalog, Selection, Baseline) {
        let catalog = RuleCatalog::with_defaults();
        let selection = Selection::all_active(&catalog);
        (catalog, selection, Baseline::default())
    }

    #[test]
    fn no_active_rules_leaves_baseline_untouched() {
        let (catalog, mut selection, baseline) = fixture();
        for id in RuleId::ALL {
            selection.set(id, false);
        }
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_accept, 20);
        assert_eq!(result.new_refusal, 80);
        assert_eq!(result.delta_accept, 0);
        assert_eq!(result.delta_refusal, 0);
    }

    #[test]
    fn all_rules_active_shifts_ten_points() {
        let (catalog, selection, baseline) = fixture();
        assert_eq!(impact_total(&catalog, &selection), 10);
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_accept, 10);
        assert_eq!(result.new_refusal, 90);
        assert_eq!(result.delta_accept, -10);
        assert_eq!(result.delta_refusal, 10);
    }

    #[test]
    fn single_rule_contributes_only_its_own_weight() {
        let (catalog, mut selection, baseline) = fixture();
        for id in RuleId::ALL {
            selection.set(id, id == RuleId::RiskScoreHigh);
        }
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_accept, 16);
        assert_eq!(result.new_refusal, 84);
    }

    #[test]
    fn impact_total_is_the_subset_sum_for_every_subset() {
        let (catalog, mut selection, _) = fixture();
        for mask in 0u32..16 {
            let mut expected = 0;
            for (bit, id) in RuleId::ALL.iter().enumerate() {
                let active = mask & (1 << bit) != 0;
                selection.set(*id, active);
                if active {
                    expected += catalog.by_id(*id).unwrap().impact;
                }
            }
            assert_eq!(impact_total(&catalog, &selection), expected);
        }
    }

    #[test]
    fn acceptance_is_floored_at_zero() {
        let (catalog, selection, _) = fixture();
        // Baseline low enough that the full 10-point impact overshoots zero.
        let baseline = Baseline {
            accept_pct: 5,
            refusal_pct: 95,
        };
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_accept, 0);
        assert_eq!(result.delta_accept, -5);
    }

    #[test]
    fn refusal_is_capped_at_one_hundred() {
        let (catalog, selection, _) = fixture();
        let baseline = Baseline {
            accept_pct: 5,
            refusal_pct: 95,
        };
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_refusal, 100);
        assert_eq!(result.delta_refusal, 5);
    }

    #[test]
    fn clamps_are_independent_not_complementary() {
        let (catalog, selection, _) = fixture();
        // Acceptance bottoms out at 0 while refusal only reaches 8 + 10 = 18;
        // the pair no longer sums to 100 and must not be re-coupled.
        let baseline = Baseline {
            accept_pct: 3,
            refusal_pct: 8,
        };
        let result = project(&catalog, &selection, baseline);
        assert_eq!(result.new_accept, 0);
        assert_eq!(result.new_refusal, 18);
        assert_ne!(result.new_accept + result.new_refusal, 100);
    }

    #[test]
    fn projection_is_idempotent_for_a_fixed_selection() {
        let (catalog, selection, baseline) = fixture();
        let first = project(&catalog, &selection, baseline);
        let second = project(&catalog, &selection, baseline);
        assert_eq!(first, second);
    }
}
