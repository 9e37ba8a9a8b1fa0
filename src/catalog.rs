use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of scoring rules the simulator knows about. The catalog is
/// fixed at process start; rules are never added or removed at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    RiskScoreHigh,
    DebtRatio,
    AgeClient,
    StabilityEmployment,
}

impl RuleId {
    pub const ALL: [RuleId; 4] = [
        RuleId::RiskScoreHigh,
        RuleId::DebtRatio,
        RuleId::AgeClient,
        RuleId::StabilityEmployment,
    ];

    pub fn as_name(&self) -> &'static str {
        match self {
            Self::RiskScoreHigh => "RISK_SCORE_HIGH",
            Self::DebtRatio => "DEBT_RATIO",
            Self::AgeClient => "AGE_CLIENT",
            Self::StabilityEmployment => "STABILITY_EMPLOYMENT",
        }
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_name())
    }
}

#[derive(Debug, Error)]
#[error("unknown rule: {0}")]
pub struct UnknownRuleError(pub String);

impl FromStr for RuleId {
    type Err = UnknownRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "RISK_SCORE_HIGH" | "RISK_SCORE" => Ok(Self::RiskScoreHigh),
            "DEBT_RATIO" => Ok(Self::DebtRatio),
            "AGE_CLIENT" | "AGE" => Ok(Self::AgeClient),
            "STABILITY_EMPLOYMENT" | "EMPLOYMENT" => Ok(Self::StabilityEmployment),
            _ => Err(UnknownRuleError(s.to_string())),
        }
    }
}

/// One entry of the rule catalog: a fixed impact weight in percentage points
/// and a human-readable description for the toggle label. Serialize-only:
/// the catalog is hard-coded and never read back in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Rule {
    pub id: RuleId,
    pub impact: i32,
    pub description: &'static str,
}

/// Immutable catalog of the four recommended scoring rules.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn with_defaults() -> Self {
        Self {
            rules: vec![
                Rule {
                    id: RuleId::RiskScoreHigh,
                    impact: 4,
                    description: "Strict threshold on the client risk score",
                },
                Rule {
                    id: RuleId::DebtRatio,
                    impact: 3,
                    description: "Cap on the debt-to-income ratio",
                },
                Rule {
                    id: RuleId::AgeClient,
                    impact: 2,
                    description: "Age-based restriction",
                },
                Rule {
                    id: RuleId::StabilityEmployment,
                    impact: 1,
                    description: "Minimum tenure in current employment",
                },
            ],
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn by_id(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
