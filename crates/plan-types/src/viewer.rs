// In crates/plan-types/src/viewer.rs

//! The nested plan-viewer schema served by `GET /api/plan/v2`.
//!
//! Most records here are plain data. The exceptions are [`Drift`] and the
//! `planSnapshot` map, which are derived from the allocation tree and cash
//! position so the denormalized views can never disagree with the tree.

use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// --- Funds ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualCharges {
    /// Ongoing charges figure, in percent.
    pub ocf: f64,
    pub transaction_costs: f64,
    pub incidental_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Esg {
    pub rating: String,
    /// Tonnes CO2e per $1m of revenue.
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Morningstar {
    pub star_rating: u8,
    pub category: String,
    pub legal_structure: String,
}

/// A leaf holding inside an [`AssetNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub fund_id: String,
    pub sedol: String,
    pub isin: String,
    pub name: String,
    pub units: Decimal,
    pub nav: Decimal,
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_pct: f64,
    pub annual_charges: AnnualCharges,
    pub esg: Esg,
    pub morningstar: Morningstar,
}

// --- Allocation tree ---

/// One allocation bucket. Buckets own their sub-buckets, so the tree is
/// always built top-down and cannot contain cycles.
///
/// Serializes scalar fields first, then `children` depth-first, then `funds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNode {
    pub bucket: String,
    pub target_pct: f64,
    pub current_pct: f64,
    pub market_value: Decimal,
    pub children: Vec<AssetNode>,
    pub funds: Vec<Fund>,
}

impl AssetNode {
    /// Sum of the market values of the given top-level buckets.
    pub fn total_market_value(nodes: &[AssetNode]) -> Decimal {
        nodes.iter().map(|n| n.market_value).sum()
    }

    /// Number of funds held anywhere below this bucket.
    pub fn fund_count(&self) -> usize {
        self.funds.len() + self.children.iter().map(AssetNode::fund_count).sum::<usize>()
    }
}

// --- Flat sections ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cash {
    pub balance: Decimal,
    pub currency: String,
    pub interest_rate_pct: f64,
    pub target_pct: f64,
    pub current_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDrift {
    pub bucket: String,
    pub target_pct: f64,
    pub current_pct: f64,
    pub drift_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drift {
    pub threshold_pct: f64,
    pub max_drift_pct: f64,
    pub breached: bool,
    pub recommended_action: String,
    pub buckets: Vec<BucketDrift>,
}

pub const CASH_BUCKET: &str = "Cash";
pub const ACTION_REBALANCE: &str = "Rebalance";
pub const ACTION_HOLD: &str = "Hold";

impl Drift {
    /// Derives bucket drift for each top-level node, then for cash.
    ///
    /// The plan is breached when the largest absolute drift is strictly
    /// greater than `threshold_pct`.
    pub fn from_allocation(nodes: &[AssetNode], cash: &Cash, threshold_pct: f64) -> Self {
        let buckets: Vec<BucketDrift> = nodes
            .iter()
            .map(|n| bucket_drift(&n.bucket, n.target_pct, n.current_pct))
            .chain(std::iter::once(bucket_drift(
                CASH_BUCKET,
                cash.target_pct,
                cash.current_pct,
            )))
            .collect();

        let max_drift_pct = buckets
            .iter()
            .map(|b| b.drift_pct.abs())
            .fold(0.0_f64, f64::max);
        let breached = max_drift_pct > threshold_pct;

        Self {
            threshold_pct,
            max_drift_pct,
            breached,
            recommended_action: if breached { ACTION_REBALANCE } else { ACTION_HOLD }.to_string(),
            buckets,
        }
    }
}

fn bucket_drift(bucket: &str, target_pct: f64, current_pct: f64) -> BucketDrift {
    BucketDrift {
        bucket: bucket.to_string(),
        target_pct,
        current_pct,
        drift_pct: round2(current_pct - target_pct),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub currency: String,
    pub ytd_return_pct: f64,
    pub one_year_return_pct: f64,
    pub three_year_annualised_pct: f64,
    pub five_year_annualised_pct: f64,
    pub since_inception_pct: f64,
    pub benchmark: String,
    pub benchmark_ytd_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub horizon_years: u32,
    pub retirement_age: u32,
    pub monthly_contribution: Decimal,
    pub assumed_growth_pct: f64,
    pub inflation_pct: f64,
    pub projected_value_low: Decimal,
    pub projected_value_mid: Decimal,
    pub projected_value_high: Decimal,
    pub goal_probability_pct: f64,
}

/// A hypothetical allocation shown for comparison only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub scenario_id: String,
    pub name: String,
    pub description: String,
    pub equity_pct: f64,
    pub bond_pct: f64,
    pub cash_pct: f64,
    pub expected_return_pct: f64,
    pub volatility_pct: f64,
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIf {
    pub baseline_name: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub risk_profile: String,
    pub suitability_status: String,
    pub last_review_date: String,
    pub next_review_date: String,
    pub key_documents_provided: bool,
    pub consumer_duty_outcome: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiHints {
    pub default_view: String,
    pub currency_symbol: String,
    pub show_esg: bool,
    pub highlight_buckets: Vec<String>,
    pub chart_palette: Vec<String>,
}

// --- Root aggregate ---

/// Who and when a plan belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanIdentity {
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub plan_name: String,
    pub as_of_date: String,
}

/// The independently authored sections of a plan. Drift and the snapshot
/// are not part of this, they are derived during [`PlanViewer::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSections {
    pub asset_allocation: Vec<AssetNode>,
    pub cash: Cash,
    pub drift_threshold_pct: f64,
    pub performance: Performance,
    pub projections: Projections,
    pub what_if: WhatIf,
    pub compliance: Compliance,
    pub ui_hints: UiHints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanViewer {
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub plan_name: String,
    pub as_of_date: String,
    pub asset_allocation: Vec<AssetNode>,
    pub cash: Cash,
    pub drift: Drift,
    pub performance: Performance,
    pub projections: Projections,
    pub what_if: WhatIf,
    pub compliance: Compliance,
    pub ui_hints: UiHints,
    pub plan_snapshot: Map<String, Value>,
}

impl PlanViewer {
    pub fn assemble(identity: PlanIdentity, sections: PlanSections) -> Result<Self> {
        let drift = Drift::from_allocation(
            &sections.asset_allocation,
            &sections.cash,
            sections.drift_threshold_pct,
        );
        let plan_snapshot = snapshot(&sections.asset_allocation, &sections.cash, &drift)?;

        Ok(Self {
            plan_id: identity.plan_id,
            client_id: identity.client_id,
            plan_name: identity.plan_name,
            as_of_date: identity.as_of_date,
            asset_allocation: sections.asset_allocation,
            cash: sections.cash,
            drift,
            performance: sections.performance,
            projections: sections.projections,
            what_if: sections.what_if,
            compliance: sections.compliance,
            ui_hints: sections.ui_hints,
            plan_snapshot,
        })
    }
}

/// Builds the denormalized `planSnapshot` summary.
///
/// Keys, in order: `totalValue`, `investedValue`, `assetAllocation`, `cash`,
/// `drift`.
pub fn snapshot(nodes: &[AssetNode], cash: &Cash, drift: &Drift) -> Result<Map<String, Value>> {
    let invested = AssetNode::total_market_value(nodes);

    let mut map = Map::new();
    map.insert("totalValue".into(), serde_json::to_value(invested + cash.balance)?);
    map.insert("investedValue".into(), serde_json::to_value(invested)?);
    map.insert("assetAllocation".into(), serde_json::to_value(nodes)?);
    map.insert("cash".into(), serde_json::to_value(cash)?);
    map.insert("drift".into(), serde_json::to_value(drift)?);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn node(bucket: &str, target: f64, current: f64, value: Decimal) -> AssetNode {
        AssetNode {
            bucket: bucket.into(),
            target_pct: target,
            current_pct: current,
            market_value: value,
            children: vec![],
            funds: vec![],
        }
    }

    fn fund(id: &str) -> Fund {
        Fund {
            fund_id: id.into(),
            sedol: "B3X7QG6".into(),
            isin: "GB00B3X7QG63".into(),
            name: "Test Fund".into(),
            units: dec!(10),
            nav: dec!(2.5),
            market_value: dec!(25.0),
            cost_basis: dec!(20.0),
            gain_loss: dec!(5.0),
            gain_loss_pct: 25.0,
            annual_charges: AnnualCharges {
                ocf: 0.1,
                transaction_costs: 0.02,
                incidental_costs: 0.0,
            },
            esg: Esg {
                rating: "AA".into(),
                carbon_intensity: 100.0,
            },
            morningstar: Morningstar {
                star_rating: 4,
                category: "Global Large-Cap Blend Equity".into(),
                legal_structure: "OEIC".into(),
            },
        }
    }

    fn cash(target: f64, current: f64) -> Cash {
        Cash {
            balance: dec!(500.00),
            currency: "GBP".into(),
            interest_rate_pct: 3.5,
            target_pct: target,
            current_pct: current,
        }
    }

    #[test]
    fn drift_lists_top_level_buckets_then_cash() {
        let nodes = vec![
            node("Equity", 60.0, 62.5, dec!(625)),
            node("Bond", 35.0, 32.5, dec!(325)),
        ];
        let drift = Drift::from_allocation(&nodes, &cash(5.0, 5.0), 5.0);

        let names: Vec<_> = drift.buckets.iter().map(|b| b.bucket.as_str()).collect();
        assert_eq!(names, ["Equity", "Bond", "Cash"]);
        assert_eq!(drift.buckets[0].drift_pct, 2.5);
        assert_eq!(drift.buckets[1].drift_pct, -2.5);
        assert_eq!(drift.buckets[2].drift_pct, 0.0);
        assert_eq!(drift.max_drift_pct, 2.5);
        assert!(!drift.breached);
        assert_eq!(drift.recommended_action, ACTION_HOLD);
    }

    #[test]
    fn drift_beyond_threshold_recommends_rebalance() {
        let nodes = vec![node("Equity", 60.0, 71.3, dec!(713))];
        let drift = Drift::from_allocation(&nodes, &cash(5.0, 1.0), 5.0);

        assert_eq!(drift.buckets[0].drift_pct, 11.3);
        assert_eq!(drift.max_drift_pct, 11.3);
        assert!(drift.breached);
        assert_eq!(drift.recommended_action, ACTION_REBALANCE);
    }

    #[test]
    fn drift_equal_to_threshold_is_not_breached() {
        let nodes = vec![node("Equity", 60.0, 65.0, dec!(650))];
        let drift = Drift::from_allocation(&nodes, &cash(5.0, 5.0), 5.0);
        assert!(!drift.breached);
    }

    #[test]
    fn fund_count_walks_the_whole_tree() {
        let mut leaf = node("North America", 30.0, 31.0, dec!(310));
        leaf.funds.push(fund("F1"));
        let mut equity = node("Equity", 60.0, 62.0, dec!(620));
        equity.children.push(leaf);
        equity.funds.push(fund("F2"));
        assert_eq!(equity.fund_count(), 2);
    }

    #[test]
    fn asset_node_serializes_children_before_funds() {
        let mut leaf = node("North America", 30.0, 31.0, dec!(310));
        leaf.funds.push(fund("F1"));
        let mut equity = node("Equity", 60.0, 62.0, dec!(620));
        equity.children.push(leaf);

        let value = serde_json::to_value(&equity).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            ["bucket", "targetPct", "currentPct", "marketValue", "children", "funds"]
        );
        assert_eq!(value["children"][0]["funds"][0]["fundId"], "F1");
        assert_eq!(value["children"][0]["funds"][0]["annualCharges"]["ocf"], 0.1);
    }

    #[test]
    fn snapshot_totals_come_from_the_tree_and_cash() {
        let nodes = vec![
            node("Equity", 60.0, 62.5, dec!(625)),
            node("Bond", 35.0, 32.5, dec!(325)),
        ];
        let cash = cash(5.0, 5.0);
        let drift = Drift::from_allocation(&nodes, &cash, 5.0);
        let map = snapshot(&nodes, &cash, &drift).unwrap();

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["totalValue", "investedValue", "assetAllocation", "cash", "drift"]);
        assert_eq!(map["investedValue"], 950.0);
        assert_eq!(map["totalValue"], 1450.0);
        assert_eq!(map["assetAllocation"], serde_json::to_value(&nodes).unwrap());
        assert_eq!(map["drift"], serde_json::to_value(&drift).unwrap());
    }
}
