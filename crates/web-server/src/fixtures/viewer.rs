// In crates/web-server/src/fixtures/viewer.rs

use plan_types::{
    AnnualCharges, AssetNode, Cash, Compliance, Esg, Fund, Morningstar, Performance, PlanIdentity,
    PlanSections, PlanViewer, Projections, Scenario, UiHints, WhatIf,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

const DRIFT_THRESHOLD_PCT: f64 = 5.0;

/// Builds the payload for `GET /api/plan/v2`.
///
/// `planId` and `clientId` are freshly generated on every call; everything
/// else is constant.
pub fn plan_viewer() -> plan_types::Result<PlanViewer> {
    let identity = PlanIdentity {
        plan_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        plan_name: "Retirement Plan".to_string(),
        as_of_date: "2024-06-14".to_string(),
    };

    let sections = PlanSections {
        asset_allocation: asset_allocation(),
        cash: Cash {
            balance: dec!(5000.00),
            currency: "GBP".to_string(),
            interest_rate_pct: 3.75,
            target_pct: 5.0,
            current_pct: 5.0,
        },
        drift_threshold_pct: DRIFT_THRESHOLD_PCT,
        performance: Performance {
            currency: "GBP".to_string(),
            ytd_return_pct: 6.8,
            one_year_return_pct: 11.2,
            three_year_annualised_pct: 5.4,
            five_year_annualised_pct: 7.1,
            since_inception_pct: 42.3,
            benchmark: "FTSE Global All Cap".to_string(),
            benchmark_ytd_pct: 7.2,
        },
        projections: Projections {
            horizon_years: 25,
            retirement_age: 67,
            monthly_contribution: dec!(850.00),
            assumed_growth_pct: 5.0,
            inflation_pct: 2.5,
            projected_value_low: dec!(310000.00),
            projected_value_mid: dec!(452000.00),
            projected_value_high: dec!(618000.00),
            goal_probability_pct: 78.0,
        },
        what_if: what_if(),
        compliance: Compliance {
            risk_profile: "Balanced".to_string(),
            suitability_status: "Suitable".to_string(),
            last_review_date: "2024-03-01".to_string(),
            next_review_date: "2025-03-01".to_string(),
            key_documents_provided: true,
            consumer_duty_outcome: "Good outcome".to_string(),
            warnings: vec![
                "Past performance is not a reliable indicator of future results.".to_string(),
            ],
        },
        ui_hints: UiHints {
            default_view: "allocation".to_string(),
            currency_symbol: "£".to_string(),
            show_esg: true,
            highlight_buckets: vec!["Equity".to_string()],
            chart_palette: vec![
                "#1f77b4".to_string(),
                "#ff7f0e".to_string(),
                "#2ca02c".to_string(),
            ],
        },
    };

    PlanViewer::assemble(identity, sections)
}

fn asset_allocation() -> Vec<AssetNode> {
    let north_america = AssetNode {
        bucket: "North America".to_string(),
        target_pct: 60.0,
        current_pct: 62.5,
        market_value: dec!(62500.00),
        children: vec![],
        funds: vec![Fund {
            fund_id: "FND-0001".to_string(),
            sedol: "B5B71Q7".to_string(),
            isin: "GB00B5B71Q71".to_string(),
            name: "North American Equity Index Fund".to_string(),
            units: dec!(25000),
            nav: dec!(2.50),
            market_value: dec!(62500.00),
            cost_basis: dec!(55000.00),
            gain_loss: dec!(7500.00),
            gain_loss_pct: 13.64,
            annual_charges: charges(0.10, 0.02, 0.0),
            esg: esg("A", 112.4),
            morningstar: morningstar(4, "US Large-Cap Blend Equity"),
        }],
    };

    let equity = AssetNode {
        bucket: "Equity".to_string(),
        target_pct: 60.0,
        current_pct: 62.5,
        market_value: dec!(62500.00),
        children: vec![north_america],
        funds: vec![],
    };

    let bond = AssetNode {
        bucket: "Bond".to_string(),
        target_pct: 35.0,
        current_pct: 32.5,
        market_value: dec!(32500.00),
        children: vec![],
        funds: vec![Fund {
            fund_id: "FND-0002".to_string(),
            sedol: "B4WQ9L3".to_string(),
            isin: "GB00B4WQ9L36".to_string(),
            name: "Global Aggregate Bond Index Fund".to_string(),
            units: dec!(20000),
            nav: dec!(1.625),
            market_value: dec!(32500.00),
            cost_basis: dec!(33000.00),
            gain_loss: dec!(-500.00),
            gain_loss_pct: -1.52,
            annual_charges: charges(0.12, 0.03, 0.0),
            esg: esg("AA", 58.9),
            morningstar: morningstar(3, "Global Bond - GBP Hedged"),
        }],
    };

    vec![equity, bond]
}

fn what_if() -> WhatIf {
    WhatIf {
        baseline_name: "Current allocation".to_string(),
        scenarios: vec![
            scenario(
                "SCN-1",
                "Lower risk",
                "Shift a third of equities into bonds",
                [40.0, 55.0, 5.0],
                4.6,
                7.9,
                82.1,
            ),
            scenario(
                "SCN-2",
                "Higher growth",
                "Concentrate on global equities",
                [80.0, 15.0, 5.0],
                6.9,
                13.8,
                131.5,
            ),
            scenario(
                "SCN-3",
                "Sustainable tilt",
                "Current mix using ESG-screened funds",
                [60.0, 35.0, 5.0],
                5.7,
                10.6,
                61.0,
            ),
        ],
    }
}

/// `mix` is equity, bond and cash percentages in that order.
fn scenario(
    id: &str,
    name: &str,
    description: &str,
    mix: [f64; 3],
    expected_return_pct: f64,
    volatility_pct: f64,
    carbon_intensity: f64,
) -> Scenario {
    let [equity_pct, bond_pct, cash_pct] = mix;
    Scenario {
        scenario_id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        equity_pct,
        bond_pct,
        cash_pct,
        expected_return_pct,
        volatility_pct,
        carbon_intensity,
    }
}

fn charges(ocf: f64, transaction_costs: f64, incidental_costs: f64) -> AnnualCharges {
    AnnualCharges {
        ocf,
        transaction_costs,
        incidental_costs,
    }
}

fn esg(rating: &str, carbon_intensity: f64) -> Esg {
    Esg {
        rating: rating.to_string(),
        carbon_intensity,
    }
}

fn morningstar(star_rating: u8, category: &str) -> Morningstar {
    Morningstar {
        star_rating,
        category: category.to_string(),
        legal_structure: "OEIC".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn all_funds(nodes: &[AssetNode]) -> Vec<&Fund> {
        nodes
            .iter()
            .flat_map(|n| all_funds(&n.children).into_iter().chain(n.funds.iter()))
            .collect()
    }

    #[test]
    fn fund_values_are_internally_consistent() {
        let tree = asset_allocation();
        let funds = all_funds(&tree);
        assert_eq!(funds.len(), 2);
        for fund in funds {
            assert_eq!(fund.units * fund.nav, fund.market_value, "{}", fund.fund_id);
            assert_eq!(fund.market_value - fund.cost_basis, fund.gain_loss, "{}", fund.fund_id);
        }
    }

    #[test]
    fn bucket_values_match_their_holdings() {
        for node in asset_allocation() {
            let held: Decimal = node.children.iter().map(|c| c.market_value).sum::<Decimal>()
                + node.funds.iter().map(|f| f.market_value).sum::<Decimal>();
            assert_eq!(held, node.market_value, "{}", node.bucket);
        }
    }

    #[test]
    fn scenarios_are_fully_allocated() {
        for s in what_if().scenarios {
            assert_eq!(s.equity_pct + s.bond_pct + s.cash_pct, 100.0, "{}", s.scenario_id);
        }
    }

    #[test]
    fn viewer_derives_hold_drift_and_totals() {
        let viewer = plan_viewer().unwrap();
        assert!(!viewer.drift.breached);
        assert_eq!(viewer.drift.max_drift_pct, 2.5);
        assert_eq!(viewer.plan_snapshot["totalValue"], 100000.0);
        assert_eq!(viewer.plan_snapshot["investedValue"], 95000.0);
    }
}
