// In crates/plan-types/src/legacy.rs

//! The flat account schema served by `GET /api/plan`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// High-level balances and contribution settings for one retirement account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_balance: Decimal,
    pub vested_balance: Decimal,
    pub ytd_change: Decimal,
    /// Year-to-date rate of return, in percent.
    pub rate_of_return: f64,
    pub last_contribution_amount: Decimal,
    /// `YYYY-MM-DD`
    pub next_contribution_date: String,
    /// Payroll contribution rate, in whole percent.
    pub contribution_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Contribution,
    Dividend,
    Fee,
    Withdrawal,
    Transfer,
}

/// A single ledger entry. Debits carry a negative `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub name: String,
    pub ticker: String,
    pub balance: Decimal,
    pub allocation_percentage: u32,
}

/// The root object of the legacy endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub account_data: AccountSummary,
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
}

impl PlanResponse {
    /// Sum of `allocation_percentage` across all investments.
    pub fn total_allocation(&self) -> u32 {
        self.investments.iter().map(|i| i.allocation_percentage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> PlanResponse {
        PlanResponse {
            account_data: AccountSummary {
                total_balance: dec!(1000.50),
                vested_balance: dec!(900.00),
                ytd_change: dec!(-12.25),
                rate_of_return: 4.5,
                last_contribution_amount: dec!(100.00),
                next_contribution_date: "2024-06-15".into(),
                contribution_rate: 6,
            },
            transactions: vec![Transaction {
                id: "1".into(),
                date: "2024-06-01".into(),
                description: "Plan Admin Fee".into(),
                amount: dec!(-25.00),
                kind: TransactionType::Fee,
            }],
            investments: vec![
                Investment {
                    name: "Growth".into(),
                    ticker: "GRW".into(),
                    balance: dec!(600.00),
                    allocation_percentage: 60,
                },
                Investment {
                    name: "Income".into(),
                    ticker: "INC".into(),
                    balance: dec!(400.50),
                    allocation_percentage: 40,
                },
            ],
        }
    }

    #[test]
    fn account_summary_keys_follow_declaration_order() {
        let json = serde_json::to_string(&sample().account_data).unwrap();
        assert_eq!(
            json,
            r#"{"totalBalance":1000.5,"vestedBalance":900.0,"ytdChange":-12.25,"rateOfReturn":4.5,"lastContributionAmount":100.0,"nextContributionDate":"2024-06-15","contributionRate":6}"#
        );
    }

    #[test]
    fn transaction_kind_serializes_under_type_key() {
        let value = serde_json::to_value(&sample().transactions[0]).unwrap();
        assert_eq!(value["type"], "Fee");
        assert_eq!(value["amount"], -25.0);
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn total_allocation_sums_percentages() {
        assert_eq!(sample().total_allocation(), 100);
    }

    #[test]
    fn root_keys_are_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["accountData", "transactions", "investments"]);
    }
}
