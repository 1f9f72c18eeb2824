// In crates/web-server/src/fixtures/legacy.rs

use plan_types::{AccountSummary, Investment, PlanResponse, Transaction, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds the payload for `GET /api/plan`.
pub fn plan_response() -> PlanResponse {
    let account_data = AccountSummary {
        total_balance: dec!(142567.89),
        vested_balance: dec!(139850.45),
        ytd_change: dec!(12450.50),
        rate_of_return: 12.4,
        last_contribution_amount: dec!(850.00),
        next_contribution_date: "2024-06-15".to_string(),
        contribution_rate: 8,
    };

    let transactions = vec![
        transaction(
            "1",
            "2024-06-01",
            "Contribution - Pay Period 11",
            dec!(850.00),
            TransactionType::Contribution,
        ),
        transaction(
            "2",
            "2024-06-01",
            "Employer Match",
            dec!(425.00),
            TransactionType::Contribution,
        ),
        transaction(
            "3",
            "2024-05-15",
            "Contribution - Pay Period 10",
            dec!(850.00),
            TransactionType::Contribution,
        ),
        transaction(
            "4",
            "2024-03-31",
            "Dividend Reinvestment - FDKLX",
            dec!(345.20),
            TransactionType::Dividend,
        ),
        transaction(
            "5",
            "2024-03-31",
            "Plan Admin Fee",
            dec!(-25.00),
            TransactionType::Fee,
        ),
    ];

    let investments = vec![
        investment("Target Date 2060 Fund", "FDKLX", dec!(64155.55), 45),
        investment("500 Index Fund", "FXAIX", dec!(49898.76), 35),
        investment("Bond Index Fund", "FXNAX", dec!(28513.58), 20),
    ];

    PlanResponse {
        account_data,
        transactions,
        investments,
    }
}

fn transaction(
    id: &str,
    date: &str,
    description: &str,
    amount: Decimal,
    kind: TransactionType,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        description: description.to_string(),
        amount,
        kind,
    }
}

fn investment(
    name: &str,
    ticker: &str,
    balance: Decimal,
    allocation_percentage: u32,
) -> Investment {
    Investment {
        name: name.to_string(),
        ticker: ticker.to_string(),
        balance,
        allocation_percentage,
    }
}
