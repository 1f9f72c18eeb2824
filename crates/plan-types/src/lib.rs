// In crates/plan-types/src/lib.rs

pub mod error;
pub mod legacy;
pub mod viewer;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use legacy::{AccountSummary, Investment, PlanResponse, Transaction, TransactionType};
pub use viewer::{
    AnnualCharges, AssetNode, BucketDrift, Cash, Compliance, Drift, Esg, Fund, Morningstar,
    Performance, PlanIdentity, PlanSections, PlanViewer, Projections, Scenario, UiHints, WhatIf,
};
