//! Rejection taxonomy shared by offer generation and credit pricing

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a loan request or scoring profile was not priced.
///
/// Policy rejections (`IneligibleAge`, `Unemployed`, `InsufficientAffordability`,
/// `InsufficientExperience`) come from the rule chain. The remaining variants
/// are input validation failures raised before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectionReason {
    #[error("applicant age {age} is outside the eligible range")]
    IneligibleAge { age: u32 },

    #[error("employment status disqualifies applicant")]
    Unemployed,

    #[error("requested amount {amount} exceeds affordability limit {limit}")]
    InsufficientAffordability { amount: Decimal, limit: Decimal },

    #[error("insufficient work experience: {total_months} months total, {current_months} months at current employer")]
    InsufficientExperience { total_months: u32, current_months: u32 },

    #[error("invalid loan term: {term} months")]
    InvalidTerm { term: u32 },

    #[error("requested amount {amount} is below the minimum {minimum}")]
    InvalidAmount { amount: Decimal, minimum: Decimal },

    #[error("birth date {birth_date} is after reference date {reference_date}")]
    InvalidBirthDate {
        birth_date: NaiveDate,
        reference_date: NaiveDate,
    },

    #[error("decimal overflow while pricing the loan")]
    ArithmeticOverflow,
}

impl RejectionReason {
    /// Stable machine-readable code for the orchestration layer
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::IneligibleAge { .. } => "INELIGIBLE_AGE",
            RejectionReason::Unemployed => "UNEMPLOYED",
            RejectionReason::InsufficientAffordability { .. } => "INSUFFICIENT_AFFORDABILITY",
            RejectionReason::InsufficientExperience { .. } => "INSUFFICIENT_EXPERIENCE",
            RejectionReason::InvalidTerm { .. } => "INVALID_TERM",
            RejectionReason::InvalidAmount { .. } => "INVALID_AMOUNT",
            RejectionReason::InvalidBirthDate { .. } => "INVALID_BIRTH_DATE",
            RejectionReason::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
        }
    }

    /// True for rejections produced by the scoring rules rather than by input validation
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            RejectionReason::IneligibleAge { .. }
                | RejectionReason::Unemployed
                | RejectionReason::InsufficientAffordability { .. }
                | RejectionReason::InsufficientExperience { .. }
        )
    }
}
