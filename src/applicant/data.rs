//! Loan request and applicant profile structures

use crate::error::RejectionReason;
use crate::scoring::ScoringConfig;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gender of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

/// Marital status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Married,
    Divorced,
    Single,
    Widowed,
}

/// Employment status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    SelfEmployed,
    BusinessOwner,
    Retired,
}

/// Position held at the current employer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Manager,
    Developer,
    Analyst,
    Other,
    MiddleManager,
    TopManager,
}

/// Loan request as received at the pre-scoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Requested principal
    pub amount: Decimal,

    /// Term in months
    pub term: u32,

    /// Applicant birth date
    pub birth_date: NaiveDate,
}

impl LoanRequest {
    pub fn new(amount: Decimal, term: u32, birth_date: NaiveDate) -> Self {
        Self {
            amount,
            term,
            birth_date,
        }
    }

    /// Check the request against the configured term bounds and minimum amount
    pub fn validate(&self, config: &ScoringConfig) -> Result<(), RejectionReason> {
        if self.term == 0 || self.term < config.min_term || self.term > config.max_term {
            return Err(RejectionReason::InvalidTerm { term: self.term });
        }
        if self.amount < config.min_amount {
            return Err(RejectionReason::InvalidAmount {
                amount: self.amount,
                minimum: config.min_amount,
            });
        }
        Ok(())
    }
}

/// Employment details used by the full scoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employment {
    pub status: EmploymentStatus,
    pub position: Position,

    /// Monthly salary
    pub salary: Decimal,

    /// Total work experience in months
    pub total_experience_months: u32,

    /// Experience at the current employer in months
    pub current_experience_months: u32,
}

/// Complete scoring input: the loan request plus demographic and employment data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(flatten)]
    pub request: LoanRequest,

    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub employment: Employment,
    pub insurance_enabled: bool,
    pub salary_client: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(amount: Decimal, term: u32) -> LoanRequest {
        LoanRequest::new(amount, term, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap())
    }

    #[test]
    fn test_validate_accepts_minimums() {
        let config = ScoringConfig::default();
        assert!(request(dec!(20000), 6).validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_term() {
        let config = ScoringConfig::default();
        assert_eq!(
            request(dec!(50000), 0).validate(&config),
            Err(RejectionReason::InvalidTerm { term: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_term_above_maximum() {
        let config = ScoringConfig::default();
        assert!(request(dec!(50000), 600).validate(&config).is_ok());
        assert_eq!(
            request(dec!(50000), 601).validate(&config),
            Err(RejectionReason::InvalidTerm { term: 601 })
        );
        assert_eq!(
            request(dec!(50000), u32::MAX).validate(&config),
            Err(RejectionReason::InvalidTerm { term: u32::MAX })
        );
    }

    #[test]
    fn test_validate_rejects_small_amount() {
        let config = ScoringConfig::default();
        let err = request(dec!(19999.99), 12).validate(&config).unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = ApplicantProfile {
            request: request(dec!(100000), 12),
            gender: Gender::NonBinary,
            marital_status: MaritalStatus::Single,
            employment: Employment {
                status: EmploymentStatus::SelfEmployed,
                position: Position::MiddleManager,
                salary: dec!(50000),
                total_experience_months: 40,
                current_experience_months: 12,
            },
            insurance_enabled: false,
            salary_client: true,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["term"], 12);
        assert_eq!(json["gender"], "NON_BINARY");
        assert_eq!(json["employment"]["status"], "SELF_EMPLOYED");

        let back: ApplicantProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
