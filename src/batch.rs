//! Batch scoring runner
//!
//! Builds the engine once, then prices many applicant profiles in parallel.
//! Every evaluation only reads the shared configuration.

use crate::applicant::ApplicantProfile;
use crate::calculation::{CreditEngine, CreditResult};
use crate::error::RejectionReason;
use crate::scoring::ScoringConfig;
use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of pricing one profile
pub type PricingResult = Result<CreditResult, RejectionReason>;

/// Pre-built engine for efficient batch scoring
#[derive(Debug, Clone, Default)]
pub struct ScoringRunner {
    engine: CreditEngine,
}

impl ScoringRunner {
    /// Runner with default scoring parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner loading parameters from the default CSV location
    pub fn from_csv() -> anyhow::Result<Self> {
        Ok(Self::with_config(ScoringConfig::from_csv()?))
    }

    /// Runner loading parameters from a specific file
    pub fn from_csv_path(path: &std::path::Path) -> anyhow::Result<Self> {
        Ok(Self::with_config(ScoringConfig::from_csv_path(path)?))
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            engine: CreditEngine::new(config),
        }
    }

    pub fn engine(&self) -> &CreditEngine {
        &self.engine
    }

    /// Price a single profile
    pub fn run(&self, profile: &ApplicantProfile, reference_date: NaiveDate) -> PricingResult {
        self.engine.price_credit(profile, reference_date)
    }

    /// Price many profiles in parallel; output order matches input order
    pub fn run_batch(&self, profiles: &[ApplicantProfile], reference_date: NaiveDate) -> Vec<PricingResult> {
        profiles
            .par_iter()
            .map(|profile| self.engine.price_credit(profile, reference_date))
            .collect()
    }
}

/// Aggregate statistics over a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,

    /// Rejection counts keyed by reason code
    pub rejections_by_code: BTreeMap<String, usize>,

    /// Sum of approved principals
    pub total_principal: Decimal,

    /// Sum of approved total repayments
    pub total_repayment: Decimal,

    /// Principal-weighted mean rate of approved credits (reporting only)
    pub weighted_average_rate: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[PricingResult]) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            ..Default::default()
        };
        let mut weighted_rate = Decimal::ZERO;

        for result in results {
            match result {
                Ok(credit) => {
                    summary.approved += 1;
                    summary.total_principal += credit.amount;
                    summary.total_repayment += credit.total_repayment;
                    weighted_rate += credit.rate * credit.amount;
                }
                Err(reason) => {
                    summary.rejected += 1;
                    *summary
                        .rejections_by_code
                        .entry(reason.code().to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        if !summary.total_principal.is_zero() {
            summary.weighted_average_rate = (weighted_rate / summary.total_principal)
                .to_f64()
                .unwrap_or(0.0);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::{Employment, EmploymentStatus, Gender, LoanRequest, MaritalStatus, Position};
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn profile(amount: Decimal, status: EmploymentStatus) -> ApplicantProfile {
        ApplicantProfile {
            request: LoanRequest::new(amount, 24, NaiveDate::from_ymd_opt(1962, 3, 3).unwrap()),
            gender: Gender::Female,
            marital_status: MaritalStatus::Single,
            employment: Employment {
                status,
                position: Position::Other,
                salary: dec!(10000),
                total_experience_months: 200,
                current_experience_months: 50,
            },
            insurance_enabled: false,
            salary_client: false,
        }
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScoringRunner::new();
        let profiles = vec![
            profile(dec!(100000), EmploymentStatus::Employed),
            profile(dec!(100000), EmploymentStatus::Unemployed),
            profile(dec!(250000), EmploymentStatus::Employed),
            profile(dec!(50000), EmploymentStatus::SelfEmployed),
        ];

        let results = runner.run_batch(&profiles, today());
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(RejectionReason::Unemployed));
        assert_eq!(results[2].as_ref().unwrap_err().code(), "INSUFFICIENT_AFFORDABILITY");
        assert_eq!(results[3].as_ref().unwrap().rate, dec!(0.17));
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let runner = ScoringRunner::new();
        let profiles: Vec<_> = (0..32)
            .map(|i| profile(dec!(20000) + Decimal::from(i * 5000), EmploymentStatus::Employed))
            .collect();

        let parallel = runner.run_batch(&profiles, today());
        let sequential: Vec<_> = profiles.iter().map(|p| runner.run(p, today())).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_summary_counts_and_weighted_rate() {
        let runner = ScoringRunner::new();
        let profiles = vec![
            profile(dec!(100000), EmploymentStatus::Employed),
            profile(dec!(100000), EmploymentStatus::SelfEmployed),
            profile(dec!(100000), EmploymentStatus::Unemployed),
        ];

        let summary = BatchSummary::from_results(&runner.run_batch(&profiles, today()));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.rejections_by_code.get("UNEMPLOYED"), Some(&1));
        assert_eq!(summary.total_principal, dec!(200000));
        assert_relative_eq!(summary.weighted_average_rate, 0.16, epsilon = 1e-12);
    }
}
