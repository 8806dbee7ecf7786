//! Entry points used by the orchestration layer

use super::credit::{price_credit, CreditResult};
use super::offers::{generate_offers, LoanOffer};
use crate::applicant::{ApplicantProfile, LoanRequest};
use crate::error::RejectionReason;
use crate::scoring::{RateDecision, RateEngine, ScoringConfig};
use chrono::NaiveDate;

/// Pure, shareable credit engine.
///
/// Holds only the immutable scoring configuration, so one instance can be
/// shared across threads and every call with the same inputs returns the same
/// result.
#[derive(Debug, Clone)]
pub struct CreditEngine {
    rates: RateEngine,
}

impl CreditEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            rates: RateEngine::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.rates.config()
    }

    /// Pre-scoring: four offers sorted by ascending rate
    pub fn generate_offers(
        &self,
        request: &LoanRequest,
        reference_date: NaiveDate,
    ) -> Result<Vec<LoanOffer>, RejectionReason> {
        generate_offers(&self.rates, request, reference_date)
    }

    /// Full scoring followed by annuity pricing and schedule generation
    pub fn price_credit(
        &self,
        profile: &ApplicantProfile,
        reference_date: NaiveDate,
    ) -> Result<CreditResult, RejectionReason> {
        price_credit(&self.rates, profile, reference_date)
    }

    /// Full scoring only, without pricing
    pub fn evaluate(&self, profile: &ApplicantProfile, reference_date: NaiveDate) -> RateDecision {
        self.rates.evaluate(profile, reference_date)
    }
}

impl Default for CreditEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
