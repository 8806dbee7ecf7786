//! Applicant scoring: age calculation, rate rules and their configuration

mod age;
pub mod config;
mod rules;

pub use age::age_in_years;
pub use config::ScoringConfig;
pub use rules::{RateAccumulator, RateAdjustment, RateRule, ScoringStage, ScoringSubject};

use crate::applicant::ApplicantProfile;
use crate::error::RejectionReason;
use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate and principal produced by an accepted evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// Final annual rate (not clamped)
    pub rate: Decimal,

    /// Principal for payment calculations, including any insurance premium
    pub amount: Decimal,

    pub insurance_premium: Decimal,

    /// Non-zero rate deltas in the order they were applied
    pub adjustments: Vec<RateAdjustment>,
}

/// Result of running a rule chain once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateDecision {
    Approved(ScoringOutcome),
    Rejected(RejectionReason),
}

impl RateDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, RateDecision::Approved(_))
    }

    pub fn into_result(self) -> Result<ScoringOutcome, RejectionReason> {
        match self {
            RateDecision::Approved(outcome) => Ok(outcome),
            RateDecision::Rejected(reason) => Err(reason),
        }
    }
}

/// Stateless rule engine over an injected configuration
#[derive(Debug, Clone)]
pub struct RateEngine {
    config: ScoringConfig,
}

impl RateEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run the full scoring chain for a complete profile
    pub fn evaluate(&self, profile: &ApplicantProfile, reference_date: NaiveDate) -> RateDecision {
        match age_in_years(profile.request.birth_date, reference_date) {
            Ok(age) => self.run(ScoringStage::FullScoring, &ScoringSubject::full(profile, age)),
            Err(reason) => RateDecision::Rejected(reason),
        }
    }

    /// Run a stage's rules in order; the first rejection is terminal
    pub fn run(&self, stage: ScoringStage, subject: &ScoringSubject<'_>) -> RateDecision {
        let mut acc = RateAccumulator::new(self.config.base_interest_rate, subject.request.amount);

        for rule in stage.rules() {
            if let Err(reason) = rule.apply(subject, &self.config, &mut acc) {
                info!("{:?} rejected by {:?}: {} ({})", stage, rule, reason, reason.code());
                return RateDecision::Rejected(reason);
            }
        }

        RateDecision::Approved(ScoringOutcome {
            rate: acc.rate,
            amount: acc.amount,
            insurance_premium: acc.insurance_premium,
            adjustments: acc.adjustments,
        })
    }
}
