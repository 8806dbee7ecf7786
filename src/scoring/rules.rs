//! Ordered rate rules and the stages that select them
//!
//! Each rule either rejects the subject or nudges the running rate. Rules run in
//! the order listed for the stage and the first rejection ends the evaluation.

use super::config::ScoringConfig;
use crate::applicant::{ApplicantProfile, EmploymentStatus, Gender, LoanRequest, MaritalStatus, Position};
use crate::calculation::round_money;
use crate::error::RejectionReason;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Favorable gender/age bands (inclusive)
const FEMALE_FAVORABLE_AGES: (u32, u32) = (32, 60);
const MALE_FAVORABLE_AGES: (u32, u32) = (30, 55);

/// A single eligibility check or rate adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateRule {
    AgeEligibility,
    Insurance,
    SalaryClient,
    EmploymentStatus,
    Position,
    Affordability,
    MaritalStatus,
    GenderAge,
    WorkExperience,
}

/// Which subset of the rule chain applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStage {
    /// Offer generation: only amount, term and birth date are known
    PreScoring,
    /// Credit pricing with the complete applicant profile
    FullScoring,
}

const PRE_SCORING_RULES: &[RateRule] = &[
    RateRule::AgeEligibility,
    RateRule::Insurance,
    RateRule::SalaryClient,
];

const FULL_SCORING_RULES: &[RateRule] = &[
    RateRule::Insurance,
    RateRule::SalaryClient,
    RateRule::EmploymentStatus,
    RateRule::Position,
    RateRule::Affordability,
    RateRule::MaritalStatus,
    RateRule::GenderAge,
    RateRule::WorkExperience,
];

impl ScoringStage {
    pub fn rules(&self) -> &'static [RateRule] {
        match self {
            ScoringStage::PreScoring => PRE_SCORING_RULES,
            ScoringStage::FullScoring => FULL_SCORING_RULES,
        }
    }
}

/// Read-only view of what is being scored
#[derive(Debug, Clone, Copy)]
pub struct ScoringSubject<'a> {
    pub request: &'a LoanRequest,
    pub age: u32,
    pub insurance_enabled: bool,
    pub salary_client: bool,
    /// Present only at the full scoring stage
    pub profile: Option<&'a ApplicantProfile>,
}

impl<'a> ScoringSubject<'a> {
    /// Subject for one cell of the pre-scoring offer matrix
    pub fn pre_scoring(request: &'a LoanRequest, age: u32, insurance_enabled: bool, salary_client: bool) -> Self {
        Self {
            request,
            age,
            insurance_enabled,
            salary_client,
            profile: None,
        }
    }

    /// Subject for a complete applicant profile
    pub fn full(profile: &'a ApplicantProfile, age: u32) -> Self {
        Self {
            request: &profile.request,
            age,
            insurance_enabled: profile.insurance_enabled,
            salary_client: profile.salary_client,
            profile: Some(profile),
        }
    }
}

/// Rate delta contributed by one rule, kept for the decision trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateAdjustment {
    pub rule: RateRule,
    pub delta: Decimal,
}

/// Running state threaded through the rule chain
#[derive(Debug, Clone)]
pub struct RateAccumulator {
    pub rate: Decimal,
    /// Principal used for payment calculations (includes the insurance premium)
    pub amount: Decimal,
    pub insurance_premium: Decimal,
    pub adjustments: Vec<RateAdjustment>,
}

impl RateAccumulator {
    pub fn new(base_rate: Decimal, amount: Decimal) -> Self {
        Self {
            rate: base_rate,
            amount,
            insurance_premium: Decimal::ZERO,
            adjustments: Vec::new(),
        }
    }

    fn adjust(&mut self, rule: RateRule, delta: Decimal) {
        if delta.is_zero() {
            return;
        }
        self.rate += delta;
        debug!("{:?}: rate {:+} -> {}", rule, delta, self.rate);
        self.adjustments.push(RateAdjustment { rule, delta });
    }
}

impl RateRule {
    /// Apply this rule to the accumulator, or reject the subject
    pub fn apply(
        self,
        subject: &ScoringSubject<'_>,
        config: &ScoringConfig,
        acc: &mut RateAccumulator,
    ) -> Result<(), RejectionReason> {
        match self {
            RateRule::AgeEligibility => {
                if subject.age < config.min_age || subject.age > config.max_age {
                    return Err(RejectionReason::IneligibleAge { age: subject.age });
                }
            }
            RateRule::Insurance => {
                if subject.insurance_enabled {
                    let premium = subject
                        .request
                        .amount
                        .checked_mul(config.insurance_cost_rate)
                        .map(round_money)
                        .ok_or(RejectionReason::ArithmeticOverflow)?;
                    acc.insurance_premium = premium;
                    acc.amount = acc
                        .amount
                        .checked_add(premium)
                        .ok_or(RejectionReason::ArithmeticOverflow)?;
                    acc.adjust(self, -config.insurance_discount);
                }
            }
            RateRule::SalaryClient => {
                if subject.salary_client {
                    acc.adjust(self, -config.salary_client_discount);
                }
            }
            RateRule::EmploymentStatus => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                match profile.employment.status {
                    EmploymentStatus::Unemployed => return Err(RejectionReason::Unemployed),
                    EmploymentStatus::SelfEmployed => acc.adjust(self, config.self_employed_surcharge),
                    EmploymentStatus::BusinessOwner => acc.adjust(self, config.business_owner_surcharge),
                    EmploymentStatus::Employed | EmploymentStatus::Retired => {}
                }
            }
            RateRule::Position => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                match profile.employment.position {
                    Position::MiddleManager => acc.adjust(self, -config.middle_manager_discount),
                    Position::TopManager => acc.adjust(self, -config.top_manager_discount),
                    _ => {}
                }
            }
            RateRule::Affordability => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                // Requested amount, not the insurance-inflated principal
                let limit = profile
                    .employment
                    .salary
                    .checked_mul(config.max_amount_salary_multiple)
                    .ok_or(RejectionReason::ArithmeticOverflow)?;
                if subject.request.amount > limit {
                    return Err(RejectionReason::InsufficientAffordability {
                        amount: subject.request.amount,
                        limit,
                    });
                }
            }
            RateRule::MaritalStatus => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                match profile.marital_status {
                    MaritalStatus::Married => acc.adjust(self, -config.married_discount),
                    MaritalStatus::Divorced => acc.adjust(self, config.divorced_surcharge),
                    MaritalStatus::Single | MaritalStatus::Widowed => {}
                }
            }
            RateRule::GenderAge => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                let within = |(low, high): (u32, u32)| subject.age >= low && subject.age <= high;
                match profile.gender {
                    Gender::Female if within(FEMALE_FAVORABLE_AGES) => {
                        acc.adjust(self, -config.favorable_gender_age_discount)
                    }
                    Gender::Male if within(MALE_FAVORABLE_AGES) => {
                        acc.adjust(self, -config.favorable_gender_age_discount)
                    }
                    Gender::NonBinary => acc.adjust(self, config.non_binary_surcharge),
                    _ => {}
                }
            }
            RateRule::WorkExperience => {
                let Some(profile) = subject.profile else {
                    return Ok(());
                };
                let employment = &profile.employment;
                if employment.total_experience_months < config.min_total_experience_months
                    || employment.current_experience_months < config.min_current_experience_months
                {
                    return Err(RejectionReason::InsufficientExperience {
                        total_months: employment.total_experience_months,
                        current_months: employment.current_experience_months,
                    });
                }
            }
        }
        Ok(())
    }
}
