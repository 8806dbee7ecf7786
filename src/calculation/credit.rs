//! Fully priced credit for a scored applicant

use super::annuity::monthly_payment;
use super::schedule::{amortize, PaymentScheduleElement};
use crate::applicant::ApplicantProfile;
use crate::error::RejectionReason;
use crate::scoring::{RateAdjustment, RateEngine};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Priced credit with its amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditResult {
    /// Principal, including the insurance premium when insurance is enabled
    pub amount: Decimal,
    pub requested_amount: Decimal,
    pub insurance_premium: Decimal,
    pub term: u32,
    pub rate: Decimal,
    pub monthly_payment: Decimal,

    /// Sum of every scheduled payment (PSK)
    pub total_repayment: Decimal,

    pub insurance_enabled: bool,
    pub salary_client: bool,

    /// Rate deltas applied on top of the base rate
    pub adjustments: Vec<RateAdjustment>,

    pub schedule: Vec<PaymentScheduleElement>,
}

impl CreditResult {
    /// Interest paid over the life of the credit
    pub fn total_interest(&self) -> Decimal {
        self.schedule.iter().map(|e| e.interest_payment).sum()
    }
}

/// Score the profile and, if accepted, price it with a schedule starting one
/// month after `reference_date`
pub fn price_credit(
    engine: &RateEngine,
    profile: &ApplicantProfile,
    reference_date: NaiveDate,
) -> Result<CreditResult, RejectionReason> {
    profile.request.validate(engine.config())?;
    let outcome = engine.evaluate(profile, reference_date).into_result()?;

    let term = profile.request.term;
    let payment = monthly_payment(outcome.amount, outcome.rate, term)?;
    let schedule = amortize(outcome.amount, outcome.rate, payment, term, reference_date)?;
    let total_repayment: Decimal = schedule.iter().map(|e| e.total_payment).sum();

    debug!(
        "priced credit: amount {} rate {} payment {} total {}",
        outcome.amount, outcome.rate, payment, total_repayment
    );

    Ok(CreditResult {
        amount: outcome.amount,
        requested_amount: profile.request.amount,
        insurance_premium: outcome.insurance_premium,
        term,
        rate: outcome.rate,
        monthly_payment: payment,
        total_repayment,
        insurance_enabled: profile.insurance_enabled,
        salary_client: profile.salary_client,
        adjustments: outcome.adjustments,
        schedule,
    })
}
