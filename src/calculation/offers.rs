//! Pre-scoring offer matrix over {insurance, salary client}

use super::annuity::monthly_payment;
use crate::applicant::LoanRequest;
use crate::error::RejectionReason;
use crate::scoring::{age_in_years, RateEngine, ScoringStage, ScoringSubject};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// (insurance_enabled, salary_client) in generation order
pub const OFFER_MATRIX: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

/// A candidate loan offer shown before full scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub requested_amount: Decimal,

    /// Principal the payment is computed on (requested amount plus insurance premium)
    pub credit_amount: Decimal,

    pub term: u32,
    pub monthly_payment: Decimal,

    /// monthly_payment * term
    pub total_amount: Decimal,

    pub rate: Decimal,
    pub insurance_enabled: bool,
    pub salary_client: bool,
}

/// Four offers sorted by ascending rate (stable for equal rates).
///
/// The age check runs as part of the pre-scoring chain, so an ineligible
/// applicant fails the whole call rather than producing a partial list.
pub fn generate_offers(
    engine: &RateEngine,
    request: &LoanRequest,
    reference_date: NaiveDate,
) -> Result<Vec<LoanOffer>, RejectionReason> {
    request.validate(engine.config())?;
    let age = age_in_years(request.birth_date, reference_date)?;

    let mut offers = Vec::with_capacity(OFFER_MATRIX.len());
    for (insurance_enabled, salary_client) in OFFER_MATRIX {
        let subject = ScoringSubject::pre_scoring(request, age, insurance_enabled, salary_client);
        let outcome = engine.run(ScoringStage::PreScoring, &subject).into_result()?;

        let payment = monthly_payment(outcome.amount, outcome.rate, request.term)?;
        let total_amount = payment
            .checked_mul(Decimal::from(request.term))
            .ok_or(RejectionReason::ArithmeticOverflow)?;
        debug!(
            "offer insurance={} salary_client={}: rate {} payment {}",
            insurance_enabled, salary_client, outcome.rate, payment
        );

        offers.push(LoanOffer {
            requested_amount: request.amount,
            credit_amount: outcome.amount,
            term: request.term,
            monthly_payment: payment,
            total_amount,
            rate: outcome.rate,
            insurance_enabled,
            salary_client,
        });
    }

    offers.sort_by(|a, b| a.rate.cmp(&b.rate));
    Ok(offers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn request_for_birth(birth: NaiveDate) -> LoanRequest {
        LoanRequest::new(dec!(100000), 12, birth)
    }

    #[test]
    fn test_offers_sorted_ascending() {
        let engine = RateEngine::new(ScoringConfig::default());
        let request = request_for_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());

        let offers = generate_offers(&engine, &request, today()).unwrap();
        let rates: Vec<_> = offers.iter().map(|o| o.rate).collect();
        assert_eq!(rates, vec![dec!(0.11), dec!(0.12), dec!(0.14), dec!(0.15)]);

        let flags: Vec<_> = offers.iter().map(|o| (o.insurance_enabled, o.salary_client)).collect();
        assert_eq!(flags, vec![(true, true), (true, false), (false, true), (false, false)]);
    }

    #[test]
    fn test_insured_offers_carry_premium() {
        let engine = RateEngine::new(ScoringConfig::default());
        let request = request_for_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());

        for offer in generate_offers(&engine, &request, today()).unwrap() {
            let expected = if offer.insurance_enabled { dec!(101000) } else { dec!(100000) };
            assert_eq!(offer.credit_amount, expected);
            assert_eq!(offer.requested_amount, dec!(100000));
            assert_eq!(offer.total_amount, offer.monthly_payment * dec!(12));
        }
    }

    #[test]
    fn test_uninsured_base_offer_payment() {
        let engine = RateEngine::new(ScoringConfig::with_base_rate(dec!(0.10)));
        let request = request_for_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());

        let offers = generate_offers(&engine, &request, today()).unwrap();
        let base = offers.iter().find(|o| !o.insurance_enabled && !o.salary_client).unwrap();
        assert_eq!(base.monthly_payment, dec!(8791.59));
        assert_eq!(base.total_amount, dec!(105499.08));
    }

    #[test]
    fn test_age_boundaries() {
        let engine = RateEngine::new(ScoringConfig::default());

        // Exactly 20 and exactly 65 pass
        assert!(generate_offers(&engine, &request_for_birth(NaiveDate::from_ymd_opt(2004, 6, 1).unwrap()), today()).is_ok());
        assert!(generate_offers(&engine, &request_for_birth(NaiveDate::from_ymd_opt(1959, 6, 1).unwrap()), today()).is_ok());

        // 19 and 66 fail
        let young = generate_offers(&engine, &request_for_birth(NaiveDate::from_ymd_opt(2004, 6, 2).unwrap()), today());
        assert_eq!(young, Err(RejectionReason::IneligibleAge { age: 19 }));
        let old = generate_offers(&engine, &request_for_birth(NaiveDate::from_ymd_opt(1958, 6, 1).unwrap()), today());
        assert_eq!(old, Err(RejectionReason::IneligibleAge { age: 66 }));
    }

    #[test]
    fn test_huge_amount_reports_overflow() {
        let engine = RateEngine::new(ScoringConfig::default());
        let request = LoanRequest::new(Decimal::MAX, 12, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(
            generate_offers(&engine, &request, today()),
            Err(RejectionReason::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_invalid_term_rejected_before_pricing() {
        let engine = RateEngine::new(ScoringConfig::default());
        let mut request = request_for_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        request.term = 0;
        assert_eq!(
            generate_offers(&engine, &request, today()),
            Err(RejectionReason::InvalidTerm { term: 0 })
        );
    }
}
