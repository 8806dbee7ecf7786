//! Fixed monthly annuity payment

use crate::error::RejectionReason;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

const MONTHS_PER_YEAR: u32 = 12;

/// Round to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Monthly rate from an annual rate (nominal, divided by 12)
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / Decimal::from(MONTHS_PER_YEAR)
}

/// Payment that amortizes `principal` over `term_months` at `annual_rate`.
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), r = annual / 12, evaluated at full
/// decimal precision and rounded to cents. A zero rate (or one too small to move
/// (1 + r)^n at 28 digits) degenerates to P / n.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> Result<Decimal, RejectionReason> {
    if term_months == 0 {
        return Err(RejectionReason::InvalidTerm { term: term_months });
    }

    let term = Decimal::from(term_months);
    let r = monthly_rate(annual_rate);
    if r.is_zero() {
        return Ok(round_money(principal / term));
    }

    let growth = (Decimal::ONE + r)
        .checked_powu(u64::from(term_months))
        .ok_or(RejectionReason::ArithmeticOverflow)?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Ok(round_money(principal / term));
    }

    let factor = r
        .checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or(RejectionReason::ArithmeticOverflow)?;
    let payment = principal
        .checked_mul(factor)
        .ok_or(RejectionReason::ArithmeticOverflow)?;

    Ok(round_money(payment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_golden_payment() {
        // 100,000 at 10% over 12 months
        assert_eq!(monthly_payment(dec!(100000), dec!(0.10), 12), Ok(dec!(8791.59)));
    }

    #[test]
    fn test_longer_term_payment() {
        // 200,000 at 6% over 360 months
        assert_eq!(monthly_payment(dec!(200000), dec!(0.06), 360), Ok(dec!(1199.10)));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(dec!(120000), Decimal::ZERO, 12), Ok(dec!(10000)));
        assert_eq!(monthly_payment(dec!(100000), Decimal::ZERO, 3), Ok(dec!(33333.33)));
    }

    #[test]
    fn test_zero_term_is_invalid() {
        assert_eq!(
            monthly_payment(dec!(100000), dec!(0.10), 0),
            Err(RejectionReason::InvalidTerm { term: 0 })
        );
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.0049)), dec!(1.00));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_negative_rate_still_prices() {
        let payment = monthly_payment(dec!(12000), dec!(-0.01), 12).unwrap();
        assert!(payment < dec!(1000));
        assert!(payment > dec!(990));
    }
}
