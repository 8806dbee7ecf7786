//! Month-by-month amortization schedule

use super::annuity::{monthly_payment, monthly_rate, round_money};
use crate::error::RejectionReason;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One scheduled payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleElement {
    /// 1-indexed payment number
    pub number: u32,
    pub date: NaiveDate,
    pub total_payment: Decimal,
    pub interest_payment: Decimal,
    pub principal_payment: Decimal,
    /// Balance after this payment
    pub remaining_principal: Decimal,
}

/// Balance carried between periods
#[derive(Debug, Clone)]
struct ScheduleState {
    /// Unrounded outstanding principal
    balance: Decimal,
    /// Outstanding principal as last reported, in cents
    reported_balance: Decimal,
}

/// Build the full schedule for an annuity loan.
///
/// Payments fall on `start_date` plus 1..=`term_months` calendar months. The
/// balance is carried unrounded; reported balances are rounded to cents and each
/// principal portion is the drop in reported balance, so the principal column
/// sums to the rounded principal exactly. The last period pays off whatever is
/// left and its total absorbs the rounding drift.
pub fn build_schedule(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
    start_date: NaiveDate,
) -> Result<Vec<PaymentScheduleElement>, RejectionReason> {
    let payment = monthly_payment(principal, annual_rate, term_months)?;
    amortize(principal, annual_rate, payment, term_months, start_date)
}

/// Schedule for an already computed monthly payment
pub fn amortize(
    principal: Decimal,
    annual_rate: Decimal,
    payment: Decimal,
    term_months: u32,
    start_date: NaiveDate,
) -> Result<Vec<PaymentScheduleElement>, RejectionReason> {
    let rate = monthly_rate(annual_rate);

    let mut state = ScheduleState {
        balance: principal,
        reported_balance: round_money(principal),
    };
    let mut schedule = Vec::new();

    for number in 1..=term_months {
        let date = start_date
            .checked_add_months(Months::new(number))
            .ok_or(RejectionReason::ArithmeticOverflow)?;
        let interest = state
            .balance
            .checked_mul(rate)
            .ok_or(RejectionReason::ArithmeticOverflow)?;

        let (total_payment, principal_payment, remaining_principal) = if number == term_months {
            let principal_payment = state.reported_balance;
            let total = principal_payment
                .checked_add(round_money(interest))
                .ok_or(RejectionReason::ArithmeticOverflow)?;
            (total, principal_payment, Decimal::ZERO)
        } else {
            state.balance = payment
                .checked_sub(interest)
                .and_then(|portion| state.balance.checked_sub(portion))
                .ok_or(RejectionReason::ArithmeticOverflow)?;
            let remaining = round_money(state.balance);
            (payment, state.reported_balance - remaining, remaining)
        };

        schedule.push(PaymentScheduleElement {
            number,
            date,
            total_payment,
            interest_payment: total_payment - principal_payment,
            principal_payment,
            remaining_principal,
        });
        state.reported_balance = remaining_principal;
    }

    Ok(schedule)
}
