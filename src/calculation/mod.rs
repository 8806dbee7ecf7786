//! Loan pricing: annuity payments, schedules, offers and credits

mod annuity;
mod credit;
mod engine;
mod offers;
mod schedule;

pub use annuity::{monthly_payment, monthly_rate, round_money};
pub use credit::{price_credit, CreditResult};
pub use engine::CreditEngine;
pub use offers::{generate_offers, LoanOffer, OFFER_MATRIX};
pub use schedule::{amortize, build_schedule, PaymentScheduleElement};
