//! Credit Conveyor - credit scoring and loan-calculation engine
//!
//! This library provides:
//! - Pre-scoring offer generation over the {insurance, salary client} matrix
//! - Full applicant scoring through an ordered, configurable rate rule chain
//! - Annuity payment pricing and amortization schedules in decimal arithmetic
//! - Parallel batch scoring over a shared immutable configuration
//!
//! The engine performs no I/O and never reads the clock: the reference date
//! is always passed in by the caller.

pub mod applicant;
pub mod batch;
pub mod calculation;
pub mod error;
pub mod scoring;

// Re-export commonly used types
pub use applicant::{ApplicantProfile, LoanRequest};
pub use batch::{BatchSummary, ScoringRunner};
pub use calculation::{CreditEngine, CreditResult, LoanOffer, PaymentScheduleElement};
pub use error::RejectionReason;
pub use scoring::{RateDecision, ScoringConfig};
