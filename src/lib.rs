//! Repayment schedules for installment and revolving credit.
//!
//! Both models are pure functions of their inputs: [`FixedInstallmentSchedule`]
//! solves for the constant payment over a chosen number of months, and
//! [`RevolvingSchedule`] solves for the number of months a chosen payment
//! takes. Each produces a [`PaymentSchedule`] splitting every payment into
//! principal and interest.

pub mod error;
pub mod fixed;
pub mod loan;
pub mod revolving;
pub mod schedule;

pub use error::{LoanError, LoanResult};
pub use fixed::{fixed_installment_payments, FixedInstallmentSchedule};
pub use loan::{LoanTerms, Rounding, MAX_DEC_PLACES, MAX_PERIODS, PERIODS_PER_YEAR};
pub use revolving::{revolving_payments, RevolvingSchedule};
pub use schedule::{PaymentSchedule, Period};

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<LoanTerms>();
    is_normal::<PaymentSchedule>();
    is_normal::<FixedInstallmentSchedule>();
    is_normal::<RevolvingSchedule>();
    is_normal::<LoanError>();
}
