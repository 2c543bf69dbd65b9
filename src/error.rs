//! Error types for schedule calculations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for schedule calculations
pub type LoanResult<T> = Result<T, LoanError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// The annuity formula divides by zero when the periodic rate is zero
    #[error("the fixed installment formula is undefined at a zero interest rate")]
    SingularRate,

    /// The payment never covers the interest, so the balance never falls
    #[error("payment ${payment:.2} does not exceed the ${interest:.2} of interest accrued per period")]
    NonConvergentPayoff { payment: f64, interest: f64 },

    #[error("invalid period count {count}")]
    InvalidPeriodCount { count: f64 },

    #[error("loan amount must be a positive number, got {0}")]
    InvalidLoanAmount(f64),

    #[error("annual rate must be a non-negative number, got {0}")]
    InvalidRate(f64),

    #[error("periodic payment must be a positive number, got {0}")]
    InvalidPayment(f64),

    #[error("{0} does not return a new payment date")]
    DateOutOfRange(NaiveDate),
}
