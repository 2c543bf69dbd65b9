use crate::error::{LoanError, LoanResult};
use std::fmt;

/// Payment periods per year. Rates are quoted annually and applied monthly.
pub const PERIODS_PER_YEAR: f64 = 12.;

/// Longest schedule either model will produce (100 years of monthly payments).
pub const MAX_PERIODS: u32 = 1200;

/// The amount borrowed and the annual rate charged on it.
///
/// `annual_rate` is a decimal fraction, so 20% APR is `0.20`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanTerms {
    loan_amount: f64,
    annual_rate: f64,
}

impl LoanTerms {
    pub fn new(loan_amount: f64, annual_rate: f64) -> LoanResult<Self> {
        if !loan_amount.is_finite() || loan_amount <= 0. {
            return Err(LoanError::InvalidLoanAmount(loan_amount));
        }
        if !annual_rate.is_finite() || annual_rate < 0. {
            return Err(LoanError::InvalidRate(annual_rate));
        }
        Ok(Self {
            loan_amount,
            annual_rate,
        })
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Rate applied to the outstanding balance each month.
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate / PERIODS_PER_YEAR
    }
}

impl fmt::Display for LoanTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loan ${:.2} at {}% APR",
            self.loan_amount,
            self.annual_rate * 100.
        )
    }
}

/// How each period's principal and interest are recorded.
///
/// Only the recorded amounts are rounded. The running balance is always
/// carried at full precision.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    #[default]
    Exact,
    DecPlaces(u32),
}

impl Rounding {
    pub fn apply(self, amt: f64) -> f64 {
        match self {
            Rounding::Exact => amt,
            Rounding::DecPlaces(dec) => round(amt, dec),
        }
    }
}

/// Decimal places beyond which an f64 has no digits left to round.
pub const MAX_DEC_PLACES: u32 = 15;

// rounds half away from zero
pub(crate) fn round(amt: f64, dec: u32) -> f64 {
    if amt == 0. || dec > MAX_DEC_PLACES {
        return amt;
    }
    let scale = 10_f64.powi(dec as i32);
    let scaled = amt * scale;
    if !scaled.is_finite() {
        return amt;
    }
    scaled.round() / scale
}
