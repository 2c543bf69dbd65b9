//! Revolving credit: a fixed monthly payment runs until the balance is retired.

use crate::error::{LoanError, LoanResult};
use crate::loan::{LoanTerms, Rounding, MAX_PERIODS};
use crate::schedule::{PaymentSchedule, Period};
use log::{debug, trace, warn};

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevolvingSchedule {
    pub terms: LoanTerms,
    pub periodic_payment: f64,
    pub rounding: Rounding,
}

impl RevolvingSchedule {
    /// Payments are recorded to the cent by default.
    pub fn new(terms: LoanTerms, periodic_payment: f64) -> Self {
        Self {
            terms,
            periodic_payment,
            rounding: Rounding::DecPlaces(2),
        }
    }

    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    /// Number of payments needed to retire the loan, including the
    /// fractional final one.
    pub fn payoff_horizon(&self) -> LoanResult<f64> {
        payoff_horizon(&self.terms, self.periodic_payment)
    }

    /// Whole payments in the schedule. A fractional final payment is dropped.
    pub fn pmt_count(&self) -> LoanResult<u32> {
        let nper = self.payoff_horizon()?;
        let count = nper.trunc();
        if !(1. ..=MAX_PERIODS as f64).contains(&count) {
            return Err(LoanError::InvalidPeriodCount { count });
        }
        if count < nper {
            warn!(
                "payoff takes {:.4} payments, the final partial payment is left off the schedule",
                nper
            );
        }
        Ok(count as u32)
    }

    pub fn compute(&self) -> LoanResult<PaymentSchedule> {
        let pmt_count = self.pmt_count()?;
        let rate = self.terms.periodic_rate();
        debug!(
            "{}, {} payments of ${:.2}",
            self.terms, pmt_count, self.periodic_payment
        );

        let mut balance = self.terms.loan_amount();
        let mut periods = Vec::with_capacity(pmt_count as usize);

        for pmt_number in 1..=pmt_count {
            let interest = balance * rate;
            let principal = self.periodic_payment - interest;
            balance -= principal;
            trace!(
                "pmt # {}, interest {}, principal {}, end bal {}",
                pmt_number,
                interest,
                principal,
                balance
            );

            periods.push(Period::new(
                pmt_number,
                self.rounding.apply(principal),
                self.rounding.apply(interest),
                balance,
            ));
        }
        Ok(PaymentSchedule::new(self.periodic_payment, periods))
    }
}

fn payoff_horizon(terms: &LoanTerms, periodic_payment: f64) -> LoanResult<f64> {
    if !periodic_payment.is_finite() || periodic_payment <= 0. {
        return Err(LoanError::InvalidPayment(periodic_payment));
    }
    let rate = terms.periodic_rate();
    let loan_amount = terms.loan_amount();

    if rate == 0. {
        return Ok(loan_amount / periodic_payment);
    }

    let interest = loan_amount * rate;
    if periodic_payment <= interest {
        return Err(LoanError::NonConvergentPayoff {
            payment: periodic_payment,
            interest,
        });
    }

    let nper = -(-interest / periodic_payment).ln_1p() / rate.ln_1p();
    if !nper.is_finite() {
        return Err(LoanError::InvalidPeriodCount { count: nper });
    }
    Ok(nper)
}

/// Principal and interest paid each month when a fixed payment is made
/// against a revolving balance.
pub fn revolving_payments(
    loan_amount: f64,
    annual_rate: f64,
    periodic_payment: f64,
) -> LoanResult<(Vec<f64>, Vec<f64>)> {
    let terms = LoanTerms::new(loan_amount, annual_rate)?;
    Ok(RevolvingSchedule::new(terms, periodic_payment)
        .compute()?
        .into_parts())
}
