//! Installment credit: a constant payment over a fixed number of months.

use crate::error::{LoanError, LoanResult};
use crate::loan::{LoanTerms, Rounding, MAX_PERIODS};
use crate::schedule::{PaymentSchedule, Period};
use log::{debug, trace};

/// Inputs for a fixed-installment schedule.
///
/// Amounts are recorded unrounded unless [`with_rounding`](Self::with_rounding)
/// says otherwise.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedInstallmentSchedule {
    pub terms: LoanTerms,
    pub num_periods: u32,
    pub rounding: Rounding,
}

impl FixedInstallmentSchedule {
    pub fn new(terms: LoanTerms, num_periods: u32) -> Self {
        Self {
            terms,
            num_periods,
            rounding: Rounding::Exact,
        }
    }

    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    /// The constant payment that retires the loan in `num_periods` payments.
    pub fn installment_amount(&self) -> LoanResult<f64> {
        installment_amount(&self.terms, self.num_periods)
    }

    pub fn compute(&self) -> LoanResult<PaymentSchedule> {
        let pmt_amount = self.installment_amount()?;
        let rate = self.terms.periodic_rate();
        debug!(
            "{}, {} installments of ${:.4}",
            self.terms, self.num_periods, pmt_amount
        );

        let mut remaining = self.terms.loan_amount();
        let mut periods = Vec::with_capacity(self.num_periods as usize);

        for pmt_number in 1..=self.num_periods {
            let interest = remaining * rate;
            let principal = pmt_amount - interest;
            remaining -= principal;
            trace!(
                "pmt # {}, interest {}, principal {}, end bal {}",
                pmt_number,
                interest,
                principal,
                remaining
            );

            periods.push(Period::new(
                pmt_number,
                self.rounding.apply(principal),
                self.rounding.apply(interest),
                remaining,
            ));
        }
        Ok(PaymentSchedule::new(pmt_amount, periods))
    }
}

fn installment_amount(terms: &LoanTerms, num_periods: u32) -> LoanResult<f64> {
    if num_periods == 0 || num_periods > MAX_PERIODS {
        return Err(LoanError::InvalidPeriodCount {
            count: num_periods as f64,
        });
    }
    let rate = terms.periodic_rate();
    if rate == 0. {
        return Err(LoanError::SingularRate);
    }

    // 1 - (1 + rate)^-n, kept accurate when the rate is tiny
    let discount = -(-(num_periods as f64) * rate.ln_1p()).exp_m1();
    let pmt_amount = terms.loan_amount() * rate / discount;
    if !pmt_amount.is_finite() {
        return Err(LoanError::SingularRate);
    }
    Ok(pmt_amount)
}

/// Principal and interest paid each month on a fixed-installment loan.
pub fn fixed_installment_payments(
    loan_amount: f64,
    annual_rate: f64,
    num_periods: u32,
) -> LoanResult<(Vec<f64>, Vec<f64>)> {
    let terms = LoanTerms::new(loan_amount, annual_rate)?;
    Ok(FixedInstallmentSchedule::new(terms, num_periods)
        .compute()?
        .into_parts())
}
