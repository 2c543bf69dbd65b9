use crate::error::{LoanError, LoanResult};
use chrono::{Months, NaiveDate};
use std::fmt;

/// One payment in a schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub pmt_number: u32,
    pub principal_payment: f64,
    pub interest_payment: f64,
    /// Outstanding balance after this payment, never rounded.
    pub end_balance: f64,
}

impl Period {
    pub fn new(
        pmt_number: u32,
        principal_payment: f64,
        interest_payment: f64,
        end_balance: f64,
    ) -> Self {
        Self {
            pmt_number,
            principal_payment,
            interest_payment,
            end_balance,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, principal paid ${:.2}, interest paid ${:.2}, ending balance ${:.2}",
            self.pmt_number, self.principal_payment, self.interest_payment, self.end_balance
        )
    }
}

/// The ordered payments that amortize a loan, with the periodic payment
/// that produced them.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentSchedule {
    payment: f64,
    periods: Vec<Period>,
}

impl PaymentSchedule {
    pub(crate) fn new(payment: f64, periods: Vec<Period>) -> Self {
        Self { payment, periods }
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    /// Looks up a payment by its 1-based number.
    pub fn get(&self, pmt_number: usize) -> Option<&Period> {
        pmt_number
            .checked_sub(1)
            .and_then(|idx| self.periods.get(idx))
    }

    pub fn principal_payments(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.principal_payment).collect()
    }

    pub fn interest_payments(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.interest_payment).collect()
    }

    /// Splits the schedule into its principal and interest sequences.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        self.periods
            .into_iter()
            .map(|p| (p.principal_payment, p.interest_payment))
            .unzip()
    }

    pub fn total_interest(&self) -> f64 {
        self.periods.iter().map(|p| p.interest_payment).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.periods.iter().map(|p| p.principal_payment).sum()
    }

    /// Balance left after the last payment, or `None` for an empty schedule.
    pub fn final_balance(&self) -> Option<f64> {
        self.periods.last().map(|p| p.end_balance)
    }

    /// Monthly due dates for each payment, starting at `first_pmt_date`.
    ///
    /// Each date is a whole number of months after the first one, so a
    /// schedule starting on the 31st falls on the last day of shorter
    /// months and returns to the 31st afterwards.
    pub fn due_dates(&self, first_pmt_date: NaiveDate) -> LoanResult<Vec<NaiveDate>> {
        (0..self.periods.len() as u32)
            .map(|offset| {
                first_pmt_date
                    .checked_add_months(Months::new(offset))
                    .ok_or(LoanError::DateOutOfRange(first_pmt_date))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PaymentSchedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
