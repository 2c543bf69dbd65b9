//! Terminal rendering of a schedule as a horizontal stacked bar chart.

use chrono::NaiveDate;
use loancalc::{LoanResult, PaymentSchedule};
use std::fmt;

const INTEREST_CELL: char = '░';
const PRINCIPAL_CELL: char = '█';

/// One bar per payment, interest segment first, scaled so the largest
/// payment fills `width` columns.
pub struct StackedBarChart<'a> {
    title: &'a str,
    schedule: &'a PaymentSchedule,
    labels: Vec<String>,
    width: usize,
}

impl<'a> StackedBarChart<'a> {
    pub fn new(title: &'a str, schedule: &'a PaymentSchedule, width: usize) -> Self {
        Self {
            title,
            schedule,
            labels: (1..=schedule.len()).map(|n| n.to_string()).collect(),
            width,
        }
    }

    /// Labels bars with due dates instead of month numbers.
    pub fn with_due_dates(self, first_pmt_date: NaiveDate) -> LoanResult<Self> {
        let labels = self
            .schedule
            .due_dates(first_pmt_date)?
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect();
        Ok(Self { labels, ..self })
    }

    fn scale(&self) -> f64 {
        let largest = self
            .schedule
            .iter()
            .map(|p| p.principal_payment.max(0.) + p.interest_payment.max(0.))
            .fold(0., f64::max);
        if largest > 0. {
            self.width as f64 / largest
        } else {
            0.
        }
    }
}

fn cells(amt: f64, scale: f64) -> usize {
    (amt.max(0.) * scale).round() as usize
}

// The whole bar is rounded once so it never outgrows the widest one.
fn bar_cells(interest: f64, principal: f64, scale: f64) -> (usize, usize) {
    let total = cells(interest.max(0.) + principal.max(0.), scale);
    let interest = cells(interest, scale).min(total);
    (interest, total - interest)
}

impl fmt::Display for StackedBarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "total interests {:.2}", self.schedule.total_interest())?;
        writeln!(
            f,
            "{} Interest Payments  {} Principal Payments",
            INTEREST_CELL, PRINCIPAL_CELL
        )?;

        let scale = self.scale();
        let label_width = self.labels.iter().map(String::len).max().unwrap_or(0);
        for (label, period) in self.labels.iter().zip(self.schedule) {
            let (interest, principal) =
                bar_cells(period.interest_payment, period.principal_payment, scale);
            writeln!(
                f,
                "{:>lw$} | {}{}{} {:.2} + {:.2}",
                label,
                INTEREST_CELL.to_string().repeat(interest),
                PRINCIPAL_CELL.to_string().repeat(principal),
                " ".repeat(self.width.saturating_sub(interest + principal)),
                period.interest_payment,
                period.principal_payment,
                lw = label_width
            )?;
        }
        Ok(())
    }
}
