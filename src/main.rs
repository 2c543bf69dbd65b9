use anyhow::{bail, Result};
use clap::Parser;
use loancalc::{FixedInstallmentSchedule, LoanResult, LoanTerms, PaymentSchedule, RevolvingSchedule};
use log::{error, info};
use simple_logger::SimpleLogger;

mod cli;
mod report;

use cli::Cli;
use report::StackedBarChart;

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.log_level()).env().init()?;
    cli.validate()?;

    let terms = LoanTerms::new(cli.loan_amount as f64, cli.apr)?;
    info!(
        "{}: {} installments or ${} a month",
        terms, cli.installments, cli.monthly_payment
    );

    let (output, failed) = render_schedules(&cli, terms);
    print!("{}", output);

    if failed > 0 {
        bail!("{} of 2 schedules could not be computed", failed);
    }
    Ok(())
}

/// Renders both schedules, with a failed one's error in place of its chart.
/// Returns the text and the number of schedules that failed.
fn render_schedules(cli: &Cli, terms: LoanTerms) -> (String, usize) {
    let schedules = [
        (
            "Installment Credit",
            FixedInstallmentSchedule::new(terms, cli.installments).compute(),
        ),
        (
            "Revolving Credit",
            RevolvingSchedule::new(terms, cli.monthly_payment as f64).compute(),
        ),
    ];

    let mut output = String::new();
    let mut failed = 0;
    for (title, schedule) in schedules {
        match schedule.and_then(|s| render(cli, title, &s)) {
            Ok(chart) => {
                output.push_str(&chart);
                output.push('\n');
            }
            Err(e) => {
                error!("{}: {}", title, e);
                output.push_str(&format!("{}\nno schedule: {}\n\n", title, e));
                failed += 1;
            }
        }
    }
    (output, failed)
}

fn render(cli: &Cli, title: &str, schedule: &PaymentSchedule) -> LoanResult<String> {
    let chart = StackedBarChart::new(title, schedule, cli.width as usize);
    let chart = match cli.first_payment {
        Some(first_pmt_date) => chart.with_due_dates(first_pmt_date)?,
        None => chart,
    };
    Ok(chart.to_string())
}

#[cfg(test)]
mod tests {
    use super::{render, render_schedules, Cli};
    use clap::Parser;
    use loancalc::{LoanTerms, RevolvingSchedule};
    use test_log::test;

    fn run(args: &[&str]) -> (String, usize) {
        let cli = Cli::try_parse_from(args).unwrap();
        let terms = LoanTerms::new(cli.loan_amount as f64, cli.apr).unwrap();
        render_schedules(&cli, terms)
    }

    #[test]
    fn test_both_schedules() {
        let (output, failed) = run(&["loancalc"]);

        assert_eq!(failed, 0);
        assert!(output.starts_with("Installment Credit\ntotal interests 111.61\n"));
        assert!(output.contains("\nRevolving Credit\ntotal interests "));
        assert!(!output.contains("no schedule"));
    }

    #[test]
    fn test_zero_rate_fixed_schedule_fails() {
        let (output, failed) = run(&["loancalc", "--apr", "0%", "--monthly-payment", "75"]);

        assert_eq!(failed, 1);
        assert!(output.starts_with(
            "Installment Credit\nno schedule: the fixed installment formula is undefined at a zero interest rate\n"
        ));
        // $1000 at 0% and $75 a month is 13 whole payments
        assert!(output.contains("\nRevolving Credit\ntotal interests 0.00\n"));
        assert_eq!(output.lines().filter(|l| l.contains(" | ")).count(), 13);
    }

    #[test]
    fn test_non_convergent_revolving_schedule_fails() {
        let (output, failed) = run(&["loancalc", "--loan-amount", "2000", "--apr", "36%"]);

        assert_eq!(failed, 1);
        assert!(output.starts_with("Installment Credit\ntotal interests "));
        assert!(output.contains("Revolving Credit\nno schedule: payment $25.00 does not exceed"));
    }

    #[test]
    fn test_render_with_due_dates() {
        let cli = Cli::try_parse_from(["loancalc", "--first-payment", "2024-01-31"]).unwrap();
        let terms = LoanTerms::new(1000., 0.2).unwrap();
        let schedule = RevolvingSchedule::new(terms, 100.).compute().unwrap();
        let chart = render(&cli, "Revolving Credit", &schedule).unwrap();

        assert!(chart.contains("\n2024-02-29 | "));
        assert!(chart.contains("\n2024-12-31 | "));
    }
}
