use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::LevelFilter;

const APR_CHOICES: [u32; 5] = [0, 10, 20, 30, 36];
const MIN_MONTHLY_PAYMENT: u32 = 25;
const MONTHLY_PAYMENT_STEP: u32 = 50;

/// Compare what installment credit and revolving credit cost on the same loan
#[derive(Parser, Debug)]
#[command(name = "loancalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Amount borrowed, 500 to 2000 in steps of 100
    #[arg(long, default_value_t = 1000, value_parser = parse_loan_amount)]
    pub loan_amount: u32,

    /// Annual percentage rate: 0%, 10%, 20%, 30% or 36%
    #[arg(long, default_value = "20%", value_parser = parse_apr)]
    pub apr: f64,

    /// Number of installments, 3 to 18 in steps of 3
    #[arg(long, default_value_t = 12, value_parser = parse_installments)]
    pub installments: u32,

    /// Monthly payment against the revolving balance, from 25 in steps of 50,
    /// up to a third of the loan amount
    #[arg(long, default_value_t = MIN_MONTHLY_PAYMENT)]
    pub monthly_payment: u32,

    /// Label each month with its due date, starting from this date (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment: Option<NaiveDate>,

    /// Width of the longest bar, in columns
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(10..=200))]
    pub width: u16,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// The monthly payment's range depends on the loan amount, so it is
    /// checked after parsing.
    pub fn validate(&self) -> Result<()> {
        let max = max_monthly_payment(self.loan_amount);
        if self.monthly_payment < MIN_MONTHLY_PAYMENT
            || self.monthly_payment > max
            || (self.monthly_payment - MIN_MONTHLY_PAYMENT) % MONTHLY_PAYMENT_STEP != 0
        {
            bail!(
                "monthly payment must be between {} and {} in steps of {} for a loan of {}, got {}",
                MIN_MONTHLY_PAYMENT,
                max,
                MONTHLY_PAYMENT_STEP,
                self.loan_amount,
                self.monthly_payment
            );
        }
        Ok(())
    }
}

/// A third of the loan, to the nearest 50.
pub fn max_monthly_payment(loan_amount: u32) -> u32 {
    (loan_amount as f64 / 3. / 50.).round() as u32 * 50
}

fn parse_stepped(s: &str, name: &str, min: u32, max: u32, step: u32) -> Result<u32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a whole number, got '{}'", name, s))?;
    if value < min || value > max || (value - min) % step != 0 {
        return Err(format!(
            "{} must be between {} and {} in steps of {}",
            name, min, max, step
        ));
    }
    Ok(value)
}

fn parse_loan_amount(s: &str) -> Result<u32, String> {
    parse_stepped(s, "loan amount", 500, 2000, 100)
}

fn parse_installments(s: &str) -> Result<u32, String> {
    parse_stepped(s, "installments", 3, 18, 3)
}

// "20%" and "20" both mean 0.20
fn parse_apr(s: &str) -> Result<f64, String> {
    let pct: u32 = s
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("APR must be a percentage such as 20%, got '{}'", s))?;
    if !APR_CHOICES.contains(&pct) {
        return Err(format!("APR must be one of 0%, 10%, 20%, 30% or 36%, got {}%", pct));
    }
    Ok(pct as f64 / 100.)
}

#[cfg(test)]
mod tests {
    use super::{max_monthly_payment, parse_apr, parse_installments, parse_loan_amount, Cli};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};
    use log::LevelFilter;
    use test_log::test;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["loancalc"]).unwrap();

        assert_eq!(cli.loan_amount, 1000);
        assert_eq!(cli.apr, 0.2);
        assert_eq!(cli.installments, 12);
        assert_eq!(cli.monthly_payment, 25);
        assert_eq!(cli.first_payment, None);
        assert_eq!(cli.width, 60);
        assert_eq!(cli.log_level(), LevelFilter::Info);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "loancalc",
            "--loan-amount",
            "1500",
            "--apr",
            "36%",
            "--installments",
            "18",
            "--monthly-payment",
            "175",
            "--first-payment",
            "2024-04-01",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.loan_amount, 1500);
        assert_eq!(cli.apr, 0.36);
        assert_eq!(cli.installments, 18);
        assert_eq!(cli.first_payment, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(cli.log_level(), LevelFilter::Trace);
        assert!(cli.validate().is_ok());

        assert!(Cli::try_parse_from(["loancalc", "--apr", "15%"]).is_err());
        assert!(Cli::try_parse_from(["loancalc", "--width", "5"]).is_err());
        assert!(Cli::try_parse_from(["loancalc", "--first-payment", "April"]).is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_loan_amount("500"), Ok(500));
        assert_eq!(parse_loan_amount("2000"), Ok(2000));
        assert!(parse_loan_amount("450").is_err());
        assert!(parse_loan_amount("1050").is_err());
        assert!(parse_loan_amount("lots").is_err());

        assert_eq!(parse_installments("3"), Ok(3));
        assert!(parse_installments("4").is_err());
        assert!(parse_installments("21").is_err());

        assert_eq!(parse_apr("0%"), Ok(0.));
        assert_eq!(parse_apr("10"), Ok(0.1));
        assert_eq!(parse_apr(" 30% "), Ok(0.3));
        assert!(parse_apr("25%").is_err());
        assert!(parse_apr("-10%").is_err());
    }

    #[test]
    fn test_monthly_payment_range() {
        assert_eq!(max_monthly_payment(500), 150);
        assert_eq!(max_monthly_payment(1000), 350);
        assert_eq!(max_monthly_payment(2000), 650);

        let cli = Cli::try_parse_from(["loancalc", "--monthly-payment", "375"]).unwrap();
        assert!(cli.validate().is_err());
        let cli = Cli::try_parse_from(["loancalc", "--monthly-payment", "100"]).unwrap();
        assert!(cli.validate().is_err());
        let cli = Cli::try_parse_from(["loancalc", "--monthly-payment", "325"]).unwrap();
        assert!(cli.validate().is_ok());
    }
}
