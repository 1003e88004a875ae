use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use super::form::{FieldAdjustment, FieldValue, PlanPayload, Planner};
use super::{PlanResponse, current_year};
use crate::Result;
use crate::core::format::{format_indian_currency, format_indian_currency_full};
use crate::core::report::{GUIDANCE_MESSAGES, share_text};
use crate::core::{DisplaySummary, MarketDefaults, PlanReport};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nivesh",
    about = "Retirement corpus planner for Indian households (corpus target, projected savings, monthly gap)"
)]
pub struct Cli {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = MarketDefaults::RETIREMENT_AGE)]
    pub retirement_age: u32,
    #[arg(
        long,
        default_value_t = MarketDefaults::LIFE_EXPECTANCY,
        help = "Age the corpus needs to last until"
    )]
    pub life_expectancy: u32,
    #[arg(long, default_value_t = 75_000.0, help = "Current monthly income in rupees")]
    pub current_monthly_income: f64,
    #[arg(
        long,
        default_value_t = 80.0,
        help = "Monthly expenses as a percent of income (50-90)"
    )]
    pub expense_percent: f64,
    #[arg(long, default_value_t = 500_000.0)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 15_000.0)]
    pub monthly_investment: f64,
    #[arg(
        long,
        default_value_t = MarketDefaults::INVESTMENT_RETURN,
        help = "Expected annual return in percent, e.g. 12"
    )]
    pub expected_return: f64,
    #[arg(
        long,
        default_value_t = MarketDefaults::INFLATION_RATE,
        help = "Expected annual inflation in percent, e.g. 6"
    )]
    pub inflation_rate: f64,
    #[arg(long, help = "Write the downloadable JSON report to this path")]
    pub report: Option<PathBuf>,
    #[arg(long, help = "Print the full results snapshot as JSON")]
    pub json: bool,
    #[arg(long, help = "Print the year-by-year projection table")]
    pub table: bool,
}

impl From<&Cli> for PlanPayload {
    fn from(cli: &Cli) -> Self {
        let number = |v: f64| Some(FieldValue::Number(v));
        PlanPayload {
            current_age: number(f64::from(cli.current_age)),
            retirement_age: number(f64::from(cli.retirement_age)),
            life_expectancy: number(f64::from(cli.life_expectancy)),
            current_monthly_income: number(cli.current_monthly_income),
            current_expense_ratio: None,
            current_expense_percent: number(cli.expense_percent),
            current_savings: number(cli.current_savings),
            monthly_investment: number(cli.monthly_investment),
            expected_return: number(cli.expected_return),
            inflation_rate: number(cli.inflation_rate),
        }
    }
}

pub fn run_cli(cli: &Cli) -> Result<()> {
    let mut planner = Planner::default_for_year(current_year());
    let adjustments = planner.apply(&PlanPayload::from(cli));

    if cli.json {
        let response = PlanResponse::new(&planner, adjustments);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_summary(&planner, &adjustments, cli.table);
    }

    if let Some(path) = &cli.report {
        write_report(&planner, path)?;
    }

    Ok(())
}

pub fn write_report(planner: &Planner, path: &Path) -> Result<()> {
    let report = PlanReport::new(planner.inputs(), planner.results());
    fs::write(path, report.to_pretty_json()?)?;
    info!("wrote retirement report to {}", path.display());
    Ok(())
}

fn print_summary(planner: &Planner, adjustments: &[FieldAdjustment], table: bool) {
    let inputs = planner.inputs();
    let results = planner.results();
    let summary = DisplaySummary::new(inputs, results);

    for adjustment in adjustments {
        println!(
            "note: {} adjusted to {} ({:?})",
            adjustment.field.name(),
            adjustment.value,
            adjustment.kind
        );
    }

    println!("Retirement Summary");
    println!("==================");
    println!("{:<26}{}", "Years till retirement", summary.years_till_retirement);
    println!("{:<26}{}", "Retirement duration", summary.retirement_duration);
    println!(
        "{:<26}{} ({})",
        "Corpus needed",
        summary.corpus_needed,
        format_indian_currency_full(results.retirement_corpus_needed)
    );
    println!(
        "{:<26}{} ({})",
        "Projected corpus",
        summary.projected_corpus,
        format_indian_currency_full(results.projected_corpus)
    );
    println!("{:<26}{}", "Progress towards goal", summary.progress);
    println!();
    println!("Monthly Savings Analysis");
    println!("------------------------");
    println!("{:<26}{}", "Required monthly saving", summary.required_monthly_saving);
    println!("{:<26}{}", "Current monthly saving", summary.current_monthly_saving);
    println!("{:<26}{}", "Monthly shortfall", summary.monthly_shortfall);
    println!();
    println!("{}", summary.chart_status);
    println!("{}", share_text(results));

    if table {
        println!();
        println!("{:>4} {:>6} {:>18} {:>18}", "Age", "Year", "Savings", "Goal");
        println!("{}", "-".repeat(49));
        for row in &results.projections {
            println!(
                "{:>4} {:>6} {:>18} {:>18}",
                row.age,
                row.year,
                format_indian_currency_full(row.savings),
                format_indian_currency(row.goal)
            );
        }
    }

    if !summary.goal_met {
        println!();
        println!("Investment guidance:");
        for message in GUIDANCE_MESSAGES {
            println!("  - {message}");
        }
    }
}
