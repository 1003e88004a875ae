use serde::Serialize;

use super::format::{
    format_indian_currency, format_indian_currency_full, format_progress, format_years,
};
use super::types::{PlanInputs, PlanResults};

pub const REPORT_FILE_NAME: &str = "retirement-plan.json";
pub const NO_SHORTFALL: &str = "No Shortfall";
pub const GOAL_MET_LABEL: &str = "Goal Will Be Met";
pub const SHORTFALL_LABEL: &str = "Shortfall Projected";

pub const GUIDANCE_MESSAGES: [&str; 5] = [
    "Consider increasing your monthly SIP by at least 10% annually",
    "Allocate at least 70% to equity funds for long-term growth during your working years",
    "Review and rebalance your portfolio annually",
    "Consider tax-saving investment options like ELSS, PPF, and NPS",
    "Maintain an emergency fund of 6 months' expenses separate from retirement savings",
];

/// Downloadable report; serializes as `{ "summary": { ... } }`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub years_till_retirement: i64,
    pub retirement_duration: i64,
    pub retirement_corpus_needed: String,
    pub projected_corpus: String,
    pub monthly_savings_required: String,
    pub current_monthly_savings: String,
    pub monthly_shortfall: String,
}

impl PlanReport {
    pub fn new(inputs: &PlanInputs, results: &PlanResults) -> Self {
        let monthly_shortfall = if results.monthly_shortfall <= 0.0 {
            NO_SHORTFALL.to_string()
        } else {
            format_indian_currency(results.monthly_shortfall)
        };

        Self {
            summary: ReportSummary {
                years_till_retirement: results.years_till_retirement,
                retirement_duration: results.retirement_duration,
                retirement_corpus_needed: format_indian_currency_full(
                    results.retirement_corpus_needed,
                ),
                projected_corpus: format_indian_currency_full(results.projected_corpus),
                monthly_savings_required: format_indian_currency(results.monthly_savings_required),
                current_monthly_savings: format_indian_currency(inputs.monthly_investment),
                monthly_shortfall,
            },
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-facing summary card values, formatted for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    pub years_till_retirement: String,
    pub retirement_duration: String,
    pub corpus_needed: String,
    pub projected_corpus: String,
    pub required_monthly_saving: String,
    pub current_monthly_saving: String,
    pub monthly_shortfall: String,
    pub progress: String,
    pub progress_bar_percent: f64,
    pub goal_met: bool,
    pub chart_status: &'static str,
}

impl DisplaySummary {
    pub fn new(inputs: &PlanInputs, results: &PlanResults) -> Self {
        let progress_bar_percent = results.percentage_achieved().min(100.0);
        let monthly_shortfall = if results.monthly_shortfall <= 0.0 {
            NO_SHORTFALL.to_string()
        } else {
            format_indian_currency(results.monthly_shortfall)
        };

        Self {
            years_till_retirement: format_years(results.years_till_retirement),
            retirement_duration: format_years(results.retirement_duration),
            corpus_needed: format_indian_currency(results.retirement_corpus_needed),
            projected_corpus: format_indian_currency(results.projected_corpus),
            required_monthly_saving: format_indian_currency(results.monthly_savings_required),
            current_monthly_saving: format_indian_currency(inputs.monthly_investment),
            monthly_shortfall,
            progress: format_progress(progress_bar_percent),
            progress_bar_percent,
            goal_met: results.goal_met(),
            chart_status: chart_status(results),
        }
    }
}

/// Status badge for the projection chart, judged on the final year.
pub fn chart_status(results: &PlanResults) -> &'static str {
    match results.projections.last() {
        Some(last) if last.savings >= last.goal => GOAL_MET_LABEL,
        _ => SHORTFALL_LABEL,
    }
}

pub fn share_text(results: &PlanResults) -> String {
    format!(
        "I need {} for retirement. Currently projected to reach {}.",
        format_indian_currency_full(results.retirement_corpus_needed),
        format_indian_currency_full(results.projected_corpus)
    )
}
