//! Vertical card display for market and quote results.

use rentfair_core::{MarketRateResult, QuoteAnalysis};
use rentfair_engine::format_amount;

const MAX_OPTION_SCRIPT: usize = 160;

// ── Public API ──

pub fn print_market_card(result: &MarketRateResult) {
    println!("=== Market conversion rate ===");
    println!();
    print_rate_section(result);
    print_trend_section(result);
    print_sample_section(result);
}

pub fn print_analysis_card(analysis: &QuoteAnalysis) {
    let c = &analysis.comparison;
    println!("=== Quote analysis: {} ===", analysis.assessment.tier.as_str());
    println!("{}", analysis.assessment.details);
    if analysis.assessment.tier.is_overpriced() {
        println!("See the negotiation options below.");
    }
    println!();

    println!("Comparison");
    if c.has_market_data {
        row("expected rent", format_amount(c.expected_rent));
    } else {
        row("expected rent", "- (no comparable leases)".to_string());
    }
    row("actual rent", format_amount(c.actual_rent));
    if c.has_market_data {
        row(
            "difference",
            format!(
                "{} ({:+.1}%)",
                format_amount(c.rent_difference),
                c.rent_difference_percent
            ),
        );
    }
    row("sample mean deposit", format_amount(c.mean_deposit.round() as i64));
    row("sample mean rent", format_amount(c.mean_rent.round() as i64));
    println!();

    let s = &analysis.savings_potential;
    println!("Savings Potential");
    row(
        "vs market",
        format!(
            "{}/month, {}/year",
            format_amount(s.vs_market_monthly),
            format_amount(s.vs_market_yearly)
        ),
    );
    row(
        "vs legal cap",
        format!(
            "{}/month, {}/year",
            format_amount(s.vs_legal_monthly),
            format_amount(s.vs_legal_yearly)
        ),
    );
    println!();

    println!("Negotiation Options");
    for option in &analysis.negotiation_options {
        let marker = if option.recommended { " *" } else { "" };
        println!("  {}{}", option.name, marker);
        if option.yearly_savings > 0 {
            row(
                "  target",
                format!(
                    "{} / {}",
                    format_amount(option.target_deposit),
                    format_amount(option.target_rent)
                ),
            );
            row("  saves per year", format_amount(option.yearly_savings));
        }
        row("  script", truncate(&option.script, MAX_OPTION_SCRIPT));
    }
    println!();

    println!("Trend Advice");
    println!("  {}", analysis.trend_advice);
    println!();

    print_rate_section(&analysis.market);
    print_trend_section(&analysis.market);
    print_sample_section(&analysis.market);
}

// ── Sections ──

fn print_rate_section(result: &MarketRateResult) {
    println!("Rate");
    row("market rate", opt_percent(result.market_rate));
    row(
        "interquartile range",
        format!(
            "{} .. {}",
            opt_percent(result.rate_p25),
            opt_percent(result.rate_p75)
        ),
    );
    row("confidence", result.confidence_level.as_str().to_string());
    row("legal cap", format!("{:.2}%", result.legal_rate_cap));
    if let Some(mean) = result.diagnostics.weighted_mean {
        row("recency-weighted mean", format!("{mean:.2}%"));
    }
    if result.diagnostics.baseline_used {
        row("method", "baseline (no valid pairs)".to_string());
    }
    println!();
}

fn print_trend_section(result: &MarketRateResult) {
    let t = &result.trend;
    println!("Trend");
    row("direction", t.direction.as_str().to_string());
    row("change", format!("{:.1}%", t.percentage));
    row("r squared", format!("{:.3}", t.r_squared));
    if result.diagnostics.cost_trend_used {
        row("basis", "annual lease cost".to_string());
    }
    println!();
}

fn print_sample_section(result: &MarketRateResult) {
    let d = &result.diagnostics;
    println!("Sample");
    row("tier", result.data_source.as_str().to_string());
    row("clean transactions", result.transactions.len().to_string());
    row("outliers removed", result.outliers_removed.to_string());
    row("rate pairs", d.pair_count.to_string());
    row(
        "months fetched",
        format!("{} of {}", d.months_fetched, d.months_requested),
    );
    let counts: Vec<String> = d
        .tier_counts
        .iter()
        .map(|t| format!("{}={}", t.source.as_str(), t.count))
        .collect();
    if !counts.is_empty() {
        row("records per tier", counts.join(", "));
    }
    println!();
}

// ── Helpers ──

fn row(label: &str, value: String) {
    println!("  {:<26} {}", label, value);
}

fn opt_percent(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{r:.2}%"),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}
