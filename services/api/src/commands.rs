use chrono::NaiveDate;
use clap::Args;
use fieldops::config::{AppConfig, CoachingConfig};
use fieldops::error::AppError;
use fieldops::workflows::coaching::{
    CoachingCsvImporter, CoachingReport, RatingPolicy, RatingSet, RatingsPayload, Scorecard,
    CRITERIA, RUBRIC_VERSION,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file shaped like `{"ratings": {"targeting": 4.5, ...}}`
    #[arg(long)]
    pub(crate) ratings: PathBuf,
    /// Override COACHING_RATING_POLICY (reject or clamp)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<RatingPolicy>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV export with identity columns followed by rubric field columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Number of top performers to list (defaults to COACHING_TOP_PERFORMERS)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Only include visits on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) since: Option<NaiveDate>,
    /// Override COACHING_RATING_POLICY (reject or clamp)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<RatingPolicy>,
}

fn coaching_config() -> Result<CoachingConfig, AppError> {
    Ok(AppConfig::load()?.coaching)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { ratings, policy } = args;
    let policy = match policy {
        Some(policy) => policy,
        None => coaching_config()?.rating_policy,
    };

    let raw = std::fs::read_to_string(&ratings)?;
    let payload: RatingsPayload = serde_json::from_str(&raw)?;
    let ratings = RatingSet::from_scores(payload.ratings, policy)?;
    let scorecard = Scorecard::from_ratings(&ratings);

    print!("{}", render_scorecard(&scorecard));
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        csv,
        top,
        since,
        policy,
    } = args;
    let config = coaching_config()?;
    let policy = policy.unwrap_or(config.rating_policy);
    let top = top.unwrap_or(config.top_performers);

    let mut records = CoachingCsvImporter::from_path(&csv, policy)?;
    if let Some(since) = since {
        records.retain(|record| record.visit_date >= since);
    }

    let report = CoachingReport::build(&records, top);
    print!("{}", render_report(&report));
    Ok(())
}

pub(crate) fn run_criteria() {
    println!("Coaching rubric v{RUBRIC_VERSION}");
    for row in &CRITERIA {
        println!(
            "- {:<22} {:<16} max {:>4} | {} ({})",
            format!("{:?}", row.id),
            row.category.label(),
            row.max_score,
            row.text,
            row.field
        );
    }
}

pub(crate) fn render_scorecard(scorecard: &Scorecard) -> String {
    let mut out = String::new();
    out.push_str("Coaching scorecard\n");
    for line in &scorecard.categories {
        out.push_str(&format!(
            "- {}: {} / {}\n",
            line.label, line.score, line.max_points
        ));
    }
    out.push_str(&format!(
        "Total: {} ({} / {})\n",
        scorecard.grand_total,
        scorecard.label,
        scorecard.band.english_label()
    ));

    if scorecard.recommendations.is_empty() {
        out.push_str("Recommendations: none\n");
    } else {
        out.push_str("Recommendations\n");
        for item in &scorecard.recommendations {
            out.push_str(&format!("- {item}\n"));
        }
    }
    out
}

pub(crate) fn render_report(report: &CoachingReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Team coaching report: {} evaluations, average {:.1}\n",
        report.evaluations, report.average_total
    ));

    out.push_str("\nCategory averages\n");
    for entry in &report.category_averages {
        out.push_str(&format!(
            "- {}: {:.1} / {}\n",
            entry.label, entry.average, entry.max_points
        ));
    }

    out.push_str("\nBand distribution\n");
    for entry in &report.band_distribution {
        out.push_str(&format!("- {}: {}\n", entry.label, entry.count));
    }

    if report.top_performers.is_empty() {
        out.push_str("\nTop performers: none\n");
    } else {
        out.push_str("\nTop performers\n");
        for (rank, rep) in report.top_performers.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({}) avg {:.1} over {} visit(s), latest {} on {}\n",
                rank + 1,
                rep.name,
                rep.employee_id,
                rep.average_total,
                rep.evaluations,
                rep.latest_band.label(),
                rep.latest_visit
            ));
        }
    }
    out
}
