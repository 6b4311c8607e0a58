use crate::infra::{load_roster, parse_date, parse_gender};
use careconnect::config::{AppConfig, RosterConfig};
use careconnect::error::AppError;
use careconnect::workflows::caregivers::{CaregiverRecord, Gender};
use careconnect::workflows::recommendation::{
    RecommendationRequest, RecommendationResult, RecommendationSelector, RequestedDateRange,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Patient gender (male or female). Female patients only see female caregivers.
    #[arg(long, value_parser = parse_gender)]
    pub(crate) patient_gender: Option<Gender>,
    /// First requested day (YYYY-MM-DD or an RFC 3339 timestamp)
    #[arg(long)]
    pub(crate) from: Option<String>,
    /// Last requested day. Defaults to --from.
    #[arg(long)]
    pub(crate) to: Option<String>,
    /// Care setting, recorded but not used for matching
    #[arg(long, default_value = "Hospital care")]
    pub(crate) care_type: String,
    /// Free-text description of what the patient needs
    #[arg(long, default_value = "General care")]
    pub(crate) needs: String,
    /// Seed the random source to reproduce a shortlist
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Reference date for caregiver ages (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Load the roster from this CSV export instead of the configured source
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterListArgs {
    /// Load the roster from this CSV export instead of the configured source
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        patient_gender,
        from,
        to,
        care_type,
        needs,
        seed,
        today,
        roster_csv,
    } = args;

    let roster = load_roster(&roster_config(roster_csv)?)?;
    let records = roster.list()?;
    let selector = match seed {
        Some(seed) => RecommendationSelector::seeded(seed),
        None => RecommendationSelector::new(),
    };

    let request = RecommendationRequest {
        patient_gender,
        care_type,
        requested_date_range: from.map(|from| RequestedDateRange { from: Some(from), to }),
        specific_needs: needs,
        ..RecommendationRequest::default()
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let result = selector.select_on(&request, &records, today);

    println!("{}", render_recommendations(&request, &result, records.len()));
    Ok(())
}

pub(crate) fn run_roster_list(args: RosterListArgs) -> Result<(), AppError> {
    let roster = load_roster(&roster_config(args.roster_csv)?)?;
    let records = roster.list()?;

    println!("Caregiver roster ({} total)", records.len());
    for record in &records {
        println!("{}", render_roster_line(record));
    }
    Ok(())
}

fn roster_config(override_path: Option<PathBuf>) -> Result<RosterConfig, AppError> {
    match override_path {
        Some(path) => Ok(RosterConfig {
            seed_csv: Some(path),
        }),
        None => Ok(AppConfig::load()?.roster),
    }
}

fn render_recommendations(
    request: &RecommendationRequest,
    result: &RecommendationResult,
    roster_size: usize,
) -> String {
    let dates = request
        .requested_date_range
        .as_ref()
        .map(RequestedDateRange::describe)
        .unwrap_or_else(|| "not specified".to_string());
    let mut output = format!(
        "Caregiver recommendations\n  Roster size: {roster_size}\n  Requested dates: {dates}\n"
    );

    if result.is_empty() {
        output.push_str("  No caregivers match the requested conditions.");
        return output;
    }

    for (rank, caregiver) in result.recommendations.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} ({}, {}) score {} | {} | {}\n",
            rank + 1,
            caregiver.name,
            caregiver.gender,
            caregiver.age,
            caregiver.suitability_score,
            caregiver.experience,
            caregiver.phone,
        ));
        if !caregiver.certifications.is_empty() {
            output.push_str(&format!(
                "     certifications: {}\n",
                caregiver.certifications.join(", ")
            ));
        }
    }
    output.trim_end().to_string()
}

fn render_roster_line(record: &CaregiverRecord) -> String {
    let blocked = if record.unavailable_dates.is_empty() {
        "none".to_string()
    } else {
        record
            .unavailable_dates
            .iter()
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "  #{} {} | {} | {} | {} | blocked: {}",
        record.id,
        record.name,
        record.gender.map(Gender::label).unwrap_or("unspecified"),
        record.status.label(),
        record.phone,
        blocked,
    )
}
