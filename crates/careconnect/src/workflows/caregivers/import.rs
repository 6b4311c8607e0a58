use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{CaregiverStatus, Gender, NewCaregiver};
use super::repository::CaregiverRepository;
use super::service::{CaregiverAdminService, RosterServiceError};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster row {line} rejected: {message}")]
    Row { line: u64, message: String },
    #[error("roster row {line} could not be stored: {source}")]
    Roster {
        line: u64,
        #[source]
        source: RosterServiceError,
    },
}

/// Loads caregiver rows from a CSV export through the admin service validation.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P, R>(
        path: P,
        service: &CaregiverAdminService<R>,
    ) -> Result<usize, RosterImportError>
    where
        P: AsRef<Path>,
        R: CaregiverRepository + 'static,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, service)
    }

    /// Returns the number of caregivers stored. Stops at the first bad row.
    pub fn from_reader<Rd, R>(
        reader: Rd,
        service: &CaregiverAdminService<R>,
    ) -> Result<usize, RosterImportError>
    where
        Rd: Read,
        R: CaregiverRepository + 'static,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut imported = 0;

        for record in csv_reader.records() {
            let record = record?;
            // Line where the record starts; quoted fields may span several lines.
            let line = record.position().map(|position| position.line()).unwrap_or(0);
            let row: RosterRow = record.deserialize(Some(&headers))?;
            let (caregiver, unavailable_dates) = row
                .into_new_caregiver()
                .map_err(|message| RosterImportError::Row { line, message })?;

            let stored = service
                .add(caregiver)
                .map_err(|source| RosterImportError::Roster { line, source })?;
            if !unavailable_dates.is_empty() {
                service
                    .set_unavailable_dates(stored.id, unavailable_dates)
                    .map_err(|source| RosterImportError::Roster { line, source })?;
            }
            imported += 1;
        }

        info!(imported, "caregiver roster imported");
        Ok(imported)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    phone: String,
    birth_date: String,
    gender: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    certifications: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    special_notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    unavailable_dates: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    photo_url: Option<String>,
}

impl RosterRow {
    fn into_new_caregiver(self) -> Result<(NewCaregiver, BTreeSet<NaiveDate>), String> {
        let birth_date = parse_date(&self.birth_date)?;
        let gender = Gender::parse(&self.gender)
            .ok_or_else(|| format!("unknown gender '{}'", self.gender))?;
        let status = match self.status.as_deref() {
            Some(raw) => {
                CaregiverStatus::parse(raw).ok_or_else(|| format!("unknown status '{raw}'"))?
            }
            None => CaregiverStatus::Available,
        };
        let unavailable_dates = self
            .unavailable_dates
            .as_deref()
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(parse_date)
                    .collect::<Result<BTreeSet<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let caregiver = NewCaregiver {
            name: self.name,
            phone: self.phone,
            photo_url: self.photo_url,
            birth_date,
            gender,
            certifications: self.certifications,
            experience: self.experience,
            special_notes: self.special_notes,
            status,
            unavailable_dates: BTreeSet::new(),
        };

        Ok((caregiver, unavailable_dates))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
