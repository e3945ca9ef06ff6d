use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use conveyance_core::{Bracket, DutySchedule, FeeSchedule, RateTables};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::validate::{
    ValidationError, validate_duty_schedules, validate_fee_schedule, validate_rate_tables,
};

pub const DUTY_SCHEDULES_JSON: &str = "duty_schedules.json";
pub const DUTY_SCHEDULES_CSV: &str = "duty_schedules.csv";
pub const TRANSFER_FEES_JSON: &str = "transfer_fees.json";
pub const BOND_FEES_JSON: &str = "bond_fees.json";

/// Errors that can occur when loading rate tables.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid rate table: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// The on-disk shape of `duty_schedules.json`.
#[derive(Debug, Deserialize)]
struct DutySchedulesFile {
    schedules: Vec<DutySchedule>,
}

/// A single row of a duty bracket CSV file.
///
/// - `effective_from`: first day the schedule applies (`YYYY-MM-DD`)
/// - `upper_bound`: inclusive upper bound of the bracket (empty for unbounded)
/// - `base`: duty payable at the threshold
/// - `marginal_rate`: rate applied above the threshold, as a fraction
/// - `threshold`: value above which the marginal rate applies
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DutyBracketRecord {
    pub effective_from: NaiveDate,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub base: Decimal,
    pub marginal_rate: Decimal,
    pub threshold: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for duty schedules and fee schedules.
///
/// Every table is validated as soon as it is decoded, so a [`RateTables`]
/// returned from here can be handed straight to the calculators.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse duty schedules from JSON of the form `{ "schedules": [...] }`.
    ///
    /// Schedules keep the order they appear in the file.
    pub fn parse_duty_schedules<R: Read>(
        reader: R
    ) -> Result<Vec<DutySchedule>, RateTableLoaderError> {
        let file: DutySchedulesFile = serde_json::from_reader(reader)?;
        validate_duty_schedules(&file.schedules)?;
        Ok(file.schedules)
    }

    /// Parse a transfer or bond fee schedule from JSON.
    pub fn parse_fee_schedule<R: Read>(reader: R) -> Result<FeeSchedule, RateTableLoaderError> {
        Self::parse_named_fee_schedule("fee schedule", reader)
    }

    /// Parse duty brackets from CSV, one bracket per row.
    ///
    /// Rows are grouped into schedules by `effective_from`. Brackets keep
    /// their row order within a schedule and schedules come back oldest
    /// first.
    pub fn parse_duty_brackets_csv<R: Read>(
        reader: R
    ) -> Result<Vec<DutySchedule>, RateTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut grouped: BTreeMap<NaiveDate, Vec<Bracket>> = BTreeMap::new();

        for result in csv_reader.deserialize() {
            let record: DutyBracketRecord = result?;
            grouped
                .entry(record.effective_from)
                .or_default()
                .push(Bracket {
                    upper_bound: record.upper_bound,
                    base: record.base,
                    marginal_rate: record.marginal_rate,
                    threshold: record.threshold,
                });
        }

        let schedules: Vec<DutySchedule> = grouped
            .into_iter()
            .map(|(effective_from, brackets)| DutySchedule {
                effective_from,
                brackets,
            })
            .collect();

        validate_duty_schedules(&schedules)?;
        Ok(schedules)
    }

    /// Load a complete configuration from a directory.
    ///
    /// Duty schedules come from `duty_schedules.json`, or from
    /// `duty_schedules.csv` when there is no JSON file. Fee schedules come
    /// from `transfer_fees.json` and `bond_fees.json`.
    pub fn load_dir(dir: &Path) -> Result<RateTables, RateTableLoaderError> {
        let json_path = dir.join(DUTY_SCHEDULES_JSON);
        let csv_path = dir.join(DUTY_SCHEDULES_CSV);

        let duty_schedules = if json_path.exists() || !csv_path.exists() {
            Self::parse_duty_schedules(open(&json_path)?)?
        } else {
            debug!(path = %csv_path.display(), "reading duty brackets from CSV");
            Self::parse_duty_brackets_csv(open(&csv_path)?)?
        };

        let transfer =
            Self::parse_named_fee_schedule("transfer", open(&dir.join(TRANSFER_FEES_JSON))?)?;
        let bond = Self::parse_named_fee_schedule("bond", open(&dir.join(BOND_FEES_JSON))?)?;

        let tables = RateTables {
            duty_schedules,
            transfer,
            bond,
        };
        validate_rate_tables(&tables)?;

        info!(
            dir = %dir.display(),
            duty_schedules = tables.duty_schedules.len(),
            "loaded rate tables"
        );
        Ok(tables)
    }

    fn parse_named_fee_schedule<R: Read>(
        name: &str,
        reader: R,
    ) -> Result<FeeSchedule, RateTableLoaderError> {
        let schedule: FeeSchedule = serde_json::from_reader(reader)?;
        validate_fee_schedule(name, &schedule)?;
        Ok(schedule)
    }
}

fn open(path: &Path) -> Result<File, RateTableLoaderError> {
    File::open(path).map_err(|source| RateTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
