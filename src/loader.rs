use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use log::{debug, info};
use thiserror::Error;

use crate::models::{HealthRecord, MAX_RECORDS};

/// Labels of a text block, in the order they must appear.
const BLOCK_LABELS: [&str; 7] = [
    "Date:",
    "Heart Rate:",
    "Blood Pressure:",
    "Blood Sugar:",
    "Temperature:",
    "Oxygen Level:",
    "Steps:",
];

/// Delimited lines shorter than this are treated as noise.
const MIN_LINE_LEN: usize = 5;
const MIN_DELIMITED_FIELDS: usize = 5;
const DELIMITED_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Csv,
    Txt,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Txt,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Txt => "txt",
        }
    }
}

/// Both variants mean the same thing to a caller: nothing usable was loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data loaded: cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no data loaded: {} contains no valid records", path.display())]
    NoRecords { path: PathBuf },
}

pub fn load(path: &Path, format: InputFormat) -> Result<Vec<HealthRecord>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let records = match format {
        InputFormat::Csv => parse_csv(&text),
        InputFormat::Txt => parse_txt(&text),
    };

    if records.is_empty() {
        return Err(LoadError::NoRecords {
            path: path.to_path_buf(),
        });
    }

    info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_csv(path: &Path) -> Result<Vec<HealthRecord>, LoadError> {
    load(path, InputFormat::Csv)
}

pub fn load_txt(path: &Path) -> Result<Vec<HealthRecord>, LoadError> {
    load(path, InputFormat::Txt)
}

/// Parses delimited text. The first line is always dropped as a header.
pub fn parse_csv(text: &str) -> Vec<HealthRecord> {
    let body = match text.split_once('\n') {
        Some((_, body)) => body,
        None => return Vec::new(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();

    while records.len() < MAX_RECORDS {
        match reader.read_record(&mut row) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                debug!("skipping unreadable line: {err}");
                continue;
            }
        }

        let line_number = row.position().map(|pos| pos.line() + 1).unwrap_or(0);
        if line_len(&row) < MIN_LINE_LEN {
            debug!("line {line_number}: too short, skipped");
            continue;
        }

        let mut record = HealthRecord::default();
        let parsed = parse_fields(row.iter(), &mut record);
        if parsed >= MIN_DELIMITED_FIELDS {
            records.push(record);
        } else {
            debug!("line {line_number}: only {parsed} leading fields parsed, skipped");
        }
    }

    records
}

/// Parses one complete comma-separated entry; all eight fields are required.
pub fn parse_manual(line: &str) -> Option<HealthRecord> {
    let mut record = HealthRecord::default();
    let parsed = parse_fields(line.split(','), &mut record);
    (parsed == DELIMITED_FIELDS).then_some(record)
}

/// Parses labeled blocks. A block is committed only once all seven labels
/// have been seen, either when the next `Date:` line starts or at end of input.
pub fn parse_txt(text: &str) -> Vec<HealthRecord> {
    let mut records = Vec::new();
    let mut current = HealthRecord::default();
    let mut seen = 0usize;

    for line in text.lines() {
        if records.len() >= MAX_RECORDS {
            break;
        }

        if let Some(value) = value_after(line, BLOCK_LABELS[0]) {
            if line.len() <= 6 {
                continue;
            }
            commit_block(&mut records, &current, seen);
            current = HealthRecord {
                date: value.split_whitespace().next().unwrap_or_default().to_string(),
                ..HealthRecord::default()
            };
            seen = 1;
            continue;
        }

        let matched = BLOCK_LABELS
            .iter()
            .enumerate()
            .skip(1)
            .find(|(index, label)| seen >= *index && line.contains(*label));

        if let Some((index, label)) = matched {
            let value = value_after(line, label).unwrap_or_default();
            apply_block_value(&mut current, index, value);
            seen = index + 1;
        }
    }

    commit_block(&mut records, &current, seen);
    records
}

fn commit_block(records: &mut Vec<HealthRecord>, block: &HealthRecord, seen: usize) {
    if seen == BLOCK_LABELS.len() {
        if records.len() < MAX_RECORDS {
            records.push(block.clone());
        }
    } else if seen > 0 {
        debug!("discarding incomplete block '{}' ({seen} of 7 fields)", block.date);
    }
}

fn apply_block_value(record: &mut HealthRecord, index: usize, value: &str) {
    let token = value.split_whitespace().next().unwrap_or_default();
    match index {
        1 => record.heart_rate = parse_or_zero(token),
        2 => {
            let (systolic, diastolic) = token.split_once('/').unwrap_or((token, ""));
            record.systolic_bp = parse_or_zero(systolic);
            record.diastolic_bp = parse_or_zero(diastolic);
        }
        3 => record.blood_sugar = parse_or_zero(token),
        4 => {
            parse_temperature(token, &mut record.temperature);
        }
        5 => record.oxygen_level = parse_or_zero(token),
        6 => record.steps = parse_or_zero(token),
        _ => {}
    }
}

fn value_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|pos| line[pos + label.len()..].trim())
}

/// Fills `record` left to right and returns how many fields parsed before
/// the first failure. Fields after a failure keep their zero default.
fn parse_fields<'a>(mut tokens: impl Iterator<Item = &'a str>, record: &mut HealthRecord) -> usize {
    match tokens.next().map(str::trim) {
        Some(date) if !date.is_empty() => record.date = date.to_string(),
        _ => return 0,
    }

    let mut parsed = 1;
    for (index, token) in tokens.take(DELIMITED_FIELDS - 1).enumerate() {
        let token = token.trim();
        let ok = match index {
            0 => parse_into(token, &mut record.heart_rate),
            1 => parse_into(token, &mut record.systolic_bp),
            2 => parse_into(token, &mut record.diastolic_bp),
            3 => parse_into(token, &mut record.blood_sugar),
            4 => parse_temperature(token, &mut record.temperature),
            5 => parse_into(token, &mut record.oxygen_level),
            _ => parse_into(token, &mut record.steps),
        };
        if !ok {
            break;
        }
        parsed += 1;
    }
    parsed
}

fn parse_into<T: FromStr>(token: &str, slot: &mut T) -> bool {
    match token.parse() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => false,
    }
}

/// Like `parse_into`, but `NaN` and infinities count as a failed parse.
fn parse_temperature(token: &str, slot: &mut f64) -> bool {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn parse_or_zero<T: FromStr + Default>(token: &str) -> T {
    token.trim().parse().unwrap_or_default()
}

/// Length of the line a row came from, rebuilt from its fields.
fn line_len(row: &csv::StringRecord) -> usize {
    row.iter().map(str::len).sum::<usize>() + row.len().saturating_sub(1)
}
