use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::loader::InputFormat;
use crate::models::HealthRecord;

/// A week that starts healthy and drifts into hypertension.
pub fn sample_records() -> Vec<HealthRecord> {
    let days = vec![
        ("2025-10-26", 72, 118, 78, 95, 98.2, 98, 8500),
        ("2025-10-27", 75, 120, 80, 102, 98.4, 97, 9200),
        ("2025-10-28", 78, 122, 82, 98, 98.6, 98, 7800),
        ("2025-10-29", 115, 145, 95, 180, 99.1, 96, 4500),
        ("2025-10-30", 118, 148, 96, 185, 99.3, 95, 4200),
        ("2025-10-31", 120, 150, 98, 190, 99.5, 94, 3800),
        ("2025-11-01", 122, 152, 99, 195, 99.8, 93, 3500),
    ];

    days.into_iter()
        .map(
            |(date, heart_rate, systolic_bp, diastolic_bp, blood_sugar, temperature, oxygen_level, steps)| {
                HealthRecord {
                    date: date.to_string(),
                    heart_rate,
                    systolic_bp,
                    diastolic_bp,
                    blood_sugar,
                    temperature,
                    oxygen_level,
                    steps,
                }
            },
        )
        .collect()
}

pub fn default_path(format: InputFormat) -> String {
    format!("sample_health_data.{}", format.extension())
}

pub fn write_sample(path: &Path, format: InputFormat) -> anyhow::Result<usize> {
    let records = sample_records();
    match format {
        InputFormat::Csv => write_csv(path, &records)?,
        InputFormat::Txt => {
            std::fs::write(path, labeled_blocks(&records))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    info!("wrote {} sample records to {}", records.len(), path.display());
    Ok(records.len())
}

fn write_csv(path: &Path, records: &[HealthRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn labeled_blocks(records: &[HealthRecord]) -> String {
    let mut output = String::new();
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(output);
        }
        let _ = writeln!(output, "Date: {}", record.date);
        let _ = writeln!(output, "Heart Rate: {}", record.heart_rate);
        let _ = writeln!(
            output,
            "Blood Pressure: {}/{}",
            record.systolic_bp, record.diastolic_bp
        );
        let _ = writeln!(output, "Blood Sugar: {}", record.blood_sugar);
        let _ = writeln!(output, "Temperature: {:.1}", record.temperature);
        let _ = writeln!(output, "Oxygen Level: {}", record.oxygen_level);
        let _ = writeln!(output, "Steps: {}", record.steps);
    }
    output
}
