use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Local};

use crate::models::{Alert, HealthRecord, HealthStats, ScoreBand, Severity};

const BAR_SEGMENTS: u8 = 20;
const TREND_ROWS: usize = 10;

/// Display tags for the vitals table. These bands are looser or stricter
/// than the alert rules on purpose and must stay separate from them.
pub mod tags {
    pub fn heart_rate(avg: f64) -> &'static str {
        if (60.0..=100.0).contains(&avg) { "NORMAL" } else { "ABNORMAL" }
    }

    pub fn blood_pressure(systolic: f64, diastolic: f64) -> &'static str {
        if systolic < 120.0 && diastolic < 80.0 { "NORMAL" } else { "ELEVATED" }
    }

    pub fn blood_sugar(avg: f64) -> &'static str {
        if (70.0..=125.0).contains(&avg) { "NORMAL" } else { "ABNORMAL" }
    }

    pub fn temperature(avg: f64) -> &'static str {
        if (97.0..=99.0).contains(&avg) { "NORMAL" } else { "ABNORMAL" }
    }

    pub fn oxygen(avg: f64) -> &'static str {
        if avg >= 95.0 { "NORMAL" } else { "LOW" }
    }
}

pub fn score_bar(score: u8) -> String {
    let filled = (score / 5).min(BAR_SEGMENTS) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_SEGMENTS as usize - filled)
    )
}

fn alert_prefix(severity: Severity) -> String {
    format!("{:<11}", format!("[{}]", severity.label()))
}

fn rule(output: &mut String, c: char, width: usize) {
    let _ = writeln!(output, "{}", c.to_string().repeat(width));
}

pub fn render_console(stats: &HealthStats, alerts: &[Alert], score: u8) -> String {
    let mut output = String::new();

    rule(&mut output, '=', 60);
    let _ = writeln!(output, "              HEALTH ANALYSIS REPORT");
    rule(&mut output, '=', 60);
    let _ = writeln!(output);
    let _ = writeln!(output, "VITAL STATISTICS (Based on {} records)", stats.record_count);
    rule(&mut output, '-', 60);

    let _ = writeln!(
        output,
        "  Heart Rate:      {:.0} BPM [{}]",
        stats.avg_heart_rate,
        tags::heart_rate(stats.avg_heart_rate)
    );
    let _ = writeln!(
        output,
        "  Blood Pressure:  {:.0}/{:.0} mmHg [{}]",
        stats.avg_systolic,
        stats.avg_diastolic,
        tags::blood_pressure(stats.avg_systolic, stats.avg_diastolic)
    );
    let _ = writeln!(
        output,
        "  Blood Sugar:     {:.0} mg/dL [{}]",
        stats.avg_blood_sugar,
        tags::blood_sugar(stats.avg_blood_sugar)
    );
    let _ = writeln!(
        output,
        "  Temperature:     {:.1} F [{}]",
        stats.avg_temperature,
        tags::temperature(stats.avg_temperature)
    );
    let _ = writeln!(
        output,
        "  Oxygen Level:    {:.0}% [{}]",
        stats.avg_oxygen,
        tags::oxygen(stats.avg_oxygen)
    );
    let _ = writeln!(output, "  Total Steps:     {} steps", stats.total_steps);
    let _ = writeln!(output, "  Avg Daily Steps: {} steps/day", stats.avg_daily_steps());

    let _ = writeln!(output);
    rule(&mut output, '-', 50);
    let _ = writeln!(output, "          OVERALL HEALTH SCORE");
    rule(&mut output, '-', 50);
    let _ = writeln!(output, "  {}", score_bar(score));
    let band = ScoreBand::from_score(score);
    let exclaim = if band == ScoreBand::Excellent { "!" } else { "" };
    let _ = writeln!(output, "          {score}/100 - {}{exclaim}", band.label());
    rule(&mut output, '-', 50);

    let _ = writeln!(output);
    if alerts.is_empty() {
        let _ = writeln!(
            output,
            "[SUCCESS] All vitals are within normal ranges! Keep up the good work!"
        );
    } else {
        let _ = writeln!(output, "HEALTH ALERTS");
        rule(&mut output, '-', 60);
        for alert in alerts {
            let _ = writeln!(output, "  {}{}", alert_prefix(alert.severity), alert.message);
        }
    }

    output
}

pub fn render_file(
    stats: &HealthStats,
    alerts: &[Alert],
    score: u8,
    generated_at: DateTime<Local>,
) -> String {
    let mut output = String::new();

    rule(&mut output, '=', 60);
    let _ = writeln!(output, "           SMART HEALTH MONITOR - ANALYSIS REPORT");
    rule(&mut output, '=', 60);
    let _ = writeln!(output, "Generated: {}", generated_at.format("%a %b %e %H:%M:%S %Y"));
    let _ = writeln!(output);
    let _ = writeln!(output, "Based on {} health records", stats.record_count);
    let _ = writeln!(output);

    let _ = writeln!(output, "VITAL STATISTICS SUMMARY");
    rule(&mut output, '-', 60);
    let _ = writeln!(output, "Average Heart Rate:      {:.0} BPM", stats.avg_heart_rate);
    let _ = writeln!(
        output,
        "Average Blood Pressure:  {:.0}/{:.0} mmHg",
        stats.avg_systolic, stats.avg_diastolic
    );
    let _ = writeln!(output, "Average Blood Sugar:     {:.0} mg/dL", stats.avg_blood_sugar);
    let _ = writeln!(output, "Average Temperature:     {:.1} F", stats.avg_temperature);
    let _ = writeln!(output, "Average Oxygen Level:    {:.0}%", stats.avg_oxygen);
    let _ = writeln!(output, "Total Steps:             {} steps", stats.total_steps);
    let _ = writeln!(output, "Average Daily Steps:     {} steps/day", stats.avg_daily_steps());
    let _ = writeln!(output);

    let _ = writeln!(output, "OVERALL HEALTH SCORE: {score}/100");
    let status = match ScoreBand::from_score(score) {
        ScoreBand::Poor => "POOR - NEEDS ATTENTION",
        band => band.label(),
    };
    let _ = writeln!(output, "Status: {status}");
    let _ = writeln!(output);

    if !alerts.is_empty() {
        let _ = writeln!(output, "HEALTH ALERTS");
        rule(&mut output, '-', 60);
        for alert in alerts {
            let _ = writeln!(output, "{}{}", alert_prefix(alert.severity), alert.message);
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "DISCLAIMER");
    rule(&mut output, '-', 60);
    let _ = writeln!(output, "This report is generated by an automated analysis system");
    let _ = writeln!(output, "and is NOT a substitute for professional medical advice.");
    let _ = writeln!(output, "Please consult healthcare professionals for proper");
    let _ = writeln!(output, "diagnosis and treatment.");
    rule(&mut output, '=', 60);

    output
}

pub fn export(
    path: &Path,
    stats: &HealthStats,
    alerts: &[Alert],
    score: u8,
) -> anyhow::Result<()> {
    let report = render_file(stats, alerts, score, Local::now());
    std::fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Table of the most recent records, oldest first.
pub fn render_trends(records: &[HealthRecord]) -> String {
    let mut output = String::new();
    let shown = records.len().min(TREND_ROWS);
    let recent = &records[records.len() - shown..];

    rule(&mut output, '=', 70);
    let _ = writeln!(output, "                  HEALTH TRENDS");
    rule(&mut output, '=', 70);
    let _ = writeln!(output);
    let _ = writeln!(output, "Last {shown} Records:");
    rule(&mut output, '-', 70);
    let _ = writeln!(output, "{:<12}  HR   BP       Sugar  Temp   SpO2  Steps", "Date");
    rule(&mut output, '-', 70);

    for record in recent {
        let _ = writeln!(
            output,
            "{:<12}  {:>3}  {:>3}/{:<3}  {:>3}    {:.1}   {:>2}%  {:>5}",
            record.date,
            record.heart_rate,
            record.systolic_bp,
            record.diastolic_bp,
            record.blood_sugar,
            record.temperature,
            record.oxygen_level,
            record.steps
        );
    }
    rule(&mut output, '-', 70);

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats() -> HealthStats {
        HealthStats {
            avg_heart_rate: 97.0,
            avg_systolic: 135.0,
            avg_diastolic: 88.0,
            avg_blood_sugar: 145.0,
            avg_temperature: 99.0,
            avg_oxygen: 95.5,
            total_steps: 12000,
            record_count: 2,
        }
    }

    fn sample_alerts() -> Vec<Alert> {
        vec![
            Alert::new("Average BP is 135/88 mmHg - Hypertension (Stage 1)", Severity::High),
            Alert::new("Average blood sugar is 145 mg/dL - Diabetes risk detected", Severity::High),
            Alert::new("Heart rate showing consistent upward trend", Severity::Medium),
        ]
    }

    #[test]
    fn score_bar_fills_one_segment_per_five_points() {
        assert_eq!(score_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(score_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(score_bar(74), format!("[{}{}]", "#".repeat(14), "-".repeat(6)));
    }

    #[test]
    fn display_tags_use_their_own_bands() {
        assert_eq!(tags::heart_rate(60.0), "NORMAL");
        assert_eq!(tags::heart_rate(100.0), "NORMAL");
        assert_eq!(tags::heart_rate(100.5), "ABNORMAL");
        assert_eq!(tags::blood_pressure(119.0, 79.0), "NORMAL");
        assert_eq!(tags::blood_pressure(120.0, 70.0), "ELEVATED");
        assert_eq!(tags::blood_sugar(125.0), "NORMAL");
        assert_eq!(tags::temperature(99.2), "ABNORMAL");
        assert_eq!(tags::oxygen(95.0), "NORMAL");
        assert_eq!(tags::oxygen(94.9), "LOW");
    }

    #[test]
    fn console_report_lists_vitals_score_and_alerts() {
        let text = render_console(&stats(), &sample_alerts(), 70);
        assert!(text.contains("VITAL STATISTICS (Based on 2 records)"));
        assert!(text.contains("Heart Rate:      97 BPM [NORMAL]"));
        assert!(text.contains("Blood Pressure:  135/88 mmHg [ELEVATED]"));
        assert!(text.contains("Temperature:     99.0 F [NORMAL]"));
        assert!(text.contains("Avg Daily Steps: 6000 steps/day"));
        assert!(text.contains("70/100 - GOOD"));
        assert!(text.contains("  [HIGH]     Average BP is 135/88 mmHg"));
        assert!(text.contains("  [MEDIUM]   Heart rate showing"));
        assert!(!text.contains("[SUCCESS]"));
    }

    #[test]
    fn console_report_without_alerts_congratulates() {
        let text = render_console(&stats(), &[], 100);
        assert!(text.contains("100/100 - EXCELLENT!"));
        assert!(text.contains("[SUCCESS] All vitals are within normal ranges!"));
    }

    #[test]
    fn file_report_has_timestamp_status_and_disclaimer() {
        let at = Local.with_ymd_and_hms(2025, 11, 1, 9, 5, 0).single().expect("valid time");
        let text = render_file(&stats(), &sample_alerts(), 30, at);
        assert!(text.contains("Generated: Sat Nov  1 09:05:00 2025"));
        assert!(text.contains("Based on 2 health records"));
        assert!(text.contains("Average Oxygen Level:    96%"));
        assert!(text.contains("OVERALL HEALTH SCORE: 30/100"));
        assert!(text.contains("Status: POOR - NEEDS ATTENTION"));
        assert!(text.contains("\n[HIGH]     Average blood sugar is 145 mg/dL"));
        assert!(text.contains("DISCLAIMER"));
    }

    #[test]
    fn export_writes_the_file_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.txt");
        export(&path, &stats(), &[], 85).expect("export");
        let text = std::fs::read_to_string(&path).expect("read report");
        assert!(text.contains("Status: EXCELLENT"));
        assert!(!text.contains("HEALTH ALERTS"));
    }

    #[test]
    fn trends_show_last_ten_records() {
        let records: Vec<HealthRecord> = (0..12)
            .map(|day| HealthRecord {
                date: format!("day-{day:02}"),
                heart_rate: 70 + day,
                systolic_bp: 120,
                diastolic_bp: 80,
                blood_sugar: 95,
                temperature: 98.6,
                oxygen_level: 97,
                steps: 8000,
            })
            .collect();
        let text = render_trends(&records);
        assert!(text.contains("Last 10 Records:"));
        assert!(!text.contains("day-01"));
        assert!(text.contains("day-02"));
        assert!(text.contains("day-11         81  120/80    95    98.6   97%   8000"));
    }
}
