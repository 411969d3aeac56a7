use log::warn;

use crate::models::{Alert, HealthRecord, HealthStats, Severity, MAX_ALERTS};

/// Minimum history needed before trends are checked.
const TREND_WINDOW: usize = 3;

struct AlertList {
    alerts: Vec<Alert>,
}

impl AlertList {
    fn new() -> Self {
        Self { alerts: Vec::new() }
    }

    fn push(&mut self, message: String, severity: Severity) {
        debug_assert!(self.alerts.len() < MAX_ALERTS, "alert capacity exceeded");
        if self.alerts.len() >= MAX_ALERTS {
            warn!("alert capacity reached, dropping: {message}");
            return;
        }
        self.alerts.push(Alert::new(message, severity));
    }
}

/// Evaluates every rule category in a fixed order. Categories are
/// independent; within a category the first matching band wins.
pub fn analyze(records: &[HealthRecord], stats: &HealthStats) -> Vec<Alert> {
    let mut list = AlertList::new();

    check_heart_rate(&mut list, stats);
    check_blood_pressure(&mut list, stats);
    check_blood_sugar(&mut list, stats);
    check_temperature(&mut list, stats);
    check_oxygen(&mut list, stats);
    check_activity(&mut list, stats);
    check_trends(&mut list, records);

    list.alerts
}

fn check_heart_rate(list: &mut AlertList, stats: &HealthStats) {
    let hr = stats.avg_heart_rate;
    if hr > 100.0 {
        let severity = if hr > 120.0 { Severity::Critical } else { Severity::High };
        list.push(
            format!("Average heart rate is {hr:.0} BPM - Possible tachycardia detected"),
            severity,
        );
    } else if hr < 60.0 {
        let severity = if hr < 40.0 { Severity::Critical } else { Severity::Medium };
        list.push(
            format!("Average heart rate is {hr:.0} BPM - Bradycardia detected"),
            severity,
        );
    }
}

fn check_blood_pressure(list: &mut AlertList, stats: &HealthStats) {
    let (sys, dia) = (stats.avg_systolic, stats.avg_diastolic);
    if sys > 140.0 || dia > 90.0 {
        list.push(
            format!("Average BP is {sys:.0}/{dia:.0} mmHg - Hypertension (Stage 2)"),
            Severity::Critical,
        );
    } else if sys > 130.0 || dia > 80.0 {
        list.push(
            format!("Average BP is {sys:.0}/{dia:.0} mmHg - Hypertension (Stage 1)"),
            Severity::High,
        );
    } else if sys < 90.0 || dia < 60.0 {
        list.push(
            format!("Average BP is {sys:.0}/{dia:.0} mmHg - Hypotension detected"),
            Severity::Medium,
        );
    }
}

fn check_blood_sugar(list: &mut AlertList, stats: &HealthStats) {
    let sugar = stats.avg_blood_sugar;
    if sugar > 200.0 {
        list.push(
            format!("Average blood sugar is {sugar:.0} mg/dL - Severe hyperglycemia"),
            Severity::Critical,
        );
    } else if sugar > 125.0 {
        list.push(
            format!("Average blood sugar is {sugar:.0} mg/dL - Diabetes risk detected"),
            Severity::High,
        );
    } else if sugar < 70.0 {
        list.push(
            format!("Average blood sugar is {sugar:.0} mg/dL - Hypoglycemia detected"),
            Severity::High,
        );
    }
}

fn check_temperature(list: &mut AlertList, stats: &HealthStats) {
    let temp = stats.avg_temperature;
    if temp > 100.4 {
        list.push(
            format!("Average temperature is {temp:.1} F - Fever detected"),
            Severity::High,
        );
    } else if temp < 95.0 {
        list.push(
            format!("Average temperature is {temp:.1} F - Hypothermia risk"),
            Severity::Critical,
        );
    }
}

fn check_oxygen(list: &mut AlertList, stats: &HealthStats) {
    let oxygen = stats.avg_oxygen;
    if oxygen < 90.0 {
        list.push(
            format!("Average oxygen saturation is {oxygen:.0}% - Hypoxemia (Critical)"),
            Severity::Critical,
        );
    } else if oxygen < 95.0 {
        list.push(
            format!("Average oxygen saturation is {oxygen:.0}% - Low oxygen levels"),
            Severity::Medium,
        );
    }
}

fn check_activity(list: &mut AlertList, stats: &HealthStats) {
    let avg_steps = stats.avg_daily_steps();
    if avg_steps < 5000 {
        list.push(
            format!("Average daily steps: {avg_steps} - Sedentary lifestyle detected"),
            Severity::Medium,
        );
    }
}

fn check_trends(list: &mut AlertList, records: &[HealthRecord]) {
    if records.len() < TREND_WINDOW {
        return;
    }

    let recent = &records[records.len() - TREND_WINDOW..];
    if strictly_increasing(recent, |r| r.heart_rate) {
        list.push(
            "Heart rate showing consistent upward trend".to_string(),
            Severity::Medium,
        );
    }
    if strictly_increasing(recent, |r| r.systolic_bp) {
        list.push(
            "Blood pressure showing consistent upward trend".to_string(),
            Severity::Medium,
        );
    }
}

fn strictly_increasing(records: &[HealthRecord], value: impl Fn(&HealthRecord) -> i32) -> bool {
    records.windows(2).all(|pair| value(&pair[0]) < value(&pair[1]))
}
