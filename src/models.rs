use serde::Serialize;

pub const MAX_RECORDS: usize = 1000;
pub const MAX_ALERTS: usize = 50;

/// One entry of vitals. Absent numeric fields are stored as zero, so a
/// measured zero and a missing value look the same from here on.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HealthRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HeartRate")]
    pub heart_rate: i32,
    #[serde(rename = "SystolicBP")]
    pub systolic_bp: i32,
    #[serde(rename = "DiastolicBP")]
    pub diastolic_bp: i32,
    #[serde(rename = "BloodSugar")]
    pub blood_sugar: i32,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "OxygenLevel")]
    pub oxygen_level: i32,
    #[serde(rename = "Steps")]
    pub steps: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStats {
    pub avg_heart_rate: f64,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub avg_blood_sugar: f64,
    pub avg_temperature: f64,
    pub avg_oxygen: f64,
    pub total_steps: i64,
    pub record_count: usize,
}

impl HealthStats {
    /// Truncating average, matching how steps are reported everywhere.
    pub fn avg_daily_steps(&self) -> i64 {
        self.total_steps / self.record_count as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }
}
