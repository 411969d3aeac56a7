use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::alerts;
use crate::models::{Alert, HealthRecord, HealthStats, ScoreBand, MAX_RECORDS};
use crate::score;
use crate::stats;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("maximum of {} records reached", MAX_RECORDS)]
pub struct SessionFull;

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub stats: HealthStats,
    pub alerts: Vec<Alert>,
    pub score: u8,
    pub band: ScoreBand,
}

/// Records accumulated over one run, from any number of loads and
/// manual entries. Holds at most `MAX_RECORDS`.
#[derive(Debug, Default)]
pub struct Session {
    records: Vec<HealthRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends until the cap is hit and returns how many were kept.
    pub fn extend(&mut self, records: Vec<HealthRecord>) -> usize {
        let room = MAX_RECORDS - self.records.len();
        let offered = records.len();
        let accepted = offered.min(room);
        self.records.extend(records.into_iter().take(accepted));
        if accepted < offered {
            warn!(
                "record limit of {MAX_RECORDS} reached, dropped {} records",
                offered - accepted
            );
        }
        accepted
    }

    pub fn add(&mut self, record: HealthRecord) -> Result<(), SessionFull> {
        if self.records.len() >= MAX_RECORDS {
            return Err(SessionFull);
        }
        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs the whole pipeline, or `None` if nothing has been loaded.
    pub fn analyze(&self) -> Option<Analysis> {
        if self.records.is_empty() {
            return None;
        }
        let stats = stats::calculate(&self.records);
        let alerts = alerts::analyze(&self.records, &stats);
        let score = score::health_score(&stats);
        Some(Analysis {
            band: score::band(score),
            stats,
            alerts,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;

    fn record(date: &str) -> HealthRecord {
        HealthRecord {
            date: date.to_string(),
            heart_rate: 72,
            systolic_bp: 118,
            diastolic_bp: 78,
            blood_sugar: 95,
            temperature: 98.2,
            oxygen_level: 98,
            steps: 8500,
        }
    }

    #[test]
    fn empty_session_has_no_analysis() {
        assert!(Session::new().analyze().is_none());
    }

    #[test]
    fn records_accumulate_across_loads_and_adds() {
        let mut session = Session::new();
        assert_eq!(session.extend(vec![record("a"), record("b")]), 2);
        session.add(record("c")).expect("room left");
        assert_eq!(session.len(), 3);
        assert_eq!(session.records()[2].date, "c");
    }

    #[test]
    fn cap_truncates_excess_records() {
        let mut session = Session::new();
        let batch: Vec<HealthRecord> = (0..MAX_RECORDS - 1).map(|i| record(&i.to_string())).collect();
        assert_eq!(session.extend(batch), MAX_RECORDS - 1);
        assert_eq!(session.extend(vec![record("x"), record("y")]), 1);
        assert_eq!(session.len(), MAX_RECORDS);
        assert_eq!(session.add(record("z")), Err(SessionFull));
        assert_eq!(session.extend(vec![record("w")]), 0);
    }

    #[test]
    fn end_to_end_delimited_input() {
        let text = "Date,HeartRate,SystolicBP,DiastolicBP,BloodSugar,Temperature,OxygenLevel,Steps\n\
                    2025-01-01,72,118,78,95,98.2,98,8500\n\
                    2025-01-02,122,152,99,195,99.8,93,3500\n";
        let mut session = Session::new();
        session.extend(loader::parse_csv(text));
        assert_eq!(session.len(), 2);

        let analysis = session.analyze().expect("records loaded");
        assert_eq!(analysis.stats.avg_heart_rate, 97.0);
        assert_eq!(analysis.stats.avg_systolic, 135.0);
        assert_eq!(analysis.stats.avg_oxygen, 95.5);
        assert_eq!(analysis.stats.total_steps, 12000);

        let messages: Vec<&str> = analysis.alerts.iter().map(|a| a.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("Hypertension (Stage 1)")));
        assert!(!messages.iter().any(|m| m.contains("oxygen")));
        assert_eq!(analysis.score, 70);
        assert_eq!(analysis.band, ScoreBand::Good);
    }

    #[test]
    fn analysis_serializes_to_json() {
        let mut session = Session::new();
        session.add(record("2025-01-01")).expect("room");
        let analysis = session.analyze().expect("records loaded");
        let json = serde_json::to_value(&analysis).expect("serialize");
        assert_eq!(json["score"], 100);
        assert_eq!(json["band"], "excellent");
        assert_eq!(json["stats"]["record_count"], 1);
    }
}
