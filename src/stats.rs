use crate::models::{HealthRecord, HealthStats};

/// Population mean of every vital plus the step total.
///
/// Callers must pass at least one record; the averages divide by the
/// record count without checking it.
pub fn calculate(records: &[HealthRecord]) -> HealthStats {
    let mut sum_heart_rate = 0.0;
    let mut sum_systolic = 0.0;
    let mut sum_diastolic = 0.0;
    let mut sum_sugar = 0.0;
    let mut sum_temperature = 0.0;
    let mut sum_oxygen = 0.0;
    let mut total_steps = 0i64;

    for record in records {
        sum_heart_rate += f64::from(record.heart_rate);
        sum_systolic += f64::from(record.systolic_bp);
        sum_diastolic += f64::from(record.diastolic_bp);
        sum_sugar += f64::from(record.blood_sugar);
        sum_temperature += record.temperature;
        sum_oxygen += f64::from(record.oxygen_level);
        total_steps += i64::from(record.steps);
    }

    let count = records.len() as f64;
    HealthStats {
        avg_heart_rate: sum_heart_rate / count,
        avg_systolic: sum_systolic / count,
        avg_diastolic: sum_diastolic / count,
        avg_blood_sugar: sum_sugar / count,
        avg_temperature: sum_temperature / count,
        avg_oxygen: sum_oxygen / count,
        total_steps,
        record_count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, heart_rate: i32, systolic_bp: i32, oxygen_level: i32, steps: i32) -> HealthRecord {
        HealthRecord {
            date: date.to_string(),
            heart_rate,
            systolic_bp,
            diastolic_bp: 80,
            blood_sugar: 100,
            temperature: 98.6,
            oxygen_level,
            steps,
        }
    }

    #[test]
    fn single_record_mean_is_the_record() {
        let only = record("2025-01-01", 72, 118, 98, 8500);
        let stats = calculate(std::slice::from_ref(&only));
        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.avg_heart_rate, 72.0);
        assert_eq!(stats.avg_systolic, 118.0);
        assert_eq!(stats.avg_diastolic, 80.0);
        assert_eq!(stats.avg_blood_sugar, 100.0);
        assert_eq!(stats.avg_temperature, 98.6);
        assert_eq!(stats.avg_oxygen, 98.0);
        assert_eq!(stats.total_steps, 8500);
    }

    #[test]
    fn averages_ignore_record_order() {
        let mut records = vec![
            record("a", 72, 118, 98, 8500),
            record("b", 122, 152, 93, 3500),
            record("c", 90, 130, 96, 6000),
        ];
        let forward = calculate(&records);
        records.reverse();
        let backward = calculate(&records);
        assert!((forward.avg_heart_rate - backward.avg_heart_rate).abs() < 1e-9);
        assert!((forward.avg_systolic - backward.avg_systolic).abs() < 1e-9);
        assert!((forward.avg_oxygen - backward.avg_oxygen).abs() < 1e-9);
        assert_eq!(forward.total_steps, backward.total_steps);
    }

    #[test]
    fn zero_fields_pull_the_mean_down() {
        let records = vec![record("a", 80, 120, 98, 8000), record("b", 0, 120, 0, 0)];
        let stats = calculate(&records);
        assert_eq!(stats.avg_heart_rate, 40.0);
        assert_eq!(stats.avg_oxygen, 49.0);
        assert_eq!(stats.total_steps, 8000);
    }
}
