use crate::models::{HealthStats, ScoreBand};

const BASELINE: i32 = 100;

/// Composite wellness score in `0..=100`, built by deducting from a
/// baseline of 100. Only the first matching band of each vital applies.
pub fn health_score(stats: &HealthStats) -> u8 {
    let score = BASELINE
        - heart_rate_deduction(stats.avg_heart_rate)
        - blood_pressure_deduction(stats.avg_systolic, stats.avg_diastolic)
        - blood_sugar_deduction(stats.avg_blood_sugar)
        - temperature_deduction(stats.avg_temperature)
        - oxygen_deduction(stats.avg_oxygen)
        + activity_adjustment(stats.avg_daily_steps());

    score.clamp(0, 100) as u8
}

pub fn band(score: u8) -> ScoreBand {
    ScoreBand::from_score(score)
}

pub fn heart_rate_deduction(avg: f64) -> i32 {
    if avg < 60.0 || avg > 100.0 {
        15
    } else if avg < 65.0 || avg > 95.0 {
        5
    } else {
        0
    }
}

pub fn blood_pressure_deduction(systolic: f64, diastolic: f64) -> i32 {
    if systolic > 140.0 || diastolic > 90.0 {
        20
    } else if systolic > 130.0 || diastolic > 80.0 {
        10
    } else if systolic < 90.0 || diastolic < 60.0 {
        15
    } else {
        0
    }
}

pub fn blood_sugar_deduction(avg: f64) -> i32 {
    if avg > 200.0 || avg < 70.0 {
        25
    } else if avg > 125.0 {
        15
    } else {
        0
    }
}

pub fn temperature_deduction(avg: f64) -> i32 {
    if avg > 100.4 || avg < 95.0 {
        15
    } else if avg > 99.5 || avg < 97.0 {
        5
    } else {
        0
    }
}

pub fn oxygen_deduction(avg: f64) -> i32 {
    match avg {
        a if a < 90.0 => 25,
        a if a < 95.0 => 10,
        _ => 0,
    }
}

/// Negative for a sedentary average, a small bonus above 10k steps.
pub fn activity_adjustment(avg_daily_steps: i64) -> i32 {
    match avg_daily_steps {
        s if s < 5000 => -10,
        s if s > 10000 => 5,
        _ => 0,
    }
}
