use std::fmt::Write;

use crate::models::Alert;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdviceFlags {
    pub heart: bool,
    pub blood_pressure: bool,
    pub blood_sugar: bool,
    pub oxygen: bool,
    pub activity: bool,
}

impl AdviceFlags {
    /// Keyword matching is case-sensitive: the heart-rate trend alert
    /// ("Heart rate showing ...") does not raise the heart flag.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut flags = Self::default();
        for alert in alerts {
            let message = alert.message.as_str();
            flags.heart |= message.contains("heart rate");
            flags.blood_pressure |= message.contains("pressure") || message.contains("BP");
            flags.blood_sugar |= message.contains("sugar");
            flags.oxygen |= message.contains("oxygen");
            flags.activity |= message.contains("steps");
        }
        flags
    }
}

const WELLNESS_TIPS: &[&str] = &[
    "Maintain your current healthy lifestyle",
    "Stay hydrated (8 glasses of water daily)",
    "Continue regular physical activity",
    "Get 7-9 hours of quality sleep",
    "Practice stress management techniques",
];

const HEART_TIPS: &[&str] = &[
    "Consult a cardiologist for proper evaluation",
    "Practice deep breathing exercises",
    "Reduce caffeine and stimulant intake",
    "Manage stress through meditation or yoga",
    "Ensure adequate sleep (7-9 hours)",
];

const BLOOD_PRESSURE_TIPS: &[&str] = &[
    "Reduce sodium intake (<2300mg/day)",
    "Eat more fruits, vegetables, and whole grains",
    "Maintain healthy weight",
    "Limit alcohol consumption",
    "Exercise regularly (30 min/day, 5 days/week)",
    "Monitor BP daily and keep a log",
];

const BLOOD_SUGAR_TIPS: &[&str] = &[
    "Consult an endocrinologist",
    "Follow a balanced, low-glycemic diet",
    "Eat smaller, frequent meals",
    "Increase fiber intake",
    "Exercise regularly to improve insulin sensitivity",
    "Monitor blood sugar levels consistently",
];

const OXYGEN_TIPS: &[&str] = &[
    "[URGENT] SEEK IMMEDIATE MEDICAL ATTENTION if severe",
    "Practice breathing exercises",
    "Ensure proper ventilation in living spaces",
    "Avoid smoking and secondhand smoke",
    "Consider pulmonary function tests",
];

const ACTIVITY_TIPS: &[&str] = &[
    "Start with 10-minute walks, gradually increase",
    "Take stairs instead of elevators",
    "Set hourly reminders to stand and stretch",
    "Find activities you enjoy (dancing, sports, etc.)",
    "Use a fitness tracker for motivation",
    "Aim for 10,000 steps per day",
];

pub const DISCLAIMER: &str = "This is an automated analysis tool and NOT a substitute\n\
for professional medical advice. Please consult healthcare\n\
professionals for proper diagnosis and treatment.";

pub fn generate(alerts: &[Alert]) -> String {
    let mut output = String::new();

    if alerts.is_empty() {
        let _ = writeln!(output, "[SUCCESS] Excellent! Your health metrics are optimal.");
        let _ = writeln!(output);
        write_block(&mut output, "General Wellness Tips:", WELLNESS_TIPS);
    } else {
        let flags = AdviceFlags::from_alerts(alerts);
        let _ = writeln!(output, "RECOMMENDED ACTIONS:");
        let _ = writeln!(output, "{}", "-".repeat(60));

        let sections = [
            (flags.heart, "For Heart Rate Issues:", HEART_TIPS),
            (flags.blood_pressure, "For Blood Pressure Issues:", BLOOD_PRESSURE_TIPS),
            (flags.blood_sugar, "For Blood Sugar Issues:", BLOOD_SUGAR_TIPS),
            (flags.oxygen, "For Oxygen Level Issues:", OXYGEN_TIPS),
            (flags.activity, "For Low Physical Activity:", ACTIVITY_TIPS),
        ];
        for (_, title, tips) in sections.iter().filter(|(active, _, _)| *active) {
            let _ = writeln!(output);
            write_block(&mut output, title, tips);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "[IMPORTANT DISCLAIMER]");
    let _ = writeln!(output, "{DISCLAIMER}");
    output
}

fn write_block(output: &mut String, title: &str, tips: &[&str]) {
    let _ = writeln!(output, "{title}");
    for tip in tips {
        let _ = writeln!(output, "  * {tip}");
    }
}
