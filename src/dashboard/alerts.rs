use serde::{Deserialize, Serialize};
use std::fmt;

/// Alerts shown before the panel is expanded.
pub const COLLAPSED_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PriceSpike,
    LiquidityDrop,
    VolumeSurge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub token: String,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub age_minutes: u32,
}

impl Alert {
    pub fn time_label(&self) -> String {
        format!("{} min ago", self.age_minutes)
    }
}

pub fn sample_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            token: "UNI".to_string(),
            kind: AlertKind::PriceSpike,
            message: "Price increased 15% in last hour".to_string(),
            severity: Severity::High,
            age_minutes: 2,
        },
        Alert {
            id: 2,
            token: "AAVE".to_string(),
            kind: AlertKind::LiquidityDrop,
            message: "Liquidity decreased by 25%".to_string(),
            severity: Severity::Medium,
            age_minutes: 5,
        },
        Alert {
            id: 3,
            token: "LINK".to_string(),
            kind: AlertKind::VolumeSurge,
            message: "Trading volume 3x above average".to_string(),
            severity: Severity::Low,
            age_minutes: 8,
        },
    ]
}

/// Collapsible list of alerts.
#[derive(Debug, Clone)]
pub struct AlertsPanel {
    alerts: Vec<Alert>,
    show_all: bool,
}

impl AlertsPanel {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts, show_all: false }
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn visible(&self) -> &[Alert] {
        if self.show_all {
            &self.alerts
        } else {
            &self.alerts[..self.alerts.len().min(COLLAPSED_LIMIT)]
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.alerts.len() - self.visible().len()
    }

    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    /// None when there is nothing to expand or collapse.
    pub fn toggle_label(&self) -> Option<String> {
        if self.alerts.len() <= COLLAPSED_LIMIT {
            None
        } else if self.show_all {
            Some("Show less".to_string())
        } else {
            Some(format!("Show all ({})", self.alerts.len()))
        }
    }
}

impl Default for AlertsPanel {
    fn default() -> Self {
        Self::new(sample_alerts())
    }
}
