//! Health report for the application context
//!
//! A report is a list of component checks plus an overall score, printed by
//! `mspdash health` and `mspdash init-db`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Share of healthy components required for the whole report to be healthy.
pub const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health of the application
///
/// # Example
/// ```
/// use mspdash_lib::utils::health::{ComponentHealth, HealthReport};
///
/// let mut report = HealthReport::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("billing_plans", "no plans configured"));
/// report.calculate_score();
///
/// assert_eq!(report.score, 0.5);
/// assert!(!report.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub is_healthy: bool,

    /// Healthy components divided by total components.
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp of the check.
    pub timestamp: i64,
}

impl HealthReport {
    /// An empty, healthy report stamped with the current time.
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();

        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
        if !self.is_healthy {
            let failing: Vec<_> =
                self.components.iter().filter(|c| !c.is_healthy).map(|c| c.name.as_str()).collect();
            self.message = Some(format!("unhealthy components: {}", failing.join(", ")));
        }
    }
}

impl Default for HealthReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of one component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentHealth {
    /// Component identifier (`"database"`, `"billing_plans"`)
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    /// Healthy, with an informational note.
    pub fn healthy_with(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: Some(message.into()) }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_healthy() {
        let mut report = HealthReport::new();
        report.calculate_score();
        assert!(report.is_healthy);
        assert_eq!(report.score, 1.0);
        assert!(report.message.is_none());
    }

    #[test]
    fn failing_components_are_named() {
        let mut report = HealthReport::new()
            .add_component(ComponentHealth::healthy("database"))
            .add_component(ComponentHealth::unhealthy("billing_plans", "none"));
        report.calculate_score();

        assert!(!report.is_healthy);
        assert_eq!(report.message.as_deref(), Some("unhealthy components: billing_plans"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut report = HealthReport::new();
        for name in ["a", "b", "c", "d"] {
            report = report.add_component(ComponentHealth::healthy(name));
        }
        report = report.add_component(ComponentHealth::unhealthy("e", "down"));
        report.calculate_score();

        assert_eq!(report.score, 0.8);
        assert!(report.is_healthy);
    }
}
