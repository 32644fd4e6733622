//! Metric and facility profiles driving the generator.

/// Baseline behaviour of one KPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricProfile {
    pub name: &'static str,
    pub base: f64,
    pub std_dev: f64,
    pub unit: &'static str,
    /// Additive change per month.
    pub monthly_trend: f64,
}

impl MetricProfile {
    const fn new(
        name: &'static str,
        base: f64,
        std_dev: f64,
        unit: &'static str,
        monthly_trend: f64,
    ) -> Self {
        Self {
            name,
            base,
            std_dev,
            unit,
            monthly_trend,
        }
    }

    /// Clamp a raw value into the metric's physical range.
    /// Percentages live in [0, 100]; currency may go negative; everything else is >= 0.
    pub fn clamp(&self, value: f64) -> f64 {
        match self.unit {
            "%" => value.clamp(0.0, 100.0),
            "$/unit" => value,
            _ => value.max(0.0),
        }
    }
}

pub const METRIC_PROFILES: [MetricProfile; 10] = [
    MetricProfile::new("production_output", 1000.0, 80.0, "units", 5.0),
    MetricProfile::new("quality_rate", 96.5, 1.2, "%", 0.05),
    MetricProfile::new("equipment_uptime", 92.0, 3.0, "%", 0.10),
    MetricProfile::new("labor_efficiency", 85.0, 4.0, "%", 0.15),
    MetricProfile::new("inventory_turnover", 8.5, 0.8, "turns", 0.02),
    MetricProfile::new("order_fulfillment_rate", 94.0, 2.5, "%", 0.08),
    MetricProfile::new("cycle_time_hours", 4.2, 0.5, "hours", -0.02),
    MetricProfile::new("defect_rate_ppm", 1200.0, 150.0, "ppm", -8.0),
    MetricProfile::new("energy_cost_per_unit", 2.30, 0.25, "$/unit", 0.01),
    MetricProfile::new("on_time_delivery_pct", 91.0, 3.0, "%", 0.10),
];

/// Facility-level scaling of level and noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityProfile {
    pub multiplier: f64,
    pub volatility: f64,
}

impl Default for FacilityProfile {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            volatility: 1.0,
        }
    }
}

/// Known plants get their own profile; anything else is neutral.
pub fn facility_profile(name: &str) -> FacilityProfile {
    match name {
        "Plant Alpha" => FacilityProfile::default(),
        // Underperformer, noisier.
        "Plant Beta" => FacilityProfile {
            multiplier: 0.92,
            volatility: 1.2,
        },
        // Top performer, stable.
        "Plant Gamma" => FacilityProfile {
            multiplier: 1.06,
            volatility: 0.85,
        },
        _ => FacilityProfile::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_by_unit() {
        let pct = METRIC_PROFILES[1];
        assert_eq!(pct.clamp(104.0), 100.0);
        assert_eq!(pct.clamp(-3.0), 0.0);

        let cost = METRIC_PROFILES[8];
        assert_eq!(cost.clamp(-1.5), -1.5);

        let ppm = METRIC_PROFILES[7];
        assert_eq!(ppm.clamp(-10.0), 0.0);
    }

    #[test]
    fn test_unknown_facility_is_neutral() {
        assert_eq!(facility_profile("Plant Omega"), FacilityProfile::default());
        assert_eq!(facility_profile("Plant Beta").multiplier, 0.92);
    }
}
