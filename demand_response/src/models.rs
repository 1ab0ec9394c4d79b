use crate::error::{DemandResponseError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub start_date: NaiveDate,
    pub price_mean: f64,
    pub price_std_dev: f64,
    pub consumption_mean: f64,
    pub consumption_std_dev: f64,
    pub peak_boost: f64,
    pub boost_start_hour: u8, // inclusive
    pub boost_end_hour: u8,   // exclusive
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            price_mean: 50.0,
            price_std_dev: 10.0,
            consumption_mean: 100.0,
            consumption_std_dev: 20.0,
            peak_boost: 50.0,
            boost_start_hour: 8,
            boost_end_hour: 20,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("price_mean", self.price_mean),
            ("consumption_mean", self.consumption_mean),
            ("peak_boost", self.peak_boost),
        ] {
            if !value.is_finite() {
                return Err(DemandResponseError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
            }
        }

        for (name, value) in [
            ("price_std_dev", self.price_std_dev),
            ("consumption_std_dev", self.consumption_std_dev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DemandResponseError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if self.boost_start_hour > self.boost_end_hour || self.boost_end_hour as usize > HOURS_PER_DAY {
            return Err(DemandResponseError::InvalidConfig(format!(
                "boost window {}..{} is not within 0..{}",
                self.boost_start_hour, self.boost_end_hour, HOURS_PER_DAY
            )));
        }

        Ok(())
    }

    pub fn is_boosted(&self, hour: usize) -> bool {
        hour >= self.boost_start_hour as usize && hour < self.boost_end_hour as usize
    }
}

/// Constants of the peak-to-off-peak shift heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftPolicy {
    /// Hours priced strictly above this are peak hours.
    pub peak_threshold: f64,
    /// Share of peak consumption kept in place.
    pub peak_retention: f64,
    /// Share of total peak consumption spread over the off-peak hours.
    pub shift_fraction: f64,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            peak_threshold: 70.0,
            peak_retention: 0.9,
            shift_fraction: 0.1,
        }
    }
}

impl ShiftPolicy {
    pub fn validate(&self) -> Result<()> {
        if !self.peak_threshold.is_finite() {
            return Err(DemandResponseError::InvalidConfig(format!(
                "peak_threshold must be finite, got {}",
                self.peak_threshold
            )));
        }

        for (name, value) in [
            ("peak_retention", self.peak_retention),
            ("shift_fraction", self.shift_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DemandResponseError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn is_peak(&self, price: f64) -> bool {
        price > self.peak_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub consumption: f64,
}

/// One synthetic day, one point per hour in hour order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySeries {
    pub date: NaiveDate,
    pub points: Vec<HourlyPoint>,
}

impl DaySeries {
    pub fn new(date: NaiveDate, points: Vec<HourlyPoint>) -> Self {
        Self { date, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn hours(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.hour).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn consumption(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.consumption).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub peak_hours: usize,
    pub off_peak_hours: usize,
    pub peak_total: f64,
    pub shift_amount: f64,
    pub original_total: f64,
    pub adjusted_total: f64,
    // Positive when the shift adds energy overall.
    pub energy_delta: f64,
    pub original_peak_load: f64,
    pub adjusted_peak_load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftOutcome {
    pub adjusted: Vec<f64>,
    pub peak_mask: Vec<bool>,
    pub summary: ShiftSummary,
}
