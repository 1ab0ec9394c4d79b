use crate::error::{DemandResponseError, Result};
use crate::models::{ShiftOutcome, ShiftPolicy, ShiftSummary};
use log::debug;

/// Shifts a share of peak-hour consumption onto the off-peak hours.
///
/// Peak hours keep `peak_retention` of their load. Every off-peak hour gains
/// `peak_total / off_peak_hours * shift_fraction`. Total energy is preserved
/// only while `peak_retention + shift_fraction == 1`; `ShiftSummary` reports
/// any difference as `energy_delta`.
pub struct DemandResponder {
    policy: ShiftPolicy,
}

impl DemandResponder {
    pub fn new(policy: ShiftPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ShiftPolicy {
        &self.policy
    }

    pub fn peak_mask(&self, prices: &[f64]) -> Vec<bool> {
        prices.iter().map(|&p| self.policy.is_peak(p)).collect()
    }

    pub fn apply(&self, consumption: &[f64], prices: &[f64]) -> Result<ShiftOutcome> {
        if consumption.len() != prices.len() {
            return Err(DemandResponseError::LengthMismatch {
                consumption: consumption.len(),
                prices: prices.len(),
            });
        }
        if consumption.is_empty() {
            return Err(DemandResponseError::EmptySeries);
        }

        let peak_mask = self.peak_mask(prices);

        let peak_total: f64 = consumption
            .iter()
            .zip(&peak_mask)
            .filter(|(_, peak)| **peak)
            .map(|(c, _)| c)
            .sum();
        let peak_hours = peak_mask.iter().filter(|&&peak| peak).count();
        let off_peak_hours = peak_mask.len() - peak_hours;

        if off_peak_hours == 0 {
            return Err(DemandResponseError::NoOffPeakHours {
                hours: peak_mask.len(),
            });
        }

        let shift_amount = peak_total / off_peak_hours as f64 * self.policy.shift_fraction;

        let adjusted: Vec<f64> = consumption
            .iter()
            .zip(&peak_mask)
            .map(|(&c, &peak)| {
                if peak {
                    c * self.policy.peak_retention
                } else {
                    c + shift_amount
                }
            })
            .collect();

        let original_total: f64 = consumption.iter().sum();
        let adjusted_total: f64 = adjusted.iter().sum();
        let summary = ShiftSummary {
            peak_hours,
            off_peak_hours,
            peak_total,
            shift_amount,
            original_total,
            adjusted_total,
            energy_delta: adjusted_total - original_total,
            original_peak_load: max_value(consumption),
            adjusted_peak_load: max_value(&adjusted),
        };

        debug!(
            "Shifted {:.2} per off-peak hour ({} peak, {} off-peak), energy delta {:.2}",
            shift_amount, peak_hours, off_peak_hours, summary.energy_delta
        );

        Ok(ShiftOutcome {
            adjusted,
            peak_mask,
            summary,
        })
    }
}

/// Adjusted consumption under the default policy.
pub fn demand_response(consumption: &[f64], prices: &[f64]) -> Result<Vec<f64>> {
    let responder = DemandResponder::new(ShiftPolicy::default())?;
    Ok(responder.apply(consumption, prices)?.adjusted)
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
