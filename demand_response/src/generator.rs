use crate::error::{DemandResponseError, Result};
use crate::models::{DaySeries, GeneratorConfig, HourlyPoint, HOURS_PER_DAY};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the synthetic day for the configured seed, peak boost applied.
    pub fn generate(&self) -> Result<DaySeries> {
        self.build(true)
    }

    /// Same draws as [`generate`](Self::generate) without the peak boost.
    pub fn generate_unboosted(&self) -> Result<DaySeries> {
        self.build(false)
    }

    fn build(&self, boosted: bool) -> Result<DaySeries> {
        let (mut prices, mut consumption) = self.draw()?;

        if boosted {
            for hour in 0..HOURS_PER_DAY {
                if self.config.is_boosted(hour) {
                    prices[hour] += self.config.peak_boost;
                    consumption[hour] += self.config.peak_boost;
                }
            }
        }

        let date = self.config.start_date;
        let mut points = Vec::with_capacity(HOURS_PER_DAY);
        for hour in 0..HOURS_PER_DAY {
            let timestamp = date
                .and_hms_opt(hour as u32, 0, 0)
                .ok_or_else(|| DemandResponseError::InvalidConfig(format!("no timestamp for hour {} of {}", hour, date)))?;

            points.push(HourlyPoint {
                hour: hour as u8,
                timestamp,
                price: prices[hour],
                consumption: consumption[hour],
            });
        }

        debug!(
            "Generated {} hourly points for {} (seed {}, boosted: {})",
            points.len(),
            date,
            self.config.seed,
            boosted
        );

        Ok(DaySeries::new(date, points))
    }

    /// Draw all prices, then all consumption values, from one seeded stream.
    fn draw(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let price_dist = Normal::new(self.config.price_mean, self.config.price_std_dev)
            .map_err(|e| DemandResponseError::InvalidConfig(format!("price distribution: {}", e)))?;
        let consumption_dist = Normal::new(self.config.consumption_mean, self.config.consumption_std_dev)
            .map_err(|e| DemandResponseError::InvalidConfig(format!("consumption distribution: {}", e)))?;

        let prices: Vec<f64> = (0..HOURS_PER_DAY).map(|_| price_dist.sample(&mut rng)).collect();
        let consumption: Vec<f64> = (0..HOURS_PER_DAY).map(|_| consumption_dist.sample(&mut rng)).collect();

        Ok((prices, consumption))
    }
}

pub fn generate_day(config: &GeneratorConfig) -> Result<DaySeries> {
    DataGenerator::new(config.clone())?.generate()
}

pub fn generate_unboosted(config: &GeneratorConfig) -> Result<DaySeries> {
    DataGenerator::new(config.clone())?.generate_unboosted()
}
