use crate::charts::ChartSpec;
use crate::config::DemoConfig;
use anyhow::Result;
use demand_response::{DaySeries, DataGenerator, DemandResponder, ShiftOutcome};
use log::{debug, info, warn};

pub const PAGE_TITLE: &str = "Energy Demand Response AI Demo";
pub const TRIGGER_LABEL: &str = "Apply Demand Response AI";

pub const PRICES_HEADER: &str = "Electricity Prices";
pub const CONSUMPTION_HEADER: &str = "Consumption on That Day";
pub const ADJUSTED_HEADER: &str = "Adjusted Consumption After Demand Response";

#[derive(Debug, Clone)]
pub enum Section {
    Chart { header: String, chart: ChartSpec },
    Error { header: String, message: String },
}

impl Section {
    pub fn header(&self) -> &str {
        match self {
            Section::Chart { header, .. } | Section::Error { header, .. } => header,
        }
    }
}

/// Everything one render cycle produced, in display order.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub triggered: bool,
    pub day: DaySeries,
    pub outcome: Option<ShiftOutcome>,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.sections.iter().filter_map(|s| match s {
            Section::Chart { chart, .. } => Some(chart),
            Section::Error { .. } => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|s| match s {
            Section::Error { message, .. } => Some(message.as_str()),
            Section::Chart { .. } => None,
        })
    }
}

/// Rebuilds the page from scratch for a single interaction.
pub struct RenderCycle<'a> {
    config: &'a DemoConfig,
}

impl<'a> RenderCycle<'a> {
    pub fn new(config: &'a DemoConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, trigger: bool) -> Result<Page> {
        let generator = DataGenerator::new(self.config.generator.clone())?;
        debug!("Render cycle for seed {}, trigger {}", generator.config().seed, trigger);
        let day = generator.generate()?;

        let mut sections = vec![
            Section::Chart {
                header: PRICES_HEADER.to_string(),
                chart: ChartSpec::prices(&day),
            },
            Section::Chart {
                header: CONSUMPTION_HEADER.to_string(),
                chart: ChartSpec::consumption(&day),
            },
        ];

        let mut outcome = None;
        if trigger {
            info!("{} pressed", TRIGGER_LABEL);

            let shifted = DemandResponder::new(self.config.policy).and_then(|responder| {
                debug!("Peak threshold {}", responder.policy().peak_threshold);
                responder.apply(&day.consumption(), &day.prices())
            });

            match shifted {
                Ok(shifted) => {
                    sections.push(Section::Chart {
                        header: ADJUSTED_HEADER.to_string(),
                        chart: ChartSpec::adjusted(&day, &shifted),
                    });
                    outcome = Some(shifted);
                }
                Err(e) => {
                    warn!("Demand response failed for this cycle: {}", e);
                    sections.push(Section::Error {
                        header: ADJUSTED_HEADER.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(Page {
            title: PAGE_TITLE.to_string(),
            triggered: trigger,
            day,
            outcome,
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demand_response::ShiftPolicy;

    #[test]
    fn test_cycle_without_trigger_has_two_charts() {
        let config = DemoConfig::default();
        let page = RenderCycle::new(&config).run(false).unwrap();

        assert_eq!(page.title, PAGE_TITLE);
        assert!(!page.triggered);
        assert!(page.outcome.is_none());
        let headers: Vec<_> = page.sections.iter().map(Section::header).collect();
        assert_eq!(headers, vec![PRICES_HEADER, CONSUMPTION_HEADER]);
    }

    #[test]
    fn test_cycle_with_trigger_adds_adjusted_chart() {
        let config = DemoConfig::default();
        let page = RenderCycle::new(&config).run(true).unwrap();

        assert_eq!(page.charts().count(), 3);
        assert_eq!(page.sections[2].header(), ADJUSTED_HEADER);
        let outcome = page.outcome.as_ref().unwrap();
        assert_eq!(outcome.adjusted.len(), 24);
    }

    #[test]
    fn test_base_state_is_identical_across_cycles() {
        let config = DemoConfig::default();
        let cycle = RenderCycle::new(&config);

        let first = cycle.run(false).unwrap();
        let pressed = cycle.run(true).unwrap();
        let again = cycle.run(false).unwrap();

        assert_eq!(first.day, pressed.day);
        assert_eq!(first.day, again.day);
        assert!(again.outcome.is_none());
    }

    #[test]
    fn test_transform_failure_only_ends_that_branch() {
        let config = DemoConfig {
            policy: ShiftPolicy {
                peak_threshold: -1000.0,
                ..ShiftPolicy::default()
            },
            ..DemoConfig::default()
        };
        let page = RenderCycle::new(&config).run(true).unwrap();

        assert_eq!(page.charts().count(), 2);
        assert!(page.outcome.is_none());
        let errors: Vec<_> = page.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no off-peak hours"));
    }
}
