use crate::page::{Page, TRIGGER_LABEL};
use anyhow::Result;
use chrono::NaiveDateTime;
use demand_response::ShiftSummary;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub hour: u8,
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub consumption: f64,
    pub adjusted_consumption: Option<f64>,
    pub peak: Option<bool>,
}

#[derive(Debug, Serialize)]
struct TableExport<'a> {
    title: &'a str,
    date: String,
    triggered: bool,
    rows: Vec<TableRow>,
    summary: Option<&'a ShiftSummary>,
    errors: Vec<&'a str>,
}

pub fn table_rows(page: &Page) -> Vec<TableRow> {
    page.day
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| TableRow {
            hour: point.hour,
            timestamp: point.timestamp,
            price: point.price,
            consumption: point.consumption,
            adjusted_consumption: page.outcome.as_ref().and_then(|o| o.adjusted.get(i).copied()),
            peak: page.outcome.as_ref().and_then(|o| o.peak_mask.get(i).copied()),
        })
        .collect()
}

pub fn write_csv<W: Write>(writer: W, page: &Page) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in table_rows(page) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json(page: &Page) -> Result<String> {
    let export = TableExport {
        title: &page.title,
        date: page.day.date.to_string(),
        triggered: page.triggered,
        rows: table_rows(page),
        summary: page.outcome.as_ref().map(|o| &o.summary),
        errors: page.errors().collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn summary(page: &Page) -> String {
    let prices = page.day.prices();
    let consumption = page.day.consumption();
    let mut out = String::new();

    out.push_str(&format!("{}\n", page.title));
    out.push_str(&format!("{}\n", "=".repeat(page.title.len())));
    out.push_str(&format!("Date: {}\n", page.day.date));
    out.push_str(&format!(
        "Price range: ${:.2} to ${:.2}\n",
        prices.iter().copied().fold(f64::INFINITY, f64::min),
        prices.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    ));
    out.push_str(&format!("Total consumption: {:.2} kWh\n", consumption.iter().sum::<f64>()));

    if !page.triggered {
        out.push_str(&format!("\n'{}' not pressed\n", TRIGGER_LABEL));
        return out;
    }

    if let Some(outcome) = &page.outcome {
        let s = &outcome.summary;
        out.push_str("\nDemand Response:\n");
        out.push_str(&format!("  Peak hours: {}\n", s.peak_hours));
        out.push_str(&format!("  Off-peak hours: {}\n", s.off_peak_hours));
        out.push_str(&format!("  Shift per off-peak hour: {:.2} kWh\n", s.shift_amount));
        out.push_str(&format!(
            "  Peak load: {:.2} kWh -> {:.2} kWh\n",
            s.original_peak_load, s.adjusted_peak_load
        ));
        out.push_str(&format!(
            "  Total energy: {:.2} kWh -> {:.2} kWh ({:+.2})\n",
            s.original_total, s.adjusted_total, s.energy_delta
        ));
    }

    for message in page.errors() {
        out.push_str(&format!("\nError: {}\n", message));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use crate::page::RenderCycle;
    use demand_response::ShiftPolicy;

    fn page(trigger: bool) -> Page {
        RenderCycle::new(&DemoConfig::default()).run(trigger).unwrap()
    }

    #[test]
    fn test_csv_has_header_and_24_rows() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &page(true)).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        assert_eq!(lines[0], "hour,timestamp,price,consumption,adjusted_consumption,peak");
        assert!(lines[1].starts_with("0,2024-01-01T00:00:00,"));
    }

    #[test]
    fn test_csv_without_trigger_leaves_adjusted_empty() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &page(false)).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        for line in text.lines().skip(1) {
            assert!(line.ends_with(",,"), "{}", line);
        }
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&page(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rows"].as_array().unwrap().len(), 24);
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["triggered"], true);
        assert!(value["summary"]["shift_amount"].is_number());
        assert!(value["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_summary_text() {
        let pressed = summary(&page(true));
        assert!(pressed.contains("Demand Response:"));
        assert!(pressed.contains("Off-peak hours:"));

        let idle = summary(&page(false));
        assert!(idle.contains("not pressed"));
        assert!(!idle.contains("Demand Response:"));
    }

    #[test]
    fn test_summary_reports_failed_shift() {
        let config = DemoConfig {
            policy: ShiftPolicy {
                peak_threshold: f64::MIN,
                ..ShiftPolicy::default()
            },
            ..DemoConfig::default()
        };
        let page = RenderCycle::new(&config).run(true).unwrap();

        assert!(summary(&page).contains("Error: no off-peak hours"));
    }
}
