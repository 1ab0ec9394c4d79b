use anyhow::Result;
use demand_response::{DaySeries, ShiftOutcome};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::{Path, PathBuf};

const PLOT_BACKGROUND: RGBColor = RGBColor(0x2E, 0x2E, 0x2E);
const LIME: RGBColor = RGBColor(0x00, 0xFF, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: RGBColor,
    pub dashed: bool,
    pub values: Vec<f64>,
}

/// Backend independent description of one hourly line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub hours: Vec<u8>,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    pub fn prices(day: &DaySeries) -> Self {
        Self {
            name: "electricity_prices".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Price ($)".to_string(),
            hours: day.hours(),
            series: vec![SeriesSpec {
                label: "Electricity Price".to_string(),
                color: CYAN,
                dashed: false,
                values: day.prices(),
            }],
        }
    }

    pub fn consumption(day: &DaySeries) -> Self {
        Self {
            name: "consumption".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Consumption (kWh)".to_string(),
            hours: day.hours(),
            series: vec![SeriesSpec {
                label: "Consumption".to_string(),
                color: MAGENTA,
                dashed: false,
                values: day.consumption(),
            }],
        }
    }

    pub fn adjusted(day: &DaySeries, outcome: &ShiftOutcome) -> Self {
        Self {
            name: "adjusted_consumption".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Consumption (kWh)".to_string(),
            hours: day.hours(),
            series: vec![
                SeriesSpec {
                    label: "Original Consumption".to_string(),
                    color: MAGENTA,
                    dashed: false,
                    values: day.consumption(),
                },
                SeriesSpec {
                    label: "Adjusted Consumption".to_string(),
                    color: LIME,
                    dashed: true,
                    values: outcome.adjusted.clone(),
                },
            ],
        }
    }

    /// Value range over all series, padded by 10% of the span on both sides.
    pub fn y_range(&self) -> Range<f64> {
        let values = self.series.iter().flat_map(|s| s.values.iter().copied());
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if !min.is_finite() || !max.is_finite() {
            return 0.0..1.0;
        }

        let span = max - min;
        let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
        (min - pad)..(max + pad)
    }

    /// Hour range with one empty slot on each side so edge markers stay whole.
    pub fn x_range(&self) -> Range<i32> {
        let first = self.hours.first().copied().unwrap_or(0) as i32;
        let last = self.hours.last().copied().unwrap_or(0) as i32;
        (first - 1)..(last + 1)
    }

    fn hour_label(&self, x: i32) -> String {
        if self.hours.iter().any(|&h| h as i32 == x) {
            x.to_string()
        } else {
            String::new()
        }
    }

    fn points<'a>(&'a self, series: &'a SeriesSpec) -> impl Iterator<Item = (i32, f64)> + Clone + 'a {
        self.hours.iter().zip(&series.values).map(|(&h, &v)| (h as i32, v))
    }
}

pub struct ChartRenderer {
    output_dir: PathBuf,
    format: ImageFormat,
    size: (u32, u32),
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, format: ImageFormat) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            format,
            size: (800, 600),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, chart: &ChartSpec) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", chart.name, self.format.extension()))
    }

    pub fn render(&self, chart: &ChartSpec) -> Result<PathBuf> {
        let output_path = self.path_for(chart);
        info!("Creating chart {}", output_path.display());

        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&output_path, self.size).into_drawing_area();
                draw_chart(&root, chart)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&output_path, self.size).into_drawing_area();
                draw_chart(&root, chart)?;
            }
        }

        Ok(output_path)
    }
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(spec.x_range(), spec.y_range())?;

    chart.plotting_area().fill(&PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .x_labels(spec.hours.len() + 2)
        .x_label_formatter(&|&h| spec.hour_label(h))
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .axis_style(&WHITE)
        .bold_line_style(&WHITE.mix(0.2))
        .light_line_style(&WHITE.mix(0.05))
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
        .draw()?;

    for series in &spec.series {
        let color = series.color;
        let style = color.stroke_width(2);

        if series.dashed {
            chart
                .draw_series(DashedLineSeries::new(spec.points(series), 8, 5, style))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        } else {
            chart
                .draw_series(LineSeries::new(spec.points(series), style))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart.draw_series(spec.points(series).map(|p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&BLACK.mix(0.6))
        .border_style(&WHITE)
        .label_font(("sans-serif", 14).into_font().color(&WHITE))
        .draw()?;

    root.present()?;
    Ok(())
}
