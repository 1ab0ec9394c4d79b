use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

mod charts;
mod config;
mod export;
mod page;
mod session;

use charts::{ChartRenderer, ImageFormat};
use config::DemoConfig;
use page::{Page, RenderCycle, Section};

#[derive(Parser)]
#[command(name = "dr_demo")]
#[command(about = "Synthetic electricity price and consumption day with a demand response shift")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one render cycle and write its charts
    Render {
        #[command(flatten)]
        common: CommonArgs,

        /// Press "Apply Demand Response AI" for this cycle
        #[arg(short, long)]
        apply: bool,

        #[command(flatten)]
        charts: ChartArgs,
    },

    /// Run one render cycle and print the hourly table
    Table {
        #[command(flatten)]
        common: CommonArgs,

        /// Press "Apply Demand Response AI" for this cycle
        #[arg(short, long)]
        apply: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Read interactions from stdin and re-render on each one
    Interactive {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        charts: ChartArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Random seed for the synthetic day
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ChartArgs {
    /// Directory for chart images
    #[arg(long, default_value = "charts")]
    output_dir: PathBuf,

    /// Chart image format
    #[arg(long, value_enum, default_value = "png")]
    image: ImageArg,
}

#[derive(Clone, ValueEnum)]
enum ImageArg {
    Png,
    Svg,
}

impl From<ImageArg> for ImageFormat {
    fn from(arg: ImageArg) -> Self {
        match arg {
            ImageArg::Png => ImageFormat::Png,
            ImageArg::Svg => ImageFormat::Svg,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Summary,
}

fn render_page(renderer: &ChartRenderer, page: &Page) -> Result<()> {
    println!("{}", page.title);
    for section in &page.sections {
        match section {
            Section::Chart { chart, .. } => {
                let path = renderer.render(chart)?;
                println!("  {}: {}", section.header(), path.display());
            }
            Section::Error { message, .. } => {
                println!("  {}: error: {}", section.header(), message);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { common, apply, charts } => {
            let config = DemoConfig::load(common.config.as_deref(), common.seed)?;
            let renderer = ChartRenderer::new(&charts.output_dir, charts.image.into())?;

            let page = RenderCycle::new(&config).run(apply)?;
            render_page(&renderer, &page)?;
        }
        Command::Table { common, apply, output } => {
            let config = DemoConfig::load(common.config.as_deref(), common.seed)?;
            let page = RenderCycle::new(&config).run(apply)?;

            match output {
                OutputFormat::Json => println!("{}", export::to_json(&page)?),
                OutputFormat::Csv => export::write_csv(std::io::stdout().lock(), &page)?,
                OutputFormat::Summary => print!("{}", export::summary(&page)),
            }
        }
        Command::Interactive { common, charts } => {
            let config = DemoConfig::load(common.config.as_deref(), common.seed)?;
            let renderer = ChartRenderer::new(&charts.output_dir, charts.image.into())?;
            info!(
                "Interactive session, seed {}, charts in {}",
                config.generator.seed,
                renderer.output_dir().display()
            );

            let stdin = std::io::stdin();
            session::run_session(&config, stdin.lock(), |page| {
                render_page(&renderer, page)?;
                println!("{}", session::prompt());
                Ok(())
            })?;
        }
    }

    Ok(())
}
