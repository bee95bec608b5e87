use clap::Parser;
use pwf_core::{ports::PiecewiseFunction as _, sample::sample};
use std::path::PathBuf;
use tracing::{Level, event};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::*;

/// Inspect piecewise-constant and piecewise-linear functions stored as JSON
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// A TOML file of defaults
    #[arg(short, long, env = "PWF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn run(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Evaluate { io, at } => {
                let function = io.function()?;
                let points = Point::evaluate_all(&function, &at)?;
                io.write_json(&points)?;
            }
            Commands::Extrema { io } => {
                let function = io.function()?;
                io.write_json(&Extrema::of(&function))?;
            }
            Commands::Domain { io } => {
                let function = io.function()?;
                io.write_json(&DomainReport::of(&function))?;
            }
            Commands::Sample {
                io,
                x_min,
                x_max,
                num_points,
                format,
            } => {
                let function = io.function()?;

                let format = if let Some(format) = format {
                    format
                } else if let Some(ext) = io.extension() {
                    ext.parse()?
                } else {
                    SampleFormat::Json
                };

                let x_min = x_min.unwrap_or(config.sample.x_min);
                let x_max = x_max.unwrap_or(config.sample.x_max);
                let num_points = num_points.unwrap_or(config.sample.num_points);
                event!(
                    Level::DEBUG,
                    x_min,
                    x_max,
                    num_points,
                    domain = ?function.domain(),
                    "sampling"
                );

                let points = sample(&function, x_min, x_max, num_points)?
                    .into_iter()
                    .map(Point::from)
                    .collect::<Vec<_>>();

                let mut output = io.write()?;
                format.write(&points, &mut output)?;
            }
        }

        Ok(())
    }
}
