use super::IOArgs;
use clap::Subcommand;

mod report;
mod sample;

pub use report::{DomainReport, Extrema, Extremum, Point};
pub use sample::{SampleFormat, SampleFormatError};

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Evaluate the function at one or more arguments
    Evaluate {
        #[command(flatten)]
        io: IOArgs,

        /// The arguments to evaluate at (repeatable; "inf" and "-inf" are accepted)
        #[arg(short = 'x', long = "at", required = true, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<f64>,
    },

    /// Report the minimum and maximum of the function over its domain
    Extrema {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Report the half-open domain [lower, upper) of the function
    Domain {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Evaluate the function on an evenly spaced grid
    Sample {
        #[command(flatten)]
        io: IOArgs,

        /// The first argument (defaults to the configured sample.x_min)
        #[arg(long, allow_negative_numbers = true)]
        x_min: Option<f64>,

        /// The last argument, which must lie below the domain's upper breakpoint
        /// (defaults to the configured sample.x_max)
        #[arg(long, allow_negative_numbers = true)]
        x_max: Option<f64>,

        /// The number of points (defaults to the configured sample.num_points)
        #[arg(short, long)]
        num_points: Option<usize>,

        /// The output format (if omitted, will infer based on filename, then fall back to json)
        #[arg(short, long)]
        format: Option<SampleFormat>,
    },
}
