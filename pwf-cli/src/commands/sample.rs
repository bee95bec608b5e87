use super::Point;
use clap::ValueEnum;
use std::{io::Write, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SampleFormat {
    Json,
    Csv,
}

impl SampleFormat {
    pub fn write<W: Write>(&self, points: &[Point], buffer: &mut W) -> anyhow::Result<()> {
        match self {
            Self::Json => serde_json::to_writer_pretty(&mut *buffer, points)?,
            Self::Csv => {
                writeln!(buffer, "x,y")?;
                for Point { x, y } in points {
                    writeln!(buffer, "{},{}", x.0, y.0)?;
                }
            }
        };
        buffer.flush()?;
        Ok(())
    }
}

impl FromStr for SampleFormat {
    type Err = SampleFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "JSON" => Ok(Self::Json),
            "csv" | "CSV" => Ok(Self::Csv),
            _ => Err(Self::Err::UnknownExtension(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SampleFormatError {
    #[error("Unknown sample format: {0}")]
    UnknownExtension(String),
}
