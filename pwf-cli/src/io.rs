use clap::Args;
use pwf_core::models::Function;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};
use tracing::{Level, event};

// Every subcommand reads one function and writes one report.
// This struct standardizes their implementation.
#[derive(Args, Clone, Debug)]
pub struct IOArgs {
    /// The function JSON file ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    pub input: PathOrStd,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    pub output: PathOrStd,
}

impl IOArgs {
    pub fn read(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            PathOrStd::Path(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            PathOrStd::Std => Ok(Box::new(stdin().lock())),
        }
    }

    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match &self.output {
            PathOrStd::Path(path) => path.extension(),
            PathOrStd::Std => None,
        }
        .and_then(|ext| ext.to_str())
    }

    /// Write `value` as pretty JSON to the output, flushing before returning
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        write_json(self.write()?, value)
    }

    /// Read and validate the input function
    pub fn function(&self) -> anyhow::Result<Function> {
        let function = serde_json::from_reader::<_, Function>(self.read()?)?;
        event!(
            Level::INFO,
            kind = function.kind(),
            breakpoints = function.breakpoints().len(),
            "loaded function"
        );
        Ok(function)
    }
}

// A dropped BufWriter discards its flush error, so flush explicitly
fn write_json<W: Write, T: Serialize + ?Sized>(mut output: W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut output, value)?;
    output.flush()?;
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Accepts writes, but fails to flush them
    struct Unflushable(Vec<u8>);

    impl Write for Unflushable {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[1, 2]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_write_json_reports_flush_error() {
        let error = write_json(Unflushable(Vec::new()), &[1, 2]).unwrap_err();
        assert_eq!(error.to_string(), "disk full");
    }

    #[test]
    fn test_path_or_std() {
        assert_eq!("-".parse::<PathOrStd>().unwrap(), PathOrStd::Std);
        assert_eq!(
            "out.csv".parse::<PathOrStd>().unwrap(),
            PathOrStd::Path("out.csv".into())
        );
    }
}
