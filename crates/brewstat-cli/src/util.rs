use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use serde::Serialize;

/// Where a JSON document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonOutput {
    Stdout,
    File(PathBuf),
}

impl JsonOutput {
    pub fn from_output_path(output_path: Option<PathBuf>) -> Self {
        output_path.map_or(Self::Stdout, Self::File)
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let result = match self {
            Self::Stdout => write_pretty(&mut io::stdout().lock(), value),
            Self::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                write_pretty(&mut BufWriter::new(file), value)
            }
        };
        result.with_context(|| format!("Failed to write JSON to {self}"))
    }
}

impl fmt::Display for JsonOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn write_pretty<W, T>(writer: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
