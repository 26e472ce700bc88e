use crate::core::warnings::Warning;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub trait Output: Debug {
    fn writer(&self) -> anyhow::Result<impl Write>;
}

#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Output for FileOutput {
    fn writer(&self) -> anyhow::Result<impl Write> {
        Ok(BufWriter::new(File::create(&self.path)?))
    }
}

#[derive(Debug, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn writer(&self) -> anyhow::Result<impl Write> {
        Ok(io::stdout().lock())
    }
}

/// The calculated U-value of a floor and every warning raised on the way.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FloorUValueOutput {
    /// W/(m2.K)
    pub u_value: f64,
    pub warnings: IndexSet<Warning>,
}

impl FloorUValueOutput {
    pub fn write_to(&self, output: &impl Output, pretty: bool) -> anyhow::Result<()> {
        let mut writer = output.writer()?;
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warnings::warning_path;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_serializes_u_value_and_warnings() {
        let output = FloorUValueOutput {
            u_value: 0.25,
            warnings: IndexSet::from([Warning::UnnecessaryValue {
                path: warning_path!["per-floor-type", "insulation", "thickness"],
            }]),
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "u-value": 0.25,
                "warnings": [{
                    "type": "unnecessary value",
                    "path": ["per-floor-type", "insulation", "thickness"]
                }]
            })
        );
    }

    #[rstest]
    fn test_writes_json_to_file() {
        let path = std::env::temp_dir().join(format!(
            "floor-u-value-output-{}.json",
            std::process::id()
        ));
        let output = FloorUValueOutput {
            u_value: 0.5,
            warnings: IndexSet::new(),
        };
        output.write_to(&FileOutput::new(path.clone()), false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, "{\"u-value\":0.5,\"warnings\":[]}\n");
    }
}
