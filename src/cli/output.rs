//! Output helpers for CLI commands
//!
//! Converted records are written verbatim to a file or stdout. Descriptive
//! output (`describe`) supports JSON, YAML and plain text.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format options for descriptive commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Print data in the specified OutputFormat
pub fn print_output_format<T: Serialize + TextRender>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
        OutputFormat::Text => {
            println!("{}", data.render_text());
            Ok(())
        }
    }
}

/// Plain-text rendering for descriptive output.
pub trait TextRender {
    fn render_text(&self) -> String;
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize to YAML")?;
    print!("{}", yaml);
    Ok(())
}

/// Write converted bytes to `path`, or stdout when no path is given.
///
/// Text written to a terminal gets a trailing newline; files receive the bytes
/// unchanged.
pub fn write_record(bytes: &[u8], path: Option<&Path>, is_text: bool) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write output file {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write to stdout")?;
            if is_text && !bytes.ends_with(b"\n") {
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
            }
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

/// Read the record to convert from `path`, or stdin when no path is given.
pub fn read_record(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    impl TextRender for TestData {
        fn render_text(&self) -> String {
            format!("{}={}", self.name, self.value)
        }
    }

    #[test]
    fn test_print_formats() {
        let data = TestData { name: "test".to_string(), value: 42 };
        assert!(print_output_format(&data, OutputFormat::Json).is_ok());
        assert!(print_output_format(&data, OutputFormat::Yaml).is_ok());
        assert!(print_output_format(&data, OutputFormat::Text).is_ok());
        assert_eq!(data.render_text(), "test=42");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.bin");

        write_record(&[0x0a, 1, b'x'], Some(&path), false).unwrap();
        assert_eq!(read_record(Some(&path)).unwrap(), vec![0x0a, 1, b'x']);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_record(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
