//! # Command Line Interface
//!
//! `meshapi convert` re-encodes a record between JSON, YAML and the binary wire
//! format; `meshapi describe` prints the protobuf name and type URL of a record
//! kind.

pub mod convert;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::observability::{init_observability, log_config_info};

pub use convert::{Format, RecordKind};
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "meshapi")]
#[command(about = "Service-mesh API record converter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a record between encodings
    Convert(ConvertArgs),

    /// Show the protobuf name and type URL of a record kind
    Describe {
        /// Record kind
        #[arg(long, value_enum)]
        kind: RecordKind,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Record kind
    #[arg(long, value_enum)]
    pub kind: RecordKind,

    /// Encoding of the input
    #[arg(long, value_enum, default_value = "json")]
    pub from: Format,

    /// Encoding of the output
    #[arg(long, value_enum, default_value = "binary")]
    pub to: Format,

    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

impl ConvertArgs {
    /// Flags win over `MESHAPI_OUTPUT_PRETTY`.
    pub fn pretty(&self, config: &Config) -> bool {
        if self.pretty {
            true
        } else if self.compact {
            false
        } else {
            config.output.pretty
        }
    }
}

/// What `describe` prints for a record kind.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub kind: RecordKind,
    pub full_name: String,
    pub type_url: String,
}

impl Description {
    pub fn of(kind: RecordKind) -> Self {
        Self { kind, full_name: kind.full_name(), type_url: kind.type_url() }
    }
}

impl output::TextRender for Description {
    fn render_text(&self) -> String {
        format!("kind:      {}\nname:      {}\ntype_url:  {}", self.kind, self.full_name, self.type_url)
    }
}

/// Run CLI commands
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?.with_verbose(cli.verbose);
    if cli.log_json {
        config.logging.json_logging = true;
    }
    init_observability(&config)?;
    log_config_info(&config);

    run(cli.command, &config)
}

/// Execute one parsed command.
pub fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Convert(args) => handle_convert(&args, config),
        Commands::Describe { kind, output } => {
            output::print_output_format(&Description::of(kind), output)
        }
    }
}

fn handle_convert(args: &ConvertArgs, config: &Config) -> anyhow::Result<()> {
    let input = output::read_record(args.input.as_deref())?;
    let converted = convert::convert(args.kind, args.from, args.to, &input, args.pretty(config))
        .with_context(|| format!("Failed to convert {} from {} to {}", args.kind, args.from, args.to))?;

    output::write_record(&converted, args.output.as_deref(), args.to.is_text())?;

    if let Some(path) = &args.output {
        info!(kind = %args.kind, path = %path.display(), "Wrote converted record");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "meshapi",
            "convert",
            "--kind",
            "destination-rule",
            "--from",
            "yaml",
            "--to",
            "json",
            "--compact",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.kind, RecordKind::DestinationRule);
                assert_eq!(args.from, Format::Yaml);
                assert_eq!(args.to, Format::Json);
                assert!(!args.pretty(&Config::default()));
                assert!(args.input.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_pretty_and_compact_conflict() {
        let result = Cli::try_parse_from([
            "meshapi",
            "convert",
            "--kind",
            "workload-entry",
            "--pretty",
            "--compact",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pretty_defaults_to_config() {
        let cli = Cli::try_parse_from(["meshapi", "convert", "--kind", "workload-entry"]).unwrap();
        let Commands::Convert(args) = cli.command else { panic!("expected convert") };

        let mut config = Config::default();
        assert!(args.pretty(&config));
        config.output.pretty = false;
        assert!(!args.pretty(&config));
    }

    #[test]
    fn test_describe_text() {
        let text = output::TextRender::render_text(&Description::of(RecordKind::TcpClusterRewrite));
        assert!(text.contains("kind:      tcp-cluster-rewrite"));
        assert!(text.contains(
            "type.googleapis.com/istio.envoy.config.filter.network.tcp_cluster_rewrite.v2alpha1.TcpClusterRewrite"
        ));
    }

    #[test]
    fn test_convert_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rule.json");
        let output = dir.path().join("rule.bin");
        std::fs::write(&input, r#"{"clusterPattern":"ab","clusterReplacement":"c"}"#).unwrap();

        let args = ConvertArgs {
            kind: RecordKind::TcpClusterRewrite,
            from: Format::Json,
            to: Format::Binary,
            input: Some(input),
            output: Some(output.clone()),
            pretty: false,
            compact: false,
        };
        run(Commands::Convert(args), &Config::default()).unwrap();

        assert_eq!(std::fs::read(output).unwrap(), vec![0x0a, 2, b'a', b'b', 0x12, 1, b'c']);
    }
}
