//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for Zoho Books
#[derive(Parser, Debug)]
#[command(name = "tap-zohobooks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON), or `ENV` to read `TAP_ZOHOBOOKS_*` variables.
    /// Repeatable; later sources override earlier ones
    #[arg(long)]
    pub config: Vec<String>,

    /// State file (JSON)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Catalog file (JSON) selecting streams and fields
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print the catalog and exit
    #[arg(long)]
    pub discover: bool,

    /// Print tap information and exit
    #[arg(long)]
    pub about: bool,

    /// Format for `--about`
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Test the connection and exit
    #[arg(long)]
    pub test: bool,
}

/// Output format for `--about`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON document
    Json,
    /// Markdown summary
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_sync_args() {
        let cli = Cli::try_parse_from([
            "tap-zohobooks",
            "--config",
            "config.json",
            "--config",
            "ENV",
            "--state",
            "state.json",
            "--catalog",
            "catalog.json",
        ])
        .unwrap();

        assert_eq!(cli.config, vec!["config.json", "ENV"]);
        assert_eq!(cli.state, Some(PathBuf::from("state.json")));
        assert_eq!(cli.catalog, Some(PathBuf::from("catalog.json")));
        assert!(!cli.discover);
        assert!(!cli.about);
        assert!(!cli.test);
    }

    #[test]
    fn test_parse_about_format() {
        let args = ["tap-zohobooks", "--about", "--format", "markdown"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.about);
        assert_eq!(cli.format, OutputFormat::Markdown);

        let cli = Cli::try_parse_from(["tap-zohobooks", "--about"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let args = ["tap-zohobooks", "--about", "--format", "yaml"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
