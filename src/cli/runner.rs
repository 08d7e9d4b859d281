//! CLI runner - executes the selected mode

use crate::auth::Authenticator;
use crate::catalog::Catalog;
use crate::cli::commands::{Cli, OutputFormat};
use crate::config::{config_jsonschema, ConfigSource, TapConfig};
use crate::engine::{SyncConfig, SyncEngine};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::output::MessageWriter;
use crate::state::StateManager;
use crate::streams::StreamRegistry;
use crate::{NAME, VERSION};
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::io::{self, BufWriter};
use tracing::info;

/// Capabilities advertised by `--about`
const CAPABILITIES: &[&str] = &["catalog", "state", "discover", "about"];

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        if self.cli.about {
            return self.about();
        }
        if self.cli.discover {
            return self.discover();
        }

        let config = self.load_config()?;
        config.validate()?;

        if self.cli.test {
            self.test_connection(&config).await
        } else {
            self.sync(&config).await
        }
    }

    /// Merge every `--config` source in order
    fn load_config(&self) -> Result<TapConfig> {
        let sources: Vec<ConfigSource> = self
            .cli
            .config
            .iter()
            .map(|arg| ConfigSource::parse(arg))
            .collect();
        TapConfig::from_sources(&sources)
    }

    fn load_state(&self) -> Result<StateManager> {
        match &self.cli.state {
            Some(path) => StateManager::from_file(path),
            None => Ok(StateManager::in_memory()),
        }
    }

    fn load_catalog(&self) -> Result<Catalog> {
        match &self.cli.catalog {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::discover(&StreamRegistry::zoho_books())),
        }
    }

    fn about(&self) -> Result<()> {
        let info = about_info();
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
            OutputFormat::Markdown => print!("{}", about_markdown(&info)),
        }
        Ok(())
    }

    fn discover(&self) -> Result<()> {
        let catalog = Catalog::discover(&StreamRegistry::zoho_books());
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        Ok(())
    }

    /// Authenticated client for `config`
    fn build_client(config: &TapConfig) -> Result<HttpClient> {
        let http_config = HttpClientConfig::builder()
            .user_agent(config.user_agent())
            .build();
        let mut client = HttpClient::with_config(http_config)?;
        let authenticator = Authenticator::from_config(config, client.inner().clone())?;
        client.set_authenticator(authenticator);
        Ok(client)
    }

    async fn test_connection(&self, config: &TapConfig) -> Result<()> {
        let client = Self::build_client(config)?;
        let base = config.api_base_url();
        let url = format!("{}/organizations", base.trim_end_matches('/'));

        client.get(&url, RequestConfig::new()).await?;
        info!("Connection test succeeded");
        Ok(())
    }

    async fn sync(&self, config: &TapConfig) -> Result<()> {
        let client = Self::build_client(config)?;
        let state = self.load_state()?;
        let catalog = self.load_catalog()?;
        let writer = MessageWriter::new(BufWriter::new(io::stdout()));

        let mut engine = SyncEngine::new(client, catalog, state, writer)
            .with_config(SyncConfig::from_tap_config(config));
        engine.sync_all().await?;
        Ok(())
    }
}

/// Document printed by `--about`
pub fn about_info() -> Value {
    json!({
        "name": NAME,
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": VERSION,
        "capabilities": CAPABILITIES,
        "settings": config_jsonschema(),
    })
}

/// Markdown rendering of [`about_info`]
pub fn about_markdown(info: &Value) -> String {
    let mut out = String::new();
    let text = |key: &str| info[key].as_str().unwrap_or_default().to_string();

    let _ = writeln!(out, "# `{}`\n", text("name"));
    let _ = writeln!(out, "{}\n", text("description"));
    let _ = writeln!(out, "Version: {}\n", text("version"));

    let _ = writeln!(out, "## Capabilities\n");
    for capability in info["capabilities"].as_array().into_iter().flatten() {
        let _ = writeln!(out, "* `{}`", capability.as_str().unwrap_or_default());
    }

    let settings = &info["settings"];
    let required: Vec<&str> = settings["required"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();

    let _ = writeln!(out, "\n## Settings\n");
    let _ = writeln!(out, "| Setting | Required | Default | Description |");
    let _ = writeln!(out, "|:--------|:--------:|:-------:|:------------|");
    for (name, property) in settings["properties"].as_object().into_iter().flatten() {
        let default = property
            .get("default")
            .map(ToString::to_string)
            .unwrap_or_default();
        let is_required = required.contains(&name.as_str());
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            name,
            if is_required { "True" } else { "False" },
            default.trim_matches('"'),
            property["description"].as_str().unwrap_or_default(),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_about_info() {
        let info = about_info();
        assert_eq!(info["name"], "tap-zohobooks");
        assert_eq!(
            info["capabilities"],
            json!(["catalog", "state", "discover", "about"])
        );
        assert_eq!(
            info["settings"]["required"],
            json!(["client_id", "client_secret", "refresh_token"])
        );
    }

    #[test]
    fn test_about_markdown() {
        let markdown = about_markdown(&about_info());
        assert!(markdown.starts_with("# `tap-zohobooks`"));
        assert!(markdown.contains("* `discover`"));
        let client_id = "| client_id | True |  | OAuth2 client id |";
        let accounts_server = "| accounts-server | False | https://accounts.zoho.com |";
        assert!(markdown.contains(client_id));
        assert!(markdown.contains(accounts_server));
    }

    #[tokio::test]
    async fn test_sync_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"client_id": "abc"}"#).unwrap();

        let cli = Cli {
            config: vec![path.to_string_lossy().to_string()],
            state: None,
            catalog: None,
            discover: false,
            about: false,
            format: OutputFormat::Json,
            test: false,
        };
        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }
}
