#[macro_use]
extern crate log;

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_config::{ConfigError, ConfigProvider, Settings};

#[derive(Parser)]
#[command(name = "client-config", about = "Fetch and inspect the branded client config")]
struct Cli {
    /// Directory holding the persisted config and icons.
    #[arg(long)]
    files_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a short code and store the resulting config.
    Fetch { short_code: String },
    /// Print the stored config.
    Show,
    /// Delete the stored config and icons.
    Clear,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let mut out = std::io::stdout();
    if let Err(e) = run(Cli::parse(), &mut out).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(dir) = cli.files_dir {
        settings = settings.with_files_dir(dir);
    }
    let provider = ConfigProvider::new(&settings)?;
    info!("using files dir {}", provider.store().dir().display());

    match cli.command {
        Command::Fetch { short_code } => {
            let config = provider.fetch(&short_code).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&*config)?)?;
        }
        Command::Show => match provider.config().await {
            Ok(config) => writeln!(out, "{}", serde_json::to_string_pretty(&*config)?)?,
            Err(ConfigError::NotLoaded) => writeln!(out, "no client config stored")?,
            Err(e) => return Err(e.into()),
        },
        Command::Clear => {
            provider.store().clear().await?;
            provider.reset().await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_with(dir: &std::path::Path, command: &str) -> String {
        let dir = dir.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["client-config", "--files-dir", dir.as_str(), command]).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn show_without_stored_config() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_with(dir.path(), "show").await, "no client config stored\n");
    }

    #[tokio::test]
    async fn show_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("client_config.json"),
            br#"{"id": "AB6WU", "service_name": "Tinode"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("icon_small"), b"png").unwrap();

        let shown = run_with(dir.path(), "show").await;
        let shown: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(shown["id"], "AB6WU");
        assert_eq!(shown["service_name"], "Tinode");
        assert_eq!(shown["api_url"], serde_json::Value::Null);

        assert_eq!(run_with(dir.path(), "clear").await, "");
        assert!(!dir.path().join("client_config.json").exists());
        assert!(!dir.path().join("icon_small").exists());
        assert_eq!(run_with(dir.path(), "show").await, "no client config stored\n");
    }
}
