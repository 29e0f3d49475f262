//! pcm-i18n - inspect PCM translation catalogs
//!
//! - `translate`: resolve a key the way the UI does (fallback + placeholders)
//! - `languages`: list catalog languages
//! - `check`: report keys missing from or orphaned in non-default languages

mod config;
mod report;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pcm_i18n::{Catalog, Placeholders, Translator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::I18nConfig;

/// Inspect and query PCM translation catalogs
#[derive(Parser, Debug)]
#[command(name = "pcm-i18n")]
#[command(about = "Inspect and query PCM translation catalogs")]
#[command(version)]
struct Cli {
    /// Config file or directory containing pcm-i18n.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Active language (overrides config and $LANG)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a key in the active language
    Translate {
        /// Translation key
        key: String,

        /// Placeholder value as name=value (repeatable)
        #[arg(short, long = "arg", value_parser = parse_placeholder)]
        args: Vec<(String, String)>,
    },

    /// List catalog languages
    Languages,

    /// Report translation coverage against the default language
    Check {
        /// Exit with failure if any language is incomplete
        #[arg(long)]
        strict: bool,
    },
}

fn parse_placeholder(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty placeholder name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--lang`, then the config's `active_language`, then `$LANG`, then the default.
fn open_translator(catalog: Catalog, cli_lang: Option<&str>, config: &I18nConfig) -> Result<Translator> {
    if let Some(lang) = cli_lang.or(config.active_language.as_deref()) {
        return Translator::with_language(catalog, lang)
            .with_context(|| format!("Cannot select language `{lang}`"));
    }

    let env_lang = std::env::var("LANG")
        .ok()
        .and_then(|requested| catalog.negotiate(&requested).map(str::to_string));
    match env_lang {
        Some(lang) => {
            tracing::info!("Using language {} from $LANG", lang);
            Ok(Translator::with_language(catalog, lang)?)
        }
        None => Ok(Translator::new(catalog)),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = I18nConfig::discover(cli.config.as_deref())?;
    let catalog = config.build_catalog()?;
    let translator = open_translator(catalog, cli.lang.as_deref(), &config)?;

    match cli.command {
        Commands::Translate { key, args } => {
            let placeholders: Placeholders = args.into_iter().collect();
            println!("{}", translator.translate(&key, Some(&placeholders)));
        }
        Commands::Languages => {
            print!("{}", report::languages(&translator));
        }
        Commands::Check { strict } => {
            let coverage = translator.catalog().coverage();
            print!("{}", report::coverage(&coverage));
            if strict && !coverage.is_complete() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholder_args_split_on_first_equals() {
        assert_eq!(
            parse_placeholder("term=a=b").unwrap(),
            ("term".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_placeholder("name=").unwrap(),
            ("name".to_string(), String::new())
        );
        assert!(parse_placeholder("name").is_err());
        assert!(parse_placeholder("=x").is_err());
    }

    #[test]
    fn cli_flags_override_config_language() {
        let config = I18nConfig::parse("active_language = \"ko\"\n").unwrap();
        let catalog = config.build_catalog().unwrap();

        let tr = open_translator(catalog.clone(), Some("en"), &config).unwrap();
        assert_eq!(tr.language(), "en");

        let tr = open_translator(catalog.clone(), None, &config).unwrap();
        assert_eq!(tr.language(), "ko");

        assert!(open_translator(catalog, Some("fr"), &config).is_err());
    }

    #[test]
    fn cli_parses_translate_args() {
        let cli = Cli::parse_from([
            "pcm-i18n", "--lang", "en", "translate", "dash_welcome", "-a", "name=Sam",
        ]);
        assert_eq!(cli.lang.as_deref(), Some("en"));
        match cli.command {
            Commands::Translate { key, args } => {
                assert_eq!(key, "dash_welcome");
                assert_eq!(args, vec![("name".to_string(), "Sam".to_string())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
