//! Command line parsing

use anyhow::{anyhow, bail, Result};
use pixart_io::ExportFormat;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: pixart [--config <path>] <command>

Commands:
  serve                                   Run the preset web server
  presets [--server <url>]                List available presets
  export <name> <png|ico|json> [--out <path>] [--server <url>]
                                          Load a preset and export it
";

/// Sub-command to run
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Serve,
    Presets {
        server: Option<String>,
    },
    Export {
        name: String,
        format: ExportFormat,
        out: Option<PathBuf>,
        server: Option<String>,
    },
    Help,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

impl Cli {
    /// Parse arguments, program name excluded
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = None;
        let mut positional = Vec::new();
        let mut out = None;
        let mut server = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => config = Some(PathBuf::from(value_of(&arg, args.next())?)),
                "--out" | "-o" => out = Some(PathBuf::from(value_of(&arg, args.next())?)),
                "--server" => server = Some(value_of(&arg, args.next())?),
                "--help" | "-h" => {
                    return Ok(Self {
                        config,
                        command: Command::Help,
                    })
                }
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("help") => Command::Help,
            Some("serve") => Command::Serve,
            Some("presets") => Command::Presets { server },
            Some("export") => {
                let name = positional
                    .next()
                    .ok_or_else(|| anyhow!("export: missing preset name"))?;
                let format = positional
                    .next()
                    .ok_or_else(|| anyhow!("export: missing format (png, ico or json)"))?
                    .parse::<ExportFormat>()?;
                Command::Export {
                    name,
                    format,
                    out,
                    server,
                }
            }
            Some(other) => bail!("Unknown command: {}", other),
        };

        if let Some(extra) = positional.next() {
            bail!("Unexpected argument: {}", extra);
        }

        Ok(Self { config, command })
    }
}

fn value_of(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("{} requires a value", flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_serve_with_config() {
        let cli = parse(&["--config", "my.toml", "serve"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert_eq!(cli.command, Command::Serve);
    }

    #[test]
    fn test_parse_export() {
        let cli = parse(&["export", "mario", "ico", "--out", "m.ico"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Export {
                name: "mario".to_string(),
                format: ExportFormat::Ico,
                out: Some(PathBuf::from("m.ico")),
                server: None,
            }
        );
    }

    #[test]
    fn test_parse_presets_with_server() {
        let cli = parse(&["presets", "--server", "http://localhost:8080"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Presets {
                server: Some("http://localhost:8080".to_string())
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["export", "mario"]).is_err());
        assert!(parse(&["export", "mario", "gif"]).is_err());
        assert!(parse(&["serve", "--out"]).is_err());
        assert!(parse(&["paint"]).is_err());
        assert!(parse(&["serve", "now"]).is_err());
        assert!(parse(&["--verbose", "serve"]).is_err());
    }

    #[test]
    fn test_no_command_is_help() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(parse(&["serve", "-h"]).unwrap().command, Command::Help);
    }
}
