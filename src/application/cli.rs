#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::repl;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClientName;
use crate::domain::models::Message;
use crate::domain::models::MessageKind;
use crate::domain::services::ChatSession;
use crate::domain::services::LinkRenderer;
use crate::domain::services::ERROR_TEXT;
use crate::infrastructure::clients::ClientManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Html,
}

pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("INFINITIVIEW_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("infinitiview");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Formats an answered message for one-shot output. HTML output anchors every
/// link, property cards included.
pub fn format_answer(message: &Message, format: OutputFormat) -> String {
    let paragraphs = LinkRenderer::render(&message.text);

    match format {
        OutputFormat::Text => {
            let mut lines = LinkRenderer::to_lines(&paragraphs);
            for property in &message.properties {
                lines.push("".to_string());
                lines.extend(property.card_lines());
            }

            return lines.join("\n");
        }
        OutputFormat::Html => {
            let mut blocks = vec![LinkRenderer::to_html(&paragraphs)];
            for property in &message.properties {
                let card = LinkRenderer::render(&property.card_lines().join("\n"));
                blocks.push(format!(
                    "<div class=\"property-card\">\n{}\n</div>",
                    LinkRenderer::to_html(&card)
                ));
            }

            return blocks.join("\n");
        }
    }
}

async fn ask(question: &str, format: OutputFormat) -> Result<()> {
    if question.trim().is_empty() {
        bail!("Question must not be empty");
    }

    let client = ClientManager::get(&Config::get(ConfigKey::Client))?;
    let mut session = ChatSession::new();
    session.send_message(client.as_ref(), question).await;

    if let Some(err) = session.last_error() {
        bail!(format!("{ERROR_TEXT}\n\n{err}"));
    }

    if let Some(message) = session
        .history()
        .iter()
        .rev()
        .find(|e| return e.kind == MessageKind::Assistant)
    {
        println!("{}", format_answer(message, format));
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for InfinitiView")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running InfinitiView with environment variable RUST_LOG=infinitiview")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new chat session. This is the default command.");
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Ask a single question, print the answer and exit.")
        .arg(
            Arg::new("question")
                .help("The question to ask.")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format for the answer.")
                .num_args(1)
                .default_value("text")
                .value_parser(PossibleValuesParser::new(OutputFormat::VARIANTS)),
        );
}

fn arg_client() -> Arg {
    return Arg::new(ConfigKey::Client.to_string())
        .long(ConfigKey::Client.to_string())
        .env("INFINITIVIEW_CLIENT")
        .num_args(1)
        .help(format!(
            "The question answering service to talk to. [default: {}]",
            Config::default(ConfigKey::Client)
        ))
        .value_parser(PossibleValuesParser::new(ClientName::VARIANTS))
        .global(true);
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .long(ConfigKey::ApiURL.to_string())
        .env("INFINITIVIEW_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the question answering service. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("INFINITIVIEW_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when doing a healthcheck for the service. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = repl::help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("QUICK ACTIONS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("infinitiview")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_ask())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_client())
        .arg(arg_api_url())
        .arg(arg_health_check_timeout())
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("INFINITIVIEW_USERNAME")
                .num_args(1)
                .help("Your name as displayed next to your messages. Defaults to the USER environment variable.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("INFINITIVIEW_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Runs any one-shot subcommand. Returns true when the interactive chat should
/// start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;

            let question = subcmd_matches
                .get_many::<String>("question")
                .map(|e| return e.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();

            let format = match subcmd_matches.get_one::<String>("format").map(|e| return e.as_str()) {
                Some("html") => OutputFormat::Html,
                _ => OutputFormat::Text,
            };

            ask(&question, format).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
