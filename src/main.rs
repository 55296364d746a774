use anyhow::{Context, Result};
use cbntool::commands::{self, Command, ParserTools};
use cbntool::config::Config;
use cbntool::document::Document;
use cbntool::frontend::terminal::TerminalFrontend;
use cbntool::frontend::Frontend;
use cbntool::session::SessionStore;
use cbntool::workspace::Workspace;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Chronicle CBN parsers
#[derive(Parser, Debug)]
#[command(name = "cbntool", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Cmd,

    /// Service account key file (overrides the setting)
    #[arg(long, global = true)]
    service_account_file: Option<PathBuf>,

    /// API region: EUROPE, ASIA, or anything else for the default
    #[arg(long, global = true)]
    region: Option<String>,

    /// Author recorded on created parsers
    #[arg(long, global = true)]
    author: Option<String>,

    /// Use this base URL instead of the region's
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Bearer token to use instead of the service account
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Workspace directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Open documents to choose .conf/.log files from (defaults to the files in the workspace)
    #[arg(long = "open", global = true)]
    open: Vec<PathBuf>,

    /// Write the resulting document to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List all parsers
    List,
    /// Show the parser created last in this workspace
    Get,
    /// Show the decoded config of a parser
    Download { config_id: Option<String> },
    /// Archive a parser
    Archive { config_id: Option<String> },
    /// Create a parser from an open .conf file
    Create {
        #[arg(long)]
        conf: Option<String>,
        #[arg(long)]
        log_type: Option<String>,
    },
    /// Retrieve sample logs
    Sample {
        #[arg(long)]
        log_type: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        max_entries: Option<u32>,
    },
    /// Validate an open .conf file against an open .log file
    Validate {
        #[arg(long)]
        conf: Option<String>,
        #[arg(long)]
        log: Option<String>,
    },
    /// Show the parser history of a log type
    History { log_type: Option<String> },
    /// Re-fetch the parser shown last, if it was a get document
    Refresh,
    /// Print a previously displayed document URI
    Show { uri: String },
    /// Inspect or change settings
    #[command(subcommand)]
    Config(ConfigCmd),
}

#[derive(Subcommand, Debug)]
enum ConfigCmd {
    /// Print the stored settings
    Show,
    /// Change one setting; an empty value clears it
    Set { key: String, value: String },
    /// Print the settings file path
    Path,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cbntool started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cbntool").join("cbntool.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cbntool").join("cbntool.log");
    }
    PathBuf::from("cbntool.log")
}

/// Turn the subcommand into a command plus the prompt answers it carries
fn prepare(cmd: Cmd, frontend: &mut TerminalFrontend) -> Option<Command> {
    let command = match cmd {
        Cmd::List => Command::List,
        Cmd::Get => Command::Get,
        Cmd::Download { config_id } => {
            frontend.preset(commands::DOWNLOAD_TITLE, config_id);
            Command::Download
        }
        Cmd::Archive { config_id } => {
            frontend.preset(commands::ARCHIVE_TITLE, config_id);
            Command::Archive
        }
        Cmd::Create { conf, log_type } => {
            frontend.preset(commands::CREATE_CONF_TITLE, conf);
            frontend.preset(commands::CREATE_LOG_TYPE_TITLE, log_type);
            Command::Create
        }
        Cmd::Sample {
            log_type,
            start_time,
            end_time,
            max_entries,
        } => {
            frontend.preset(commands::SAMPLE_LOG_TYPE_TITLE, log_type);
            frontend.preset(commands::SAMPLE_START_TITLE, start_time);
            frontend.preset(commands::SAMPLE_END_TITLE, end_time);
            frontend.preset(commands::SAMPLE_MAX_TITLE, max_entries.map(|n| n.to_string()));
            Command::Sample
        }
        Cmd::Validate { conf, log } => {
            frontend.preset(commands::VALIDATE_CONF_TITLE, conf);
            frontend.preset(commands::VALIDATE_LOG_TITLE, log);
            Command::Validate
        }
        Cmd::History { log_type } => {
            frontend.preset(commands::HISTORY_TITLE, log_type);
            Command::History
        }
        Cmd::Refresh => Command::Refresh,
        Cmd::Show { .. } | Cmd::Config(_) => return None,
    };
    Some(command)
}

fn run_config(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            let config = Config::load();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCmd::Set { key, value } => {
            let mut config = Config::load();
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!("Setting {} updated", key);
        }
        ConfigCmd::Path => match Config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No configuration directory on this platform"),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level)?;

    let mut frontend = TerminalFrontend::new().with_output(args.output.clone());

    let cmd = match args.command {
        Cmd::Config(cmd) => return run_config(cmd),
        Cmd::Show { uri } => {
            let document = Document::Virtual { uri };
            let content = document.content(&Default::default())?;
            frontend.show_document(&document, &content)?;
            return Ok(());
        }
        cmd => cmd,
    };

    let config = Config::load().merge(Config {
        service_account_file_path: args.service_account_file,
        region: args.region,
        author: args.author,
        api_base_url: args.api_base_url,
        access_token: args.access_token,
    });

    let root = match args.workspace {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    let workspace = if args.open.is_empty() {
        Workspace::from_dir(root.clone())
            .with_context(|| format!("Failed to read workspace {:?}", root))?
    } else {
        Workspace::new(root.clone(), args.open)
    };

    let Some(command) = prepare(cmd, &mut frontend) else {
        return Ok(());
    };

    let mut store = SessionStore::open();
    let session = store.get(workspace.root());
    let mut tools = ParserTools::new(config, workspace, session);

    let result = tools.run(command, &mut frontend).await;

    store
        .put(&root, tools.into_session())
        .context("Failed to save session state")?;

    if matches!(&result, Err(e) if !e.is_silent()) {
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}
