use clap::Parser;
use ollama_remote::config::{Config, ConfigLoader};
use ollama_remote::port::{list_ports, PortConfiguration, SyncSerialPort};
use ollama_remote::ui::{ConsoleUi, UiSurface};
use ollama_remote::{logging, AppError, ChannelSettings, CommandChannel, DataFiles, SessionController};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Menu-driven serial remote for an ESP32 Ollama bridge board.",
    long_about = "Provisions Wi-Fi access points on the bridge board and relays chat messages to the Ollama server it talks to. Saved access points, the server URL and the API key live in flat files under the data directory."
)]
struct Args {
    /// Config file (default: OLLAMA_REMOTE_CONFIG, ./ollama-remote.toml, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port of the bridge board (overrides serial.port)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (overrides serial.baud)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Directory holding the saved APs and server files (overrides storage.data_dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Use the line-based console instead of the full-screen terminal
    #[arg(long)]
    console: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Log to stderr when no log file is configured
    #[arg(long)]
    log_stderr: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, AppError> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    let mut config = loader.into_config();

    if let Some(port) = &args.port {
        config.serial.port = Some(port.clone());
    }
    if let Some(baud) = args.baud {
        config.serial.baud = baud;
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), AppError> {
    let config = load_config(&args)?;

    if args.list_ports {
        let ports = list_ports()?;
        if ports.is_empty() {
            println!("No serial ports found");
        }
        for port in ports {
            println!("{:<24} {}", port.name, port.description);
        }
        return Ok(());
    }

    logging::init(&config.logging, args.log_stderr)?;

    let port_name = config.serial.port.clone().ok_or(AppError::NoPortConfigured)?;
    let port = SyncSerialPort::open(
        &port_name,
        PortConfiguration {
            baud_rate: config.serial.baud,
            timeout: config.serial.poll_timeout(),
        },
    )?;

    let channel = CommandChannel::new(port, ChannelSettings::from(&config.serial));
    let files = DataFiles::from_config(&config.storage);
    info!("Data directory: {}", config.storage.resolve_data_dir().display());

    let ui = make_ui(&config, args.console)?;
    let mut session = SessionController::new(channel, ui, files, config.session.clone());
    session.run()?;
    Ok(())
}

#[cfg(feature = "tui")]
fn make_ui(config: &Config, console: bool) -> Result<Box<dyn UiSurface>, AppError> {
    use ollama_remote::tui::{TerminalUi, Theme};

    if console {
        return Ok(Box::new(ConsoleUi::stdio()));
    }
    let theme = Theme::by_name(&config.tui.theme).cloned().unwrap_or_default();
    Ok(Box::new(TerminalUi::new(theme, config.tui.tick_rate())?))
}

#[cfg(not(feature = "tui"))]
fn make_ui(_config: &Config, _console: bool) -> Result<Box<dyn UiSurface>, AppError> {
    Ok(Box::new(ConsoleUi::stdio()))
}
