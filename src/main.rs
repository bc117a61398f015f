use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::game::{GameOutcome, GameSession, Player};
use connect_four::ui::{text, App};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the starting player (1 or 2)
    #[arg(long)]
    first_player: Option<u8>,

    /// Plain line-based game on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    text: bool,

    /// Maximum log level
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(number) = cli.first_player {
        let Some(player) = Player::from_number(number) else {
            bail!("unknown player {} (expected 1 or 2)", number);
        };
        config.board.first_player = player;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!(
        columns = config.board.columns,
        rows = config.board.rows,
        first_player = config.board.first_player.number(),
        text = cli.text,
        "starting game"
    );

    if cli.text {
        run_text(&config)
    } else {
        run_tui(&config).context("terminal UI failed")
    }
}

/// Logs go to `--log-file` when given, otherwise to stderr in text mode.
/// The full-screen UI owns the terminal, so it logs nowhere without a file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    if let Some(path) = &cli.log_file {
        let directory = path.parent().unwrap_or(Path::new("."));
        let file_name = path
            .file_name()
            .with_context(|| format!("log file path {} has no file name", path.display()))?;
        let appender = tracing_appender::rolling::never(directory, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_max_level(cli.log_level)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        Ok(Some(guard))
    } else {
        if cli.text {
            tracing_subscriber::fmt()
                .with_max_level(cli.log_level)
                .with_writer(io::stderr)
                .init();
        }
        Ok(None)
    }
}

fn run_text(config: &AppConfig) -> Result<()> {
    let mut session = GameSession::new(config.board.dimensions(), config.board.first_player);
    let outcome = text::run(
        &mut session,
        &config.display,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .context("terminal I/O failed")?;

    match outcome {
        Some(GameOutcome::Winner(player)) => {
            tracing::info!(winner = player.number(), moves = session.move_count(), "game finished")
        }
        Some(GameOutcome::Draw) => tracing::info!(moves = session.move_count(), "game drawn"),
        None => tracing::info!("game abandoned"),
    }
    Ok(())
}

fn run_tui(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config.board.dimensions(), config.board.first_player);
    let res = app.run(&mut terminal);

    // Restore terminal, always runs even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
