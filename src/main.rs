use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{AppConfig, SetupOverrides};
use connect_four::logging;
use connect_four::ui::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override the default number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the default number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override player 1's color (#rrggbb)
    #[arg(long)]
    player1_color: Option<String>,

    /// Override player 2's color (#rrggbb)
    #[arg(long)]
    player2_color: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let overrides = SetupOverrides {
        rows: cli.rows,
        columns: cli.columns,
        player1_color: cli.player1_color,
        player2_color: cli.player2_color,
    };
    let config = AppConfig::load_with_overrides(&cli.config, overrides)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let _guard = logging::init(&config.logging).context("initialising logging")?;

    run(App::new(config.setup)).context("terminal UI failed")
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    res
}
