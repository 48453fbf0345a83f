//! Luminescence: find the exit of a dark maze by the light you carry
//!
//! Main entry point for the terminal game.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lum_core::{GameOptions, GameRng, GameState};
use lum_tui::{App, GraphicsMode, Theme};

/// Dark maze explorer
#[derive(Parser, Debug)]
#[command(name = "luminescence")]
#[command(author, version, about = "Luminescence - escape the dark maze", long_about = None)]
struct Args {
    /// Maze width (odd, at least 3)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Maze height (odd, at least 3)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Light radius in cells
    #[arg(short = 'r', long)]
    radius: Option<f32>,

    /// Seed for the first maze
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Options file (.json or rc format)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Glyph style
    #[arg(short = 'g', long, default_value_t = GraphicsMode::Auto)]
    graphics: GraphicsMode,

    /// Use colors for a light terminal background
    #[arg(long)]
    light: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let options = resolve_options(&args)?;
    let state = GameState::new(options, GameRng::from_entropy())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };
    let mut app = App::new(state, theme, args.graphics);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let state = app.state();
    info!(
        score = state.total_score(),
        moves = state.moves,
        won = state.is_won(),
        "session ended"
    );
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            if let Some(command) = app.handle_event(event) {
                app.execute(command);
            }
        }

        let now = Instant::now();
        app.advance_clock(now - last);
        last = now;

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("luminescence").join("luminescence.rc"))
}

/// File options (explicit path, else the default path if present), then CLI
/// overrides, then validation
fn resolve_options(args: &Args) -> io::Result<GameOptions> {
    let invalid = |e: lum_core::OptionsError| io::Error::new(io::ErrorKind::InvalidInput, e);

    let mut options = match &args.config {
        Some(path) => GameOptions::load_from_file(path).map_err(invalid)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => GameOptions::load_from_file(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable options file");
                GameOptions::default()
            }),
            None => GameOptions::default(),
        },
    };

    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(radius) = args.radius {
        options.light_radius = radius;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    options.validate().map_err(invalid)?;
    Ok(options)
}
