mod actions;
mod app;
mod geometry;
mod ui;
mod util;

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::actions::{execute_action, Session};
use crate::app::App;
use crate::util::resolve_source;
use leadboard_grid::GridConfig;

#[derive(Debug, Parser)]
#[command(name = "leadboard-tui", version, about = "leadboard TUI")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Lead payload path or http(s) URL; overrides `data_source`
    #[arg(long)]
    source: Option<String>,
    /// Write tracing output here; logging is off otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = leadboard_config::load(args.config).with_context(|| "load config")?;
    let location = resolve_source(args.source.as_deref(), config.data_source.as_deref())?;
    let export_dir = match config.export_dir.clone() {
        Some(dir) => dir,
        None => env::current_dir().with_context(|| "resolve current directory")?,
    };
    let session = Session {
        location,
        export_dir,
    };

    let mut app = App::new(&GridConfig {
        page_size: config.page_size,
        page_overflow: config.page_overflow,
        column_widths: config.column_widths,
    });

    let mut terminal = TerminalGuard::new()?;
    let result = run_app(&mut terminal, &session, &mut app);
    app.teardown();
    result
}

fn run_app(terminal: &mut TerminalGuard, session: &Session, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    // Paint the loading panel before the blocking fetch.
    refresh_layout(terminal, app)?;
    terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

    loop {
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, session, action) {
                app.set_error(format!("{:#}", err));
            }
        }

        refresh_layout(terminal, app)?;
        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn refresh_layout(terminal: &mut TerminalGuard, app: &mut App) -> Result<()> {
    let size = terminal.terminal_mut().size()?;
    app.set_table_area(ui::table_area(Rect::new(0, 0, size.width, size.height)));
    Ok(())
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
