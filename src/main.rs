use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

use socwatch::app::App;
use socwatch::data::SentinelState;
use socwatch::events;
use socwatch::settings::Settings;
use socwatch::source::{FileSource, HttpSource, StatusSource};
use socwatch::ui;

#[derive(Parser, Debug)]
#[command(name = "socwatch")]
#[command(about = "Live SOC dashboard watching sentinel lockdown status for a monitored account")]
struct Args {
    /// Base URL of the status endpoint
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Monitored subject identifier
    #[arg(short, long)]
    subject: Option<String>,

    /// Poll a JSON status file instead of the HTTP endpoint
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Poll interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Path to a settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial traffic counter value
    #[arg(long)]
    traffic_seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(subject) = args.subject {
        settings.subject = subject;
    }
    if let Some(interval) = args.interval {
        settings.interval_secs = interval;
    }
    if let Some(seed) = args.traffic_seed {
        settings.traffic_seed = seed;
    }

    if let Some(ref path) = args.log_file {
        init_diagnostics(path)?;
    }

    let sentinel = SentinelState::new(settings.subject.clone(), settings.traffic_seed);
    let interval = Duration::from_secs(settings.interval_secs.max(1));

    // File mode needs no async runtime.
    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path)) as Box<dyn StatusSource>;
        return run_tui(source, sentinel, interval);
    }

    // HTTP mode: the runtime lives here so the background poller outlives
    // every TUI frame and dies with the process.
    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async {
        Box::new(HttpSource::spawn(
            &settings.endpoint,
            &settings.subject,
            interval,
        )) as Box<dyn StatusSource>
    });

    // The poll cadence lives in the source; the TUI just drains quickly.
    run_tui(source, sentinel, Duration::from_millis(100))
}

/// Route diagnostic tracing to a file; the terminal belongs to the TUI.
fn init_diagnostics(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("socwatch=debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the TUI with the given status source
fn run_tui(
    source: Box<dyn StatusSource>,
    sentinel: SentinelState,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and pick up anything the poller already delivered
    let mut app = App::new(source, sentinel);
    let _ = app.refresh();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let y = (area.height / 2).saturating_sub(2);
                let centered =
                    ratatui::layout::Rect::new(0, y, area.width, 5u16.min(area.height - y));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(6),    // Panels
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with posture and traffic
            ui::common::render_header(frame, app, chunks[0]);

            // Status panel on the left, log stream on the right
            let panels =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[1]);
            ui::status::render(frame, app, panels[0]);
            ui::logs::render(frame, app, panels[1]);

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain the source periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
