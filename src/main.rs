//! Scroll-driven text reveal in the terminal.
//!
//! Run the binary to scroll through a page with two animated paragraphs.
//! Run with `--clip-at <PROGRESS>` to print the overlay style for a given
//! progress and exit, or with `--save-config` to write the effective
//! settings to the config file.

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};
use tracing::info;

use scroll_reveal::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    page::{LOREM, SECOND_PARAGRAPH},
    state::{AppState, BlockSpec},
};
use scroll_reveal::config::AppConfig;
use scroll_reveal::core::{
    geometry,
    metrics::LineMetrics,
    progress::AnimationConfig,
    style::OverlayStyle,
};
use scroll_reveal::ui::{
    debug_panel::DebugPanel,
    layout::AppLayout,
    page_widget::PageWidget,
    theme::{Palette, Theme},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven line-by-line text reveal")]
struct Cli {
    /// Text file for the first paragraph (defaults to lorem ipsum).
    #[arg(long)]
    text: Option<PathBuf>,

    /// Fraction of the viewport height where the reveal starts.
    #[arg(long)]
    start_offset: Option<f64>,

    /// Fraction of the element height scrolled past the top when the
    /// reveal completes.
    #[arg(long)]
    end_offset: Option<f64>,

    /// Document-scroll fraction before which nothing is revealed.
    #[arg(long)]
    min_threshold: Option<f64>,

    /// Document-scroll fraction by which the reveal is complete.
    #[arg(long)]
    max_threshold: Option<f64>,

    /// Overlay transition duration in milliseconds.
    #[arg(long = "duration-ms")]
    duration_ms: Option<u64>,

    /// Print the overlay style for this progress and exit.
    #[arg(long, value_name = "PROGRESS")]
    clip_at: Option<f64>,

    /// Line count used with `--clip-at`.
    #[arg(long, default_value_t = 5)]
    lines: u32,

    /// Line height used with `--clip-at`.
    #[arg(long, default_value_t = 20.0)]
    line_height: f64,

    /// Write the effective settings (file + flags) to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Flags win over the config file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(v) = self.start_offset {
            config.start_offset = v;
        }
        if let Some(v) = self.end_offset {
            config.end_offset = v;
        }
        if self.min_threshold.is_some() {
            config.min_threshold = self.min_threshold;
        }
        if self.max_threshold.is_some() {
            config.max_threshold = self.max_threshold;
        }
        if let Some(v) = self.duration_ms {
            config.transition_ms = v;
        }
    }
}

// ───────────────────────────────────────── rendering ─────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    frame.render_widget(PageWidget::new(state), layout.page_area);

    let status = Paragraph::new(handler::status_bar_hint(state)).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.show_debug {
        if let Some(block) = state.blocks.first() {
            let animation = block.animation.borrow();
            frame.render_widget(DebugPanel { animation: &animation }, layout.debug_area);
        }
    }
}

/// The demo's second paragraph: its own offsets, shared gating and timing.
fn second_block_config(first: &AnimationConfig) -> Result<AnimationConfig> {
    let config = AnimationConfig::new(0.7, 0.3)?.with_transition_ms(first.transition_duration_ms());
    Ok(match first.thresholds() {
        Some(w) => config.with_thresholds(w.min, w.max)?,
        None => config,
    })
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply_overrides(&mut config);
    let animation = config.animation().context("invalid animation settings")?;

    if cli.save_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── headless mode ─────────────────────────────────────────
    if let Some(progress) = cli.clip_at {
        let lines = LineMetrics::new(cli.line_height, cli.lines);
        let style = OverlayStyle::new(
            geometry::line_reveal(progress, &lines),
            animation.transition_duration_ms(),
        );
        println!("{}", style.to_css());
        return Ok(());
    }

    let text = match &cli.text {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => LOREM.to_string(),
    };
    let specs = vec![
        BlockSpec {
            text,
            animation,
            palette: Palette::BLUE,
        },
        BlockSpec {
            text: SECOND_PARAGRAPH.to_string(),
            animation: second_block_config(&animation)?,
            palette: Palette::GREEN,
        },
    ];

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let page = AppLayout::from_area(Rect::new(0, 0, size.width, size.height)).page_area;
    let frame_interval = Duration::from_millis(config.frame_ms);
    let mut state = AppState::new(config, specs, page.width, page.height);
    info!(
        width = page.width,
        height = page.height,
        doc_height = state.layout.doc_height,
        "page ready"
    );

    let mut events = spawn_event_reader(frame_interval);
    let mut needs_draw = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        if needs_draw {
            terminal.draw(|frame| draw(frame, &state))?;
            needs_draw = false;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => {
                handler::handle_key(&mut state, k);
                needs_draw = true;
            }
            AppEvent::Mouse(m) => {
                handler::handle_mouse(&mut state, m);
                needs_draw = true;
            }
            AppEvent::Resize(w, h) => {
                let page = AppLayout::from_area(Rect::new(0, 0, w, h)).page_area;
                state.relayout(page.width, page.height);
                needs_draw = true;
            }
            AppEvent::Frame(dt) => {
                // Recompute happens here, once per tick, however many
                // scroll events arrived since the last one.
                needs_draw |= state.on_frame(dt);
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
