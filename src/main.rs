use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyEventState,
    KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use tracing::{error, info, warn};

use cotype::app::{App, AppScreen};
use cotype::config::Config;
use cotype::event::{self, AppEvent, EventHandler};
use cotype::logging;
use cotype::mode::Mode;
use cotype::ui::components::dashboard::Dashboard;
use cotype::ui::components::mode_tabs::ModeTabs;
use cotype::ui::components::popup::{ImportPrompt, Notice};
use cotype::ui::components::progress_bar::ProgressBar;
use cotype::ui::components::stats_bar::StatsBar;
use cotype::ui::components::typing_area::TypingArea;
use cotype::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use cotype::ui::line_input::InputResult;
use cotype::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "cotype",
    version,
    about = "Terminal typing practice for prose, code and the keys you keep missing"
)]
struct Cli {
    #[arg(short, long, value_enum, help = "Mode to start in")]
    mode: Option<Mode>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, value_name = "FILE", help = "Start with the text in FILE")]
    text: Option<PathBuf>,

    #[arg(short, long, help = "Wrap prose at this many columns")]
    width: Option<usize>,

    #[arg(long, value_name = "FILE", help = "Write logs to FILE (filter with COTYPE_LOG)")]
    log: Option<PathBuf>,

    #[arg(long, help = "Store the mode, theme and width given here as the new defaults")]
    save_config: bool,

    #[arg(long, help = "Print the bundled theme names and exit")]
    list_themes: bool,
}

/// Command-line values win over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(width) = cli.width {
        config.prose_width = width;
    }
    config.normalize();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        let mut names = Theme::available_themes();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let _log_guard = match logging::log_path(cli.log.clone()) {
        Some(path) => logging::init(&path)?,
        None => None,
    };

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(%err, "could not read config, using defaults");
        Config::default()
    });
    apply_overrides(&mut config, &cli);
    if cli.save_config {
        config
            .save()
            .with_context(|| format!("saving {}", Config::config_path().display()))?;
        info!(path = %Config::config_path().display(), "config saved");
    }

    let initial_text = match cli.text.as_deref() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Some((text, label))
        }
        None => None,
    };

    let mut app = App::new(config);
    if let Some((text, label)) = initial_text {
        app.load_text(&text, &label);
    }
    info!(mode = app.mode.as_str(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Release events and the caps-lock state are only reported by terminals
    // that speak the kitty keyboard protocol.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(app.config.tick_rate_ms));

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(%err, "exiting on error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            // redraw only: the clock moves even when nobody types
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore Repeat so a held key is not typed over and over
    if key.kind != KeyEventKind::Press {
        return;
    }
    app.caps_lock = key.state.contains(KeyEventState::CAPS_LOCK);

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.notice.is_some() {
        app.dismiss_notice();
        return;
    }

    match app.screen {
        AppScreen::Typing => handle_typing_key(app, key),
        AppScreen::Import => handle_import_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.tab(true, Instant::now()),
        KeyCode::BackTab => app.tab(false, Instant::now()),
        KeyCode::Char('r') if ctrl => app.restart(),
        KeyCode::Char('o') if ctrl => app.open_import(),
        _ => {
            if let Some(input) = event::key_input(&key) {
                app.type_key(input, Instant::now());
            }
        }
    }
}

fn handle_import_key(app: &mut App, key: KeyEvent) {
    let Some(input) = app.import_input.as_mut() else {
        app.cancel_import();
        return;
    };
    match input.handle(key) {
        InputResult::Submit => app.submit_import(),
        InputResult::Cancel => app.cancel_import(),
        InputResult::Continue => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.next_round(),
        KeyCode::Char('r') if ctrl => app.restart(),
        KeyCode::Tab => app.tab(true, Instant::now()),
        KeyCode::BackTab => app.tab(false, Instant::now()),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    let layout = AppLayout::new(area);
    frame.render_widget(
        ModeTabs::new(app.mode, app.caps_lock, app.theme),
        layout.header,
    );

    let typing = TypingArea::new(&app.session, app.theme).title(app.source_info.as_deref());
    frame.render_widget(typing, layout.main);

    let stats = app.stats(Instant::now());
    frame.render_widget(
        StatsBar::new(stats, app.session.error_count(), app.theme),
        layout.stats,
    );

    if let Some(progress_area) = layout.progress {
        frame.render_widget(ProgressBar::new(&app.session, app.theme), progress_area);
    }

    render_footer(frame, app, layout.footer);

    match app.screen {
        AppScreen::Result => {
            if let Some(ref result) = app.last_result {
                let popup = centered_rect(50, 60, 44, 16, area);
                frame.render_widget(Clear, popup);
                frame.render_widget(Dashboard::new(result, app.theme), popup);
            }
        }
        AppScreen::Import => {
            if let Some(ref input) = app.import_input {
                let popup = centered_rect(70, 40, 50, 9, area);
                let prompt = ImportPrompt::new(input, app.mode, app.import_limit(), app.theme);
                frame.render_widget(prompt, popup);
            }
        }
        AppScreen::Typing => {}
    }

    if let Some(ref message) = app.notice {
        let popup = centered_rect(50, 20, 40, 6, area);
        frame.render_widget(Notice::new(message, app.theme), popup);
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, footer: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let hints: &[&str] = match app.screen {
        AppScreen::Typing if app.round_started() && app.mode.accepts_import() => {
            &["[Ctrl+R] Restart", "[Ctrl+O] Import", "[Esc] Quit"]
        }
        AppScreen::Typing if app.round_started() => &["[Ctrl+R] Restart", "[Esc] Quit"],
        AppScreen::Typing if app.mode.accepts_import() => &[
            "[Tab] Mode",
            "[Ctrl+R] Restart",
            "[Ctrl+O] Import",
            "[Esc] Quit",
        ],
        AppScreen::Typing => &["[Tab] Mode", "[Ctrl+R] Restart", "[Esc] Quit"],
        AppScreen::Import => &["[Enter] Load", "[Esc] Cancel"],
        AppScreen::Result => &["[Enter] Continue", "[Tab] Mode", "[Esc] Quit"],
    };
    let line = pack_hint_lines(hints, footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let paragraph = Paragraph::new(Line::from(Span::styled(
        line,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(paragraph, footer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["cotype", "--mode", "code", "-t", "gruvbox-dark", "-w", "5"])
            .unwrap();
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.default_mode, Mode::Code);
        assert_eq!(config.theme, "gruvbox-dark");
        // clamped like a hand-edited file
        assert_eq!(config.prose_width, 20);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_saved_overrides_reload() {
        let cli = Cli::try_parse_from(["cotype", "--save-config", "--mode", "practice"]).unwrap();
        assert!(cli.save_config);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotype").join("config.toml");
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_mode, Mode::Practice);
        assert_eq!(loaded.theme, config.theme);
    }

    #[test]
    fn test_list_themes_flag() {
        let cli = Cli::try_parse_from(["cotype", "--list-themes"]).unwrap();
        assert!(cli.list_themes);
        assert!(Theme::available_themes().iter().any(|n| n == "catppuccin-mocha"));
    }
}
