use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::key_stats::ProblematicKeyTally;
use crate::engine::stats::SessionStats;
use crate::engine::stopwatch::Stopwatch;
use crate::generator::import::{self, Fetch, HttpFetcher};
use crate::generator::practice::PracticeSetGenerator;
use crate::generator::{self, samples};
use crate::mode::Mode;
use crate::session::cursor::CursorPosition;
use crate::session::drill::TypingSession;
use crate::session::input::{self, KeyInput, Step};
use crate::session::result::RoundResult;
use crate::session::target::TargetText;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// URLs are short; pasted prose is bounded by the paste limit instead.
const URL_INPUT_LIMIT: usize = 2048;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Import,
    Result,
}

pub struct App {
    pub screen: AppScreen,
    pub mode: Mode,
    pub config: Config,
    pub theme: &'static Theme,
    pub session: TypingSession,
    pub tally: ProblematicKeyTally,
    pub stopwatch: Stopwatch,
    pub last_result: Option<RoundResult>,
    pub source_info: Option<String>,
    pub caps_lock: bool,
    /// Blocking message; the next key press dismisses it.
    pub notice: Option<String>,
    pub import_input: Option<LineInput>,
    pub should_quit: bool,
    practice: PracticeSetGenerator,
    fetcher: Box<dyn Fetch>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using default"
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_secs));
        Self::with_parts(config, theme, Box::new(fetcher), SmallRng::from_entropy())
    }

    pub fn with_parts(
        config: Config,
        theme: &'static Theme,
        fetcher: Box<dyn Fetch>,
        rng: SmallRng,
    ) -> Self {
        let practice = PracticeSetGenerator::new(rng).with_layout(
            config.practice_line_width,
            config.practice_lines,
            config.practice_key_count,
        );
        let mode = config.default_mode;
        let mut app = Self {
            screen: AppScreen::Typing,
            mode,
            config,
            theme,
            session: TypingSession::new(TargetText::default()),
            tally: ProblematicKeyTally::default(),
            stopwatch: Stopwatch::default(),
            last_result: None,
            source_info: None,
            caps_lock: false,
            notice: None,
            import_input: None,
            should_quit: false,
            practice,
            fetcher,
        };
        app.set_mode(mode);
        app
    }

    /// Switch modes. The tally describes the mode it was collected in, so
    /// it is cleared; entering practice first turns it into a drill.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Practice => {
                let target = self.practice.generate(&self.tally);
                self.tally.clear();
                self.start(target, Some("Problem keys".to_string()));
            }
            _ => {
                self.tally.clear();
                match samples::default_text(mode) {
                    Some((text, label)) => self.load_text(text, label),
                    None => self.start(TargetText::default(), None),
                }
            }
        }
        info!(mode = mode.as_str(), chars = self.session.target().len(), "mode selected");
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        let next = if forward { self.mode.next() } else { self.mode.prev() };
        self.set_mode(next);
    }

    /// True once any key has moved or marked the session.
    pub fn round_started(&self) -> bool {
        self.session.current_index() > 0 || self.session.error_count() > 0
    }

    /// Tab cycles modes until the first key of a round lands. After that
    /// it is typed like any other key, so an indentation habit in code
    /// mode costs a miss rather than the whole session.
    pub fn tab(&mut self, forward: bool, now: Instant) {
        if self.screen == AppScreen::Typing && self.round_started() {
            if forward {
                self.type_key(KeyInput::Char('\t'), now);
            }
            return;
        }
        self.cycle_mode(forward);
    }

    /// Normalise `raw` for the current mode and type against it.
    pub fn load_text(&mut self, raw: &str, source: &str) {
        let target = generator::normalize(raw, self.mode, self.config.prose_width);
        self.start(target, Some(source.to_string()));
    }

    /// Same text, fresh session.
    pub fn restart(&mut self) {
        let target = self.session.target().clone();
        let source = self.source_info.take();
        self.start(target, source);
    }

    fn start(&mut self, target: TargetText, source: Option<String>) {
        self.session = TypingSession::new(target);
        self.stopwatch.reset();
        self.source_info = source;
        self.last_result = None;
        self.import_input = None;
        self.screen = AppScreen::Typing;
    }

    pub fn type_key(&mut self, key: KeyInput, now: Instant) {
        if self.screen != AppScreen::Typing {
            return;
        }
        let Some(progress) = input::apply(&mut self.session, key, &mut self.tally) else {
            return;
        };
        self.stopwatch
            .observe(progress.index, self.session.is_complete(), now);
        if progress.step == Step::Completed {
            self.finish(now);
        }
    }

    fn finish(&mut self, now: Instant) {
        let result =
            RoundResult::from_session(self.mode, &self.session, &self.stopwatch, &self.tally, now);
        info!(
            mode = self.mode.as_str(),
            wpm = result.stats.wpm,
            accuracy = result.stats.accuracy,
            secs = result.stats.elapsed_secs,
            "round complete"
        );
        self.last_result = Some(result);
        self.screen = AppScreen::Result;
    }

    /// Leave the results screen: practice gets a fresh set built from
    /// what was missed so far, other modes retype the same text.
    pub fn next_round(&mut self) {
        match self.mode {
            Mode::Practice => {
                let target = self.practice.generate(&self.tally);
                self.start(target, Some("Problem keys".to_string()));
            }
            _ => self.restart(),
        }
    }

    pub fn open_import(&mut self) {
        if !self.mode.accepts_import() {
            self.notice = Some("Practice text is generated from your mistakes".to_string());
            return;
        }
        self.import_input = Some(LineInput::new("", self.import_limit()));
        self.screen = AppScreen::Import;
    }

    pub fn import_limit(&self) -> usize {
        match self.mode {
            Mode::Prose => self.config.paste_limit,
            _ => URL_INPUT_LIMIT,
        }
    }

    pub fn cancel_import(&mut self) {
        self.import_input = None;
        self.screen = AppScreen::Typing;
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(input) = self.import_input.as_mut() {
            input.insert_str(text);
        }
    }

    /// On failure the current text stays in place and a notice explains why.
    pub fn submit_import(&mut self) {
        let Some(input) = self.import_input.take() else {
            return;
        };
        let value = input.value();
        let imported = match self.mode {
            Mode::Prose => import::import_pasted(&value, self.config.paste_limit)
                .map(|text| (text, "Pasted text".to_string())),
            _ => import::import_url(self.fetcher.as_ref(), &value, self.config.fetch_line_limit)
                .map(|text| (text, value.trim().to_string())),
        };
        self.screen = AppScreen::Typing;
        match imported {
            Ok((text, source)) => {
                info!(mode = self.mode.as_str(), %source, "imported text");
                self.load_text(&text, &source);
            }
            Err(err) => {
                warn!(mode = self.mode.as_str(), %err, "import failed");
                self.notice = Some(format!("Import failed: {err}"));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn stats(&self, now: Instant) -> SessionStats {
        SessionStats::from_session(&self.session, &self.stopwatch, now)
    }

    pub fn cursor(&self) -> CursorPosition {
        self.session.cursor_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::import::ImportError;
    use crate::generator::practice::DEFAULT_PRACTICE_KEYS;

    struct StubFetcher(Result<String, ImportError>);

    impl Fetch for StubFetcher {
        fn fetch(&self, _url: &str) -> Result<String, ImportError> {
            self.0.clone()
        }
    }

    fn app_with(mode: Mode, fetched: Result<String, ImportError>) -> App {
        let config = Config {
            default_mode: mode,
            ..Config::default()
        };
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        App::with_parts(
            config,
            theme,
            Box::new(StubFetcher(fetched)),
            SmallRng::seed_from_u64(3),
        )
    }

    fn app(mode: Mode) -> App {
        app_with(mode, Err(ImportError::NetworkDisabled))
    }

    fn type_str(app: &mut App, text: &str, now: Instant) {
        for ch in text.chars() {
            let key = if ch == '\n' { KeyInput::Enter } else { KeyInput::Char(ch) };
            app.type_key(key, now);
        }
    }

    #[test]
    fn test_starts_with_default_prose() {
        let app = app(Mode::Prose);
        assert_eq!(app.screen, AppScreen::Typing);
        assert!(app.session.target().to_string().starts_with("My father's family name"));
        assert_eq!(app.source_info.as_deref(), Some("Great Expectations"));
    }

    #[test]
    fn test_complete_round_shows_result() {
        let mut app = app(Mode::Prose);
        app.load_text("cat", "test");
        let t0 = Instant::now();
        type_str(&mut app, "cxat", t0);
        assert_eq!(app.screen, AppScreen::Result);
        let result = app.last_result.as_ref().unwrap();
        assert_eq!(result.errors, 1);
        assert_eq!(result.stats.accuracy, 67);
    }

    #[test]
    fn test_keys_ignored_outside_typing_screen() {
        let mut app = app(Mode::Prose);
        app.load_text("ab", "test");
        app.open_import();
        app.type_key(KeyInput::Char('a'), Instant::now());
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_mode_switch_clears_tally_and_timer() {
        let mut app = app(Mode::Prose);
        app.load_text("abc", "test");
        let t0 = Instant::now();
        type_str(&mut app, "ax", t0);
        assert!(!app.tally.is_empty());
        assert!(app.stopwatch.is_running());

        app.cycle_mode(true);
        assert_eq!(app.mode, Mode::Code);
        assert!(app.tally.is_empty());
        assert!(!app.stopwatch.is_running());
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_tab_mid_round_is_a_miss() {
        let mut app = app(Mode::Code);
        app.load_text("if x:\n    y\n", "test");
        let t0 = Instant::now();
        type_str(&mut app, "if x:\n", t0);

        app.tab(true, t0);
        assert_eq!(app.mode, Mode::Code);
        assert_eq!(app.session.current_index(), 6);
        assert!(app.session.is_error(6));
        assert_eq!(app.tally.count(' '), 1);
        assert!(app.stopwatch.is_running());

        app.tab(false, t0);
        assert_eq!(app.mode, Mode::Code);
        assert_eq!(app.tally.count(' '), 1);
    }

    #[test]
    fn test_tab_before_typing_cycles_modes() {
        let mut app = app(Mode::Prose);
        app.tab(true, Instant::now());
        assert_eq!(app.mode, Mode::Code);
        app.tab(false, Instant::now());
        assert_eq!(app.mode, Mode::Prose);

        // a wrong first key already counts as started
        app.type_key(KeyInput::Char('#'), Instant::now());
        app.tab(true, Instant::now());
        assert_eq!(app.mode, Mode::Prose);
    }

    #[test]
    fn test_tab_on_results_cycles_modes() {
        let mut app = app(Mode::Prose);
        app.load_text("ab", "test");
        type_str(&mut app, "ab", Instant::now());
        assert_eq!(app.screen, AppScreen::Result);
        app.tab(true, Instant::now());
        assert_eq!(app.mode, Mode::Code);
        assert_eq!(app.screen, AppScreen::Typing);
    }

    #[test]
    fn test_practice_uses_previous_mistakes() {
        let mut app = app(Mode::Prose);
        app.load_text("q", "test");
        let t0 = Instant::now();
        type_str(&mut app, "w", t0);
        assert_eq!(app.tally.count('q'), 1);

        app.set_mode(Mode::Practice);
        let target = app.session.target();
        assert!(!target.is_empty());
        assert!(target.chars().iter().all(|&c| c == 'q' || c == ' ' || c == '\n'));
        assert!(app.tally.is_empty());
    }

    #[test]
    fn test_practice_without_mistakes_uses_defaults() {
        let app = app(Mode::Practice);
        assert!(
            app.session
                .target()
                .chars()
                .iter()
                .all(|c| *c == ' ' || *c == '\n' || DEFAULT_PRACTICE_KEYS.contains(c))
        );
        assert_eq!(app.session.target().line_count(), 5);
    }

    #[test]
    fn test_practice_result_lists_problem_keys_and_next_round() {
        let mut app = app(Mode::Practice);
        let text = app.session.target().to_string();
        let t0 = Instant::now();
        let first = text.chars().next().unwrap();
        app.type_key(KeyInput::Char('x'), t0);
        type_str(&mut app, &text, t0);
        assert_eq!(app.screen, AppScreen::Result);
        let result = app.last_result.clone().unwrap();
        assert_eq!(result.problem_keys[0].key, first);
        assert_eq!(result.problem_keys[0].count, 1);

        app.next_round();
        assert_eq!(app.screen, AppScreen::Typing);
        assert!(app.session.target().chars().iter().all(|&c| c == first || c == ' ' || c == '\n'));
    }

    #[test]
    fn test_restart_keeps_text() {
        let mut app = app(Mode::Prose);
        app.load_text("hello", "test");
        type_str(&mut app, "he", Instant::now());
        app.restart();
        assert_eq!(app.session.current_index(), 0);
        assert_eq!(app.session.target().to_string(), "hello");
        assert_eq!(app.source_info.as_deref(), Some("test"));
    }

    #[test]
    fn test_import_paste_replaces_text() {
        let mut app = app(Mode::Prose);
        app.open_import();
        assert_eq!(app.screen, AppScreen::Import);
        app.paste("Some pasted words");
        app.submit_import();
        assert_eq!(app.screen, AppScreen::Typing);
        assert_eq!(app.session.target().to_string(), "Some pasted words");
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_import_empty_paste_keeps_text() {
        let mut app = app(Mode::Prose);
        let before = app.session.target().clone();
        app.open_import();
        app.submit_import();
        assert_eq!(app.session.target(), &before);
        assert!(app.notice.as_deref().unwrap().starts_with("Import failed"));
    }

    #[test]
    fn test_import_url_in_code_mode() {
        let mut app = app_with(Mode::Code, Ok("fn main() {\n\tok();\n}\n".to_string()));
        app.open_import();
        app.paste("https://github.com/a/b/blob/main/src/main.rs");
        app.submit_import();
        assert_eq!(app.session.target().to_string(), "fn main() {\n    ok();\n}\n");
        assert_eq!(
            app.source_info.as_deref(),
            Some("https://github.com/a/b/blob/main/src/main.rs")
        );
    }

    #[test]
    fn test_import_fetch_failure_shows_notice() {
        let mut app = app_with(Mode::Code, Err(ImportError::Status(404)));
        let before = app.session.target().clone();
        app.open_import();
        app.paste("https://example.com/missing.py");
        app.submit_import();
        assert_eq!(app.session.target(), &before);
        assert_eq!(
            app.notice.as_deref(),
            Some("Import failed: server responded with status 404")
        );
        app.dismiss_notice();
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_import_not_offered_in_practice() {
        let mut app = app(Mode::Practice);
        app.open_import();
        assert_eq!(app.screen, AppScreen::Typing);
        assert!(app.import_input.is_none());
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_cancel_import() {
        let mut app = app(Mode::Prose);
        app.open_import();
        app.cancel_import();
        assert_eq!(app.screen, AppScreen::Typing);
        assert!(app.import_input.is_none());
    }

    #[test]
    fn test_cursor_follows_lines() {
        let mut app = app(Mode::Code);
        app.load_text("ab\ncd", "test");
        type_str(&mut app, "ab\nc", Instant::now());
        let cursor = app.cursor();
        assert_eq!((cursor.line, cursor.column), (1, 1));
    }
}
