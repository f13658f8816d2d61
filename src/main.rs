mod app;
mod event;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use ditdah::config::Config;
use ditdah::engine::{PracticeMode, Statistics};
use ditdah::morse::{Symbol, code};
use ditdah::paddle::InputSource;
use ditdah::store::{JsonStore, KeyValueStore, MemoryStore};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::flash_card::FlashCardView;
use ui::components::practice_view::PracticeView;
use ui::components::reference_chart::ReferenceChart;
use ui::components::stats_dashboard::StatsDashboard;
use ui::components::timing_bar::TimingBarWidget;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "ditdah", version, about = "Terminal Morse code trainer")]
struct Cli {
    #[arg(short, long, help = "Keying speed in words per minute")]
    wpm: Option<u32>,

    #[arg(long, help = "Practice letters and digits only")]
    no_punctuation: bool,

    #[arg(long, help = "Directory for statistics and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ditdah")
    })
}

const LOG_FILTER_ENV: &str = "DITDAH_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn log_env() -> env_logger::Env<'static> {
    env_logger::Env::new().filter_or(LOG_FILTER_ENV, DEFAULT_LOG_FILTER)
}

/// Logs go to a file; stderr would scribble over the alternate screen.
fn init_logging(dir: &Path) {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("logging disabled: cannot create {}: {e}", dir.display());
        return;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("ditdah.log"))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled: {e}");
            return;
        }
    };
    let _ = env_logger::Builder::from_env(log_env())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_store(dir: PathBuf) -> Box<dyn KeyValueStore> {
    match JsonStore::with_base_dir(dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("statistics will not be saved this session: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = data_dir(&cli);
    init_logging(&data_dir);
    log::info!("ditdah {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("config unreadable, using defaults: {e:#}");
        Config::default()
    });
    if let Some(wpm) = cli.wpm {
        config.morse_speed = wpm;
    }
    if cli.no_punctuation {
        config.include_punctuation = false;
    }
    config.validate();

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = Theme::load(theme_name).unwrap_or_else(|| {
        log::warn!("unknown theme {theme_name}, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let stats = Statistics::load(open_store(data_dir), config.stats_options());
    let mut app = App::new(config, stats, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Release events are what make the spacebar usable as a paddle.
    app.keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    log::info!("keyboard release events: {}", app.keyboard_enhanced);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(16));

    let result = run_app(&mut terminal, &mut app, &events);
    app.shutdown();

    if app.keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
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
        app.tick(Instant::now());
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn paddle_active(app: &App) -> bool {
    app.screen == AppScreen::Practice && app.paddles.has_active()
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !paddle_active(app) {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.paddle_down(InputSource::Mouse),
        MouseEventKind::Up(MouseButton::Left) => app.paddle_up(InputSource::Mouse),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // The spacebar paddle needs press and release; auto-repeat is dropped by
    // the paddle itself.
    if key.code == KeyCode::Char(' ') && app.keyboard_enhanced && paddle_active(app) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => app.paddle_down(InputSource::Keyboard),
            KeyEventKind::Release => app.paddle_up(InputSource::Keyboard),
        }
        return;
    }

    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Study => handle_study_key(app, key),
        AppScreen::FlashCards => handle_flash_key(app, key),
        AppScreen::Reference => handle_reference_key(app, key),
        AppScreen::Statistics => handle_stats_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            if let Some(action) = app.menu.selected_action() {
                app.activate_menu(action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                app.activate_menu(action);
            }
        }
        _ => {}
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.study_menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.study_menu.next(),
        KeyCode::Enter => {
            if let Some(action) = app.study_menu.selected_action() {
                app.activate_menu(action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.study_menu.action_for_key(ch) {
                app.activate_menu(action);
            }
        }
        _ => {}
    }
}

fn handle_reference_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_study(),
        KeyCode::Tab | KeyCode::Right => app.next_reference_class(),
        KeyCode::Char(ch @ '1'..='3') => {
            app.select_reference_class(ch as usize - '1' as usize);
        }
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    let Some(mode) = app.practice.as_ref().map(|p| p.mode) else {
        app.go_to_menu();
        return;
    };
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Tab => app.skip(),
        KeyCode::F(2) => app.toggle_punctuation(),
        KeyCode::Up => app.adjust_speed(1),
        KeyCode::Down => app.adjust_speed(-1),
        KeyCode::Enter if mode == PracticeMode::SoundToChar => app.replay(),
        KeyCode::Char(ch) => match mode {
            PracticeMode::CharToMorse => {
                if let Some(symbol) = Symbol::from_char(ch) {
                    app.key_symbol(symbol);
                }
            }
            PracticeMode::MorseToChar | PracticeMode::SoundToChar => {
                if code::code_for(ch).is_some() {
                    app.guess(ch);
                }
            }
        },
        _ => {}
    }
}

fn handle_flash_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_study(),
        KeyCode::Char('m') => app.toggle_flash_mode(),
        KeyCode::Char('r') => app.rebuild_deck(),
        KeyCode::Char(ch @ ('a' | 'd' | 'p')) => app.toggle_flash_class(ch),
        _ => {
            let Some(deck) = app.deck.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => deck.flip(),
                KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
                    deck.next();
                }
                KeyCode::Left | KeyCode::Char('b') | KeyCode::Char('h') => {
                    deck.previous();
                }
                _ => {}
            }
        }
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    if app.confirm_clear {
        match key.code {
            KeyCode::Char('y') => app.clear_stats(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_clear = false,
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Tab | KeyCode::Right => app.next_stats_mode(),
        KeyCode::Char('c') => app.confirm_clear = true,
        KeyCode::Char(ch @ '1'..='3') => {
            let i = ch as usize - '1' as usize;
            app.stats_mode = PracticeMode::ALL[i];
        }
        _ => {}
    }
}

// --- rendering ---

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Study => render_study(frame, app),
        AppScreen::FlashCards => render_flash_cards(frame, app),
        AppScreen::Reference => render_reference(frame, app),
        AppScreen::Statistics => render_stats(frame, app),
    }

    render_toast(frame, app);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " ditdah ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, lines: Vec<String>) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let hints = pack_hint_lines(
        &["[1-4] Start", "[s] Stats", "[j/k] Move", "[Enter] Select", "[q] Quit"],
        area.width as usize,
    );
    let layout = AppLayout::new(area, hints.len() as u16);

    let header_info = format!(" | {} WPM", app.config.morse_speed);
    render_header(frame, app, layout.header, &header_info);

    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    render_footer(frame, app, layout.footer, hints);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(practice) = app.practice.as_ref() else {
        return;
    };

    let mut hints = vec!["[Esc] Menu", "[Tab] Skip", "[F2] Punctuation", "[↑/↓] Speed"];
    match practice.mode {
        PracticeMode::CharToMorse => {
            if app.keyboard_enhanced {
                hints.push("[Space/Mouse] Paddle");
            } else {
                hints.push("[Mouse] Paddle");
            }
            hints.push("[.] Dot  [-] Dash");
        }
        PracticeMode::SoundToChar => hints.push("[Enter] Replay"),
        PracticeMode::MorseToChar => {}
    }
    let hints = pack_hint_lines(&hints, area.width as usize);
    let layout = AppLayout::new(area, hints.len() as u16);

    let tracker = &practice.tracker;
    let punctuation = if practice.include_punctuation() { "on" } else { "off" };
    let mut header_info = format!(
        " | {} WPM | punctuation {punctuation} | session {}/{} ({:.1}%)",
        app.config.morse_speed,
        tracker.correct,
        tracker.total,
        tracker.accuracy()
    );
    if let Some(paddle) = app.paddles.active() {
        let info = paddle.timing().info();
        header_info.push_str(&format!(
            " | dot {} dash {} {}",
            info.dot_range, info.dash_range, info.tolerance
        ));
    }
    render_header(frame, app, layout.header, &header_info);

    let show_bar = app.paddles.has_active();
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if show_bar {
            vec![Constraint::Min(8), Constraint::Length(3)]
        } else {
            vec![Constraint::Min(8)]
        })
        .split(layout.main);

    let lamp = (practice.mode == PracticeMode::SoundToChar).then_some(app.lamp_on);
    let view = PracticeView::new(practice, app.feedback.as_ref(), lamp, app.theme);
    frame.render_widget(view, body[0]);

    if let (true, Some(paddle)) = (show_bar, app.paddles.active()) {
        let bar = TimingBarWidget::new(app.timing_bar, paddle.timing(), app.theme);
        frame.render_widget(bar, body[1]);
    }

    render_footer(frame, app, layout.footer, hints);
}

fn render_flash_cards(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let hints = pack_hint_lines(
        &[
            "[Esc] Back",
            "[Space] Flip",
            "[←/→] Prev/Next",
            "[m] Mode",
            "[a/d/p] Character types",
            "[r] Reshuffle",
        ],
        area.width as usize,
    );
    let layout = AppLayout::new(area, hints.len() as u16);
    render_header(frame, app, layout.header, " | Flash Cards");

    let classes = app.config.flash_card_classes();
    let view = FlashCardView::new(app.deck.as_ref(), app.deck_error.clone(), &classes, app.theme);
    frame.render_widget(view, ui::layout::centered_rect(60, 70, layout.main));

    render_footer(frame, app, layout.footer, hints);
}

fn render_study(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let hints = pack_hint_lines(
        &["[1-2] Open", "[j/k] Move", "[Enter] Select", "[Esc] Back"],
        area.width as usize,
    );
    let layout = AppLayout::new(area, hints.len() as u16);
    render_header(frame, app, layout.header, " | Study");

    let menu_area = ui::layout::centered_rect(50, 60, layout.main);
    frame.render_widget(&app.study_menu, menu_area);

    render_footer(frame, app, layout.footer, hints);
}

fn render_reference(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chart = ReferenceChart::new(app.reference_class, app.theme);
    frame.render_widget(chart, area);
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let dashboard = StatsDashboard::new(&app.stats, app.stats_mode, app.confirm_clear, app.theme);
    frame.render_widget(dashboard, area);
}

fn render_toast(frame: &mut ratatui::Frame, app: &App) {
    let Some((toast, _)) = app.toast.as_ref() else {
        return;
    };
    let colors = &app.theme.colors;
    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height + 3),
        width,
        height,
    );
    let color = if toast.positive {
        colors.success()
    } else {
        colors.warning()
    };
    Clear.render(rect, frame.buffer_mut());
    Paragraph::new(Span::styled(toast.message.as_str(), Style::default().fg(color)))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(colors.bg())),
        )
        .render(rect, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_is_warn() {
        assert_eq!(DEFAULT_LOG_FILTER, "warn");
        let logger = env_logger::Builder::from_env(log_env()).build();
        if std::env::var_os(LOG_FILTER_ENV).is_none() {
            assert_eq!(logger.filter(), log::LevelFilter::Warn);
        }
    }
}
