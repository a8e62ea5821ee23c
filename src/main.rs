mod app;
mod audio;
mod config;
mod dataset;
mod event;
mod session;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, AudioStatus};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::advance_prompt::AdvancePrompt;
use ui::components::attempt_row::AttemptRow;
use ui::components::feedback::FeedbackBanner;
use ui::components::progress_bar::ProgressBar;
use ui::components::tile_board::TileBoard;
use ui::layout::{LayoutTier, PracticeLayout};

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "stavr", version, about = "Terminal spelling trainer for kids")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Word list JSON file")]
    words: Option<PathBuf>,

    #[arg(short, long, help = "Bundled word pack (en, de)")]
    pack: Option<String>,

    #[arg(short, long, help = "Interface language (en, de)")]
    locale: Option<String>,

    #[arg(short, long, help = "Disable all sound")]
    mute: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!("config unreadable, using defaults: {err}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(words) = cli.words {
        config.words_file = Some(words.to_string_lossy().to_string());
    }
    if let Some(pack) = cli.pack {
        config.word_pack = pack;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if cli.mute {
        config.audio_enabled = false;
    }
    config.normalize_locale(&rust_i18n::available_locales!());
    rust_i18n::set_locale(&config.locale);

    let words = app::load_words(&config)?;
    let mut app = App::new(config, words);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Route the log stream to a file under the data dir; the terminal itself is
/// owned by the TUI. Filter via STAVR_LOG, default "info".
fn init_logging() {
    let Some(dir) = dirs::data_dir() else { return };
    let dir = dir.join("stavr");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("stavr.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("STAVR_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
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
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick => app.tick(),
            AppEvent::Redraw => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events, ignore Repeat/Release to avoid double input
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::NoWords => handle_no_words_key(app, key),
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if app.is_locked() {
                app.advance();
            } else {
                app.check();
            }
        }
        KeyCode::Backspace => app.remove_last(),
        KeyCode::Esc => app.clear_attempt(),
        KeyCode::Char(' ') => app.play_word(),
        KeyCode::Char(ch) => {
            let ch = ch.to_lowercase().next().unwrap_or(ch);
            app.append_letter(ch);
        }
        _ => {}
    }
}

fn handle_no_words_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    if app.screen != AppScreen::Practice {
        return;
    }
    let Ok((width, height)) = crossterm::terminal::size() else {
        return;
    };
    let area = Rect::new(0, 0, width, height);
    let pos = Position::new(mouse.column, mouse.row);
    let layout = PracticeLayout::new(area);

    if app.is_locked() && ui::layout::prompt_rect(area).contains(pos) {
        app.advance();
        return;
    }
    if layout.speaker_zone().contains(pos) {
        app.play_word();
        return;
    }
    if layout.board.contains(pos) {
        let count = app.word.as_ref().map_or(0, |w| w.tiles.len());
        if let Some(tile) = ui::layout::tile_rects(layout.board, count)
            .iter()
            .position(|rect| rect.contains(pos))
        {
            app.append_tile(tile);
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::NoWords => render_no_words(frame, app),
    }
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let Some(ref word) = app.word else { return };

    let layout = PracticeLayout::new(area);

    let mut header_spans = vec![Span::styled(
        " stavr ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    if layout.tier == LayoutTier::Wide {
        header_spans.push(Span::styled(
            format!(" {}", t!("header.summary", total = app.words.len())),
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    render_word_bar(frame, app, &layout);

    frame.render_widget(&TileBoard::new(word, app.theme), layout.board);
    frame.render_widget(
        &AttemptRow::new(word, app.shake_offset(), app.theme),
        layout.attempt,
    );
    frame.render_widget(&FeedbackBanner::new(&word.feedback, app.theme), layout.feedback);

    if let Some(progress_area) = layout.progress {
        frame.render_widget(
            ProgressBar::new(app.progress.index + 1, app.words.len(), app.theme),
            progress_area,
        );
    }

    let hints = if app.is_locked() {
        t!("footer.locked")
    } else {
        t!("footer.practice")
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {hints}"),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout.footer);

    if app.is_locked() {
        let popup = ui::layout::prompt_rect(area);
        frame.render_widget(&AdvancePrompt::new(&word.target_string(), app.theme), popup);
    }
}

fn render_word_bar(frame: &mut ratatui::Frame, app: &App, layout: &PracticeLayout) {
    let colors = &app.theme.colors;

    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(layout.word_bar);
    frame.render_widget(block, layout.word_bar);

    let (speaker_text, speaker_color) = match app.audio_status {
        AudioStatus::Ready => (t!("audio.play"), colors.accent()),
        AudioStatus::Muted => (t!("audio.muted"), colors.text_dim()),
        AudioStatus::Unavailable => (t!("audio.unavailable"), colors.text_dim()),
    };

    let mut spans = vec![Span::styled(
        format!(" {speaker_text} "),
        Style::default()
            .fg(speaker_color)
            .add_modifier(Modifier::BOLD),
    )];
    if layout.tier != LayoutTier::Narrow {
        let position = t!(
            "header.word_position",
            current = app.progress.index + 1,
            total = app.words.len()
        );
        spans.push(Span::styled("│ ", Style::default().fg(colors.border())));
        spans.push(Span::styled(
            position.into_owned(),
            Style::default().fg(colors.fg()),
        ));

        let mistakes = app
            .current_entry()
            .map(|entry| app.progress.mistakes_for(&entry.id))
            .unwrap_or(0);
        if mistakes > 0 {
            spans.push(Span::styled("  ", Style::default()));
            spans.push(Span::styled(
                t!("header.mistakes", count = mistakes).into_owned(),
                Style::default().fg(colors.warning()),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_no_words(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let message_area = ui::layout::centered_rect(50, 30, layout[0]);
    let block = Block::bordered()
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(message_area);
    frame.render_widget(block, message_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            t!("no_words.title").into_owned(),
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            t!("no_words.body").into_owned(),
            Style::default().fg(colors.fg()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        inner,
    );

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", t!("footer.no_words")),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[1]);
}
