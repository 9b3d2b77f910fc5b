use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph, Wrap};

use draft_hub::board::{BoardRow, big_board};
use draft_hub::config::AppConfig;
use draft_hub::dataset::{Dataset, MeasureKind, StatCategory};
use draft_hub::export::{default_export_path, export_workbook};
use draft_hub::percentile::ordinal_suffix;
use draft_hub::profile::{number_or_na, player_profile, text_or_na};
use draft_hub::rankings::{RankDeviation, average_rank};
use draft_hub::stat_hub::{
    RadarComparison, StatHub, comparison_candidates, radar_comparison, sort_by_category,
};
use draft_hub::state::{AppState, InputMode, Screen};

struct App {
    dataset: Dataset,
    hub: StatHub,
    config: AppConfig,
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(dataset: Dataset, config: AppConfig) -> Self {
        let hub = StatHub::build(&dataset);
        let mut state = AppState::new();
        let source = config
            .data_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled dataset".to_string());
        state.push_log(format!(
            "[INFO] Loaded {} players, {} game logs from {source}",
            dataset.bio.len(),
            dataset.game_logs.len()
        ));
        let orphans = dataset.orphan_ids();
        if !orphans.is_empty() {
            state.push_log(format!(
                "[WARN] {} player ids have records but no bio; they are left out",
                orphans.len()
            ));
        }
        Self {
            dataset,
            hub,
            config,
            state,
            should_quit: false,
        }
    }

    fn board_rows(&self) -> Vec<BoardRow<'_>> {
        big_board(&self.dataset, &self.hub.medals, &self.state.board)
    }

    fn selected_board_player(&self) -> Option<u32> {
        self.board_rows()
            .get(self.state.board_selected)
            .map(|row| row.player.player_id)
    }

    fn selected_stat_player(&self) -> Option<u32> {
        sort_by_category(&self.hub.rows, self.state.stat_sort)
            .get(self.state.stat_selected)
            .map(|row| row.player_id)
    }

    fn on_key(&mut self, key: KeyEvent) {
        match self.state.input_mode {
            InputMode::Search => self.on_search_key(key),
            InputMode::Note => self.on_note_key(key),
            InputMode::Normal => self.on_normal_key(key),
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.input_mode = InputMode::Normal,
            KeyCode::Backspace => self.state.pop_search_char(),
            KeyCode::Char(c) => self.state.push_search_char(c),
            _ => {}
        }
    }

    fn on_note_key(&mut self, key: KeyEvent) {
        let Screen::Profile { player_id } = self.state.screen else {
            self.state.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Enter => {
                if self.state.submit_note(player_id) {
                    self.state.push_log("[INFO] Scouting report added");
                }
                self.state.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.state.note_draft.clear();
                self.state.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.state.note_draft.pop();
            }
            KeyCode::Char(c) => self.state.note_draft.push(c),
            _ => {}
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            _ => {}
        }
        match self.state.screen {
            Screen::Board => self.on_board_key(key),
            Screen::Profile { player_id } => self.on_profile_key(key, player_id),
            Screen::StatHub { player_id } => self.on_stat_hub_key(key, player_id),
        }
    }

    fn on_board_key(&mut self, key: KeyEvent) {
        let total = self.board_rows().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_board_next(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_board_prev(total),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('/') => self.state.input_mode = InputMode::Search,
            KeyCode::Esc => {
                self.state.board.search.clear();
                self.state.board_selected = 0;
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_board_player() {
                    self.state.open_profile(id);
                }
            }
            KeyCode::Char('t') => {
                let id = self.selected_board_player();
                self.state.open_stat_hub(id);
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        let total = self.board_rows().len();
        self.state.clamp_board_selection(total);
    }

    fn on_profile_key(&mut self, key: KeyEvent, player_id: u32) {
        match key.code {
            KeyCode::Char('v') => self.state.toggle_vertical(),
            KeyCode::Char('n') => self.state.input_mode = InputMode::Note,
            KeyCode::Char('t') => self.state.open_stat_hub(Some(player_id)),
            KeyCode::Char('b') | KeyCode::Esc => self.state.back(),
            _ => {}
        }
    }

    fn on_stat_hub_key(&mut self, key: KeyEvent, selected: Option<u32>) {
        let total = self.hub.rows.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_stat_next(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_stat_prev(total),
            KeyCode::Char('o') => self.state.cycle_stat_sort(),
            KeyCode::Char('c') => {
                if let Some(id) = selected {
                    let candidates: Vec<u32> = comparison_candidates(&self.hub.rows, id)
                        .iter()
                        .map(|row| row.player_id)
                        .collect();
                    self.state.cycle_compare(&candidates);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_stat_player() {
                    self.state.screen = Screen::StatHub {
                        player_id: Some(id),
                    };
                    self.state.compare_id = None;
                }
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.selected_stat_player() {
                    self.state.open_profile(id);
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => self.state.back(),
            _ => {}
        }
    }

    fn export(&mut self) {
        let path = default_export_path(&self.config.export_dir);
        match export_workbook(&path, &self.dataset, &self.hub, &self.state.board) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} board rows, {} stat rows to {}",
                report.board_rows,
                report.stat_rows,
                report.path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let dataset = config.load_dataset()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(dataset, config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let poll_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Board => render_board(frame, chunks[1], app),
        Screen::Profile { player_id } => render_profile(frame, chunks[1], app, player_id),
        Screen::StatHub { player_id } => render_stat_hub(frame, chunks[1], app, player_id),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    match state.screen {
        Screen::Board => {
            let search = if state.board.search.is_empty() {
                "-".to_string()
            } else {
                state.board.search.clone()
            };
            format!(
                "NBA DRAFT HUB | Big Board | Sort: {} | Search: {search}",
                state.board.sort.label()
            )
        }
        Screen::Profile { .. } => format!(
            "NBA DRAFT HUB | Player Profile | Vertical: {}",
            MeasureKind::label(state.vertical_mode.kind())
        ),
        Screen::StatHub { .. } => format!(
            "NBA DRAFT HUB | Stat Hub | Sort: {}",
            state.stat_sort.label()
        ),
    }
}

fn footer_text(state: &AppState) -> String {
    match (state.input_mode, state.screen) {
        (InputMode::Search, _) => "Type to search | Backspace delete | Enter/Esc done".to_string(),
        (InputMode::Note, _) => "Type report | Enter submit | Esc cancel".to_string(),
        (InputMode::Normal, Screen::Board) => {
            "j/k Move | Enter Profile | t Stats | / Search | Esc Clear | s Sort | e Export | ? Help | q Quit".to_string()
        }
        (InputMode::Normal, Screen::Profile { .. }) => {
            "v Vertical | n Report | t Stats | b/Esc Back | ? Help | q Quit".to_string()
        }
        (InputMode::Normal, Screen::StatHub { .. }) => {
            "j/k Move | Enter Select | c Compare | o Sort | p Profile | b/Esc Back | ? Help | q Quit".to_string()
        }
    }
}

fn deviation_style(deviation: RankDeviation) -> Style {
    match deviation {
        RankDeviation::Favorable => Style::default().fg(Color::Black).bg(Color::Green),
        RankDeviation::Unfavorable => Style::default().fg(Color::White).bg(Color::Red),
        RankDeviation::Neutral => Style::default().fg(Color::Gray),
    }
}

fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.board_rows();
    if rows.is_empty() {
        let empty = Paragraph::new("No players match this search")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    const ROW_HEIGHT: u16 = 3;
    if area.height < ROW_HEIGHT {
        return;
    }
    let visible = (area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(app.state.board_selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * ROW_HEIGHT,
            width: area.width,
            height: ROW_HEIGHT,
        };
        let selected = idx == app.state.board_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if idx % 2 == 1 {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default()
        };

        let row = &rows[idx];
        let medals = row
            .medals
            .iter()
            .map(|m| m.medal.icon())
            .collect::<Vec<_>>()
            .join(" ");
        let title = Line::from(vec![
            Span::styled(format!("{:>3}. {} ", idx + 1, row.player.name), row_style.add_modifier(Modifier::BOLD)),
            Span::styled(medals, row_style),
            Span::styled(
                format!("  Avg Rank: {}", number_or_na(row.average_rank)),
                row_style,
            ),
        ]);

        let mut chips = vec![Span::raw("     ")];
        for chip in &row.chips {
            chips.push(Span::styled(format!(" {} ", chip.label()), deviation_style(chip.deviation)));
            chips.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(vec![title, Line::from(chips)]);
        frame.render_widget(paragraph, row_area);
    }
}

fn render_profile(frame: &mut Frame, area: Rect, app: &App, player_id: u32) {
    let Some(profile) = player_profile(&app.dataset, player_id, app.state.vertical_mode) else {
        let missing = Paragraph::new("Player not found")
            .block(Block::default().title("Profile").borders(Borders::ALL));
        frame.render_widget(missing, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(columns[0]);

    let bio = profile.bio;
    let bio_text = [
        format!("Height: {}", text_or_na(bio.height.as_deref())),
        format!("Weight: {}", text_or_na(bio.weight.as_deref())),
        format!("Team: {}", text_or_na(bio.current_team.as_deref())),
        format!("League: {}", text_or_na(bio.league.as_deref())),
        format!("Avg Rank: {}", number_or_na(average_rank(app.dataset.ranking(player_id)))),
        format!("Games Logged: {}", profile.games_played),
    ]
    .join("\n");
    let bio_widget = Paragraph::new(bio_text)
        .block(Block::default().title(bio.name.clone()).borders(Borders::ALL));
    frame.render_widget(bio_widget, left[0]);

    let block = Block::default().title("Measurements").borders(Borders::ALL);
    let inner = block.inner(left[1]);
    frame.render_widget(block, left[1]);
    let bars = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);
    for (i, (kind, reading)) in profile.readings.iter().enumerate() {
        let label = match reading.percentile {
            Some(p) => format!(
                "{}: {} ({}{} %)",
                kind.label(),
                number_or_na(reading.value),
                p,
                ordinal_suffix(u32::from(p))
            ),
            None => format!("{}: {}", kind.label(), number_or_na(reading.value)),
        };
        let color = reading
            .gradient
            .map(|c| Color::Rgb(c.r, c.g, c.b))
            .unwrap_or(Color::DarkGray);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(u16::from(reading.percentile.unwrap_or(0)))
            .label(label);
        frame.render_widget(gauge, bars[i]);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(columns[1]);

    let notes = app.state.notes_for(player_id);
    let notes_text = if notes.is_empty() {
        "No reports yet".to_string()
    } else {
        notes
            .iter()
            .map(|n| format!("- {n}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let notes_widget = Paragraph::new(notes_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Submitted Reports").borders(Borders::ALL));
    frame.render_widget(notes_widget, right[0]);

    let draft_style = if app.state.input_mode == InputMode::Note {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let draft = Paragraph::new(app.state.note_draft.as_str())
        .style(draft_style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Add Scouting Report").borders(Borders::ALL));
    frame.render_widget(draft, right[1]);
}

fn render_stat_hub(frame: &mut Frame, area: Rect, app: &App, selected: Option<u32>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_stat_list(frame, columns[0], app, selected);

    let Some(radar) = selected.and_then(|id| radar_comparison(&app.hub.rows, id, app.state.compare_id))
    else {
        let hint = Paragraph::new("Select a player (Enter) to plot percentiles")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Percentiles").borders(Borders::ALL));
        frame.render_widget(hint, columns[1]);
        return;
    };

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(columns[1]);

    let summary = selected
        .and_then(|id| app.hub.row(id))
        .map(|row| {
            let line = |cats: &[StatCategory]| {
                cats.iter()
                    .map(|c| format!("{}: {}", c.label(), number_or_na(row.value(*c))))
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            format!(
                "{}\n{}",
                line(&StatCategory::ALL[..3]),
                line(&StatCategory::ALL[3..])
            )
        })
        .unwrap_or_default();
    let title = radar
        .series
        .first()
        .map(|s| format!("{} - Selected Player", s.name))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(summary).block(Block::default().title(title).borders(Borders::ALL)),
        right[0],
    );

    frame.render_widget(radar_chart(&radar), right[1]);
}

fn render_stat_list(frame: &mut Frame, area: Rect, app: &App, selected: Option<u32>) {
    let sorted = sort_by_category(&app.hub.rows, app.state.stat_sort);
    let block = Block::default()
        .title(format!("Players by {}", app.state.stat_sort.label()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if sorted.is_empty() {
        frame.render_widget(Paragraph::new("No game logs"), inner);
        return;
    }

    const ROW_HEIGHT: u16 = 2;
    let visible = (inner.height / ROW_HEIGHT).max(1) as usize;
    let (start, end) = visible_range(app.state.stat_selected, sorted.len(), visible);

    let mut lines = Vec::new();
    for idx in start..end {
        let row = sorted[idx];
        let medal = app
            .hub
            .medals
            .medal_in(row.player_id, app.state.stat_sort)
            .map(|m| m.icon())
            .unwrap_or("  ");
        let mut style = Style::default();
        if idx == app.state.stat_selected {
            style = style.fg(Color::White).bg(Color::DarkGray);
        }
        if Some(row.player_id) == selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::styled(format!("{medal} {}", row.name), style));
        let stats = StatCategory::ALL
            .iter()
            .map(|c| format!("{} {}", c.label(), number_or_na(row.value(*c))))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::styled(format!("   {stats}"), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn radar_chart(radar: &RadarComparison) -> BarChart<'static> {
    const SERIES_COLORS: [Color; 2] = [Color::Green, Color::Red];
    let title = radar
        .series
        .iter()
        .map(|s| s.name.clone())
        .collect::<Vec<_>>()
        .join(" vs ");

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(format!("Percentiles (0-100): {title}"))
                .borders(Borders::ALL),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(u64::from(RadarComparison::MAX));

    for (cat_idx, label) in radar.labels.iter().enumerate() {
        let bars: Vec<Bar> = radar
            .series
            .iter()
            .enumerate()
            .map(|(s_idx, series)| {
                let value = series.values[cat_idx];
                Bar::default()
                    .value(u64::from(value.unwrap_or(0)))
                    .text_value(value.map(|v| v.to_string()).unwrap_or_else(|| "NA".to_string()))
                    .style(Style::default().fg(SERIES_COLORS[s_idx % SERIES_COLORS.len()]))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(*label)).bars(&bars));
    }
    chart
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "NBA Draft Hub - Help",
        "",
        "Big Board:",
        "  j/k or ↑/↓   Move",
        "  Enter        Player profile",
        "  t            Stat hub for player",
        "  /            Search by name",
        "  s            Cycle sort (scouts, average)",
        "  e            Export workbook",
        "",
        "Profile:",
        "  v            Max / no-step vertical",
        "  n            Write scouting report",
        "",
        "Stat Hub:",
        "  Enter        Select player",
        "  c            Cycle comparison",
        "  o            Cycle sort category",
        "",
        "  b / Esc      Back      ?  Help      q  Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
