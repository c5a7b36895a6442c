use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use doctor_directory::{
    ConsultationMode, Doctor, DoctorSource, FilterController, FilterUpdate, Notification,
    Severity, SortOption, SUGGESTION_LIMIT,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tokio::runtime::Runtime;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Doctors,
    Filters,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Doctors => Page::Filters,
            Page::Filters => Page::Doctors,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Doctors => "Doctors",
            Page::Filters => "Filters",
        }
    }
}

/// One selectable row of the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterItem {
    Consultation(ConsultationMode),
    Specialty(String),
    Sort(SortOption),
}

/// What the event loop must do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
}

pub struct App {
    pub controller: FilterController,
    pub state: TableState,
    pub filter_state: ListState,
    pub current_page: Page,
    pub show_detail: bool,
    /// Search box has focus
    pub searching: bool,
    pub show_suggestions: bool,
    pub suggestion_cursor: Option<usize>,
    pub notice: Option<Notification>,
}

impl App {
    pub fn new(controller: FilterController) -> Self {
        let mut filter_state = ListState::default();
        filter_state.select(Some(0));

        let mut app = Self {
            controller,
            state: TableState::default(),
            filter_state,
            current_page: Page::Doctors,
            show_detail: false,
            searching: false,
            show_suggestions: false,
            suggestion_cursor: None,
            notice: None,
        };
        app.reset_selection();
        app
    }

    pub fn visible(&self) -> &[Doctor] {
        self.controller.visible().unwrap_or_default()
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.state.selected().and_then(|i| self.visible().get(i))
    }

    pub fn suggestions(&self) -> Vec<&Doctor> {
        self.controller.suggestions(SUGGESTION_LIMIT)
    }

    /// Rows of the filter panel, in display order
    pub fn filter_items(&self) -> Vec<FilterItem> {
        let mut items: Vec<FilterItem> = ConsultationMode::ALL
            .iter()
            .map(|m| FilterItem::Consultation(*m))
            .collect();
        items.extend(
            self.controller
                .specialties()
                .iter()
                .map(|s| FilterItem::Specialty(s.clone())),
        );
        items.extend(SortOption::ALL.iter().map(|s| FilterItem::Sort(*s)));
        items
    }

    pub fn is_item_active(&self, item: &FilterItem) -> bool {
        let state = self.controller.state();
        match item {
            FilterItem::Consultation(mode) => state.consultation_type == Some(*mode),
            FilterItem::Specialty(name) => state.specialties.contains(name),
            FilterItem::Sort(sort) => state.sort_by == Some(*sort),
        }
    }

    /// Radio rows select; checkbox rows toggle
    pub fn activate_filter_item(&mut self) {
        let items = self.filter_items();
        let Some(item) = self.filter_state.selected().and_then(|i| items.get(i)) else {
            return;
        };

        let update = match item {
            FilterItem::Consultation(mode) => FilterUpdate::new().consultation(Some(*mode)),
            FilterItem::Specialty(name) => {
                let checked = !self.is_item_active(item);
                FilterUpdate::new().specialties(self.controller.state().toggled_specialties(name, checked))
            }
            FilterItem::Sort(sort) => FilterUpdate::new().sort(Some(*sort)),
        };
        self.update_filter(update);
    }

    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.controller.update_filter(update);
        self.reset_selection();
    }

    pub fn clear_filters(&mut self) {
        self.update_filter(FilterUpdate::reset());
        self.show_suggestions = false;
        self.suggestion_cursor = None;
    }

    /// Pull queued controller notifications into the status bar
    pub fn sync_notifications(&mut self) {
        if let Some(last) = self.controller.take_notifications().pop() {
            self.notice = Some(last);
        }
        self.reset_selection();
    }

    /// Re-fetch the collection. A failure keeps the previous records and
    /// surfaces through the controller's notification queue.
    pub fn reload(&mut self, runtime: &Runtime, source: &dyn DoctorSource) {
        match runtime.block_on(self.controller.load_from(source)) {
            Ok(outcome) => debug!(?outcome, "reload finished"),
            Err(e) => debug!(error = %e, "reload failed"),
        }
        self.sync_notifications();
    }

    fn reset_selection(&mut self) {
        if self.visible().is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    // ------------------------------------------------------------------------
    // Search box
    // ------------------------------------------------------------------------

    fn set_search(&mut self, query: String) {
        self.update_filter(FilterUpdate::new().search(query));
        self.suggestion_cursor = None;
    }

    pub fn search_input(&mut self, c: char) {
        let mut query = self.controller.state().search_query.clone();
        query.push(c);
        self.set_search(query);
        self.show_suggestions = true;
    }

    pub fn search_backspace(&mut self) {
        let mut query = self.controller.state().search_query.clone();
        query.pop();
        self.set_search(query);
        self.show_suggestions = true;
    }

    /// Focus leaving the search box dismisses the suggestion panel
    pub fn leave_search(&mut self) {
        self.searching = false;
        self.show_suggestions = false;
        self.suggestion_cursor = None;
    }

    pub fn next_suggestion(&mut self) {
        let len = self.suggestions().len();
        if len == 0 || !self.show_suggestions {
            return;
        }
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn previous_suggestion(&mut self) {
        let len = self.suggestions().len();
        if len == 0 || !self.show_suggestions {
            return;
        }
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Enter in the search box: take the highlighted suggestion (if any) and close
    pub fn submit_search(&mut self) {
        let chosen = self
            .suggestion_cursor
            .filter(|_| self.show_suggestions)
            .and_then(|i| self.suggestions().get(i).map(|d| d.name.clone()));
        if let Some(name) = chosen {
            self.set_search(name);
        }
        self.leave_search();
    }

    // ------------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Tab => self.leave_search(),
                KeyCode::Enter => self.submit_search(),
                KeyCode::Backspace => self.search_backspace(),
                KeyCode::Down => self.next_suggestion(),
                KeyCode::Up => self.previous_suggestion(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.search_input(c),
                _ => {}
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('/') => {
                self.searching = true;
                self.current_page = Page::Doctors;
            }
            KeyCode::Char('r') => return Action::Reload,
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Tab => self.current_page = self.current_page.next(),
            KeyCode::Enter | KeyCode::Char(' ') if self.current_page == Page::Filters => {
                self.activate_filter_item()
            }
            KeyCode::Enter => self.show_detail = !self.show_detail,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => {
                if self.cursor_len() > 0 {
                    self.select(0);
                }
            }
            KeyCode::End => {
                let len = self.cursor_len();
                if len > 0 {
                    self.select(len - 1);
                }
            }
            _ => {}
        }
        Action::None
    }

    // ------------------------------------------------------------------------
    // Navigation (doctor list or filter panel, depending on page)
    // ------------------------------------------------------------------------

    fn cursor_len(&self) -> usize {
        match self.current_page {
            Page::Doctors => self.visible().len(),
            Page::Filters => self.filter_items().len(),
        }
    }

    fn selected(&self) -> Option<usize> {
        match self.current_page {
            Page::Doctors => self.state.selected(),
            Page::Filters => self.filter_state.selected(),
        }
    }

    fn select(&mut self, i: usize) {
        match self.current_page {
            Page::Doctors => self.state.select(Some(i)),
            Page::Filters => self.filter_state.select(Some(i)),
        }
    }

    pub fn next(&mut self) {
        let len = self.cursor_len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        let len = self.cursor_len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    pub fn page_down(&mut self) {
        let len = self.cursor_len();
        if len == 0 {
            return;
        }
        let i = self.selected().map(|i| (i + 20).min(len - 1)).unwrap_or(0);
        self.select(i);
    }

    pub fn page_up(&mut self) {
        if self.cursor_len() == 0 {
            return;
        }
        let i = self.selected().map(|i| i.saturating_sub(20)).unwrap_or(0);
        self.select(i);
    }
}

pub fn run_ui(app: &mut App, runtime: &Runtime, source: &dyn DoctorSource) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, runtime, source);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &Runtime,
    source: &dyn DoctorSource,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Reload => {
                    app.notice = None;
                    terminal.draw(|f| ui(f, app))?;
                    app.reload(runtime, source);
                }
                Action::None => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_search(f, chunks[1], app);

    if !app.controller.is_loaded() {
        render_loading(f, chunks[2], app);
    } else if app.show_detail && app.current_page == Page::Doctors {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Doctor list
                Constraint::Percentage(40), // Detail card
            ])
            .split(chunks[2]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Doctors => render_table(f, chunks[2], app),
            Page::Filters => render_filters(f, chunks[2], app),
        }
    }

    render_status_bar(f, chunks[3], app);

    // Suggestions overlay last so it sits on top of the list
    if app.show_suggestions {
        render_suggestions(f, chunks[1], chunks[2], app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "Find a Doctor  ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, page) in [Page::Doctors, Page::Filters].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    if let Some(all) = app.controller.doctors() {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("{} Doctors Found", app.visible().len()),
            Style::default().fg(Color::Green),
        ));
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Total: {}", all.len()),
            Style::default().fg(Color::White),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let query = &app.controller.state().search_query;
    let (text, style) = if query.is_empty() && !app.searching {
        (
            "Search doctor by name  (press / to type)".to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else if app.searching {
        (format!("{}▏", query), Style::default().fg(Color::White))
    } else {
        (query.clone(), Style::default().fg(Color::White))
    };

    let border = if app.searching { Color::Yellow } else { Color::White };
    let search = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" 🔍 Search "),
    );

    f.render_widget(search, area);
}

fn render_suggestions(f: &mut Frame, search_area: Rect, content_area: Rect, app: &App) {
    let suggestions = app.suggestions();
    if suggestions.is_empty() {
        return;
    }

    let height = (suggestions.len() as u16 + 2).min(content_area.height);
    let area = Rect {
        x: search_area.x + 2,
        y: content_area.y,
        width: search_area.width.saturating_sub(4).min(50),
        height,
    };

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|d| ListItem::new(d.name.clone()))
        .collect();

    let mut state = ListState::default();
    state.select(app.suggestion_cursor);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_loading(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.notice {
        Some(n) if n.severity == Severity::Error => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", n.description),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press r to retry",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ],
        _ => vec![
            Line::from(""),
            Line::from(Span::styled("  ⏳ Loading doctors...", Style::default().fg(Color::Cyan))),
        ],
    };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Doctors "),
    );

    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    if app.visible().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No doctors match your search criteria.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Doctors "),
        );
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Name", "Specialty", "Experience", "Fee", "Consultation"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.visible().iter().map(|d| {
        let cells = vec![
            Cell::from(truncate(&d.display_name(), 28)),
            Cell::from(truncate(&d.specialties.join(", "), 30)),
            Cell::from(format!("{} yrs", d.experience_years)),
            Cell::from(format!("₹{}", d.fee_amount)).style(Style::default().fg(Color::Green)),
            Cell::from(Line::from(mode_badges(&d.consultation_modes))),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(32),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Min(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Doctors "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn mode_badges(modes: &[ConsultationMode]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, mode) in modes.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let color = match mode {
            ConsultationMode::VideoConsult => Color::Magenta,
            ConsultationMode::InClinic => Color::LightRed,
        };
        spans.push(Span::styled(mode.as_str(), Style::default().fg(color)));
    }
    spans
}

fn render_filters(f: &mut Frame, area: Rect, app: &mut App) {
    let items = app.filter_items();
    let specialty_start = ConsultationMode::ALL.len();
    let sort_start = items.len() - SortOption::ALL.len();

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let active = app.is_item_active(item);
            let (marker, label) = match item {
                FilterItem::Consultation(mode) => (radio(active), mode.as_str().to_string()),
                FilterItem::Specialty(name) => (checkbox(active), name.clone()),
                FilterItem::Sort(sort) => (radio(active), sort.label().to_string()),
            };

            let mut lines = Vec::new();
            let section = if i == 0 {
                Some("Consultation Mode")
            } else if i == specialty_start && specialty_start < sort_start {
                Some("Speciality")
            } else if i == sort_start {
                Some("Sort")
            } else {
                None
            };
            if let Some(section) = section {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    section,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
            }

            let style = if active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(marker, style),
                Span::raw(" "),
                Span::styled(label, style),
            ]));

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Filters - Space to select, c to clear "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.filter_state);
}

fn radio(active: bool) -> &'static str {
    if active {
        "(•)"
    } else {
        "( )"
    }
}

fn checkbox(active: bool) -> &'static str {
    if active {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = Vec::new();

    if let Some(notice) = &app.notice {
        let color = match notice.severity {
            Severity::Error => Color::Red,
            Severity::Info => Color::Green,
        };
        status_spans.push(Span::styled(
            format!(" {}: {} ", notice.title, notice.description),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw("|"));
    } else {
        let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
        status_spans.push(Span::styled(
            format!(" Row: {}/{} ", selected, app.visible().len()),
            Style::default().fg(Color::Cyan),
        ));
        status_spans.push(Span::raw("|"));
    }

    // Persisted filter state, as it would appear in the URL
    let query = app.controller.query_string();
    if !query.is_empty() {
        status_spans.push(Span::styled(
            format!(" ?{} ", truncate(query, 60)),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw("|"));
    }

    status_spans.push(Span::raw(" "));
    status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Search | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear | "));
    status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Reload | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let doctor = match app.selected_doctor() {
        Some(d) => d,
        None => {
            let no_selection = Paragraph::new("No doctor selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Doctor Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let specialties = if doctor.specialties.is_empty() {
        "-".to_string()
    } else {
        doctor.specialties.join(", ")
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", doctor.display_name()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("  Specialty: ", label), Span::raw(specialties)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Experience: ", label),
            Span::raw(format!("{} Years Experience", doctor.experience_years)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Fee: ", label),
            Span::styled(format!("₹{} Fee", doctor.fee_amount), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
    ];

    let mut modes = vec![Span::styled("  Consultation: ", label)];
    if doctor.consultation_modes.is_empty() {
        modes.push(Span::raw("-"));
    } else {
        modes.extend(mode_badges(&doctor.consultation_modes));
    }
    content.push(Line::from(modes));

    if let Some(url) = &doctor.image_url {
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled("  Photo: ", label),
            Span::styled(url.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  ID: ", label),
        Span::styled(doctor.id.clone(), Style::default().fg(Color::DarkGray)),
    ]));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Doctor Details "),
    );

    f.render_widget(detail_panel, area);
}
