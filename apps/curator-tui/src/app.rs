//! Application state and main render loop

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedReceiver;

use curator_core::{
    Completion, CuratorConfig, Dispatcher, EditorEvent, EditorSession, Effect, Notice, ViewModel,
};
use curator_domain::{ArticleEdit, PageState};

use crate::keybindings::{normal_mode_action, Action};
use crate::mode::{Field, Mode};
use crate::views::{ArticleHeader, DetailView, MenuView, TabStrip};
use crate::widgets::{centered_rect, ModeIndicator, Popup};

/// Main application state
pub struct App {
    pub mode: Mode,
    pub session: EditorSession,
    config: CuratorConfig,
    dispatcher: Dispatcher,
    completions: UnboundedReceiver<Completion>,
    /// Field highlighted in the detail panel
    pub focus: Field,
    /// Text being typed in Insert mode
    pub input: String,
    /// Highlighted menu entry
    pub menu_cursor: usize,
    /// Records awaiting a delete confirmation
    pub confirm_count: usize,
    /// Blocking notice, dismissed by any key
    pub notice: Option<Notice>,
    /// Status line message
    pub status_message: Option<String>,
    pub show_help: bool,
    navigation: Option<String>,
}

impl App {
    pub fn new(
        page: PageState,
        config: CuratorConfig,
        dispatcher: Dispatcher,
        completions: UnboundedReceiver<Completion>,
    ) -> Self {
        let (session, effects) = EditorSession::hydrate(page, &config);
        let mut app = Self {
            mode: Mode::Normal,
            session,
            config,
            dispatcher,
            completions,
            focus: Field::Name,
            input: String::new(),
            menu_cursor: 0,
            confirm_count: 0,
            notice: None,
            status_message: None,
            show_help: false,
            navigation: None,
        };
        app.apply(effects);
        app
    }

    /// Replace the page after a navigation. Results still in flight for the
    /// old page are discarded when they arrive.
    pub fn load_page(&mut self, page: PageState) {
        let (dispatcher, completions) =
            Dispatcher::from_config(self.dispatcher.backend().clone(), &self.config);
        self.dispatcher = dispatcher;
        self.completions = completions;

        let (session, effects) = EditorSession::hydrate(page, &self.config);
        self.session = session;
        self.mode = Mode::Normal;
        self.input.clear();
        self.status_message = Some(format!("Opened {}", self.session.path()));
        self.apply(effects);
    }

    /// Location to load next, if an action succeeded
    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }

    pub fn show_notice(&mut self, notice: Notice) {
        if notice.is_blocking() {
            self.notice = Some(notice);
        } else {
            self.status_message = Some(notice.to_string());
        }
    }

    /// Feed finished renders and requests back into the session
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            let effects = self.session.complete(completion);
            self.apply(effects);
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in self.dispatcher.run(effects) {
            match effect {
                Effect::Notify(notice) => self.show_notice(notice),
                Effect::Confirm { count } => {
                    self.confirm_count = count;
                    self.mode = Mode::Confirm;
                }
                Effect::Navigate(location) => self.navigation = Some(location),
                Effect::Render(_) | Effect::Dispatch(_) => {}
            }
        }
    }

    fn send(&mut self, event: EditorEvent) {
        let effects = self.session.handle(event);
        self.apply(effects);
    }

    /// Tell the session how wide the tab strip is drawn for a terminal
    /// `width` columns wide
    pub fn fit_width(&mut self, width: u16) {
        self.session.set_tab_viewport(TabStrip::inner_width(width));
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let view = self.session.view();
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Article header
                Constraint::Length(3), // Tab strip
                Constraint::Min(0),    // Detail panel
                Constraint::Length(1), // Status line
            ])
            .split(size);

        ArticleHeader::new(self.session.article(), &view).render(frame, chunks[0]);
        TabStrip::new(&view).render(frame, chunks[1]);
        DetailView::new(&self.session, &view, self.focus, self.editing())
            .render(frame, chunks[2]);
        self.render_status_line(frame, chunks[3], &view);

        if self.mode == Mode::Menu {
            MenuView::new(&view, self.menu_cursor).render(frame, chunks[2]);
        }
        if self.mode == Mode::Confirm {
            let text = format!(
                "This will permanently delete {} known compound record(s). Proceed? (y/n)",
                self.confirm_count
            );
            Popup::new("Confirm delete", text, Color::Yellow).render(frame, size);
        }
        if let Some(notice) = self.notice {
            Popup::new("Notice", notice.to_string(), Color::Red).render(frame, size);
        }
        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    /// Field and text being typed, when in Insert mode
    fn editing(&self) -> Option<(Field, &str)> {
        match self.mode {
            Mode::Insert(field) => Some((field, self.input.as_str())),
            _ => None,
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, view: &ViewModel) {
        let mut spans = vec![ModeIndicator::new(self.mode).as_span(), Span::raw(" ")];
        if let Mode::Insert(Field::ReplaceSource) = self.mode {
            spans.push(Span::raw(format!("{}: {}", Field::ReplaceSource.label(), self.input)));
        } else if let Some(message) = &self.status_message {
            spans.push(Span::raw(message.clone()));
        } else {
            spans.push(Span::styled(
                format!("[d] {}  [a] Add  [n/p] Next/Prev article  [?] Help", view.delete_label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
Curator - Help

Records:
  h/l, ←/→  - Previous/next compound tab
  m         - Open compound menu (↑/↓, Enter shows, Space checks)
  Space     - Check/uncheck the shown compound
  c         - Toggle curated
  +         - New blank compound (not saved)
  x         - Remove targeted compounds from the page (not saved)

Fields:
  Tab/S-Tab - Move focus through compound and article fields
  Enter / i - Edit the focused field; Enter or Esc leaves it
  r         - Replace source organism on every compound
  w         - Toggle "needs work" on the article

Backend:
  a         - Save and add compound
  d         - Delete shown or checked compounds
  n / p     - Next / previous article

Other:
  ?         - Toggle this help
  q         - Quit
"#;
        let help_area = centered_rect(70, 80, area);
        Popup::new("Help", help_text.to_string(), Color::Blue).render_in(frame, help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.notice.is_some() {
            self.notice = None;
            return false;
        }
        if self.show_help {
            self.show_help = false;
            return false;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(code, modifiers),
            Mode::Insert(field) => {
                self.handle_insert_key(field, code);
                false
            }
            Mode::Menu => {
                self.handle_menu_key(code);
                false
            }
            Mode::Confirm => {
                self.handle_confirm_key(code);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }
        let Some(action) = normal_mode_action(code) else {
            return false;
        };
        self.status_message = None;
        let active = self.session.store().active();

        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = true,
            Action::PrevTab => {
                if active > 0 {
                    self.send(EditorEvent::Select(active - 1));
                }
            }
            Action::NextTab => self.send(EditorEvent::Select(active + 1)),
            Action::OpenMenu => {
                if self.session.view().menu.toggle_enabled {
                    self.menu_cursor = active;
                    self.mode = Mode::Menu;
                } else {
                    self.status_message =
                        Some("Menu disabled while compounds are checked".to_string());
                }
            }
            Action::NextField => self.focus = self.focus.next(),
            Action::PrevField => self.focus = self.focus.prev(),
            Action::Edit => self.begin_edit(self.focus),
            Action::ToggleCheck => self.send(EditorEvent::ToggleCheck(active)),
            Action::ToggleCurated => {
                let curated = self.session.store().active_record().curated;
                self.send(EditorEvent::SetCurated(!curated));
            }
            Action::ToggleNeedsWork => {
                let needs_work = self.session.article().needs_work;
                self.send(EditorEvent::EditArticle(ArticleEdit::NeedsWork(!needs_work)));
            }
            Action::Add => {
                self.status_message = Some("Saving...".to_string());
                self.send(EditorEvent::AddCompound);
            }
            Action::Delete => self.send(EditorEvent::Delete),
            Action::Navigate(direction) => self.send(EditorEvent::Navigate(direction)),
            Action::ReplaceSource => self.begin_edit(Field::ReplaceSource),
            Action::RemoveLocal => self.send(EditorEvent::RemoveTargets),
            Action::NewBlank => {
                self.session.push_blank();
                self.focus = Field::Name;
            }
        }
        false
    }

    fn begin_edit(&mut self, field: Field) {
        self.input = field.value(self.session.store().active_record(), self.session.article());
        self.mode = Mode::Insert(field);
    }

    fn handle_insert_key(&mut self, field: Field, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.finish_edit(field);
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.live_edit(field);
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.live_edit(field);
            }
            _ => {}
        }
    }

    /// Push the typed text into the record as it changes
    fn live_edit(&mut self, field: Field) {
        let text = self.input.clone();
        match field {
            Field::Name => self.send(EditorEvent::EditName(text)),
            Field::Notation => self.send(EditorEvent::EditNotation(text)),
            Field::SourceOrganism => self.send(EditorEvent::EditSourceOrganism(text)),
            _ => {}
        }
    }

    /// The field lost focus
    fn finish_edit(&mut self, field: Field) {
        let text = std::mem::take(&mut self.input);
        match field {
            Field::Name => self.send(EditorEvent::CommitName),
            Field::Notation => self.send(EditorEvent::CommitNotation),
            Field::SourceOrganism => {}
            Field::ReplaceSource => self.send(EditorEvent::ReplaceSourceOrganism(text)),
            _ => match article_edit(field, text) {
                Ok(Some(edit)) => self.send(EditorEvent::EditArticle(edit)),
                Ok(None) => {}
                Err(message) => self.status_message = Some(message),
            },
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let len = self.session.store().len();
        match code {
            KeyCode::Esc | KeyCode::Char('m') => self.mode = Mode::Normal,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_cursor + 1 < len {
                    self.menu_cursor += 1;
                }
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.send(EditorEvent::Select(self.menu_cursor));
            }
            KeyCode::Char(' ') => {
                self.send(EditorEvent::ToggleCheck(self.menu_cursor));
                // Checking enters multi-select, which disables the menu
                if !self.session.view().menu.toggle_enabled {
                    self.mode = Mode::Normal;
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        let confirmed = match code {
            KeyCode::Char('y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Esc => false,
            _ => return,
        };
        self.mode = Mode::Normal;
        self.send(EditorEvent::ConfirmDelete(confirmed));
    }
}

/// Form edit for an article field. Numbers that do not parse are reported
/// and leave the article unchanged; an emptied number clears the field.
fn article_edit(field: Field, text: String) -> Result<Option<ArticleEdit>, String> {
    fn number<T: std::str::FromStr>(field: Field, text: &str) -> Result<Option<T>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse()
            .map(Some)
            .map_err(|_| format!("{} must be a whole number", field.label()))
    }

    let edit = match field {
        Field::Title => ArticleEdit::Title(text),
        Field::Journal => ArticleEdit::Journal(text),
        Field::Authors => ArticleEdit::Authors(text),
        Field::Year => ArticleEdit::Year(number(field, &text)?),
        Field::Volume => ArticleEdit::Volume(text),
        Field::Issue => ArticleEdit::Issue(text),
        Field::Pages => ArticleEdit::Pages(text),
        Field::Doi => ArticleEdit::Doi(text),
        Field::Pmid => ArticleEdit::Pmid(number(field, &text)?),
        Field::Abstract => ArticleEdit::Abstract(text),
        Field::Notes => ArticleEdit::Notes(text),
        Field::DeclaredCount => ArticleEdit::NumCompounds(number(field, &text)?),
        Field::Name | Field::Notation | Field::SourceOrganism | Field::ReplaceSource => {
            return Ok(None)
        }
    };
    Ok(Some(edit))
}
