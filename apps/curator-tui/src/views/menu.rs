//! Dropdown menu overlay listing every record

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use curator_core::ViewModel;

pub struct MenuView<'a> {
    view: &'a ViewModel,
    cursor: usize,
}

impl<'a> MenuView<'a> {
    pub fn new(view: &'a ViewModel, cursor: usize) -> Self {
        Self { view, cursor }
    }

    /// Anchor the menu to the top-left of `area`
    fn area(&self, area: Rect) -> Rect {
        let widest = self
            .view
            .menu
            .entries
            .iter()
            .map(|e| e.label.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let width = (widest + 8).clamp(20, area.width);
        let height = (self.view.menu.entries.len() as u16 + 2).min(area.height);
        Rect::new(area.x, area.y, width, height)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .view
            .menu
            .entries
            .iter()
            .map(|entry| {
                let mark = if entry.checked { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.label.clone()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" {} compounds ", self.view.menu.count))
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(Some(self.cursor));

        let menu_area = self.area(area);
        frame.render_widget(Clear, menu_area);
        frame.render_stateful_widget(list, menu_area, &mut state);
    }
}
