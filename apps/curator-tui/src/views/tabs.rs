//! Horizontally scrolling tab strip

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use curator_core::{Tab, TabStatus, ViewModel};

pub struct TabStrip<'a> {
    view: &'a ViewModel,
}

impl<'a> TabStrip<'a> {
    pub fn new(view: &'a ViewModel) -> Self {
        Self { view }
    }

    /// Columns left for tabs inside the strip's borders
    pub fn inner_width(width: u16) -> u16 {
        width.saturating_sub(2)
    }

    fn tab_style(tab: &Tab) -> Style {
        let color = match tab.status {
            TabStatus::Success => Color::Green,
            TabStatus::Warning => Color::Yellow,
        };
        if tab.active {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }

    /// Each tab padded to its measured width
    fn line(&self) -> Line<'static> {
        let spans: Vec<Span> = self
            .view
            .tabs
            .iter()
            .map(|tab| {
                let text = format!("{:^width$}", tab.label, width = tab.width as usize);
                Span::styled(text, Self::tab_style(tab))
            })
            .collect();
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut title = format!(" Compounds ({}) ", self.view.menu.count);
        if self.view.multiple_notice {
            title.push_str("[multiple records] ");
        }
        let block = Block::default().title(title).borders(Borders::ALL);
        let paragraph = Paragraph::new(self.line())
            .block(block)
            .scroll((0, self.view.tab_scroll));
        frame.render_widget(paragraph, area);
    }
}
