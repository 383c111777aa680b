//! Detail panel for the active record

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use curator_core::{EditorSession, PanelRow, ViewModel};

use crate::mode::Field;
use crate::widgets::StructureCanvas;

pub struct DetailView<'a> {
    session: &'a EditorSession,
    view: &'a ViewModel,
    focus: Field,
    editing: Option<(Field, &'a str)>,
}

impl<'a> DetailView<'a> {
    pub fn new(
        session: &'a EditorSession,
        view: &'a ViewModel,
        focus: Field,
        editing: Option<(Field, &'a str)>,
    ) -> Self {
        Self {
            session,
            view,
            focus,
            editing,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(row) = self.view.visible_row() else {
            let block = Block::default().title("No compound").borders(Borders::ALL);
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_fields(frame, chunks[0], row);
        self.render_structure(frame, chunks[1], row);
    }

    fn field_line(&self, field: Field, stored: &str) -> Line<'static> {
        let focused = self.focus == field;
        let value = match self.editing {
            Some((editing, text)) if editing == field => format!("{}▏", text),
            _ => stored.to_string(),
        };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Line::from(vec![
            Span::styled(format!("{:<22}", field.label()), label_style),
            Span::raw(value),
        ])
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect, row: &PanelRow) {
        let Some(record) = self.session.store().get(row.index) else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(area);

        let mut lines = vec![
            self.field_line(Field::Name, &record.name),
            self.field_line(Field::Notation, &record.notation),
            self.field_line(Field::SourceOrganism, &record.source_organism),
            Line::from(vec![
                Span::styled(
                    format!("{:<22}", "Formula"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(row.formula.clone()),
            ]),
            Line::from(if record.curated {
                Span::styled("Curated", Style::default().fg(Color::Green))
            } else {
                Span::styled("Not curated", Style::default().fg(Color::Yellow))
            }),
        ];
        if let Some(id) = record.external_id {
            lines.push(Line::from(format!("Database id {}", id)));
        }

        let block = Block::default()
            .title(format!(" Compound {} ", row.index + 1))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[0]);

        self.render_article(frame, chunks[1]);
    }

    fn render_article(&self, frame: &mut Frame, area: Rect) {
        let article = self.session.article();
        let record = self.session.store().active_record();
        let mut lines: Vec<Line> = Field::ARTICLE
            .iter()
            .map(|&field| self.field_line(field, &field.value(record, article)))
            .collect();
        if article.needs_work {
            lines.push(Line::from(Span::styled(
                "Needs work",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let block = Block::default().title(" Article ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_structure(&self, frame: &mut Frame, area: Rect, row: &PanelRow) {
        let mut title = " Structure ".to_string();
        if row.rendering {
            title.push_str("(rendering) ");
        }
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if let Some(error) = &row.render_error {
            block = block
                .title_bottom(Line::from(format!(" {} ", error)))
                .border_style(Style::default().fg(Color::Red));
        }

        let drawing = self
            .session
            .pipeline()
            .slot(row.key)
            .and_then(|slot| slot.drawing.as_ref());
        match drawing {
            Some(drawing) => {
                frame.render_widget(StructureCanvas::new(&drawing.depiction).block(block), area);
            }
            None => frame.render_widget(Paragraph::new("").block(block), area),
        }
    }
}
