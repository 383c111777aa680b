//! Article header: title, journal, resolver links and validation

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use curator_core::ViewModel;
use curator_domain::{Article, ValidationSeverity};

pub struct ArticleHeader<'a> {
    article: &'a Article,
    view: &'a ViewModel,
}

impl<'a> ArticleHeader<'a> {
    pub fn new(article: &'a Article, view: &'a ViewModel) -> Self {
        Self { article, view }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let title = if self.article.title.trim().is_empty() {
            "(untitled)".to_string()
        } else {
            self.article.title.clone()
        };
        let mut first = vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.article.journal.is_empty() {
            first.push(Span::raw(format!("  {}", self.article.journal)));
        }
        if let Some(year) = self.article.year {
            first.push(Span::raw(format!(" ({})", year)));
        }

        let mut links = Vec::new();
        if let Some(doi) = &self.view.links.doi {
            links.push(Span::styled(doi.clone(), Style::default().fg(Color::Cyan)));
            links.push(Span::raw("  "));
        }
        if let Some(pubmed) = &self.view.links.pubmed {
            links.push(Span::styled(pubmed.clone(), Style::default().fg(Color::Cyan)));
        }

        let mut status = Vec::new();
        if let Some(mismatch) = self.view.count_mismatch {
            status.push(Span::styled(
                format!(
                    "Declared {} compounds, page has {}  ",
                    mismatch.declared, mismatch.actual
                ),
                Style::default().fg(Color::Yellow),
            ));
        }
        for issue in &self.view.issues {
            let color = match issue.severity {
                ValidationSeverity::Error => Color::Red,
                ValidationSeverity::Warning => Color::Yellow,
            };
            status.push(Span::styled(
                format!("{}: {}  ", issue.field, issue.message),
                Style::default().fg(color),
            ));
        }

        vec![Line::from(first), Line::from(links), Line::from(status)]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM);
        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
