//! Mode indicator shown at the start of the status line.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::mode::Mode;

/// Colour-coded `[NOR]`-style badge for the current mode.
pub struct ModeIndicator {
    mode: Mode,
}

impl ModeIndicator {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Get the display color for the current mode.
    pub fn mode_color(mode: Mode) -> Color {
        match mode {
            Mode::Normal => Color::Blue,
            Mode::Insert(_) => Color::Green,
            Mode::Menu => Color::Magenta,
            Mode::Confirm => Color::Yellow,
        }
    }

    /// Render as a styled span (for embedding in other widgets).
    pub fn as_span(&self) -> Span<'static> {
        Span::styled(
            format!("[{}]", self.mode.short_code()),
            Style::default()
                .fg(Color::White)
                .bg(Self::mode_color(self.mode))
                .add_modifier(Modifier::BOLD),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Field;

    #[test]
    fn test_mode_colors() {
        assert_eq!(ModeIndicator::mode_color(Mode::Normal), Color::Blue);
        assert_eq!(ModeIndicator::mode_color(Mode::Insert(Field::Notation)), Color::Green);
        assert_eq!(ModeIndicator::mode_color(Mode::Menu), Color::Magenta);
        assert_eq!(ModeIndicator::mode_color(Mode::Confirm), Color::Yellow);
    }

    #[test]
    fn test_span_text() {
        let span = ModeIndicator::new(Mode::Confirm).as_span();
        assert_eq!(span.content, "[CNF]");
    }
}
