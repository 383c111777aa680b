//! Braille-canvas drawing of a 2D depiction

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Widget,
    },
};

use curator_core::render::molecule::BondOrder;
use curator_core::Depiction;

/// Extra room around the atoms, in layout units
const MARGIN: f64 = 1.0;

pub struct StructureCanvas<'a> {
    depiction: &'a Depiction,
    block: Option<Block<'a>>,
}

impl<'a> StructureCanvas<'a> {
    pub fn new(depiction: &'a Depiction) -> Self {
        Self {
            depiction,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Square viewport around the depiction
    fn viewport(&self) -> ([f64; 2], [f64; 2]) {
        let Some((x0, y0, x1, y1)) = self.depiction.bounds() else {
            return ([-1.0, 1.0], [-1.0, 1.0]);
        };
        let half = ((x1 - x0).max(y1 - y0) / 2.0) + MARGIN;
        let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        ([cx - half, cx + half], [cy - half, cy + half])
    }
}

fn bond_color(order: BondOrder) -> Color {
    match order {
        BondOrder::Single => Color::White,
        BondOrder::Double => Color::Cyan,
        BondOrder::Triple | BondOrder::Quadruple => Color::Magenta,
        BondOrder::Aromatic => Color::Yellow,
    }
}

fn atom_color(symbol: &str) -> Color {
    match symbol {
        "O" => Color::Red,
        "N" => Color::Blue,
        "S" => Color::Yellow,
        "F" | "Cl" | "Br" | "I" => Color::Green,
        _ => Color::White,
    }
}

impl Widget for StructureCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (x_bounds, y_bounds) = self.viewport();
        let depiction = self.depiction;
        let mut canvas = Canvas::default()
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                for bond in &depiction.bonds {
                    let (Some(a), Some(b)) =
                        (depiction.atoms.get(bond.from), depiction.atoms.get(bond.to))
                    else {
                        continue;
                    };
                    ctx.draw(&CanvasLine {
                        x1: a.x,
                        y1: a.y,
                        x2: b.x,
                        y2: b.y,
                        color: bond_color(bond.order),
                    });
                }
                ctx.layer();
                for atom in &depiction.atoms {
                    // Carbon is implied by the skeleton
                    if atom.symbol == "C" {
                        continue;
                    }
                    ctx.print(
                        atom.x,
                        atom.y,
                        Span::styled(
                            atom.symbol.clone(),
                            Style::default().fg(atom_color(&atom.symbol)),
                        ),
                    );
                }
            });
        if let Some(block) = self.block {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}
