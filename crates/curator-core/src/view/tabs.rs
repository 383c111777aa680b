//! Tab strip geometry

/// Columns a tab occupies for `label`
pub fn tab_width(label: &str, padding: u16) -> u16 {
    let chars = label.chars().count().min(u16::MAX as usize) as u16;
    chars.saturating_add(padding)
}

/// Scroll offset that centres tab `target` in a strip `viewport` columns
/// wide: the widths of all preceding tabs, less half the space left around
/// the target. Never negative.
pub fn centered_scroll(widths: &[u16], target: usize, viewport: u16) -> u16 {
    let Some(&width) = widths.get(target) else {
        return 0;
    };
    let preceding: u32 = widths[..target].iter().map(|&w| u32::from(w)).sum();
    let margin = u32::from(viewport.saturating_sub(width)) / 2;
    preceding.saturating_sub(margin).min(u32::from(u16::MAX)) as u16
}
