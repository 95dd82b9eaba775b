//! Colours for report summaries

use owo_colors::{OwoColorize, colors::css};

/// How a piece of summary output reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Table headings
    Heading,
    /// Lines read without contributing, and periods left out of a figure
    Muted,
    /// Clean parses and final figures
    Clean,
    /// Sections dropped under the lenient policy
    Skipped,
}

/// Paints summary output, or leaves it plain when stdout has no colour
/// support.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Detects colour support on stdout.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            enabled: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    #[must_use]
    pub fn paint(self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Heading => text.fg::<css::LightBlue>().to_string(),
            Tone::Muted => text.dimmed().to_string(),
            Tone::Clean => text.fg::<css::Green>().to_string(),
            Tone::Skipped => text.fg::<css::Orange>().to_string(),
        }
    }

    /// The number of skipped sections, with a mark for whether the parse was
    /// clean.
    #[must_use]
    pub fn skipped_sections(self, count: usize) -> String {
        let count_text = count.to_string();
        if count == 0 {
            format!("{} ✅", self.paint(&count_text, Tone::Clean))
        } else {
            format!("{} ⚠️", self.paint(&count_text, Tone::Skipped))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: Palette = Palette { enabled: false };
    const COLOURED: Palette = Palette { enabled: true };

    #[test]
    fn plain_palette_leaves_text_alone() {
        assert_eq!(PLAIN.paint("Average: 2.00", Tone::Clean), "Average: 2.00");
        assert_eq!(PLAIN.paint("12", Tone::Muted), "12");
    }

    #[test]
    fn coloured_palette_wraps_text_in_escapes() {
        let painted = COLOURED.paint("OFELST report", Tone::Heading);
        assert!(painted.starts_with('\u{1b}'));
        assert!(painted.contains("OFELST report"));
    }

    #[test]
    fn skipped_sections_are_marked() {
        assert_eq!(PLAIN.skipped_sections(0), "0 ✅");
        assert_eq!(PLAIN.skipped_sections(3), "3 ⚠️");
    }
}
