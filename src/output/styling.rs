use std::fmt::Display;

use console::{Style, StyledObject};

/// Terminal roles used by the banner, the spinner and the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Item currently being migrated, durations
    Active,
    Success,
    Failure,
    /// Secondary text such as labels and the version
    Muted,
    Heading,
    Title,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Active => Style::new().yellow().bright(),
            Self::Success => Style::new().green().bright(),
            Self::Failure => Style::new().red().bright(),
            Self::Muted => Style::new().dim(),
            Self::Heading => Style::new().bright(),
            Self::Title => Style::new().magenta().bold(),
        }
    }

    pub fn paint(self, text: impl Display) -> StyledObject<String> {
        self.style().apply_to(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text_when_colors_are_off() {
        let painted = Tone::Failure.paint("Migration aborted").force_styling(false);
        assert_eq!(painted.to_string(), "Migration aborted");
    }

    #[test]
    fn test_paint_applies_ansi_codes_when_forced() {
        let painted = Tone::Success.paint(42).force_styling(true).to_string();
        assert!(painted.contains("42"));
        assert!(painted.starts_with("\u{1b}["));
    }
}
