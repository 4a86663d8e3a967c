//! Terminal palette for findings.
//!
//! Plain ANSI bright colors so output reads the same on light and dark themes.

use colored::{ColoredString, Colorize};

use crate::checks::{Symbol, Verdict};

/// Role-named colors for anything string-like
pub trait Palette {
    fn good(&self) -> ColoredString;
    fn caution(&self) -> ColoredString;
    fn bad(&self) -> ColoredString;
    fn metric(&self) -> ColoredString;
    fn heading(&self) -> ColoredString;
    fn detail(&self) -> ColoredString;

    /// Color matching a finding's symbol
    fn for_symbol(&self, symbol: Symbol) -> ColoredString {
        match symbol {
            Symbol::Pass | Symbol::AllClear => self.good(),
            Symbol::Warn => self.caution(),
            Symbol::Fail => self.bad().bold(),
            Symbol::Error => self.bad(),
            Symbol::Timing | Symbol::Size | Symbol::Responsive => self.metric(),
        }
    }

    /// Color for a rolled-up verdict
    fn for_verdict(&self, verdict: Verdict) -> ColoredString {
        match verdict {
            Verdict::Pass => self.good(),
            Verdict::Warn => self.caution(),
            Verdict::Fail | Verdict::Error => self.bad(),
        }
    }
}

impl<S: AsRef<str>> Palette for S {
    fn good(&self) -> ColoredString {
        self.as_ref().bright_green()
    }

    fn caution(&self) -> ColoredString {
        self.as_ref().bright_yellow()
    }

    fn bad(&self) -> ColoredString {
        self.as_ref().bright_red()
    }

    fn metric(&self) -> ColoredString {
        self.as_ref().bright_cyan()
    }

    fn heading(&self) -> ColoredString {
        self.as_ref().bright_purple().bold()
    }

    fn detail(&self) -> ColoredString {
        self.as_ref().white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_colors() {
        colored::control::set_override(true);
        let fail = "broken".for_symbol(Symbol::Fail);
        let timing = "1.20 seconds".for_symbol(Symbol::Timing);
        colored::control::unset_override();

        assert_eq!(fail.fgcolor(), Some(colored::Color::BrightRed));
        assert!(fail.style().contains(colored::Styles::Bold));
        assert_eq!(timing.fgcolor(), Some(colored::Color::BrightCyan));
    }

    #[test]
    fn test_verdict_colors() {
        assert_eq!(
            "x".for_verdict(Verdict::Error).fgcolor(),
            Some(colored::Color::BrightRed)
        );
        assert_eq!(
            "x".for_verdict(Verdict::Warn).fgcolor(),
            Some(colored::Color::BrightYellow)
        );
    }
}
