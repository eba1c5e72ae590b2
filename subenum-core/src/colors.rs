//! Catppuccin-inspired color palette for terminal output.
//!
//! Maps the palette onto standard ANSI bright colors so it renders on any
//! terminal that `colored` supports.

use colored::{ColoredString, Colorize};

/// Palette accessors for anything string-like.
pub trait CatppuccinExt {
    fn pink(&self) -> ColoredString;
    fn ctp_red(&self) -> ColoredString;
    fn ctp_yellow(&self) -> ColoredString;
    fn ctp_green(&self) -> ColoredString;
    fn sky(&self) -> ColoredString;
    fn ctp_blue(&self) -> ColoredString;
    fn lavender(&self) -> ColoredString;

    fn subtext0(&self) -> ColoredString;
    fn ctp_white(&self) -> ColoredString;
    fn overlay1(&self) -> ColoredString;
}

impl<S: AsRef<str>> CatppuccinExt for S {
    fn pink(&self) -> ColoredString {
        self.as_ref().bright_magenta()
    }

    fn ctp_red(&self) -> ColoredString {
        self.as_ref().bright_red()
    }

    fn ctp_yellow(&self) -> ColoredString {
        self.as_ref().bright_yellow()
    }

    fn ctp_green(&self) -> ColoredString {
        self.as_ref().bright_green()
    }

    fn sky(&self) -> ColoredString {
        self.as_ref().bright_cyan()
    }

    fn ctp_blue(&self) -> ColoredString {
        self.as_ref().bright_blue()
    }

    // Lavender -> bright purple
    fn lavender(&self) -> ColoredString {
        self.as_ref().bright_purple()
    }

    fn subtext0(&self) -> ColoredString {
        self.as_ref().white()
    }

    fn ctp_white(&self) -> ColoredString {
        self.as_ref().bright_white()
    }

    // Overlay -> gray
    fn overlay1(&self) -> ColoredString {
        self.as_ref().bright_black()
    }
}
