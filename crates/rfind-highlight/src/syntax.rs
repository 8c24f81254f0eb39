//! Syntax highlighting for configuration files and markup.

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

use crate::style::colors;

/// Highlights source text for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights a `.rfind.toml` file or settings dump.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights HTML-like markup, such as a document with highlight markers written back.
    pub fn highlight_markup(&self, content: &str) -> String {
        self.highlight(content, "html")
    }

    /// Highlights `content` using the syntax named by extension or name.
    ///
    /// Unknown syntaxes fall back to plain text. The output always ends with a reset.
    pub fn highlight(&self, content: &str, syntax: &str) -> String {
        let syntax = self.find_syntax(syntax);
        let theme = self.theme_set.get(self.theme);
        let mut lines = HighlightLines::new(syntax, theme);

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(colors::RESET);
        output
    }

    /// Looks a syntax up by extension, then by name.
    fn find_syntax(&self, syntax: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[markers]\nhighlight = \"hit\"\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
        assert!(output.contains("markers"));
    }

    #[test]
    fn highlights_markup() {
        let hl = Highlighter::new();
        let output = hl.highlight_markup("<p>say <span class=\"highlight\">hi</span></p>\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("highlight"));
    }

    #[test]
    fn unknown_syntax_is_plain_text() {
        let hl = Highlighter::new();
        let output = hl.highlight("just words\n", "no-such-syntax");
        assert!(output.contains("just words"));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn bundled_syntaxes_are_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("html").is_some());
    }
}
