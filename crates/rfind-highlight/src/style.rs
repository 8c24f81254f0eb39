//! ANSI styling for headers, status lines and match markers.

/// ANSI escape codes.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text, for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text, for success.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text, for warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text, for errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim text, for less important detail.
    pub const DIM: &str = "\x1b[2m";
    /// Black on yellow, for highlighted matches.
    pub const MATCH: &str = "\x1b[30;43m";
    /// Bold black on orange, for the current match.
    pub const CURRENT: &str = "\x1b[1;30;48;5;208m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `codes` followed by a reset.
fn paint(codes: &str, text: &str) -> String {
    format!("{codes}{text}{}", colors::RESET)
}

/// Formats a header in bold cyan.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats a subheader in bold.
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats a success message in green.
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats a warning in yellow.
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Formats an error in red.
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every non-empty line by two spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
