//! Starter files written by `rfind init`.
//!
//! Templates ship as valid TOML documenting every setting at its default value. `init`
//! writes them with each setting commented out, so a fresh file changes nothing until
//! the user uncomments a line.

/// Project configuration template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Home-directory configuration template.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the project template with every setting commented out.
pub fn local_template() -> String {
    comment_out(LOCAL_TEMPLATE)
}

/// Returns the home-directory template with every setting commented out.
pub fn global_template() -> String {
    comment_out(GLOBAL_TEMPLATE)
}

/// Prefixes every setting and section header with `# `, leaving comments and blank lines.
fn comment_out(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}
