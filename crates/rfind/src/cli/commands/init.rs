//! Implementation of `rfind init`.

use std::{fs, path::PathBuf, process::ExitCode};

use rfind_config::{
    CONFIG_FILENAME, ConfigError, global_config_path, global_template, local_template,
};
use rfind_highlight::{Highlighter, indent_content, subheader};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Where `init` writes and which template it uses.
enum Target {
    /// `~/.rfind.toml`, with the global template.
    Global(PathBuf),
    /// `.rfind.toml` in the working directory.
    Local(PathBuf),
}

impl Target {
    /// Picks the target. Running in the home directory always means the global file.
    fn resolve(ctx: &CommandContext, global: bool) -> Result<Self, ConfigError> {
        let home_file = global_config_path();
        let in_home = home_file
            .as_deref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd.as_path());
        if global || in_home {
            home_file.map(Self::Global).ok_or(ConfigError::NoHomeDirectory)
        } else {
            Ok(Self::Local(ctx.cwd.join(CONFIG_FILENAME)))
        }
    }

    /// Returns the file path.
    fn path(&self) -> &PathBuf {
        match self {
            Self::Global(path) | Self::Local(path) => path,
        }
    }

    /// Returns the commented-out template for this target.
    fn template(&self) -> String {
        match self {
            Self::Global(_) => global_template(),
            Self::Local(_) => local_template(),
        }
    }
}

/// Writes a commented `.rfind.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::resolve(ctx, cmd.global) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let path = target.path();

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    if let Err(e) = fs::write(path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Every setting starts commented out:"));
    println!("{}", indent_content(&Highlighter::new().highlight_toml(&template)));
    ExitCode::SUCCESS
}
