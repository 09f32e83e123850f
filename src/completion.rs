//! # Shell Completion Module
//!
//! Completion scripts generated from the clap definition in [`crate::cli`].
//! Mood arguments complete to the six mood labels.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! moodify completion bash > ~/.local/share/bash-completion/completions/moodify
//!
//! # Generate zsh completions
//! moodify completion zsh > ~/.config/zsh/completions/_moodify
//! ```

use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::Write;

use crate::cli::Shell;

/// Write completions for `cmd` to `out`.
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}
