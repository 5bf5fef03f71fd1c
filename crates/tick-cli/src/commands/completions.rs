use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let script = render_script(shell, &mut command);

    match output_path {
        Some(path) => {
            std::fs::write(path, &script)?;
            println!("{}", path.display());
        }
        None => io::stdout().write_all(&script)?,
    }

    Ok(())
}

fn render_script(shell: CompletionShell, command: &mut clap::Command) -> Vec<u8> {
    let mut buffer = Vec::new();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, command, "tick", &mut buffer),
        CompletionShell::Zsh => generate(shells::Zsh, command, "tick", &mut buffer),
        CompletionShell::Fish => generate(shells::Fish, command, "tick", &mut buffer),
    }
    buffer
}
