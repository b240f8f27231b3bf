//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StudyError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error for an unsupported shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, StudyError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        StudyError::Config(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, StudyError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "studylog", &mut buf);
    String::from_utf8(buf).map_err(|e| StudyError::Parse(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc:
source <(studylog completions bash)
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
studylog completions zsh > ~/.zsh/completions/_studylog
# Then add to ~/.zshrc:
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
studylog completions fish > ~/.config/fish/completions/studylog.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
studylog completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
studylog completions elvish > ~/.elvish/lib/studylog.elv
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}
