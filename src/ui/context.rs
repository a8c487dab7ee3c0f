//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// Environment variables that mark a non-interactive run
const AUTOMATION_VARS: &[&str] = &[
    "CI",
    "TF_IN_AUTOMATION",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
    "ATLANTIS_TERRAFORM_VERSION",
];

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether running in an interactive terminal
    interactive: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
        }
    }

    /// Create a non-interactive context (for testing or explicit CI mode)
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Check if we should use fancy output (cliclack log lines, colors)
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    /// Detect if running in an interactive environment
    fn detect_interactive() -> bool {
        // terraform itself may be prompting on stdin, so only stdout matters
        if !std::io::stdout().is_terminal() {
            return false;
        }

        !AUTOMATION_VARS
            .iter()
            .any(|var| std::env::var_os(var).is_some())
    }
}
