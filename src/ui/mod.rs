//! UI module for consistent CLI output
//!
//! Uses `cliclack` log lines in an interactive terminal and falls back to
//! plain `[OK]` / `[FAIL]` prefixed lines in CI or when output is piped.

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, outro_error, outro_success, step_error_detail, step_info, step_new_detail,
    step_ok_detail, step_warn,
};
