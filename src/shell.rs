//! Login shell discovery.
//!
//! Every ssh command runs inside a login shell. The shell comes from, in
//! order: the config file, `$SHELL`, or the first of [`FALLBACK_SHELLS`]
//! found on `PATH`.

use crate::error::{GridError, Result};
use tracing::debug;

/// Shells tried on `PATH` when nothing else names one.
pub const FALLBACK_SHELLS: &[&str] = &["bash", "zsh", "sh"];

/// Pick the login shell.
///
/// `env_shell` is the value of `$SHELL`, passed in by the caller.
///
/// # Errors
///
/// [`GridError::NoShellAvailable`] if no candidate is usable.
pub fn resolve_login_shell(configured: Option<&str>, env_shell: Option<&str>) -> Result<String> {
    let explicit = [configured, env_shell]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty());
    if let Some(shell) = explicit {
        debug!(shell, "using login shell");
        return Ok(shell.to_string());
    }

    FALLBACK_SHELLS
        .iter()
        .find_map(|name| which::which(name).ok())
        .map(|path| {
            let shell = path.to_string_lossy().into_owned();
            debug!(shell = %shell, "using fallback login shell");
            shell
        })
        .ok_or(GridError::NoShellAvailable)
}
