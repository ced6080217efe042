//! Opacity store backed by the `xprop` command-line tool.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, trace};

use crate::{Error, OPACITY_ATOM, OpacityStore, Result, WindowId};

/// Format flag for a 32-bit cardinal property.
const CARDINAL_32: &str = "32c";

/// Runs `xprop` once per primitive operation.
///
/// No retries: each call is attempted exactly once and a non-zero exit is
/// surfaced as an [`Error`].
#[derive(Debug, Clone)]
pub struct Xprop {
    /// Program to execute, `xprop` unless overridden.
    program: String,
}

impl Default for Xprop {
    fn default() -> Self {
        Self::new()
    }
}

impl Xprop {
    /// Use the `xprop` found on `PATH`.
    pub fn new() -> Self {
        Self::with_program("xprop")
    }

    /// Use an explicit program path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `xprop -id <window> <args..>` and return stdout on success.
    async fn run(&self, window: WindowId, args: &[&str]) -> Result<String> {
        trace!(program = %self.program, %window, ?args, "xprop");
        let output = Command::new(&self.program)
            .arg("-id")
            .arg(window.to_string())
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::CommandStart {
                program: self.program.clone(),
                source,
            })?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains("BadWindow") {
            return Err(Error::WindowGone(window));
        }
        Err(Error::CommandFailed {
            program: self.program.clone(),
            window,
            status: output.status,
            stderr,
        })
    }
}

#[async_trait]
impl OpacityStore for Xprop {
    async fn read(&self, window: WindowId) -> Result<Option<u32>> {
        let stdout = self.run(window, &[]).await?;
        let value = parse_opacity(window, &stdout)?;
        match value {
            Some(v) => info!(%window, opacity = v, "Window has opacity"),
            None => info!(%window, "No opacity defined for window"),
        }
        Ok(value)
    }

    async fn remove(&self, window: WindowId) -> Result<()> {
        debug!(%window, "removing opacity property");
        self.run(window, &["-remove", OPACITY_ATOM]).await?;
        Ok(())
    }

    async fn set(&self, window: WindowId, value: u32) -> Result<()> {
        debug!(%window, opacity = value, "setting opacity property");
        let value = value.to_string();
        self.run(
            window,
            &["-f", OPACITY_ATOM, CARDINAL_32, "-set", OPACITY_ATOM, &value],
        )
        .await?;
        Ok(())
    }
}

/// Extract the opacity value from a full `xprop -id` listing.
///
/// The first line naming exactly this property (not a longer atom such as
/// `_NET_WM_WINDOW_OPACITY_LOCKED`) wins; its last token is the value, e.g. `_NET_WM_WINDOW_OPACITY(CARDINAL) = 3865470566`.
pub fn parse_opacity(window: WindowId, listing: &str) -> Result<Option<u32>> {
    let Some(line) = listing
        .lines()
        .map(str::trim)
        .find(|l| {
            l.strip_prefix(OPACITY_ATOM)
                .is_some_and(|rest| rest.starts_with(['(', ':']))
        })
    else {
        return Ok(None);
    };
    if line.ends_with("not found.") {
        return Ok(None);
    }
    let token = line.split_whitespace().last().unwrap_or_default();
    token
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Error::InvalidValue {
            window,
            value: token.to_string(),
        })
}
