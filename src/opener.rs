//! Opens URLs with the platform's default handler

use std::io;
use std::process::{Command, Stdio};

use tracing::{info, warn};

const NO_ARGS: &[&str] = &[];

// `start` treats its first quoted argument as the window title.
const WINDOWS_START_ARGS: &[&str] = &["/C", "start", ""];

/// Program and leading arguments used to open a URL on this platform
pub fn opener_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else if cfg!(target_os = "windows") {
        ("cmd", WINDOWS_START_ARGS)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Launches the default handler for `url` without waiting for it
pub fn open_url(url: &str) -> io::Result<()> {
    let (program, args) = opener_command();
    let mut child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap the opener off the UI thread.
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

/// Opens `url`, logging rather than returning failures
pub fn open_and_log(url: &str) {
    match open_url(url) {
        Ok(()) => info!(%url, "opened link"),
        Err(e) => warn!(%url, error = %e, "failed to open link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_command_for_platform() {
        let (program, _args) = opener_command();
        if cfg!(target_os = "linux") {
            assert_eq!(program, "xdg-open");
        }
        assert!(!program.is_empty());
    }
}
