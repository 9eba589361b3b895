//! Process-wide logging bootstrap.
//!
//! Logs go to stderr through `flexi_logger`. `RUST_LOG` overrides the
//! build-mode default level.

use flexi_logger::{Logger, LoggerHandle};

use crate::util::{single_line, truncate_str};

const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Start logging. Keep the returned handle alive for the life of the process.
pub fn init_logging() -> Result<LoggerHandle, String> {
    let handle = Logger::try_with_env_or_str(default_log_level())
        .map_err(|err| format!("invalid log specification: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::opt_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    Ok(handle)
}

fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        log::error!("panic at {location}: {}", panic_payload_summary(panic_info));
        previous_hook(panic_info);
    }));
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    truncate_str(&single_line(&payload), MAX_PANIC_PAYLOAD_CHARS)
}
