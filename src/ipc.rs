use std::io::BufRead;
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::time::Duration;

use futures::channel::mpsc;

use crate::app::Message;
use crate::expand::ViewMode;
use crate::theme::ThemeMode;

pub(crate) fn socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("bloc-grid.sock")
}

/// Map one control line to a viewer message.
pub(crate) fn parse_command(line: &str) -> Option<Message> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(' ') {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };
    match (cmd, arg) {
        ("mode", "") => Some(Message::CycleMode),
        ("mode", m) => ViewMode::parse(m).map(Message::SetMode),
        ("toggle", s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => Some(Message::ToggleSymbol(symbol)),
                _ => None,
            }
        }
        ("labels", "") => Some(Message::ToggleLabels),
        ("reload", "") => Some(Message::Reload),
        ("zoom-in", "") => Some(Message::ZoomIn),
        ("zoom-out", "") => Some(Message::ZoomOut),
        ("zoom-reset", "") => Some(Message::ZoomReset),
        ("export", "") => None,
        ("export", path) => Some(Message::Export(PathBuf::from(path))),
        ("theme", t) if t.eq_ignore_ascii_case("toggle") => Some(Message::ThemeToggle),
        ("theme", t) => ThemeMode::parse(t).map(Message::ThemeSet),
        _ => None,
    }
}

pub(crate) fn socket_listener() -> impl futures::Stream<Item = Message> {
    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || {
        let path = socket_path();
        let _ = std::fs::remove_file(&path);
        let listener = match UnixListener::bind(&path) {
            Ok(l) => l,
            Err(e) => {
                log::error!("failed to bind socket {path:?}: {e}");
                return;
            }
        };
        log::info!("listening on {path:?}");
        for stream in listener.incoming().flatten() {
            let mut buf = String::new();
            if std::io::BufReader::new(stream).read_line(&mut buf).is_ok() {
                let Some(msg) = parse_command(&buf) else {
                    log::warn!("unknown command: {:?}", buf.trim());
                    continue;
                };
                log::debug!("ipc: {msg:?}");
                if tx.unbounded_send(msg).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

pub(crate) fn tick_stream(ms: &u64) -> mpsc::UnboundedReceiver<Message> {
    let ms = *ms;
    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || loop {
        std::thread::sleep(Duration::from_millis(ms));
        if tx.unbounded_send(Message::Tick).is_err() {
            break;
        }
    });
    rx
}
