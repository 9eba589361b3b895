use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::process;

fn socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("bloc-grid.sock")
}

fn is_valid(cmd: &str) -> bool {
    match cmd.split_once(' ') {
        None => matches!(cmd, "mode" | "labels" | "reload" | "zoom-in" | "zoom-out" | "zoom-reset"),
        Some(("mode", arg)) => matches!(arg.trim().to_lowercase().as_str(), "action" | "content"),
        Some(("toggle", arg)) => arg.chars().count() == 1,
        Some(("export", arg)) => !arg.trim().is_empty(),
        Some(("theme", arg)) => matches!(
            arg.trim().to_lowercase().as_str(),
            "dark" | "light" | "auto" | "toggle"
        ),
        Some(_) => false,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        process::exit(1);
    }

    let mut cmd = args.join(" ");
    if !is_valid(&cmd) {
        eprintln!("unknown command: {cmd}");
        usage();
        process::exit(1);
    }

    // The viewer runs elsewhere; hand it an absolute export path.
    if let Some(("export", path)) = cmd.split_once(' ') {
        let path = PathBuf::from(path);
        if path.is_relative() {
            if let Ok(cwd) = std::env::current_dir() {
                cmd = format!("export {}", cwd.join(path).display());
            }
        }
    }

    let path = socket_path();
    let mut stream = match UnixStream::connect(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bloc-grid not running ({path:?}): {e}");
            process::exit(1);
        }
    };

    if let Err(e) = writeln!(stream, "{cmd}") {
        eprintln!("failed to send command: {e}");
        process::exit(1);
    }
}

fn usage() {
    eprintln!("usage: bloc-grid-ctl <command>");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  mode [action|content]     switch view mode (no argument cycles)");
    eprintln!("  toggle <symbol>           enable/disable a symbol's color");
    eprintln!("  labels                    show/hide symbols inside cells");
    eprintln!("  reload                    re-read the items file");
    eprintln!("  zoom-in | zoom-out        step the grid zoom");
    eprintln!("  zoom-reset                return to the fit zoom");
    eprintln!("  export <path>             write the grid as a PNG");
    eprintln!("  theme dark|light|auto|toggle");
}
