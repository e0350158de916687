//! Command dispatch for submitted lines.

use chrono::{DateTime, Utc};
use platform_host::join_virtual_path;

use crate::{
    processes::{ActiveProcess, ProcessKind},
    session::{SessionStatus, TerminalClock, TerminalEffect, TerminalEntry, TerminalSession},
    vfs::{Vfs, VfsNode},
};

const HELP: &[(&str, &str)] = &[
    ("whoami", "About me"),
    ("projects", "List my open source projects"),
    ("fastfetch", "Display system information"),
    ("ls [dir]", "List directory contents"),
    ("cd <dir>", "Change directory"),
    ("pwd", "Print working directory"),
    ("cat <file>", "Print a file"),
    ("echo <text>", "Print text"),
    ("history", "Show submitted commands"),
    ("date", "Show the current date"),
    ("pipes.sh", "Animated terminal pipes"),
    ("peaclock", "ASCII digital clock"),
    ("cmatrix", "Falling code rain"),
    ("clear", "Clear the terminal screen"),
    ("exit", "Close this terminal"),
    ("reboot", "Restart the desktop"),
];

const PROJECTS: &str = "XBash - Bash image uploader\nytxtract - Python media downloader toolkit";

const WHOAMI: &str = "Hello! I'm Kem. A student, developer, and Android modifier.";

const ARCH_LOGO: &[&str] = &[
    "       /\\       ",
    "      /  \\      ",
    "     /    \\     ",
    "    /      \\    ",
    "   /   ,,   \\   ",
    "  /   |  |   \\  ",
    " /_-''    ''-_\\ ",
];

const FASTFETCH_INFO: &[&str] = &[
    "kem@arch",
    "-------------------",
    "OS: Arch Linux x86_64",
    "Host: Custom Portfolio Web",
    "Shell: zsh 5.9",
    "WM: leptos-csr",
];

const SUDO_REPLY: &str = "kem is not in the sudoers file. This incident will be reported.";
const PANIC_REPLY: &str =
    "[KERNEL PANIC] Permission denied! Nice try, but I can't let you delete my own portfolio :)";

/// Runs one trimmed, non-empty line against `session`.
pub(crate) fn dispatch(
    session: &mut TerminalSession,
    vfs: &Vfs,
    line: &str,
    clock: TerminalClock,
) -> Vec<TerminalEffect> {
    let lowered = line.to_lowercase();
    if lowered.starts_with("sudo") {
        session.push(TerminalEntry::error(SUDO_REPLY));
        return Vec::new();
    }
    if lowered.contains("rm -rf /") {
        session.push(TerminalEntry::error(PANIC_REPLY));
        return Vec::new();
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lowered.clone(), ""),
    };

    if let Some(kind) = ProcessKind::from_command(&name) {
        let seed = session.next_seed();
        session.active_process = Some(ActiveProcess::start(kind, seed, clock.local));
        return vec![TerminalEffect::StartTicker {
            period: kind.tick_period(),
        }];
    }

    match name.as_str() {
        "help" => session.push(TerminalEntry::output(help_text())),
        "whoami" => session.push(TerminalEntry::output(WHOAMI)),
        "projects" => session.push(TerminalEntry::output(PROJECTS)),
        "fastfetch" | "neofetch" => session.push(TerminalEntry::output(fastfetch_text())),
        "pwd" => {
            let cwd = session.cwd.clone();
            session.push(TerminalEntry::output(cwd));
        }
        "ls" => list(session, vfs, rest),
        "cd" => change_dir(session, vfs, rest),
        "cat" => concatenate(session, vfs, rest),
        "echo" => session.push(TerminalEntry::output(rest)),
        "history" => {
            let listing = session
                .history
                .iter()
                .enumerate()
                .map(|(idx, command)| format!("{:>4}  {command}", idx + 1))
                .collect::<Vec<_>>()
                .join("\n");
            session.push(TerminalEntry::output(listing));
        }
        "date" => match format_utc(clock.unix_ms) {
            Some(text) => session.push(TerminalEntry::output(text)),
            None => session.push(TerminalEntry::error("date: clock out of range")),
        },
        "clear" => session.scrollback.clear(),
        "exit" => {
            session.status = SessionStatus::Exited;
            return vec![TerminalEffect::CloseWindow];
        }
        "reboot" => {
            session.push(TerminalEntry::system("Rebooting..."));
            return vec![TerminalEffect::RebootDesktop];
        }
        _ => session.push(TerminalEntry::error(format!("command not found: {line}"))),
    }
    Vec::new()
}

fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for (usage, summary) in HELP {
        text.push_str(&format!("\n  {usage:<12} - {summary}"));
    }
    text
}

fn fastfetch_text() -> String {
    let rows = ARCH_LOGO.len().max(FASTFETCH_INFO.len());
    (0..rows)
        .map(|row| {
            let logo = ARCH_LOGO.get(row).copied().unwrap_or("                ");
            let info = FASTFETCH_INFO.get(row).copied().unwrap_or_default();
            format!("{logo}  {info}").trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn directory_listing(vfs: &Vfs, dir: &str) -> String {
    vfs.children(dir)
        .iter()
        .map(|name| {
            let path = join_virtual_path(dir, name);
            if vfs.is_dir(&path) {
                format!("{name}/")
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn list(session: &mut TerminalSession, vfs: &Vfs, target: &str) {
    if target.is_empty() {
        let listing = directory_listing(vfs, &session.cwd);
        session.push(TerminalEntry::output(listing));
        return;
    }
    let entry = match vfs.lookup(&session.cwd, target) {
        Some((path, VfsNode::Directory { .. })) => TerminalEntry::output(directory_listing(vfs, &path)),
        Some((_, VfsNode::File { .. })) => TerminalEntry::output(target),
        None => TerminalEntry::error(format!(
            "ls: cannot access '{target}': no such file or directory"
        )),
    };
    session.push(entry);
}

fn change_dir(session: &mut TerminalSession, vfs: &Vfs, target: &str) {
    match target {
        "" | "~" => session.cwd = vfs.root().to_string(),
        ".." => {
            if let Some(parent) = vfs.parent_dir(&session.cwd) {
                session.cwd = parent;
            }
        }
        name => match vfs.child_dir(&session.cwd, name) {
            Some(path) => session.cwd = path,
            None => session.push(TerminalEntry::error(format!(
                "cd: no such directory: {name}"
            ))),
        },
    }
}

fn concatenate(session: &mut TerminalSession, vfs: &Vfs, target: &str) {
    if target.is_empty() {
        session.push(TerminalEntry::error("cat: missing file operand"));
        return;
    }
    let entry = match vfs.lookup(&session.cwd, target) {
        Some((_, VfsNode::File { content })) => TerminalEntry::output(content.clone()),
        Some((_, VfsNode::Directory { .. })) => {
            TerminalEntry::error(format!("cat: {target}: is a directory"))
        }
        None => TerminalEntry::error(format!("cat: {target}: no such file")),
    };
    session.push(entry);
}

/// Formats unix milliseconds as `Mon 2026-10-19 14:03:22 UTC`.
fn format_utc(unix_ms: u64) -> Option<String> {
    let millis = i64::try_from(unix_ms).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|at| at.format("%a %Y-%m-%d %H:%M:%S UTC").to_string())
}
