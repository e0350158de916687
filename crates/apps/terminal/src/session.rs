//! Terminal session state and its reducer.
//!
//! A session is plain data. The view owns one per window inside a signal and feeds it
//! [`TerminalAction`]s; the reducer returns [`TerminalEffect`]s for the view to perform against
//! the host (timers, window commands). Nothing here is shared between windows.

use std::time::Duration;

use platform_host::{unix_time_ms_now, LocalClockTime};

use crate::{
    commands,
    completion::{self, Completion},
    processes::{ActiveProcess, XorShift64},
    vfs::Vfs,
};

/// User and host shown in prompts and window titles.
pub const PROMPT_USER: &str = "kem@arch";

/// First scrollback line of a fresh session.
pub const WELCOME_LINE: &str =
    "Welcome to Arch UI Portfolio. Type help to see available commands.";

/// Wall-clock reading passed into the reducer so transitions stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalClock {
    /// Unix time in milliseconds.
    pub unix_ms: u64,
    /// Local time of day.
    pub local: LocalClockTime,
}

impl TerminalClock {
    /// Reads the host clock.
    pub fn now() -> Self {
        Self {
            unix_ms: unix_time_ms_now(),
            local: LocalClockTime::now(),
        }
    }
}

/// One rendered scrollback entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminalEntry {
    /// Echo of a submitted (or interrupted) input line.
    Prompt {
        /// Prompt text at submission time.
        prompt: String,
        /// Line as submitted.
        command: String,
    },
    /// Command output.
    Output {
        /// Possibly multi-line text.
        text: String,
    },
    /// Command failure.
    Error {
        /// Message.
        text: String,
    },
    /// Session notices (welcome banner, interrupts).
    System {
        /// Message.
        text: String,
    },
}

impl TerminalEntry {
    pub(crate) fn output(text: impl Into<String>) -> Self {
        Self::Output { text: text.into() }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self::Error { text: text.into() }
    }

    pub(crate) fn system(text: impl Into<String>) -> Self {
        Self::System { text: text.into() }
    }
}

/// Whether the session still accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Accepting input.
    #[default]
    Running,
    /// `exit` was run; every further action is ignored.
    Exited,
}

/// Input mode derived from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Line editing.
    Prompt,
    /// A full-screen process owns the terminal.
    Process,
    /// Session has exited.
    Exited,
}

/// Per-window interpreter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSession {
    /// Rendered entries, oldest first.
    pub scrollback: Vec<TerminalEntry>,
    /// Uncommitted input line.
    pub input: String,
    /// Submitted non-empty commands, oldest first.
    pub history: Vec<String>,
    /// History index being recalled, `None` when not recalling.
    pub history_cursor: Option<usize>,
    /// Current directory; always a directory of the session's filesystem.
    pub cwd: String,
    /// Running full-screen process, if any.
    pub active_process: Option<ActiveProcess>,
    /// Running or exited.
    pub status: SessionStatus,
    rng: XorShift64,
}

impl TerminalSession {
    /// Creates a session in `vfs`'s home directory. `seed` drives process animations.
    pub fn new(vfs: &Vfs, seed: u64) -> Self {
        Self {
            scrollback: vec![TerminalEntry::system(WELCOME_LINE)],
            input: String::new(),
            history: Vec::new(),
            history_cursor: None,
            cwd: vfs.root().to_string(),
            active_process: None,
            status: SessionStatus::Running,
            rng: XorShift64::new(seed),
        }
    }

    /// Current input mode.
    pub fn mode(&self) -> SessionMode {
        match (self.status, &self.active_process) {
            (SessionStatus::Exited, _) => SessionMode::Exited,
            (SessionStatus::Running, Some(_)) => SessionMode::Process,
            (SessionStatus::Running, None) => SessionMode::Prompt,
        }
    }

    /// Prompt text for the current directory, e.g. `kem@arch:~/projects$`.
    pub fn prompt(&self, vfs: &Vfs) -> String {
        format!("{PROMPT_USER}:{}$", vfs.display_path(&self.cwd))
    }

    /// Window title for the current directory, e.g. `kem@arch: ~/projects`.
    pub fn title(&self, vfs: &Vfs) -> String {
        format!("{PROMPT_USER}: {}", vfs.display_path(&self.cwd))
    }

    pub(crate) fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub(crate) fn push(&mut self, entry: TerminalEntry) {
        self.scrollback.push(entry);
    }
}

/// Input events a session understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalAction {
    /// Replace the input line (typing).
    SetInput(String),
    /// Enter.
    Submit {
        /// Clock reading at submission.
        clock: TerminalClock,
    },
    /// ArrowUp.
    HistoryPrev,
    /// ArrowDown.
    HistoryNext,
    /// Tab.
    Complete,
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+L.
    ClearScreen,
    /// Host timer tick for the running process.
    Tick {
        /// Clock reading at the tick.
        clock: TerminalClock,
    },
}

/// Host work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEffect {
    /// Start ticking the active process every `period`.
    StartTicker {
        /// Tick period.
        period: Duration,
    },
    /// Stop the process ticker.
    StopTicker,
    /// Retitle the hosting window.
    SetTitle(String),
    /// Close the hosting window.
    CloseWindow,
    /// Reboot the desktop.
    RebootDesktop,
}

/// Applies `action` to `session`.
pub fn reduce_terminal(
    session: &mut TerminalSession,
    vfs: &Vfs,
    action: TerminalAction,
) -> Vec<TerminalEffect> {
    match session.mode() {
        SessionMode::Exited => Vec::new(),
        SessionMode::Process => reduce_process(session, action),
        SessionMode::Prompt => reduce_prompt(session, vfs, action),
    }
}

fn reduce_process(session: &mut TerminalSession, action: TerminalAction) -> Vec<TerminalEffect> {
    match action {
        TerminalAction::Interrupt => {
            session.active_process = None;
            session.push(TerminalEntry::system("^C"));
            vec![TerminalEffect::StopTicker]
        }
        TerminalAction::Tick { clock } => {
            if let Some(process) = session.active_process.as_mut() {
                process.tick(clock.local);
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn reduce_prompt(
    session: &mut TerminalSession,
    vfs: &Vfs,
    action: TerminalAction,
) -> Vec<TerminalEffect> {
    match action {
        TerminalAction::SetInput(text) => {
            session.input = text;
            Vec::new()
        }
        TerminalAction::Submit { clock } => submit(session, vfs, clock),
        TerminalAction::HistoryPrev => {
            recall_previous(session);
            Vec::new()
        }
        TerminalAction::HistoryNext => {
            recall_next(session);
            Vec::new()
        }
        TerminalAction::Complete => {
            match completion::complete(&session.input, &session.cwd, vfs) {
                Completion::None => {}
                Completion::Replace(line) => session.input = line,
                Completion::Candidates(items) => session.push(TerminalEntry::output(items.join("  "))),
            }
            Vec::new()
        }
        TerminalAction::Interrupt => {
            let input = std::mem::take(&mut session.input);
            let prompt = session.prompt(vfs);
            session.push(TerminalEntry::Prompt {
                prompt,
                command: format!("{input}^C"),
            });
            session.history_cursor = None;
            Vec::new()
        }
        TerminalAction::ClearScreen => {
            session.scrollback.clear();
            Vec::new()
        }
        TerminalAction::Tick { .. } => Vec::new(),
    }
}

fn submit(session: &mut TerminalSession, vfs: &Vfs, clock: TerminalClock) -> Vec<TerminalEffect> {
    let line = std::mem::take(&mut session.input);
    let command = line.trim().to_string();
    session.history_cursor = None;
    let prompt = session.prompt(vfs);

    if command.is_empty() {
        session.push(TerminalEntry::Prompt {
            prompt,
            command: String::new(),
        });
        return Vec::new();
    }

    session.history.push(command.clone());
    session.push(TerminalEntry::Prompt {
        prompt,
        command: command.clone(),
    });

    let cwd_before = session.cwd.clone();
    let mut effects = commands::dispatch(session, vfs, &command, clock);
    if session.cwd != cwd_before {
        effects.push(TerminalEffect::SetTitle(session.title(vfs)));
    }
    effects
}

fn recall_previous(session: &mut TerminalSession) {
    if session.history.is_empty() {
        return;
    }
    let index = match session.history_cursor {
        None => session.history.len() - 1,
        Some(index) => index.saturating_sub(1),
    };
    session.history_cursor = Some(index);
    session.input = session.history[index].clone();
}

fn recall_next(session: &mut TerminalSession) {
    let Some(index) = session.history_cursor else {
        return;
    };
    let next = index + 1;
    if next >= session.history.len() {
        session.history_cursor = None;
        session.input.clear();
    } else {
        session.history_cursor = Some(next);
        session.input = session.history[next].clone();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        processes::{ProcessKind, EXIT_HINT},
        vfs::{build_portfolio_vfs, HOME_DIR},
    };

    fn fixture() -> (Vfs, TerminalSession) {
        let vfs = build_portfolio_vfs().expect("vfs");
        let session = TerminalSession::new(&vfs, 42);
        (vfs, session)
    }

    fn run(session: &mut TerminalSession, vfs: &Vfs, line: &str) -> Vec<TerminalEffect> {
        reduce_terminal(session, vfs, TerminalAction::SetInput(line.to_string()));
        reduce_terminal(
            session,
            vfs,
            TerminalAction::Submit {
                clock: TerminalClock::default(),
            },
        )
    }

    fn last_entry(session: &TerminalSession) -> &TerminalEntry {
        session.scrollback.last().expect("entry")
    }

    #[test]
    fn new_session_starts_at_home_with_welcome_banner() {
        let (vfs, session) = fixture();
        assert_eq!(session.cwd, HOME_DIR);
        assert_eq!(session.scrollback, vec![TerminalEntry::system(WELCOME_LINE)]);
        assert_eq!(session.prompt(&vfs), "kem@arch:~$");
        assert_eq!(session.mode(), SessionMode::Prompt);
    }

    #[test]
    fn empty_submit_echoes_bare_prompt_without_history() {
        let (vfs, mut session) = fixture();
        let effects = run(&mut session, &vfs, "   ");
        assert!(effects.is_empty());
        assert!(session.history.is_empty());
        assert_eq!(
            last_entry(&session),
            &TerminalEntry::Prompt {
                prompt: "kem@arch:~$".to_string(),
                command: String::new(),
            }
        );
    }

    #[test]
    fn cd_pwd_and_parent_navigation() {
        let (vfs, mut session) = fixture();
        let effects = run(&mut session, &vfs, "cd projects");
        assert_eq!(
            effects,
            vec![TerminalEffect::SetTitle("kem@arch: ~/projects".to_string())]
        );

        run(&mut session, &vfs, "pwd");
        assert_eq!(last_entry(&session), &TerminalEntry::output("/home/kem/projects"));

        run(&mut session, &vfs, "cd ..");
        assert_eq!(session.cwd, HOME_DIR);

        let effects = run(&mut session, &vfs, "cd ..");
        assert!(effects.is_empty());
        assert_eq!(session.cwd, HOME_DIR);
    }

    #[test]
    fn cat_missing_file_is_an_error_entry() {
        let (vfs, mut session) = fixture();
        run(&mut session, &vfs, "cat nonexistent.txt");
        assert_eq!(
            last_entry(&session),
            &TerminalEntry::error("cat: nonexistent.txt: no such file")
        );
    }

    #[test]
    fn history_recall_resubmits_older_command() {
        let (vfs, mut session) = fixture();
        run(&mut session, &vfs, "a");
        run(&mut session, &vfs, "b");

        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryPrev);
        assert_eq!(session.input, "b");
        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryPrev);
        assert_eq!(session.input, "a");
        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryPrev);
        assert_eq!(session.history_cursor, Some(0));

        reduce_terminal(
            &mut session,
            &vfs,
            TerminalAction::Submit {
                clock: TerminalClock::default(),
            },
        );
        assert_eq!(session.history, vec!["a", "b", "a"]);
        assert_eq!(session.history_cursor, None);
        assert_eq!(last_entry(&session), &TerminalEntry::error("command not found: a"));
    }

    #[test]
    fn history_next_past_newest_clears_input() {
        let (vfs, mut session) = fixture();
        run(&mut session, &vfs, "a");
        run(&mut session, &vfs, "b");

        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryNext);
        assert_eq!(session.input, "");

        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryPrev);
        reduce_terminal(&mut session, &vfs, TerminalAction::HistoryNext);
        assert_eq!(session.input, "");
        assert_eq!(session.history_cursor, None);
    }

    #[test]
    fn tab_completion_edits_input_or_lists_candidates() {
        let (vfs, mut session) = fixture();
        reduce_terminal(&mut session, &vfs, TerminalAction::SetInput("h".to_string()));
        let before = session.scrollback.len();
        reduce_terminal(&mut session, &vfs, TerminalAction::Complete);
        assert_eq!(session.input, "h");
        assert_eq!(session.scrollback.len(), before + 1);
        assert_eq!(last_entry(&session), &TerminalEntry::output("help  history"));

        reduce_terminal(&mut session, &vfs, TerminalAction::SetInput("he".to_string()));
        reduce_terminal(&mut session, &vfs, TerminalAction::Complete);
        assert_eq!(session.input, "help ");
    }

    #[test]
    fn interrupt_at_prompt_echoes_and_clears_line() {
        let (vfs, mut session) = fixture();
        reduce_terminal(&mut session, &vfs, TerminalAction::SetInput("whoa".to_string()));
        let effects = reduce_terminal(&mut session, &vfs, TerminalAction::Interrupt);
        assert!(effects.is_empty());
        assert_eq!(session.input, "");
        assert_eq!(
            last_entry(&session),
            &TerminalEntry::Prompt {
                prompt: "kem@arch:~$".to_string(),
                command: "whoa^C".to_string(),
            }
        );
    }

    #[test]
    fn process_takeover_ignores_input_until_interrupted() {
        let (vfs, mut session) = fixture();
        let effects = run(&mut session, &vfs, "pipes.sh");
        assert_eq!(
            effects,
            vec![TerminalEffect::StartTicker {
                period: Duration::from_millis(30)
            }]
        );
        assert_eq!(session.mode(), SessionMode::Process);
        let process = session.active_process.as_ref().expect("process");
        assert_eq!(process.kind(), ProcessKind::Pipes);
        assert_eq!(process.frame_lines().last().map(String::as_str), Some(EXIT_HINT));

        let history_len = session.history.len();
        reduce_terminal(&mut session, &vfs, TerminalAction::SetInput("ls".to_string()));
        reduce_terminal(
            &mut session,
            &vfs,
            TerminalAction::Submit {
                clock: TerminalClock::default(),
            },
        );
        assert_eq!(session.history.len(), history_len);
        assert_eq!(session.input, "");

        reduce_terminal(
            &mut session,
            &vfs,
            TerminalAction::Tick {
                clock: TerminalClock::default(),
            },
        );
        let effects = reduce_terminal(&mut session, &vfs, TerminalAction::Interrupt);
        assert_eq!(effects, vec![TerminalEffect::StopTicker]);
        assert_eq!(session.mode(), SessionMode::Prompt);
        assert_eq!(last_entry(&session), &TerminalEntry::system("^C"));
    }

    #[test]
    fn exit_closes_window_and_freezes_session() {
        let (vfs, mut session) = fixture();
        assert_eq!(run(&mut session, &vfs, "exit"), vec![TerminalEffect::CloseWindow]);
        assert_eq!(session.mode(), SessionMode::Exited);

        let frozen = session.clone();
        run(&mut session, &vfs, "help");
        assert_eq!(session, frozen);
    }

    #[test]
    fn reboot_requests_desktop_reset() {
        let (vfs, mut session) = fixture();
        assert_eq!(run(&mut session, &vfs, "REBOOT"), vec![TerminalEffect::RebootDesktop]);
        assert_eq!(session.mode(), SessionMode::Prompt);
    }

    #[test]
    fn clear_screen_keeps_history() {
        let (vfs, mut session) = fixture();
        run(&mut session, &vfs, "whoami");
        reduce_terminal(&mut session, &vfs, TerminalAction::ClearScreen);
        assert!(session.scrollback.is_empty());
        assert_eq!(session.history, vec!["whoami"]);
    }

    #[test]
    fn sessions_are_isolated() {
        let vfs = build_portfolio_vfs().expect("vfs");
        let mut a = TerminalSession::new(&vfs, 1);
        let mut b = TerminalSession::new(&vfs, 2);

        run(&mut a, &vfs, "cd school");
        run(&mut a, &vfs, "whoami");
        run(&mut b, &vfs, "projects");

        let mentions = |session: &TerminalSession, needle: &str| {
            session.scrollback.iter().any(|entry| {
                matches!(entry, TerminalEntry::Prompt { command, .. } if command == needle)
            })
        };
        assert!(mentions(&a, "whoami"));
        assert!(!mentions(&b, "whoami"));
        assert!(mentions(&b, "projects"));
        assert!(!mentions(&a, "projects"));
        assert_eq!(a.cwd, "/home/kem/school");
        assert_eq!(b.cwd, HOME_DIR);
        assert_eq!(b.history, vec!["projects"]);
    }
}
