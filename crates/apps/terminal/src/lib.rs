//! Simulated terminal content for desktop windows.
//!
//! Every window painted with [`TerminalApp`] owns an independent [`TerminalSession`] over the
//! shared read-only portfolio filesystem. Key presses become [`TerminalAction`]s; the resulting
//! [`TerminalEffect`]s are carried out through the window's [`PaintRegion`] (scheduled ticks for
//! full-screen processes, close/reboot/title commands to the desktop).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod commands;
pub mod completion;
pub mod processes;
pub mod session;
pub mod vfs;

use std::{cell::RefCell, rc::Rc, time::Duration};

use desktop_app_contract::{
    window_primary_input_dom_id, AppHost, AppModule, PaintRegion, ScheduledTask, WindowTasks,
};
use leptos::ev::KeyboardEvent;
use leptos::*;
use platform_host::unix_time_ms_now;

pub use completion::{complete, Completion, COMMAND_NAMES};
pub use processes::{ActiveProcess, ProcessKind, EXIT_HINT};
pub use session::{
    reduce_terminal, SessionMode, SessionStatus, TerminalAction, TerminalClock, TerminalEffect,
    TerminalEntry, TerminalSession, PROMPT_USER, WELCOME_LINE,
};
pub use vfs::{build_portfolio_vfs, portfolio_vfs, Vfs, VfsError, VfsNode, HOME_DIR};

/// Renderable registered by the desktop runtime for terminal windows.
pub const TERMINAL_MODULE: AppModule = AppModule::new(paint_terminal);

fn paint_terminal(region: PaintRegion) -> View {
    view! { <TerminalApp region=region /> }.into_view()
}

fn session_seed(region: &PaintRegion) -> u64 {
    region
        .window_id
        .as_str()
        .bytes()
        .fold(unix_time_ms_now(), |acc, b| {
            acc.rotate_left(5) ^ u64::from(b)
        })
}

#[derive(Clone)]
struct TerminalController {
    session: RwSignal<TerminalSession>,
    vfs: Rc<Vfs>,
    tasks: WindowTasks,
    host: AppHost,
    ticker: Rc<RefCell<Option<ScheduledTask>>>,
}

impl TerminalController {
    fn dispatch(&self, action: TerminalAction) {
        let mut effects = Vec::new();
        self.session
            .update(|session| effects = reduce_terminal(session, &self.vfs, action));
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: TerminalEffect) {
        match effect {
            TerminalEffect::StartTicker { period } => self.start_ticker(period),
            TerminalEffect::StopTicker => self.stop_ticker(),
            TerminalEffect::SetTitle(title) => self.host.set_title(title),
            TerminalEffect::CloseWindow => {
                self.stop_ticker();
                self.host.close_window();
            }
            TerminalEffect::RebootDesktop => {
                self.stop_ticker();
                self.host.reboot_desktop();
            }
        }
    }

    fn start_ticker(&self, period: Duration) {
        let session = self.session;
        let vfs = self.vfs.clone();
        let tick = move || {
            session.try_update(|session| {
                reduce_terminal(
                    session,
                    &vfs,
                    TerminalAction::Tick {
                        clock: TerminalClock::now(),
                    },
                )
            });
        };
        match self.tasks.repeat(period, tick) {
            Ok(task) => *self.ticker.borrow_mut() = Some(task),
            Err(err) => logging::warn!("terminal ticker unavailable: {err}"),
        }
    }

    fn stop_ticker(&self) {
        let task = self.ticker.borrow_mut().take();
        drop(task);
    }
}

fn render_entry(entry: TerminalEntry) -> View {
    match entry {
        TerminalEntry::Prompt { prompt, command } => view! {
            <div class="terminal-line terminal-line-prompt">
                <span class="terminal-prompt">{prompt}</span>
                " "
                {command}
            </div>
        }
        .into_view(),
        TerminalEntry::Output { text } => {
            view! { <pre class="terminal-line terminal-line-output">{text}</pre> }.into_view()
        }
        TerminalEntry::Error { text } => {
            view! { <pre class="terminal-line terminal-line-error">{text}</pre> }.into_view()
        }
        TerminalEntry::System { text } => {
            view! { <div class="terminal-line terminal-line-system">{text}</div> }.into_view()
        }
    }
}

fn key_action(ev: &KeyboardEvent) -> Option<TerminalAction> {
    let ctrl = ev.ctrl_key();
    match ev.key().as_str() {
        "Enter" if !ctrl => Some(TerminalAction::Submit {
            clock: TerminalClock::now(),
        }),
        "ArrowUp" => Some(TerminalAction::HistoryPrev),
        "ArrowDown" => Some(TerminalAction::HistoryNext),
        "Tab" => Some(TerminalAction::Complete),
        "c" | "C" if ctrl => Some(TerminalAction::Interrupt),
        "l" | "L" if ctrl => Some(TerminalAction::ClearScreen),
        _ => None,
    }
}

#[component]
/// Terminal window contents.
///
/// Keyboard input is only acted on while the hosting window holds focus.
pub fn TerminalApp(
    /// Region handed over by the window manager.
    region: PaintRegion,
) -> impl IntoView {
    let vfs = portfolio_vfs();
    let session = create_rw_signal(TerminalSession::new(&vfs, session_seed(&region)));
    let controller = TerminalController {
        session,
        vfs: vfs.clone(),
        tasks: region.tasks.clone(),
        host: region.host,
        ticker: Rc::new(RefCell::new(None)),
    };
    let input_id = window_primary_input_dom_id(&region.window_id);
    let focused = region.focused;
    let input_ref = create_node_ref::<html::Input>();
    let screen_ref = create_node_ref::<html::Div>();

    on_cleanup({
        let controller = controller.clone();
        move || controller.stop_ticker()
    });

    create_effect(move |_| {
        session.with(|session| session.scrollback.len());
        if let Some(screen) = screen_ref.get() {
            screen.set_scroll_top(screen.scroll_height());
        }
    });

    let in_process = move || session.with(|session| session.active_process.is_some());
    let process_frame = move || {
        session.with(|session| {
            session.active_process.as_ref().map(|process| {
                (
                    process.kind().css_class(),
                    process.is_flashing(),
                    process.frame_lines().join("\n"),
                )
            })
        })
    };
    let entries = move || {
        session.with(|session| {
            session
                .scrollback
                .iter()
                .cloned()
                .enumerate()
                .collect::<Vec<_>>()
        })
    };
    let prompt_vfs = vfs.clone();
    let prompt = move || session.with(|session| session.prompt(&prompt_vfs));

    let on_keydown = {
        let controller = controller.clone();
        move |ev: KeyboardEvent| {
            if !focused.get_untracked() {
                return;
            }
            let Some(action) = key_action(&ev) else {
                return;
            };
            if action != TerminalAction::Interrupt {
                ev.prevent_default();
            }
            controller.dispatch(action);
        }
    };
    let on_input = {
        let controller = controller.clone();
        move |ev: ev::Event| controller.dispatch(TerminalAction::SetInput(event_target_value(&ev)))
    };
    let focus_input = move |_: ev::MouseEvent| {
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    view! {
        <div
            class="app-shell app-terminal-shell"
            class:is-unfocused=move || !focused.get()
            tabindex="-1"
            on:keydown=on_keydown
            on:click=focus_input
        >
            {move || {
                process_frame()
                    .map(|(class, flashing, frame)| {
                        view! {
                            <div class=format!("terminal-process {class}") class:is-flashing=flashing>
                                <pre class="terminal-process-frame">{frame}</pre>
                            </div>
                        }
                    })
            }}

            <div
                class="terminal-screen"
                class:is-suspended=in_process
                role="log"
                aria-live="polite"
                node_ref=screen_ref
            >
                <For
                    each=entries
                    key=|(idx, entry)| (*idx, entry.clone())
                    children=|(_, entry)| render_entry(entry)
                />
            </div>

            <div class="terminal-input-row" class:is-suspended=in_process>
                <label class="terminal-prompt" for=input_id.clone()>
                    {prompt}
                </label>
                <input
                    id=input_id
                    node_ref=input_ref
                    class="terminal-input"
                    type="text"
                    prop:value=move || session.with(|session| session.input.clone())
                    on:input=on_input
                    autocomplete="off"
                    spellcheck="false"
                />
            </div>
        </div>
    }
}
