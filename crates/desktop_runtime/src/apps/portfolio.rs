//! Portfolio content: the about card, the file browser and the text reader.
//!
//! The browser and reader show the same read-only tree the terminal navigates.

use desktop_app_contract::{AppModule, ApplicationId, ContentHandle, PaintRegion, WindowId};
use desktop_app_terminal::{portfolio_vfs, Vfs, VfsNode, HOME_DIR};
use leptos::*;
use serde_json::json;

use super::TEXT_READER_APP_ID;

pub(super) const ABOUT_MODULE: AppModule = AppModule::new(paint_about);
pub(super) const FILES_MODULE: AppModule = AppModule::new(paint_files);
pub(super) const TEXT_READER_MODULE: AppModule = AppModule::new(paint_text_reader);

const ABOUT_TEXT: &str = "Kem. Student, developer and Android modder.";
const CODE_EXTENSIONS: [&str; 4] = ["sh", "py", "dart", "rs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Folder,
    Code,
    Text,
}

impl EntryKind {
    fn of(vfs: &Vfs, path: &str) -> Self {
        if vfs.is_dir(path) {
            return Self::Folder;
        }
        let is_code = path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| CODE_EXTENSIONS.contains(&ext));
        if is_code {
            Self::Code
        } else {
            Self::Text
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Self::Folder => "entry-folder",
            Self::Code => "entry-code",
            Self::Text => "entry-text",
        }
    }
}

/// Window id used for a file's reader; one reader per file name.
fn reader_window_id(name: &str) -> WindowId {
    WindowId::new(format!("file-{name}"))
}

fn reader_content(path: &str) -> ContentHandle {
    ContentHandle::new(ApplicationId::trusted(TEXT_READER_APP_ID))
        .with_params(json!({ "path": path }))
}

/// Folder navigation with a back stack, rooted at the home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BrowserNav {
    stack: Vec<String>,
}

impl Default for BrowserNav {
    fn default() -> Self {
        Self {
            stack: vec![HOME_DIR.to_string()],
        }
    }
}

impl BrowserNav {
    fn current(&self) -> &str {
        self.stack.last().map_or(HOME_DIR, String::as_str)
    }

    fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    fn enter(&mut self, path: String) {
        self.stack.push(path);
    }

    fn back(&mut self) {
        if self.can_go_back() {
            self.stack.pop();
        }
    }

    fn home(&mut self) {
        self.stack.truncate(1);
    }
}

fn paint_about(_region: PaintRegion) -> View {
    view! {
        <div class="app app-about">
            <p>{ABOUT_TEXT}</p>
        </div>
    }
    .into_view()
}

fn paint_files(region: PaintRegion) -> View {
    view! { <FilesApp region=region /> }.into_view()
}

fn paint_text_reader(region: PaintRegion) -> View {
    view! { <TextReaderApp region=region /> }.into_view()
}

#[component]
fn FilesApp(region: PaintRegion) -> impl IntoView {
    let vfs = portfolio_vfs();
    let nav = create_rw_signal(BrowserNav::default());
    let host = region.host;

    let listing = {
        let vfs = vfs.clone();
        move || {
            nav.with(|nav| {
                let dir = nav.current();
                vfs.children(dir)
                    .iter()
                    .map(|name| {
                        let path = platform_host::join_virtual_path(dir, name);
                        (name.clone(), EntryKind::of(&vfs, &path), path)
                    })
                    .collect::<Vec<_>>()
            })
        }
    };
    let item_count = {
        let vfs = vfs.clone();
        move || nav.with(|nav| vfs.children(nav.current()).len())
    };

    let activate = move |name: String, kind: EntryKind, path: String| {
        if kind == EntryKind::Folder {
            nav.update(|nav| nav.enter(path));
        } else {
            host.open_window(reader_window_id(&name), name, reader_content(&path));
        }
    };

    view! {
        <div class="app app-files">
            <div class="files-toolbar">
                <button
                    type="button"
                    aria-label="Back"
                    disabled=move || nav.with(|nav| !nav.can_go_back())
                    on:click=move |_| nav.update(BrowserNav::back)
                >
                    "<"
                </button>
                <button type="button" aria-label="Home" on:click=move |_| nav.update(BrowserNav::home)>
                    "~"
                </button>
                <div class="files-path">{move || nav.with(|nav| format!("{}/", nav.current()))}</div>
            </div>
            <div class="files-grid">
                <For
                    each=listing
                    key=|(_, _, path)| path.clone()
                    children=move |(name, kind, path)| {
                        let label = name.clone();
                        view! {
                            <div
                                class=format!("files-entry {}", kind.css_class())
                                on:dblclick=move |_| activate(name.clone(), kind, path.clone())
                            >
                                <span class="files-entry-icon" aria-hidden="true"></span>
                                <span class="files-entry-name">{label}</span>
                            </div>
                        }
                    }
                />
            </div>
            <div class="files-status">{move || format!("{} items", item_count())}</div>
        </div>
    }
}

/// Status bar text of the code view: mode plus file, and the last line number.
fn code_status(file_name: &str, content: &str) -> (String, String) {
    (
        format!("NORMAL - {file_name}"),
        format!("Ln {}, Col 1 - UTF-8", content.split('\n').count()),
    )
}

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

#[component]
fn TextReaderApp(region: PaintRegion) -> impl IntoView {
    let vfs = portfolio_vfs();
    let path = region.content.param_str("path").unwrap_or_default().to_string();
    let kind = EntryKind::of(&vfs, &path);

    let file = match vfs.node(&path) {
        Some(VfsNode::File { content }) => Some(content.clone()),
        _ => None,
    };

    match file {
        Some(content) if kind == EntryKind::Code => view! {
            <CodeView file_name=file_name(&path).to_string() content=content />
        }
        .into_view(),
        Some(content) => view! {
            <div class=format!("app app-text-reader {}", kind.css_class())>
                <pre class="text-reader-body">{content}</pre>
            </div>
        }
        .into_view(),
        None => {
            logging::warn!("text reader opened without a readable file: `{path}`");
            view! {
                <div class="app app-text-reader">
                    <p>"This file could not be opened."</p>
                </div>
            }
            .into_view()
        }
    }
}

/// Source listing with a line-number gutter and an editor-style status bar.
#[component]
fn CodeView(file_name: String, content: String) -> impl IntoView {
    let (mode, position) = code_status(&file_name, &content);
    let gutter = (1..=content.split('\n').count())
        .map(|line| view! { <span class="code-view-line-number">{line}</span> })
        .collect_view();

    view! {
        <div class="app app-code-view entry-code">
            <div class="code-view-tabs">
                <span class="code-view-tab">{file_name}</span>
            </div>
            <div class="code-view-body">
                <div class="code-view-gutter" aria-hidden="true">{gutter}</div>
                <pre class="code-view-source">{content}</pre>
            </div>
            <div class="code-view-status">
                <span>{mode}</span>
                <span>{position}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_terminal::build_portfolio_vfs;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entries_are_classified_by_type_and_extension() {
        let vfs = build_portfolio_vfs().expect("vfs");
        assert_eq!(EntryKind::of(&vfs, "/home/kem/projects"), EntryKind::Folder);
        assert_eq!(
            EntryKind::of(&vfs, "/home/kem/projects/XBash.sh"),
            EntryKind::Code
        );
        assert_eq!(EntryKind::of(&vfs, "/home/kem/README.md"), EntryKind::Text);
    }

    #[test]
    fn navigation_keeps_a_back_stack() {
        let mut nav = BrowserNav::default();
        assert!(!nav.can_go_back());
        nav.enter("/home/kem/projects".to_string());
        nav.enter("/home/kem/projects/music_controller".to_string());
        assert_eq!(nav.current(), "/home/kem/projects/music_controller");

        nav.back();
        assert_eq!(nav.current(), "/home/kem/projects");
        nav.home();
        assert_eq!(nav.current(), HOME_DIR);
        nav.back();
        assert_eq!(nav.current(), HOME_DIR);
    }

    #[test]
    fn code_view_status_counts_lines() {
        assert_eq!(file_name("/home/kem/projects/XBash.sh"), "XBash.sh");
        assert_eq!(
            code_status("XBash.sh", "#!/bin/bash\necho hi\n"),
            ("NORMAL - XBash.sh".to_string(), "Ln 3, Col 1 - UTF-8".to_string())
        );
        assert_eq!(
            code_status("main.dart", "void main() {}"),
            ("NORMAL - main.dart".to_string(), "Ln 1, Col 1 - UTF-8".to_string())
        );
    }

    #[test]
    fn readers_are_keyed_by_file_name() {
        assert_eq!(reader_window_id("README.md"), WindowId::new("file-README.md"));
        let content = reader_content("/home/kem/README.md");
        assert_eq!(content.app_id.as_str(), TEXT_READER_APP_ID);
        assert_eq!(content.param_str("path"), Some("/home/kem/README.md"));
    }
}
