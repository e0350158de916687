//! Read-only virtual filesystem compiled into every terminal session.
//!
//! Nodes are keyed by normalized absolute path. Construction validates the tree once so lookups
//! never have to handle a directory that lists a child with no node behind it.

use std::{collections::BTreeMap, rc::Rc};

use leptos::logging;
use platform_host::{join_virtual_path, normalize_virtual_path, parent_virtual_path};
use thiserror::Error;

/// Home directory of the portfolio user; the VFS root.
pub const HOME_DIR: &str = "/home/kem";

/// One entry of the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsNode {
    /// Directory listing child names in display order.
    Directory {
        /// Child names, without path separators.
        children: Vec<String>,
    },
    /// Text file.
    File {
        /// Full file content.
        content: String,
    },
}

impl VfsNode {
    /// Builds a directory node.
    pub fn dir<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Directory {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a file node.
    pub fn file(content: impl Into<String>) -> Self {
        Self::File {
            content: content.into(),
        }
    }

    /// Whether this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }
}

/// Tree validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    /// The root path has no node or is a file.
    #[error("vfs root `{0}` must be a directory")]
    InvalidRoot(String),
    /// Two nodes normalize to the same path.
    #[error("duplicate vfs node `{0}`")]
    DuplicateNode(String),
    /// A child name contains a separator or is a dot segment.
    #[error("invalid child name `{name}` in `{parent}`")]
    InvalidChildName {
        /// Directory listing the child.
        parent: String,
        /// Offending name.
        name: String,
    },
    /// A directory lists a child with no node.
    #[error("`{parent}` lists `{name}` but `{path}` has no node")]
    DanglingChild {
        /// Directory listing the child.
        parent: String,
        /// Listed child name.
        name: String,
        /// Joined path that was looked up.
        path: String,
    },
}

/// Validated, immutable virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vfs {
    root: String,
    nodes: BTreeMap<String, VfsNode>,
}

impl Vfs {
    /// Builds a filesystem rooted at `root` from `(path, node)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`VfsError`] when the root is missing, a path is duplicated, or a directory lists
    /// a child without a node.
    pub fn from_nodes<I, P>(root: &str, nodes: I) -> Result<Self, VfsError>
    where
        I: IntoIterator<Item = (P, VfsNode)>,
        P: AsRef<str>,
    {
        let root = normalize_virtual_path(root);
        let mut table = BTreeMap::new();
        for (path, node) in nodes {
            let path = normalize_virtual_path(path.as_ref());
            if table.insert(path.clone(), node).is_some() {
                return Err(VfsError::DuplicateNode(path));
            }
        }

        if !table.get(&root).is_some_and(VfsNode::is_dir) {
            return Err(VfsError::InvalidRoot(root));
        }

        for (parent, node) in &table {
            let VfsNode::Directory { children } = node else {
                continue;
            };
            for name in children {
                if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                    return Err(VfsError::InvalidChildName {
                        parent: parent.clone(),
                        name: name.clone(),
                    });
                }
                let path = join_virtual_path(parent, name);
                if !table.contains_key(&path) {
                    return Err(VfsError::DanglingChild {
                        parent: parent.clone(),
                        name: name.clone(),
                        path,
                    });
                }
            }
        }

        Ok(Self { root, nodes: table })
    }

    /// Root (home) directory path.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Node at `path`, normalized first.
    pub fn node(&self, path: &str) -> Option<&VfsNode> {
        self.nodes.get(&normalize_virtual_path(path))
    }

    /// Whether `path` is a directory.
    pub fn is_dir(&self, path: &str) -> bool {
        self.node(path).is_some_and(VfsNode::is_dir)
    }

    /// Child names of the directory at `path`; empty for files and missing paths.
    pub fn children(&self, path: &str) -> &[String] {
        match self.node(path) {
            Some(VfsNode::Directory { children }) => children,
            _ => &[],
        }
    }

    /// Resolves `name` relative to `cwd`, staying inside the root.
    ///
    /// Accepts plain child names as well as relative paths (`projects/XBash.sh`, `..`) and `~`.
    pub fn lookup(&self, cwd: &str, name: &str) -> Option<(String, &VfsNode)> {
        let name = name.trim();
        let path = match name {
            "~" => self.root.clone(),
            _ => match name.strip_prefix("~/") {
                Some(rest) => join_virtual_path(&self.root, rest),
                None => join_virtual_path(cwd, name),
            },
        };
        if !self.contains(&path) {
            return None;
        }
        let node = self.nodes.get(&path)?;
        Some((path, node))
    }

    /// Path of `name` when it is listed as a direct child directory of `cwd`.
    pub fn child_dir(&self, cwd: &str, name: &str) -> Option<String> {
        let name = name.trim().trim_end_matches('/');
        if !self.children(cwd).iter().any(|child| child == name) {
            return None;
        }
        let path = join_virtual_path(cwd, name);
        self.is_dir(&path).then_some(path)
    }

    /// Parent of `cwd`, or `None` when `cwd` is the root.
    pub fn parent_dir(&self, cwd: &str) -> Option<String> {
        if normalize_virtual_path(cwd) == self.root {
            return None;
        }
        parent_virtual_path(cwd).filter(|parent| self.contains(parent))
    }

    /// Path rendered with the root shown as `~`.
    pub fn display_path(&self, path: &str) -> String {
        let path = normalize_virtual_path(path);
        if path == self.root {
            return "~".to_string();
        }
        match path.strip_prefix(&self.root) {
            Some(rest) if rest.starts_with('/') => format!("~{rest}"),
            _ => path,
        }
    }

    fn contains(&self, path: &str) -> bool {
        path == self.root
            || path
                .strip_prefix(&self.root)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

const README: &str = "# Welcome!\n\nThis is my personal portfolio.\nI'm into Linux, Python, Android modding and Flutter.\nFeel free to look around the files.";

const XBASH: &str = "#!/bin/bash\n# XBash - ShareX like image uploader\n\necho 'Uploading image...'\ncurl -F 'file=@$1' https://upload.server.com/api\necho 'Done!'";

const YTXTRACT: &str = "import yt_dlp\n\n# ytxtract - YouTube video/audio downloader toolkit\n# Note: currently rewriting this module for better API handling.\n\ndef download_audio(url):\n    print(f'Downloading audio from {url}')";

const MAIN_DART: &str = "import 'package:flutter/material.dart';\n\nvoid main() {\n  runApp(const MusicControllerApp());\n}\n\n// Basic media controls layout built with Flutter";

const PUBSPEC: &str = "name: music_controller\ndescription: A new Flutter project.\n\nenvironment:\n  sdk: '>=3.0.0 <4.0.0'\n\ndependencies:\n  flutter:\n    sdk: flutter";

const LITERATURE: &str = "Literature notes:\n\n- Characteristics of the Tanzimat period\n- Read through Sinasi and Namik Kemal's works.\n(Revise again during exam week!)";

const NURSING: &str = "Nursing assistant practice:\n\n- Tracking vital signs (temperature, pulse, blood pressure).\n- Hospital hygiene and safety standards.\n- Notes for the practical exam...";

fn portfolio_nodes() -> Vec<(&'static str, VfsNode)> {
    vec![
        (HOME_DIR, VfsNode::dir(["projects", "school", "README.md"])),
        ("/home/kem/README.md", VfsNode::file(README)),
        (
            "/home/kem/projects",
            VfsNode::dir(["XBash.sh", "ytxtract.py", "music_controller"]),
        ),
        ("/home/kem/projects/XBash.sh", VfsNode::file(XBASH)),
        ("/home/kem/projects/ytxtract.py", VfsNode::file(YTXTRACT)),
        (
            "/home/kem/projects/music_controller",
            VfsNode::dir(["main.dart", "pubspec.yaml"]),
        ),
        (
            "/home/kem/projects/music_controller/main.dart",
            VfsNode::file(MAIN_DART),
        ),
        (
            "/home/kem/projects/music_controller/pubspec.yaml",
            VfsNode::file(PUBSPEC),
        ),
        (
            "/home/kem/school",
            VfsNode::dir(["Literature_Notes.txt", "Nursing_Practices.txt"]),
        ),
        (
            "/home/kem/school/Literature_Notes.txt",
            VfsNode::file(LITERATURE),
        ),
        ("/home/kem/school/Nursing_Practices.txt", VfsNode::file(NURSING)),
    ]
}

/// Builds the portfolio filesystem.
///
/// # Errors
///
/// Propagates tree validation failures.
pub fn build_portfolio_vfs() -> Result<Vfs, VfsError> {
    Vfs::from_nodes(HOME_DIR, portfolio_nodes())
}

thread_local! {
    static PORTFOLIO_VFS: Rc<Vfs> = Rc::new(build_portfolio_vfs().unwrap_or_else(|err| {
        logging::warn!("portfolio vfs invalid, falling back to empty home: {err}");
        Vfs {
            root: HOME_DIR.to_string(),
            nodes: BTreeMap::from([(HOME_DIR.to_string(), VfsNode::dir(Vec::<String>::new()))]),
        }
    }));
}

/// Shared portfolio filesystem used by terminals, the file browser and the text reader.
pub fn portfolio_vfs() -> Rc<Vfs> {
    PORTFOLIO_VFS.with(Rc::clone)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn portfolio_tree_is_valid() {
        let vfs = build_portfolio_vfs().expect("portfolio vfs");
        assert_eq!(vfs.root(), HOME_DIR);
        assert_eq!(
            vfs.children(HOME_DIR),
            &["projects", "school", "README.md"].map(String::from)
        );
        assert!(vfs.is_dir("/home/kem/projects/music_controller"));
    }

    #[test]
    fn construction_rejects_dangling_children_and_bad_roots() {
        let dangling = Vfs::from_nodes(HOME_DIR, [(HOME_DIR, VfsNode::dir(["ghost"]))]);
        assert_eq!(
            dangling,
            Err(VfsError::DanglingChild {
                parent: HOME_DIR.to_string(),
                name: "ghost".to_string(),
                path: "/home/kem/ghost".to_string(),
            })
        );

        let file_root = Vfs::from_nodes(HOME_DIR, [(HOME_DIR, VfsNode::file("nope"))]);
        assert_eq!(file_root, Err(VfsError::InvalidRoot(HOME_DIR.to_string())));

        let slashed = Vfs::from_nodes(
            HOME_DIR,
            [
                (HOME_DIR, VfsNode::dir(["a/b"])),
                ("/home/kem/a/b", VfsNode::file("")),
            ],
        );
        assert!(matches!(slashed, Err(VfsError::InvalidChildName { .. })));
    }

    #[test]
    fn child_dir_requires_a_listed_directory() {
        let vfs = build_portfolio_vfs().expect("portfolio vfs");
        assert_eq!(
            vfs.child_dir(HOME_DIR, "projects/").as_deref(),
            Some("/home/kem/projects")
        );
        assert_eq!(vfs.child_dir(HOME_DIR, "README.md"), None);
        assert_eq!(vfs.child_dir(HOME_DIR, "music_controller"), None);
    }

    #[test]
    fn lookup_stays_inside_home() {
        let vfs = build_portfolio_vfs().expect("portfolio vfs");
        let (path, node) = vfs
            .lookup("/home/kem/projects", "../school/Literature_Notes.txt")
            .expect("relative lookup");
        assert_eq!(path, "/home/kem/school/Literature_Notes.txt");
        assert!(!node.is_dir());
        assert!(vfs.lookup(HOME_DIR, "..").is_none());
        assert!(vfs.lookup("/home/kem/school", "~/README.md").is_some());
    }

    #[test]
    fn parent_and_display_paths() {
        let vfs = build_portfolio_vfs().expect("portfolio vfs");
        assert_eq!(vfs.parent_dir(HOME_DIR), None);
        assert_eq!(
            vfs.parent_dir("/home/kem/projects").as_deref(),
            Some(HOME_DIR)
        );
        assert_eq!(vfs.display_path(HOME_DIR), "~");
        assert_eq!(vfs.display_path("/home/kem/projects"), "~/projects");
    }
}
