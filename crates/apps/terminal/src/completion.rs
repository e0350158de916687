//! Tab completion over command names and the current directory's children.

use platform_host::join_virtual_path;

use crate::vfs::Vfs;

/// Every command the interpreter recognizes, sorted.
pub const COMMAND_NAMES: &[&str] = &[
    "cat",
    "cd",
    "clear",
    "cmatrix",
    "date",
    "echo",
    "exit",
    "fastfetch",
    "help",
    "history",
    "jumpscare",
    "ls",
    "neofetch",
    "peaclock",
    "pipes.sh",
    "projects",
    "pwd",
    "reboot",
    "whoami",
];

const PATH_COMMANDS: &[&str] = &["cat", "cd", "ls"];

/// Result of one Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched.
    None,
    /// Replace the whole input line.
    Replace(String),
    /// Ambiguous; show these candidates and leave the input alone.
    Candidates(Vec<String>),
}

/// Completes the last token of `input`.
pub fn complete(input: &str, cwd: &str, vfs: &Vfs) -> Completion {
    let token_start = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(idx, c)| idx + c.len_utf8());
    let (head, token) = input.split_at(token_start);
    let completing_command = head.trim().is_empty();

    let candidates: Vec<(String, bool)> = if completing_command {
        let token = token.to_ascii_lowercase();
        COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(&token))
            .map(|name| ((*name).to_string(), false))
            .collect()
    } else {
        let command = head
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !PATH_COMMANDS.contains(&command.as_str()) {
            return Completion::None;
        }
        vfs.children(cwd)
            .iter()
            .filter(|name| name.starts_with(token))
            .map(|name| (name.clone(), vfs.is_dir(&join_virtual_path(cwd, name))))
            .collect()
    };

    match candidates.as_slice() {
        [] => Completion::None,
        [(name, is_dir)] => {
            let separator = if *is_dir && !completing_command { '/' } else { ' ' };
            Completion::Replace(format!("{head}{name}{separator}"))
        }
        many => {
            let common = longest_common_prefix(many.iter().map(|(name, _)| name.as_str()));
            if common.len() > token.len() {
                Completion::Replace(format!("{head}{common}"))
            } else {
                Completion::Candidates(many.iter().map(|(name, _)| name.clone()).collect())
            }
        }
    }
}

fn longest_common_prefix<'a>(mut names: impl Iterator<Item = &'a str>) -> &'a str {
    let Some(first) = names.next() else {
        return "";
    };
    let mut len = first.len();
    for name in names {
        len = first
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((idx, a), _)| idx + a.len_utf8())
            .min(len);
    }
    &first[..len]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::vfs::{build_portfolio_vfs, VfsNode, HOME_DIR};

    fn complete_home(input: &str) -> Completion {
        let vfs = build_portfolio_vfs().expect("vfs");
        complete(input, HOME_DIR, &vfs)
    }

    #[test]
    fn ambiguous_command_prefix_lists_candidates() {
        assert_eq!(
            complete_home("h"),
            Completion::Candidates(vec!["help".to_string(), "history".to_string()])
        );
    }

    #[test]
    fn unique_command_prefix_completes_with_space() {
        assert_eq!(complete_home("he"), Completion::Replace("help ".to_string()));
        assert_eq!(complete_home("PI"), Completion::Replace("pipes.sh ".to_string()));
    }

    #[test]
    fn unique_prefixes_across_the_command_table() {
        assert_eq!(complete_home("ech"), Completion::Replace("echo ".to_string()));
        assert_eq!(complete_home("ne"), Completion::Replace("neofetch ".to_string()));
        assert_eq!(complete_home("his"), Completion::Replace("history ".to_string()));
        assert_eq!(complete_home("pr"), Completion::Replace("projects ".to_string()));
    }

    #[test]
    fn shared_prefix_extends_without_separator() {
        let vfs = Vfs::from_nodes(
            HOME_DIR,
            [
                (HOME_DIR, VfsNode::dir(["notes_a.txt", "notes_b.txt"])),
                ("/home/kem/notes_a.txt", VfsNode::file("a")),
                ("/home/kem/notes_b.txt", VfsNode::file("b")),
            ],
        )
        .expect("vfs");
        assert_eq!(
            complete("cat no", HOME_DIR, &vfs),
            Completion::Replace("cat notes_".to_string())
        );
        assert_eq!(
            complete("cat notes_", HOME_DIR, &vfs),
            Completion::Candidates(vec!["notes_a.txt".to_string(), "notes_b.txt".to_string()])
        );
    }

    #[test]
    fn directory_children_complete_with_slash_and_files_with_space() {
        assert_eq!(complete_home("cd pro"), Completion::Replace("cd projects/".to_string()));
        assert_eq!(complete_home("cat REA"), Completion::Replace("cat README.md ".to_string()));
    }

    #[test]
    fn ambiguous_children_are_listed() {
        let vfs = build_portfolio_vfs().expect("vfs");
        assert_eq!(
            complete("cat ", "/home/kem/school", &vfs),
            Completion::Candidates(vec![
                "Literature_Notes.txt".to_string(),
                "Nursing_Practices.txt".to_string(),
            ])
        );
        assert_eq!(
            complete("ls ", "/home/kem/projects/music_controller", &vfs),
            Completion::Candidates(vec!["main.dart".to_string(), "pubspec.yaml".to_string()])
        );
    }

    #[test]
    fn unknown_prefixes_and_non_path_commands_do_nothing() {
        assert_eq!(complete_home("zz"), Completion::None);
        assert_eq!(complete_home("echo REA"), Completion::None);
        assert_eq!(complete_home("cat nope"), Completion::None);
    }

    #[test]
    fn common_prefix_stops_at_first_difference() {
        assert_eq!(longest_common_prefix(["clear", "cmatrix"].into_iter()), "c");
        assert_eq!(longest_common_prefix(["pipes.sh", "pipes"].into_iter()), "pipes");
        assert_eq!(longest_common_prefix(std::iter::empty()), "");
    }
}
