//! Built-in command handlers with direct filesystem semantics.
//!
//! Every handler returns `TermResult<CommandResult>`; the dispatch layer
//! converts errors into failure results, so nothing here panics or
//! propagates past the executor.

use std::path::PathBuf;

use crate::error::{TermError, TermResult};
use crate::models::CommandResult;
use crate::session::Session;

pub fn pwd(session: &Session) -> TermResult<CommandResult> {
    Ok(CommandResult::ok(
        session.current_dir().display().to_string(),
    ))
}

/// Resolve and commit a directory change.
///
/// No argument reports the current directory. `..` goes to the parent,
/// `~` to the home directory, relative paths are joined to the current
/// directory, absolute paths are used as-is. The change only commits when
/// the resolved path is an existing directory.
pub fn cd(args: &[String], session: &mut Session) -> TermResult<CommandResult> {
    let Some(target) = args.get(1) else {
        return Ok(CommandResult::ok(
            session.current_dir().display().to_string(),
        ));
    };

    let candidate: PathBuf = if target == ".." {
        session
            .current_dir()
            .parent()
            .unwrap_or(session.current_dir())
            .to_path_buf()
    } else if target == "~" {
        dirs::home_dir().ok_or_else(|| TermError::DirectoryNotFound("~".to_string()))?
    } else if PathBuf::from(target).is_absolute() {
        PathBuf::from(target)
    } else {
        session.current_dir().join(target)
    };

    if !candidate.is_dir() {
        return Err(TermError::DirectoryNotFound(
            candidate.display().to_string(),
        ));
    }

    session.set_current_dir(&candidate)?;
    Ok(CommandResult::ok(format!(
        "Changed to {}",
        session.current_dir().display()
    )))
}

/// List the current directory's entries, sorted lexicographically,
/// directories suffixed with `/`.
pub fn ls(session: &Session) -> TermResult<CommandResult> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    for entry in std::fs::read_dir(session.current_dir())? {
        let entry = entry?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let listing: Vec<String> = entries
        .into_iter()
        .map(|(name, is_dir)| if is_dir { format!("{name}/") } else { name })
        .collect();

    Ok(CommandResult::ok(listing.join("\n")))
}

/// Create a directory (and any missing parents) under the current directory.
pub fn mkdir(args: &[String], session: &Session) -> TermResult<CommandResult> {
    let Some(name) = args.get(1) else {
        return Err(TermError::UsageError(
            "Usage: mkdir <directory_name>".to_string(),
        ));
    };

    let dir_path = session.current_dir().join(name);
    std::fs::create_dir_all(&dir_path)?;
    Ok(CommandResult::ok(format!("Directory created: {name}")))
}

pub fn clear(session: &mut Session) -> TermResult<CommandResult> {
    session.clear_output();
    Ok(CommandResult::ok("Terminal cleared"))
}

pub fn help() -> TermResult<CommandResult> {
    Ok(CommandResult::ok(HELP_TEXT))
}

const HELP_TEXT: &str = "\
Available Commands:

File & Directory Operations:
   ls, dir          - List directory contents
   cd <path>        - Change directory
   pwd              - Show current directory
   mkdir <name>     - Create directory

System Information:
   ps               - List running processes
   top, htop        - System resource usage

Terminal Commands:
   clear, cls       - Clear terminal
   help             - Show this help message

Natural Language:
   Anything else is translated when assist is enabled, e.g.:
   \"show me all files\"
   \"create a folder called test\"
   \"what processes are running\"
";

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> (tempfile::TempDir, Session) {
        let tmp = tempfile::tempdir().unwrap();
        let session = Session::with_dir(tmp.path()).unwrap();
        (tmp, session)
    }

    fn arg_list(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pwd_reports_current_dir() {
        let (_tmp, session) = test_session();
        let result = pwd(&session).unwrap();
        assert_eq!(result.output, session.current_dir().display().to_string());
        assert!(result.is_success());
    }

    #[test]
    fn test_cd_without_argument_reports_current_dir() {
        let (_tmp, mut session) = test_session();
        let before = session.current_dir().display().to_string();
        let result = cd(&arg_list(&["cd"]), &mut session).unwrap();
        assert_eq!(result.output, before);
    }

    #[test]
    fn test_cd_relative_and_parent() {
        let (_tmp, mut session) = test_session();
        let root = session.current_dir().to_path_buf();
        std::fs::create_dir(root.join("sub")).unwrap();

        let result = cd(&arg_list(&["cd", "sub"]), &mut session).unwrap();
        assert!(result.output.starts_with("Changed to "));
        assert_eq!(session.current_dir(), root.join("sub"));

        cd(&arg_list(&["cd", ".."]), &mut session).unwrap();
        assert_eq!(session.current_dir(), root);
    }

    #[test]
    fn test_cd_dot_is_idempotent() {
        let (_tmp, mut session) = test_session();
        let before = session.current_dir().to_path_buf();
        cd(&arg_list(&["cd", "."]), &mut session).unwrap();
        assert_eq!(session.current_dir(), before);
    }

    #[test]
    fn test_cd_missing_directory() {
        let (_tmp, mut session) = test_session();
        let before = session.current_dir().to_path_buf();
        let err = cd(&arg_list(&["cd", "no-such-dir"]), &mut session).unwrap_err();
        assert!(matches!(err, TermError::DirectoryNotFound(_)));
        assert_eq!(session.current_dir(), before);
    }

    #[test]
    fn test_ls_empty_directory() {
        let (_tmp, session) = test_session();
        let result = ls(&session).unwrap();
        assert!(result.output.is_empty());
        assert!(result.is_success());
    }

    #[test]
    fn test_ls_marks_directories_and_sorts() {
        let (_tmp, session) = test_session();
        let root = session.current_dir();
        std::fs::create_dir(root.join("bdir")).unwrap();
        std::fs::write(root.join("afile"), b"x").unwrap();
        std::fs::write(root.join("cfile"), b"x").unwrap();

        let result = ls(&session).unwrap();
        assert_eq!(result.output, "afile\nbdir/\ncfile");
    }

    #[test]
    fn test_mkdir_creates_directory() {
        let (_tmp, session) = test_session();
        let result = mkdir(&arg_list(&["mkdir", "newdir"]), &session).unwrap();
        assert_eq!(result.output, "Directory created: newdir");
        assert!(session.current_dir().join("newdir").is_dir());
    }

    #[test]
    fn test_mkdir_creates_missing_parents() {
        let (_tmp, session) = test_session();
        mkdir(&arg_list(&["mkdir", "a/b/c"]), &session).unwrap();
        assert!(session.current_dir().join("a/b/c").is_dir());
    }

    #[test]
    fn test_mkdir_without_argument() {
        let (_tmp, session) = test_session();
        let err = mkdir(&arg_list(&["mkdir"]), &session).unwrap_err();
        assert!(matches!(err, TermError::UsageError(_)));
    }

    #[test]
    fn test_clear_truncates_output_log() {
        let (_tmp, mut session) = test_session();
        session.push_entry(crate::models::ResultEntry::new(
            "ls",
            CommandResult::ok("x"),
        ));

        let result = clear(&mut session).unwrap();
        assert_eq!(result.output, "Terminal cleared");
        assert_eq!(session.output_len(), 0);
    }

    #[test]
    fn test_help_lists_builtins() {
        let result = help().unwrap();
        for verb in ["ls", "cd", "pwd", "mkdir", "ps", "top", "clear", "help"] {
            assert!(result.output.contains(verb), "help should mention {verb}");
        }
    }
}
