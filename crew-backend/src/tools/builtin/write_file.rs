//! File writing tool
//!
//! Argument format is `path|content`. The path is trimmed; the content is
//! written exactly as given, replacing any existing file. The content is
//! staged in a temporary file next to the target and renamed into place, so
//! readers see either the old file or the new one.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolGroup, ToolResult};
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct WriteFileTool {
    definition: ToolDefinition,
}

impl WriteFileTool {
    pub const NAME: &'static str = "WriteFileTool";

    pub fn new() -> Self {
        WriteFileTool {
            definition: ToolDefinition {
                name: Self::NAME.to_string(),
                description: "Create or overwrite a file. Argument is 'fileName|content'.".to_string(),
                usage: format!("{}('fileName|content')", Self::NAME),
                group: ToolGroup::Filesystem,
            },
        }
    }

    fn invalid_format_message() -> String {
        format!(
            "Error: invalid format. Use {}('fileName|content').",
            Self::NAME
        )
    }
}

fn write_atomically(target: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.as_file().sync_all()?;

    // Keep the mode of a file being replaced
    if let Ok(existing) = std::fs::metadata(target) {
        staged.as_file().set_permissions(existing.permissions())?;
    }

    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

impl Default for WriteFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, argument: &str, context: &ToolContext) -> ToolResult {
        let Some((raw_path, content)) = argument.split_once('|') else {
            return ToolResult::error(Self::invalid_format_message());
        };

        let path = raw_path.trim();
        let target = context.resolve_path(path);

        let staged_target = target.clone();
        let bytes = content.as_bytes().to_vec();
        let outcome = tokio::task::spawn_blocking(move || write_atomically(&staged_target, &bytes))
            .await
            .unwrap_or_else(|e| Err(std::io::Error::other(e)));

        match outcome {
            Ok(()) => {
                log::info!("[TOOLS] Wrote {} bytes to {:?}", content.len(), target);
                ToolResult::success(format!(
                    "File '{}' created with the given content.",
                    path
                ))
            }
            Err(e) => {
                log::warn!("[TOOLS] Failed to write {:?}: {}", target, e);
                ToolResult::error(format!("Error: could not write file '{}': {}", path, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::task_store::TaskStore;
    use tempfile::TempDir;

    fn context_in(dir: &TempDir) -> ToolContext {
        ToolContext::new(TaskStore::new()).with_workspace(dir.path())
    }

    #[tokio::test]
    async fn test_missing_separator_is_invalid_format() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let result = WriteFileTool::new().execute("readme.txt", &ctx).await;

        assert!(!result.success);
        assert!(result.content.starts_with("Error: invalid format"));
        assert!(!dir.path().join("readme.txt").exists());
    }

    #[tokio::test]
    async fn test_writes_content_verbatim_with_trimmed_path() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let result = WriteFileTool::new()
            .execute("  Main.java |  class Main {}\n", &ctx)
            .await;

        assert!(result.success);
        assert_eq!(result.content, "File 'Main.java' created with the given content.");
        let written = std::fs::read_to_string(dir.path().join("Main.java")).unwrap();
        assert_eq!(written, "  class Main {}\n");
    }

    #[tokio::test]
    async fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);
        let tool = WriteFileTool::new();

        tool.execute("notes.txt|first version", &ctx).await;
        tool.execute("notes.txt|second", &ctx).await;

        let written = std::fs::read_to_string(dir.path().join("notes.txt")).unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_staging_files() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);
        let tool = WriteFileTool::new();

        tool.execute("App.java|class App {}", &ctx).await;
        let result = tool.execute("App.java|class App { void run() {} }", &ctx).await;

        assert!(result.success);
        let entries: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["App.java".to_string()]);
        let written = std::fs::read_to_string(dir.path().join("App.java")).unwrap();
        assert_eq!(written, "class App { void run() {} }");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);
        let path = dir.path().join("run.sh");
        std::fs::write(&path, "echo old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        WriteFileTool::new().execute("run.sh|echo new", &ctx).await;

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo new");
    }

    #[tokio::test]
    async fn test_content_may_contain_separator() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        WriteFileTool::new().execute("pipe.txt|a|b", &ctx).await;

        let written = std::fs::read_to_string(dir.path().join("pipe.txt")).unwrap();
        assert_eq!(written, "a|b");
    }

    #[tokio::test]
    async fn test_io_failure_is_error_result() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let result = WriteFileTool::new()
            .execute("missing/dir/file.txt|data", &ctx)
            .await;

        assert!(!result.success);
        assert!(result.content.contains("missing/dir/file.txt"));
    }
}
