use std::path::PathBuf;
use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// sfind 的自定义错误类型
///
/// 配置错误在遍历开始前返回；遍历过程中的节点错误只用于日志，随后跳过。
#[derive(Debug, Error)]
pub enum FindError {
    /// 文件未找到
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 权限不足
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// 文件系统错误（其他IO错误）
    #[error("filesystem error {}: {source}", .path.display())]
    FilesystemError {
        source: std::io::Error,
        path: PathBuf,
    },

    /// 遍历目录时的错误
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// 模式匹配错误
    #[error("glob pattern {pattern:?}: {message}")]
    PatternError { pattern: String, message: String },

    /// 无法解析的 --from 值
    #[error("invalid --from value {value:?}: expected today, yesterday, a number of days or YYYY-MM-DD")]
    InvalidDate { value: String },

    /// 空的选项值（例如 `--glob ,`）
    #[error("option --{option} was given without any value")]
    EmptyOption { option: &'static str },

    /// 写出结果失败
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// 线程池创建失败
    #[error("failed to start search threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FindError {
    /// 输出端已关闭（例如 `sfind | head -1`）
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, FindError::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

impl From<walkdir::Error> for FindError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.io_error() {
            Some(io_err) => match io_err.kind() {
                std::io::ErrorKind::NotFound => FindError::FileNotFound(path),
                std::io::ErrorKind::PermissionDenied => FindError::PermissionDenied(path),
                _ => FindError::FilesystemError {
                    source: std::io::Error::new(io_err.kind(), io_err.to_string()),
                    path,
                },
            },
            None => FindError::WalkDirError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_filesystem_error_display() {
        let io_error = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let find_error = FindError::FilesystemError {
            source: io_error,
            path: PathBuf::from("/test/path"),
        };
        assert_eq!(
            find_error.to_string(),
            "filesystem error /test/path: disk on fire"
        );
    }

    #[test]
    fn test_pattern_error_display() {
        let find_error = FindError::PatternError {
            pattern: "[".to_string(),
            message: "invalid range pattern".to_string(),
        };
        assert_eq!(
            find_error.to_string(),
            "glob pattern \"[\": invalid range pattern"
        );
    }

    #[test]
    fn test_is_broken_pipe() {
        let closed = FindError::Output(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(closed.is_broken_pipe());
        assert_eq!(closed.to_string(), "failed to write output: broken pipe");

        let full = FindError::Output(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(!full.is_broken_pipe());
        assert!(!FindError::WalkDirError("loop".to_string()).is_broken_pipe());
    }

    #[test]
    fn test_from_walkdir_error_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();

        match FindError::from(err) {
            FindError::FileNotFound(path) => assert_eq!(path, missing),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }
}
