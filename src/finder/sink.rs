//! 输出接收器
//!
//! 所有遍历线程共享同一个接收器；每条路径是一次完整的写入，
//! 不同根目录的输出只会按整行交错。

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 接收遍历过程中接受的文件路径
pub trait PathSink: Sync {
    /// 写出一条路径；出错时遍历会停止
    fn emit(&self, path: &Path) -> io::Result<()>;
}

/// 每条路径一行写到标准输出
#[derive(Debug, Default)]
pub struct StdoutSink;

impl PathSink for StdoutSink {
    fn emit(&self, path: &Path) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", path.display())
    }
}

/// 把路径收集到内存中，供库调用方和测试使用
#[derive(Debug, Default)]
pub struct CollectSink {
    paths: Mutex<Vec<PathBuf>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出已收集的路径
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PathSink for CollectSink {
    fn emit(&self, path: &Path) -> io::Result<()> {
        self.paths
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());
        Ok(())
    }
}
