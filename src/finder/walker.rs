//! 文件系统遍历功能
//!
//! 本模块对单个根路径做深度优先遍历：目录经过剪枝判断，文件经过接受判断，
//! 被接受的路径立即写入接收器。

use std::ops::AddAssign;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use log::debug;
use walkdir::{DirEntry, WalkDir};

use super::filter::{accept_file, dir_decision, DirDecision};
use super::options::SearchConfig;
use super::sink::PathSink;
use crate::errors::{FindError, FindResult};

/// 单次遍历的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// 检查过的文件数
    pub files_visited: usize,
    /// 写出的文件数
    pub files_emitted: usize,
    /// 被剪掉的目录数
    pub dirs_pruned: usize,
    /// 被跳过的出错节点数
    pub errors: usize,
}

impl AddAssign for WalkStats {
    fn add_assign(&mut self, other: Self) {
        self.files_visited += other.files_visited;
        self.files_emitted += other.files_emitted;
        self.dirs_pruned += other.dirs_pruned;
        self.errors += other.errors;
    }
}

/// 使用共享配置遍历一个根路径
pub struct FileWalker<'a> {
    config: &'a SearchConfig,
    stop: Option<&'a AtomicBool>,
}

impl<'a> FileWalker<'a> {
    /// 使用给定配置创建新的 FileWalker
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config, stop: None }
    }

    /// 与其他遍历共享的停止标志；任一遍历写出失败时置位
    pub fn with_stop_flag(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stopped(&self) -> bool {
        self.stop.is_some_and(|stop| stop.load(Ordering::Relaxed))
    }

    /// 从给定路径开始遍历，把接受的文件写入 `sink`
    ///
    /// 节点错误不会中断遍历：出错的节点被跳过，兄弟节点照常处理。
    /// 写出失败会停止本次遍历以及共享停止标志的其他遍历。
    /// 根路径本身是符号链接时不会跟随。
    pub fn walk<P: AsRef<Path>>(&self, root: P, sink: &dyn PathSink) -> FindResult<WalkStats> {
        let root = root.as_ref();
        let mut stats = WalkStats::default();
        let mut entries = WalkDir::new(root).follow_root_links(false).into_iter();

        debug!("开始遍历 {}", root.display());
        while let Some(entry) = entries.next() {
            if self.stopped() {
                debug!("停止遍历 {}", root.display());
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.handle_walk_error(err, &mut stats);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if dir_decision(entry.path(), self.config) == DirDecision::Prune {
                    debug!("跳过目录 {}", entry.path().display());
                    stats.dirs_pruned += 1;
                    entries.skip_current_dir();
                }
                continue;
            }

            stats.files_visited += 1;
            let modified = match modified_time(&entry) {
                Ok(modified) => modified,
                Err(err) => {
                    debug!("无法读取修改时间，跳过: {}", err);
                    stats.errors += 1;
                    continue;
                }
            };

            if accept_file(entry.path(), modified, self.config) {
                if let Err(err) = sink.emit(output_path(entry.path())) {
                    if let Some(stop) = self.stop {
                        stop.store(true, Ordering::Relaxed);
                    }
                    return Err(FindError::Output(err));
                }
                stats.files_emitted += 1;
            }
        }
        debug!("完成遍历 {}: {:?}", root.display(), stats);

        Ok(stats)
    }

    /// 记录遍历错误并继续
    fn handle_walk_error(&self, err: walkdir::Error, stats: &mut WalkStats) {
        stats.errors += 1;
        debug!("跳过出错的节点: {}", FindError::from(err));
    }
}

fn modified_time(entry: &DirEntry) -> FindResult<SystemTime> {
    let metadata = entry.metadata()?;
    metadata.modified().map_err(|source| FindError::FilesystemError {
        source,
        path: entry.path().to_path_buf(),
    })
}

/// 去掉根路径 `.` 带来的 `./` 前缀，其余前缀原样保留
pub fn output_path(path: &Path) -> &Path {
    match path.strip_prefix(".") {
        Ok(rest) if !rest.as_os_str().is_empty() => rest,
        _ => path,
    }
}
