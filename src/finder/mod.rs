//! 文件查找模块
//!
//! 这个模块把过滤判断、单根遍历和多根并行调度组合在一起：
//! 每个根路径一个遍历任务，共享同一份只读配置和同一个输出接收器。

mod thread_pool;
pub mod filter;
pub mod options;
pub mod sink;
pub mod walker;

use std::sync::atomic::AtomicBool;

use log::{debug, info};

pub use self::filter::DirDecision;
pub use self::options::{FindOptions, SearchConfig};
pub use self::sink::{CollectSink, PathSink, StdoutSink};
pub use self::walker::{FileWalker, WalkStats};
pub use thread_pool::{RootPool, ThreadPoolConfig};

use crate::errors::FindResult;

/// 文件查找器
///
/// 为配置中的每个根路径启动一个遍历任务，并等待全部完成。
#[derive(Debug)]
pub struct Finder {
    config: SearchConfig,
}

impl Finder {
    /// 创建新的文件查找器实例
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// 遍历所有根路径，把匹配的文件写入 `sink`
    ///
    /// 只有一个根路径时直接在当前线程遍历；否则每个根路径占用一个线程。
    /// 返回所有根路径的统计之和。任一根路径写出失败时，其余遍历尽快停止，
    /// 并返回该写出错误。
    pub fn run<S: PathSink>(&self, sink: &S) -> FindResult<WalkStats> {
        let roots = self.config.paths();
        let stop = AtomicBool::new(false);
        let walker = FileWalker::new(&self.config).with_stop_flag(&stop);

        let per_root = if roots.len() == 1 {
            vec![walker.walk(&roots[0], sink)]
        } else {
            let pool = RootPool::new(ThreadPoolConfig::for_roots(roots.len()))?;
            info!("Searching {} roots on {} threads", roots.len(), pool.thread_count());
            pool.run_each(roots, |root| walker.walk(root, sink))
        };

        let mut total = WalkStats::default();
        for (root, stats) in roots.iter().zip(per_root) {
            let stats = stats?;
            debug!("{}: {:?}", root.display(), stats);
            total += stats;
        }
        Ok(total)
    }

    /// 遍历所有根路径并收集匹配的文件
    pub fn find(&self) -> FindResult<Vec<std::path::PathBuf>> {
        let sink = CollectSink::new();
        self.run(&sink)?;
        Ok(sink.into_paths())
    }
}
