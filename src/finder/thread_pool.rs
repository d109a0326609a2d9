//! 根路径线程池模块
//!
//! 每个根路径对应一个独立的遍历任务；线程池的大小等于根路径的数量，
//! 保证所有根路径的遍历同时进行，而不是排队等待空闲的 CPU。

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::FindResult;

/// 线程池配置选项
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// 线程数量，等于根路径数量
    pub threads: usize,
    /// 线程名前缀
    pub thread_name_prefix: String,
}

impl ThreadPoolConfig {
    /// 为给定数量的根路径创建配置
    pub fn for_roots(root_count: usize) -> Self {
        Self {
            threads: root_count.max(1),
            ..Self::default()
        }
    }
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            thread_name_prefix: "sfind-root".to_string(),
        }
    }
}

/// 每个根路径一个线程的线程池
#[derive(Debug)]
pub struct RootPool {
    pool: ThreadPool,
    threads: usize,
}

impl RootPool {
    /// 创建新的线程池
    pub fn new(config: ThreadPoolConfig) -> FindResult<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()?;
        debug!("Started {} search threads", config.threads);

        Ok(Self {
            pool,
            threads: config.threads,
        })
    }

    /// 获取线程数
    pub fn thread_count(&self) -> usize {
        self.threads
    }

    /// 对每个元素并行执行 `task`，全部完成后按输入顺序返回结果
    pub fn run_each<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.pool
            .install(|| items.par_iter().with_max_len(1).map(task).collect())
    }
}
