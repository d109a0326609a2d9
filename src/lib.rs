//! 按日期、文件名模式和目录排除查找文件的库
//!
//! 本库提供了：
//! - 每个根路径一个线程的并行目录遍历
//! - 按最早修改日期、glob 模式和目录名过滤
//! - 可选的不区分大小写比较
//! - 遍历中的节点错误只记录日志，不会中断搜索
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use sfind::finder::{Finder, FindOptions, StdoutSink};
//!
//! // 构建并验证配置
//! let config = FindOptions::new()
//!     .with_globs(["*.rs", "*.toml"])
//!     .with_excludes(["target"])
//!     .with_paths(["."])
//!     .build()
//!     .unwrap();
//!
//! // 执行查找，结果逐行写到标准输出
//! let stats = Finder::new(config).run(&StdoutSink).unwrap();
//! eprintln!("找到 {} 个文件", stats.files_emitted);
//! ```

pub mod cli;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::{Finder, FindOptions, SearchConfig};
