use std::time::Instant;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use sfind::cli::Cli;
use sfind::finder::{Finder, StdoutSink};

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志，RUST_LOG 优先
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    // 配置错误在遍历开始前报告
    let config = cli
        .build_options()
        .and_then(|options| options.build())
        .context("invalid search options")?;

    if cli.debug {
        println!("{}", config);
        return Ok(());
    }

    info!("开始运行 sfind");
    debug!("配置:\n{}", config);
    let start_time = Instant::now();

    let finder = Finder::new(config);
    let stats = match finder.run(&StdoutSink) {
        Ok(stats) => stats,
        // 下游关闭了管道（例如 `sfind | head`），安静退出
        Err(err) if err.is_broken_pipe() => {
            debug!("{}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        "搜索完成，找到 {} 个文件（检查 {} 个，跳过 {} 个目录，{} 个错误），耗时 {:.2?}",
        stats.files_emitted,
        stats.files_visited,
        stats.dirs_pruned,
        stats.errors,
        start_time.elapsed()
    );

    Ok(())
}
