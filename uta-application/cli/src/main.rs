//! UTA CLI 应用

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "uta")]
#[command(about = "UTA - Web/移动端 UI 自动化测试运行器", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 执行场景批次或单个场景
    Run {
        /// 批次配置文件路径
        #[arg(short, long)]
        config: Option<String>,

        /// 单场景：场景脚本路径
        #[arg(long)]
        script: Option<String>,

        /// 单场景：页面对象映射路径
        #[arg(long)]
        objects: Option<String>,

        /// 单场景：目标平台
        #[arg(long, default_value = "web")]
        platform: String,

        /// 汇总报告输出路径 (JSON)
        #[arg(long)]
        report: Option<String>,
    },

    /// 校验场景脚本与对象映射（不执行）
    Check {
        /// 场景脚本路径
        script: String,

        /// 页面对象映射路径
        #[arg(long)]
        objects: Option<String>,
    },

    /// 发送一条测试消息验证 webhook 连通性
    NotifyTest {
        /// 消息内容
        #[arg(short, long, default_value = "🔔 UTA webhook 连通性测试")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("UTA CLI 启动");

    match cli.command {
        Commands::Run {
            config,
            script,
            objects,
            platform,
            report,
        } => commands::run::handle(config, script, objects, platform, report).await?,
        Commands::Check { script, objects } => commands::check::handle(script, objects).await?,
        Commands::NotifyTest { message } => commands::notify_test::handle(message).await?,
    }

    Ok(())
}
