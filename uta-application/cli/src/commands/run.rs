//! Run 命令处理

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use uta_driver::{Platform, SessionRegistry, SimSessionFactory};
use uta_executor::{BatchReport, Orchestrator, ScenarioConfig};
use uta_notify::{LogNotifier, NotifierPort, WebhookConfig, WebhookNotifier};

use crate::config::CliConfig;

pub async fn handle(
    config_path: Option<String>,
    script: Option<String>,
    objects: Option<String>,
    platform: String,
    report_path: Option<String>,
) -> Result<()> {
    let cli_config = CliConfig::load(config_path.as_deref().map(Path::new))?;

    // 单场景参数优先于配置文件中的场景列表
    let scenarios = if let Some(script) = script {
        let objects =
            objects.ok_or_else(|| anyhow::anyhow!("--script 需要配合 --objects 使用"))?;
        let platform: Platform = platform
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        vec![
            ScenarioConfig::new(PathBuf::from(script), PathBuf::from(objects))
                .with_platform(platform),
        ]
    } else {
        cli_config.scenarios.clone()
    };

    if scenarios.is_empty() {
        anyhow::bail!("没有可执行的场景：请通过配置文件或 --script/--objects 指定");
    }

    // 通知通道：配置了 webhook 则上报，否则仅写日志
    let notifier: Arc<dyn NotifierPort> = match &cli_config.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(WebhookConfig::new(url))?),
        None => {
            info!("未配置 webhook, 场景结果仅写入日志");
            Arc::new(LogNotifier)
        }
    };

    // 注册仿真后端；真实自动化后端由集成方通过库接口注册
    let registry = Arc::new(SessionRegistry::new());
    let platforms: HashSet<Platform> = scenarios.iter().map(|s| s.platform).collect();
    for platform in platforms {
        registry
            .register(Box::new(SimSessionFactory::new(platform)))
            .await?;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("执行批次: {} 个场景", scenarios.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let orchestrator = Orchestrator::new(Arc::clone(&registry), notifier, cli_config.batch.clone());
    let report = orchestrator.run(scenarios).await;

    spinner.finish_with_message(format!("{} 批次执行完成", "✓".green().bold()));

    print_report(&report);

    if let Some(path) = report_path {
        std::fs::write(&path, report.to_json()?)?;
        println!("汇总报告已写入: {}", path.cyan());
    }

    if !report.all_passed() {
        anyhow::bail!("{} 个场景执行失败", report.failed);
    }

    Ok(())
}

/// 打印批次汇总
fn print_report(report: &BatchReport) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "批次执行报告".bold());
    println!("{}", "=".repeat(60));
    println!();

    println!("批次标识: {}", report.run_id.to_string().bright_black());
    println!("执行时间: {} ms", report.duration_ms.to_string().yellow());
    println!();

    println!("场景统计:");
    println!("  总计: {}", report.total.to_string().bright_blue());
    println!("  通过: {}", report.passed.to_string().green());
    println!("  失败: {}", report.failed.to_string().red());
    println!();

    for outcome in &report.outcomes {
        let status_icon = if outcome.is_passed() {
            "✓".green()
        } else {
            "✗".red()
        };

        print!("{} {}", status_icon, outcome.scenario_id.cyan());
        if let Some(step) = &outcome.failed_step {
            print!("  失败步骤: [{}]", step.red());
        }
        if let Some(error) = &outcome.error {
            print!("  {}", error.bright_black());
        }
        if let Some(video) = &outcome.video {
            print!("  录像: {}", video.display().to_string().bright_black());
        }
        println!();
    }
}
