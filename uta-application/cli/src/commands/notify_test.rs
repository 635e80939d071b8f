//! NotifyTest 命令处理
//!
//! 向配置的 webhook 发送一条测试消息，验证连通性。

use anyhow::Result;
use colored::Colorize;

use uta_notify::{WebhookConfig, WebhookNotifier};

use crate::config::CliConfig;

pub async fn handle(message: String) -> Result<()> {
    let config = CliConfig::load(None)?;

    let url = config.webhook_url.ok_or_else(|| {
        anyhow::anyhow!("未配置 webhook 地址 (配置文件 webhook_url 或环境变量 UTA_WEBHOOK_URL)")
    })?;

    println!("发送测试消息到: {}", url.cyan());

    let notifier = WebhookNotifier::new(WebhookConfig::new(&url))?;
    notifier.send_text(&message).await?;

    println!("{} 测试消息已发送", "✓".green().bold());
    Ok(())
}
