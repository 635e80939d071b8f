//! UTA 通知通道
//!
//! 场景结果的出站上报。投递失败由调用方记录日志，
//! 绝不改变场景结论，也不会中断清理流程。

pub mod webhook;

pub use webhook::{WebhookConfig, WebhookNotifier};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use uta_common::{ScenarioOutcome, ScenarioStatus};

/// 通知错误类型
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP 错误: {0}")]
    HttpError(String),

    #[error("服务端返回异常状态: {0}")]
    BadStatus(u16),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, NotifyError>;

/// 通知端口
///
/// 每个场景的结果恰好上报一次。
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// 发送场景结果
    async fn send(&self, outcome: &ScenarioOutcome) -> Result<()>;
}

/// 日志通知器
///
/// 未配置 webhook 时使用：仅把结果写入日志。
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotifierPort for LogNotifier {
    async fn send(&self, outcome: &ScenarioOutcome) -> Result<()> {
        match outcome.status {
            ScenarioStatus::Passed => info!("场景通过: {}", outcome.scenario_id),
            ScenarioStatus::Failed => info!(
                "场景失败: {} | 步骤: {} | {}",
                outcome.scenario_id,
                outcome.failed_step.as_deref().unwrap_or("-"),
                outcome.error.as_deref().unwrap_or("-"),
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        let notifier = LogNotifier;
        let outcome = ScenarioOutcome::failed("login", "Tap on X", "页面对象未定义: X");
        assert!(notifier.send(&outcome).await.is_ok());
    }
}
