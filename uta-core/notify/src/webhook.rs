//! Webhook 通知器
//!
//! 向配置的 webhook 地址 POST 场景结果，兼容 Slack 的
//! `{"text": ...}` 消息格式。

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use uta_common::{ScenarioOutcome, ScenarioStatus};

use crate::{NotifierPort, NotifyError, Result};

/// Webhook 通知配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// webhook 地址
    pub url: String,

    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,
}

impl WebhookConfig {
    /// 使用默认超时创建配置
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            connect_timeout: 10,
            request_timeout: 30,
        }
    }
}

/// Webhook 通知器
pub struct WebhookNotifier {
    /// 通知配置
    config: WebhookConfig,

    /// HTTP 客户端
    http_client: Client,
}

impl WebhookNotifier {
    /// 创建新的 webhook 通知器
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| NotifyError::HttpError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// 发送纯文本消息（用于连通性测试）
    pub async fn send_text(&self, text: &str) -> Result<()> {
        self.post_json(&serde_json::json!({ "text": text })).await
    }

    /// 组装消息正文
    fn build_payload(outcome: &ScenarioOutcome) -> serde_json::Value {
        let text = match outcome.status {
            ScenarioStatus::Passed => format!("✅ PASSED: {}", outcome.scenario_id),
            ScenarioStatus::Failed => format!(
                "🚨 FAILED: {} | Step: {}",
                outcome.scenario_id,
                outcome.failed_step.as_deref().unwrap_or("-"),
            ),
        };

        serde_json::json!({ "text": text, "outcome": outcome })
    }

    async fn post_json(&self, payload: &serde_json::Value) -> Result<()> {
        let response = self
            .http_client
            .post(&self.config.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::BadStatus(response.status().as_u16()));
        }

        Ok(())
    }
}

#[async_trait]
impl NotifierPort for WebhookNotifier {
    async fn send(&self, outcome: &ScenarioOutcome) -> Result<()> {
        debug!("上报场景结果: {}", outcome.scenario_id);

        self.post_json(&Self::build_payload(outcome)).await?;

        info!("场景结果已上报: {}", outcome.scenario_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .with_status(200)
            .create_async()
            .await;

        let notifier =
            WebhookNotifier::new(WebhookConfig::new(&format!("{}/hook", server.url()))).unwrap();
        let outcome = ScenarioOutcome::passed("login");

        notifier.send(&outcome).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .create_async()
            .await;

        let notifier =
            WebhookNotifier::new(WebhookConfig::new(&format!("{}/hook", server.url()))).unwrap();
        let outcome = ScenarioOutcome::passed("login");

        let result = notifier.send(&outcome).await;
        assert!(matches!(result, Err(NotifyError::BadStatus(500))));
    }

    #[test]
    fn test_payload_carries_failed_step() {
        let outcome = ScenarioOutcome::failed("login", "Tap on LoginButton", "元素不可见");
        let payload = WebhookNotifier::build_payload(&outcome);

        let text = payload["text"].as_str().unwrap();
        assert!(text.contains("🚨 FAILED: login"));
        assert!(text.contains("Tap on LoginButton"));
        assert_eq!(payload["outcome"]["status"], "failed");
    }

    #[test]
    fn test_payload_for_passed_scenario() {
        let outcome = ScenarioOutcome::passed("checkout");
        let payload = WebhookNotifier::build_payload(&outcome);
        assert_eq!(payload["text"], "✅ PASSED: checkout");
    }
}
