//! UTA 通用类型定义
//!
//! 此 crate 包含执行器与通知通道之间共享的场景结果类型。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 场景执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// 全部步骤执行成功
    Passed,

    /// 某一步骤执行失败
    Failed,
}

/// 场景执行结果
///
/// 每次场景执行结束后恰好生成一份（无论成功或失败），
/// 由通知通道和批次汇总共同消费。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// 场景标识
    pub scenario_id: String,

    /// 执行状态
    pub status: ScenarioStatus,

    /// 失败步骤的原始文本（成功时为空）
    pub failed_step: Option<String>,

    /// 错误信息（成功时为空）
    pub error: Option<String>,

    /// 录屏产物路径（未启用或录制失败时为空）
    pub video: Option<PathBuf>,

    /// 执行耗时（毫秒）
    pub duration_ms: u64,

    /// 结束时间
    pub finished_at: DateTime<Utc>,
}

impl ScenarioOutcome {
    /// 创建成功结果
    pub fn passed(scenario_id: &str) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            status: ScenarioStatus::Passed,
            failed_step: None,
            error: None,
            video: None,
            duration_ms: 0,
            finished_at: Utc::now(),
        }
    }

    /// 创建失败结果
    pub fn failed(scenario_id: &str, failed_step: &str, error: &str) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            status: ScenarioStatus::Failed,
            failed_step: Some(failed_step.to_string()),
            error: Some(error.to_string()),
            video: None,
            duration_ms: 0,
            finished_at: Utc::now(),
        }
    }

    /// 设置执行耗时
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// 是否通过
    pub fn is_passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// 导出为 JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 导出为 YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_outcome() {
        let outcome = ScenarioOutcome::passed("login");
        assert_eq!(outcome.scenario_id, "login");
        assert!(outcome.is_passed());
        assert!(outcome.failed_step.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_failed_outcome() {
        let outcome = ScenarioOutcome::failed("login", "Tap on LoginButton", "页面对象未定义: LoginButton");
        assert!(!outcome.is_passed());
        assert_eq!(outcome.failed_step.as_deref(), Some("Tap on LoginButton"));
        assert!(outcome.error.as_deref().unwrap().contains("LoginButton"));
    }

    #[test]
    fn test_outcome_json_roundtrip() {
        let outcome = ScenarioOutcome::passed("checkout").with_duration(1500);
        let json = outcome.to_json().unwrap();
        assert!(json.contains("checkout"));
        assert!(json.contains("passed"));

        let deserialized: ScenarioOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.scenario_id, outcome.scenario_id);
        assert_eq!(deserialized.duration_ms, 1500);
    }
}
