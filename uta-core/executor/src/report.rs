//! 批次汇总报告

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use uta_common::ScenarioOutcome;

/// 批次执行汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// 批次标识
    pub run_id: Uuid,

    /// 场景总数
    pub total: usize,

    /// 通过数量
    pub passed: usize,

    /// 失败数量
    pub failed: usize,

    /// 批次耗时（毫秒）
    pub duration_ms: u64,

    /// 各场景结果（按声明顺序）
    pub outcomes: Vec<ScenarioOutcome>,
}

impl BatchReport {
    /// 由场景结果集合构建汇总
    pub fn new(outcomes: Vec<ScenarioOutcome>, duration_ms: u64) -> Self {
        let passed = outcomes.iter().filter(|o| o.is_passed()).count();

        Self {
            run_id: Uuid::new_v4(),
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
            duration_ms,
            outcomes,
        }
    }

    /// 是否全部通过
    pub fn all_passed(&self) -> bool {
        self.failed == 0
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
    fn test_counts() {
        let outcomes = vec![
            ScenarioOutcome::passed("a"),
            ScenarioOutcome::failed("b", "Tap on X", "页面对象未定义: X"),
            ScenarioOutcome::passed("c"),
        ];

        let report = BatchReport::new(outcomes, 1200);
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_empty_batch_passes() {
        let report = BatchReport::new(vec![], 0);
        assert!(report.all_passed());
    }

    #[test]
    fn test_json_export() {
        let report = BatchReport::new(vec![ScenarioOutcome::passed("a")], 10);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"total\": 1"));
        assert!(json.contains("passed"));
    }
}
