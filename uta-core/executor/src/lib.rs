//! UTA 执行器
//!
//! 场景解释与批次编排引擎。

pub mod config;
pub mod orchestrator;
pub mod report;
pub mod runner;

pub use config::{BatchConfig, ScenarioConfig};
pub use orchestrator::Orchestrator;
pub use report::BatchReport;
pub use runner::ScenarioRunner;

use thiserror::Error;

/// 执行器错误类型
///
/// 致命错误中止当前场景并成为其失败结论；录屏与通知的失败
/// 不在此列，它们只被记录日志，从不改变场景结论。
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("会话创建失败: {0}")]
    SessionOpenFailed(String),

    #[error("页面对象未定义: {0}")]
    ObjectNotFound(String),

    #[error("元素不可见: {0}")]
    NotVisible(String),

    #[error("无法识别的步骤: {0}")]
    UnknownCommand(String),

    #[error("场景执行超出批次时限")]
    ScenarioTimeout,

    #[error("脚本加载失败: {0}")]
    ScriptLoadFailed(String),

    #[error("对象映射加载失败: {0}")]
    ObjectMapLoadFailed(String),

    #[error("驱动错误: {0}")]
    Driver(String),
}

pub type Result<T> = std::result::Result<T, ExecutorError>;

impl From<uta_driver::DriverError> for ExecutorError {
    fn from(err: uta_driver::DriverError) -> Self {
        match err {
            uta_driver::DriverError::NotVisible(locator) => ExecutorError::NotVisible(locator),
            uta_driver::DriverError::SessionCreateFailed(msg) => {
                ExecutorError::SessionOpenFailed(msg)
            }
            uta_driver::DriverError::PlatformNotRegistered(platform) => {
                ExecutorError::SessionOpenFailed(format!("平台未注册: {}", platform))
            }
            other => ExecutorError::Driver(other.to_string()),
        }
    }
}
