//! UTA 场景脚本
//!
//! 行式命令语言：一行一条命令，按固定优先级匹配；
//! 外加符号化对象名到元素定位符的解析。

pub mod command;
pub mod locator;
pub mod objects;
pub mod script;

pub use command::{is_step, parse, Command};
pub use locator::{LocatorKind, LocatorSpec};
pub use objects::PageObjectMap;
pub use script::ScenarioScript;

use thiserror::Error;

/// 脚本层错误类型
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("脚本读取失败: {0}")]
    ScriptReadFailed(String),

    #[error("对象映射解析失败: {0}")]
    ObjectMapParseFailed(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScriptError>;
