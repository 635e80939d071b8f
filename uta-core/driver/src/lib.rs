//! UTA 驱动抽象
//!
//! 定义解释器依赖的能力面：会话端口、录屏端口，以及按平台
//! 选择具体实现的注册表。真实的自动化后端由外部集成方提供，
//! 本 crate 自带一个进程内仿真后端用于试运行与测试。

pub mod platform;
pub mod recorder;
pub mod registry;
pub mod session;
pub mod sim;

pub use platform::Platform;
pub use recorder::{NullRecorder, RecorderPort};
pub use registry::SessionRegistry;
pub use session::{SessionFactory, SessionPort};
pub use sim::{SimBehavior, SimJournal, SimOp, SimRecorder, SimSession, SimSessionFactory};

use thiserror::Error;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("会话创建失败: {0}")]
    SessionCreateFailed(String),

    #[error("元素不可见: {0}")]
    NotVisible(String),

    #[error("导航失败: {0}")]
    NavigationFailed(String),

    #[error("输入操作失败: {0}")]
    InputFailed(String),

    #[error("会话已关闭")]
    SessionClosed,

    #[error("平台未注册: {0}")]
    PlatformNotRegistered(String),

    #[error("平台已注册: {0}")]
    PlatformAlreadyRegistered(String),

    #[error("录屏失败: {0}")]
    RecordingFailed(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
