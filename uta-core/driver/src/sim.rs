//! 仿真后端
//!
//! 进程内的会话实现：记录每一次端口调用，支持按定位值注入
//! 失败与挂起。CLI 的试运行模式和执行器的集成测试都使用它。

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use uta_script::LocatorSpec;

use crate::{DriverError, Platform, RecorderPort, Result, SessionFactory, SessionPort};

/// 仿真后端记录的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimOp {
    /// 导航
    Navigate(String),

    /// 点击（记录定位符文本）
    Tap(String),

    /// 输入（文本, 定位符文本）
    Type(String, String),

    /// 可见性校验
    Verify(String),

    /// 会话退出
    Quit,

    /// 录制开始
    RecorderStart,

    /// 录制停止（记录场景标识）
    RecorderStop(String),
}

/// 仿真操作日志
///
/// 同一工厂创建的会话与录屏器共享一份日志，便于事后断言。
#[derive(Debug, Clone, Default)]
pub struct SimJournal {
    ops: Arc<Mutex<Vec<SimOp>>>,
}

impl SimJournal {
    /// 创建空日志
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, op: SimOp) {
        self.ops.lock().expect("仿真日志锁中毒").push(op);
    }

    /// 全部已记录操作的快照
    pub fn ops(&self) -> Vec<SimOp> {
        self.ops.lock().expect("仿真日志锁中毒").clone()
    }

    /// 会话退出次数
    pub fn quit_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, SimOp::Quit))
            .count()
    }

    /// 录制停止次数
    pub fn recorder_stop_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, SimOp::RecorderStop(_)))
            .count()
    }
}

/// 仿真行为配置
#[derive(Debug, Clone, Default)]
pub struct SimBehavior {
    /// 永远不可见的定位值（对应的 verify 将失败）
    pub invisible: Vec<String>,

    /// 导航是否失败
    pub fail_navigation: bool,

    /// 每步操作的挂起时长（模拟卡死场景）
    pub hang: Option<Duration>,

    /// 每步操作的固定延迟
    pub latency: Duration,
}

/// 仿真会话
pub struct SimSession {
    platform: Platform,
    behavior: SimBehavior,
    journal: SimJournal,
    closed: bool,
}

impl SimSession {
    async fn pause(&self) {
        if let Some(hang) = self.behavior.hang {
            tokio::time::sleep(hang).await;
        } else if !self.behavior.latency.is_zero() {
            tokio::time::sleep(self.behavior.latency).await;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(DriverError::SessionClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionPort for SimSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.ensure_open()?;
        self.pause().await;
        self.journal.record(SimOp::Navigate(url.to_string()));

        if self.behavior.fail_navigation {
            return Err(DriverError::NavigationFailed(url.to_string()));
        }
        Ok(())
    }

    async fn tap(&mut self, locator: &LocatorSpec) -> Result<()> {
        self.ensure_open()?;
        self.pause().await;
        self.journal.record(SimOp::Tap(locator.to_string()));
        Ok(())
    }

    async fn type_text(&mut self, text: &str, locator: &LocatorSpec) -> Result<()> {
        self.ensure_open()?;
        self.pause().await;
        self.journal
            .record(SimOp::Type(text.to_string(), locator.to_string()));
        Ok(())
    }

    async fn verify_visible(&mut self, locator: &LocatorSpec) -> Result<()> {
        self.ensure_open()?;
        self.pause().await;
        self.journal.record(SimOp::Verify(locator.to_string()));

        if self.behavior.invisible.iter().any(|v| v == &locator.value) {
            return Err(DriverError::NotVisible(locator.to_string()));
        }
        Ok(())
    }

    async fn quit(&mut self) -> Result<()> {
        self.journal.record(SimOp::Quit);
        self.closed = true;
        Ok(())
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// 仿真录屏器
pub struct SimRecorder {
    journal: SimJournal,
    fail_start: bool,
    artifact_dir: PathBuf,
}

#[async_trait]
impl RecorderPort for SimRecorder {
    async fn start(&mut self) -> Result<()> {
        self.journal.record(SimOp::RecorderStart);

        if self.fail_start {
            return Err(DriverError::RecordingFailed(
                "仿真录制被配置为失败".to_string(),
            ));
        }
        Ok(())
    }

    async fn stop_and_save(&mut self, scenario_id: &str) -> Result<PathBuf> {
        self.journal.record(SimOp::RecorderStop(scenario_id.to_string()));
        Ok(self.artifact_dir.join(format!("{}.mp4", scenario_id)))
    }
}

/// 仿真会话工厂
///
/// 同一工厂创建的所有会话与录屏器共享一份操作日志。
pub struct SimSessionFactory {
    platform: Platform,
    behavior: SimBehavior,
    journal: SimJournal,
    fail_open: bool,
    recorder_fail_start: bool,
    artifact_dir: PathBuf,
}

impl SimSessionFactory {
    /// 创建新的仿真工厂
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            behavior: SimBehavior::default(),
            journal: SimJournal::new(),
            fail_open: false,
            recorder_fail_start: false,
            artifact_dir: std::env::temp_dir(),
        }
    }

    /// 设置仿真行为
    pub fn with_behavior(mut self, behavior: SimBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// 会话创建直接失败
    pub fn with_open_failure(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// 录制启动直接失败
    pub fn with_recorder_failure(mut self) -> Self {
        self.recorder_fail_start = true;
        self
    }

    /// 设置录屏产物目录
    pub fn with_artifact_dir(mut self, dir: PathBuf) -> Self {
        self.artifact_dir = dir;
        self
    }

    /// 工厂的共享操作日志
    pub fn journal(&self) -> SimJournal {
        self.journal.clone()
    }
}

#[async_trait]
impl SessionFactory for SimSessionFactory {
    async fn open(&self) -> Result<Box<dyn SessionPort>> {
        if self.fail_open {
            return Err(DriverError::SessionCreateFailed(format!(
                "仿真后端拒绝创建 {} 会话",
                self.platform
            )));
        }

        debug!("创建仿真会话: {}", self.platform);

        Ok(Box::new(SimSession {
            platform: self.platform,
            behavior: self.behavior.clone(),
            journal: self.journal.clone(),
            closed: false,
        }))
    }

    fn recorder(&self) -> Box<dyn RecorderPort> {
        Box::new(SimRecorder {
            journal: self.journal.clone(),
            fail_start: self.recorder_fail_start,
            artifact_dir: self.artifact_dir.clone(),
        })
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}
