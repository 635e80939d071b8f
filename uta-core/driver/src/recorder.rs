//! 录屏端口

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::{DriverError, Result};

/// 录屏端口
///
/// start 与 stop_and_save 均为尽力而为：失败由调用方记录日志，
/// 不影响场景结论。
#[async_trait]
pub trait RecorderPort: Send + Sync {
    /// 开始录制
    async fn start(&mut self) -> Result<()>;

    /// 停止录制并保存产物，返回产物路径
    ///
    /// 无论场景成败都会被调用一次，已捕获的内容一律保留。
    async fn stop_and_save(&mut self, scenario_id: &str) -> Result<PathBuf>;
}

/// 空录屏器
///
/// 用于没有屏幕捕获能力的平台：start 即报告失败，
/// 场景在无录像的情况下继续执行。
#[derive(Debug, Default)]
pub struct NullRecorder;

#[async_trait]
impl RecorderPort for NullRecorder {
    async fn start(&mut self) -> Result<()> {
        debug!("录屏未启用");
        Err(DriverError::RecordingFailed("录屏未启用".to_string()))
    }

    async fn stop_and_save(&mut self, _scenario_id: &str) -> Result<PathBuf> {
        Err(DriverError::RecordingFailed("录屏未启用".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_recorder_reports_failure() {
        let mut recorder = NullRecorder;
        assert!(recorder.start().await.is_err());
        assert!(recorder.stop_and_save("login").await.is_err());
    }
}
