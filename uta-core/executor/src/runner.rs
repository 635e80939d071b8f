//! 场景执行器
//!
//! 驱动单个场景的完整生命周期：创建会话、开始录制、按文件
//! 顺序逐条解释步骤、无条件清理、恰好一次上报结果。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use uta_common::ScenarioOutcome;
use uta_driver::{RecorderPort, SessionPort, SessionRegistry};
use uta_notify::NotifierPort;
use uta_script::{command, Command, LocatorSpec, PageObjectMap, ScenarioScript};

use crate::{ExecutorError, Result, ScenarioConfig};

/// 初始化阶段的步骤标记（加载与会话创建失败时使用）
const STEP_INITIALIZATION: &str = "Initialization";

/// 场景执行器
///
/// 每次执行独占自己的会话与录屏器，执行结束前全部释放；
/// 场景之间因此无须任何锁。
pub struct ScenarioRunner {
    /// 平台会话注册表
    registry: Arc<SessionRegistry>,

    /// 结果通知通道
    notifier: Arc<dyn NotifierPort>,
}

impl ScenarioRunner {
    /// 创建新的场景执行器
    pub fn new(registry: Arc<SessionRegistry>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self { registry, notifier }
    }

    /// 执行单个场景
    ///
    /// 任何路径下都恰好返回一份结果并恰好上报一次。
    pub async fn run(&self, config: &ScenarioConfig) -> ScenarioOutcome {
        let scenario_id = config.scenario_id();
        let start = Instant::now();

        info!("开始执行场景: {}", scenario_id);

        let outcome = self
            .execute(config, &scenario_id)
            .await
            .with_duration(start.elapsed().as_millis() as u64);

        if outcome.is_passed() {
            info!("场景通过: {}", scenario_id);
        } else {
            error!(
                "场景失败: {} | 步骤: {} | {}",
                scenario_id,
                outcome.failed_step.as_deref().unwrap_or("-"),
                outcome.error.as_deref().unwrap_or("-"),
            );
        }

        // 投递失败不改变场景结论
        if let Err(e) = self.notifier.send(&outcome).await {
            warn!("场景 {} 结果上报失败: {}", scenario_id, e);
        }

        outcome
    }

    /// 场景主流程：加载、会话、解释、清理
    async fn execute(&self, config: &ScenarioConfig, scenario_id: &str) -> ScenarioOutcome {
        // 1. 加载对象映射与脚本，此处失败记为初始化失败
        let objects = match PageObjectMap::from_file(&config.objects) {
            Ok(map) => map,
            Err(e) => {
                let err = ExecutorError::ObjectMapLoadFailed(e.to_string());
                return ScenarioOutcome::failed(scenario_id, STEP_INITIALIZATION, &err.to_string());
            }
        };

        let script = match ScenarioScript::from_file(&config.script) {
            Ok(script) => script,
            Err(e) => {
                let err = ExecutorError::ScriptLoadFailed(e.to_string());
                return ScenarioOutcome::failed(scenario_id, STEP_INITIALIZATION, &err.to_string());
            }
        };

        debug!("场景 {} 共 {} 个步骤", scenario_id, script.len());

        // 2. 创建会话，失败同样记为初始化失败
        let mut session = match self.registry.open(config.platform).await {
            Ok(session) => session,
            Err(e) => {
                let err: ExecutorError = e.into();
                return ScenarioOutcome::failed(scenario_id, STEP_INITIALIZATION, &err.to_string());
            }
        };

        // 3. 开始录制，失败不致命，继续无录像执行
        let mut recorder = match self.registry.recorder_for(config.platform).await {
            Ok(recorder) => Some(recorder),
            Err(e) => {
                warn!("场景 {} 无法获取录屏器: {}", scenario_id, e);
                None
            }
        };

        let mut recording = false;
        if let Some(rec) = recorder.as_mut() {
            match rec.start().await {
                Ok(()) => recording = true,
                Err(e) => warn!("场景 {} 录制启动失败, 继续执行: {}", scenario_id, e),
            }
        }

        // 4. 按文件顺序逐条解释步骤，首个失败即终止循环
        let mut failure: Option<(String, ExecutorError)> = None;
        for raw in script.steps() {
            debug!("执行步骤: {}", raw);

            if let Err(e) = self.dispatch(session.as_mut(), &objects, raw).await {
                failure = Some((raw.clone(), e));
                break;
            }
        }

        // 5. 无条件清理：先保存录像再退出会话，两者都必须尝试
        let video = self
            .cleanup(scenario_id, session.as_mut(), recorder, recording)
            .await;

        // 6. 组装结果
        let mut outcome = match failure {
            None => ScenarioOutcome::passed(scenario_id),
            Some((step, err)) => ScenarioOutcome::failed(scenario_id, &step, &err.to_string()),
        };
        outcome.video = video;
        outcome
    }

    /// 解释并执行单条步骤
    async fn dispatch(
        &self,
        session: &mut dyn SessionPort,
        objects: &PageObjectMap,
        raw: &str,
    ) -> Result<()> {
        match command::parse(raw) {
            // 会话在进入解释循环之前已经创建
            Command::OpenSession => Ok(()),

            Command::Navigate { url } => Ok(session.navigate(&url).await?),

            Command::Tap { object } => {
                let locator = Self::resolve(objects, &object)?;
                Ok(session.tap(&locator).await?)
            }

            Command::Type { text, object } => {
                let locator = Self::resolve(objects, &object)?;
                Ok(session.type_text(&text, &locator).await?)
            }

            Command::Verify { object } => {
                let locator = Self::resolve(objects, &object)?;
                Ok(session.verify_visible(&locator).await?)
            }

            Command::Wait { seconds } => {
                // 场景作者显式要求的停顿，不是重试机制
                tokio::time::sleep(Duration::from_secs(seconds)).await;
                Ok(())
            }

            Command::Unknown { raw } => Err(ExecutorError::UnknownCommand(raw)),
        }
    }

    /// 在对象映射中查找并解析定位符
    ///
    /// 对象名缺失是显式上报的错误，不是静默空操作；
    /// 定位字符串到这一步才被解析。
    fn resolve(objects: &PageObjectMap, name: &str) -> Result<LocatorSpec> {
        let raw = objects
            .get(name)
            .ok_or_else(|| ExecutorError::ObjectNotFound(name.to_string()))?;
        Ok(LocatorSpec::parse(raw))
    }

    /// 停止录制并退出会话
    ///
    /// 即使其中一步出错另一步也会执行；失败场景的录像同样
    /// 保留，供事后排查。清理失败只记录日志。
    async fn cleanup(
        &self,
        scenario_id: &str,
        session: &mut dyn SessionPort,
        recorder: Option<Box<dyn RecorderPort>>,
        recording: bool,
    ) -> Option<PathBuf> {
        let mut video = None;

        if recording {
            if let Some(mut rec) = recorder {
                match rec.stop_and_save(scenario_id).await {
                    Ok(path) => {
                        info!("场景 {} 录像已保存: {}", scenario_id, path.display());
                        video = Some(path);
                    }
                    Err(e) => warn!("场景 {} 录像保存失败: {}", scenario_id, e),
                }
            }
        }

        if let Err(e) = session.quit().await {
            warn!("场景 {} 会话退出失败: {}", scenario_id, e);
        }

        video
    }
}
