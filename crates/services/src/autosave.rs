//! 草稿自动保存任务
//!
//! 后台循环按固定间隔为当前草稿打点并落盘，保证打开超过一个周期的
//! 草稿即使不手动保存也已持久化。任务通过取消令牌收敛；单次打点
//! 失败只记录告警，下一个周期重试。

use crate::draft_service::DraftService;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// 默认自动保存间隔
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(60);

/// 自动保存任务句柄
///
/// 调用 [`AutosaveHandle::stop`] 或 drop 句柄都会停止后台循环。
pub struct AutosaveHandle {
    cancel: CancellationToken,
}

impl AutosaveHandle {
    /// 停止自动保存循环
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// 循环是否已停止
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// 启动自动保存循环
pub fn spawn_autosave(service: Arc<DraftService>, interval: Duration) -> AutosaveHandle {
    let cancel = CancellationToken::new();
    let loop_token = cancel.clone();

    tokio::spawn(async move {
        info!(
            "[Autosave] 自动保存任务已启动，间隔 {} 秒",
            interval.as_secs()
        );
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    match service.tick().await {
                        Ok(true) => debug!("[Autosave] 草稿已自动保存"),
                        Ok(false) => {}
                        Err(e) => warn!("[Autosave] 自动保存失败: {e}"),
                    }
                }
                _ = loop_token.cancelled() => {
                    info!("[Autosave] 自动保存任务已停止");
                    break;
                }
            }
        }
    });

    AutosaveHandle { cancel }
}
