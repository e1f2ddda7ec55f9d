//! 协作式取消辅助
//!
//! 远程调用在取消令牌与调用结果之间做 select：令牌先触发则放弃
//! 等待并丢弃在途 future（随之释放其持有的连接资源），即使远程
//! 随后完成也不再产生结果。

use fitcast_core::GatewayError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// 等待调用完成或被取消
///
/// 令牌已触发时立即返回 [`GatewayError::Cancelled`]，不轮询 future。
pub(crate) async fn await_cancellable<T, F>(
    cancel: &CancellationToken,
    call: F,
) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    if cancel.is_cancelled() {
        return Err(GatewayError::Cancelled);
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(GatewayError::Cancelled),
        result = call => result,
    }
}
