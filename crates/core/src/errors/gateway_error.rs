//! AI 网关统一错误模型
//!
//! 取消、上游失败、解析失败三类结果必须可区分：取消静默返回，
//! 其余两类以可关闭的提示展示给用户，均不触发自动重试。

use thiserror::Error;

/// AI 网关调用错误
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 调用在发起前或等待期间被用户取消，不产生任何结果
    #[error("请求已取消")]
    Cancelled,

    /// 传输失败或上游服务返回错误
    #[error("上游服务错误: {0}")]
    Upstream(String),

    /// 响应不符合预期结构
    #[error("响应解析失败: {0}")]
    Parse(String),
}

impl GatewayError {
    /// 是否为用户取消
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

impl From<GatewayError> for String {
    fn from(err: GatewayError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for GatewayError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
