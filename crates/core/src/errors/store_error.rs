//! 本地存储错误类型

use thiserror::Error;

/// 存储操作错误
///
/// 涵盖记录文件读写与序列化中可能出现的错误情况。
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO 错误
    #[error("存储 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化/反序列化失败
    #[error("存储序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StoreError> for String {
    fn from(err: StoreError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for StoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
