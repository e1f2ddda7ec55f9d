//! Gemini API 客户端

use crate::types::{GenerateContentRequest, GenerateContentResponse};
use fitcast_core::GatewayError;
use reqwest::Client;

/// 默认模型
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// 默认服务地址
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini generateContent 客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// 创建客户端，使用默认模型与服务地址
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// 覆盖模型
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 覆盖服务地址
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 使用的模型名
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发起一次 generateContent 调用并解码响应
    pub(crate) async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!("API 返回 {status}: {body}")));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GatewayError::Parse(format!("响应体解码失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_model_and_base_url() {
        let client = GeminiClient::new("key")
            .with_model("gemini-test")
            .with_base_url("http://127.0.0.1:1");
        assert_eq!(client.model(), "gemini-test");
        assert_eq!(client.base_url, "http://127.0.0.1:1");
    }
}
