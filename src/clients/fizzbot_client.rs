/// 面试服务 API 客户端
///
/// 封装所有与面试服务相关的 HTTP 调用
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::clients::FizzbotApi;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{AckPayload, QuestionPayload};

/// 面试服务客户端
///
/// 内部复用同一个 `reqwest::Client`（连接池 / keep-alive）。
pub struct FizzbotClient {
    http: Client,
    base_url: Url,
}

impl FizzbotClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// 题目地址：`<base>`（介绍页）或 `<base>/questions/<index>`
    pub fn question_url(&self, index: Option<&str>) -> AppResult<Url> {
        let Some(index) = index else {
            return Ok(self.base_url.clone());
        };

        self.base_url
            .join("questions/")
            .and_then(|url| url.join(index))
            .map_err(|e| {
                AppError::Api(ApiError::InvalidUrl {
                    url: format!("{}questions/{}", self.base_url, index),
                    reason: e.to_string(),
                })
            })
    }

    /// 读取响应体并解析 JSON
    ///
    /// 答错时服务端返回 4xx 但仍带 JSON 回执，所以这里不按状态码报错，
    /// 是否接受由状态机判断。
    async fn decode<T: DeserializeOwned>(endpoint: &str, response: reqwest::Response) -> AppResult<T> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("响应 {} ({}): {}", endpoint, status, body);

        serde_json::from_str(&body).map_err(|source| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                status,
                source,
            })
        })
    }
}

#[async_trait]
impl FizzbotApi for FizzbotClient {
    async fn fetch_question(&self, index: Option<&str>) -> AppResult<QuestionPayload> {
        let url = self.question_url(index)?;
        let endpoint = url.to_string();
        debug!("GET {}", endpoint);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::decode(&endpoint, response).await
    }

    async fn submit_answer(&self, index: &str, answer: &str) -> AppResult<AckPayload> {
        let url = self.question_url(Some(index))?;
        let endpoint = url.to_string();
        debug!("POST {} answer={:?}", endpoint, answer);

        let response = self
            .http
            .post(url)
            .json(&json!({ "answer": answer }))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::decode(&endpoint, response).await
    }
}
