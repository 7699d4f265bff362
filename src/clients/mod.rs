pub mod fizzbot_client;

pub use fizzbot_client::FizzbotClient;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{AckPayload, QuestionPayload};

/// 面试服务能力
///
/// 状态机只依赖这个 trait，测试里可以换成内存实现。
#[async_trait]
pub trait FizzbotApi: Send + Sync {
    /// 获取题目；`None` 表示介绍页
    async fn fetch_question(&self, index: Option<&str>) -> AppResult<QuestionPayload>;

    /// 提交答案并返回回执
    async fn submit_answer(&self, index: &str, answer: &str) -> AppResult<AckPayload>;
}
