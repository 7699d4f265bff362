//! 手动答案来源 - 业务能力层
//!
//! 注册表无法回答时由这里提供答案

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::InputError;
use crate::models::QuestionPayload;
use crate::utils::truncate_text;

/// 手动答案来源
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn ask(&self, question: &QuestionPayload) -> Result<String, InputError>;
}

/// 按行读取答案，阻塞直到读到一行
///
/// 读取器在整个运行期间只创建一次，管道输入里预读的后续行不会丢失。
pub struct ConsoleAnswerSource<R = BufReader<Stdin>> {
    reader: Mutex<R>,
}

impl ConsoleAnswerSource {
    /// 从标准输入读取
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for ConsoleAnswerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ConsoleAnswerSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

#[async_trait]
impl<R> AnswerSource for ConsoleAnswerSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn ask(&self, question: &QuestionPayload) -> Result<String, InputError> {
        info!("✍️ 需要手动作答: {}", truncate_text(question.message(), 80));

        let mut stdout = tokio::io::stdout();
        stdout.write_all(b"Answer: ").await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(InputError::Closed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 固定答案（非交互环境）
#[derive(Debug, Clone)]
pub struct StaticAnswerSource {
    answer: String,
}

impl StaticAnswerSource {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl AnswerSource for StaticAnswerSource {
    async fn ask(&self, question: &QuestionPayload) -> Result<String, InputError> {
        info!(
            "✍️ 使用固定答案 {:?}: {}",
            self.answer,
            truncate_text(question.message(), 80)
        );
        Ok(self.answer.clone())
    }
}
