//! 解题器能力约定

use crate::error::SolverError;
use crate::models::QuestionPayload;

/// 单个解题器的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverOutcome {
    /// 得到候选答案
    Answer(String),
    /// 这道题不归我管
    NoMatch,
}

/// 解题器
///
/// 只看题目数据，不做 IO；失败返回 `SolverError`，由注册表记录后跳过。
pub trait Solver: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, question: &QuestionPayload) -> Result<SolverOutcome, SolverError>;
}
