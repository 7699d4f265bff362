//! 解题器注册表 - 业务能力层
//!
//! 按固定顺序尝试解题器，第一个给出非空答案的获胜

use tracing::{debug, info, warn};

use crate::error::SolverError;
use crate::models::QuestionPayload;
use crate::services::divisibility_solver::DivisibilitySolver;
use crate::services::solver::{Solver, SolverOutcome};

/// 注册表的最终判断
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 某个解题器给出了答案
    Solved { solver: &'static str, answer: String },
    /// 没有解题器能回答，需要手动输入
    ManualInputRequired,
}

/// 单个解题器的尝试记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverAttempt {
    pub solver: &'static str,
    pub outcome: Result<SolverOutcome, SolverError>,
}

/// 一次解题的完整报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    pub resolution: Resolution,
    /// 按顺序记录实际尝试过的解题器（获胜者之后的不会被调用）
    pub attempts: Vec<SolverAttempt>,
}

impl ResolveReport {
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &SolverError)> + '_ {
        self.attempts
            .iter()
            .filter_map(|a| a.outcome.as_ref().err().map(|e| (a.solver, e)))
    }
}

/// 解题器注册表
pub struct SolverRegistry {
    solvers: Vec<Box<dyn Solver>>,
}

impl SolverRegistry {
    /// 使用指定顺序的解题器
    pub fn new(solvers: Vec<Box<dyn Solver>>) -> Self {
        Self { solvers }
    }

    /// 默认注册表：目前只有整除规则解题器
    pub fn with_default_solvers() -> Self {
        Self::new(vec![Box::new(DivisibilitySolver::new())])
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// 依次尝试解题器
    pub fn resolve(&self, question: &QuestionPayload) -> ResolveReport {
        let mut attempts = Vec::with_capacity(self.solvers.len());

        for solver in &self.solvers {
            let outcome = solver.attempt(question);

            let answer = match &outcome {
                Ok(SolverOutcome::Answer(answer)) if !answer.is_empty() => Some(answer.clone()),
                Ok(_) => {
                    debug!("解题器 {} 无法回答", solver.name());
                    None
                }
                Err(e) => {
                    warn!("⚠️ 解题器 {} 失败: {}", solver.name(), e);
                    None
                }
            };

            attempts.push(SolverAttempt {
                solver: solver.name(),
                outcome,
            });

            if let Some(answer) = answer {
                info!("🤖 解题器 {} 给出答案: {}", solver.name(), answer);
                return ResolveReport {
                    resolution: Resolution::Solved {
                        solver: solver.name(),
                        answer,
                    },
                    attempts,
                };
            }
        }

        ResolveReport {
            resolution: Resolution::ManualInputRequired,
            attempts,
        }
    }
}

impl Default for SolverRegistry {
    fn default() -> Self {
        Self::with_default_solvers()
    }
}
