//! 答题处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 获取题目（已缓存则跳过）
//! 2. 复用已被接受的答案 → 解题器 → 手动输入
//! 3. 提交 → 校验回执 → 保存快照
//! 4. 结束或者进入下一题

use tracing::info;

use crate::clients::FizzbotApi;
use crate::error::{AppError, AppResult, ProtocolError};
use crate::infrastructure::SessionStore;
use crate::services::{AnswerSource, Resolution, SolverRegistry};
use crate::utils::logging::{log_payload, truncate_text};
use crate::workflow::session::Session;

/// 答题处理流程
///
/// - 编排获取 / 作答 / 提交 / 前进
/// - 会话以值的形式传入传出
/// - 只依赖能力（api / registry / answers / store）
pub struct QuestionFlow {
    api: Box<dyn FizzbotApi>,
    registry: SolverRegistry,
    answers: Box<dyn AnswerSource>,
    store: SessionStore,
    first_question_index: String,
}

impl QuestionFlow {
    pub fn new(
        api: Box<dyn FizzbotApi>,
        registry: SolverRegistry,
        answers: Box<dyn AnswerSource>,
        store: SessionStore,
        first_question_index: impl Into<String>,
    ) -> Self {
        Self {
            api,
            registry,
            answers,
            store,
            first_question_index: first_question_index.into(),
        }
    }

    /// 一直处理到面试结束；没有次数上限
    pub async fn run(&self, mut session: Session) -> AppResult<Session> {
        while !session.is_finished() {
            session = self.step(session).await?;
        }
        Ok(session)
    }

    /// 处理一步：介绍页只获取不作答，普通题目走完整流程
    pub async fn step(&self, session: Session) -> AppResult<Session> {
        let session = self.fetch_question(session).await?;

        if session.current_index().is_none() {
            info!("👋 介绍页无需作答，进入第 {} 题", self.first_question_index);
            return Ok(session.start_at(self.first_question_index.clone()));
        }

        let session = self.resolve_answer(session).await?;
        let session = self.submit(session).await?;
        session.advance()
    }

    /// 获取题目；已有记录时不发请求
    pub async fn fetch_question(&self, session: Session) -> AppResult<Session> {
        if session.has_current_record() {
            info!("{} 📦 已缓存，跳过获取", session);
            return Ok(session.question_ready());
        }

        info!("{} 🔍 正在获取题目...", session);
        let question = self.api.fetch_question(session.current_index()).await?;
        log_payload("题目", &question);

        Ok(session.with_question(question))
    }

    /// 决定答案并写入记录
    pub async fn resolve_answer(&self, session: Session) -> AppResult<Session> {
        let record = session.current_record()?;

        if let Some(answer) = record.accepted_answer() {
            info!("{} ♻️ 复用已被接受的答案: {}", session, answer);
            let answer = answer.to_string();
            return session.with_answer(answer);
        }

        let answer = match self.registry.resolve(&record.question).resolution {
            Resolution::Solved { answer, .. } => answer,
            Resolution::ManualInputRequired => {
                info!(
                    "{} 没有解题器能回答: {}",
                    session,
                    truncate_text(record.question.message(), 80)
                );
                self.answers.ask(&record.question).await?
            }
        };

        session.with_answer(answer)
    }

    /// 提交答案，回执必须被接受，然后保存完整快照
    pub async fn submit(&self, session: Session) -> AppResult<Session> {
        let index = session.current_key().to_string();
        let answer = session
            .current_record()?
            .answer
            .clone()
            .ok_or_else(|| ProtocolError::MissingAnswer {
                index: index.clone(),
            })?;

        info!("{} 📤 正在提交答案: {}", session, answer);
        let ack = self.api.submit_answer(&index, &answer).await?;
        log_payload("回执", &ack);

        if !ack.is_accepted() {
            return Err(AppError::answer_rejected(index, ack.result));
        }

        let session = session.with_ack(ack)?;
        self.store.save(session.store()).await?;
        info!("{} ✓ 答案已接受，快照已保存", session);

        Ok(session)
    }
}
