//! 面试会话
//!
//! 把“快照 + 当前题号 + 是否结束”收拢成一个值，每次状态转换都消费旧值并返回新值

use std::fmt::Display;

use crate::error::{AppResult, ProtocolError};
use crate::models::{store_key, AckPayload, QuestionDb, QuestionPayload, QuestionRecord};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 还没有题号（介绍页）
    Start,
    /// 等待获取题目
    AwaitingQuestion,
    /// 题目已就绪，等待作答
    AwaitingAnswer,
    /// 答案已提交并保存
    Submitted,
    /// 面试结束
    Finished,
}

/// 面试会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    store: QuestionDb,
    current_index: Option<String>,
    finished: bool,
    state: SessionState,
    /// 本次运行提交的答案数
    submitted: usize,
}

impl Session {
    /// 从快照创建会话，总是从介绍页开始
    pub fn new(store: QuestionDb) -> Self {
        Self {
            store,
            current_index: None,
            finished: false,
            state: SessionState::Start,
            submitted: 0,
        }
    }

    pub fn store(&self) -> &QuestionDb {
        &self.store
    }

    pub fn current_index(&self) -> Option<&str> {
        self.current_index.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// 当前题目在快照中的键
    pub fn current_key(&self) -> &str {
        store_key(self.current_index())
    }

    /// 当前题目是否已有记录
    pub fn has_current_record(&self) -> bool {
        self.store.contains_key(self.current_key())
    }

    pub fn current_record(&self) -> AppResult<&QuestionRecord> {
        self.store
            .get(self.current_key())
            .ok_or_else(|| self.missing_record())
    }

    /// 介绍页无需作答，直接进入第一题
    pub fn start_at(mut self, first_index: impl Into<String>) -> Self {
        self.current_index = Some(first_index.into());
        self.state = SessionState::AwaitingQuestion;
        self
    }

    /// 当前题目已缓存，不再请求
    pub fn question_ready(mut self) -> Self {
        if self.current_index.is_some() {
            self.state = SessionState::AwaitingAnswer;
        }
        self
    }

    /// 记录新获取的题目（尚无答案与回执）
    pub fn with_question(mut self, question: QuestionPayload) -> Self {
        let key = self.current_key().to_string();
        self.store.insert(key, QuestionRecord::new(question));
        self.question_ready()
    }

    /// 在提交前写入答案（仅内存）
    pub fn with_answer(mut self, answer: impl Into<String>) -> AppResult<Self> {
        let key = self.current_key().to_string();
        let missing = self.missing_record();
        let record = self.store.get_mut(&key).ok_or(missing)?;
        record.answer = Some(answer.into());
        Ok(self)
    }

    /// 写入已被接受的回执
    pub fn with_ack(mut self, ack: AckPayload) -> AppResult<Self> {
        let key = self.current_key().to_string();
        let missing = self.missing_record();
        let record = self.store.get_mut(&key).ok_or(missing)?;
        record.ack = Some(ack);
        self.state = SessionState::Submitted;
        self.submitted += 1;
        Ok(self)
    }

    /// 根据当前回执结束或者移到下一题
    pub fn advance(mut self) -> AppResult<Self> {
        let index = self.current_key().to_string();
        let ack = self
            .current_record()?
            .ack
            .as_ref()
            .ok_or_else(|| ProtocolError::MissingNextQuestion {
                index: index.clone(),
            })?;

        if ack.is_complete() {
            self.finished = true;
            self.state = SessionState::Finished;
            return Ok(self);
        }

        let next = ack
            .next_index()
            .ok_or(ProtocolError::MissingNextQuestion { index })?;
        self.current_index = Some(next);
        self.state = SessionState::AwaitingQuestion;
        Ok(self)
    }

    fn missing_record(&self) -> crate::error::AppError {
        ProtocolError::MissingRecord {
            index: self.current_key().to_string(),
        }
        .into()
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目#{} 状态#{:?}]", self.current_key(), self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{INTRO_INDEX, RESULT_COMPLETE, RESULT_CORRECT};
    use serde_json::Map;

    fn ack(result: &str, next: Option<&str>) -> AckPayload {
        AckPayload {
            result: result.to_string(),
            next_question: next.map(str::to_string),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_new_session_starts_at_intro() {
        let session = Session::new(QuestionDb::new());
        assert_eq!(session.state(), SessionState::Start);
        assert_eq!(session.current_index(), None);
        assert_eq!(session.current_key(), INTRO_INDEX);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_intro_question_keeps_start_state() {
        let session = Session::new(QuestionDb::new()).with_question(QuestionPayload::default());
        assert_eq!(session.state(), SessionState::Start);
        assert!(session.store().contains_key(INTRO_INDEX));

        let session = session.start_at("1");
        assert_eq!(session.state(), SessionState::AwaitingQuestion);
        assert_eq!(session.current_index(), Some("1"));
    }

    #[test]
    fn test_full_transition_to_next_question() {
        let session = Session::new(QuestionDb::new())
            .start_at("1")
            .with_question(QuestionPayload::default());
        assert_eq!(session.state(), SessionState::AwaitingAnswer);

        let session = session
            .with_answer("Rust")
            .unwrap()
            .with_ack(ack(RESULT_CORRECT, Some("/fizzbot/questions/42")))
            .unwrap();
        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(session.submitted(), 1);
        assert_eq!(
            session.current_record().unwrap().accepted_answer(),
            Some("Rust")
        );

        let session = session.advance().unwrap();
        assert_eq!(session.state(), SessionState::AwaitingQuestion);
        assert_eq!(session.current_index(), Some("42"));
        assert!(!session.has_current_record());
    }

    #[test]
    fn test_complete_ack_finishes_without_next_question() {
        let session = Session::new(QuestionDb::new())
            .start_at("9")
            .with_question(QuestionPayload::default())
            .with_answer("done")
            .unwrap()
            .with_ack(ack(RESULT_COMPLETE, None))
            .unwrap()
            .advance()
            .unwrap();

        assert!(session.is_finished());
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.current_index(), Some("9"));
    }

    #[test]
    fn test_correct_ack_without_next_question_is_error() {
        let err = Session::new(QuestionDb::new())
            .start_at("3")
            .with_question(QuestionPayload::default())
            .with_ack(ack(RESULT_CORRECT, None))
            .unwrap()
            .advance()
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Protocol(ProtocolError::MissingNextQuestion { .. })
        ));
    }

    #[test]
    fn test_answer_without_record_is_error() {
        let err = Session::new(QuestionDb::new())
            .start_at("5")
            .with_answer("x")
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Protocol(ProtocolError::MissingRecord { .. })
        ));
    }
}
