//! 面试运行器 - 编排层
//!
//! ## 职责
//!
//! 1. **组装能力**：客户端、解题器注册表、手动答案来源、快照存储
//! 2. **加载快照**：读取失败时从空记录开始
//! 3. **驱动流程**：循环处理直到服务端返回 `interview complete`
//! 4. **统计输出**：记录本次提交数量

use tracing::info;

use crate::clients::{FizzbotApi, FizzbotClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::SessionStore;
use crate::services::{AnswerSource, ConsoleAnswerSource, SolverRegistry, StaticAnswerSource};
use crate::utils::logging::{log_finished, log_startup};
use crate::workflow::{QuestionFlow, Session};

/// 应用主结构
pub struct App {
    config: Config,
    store: SessionStore,
    flow: QuestionFlow,
}

impl App {
    /// 初始化应用：HTTP 客户端 + 默认解题器 + 控制台（或固定）答案
    pub fn initialize(config: Config) -> AppResult<Self> {
        let client = FizzbotClient::new(&config)?;

        let answers: Box<dyn AnswerSource> = match &config.static_answer {
            Some(answer) => Box::new(StaticAnswerSource::new(answer.clone())),
            None => Box::new(ConsoleAnswerSource::new()),
        };

        Ok(Self::with_parts(config, Box::new(client), answers))
    }

    /// 使用自定义的服务与答案来源组装
    pub fn with_parts(
        config: Config,
        api: Box<dyn FizzbotApi>,
        answers: Box<dyn AnswerSource>,
    ) -> Self {
        let store = SessionStore::new(&config.db_file);
        let flow = QuestionFlow::new(
            api,
            SolverRegistry::with_default_solvers(),
            answers,
            store.clone(),
            config.first_question_index.clone(),
        );

        Self {
            config,
            store,
            flow,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<Session> {
        let db = self.store.load().await;
        log_startup(&self.config.base_url, &self.config.db_file, db.len());

        let session = self.flow.run(Session::new(db)).await?;

        info!("{} 面试结束", session);
        log_finished(session.submitted(), &self.config.db_file);

        Ok(session)
    }
}
