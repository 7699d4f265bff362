//! # Fizzbot Client
//!
//! 自动完成 fizzbot 问答面试的客户端：获取题目、计算或询问答案、提交，
//! 再跟随服务端给出的下一题地址，直到面试结束。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有快照文件，只暴露整体读写能力
//! - `SessionStore` - 读取容错，写入原子替换
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - `FizzbotApi` 能力约定与基于 reqwest 的 `FizzbotClient`
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目
//! - `SolverRegistry` - 按顺序尝试解题器
//! - `DivisibilitySolver` - 整除规则题目
//! - `AnswerSource` - 手动答案（控制台 / 固定答案）
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `Session` - 快照 + 当前题号 + 是否结束
//! - `QuestionFlow` - 获取 → 作答 → 提交 → 前进
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/interview_runner` - 组装能力，运行到面试结束
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FizzbotApi, FizzbotClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::SessionStore;
pub use models::{AckPayload, QuestionPayload, QuestionRecord};
pub use orchestrator::App;
pub use services::{SolverRegistry, Solver};
pub use workflow::{QuestionFlow, Session, SessionState};
