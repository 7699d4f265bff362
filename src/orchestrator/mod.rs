//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! interview_runner (App：组装并运行)
//!     ↓
//! workflow::QuestionFlow (处理单个题目，会话以值传递)
//!     ↓
//! services (能力层：解题器 / 手动输入)
//!     ↓
//! clients + infrastructure (HTTP 客户端 / 快照存储)
//! ```

pub mod interview_runner;

pub use interview_runner::App;
