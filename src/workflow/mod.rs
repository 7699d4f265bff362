pub mod question_flow;
pub mod session;

pub use question_flow::QuestionFlow;
pub use session::{Session, SessionState};
