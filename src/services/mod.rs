pub mod answer_source;
pub mod divisibility_solver;
pub mod solver;
pub mod solver_registry;

pub use answer_source::{AnswerSource, ConsoleAnswerSource, StaticAnswerSource};
pub use divisibility_solver::DivisibilitySolver;
pub use solver::{Solver, SolverOutcome};
pub use solver_registry::{Resolution, ResolveReport, SolverAttempt, SolverRegistry};
