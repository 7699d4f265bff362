pub mod question;

pub use question::{
    store_key, AckPayload, QuestionDb, QuestionPayload, QuestionRecord, Rule, INTRO_INDEX,
    RESULT_COMPLETE, RESULT_CORRECT,
};
