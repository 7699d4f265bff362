use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 回执结果：答案正确
pub const RESULT_CORRECT: &str = "correct";
/// 回执结果：面试结束
pub const RESULT_COMPLETE: &str = "interview complete";

/// 尚未开始（介绍页）在快照中的键
pub const INTRO_INDEX: &str = "null";

/// 题号 → 答题记录，整体读写
pub type QuestionDb = BTreeMap<String, QuestionRecord>;

/// 题号在快照中对应的键
pub fn store_key(index: Option<&str>) -> &str {
    index.unwrap_or(INTRO_INDEX)
}

/// 规则：能被 `number` 整除时输出 `response`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub number: i64,
    pub response: String,
}

/// 服务端返回的题目
///
/// 题目内容不做类型约束：`numbers` / `rules` 保留原始 JSON，由解题器自己解析，
/// 形状不对只会让解题器放弃，不会影响获取和快照。其余字段原样保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionPayload {
    /// 只有描述的题目
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            ..Default::default()
        }
    }

    /// 题目描述；不是字符串时视为空
    pub fn message(&self) -> &str {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// 服务端对答案的回执
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckPayload {
    pub result: String,
    #[serde(
        rename = "nextQuestion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_question: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AckPayload {
    /// 答案被接受（`correct` 或 `interview complete`）
    pub fn is_accepted(&self) -> bool {
        self.result == RESULT_CORRECT || self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.result == RESULT_COMPLETE
    }

    /// 下一题编号：`nextQuestion` 最后一段路径
    pub fn next_index(&self) -> Option<String> {
        self.next_question
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}

/// 单题记录
///
/// `answer` 在尝试作答后写入，`ack` 在提交成功后写入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: QuestionPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<AckPayload>,
}

impl QuestionRecord {
    pub fn new(question: QuestionPayload) -> Self {
        Self {
            question,
            answer: None,
            ack: None,
        }
    }

    /// 已经被服务端接受过的答案，重启后可以原样重发
    pub fn accepted_answer(&self) -> Option<&str> {
        match (&self.answer, &self.ack) {
            (Some(answer), Some(ack)) if ack.is_accepted() => Some(answer),
            _ => None,
        }
    }
}
