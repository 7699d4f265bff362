//! 整除规则解题器（FizzBuzz / BeepBoop 一类题目）

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SolverError;
use crate::models::{QuestionPayload, Rule};
use crate::services::solver::{Solver, SolverOutcome};

/// 同时出现两个关键词才算整除类题目
const KEYWORD_PAIRS: &[(&str, &str)] = &[("Fizz", "Buzz"), ("Beep", "Boop")];

/// 后续题目通常只说“规则不变 / 换了规则”
const CONTINUATION_PATTERN: &str = r"(?i)\b(same|new|these|follow the)\s+rules\b";

pub struct DivisibilitySolver {
    continuation: Option<Regex>,
}

impl DivisibilitySolver {
    pub fn new() -> Self {
        Self {
            continuation: Regex::new(CONTINUATION_PATTERN).ok(),
        }
    }

    /// 题目描述是否属于整除类
    pub fn is_applicable(&self, message: &str) -> bool {
        let keyword_match = KEYWORD_PAIRS
            .iter()
            .any(|(first, second)| message.contains(first) && message.contains(second));

        keyword_match
            || self
                .continuation
                .as_ref()
                .is_some_and(|re| re.is_match(message))
    }
}

impl Default for DivisibilitySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for DivisibilitySolver {
    fn name(&self) -> &'static str {
        "divisibility"
    }

    fn attempt(&self, question: &QuestionPayload) -> Result<SolverOutcome, SolverError> {
        if !self.is_applicable(question.message()) {
            return Ok(SolverOutcome::NoMatch);
        }

        let numbers: Vec<i64> = parse_field("numbers", question.numbers.as_ref())?;
        let rules: Vec<Rule> = parse_field("rules", question.rules.as_ref())?;

        solve(&numbers, &rules).map(SolverOutcome::Answer)
    }
}

/// 把原始 JSON 字段解析成解题需要的类型
fn parse_field<T: DeserializeOwned>(
    field: &'static str,
    value: Option<&Value>,
) -> Result<T, SolverError> {
    let value = value.ok_or(SolverError::MissingField(field))?;
    serde_json::from_value(value.clone()).map_err(|e| SolverError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

/// 逐个数字套用规则，命中的 response 直接拼接，未命中输出数字本身，之间用单个空格分隔
pub fn solve(numbers: &[i64], rules: &[Rule]) -> Result<String, SolverError> {
    if let Some(rule) = rules.iter().find(|rule| rule.number == 0) {
        return Err(SolverError::ZeroDivisor {
            response: rule.response.clone(),
        });
    }

    let words: Vec<String> = numbers
        .iter()
        .map(|&n| {
            let word: String = rules
                .iter()
                // i64::MIN % -1 溢出，但它确实能整除
                .filter(|rule| n.checked_rem(rule.number).map_or(true, |r| r == 0))
                .map(|rule| rule.response.as_str())
                .collect();

            if word.is_empty() {
                n.to_string()
            } else {
                word
            }
        })
        .collect();

    Ok(words.join(" "))
}
