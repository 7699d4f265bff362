/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 面试服务根地址（以 `/` 结尾）
    pub base_url: String,
    /// 答题记录快照文件
    pub db_file: String,
    /// 第一道题的编号
    pub first_question_index: String,
    /// 非交互模式下的固定答案，未设置时从控制台读取
    pub static_answer: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.noopschallenge.com/fizzbot/".to_string(),
            db_file: "fizzbot.db".to_string(),
            first_question_index: "1".to_string(),
            static_answer: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: normalize_base_url(std::env::var("FIZZBOT_BASE_URL").unwrap_or(default.base_url)),
            db_file: std::env::var("FIZZBOT_DB_FILE").unwrap_or(default.db_file),
            first_question_index: std::env::var("FIZZBOT_FIRST_QUESTION").ok().filter(|v| !v.trim().is_empty()).unwrap_or(default.first_question_index),
            static_answer: std::env::var("FIZZBOT_STATIC_ANSWER").ok().or(default.static_answer),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 指定服务地址，其余取默认值（测试与本地调试用）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }
}

/// `Url::join` 只有在根地址以 `/` 结尾时才会保留最后一段路径
pub fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
