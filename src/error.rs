use thiserror::Error;

/// 应用程序错误类型
///
/// 这里的错误都会终止本次运行；可恢复的问题（快照读取失败、解题器失败）
/// 只记录日志，不会出现在这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 快照存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 协议错误（服务端拒绝答案或返回了无法继续的数据）
    #[error("协议错误: {0}")]
    Protocol(#[from] ProtocolError),
    /// 手动输入错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 响应不是合法的 JSON
    #[error("JSON解析失败 ({endpoint}, 状态码 {status}): {source}")]
    JsonParseFailed {
        endpoint: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    /// 无法拼出请求地址
    #[error("无效的URL ({url}): {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// 快照存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 序列化失败
    #[error("序列化快照失败: {0}")]
    SerializeFailed(#[from] serde_json::Error),
    /// 写入失败
    #[error("写入快照失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 协议错误
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// 答案未被接受
    #[error("题目 {index} 的答案未被接受: result={result:?}")]
    AnswerRejected { index: String, result: String },
    /// 未完成的回执缺少下一题地址
    #[error("题目 {index} 的回执缺少 nextQuestion")]
    MissingNextQuestion { index: String },
    /// 当前题目没有记录
    #[error("题目 {index} 尚未获取")]
    MissingRecord { index: String },
    /// 提交时记录里没有答案
    #[error("题目 {index} 还没有答案，无法提交")]
    MissingAnswer { index: String },
}

/// 手动输入错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 读取控制台失败
    #[error("读取输入失败: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// 输入流已关闭
    #[error("输入流已关闭，无法获取答案")]
    Closed,
}

/// 解题器错误
///
/// 只用于日志与测试观察，注册表会把它当作“无答案”继续尝试下一个解题器。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// 题目缺少必要字段
    #[error("题目缺少字段: {0}")]
    MissingField(&'static str),
    /// 字段形状不对
    #[error("题目字段 {field} 无法解析: {reason}")]
    InvalidField { field: &'static str, reason: String },
    /// 规则除数为 0
    #[error("规则除数不能为 0 (response: {response:?})")]
    ZeroDivisor { response: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建快照写入错误
    pub fn store_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Store(StoreError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建答案被拒绝错误
    pub fn answer_rejected(index: impl Into<String>, result: impl Into<String>) -> Self {
        AppError::Protocol(ProtocolError::AnswerRejected {
            index: index.into(),
            result: result.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
