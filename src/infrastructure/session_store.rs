//! 答题快照存储 - 基础设施层
//!
//! 持有快照文件路径，只暴露整体读取 / 整体覆盖写入的能力

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, StoreError};
use crate::models::{QuestionDb, QuestionRecord};

/// 答题快照存储
///
/// 职责：
/// - 读取快照（文件缺失或损坏时返回空记录）
/// - 整体覆盖写入快照（写临时文件后 rename，读方不会看到半个文件）
/// - 不认识状态机
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取快照，任何失败都只记录警告
    ///
    /// 文件缺失或不是 JSON 对象时返回空记录；单条记录损坏时只丢弃这一条。
    pub async fn load(&self) -> QuestionDb {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("⚠️ 无法读取快照 {}: {}，从头开始", self.path.display(), e);
                return QuestionDb::new();
            }
        };

        let entries = match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ 快照 {} 已损坏: {}，从头开始", self.path.display(), e);
                return QuestionDb::new();
            }
        };

        let mut db = QuestionDb::new();
        for (index, raw) in entries {
            match serde_json::from_value::<QuestionRecord>(raw) {
                Ok(record) => {
                    db.insert(index, record);
                }
                Err(e) => warn!("⚠️ 快照中题目 {} 的记录已损坏: {}，丢弃该条", index, e),
            }
        }

        debug!("已读取快照: {} 条记录", db.len());
        db
    }

    /// 覆盖写入完整快照
    ///
    /// 写文件和 fsync 放到阻塞线程池里执行。
    pub async fn save(&self, db: &QuestionDb) -> AppResult<()> {
        let json = serde_json::to_string(db).map_err(StoreError::SerializeFailed)?;
        let path = self.path.clone();
        let path_str = path.display().to_string();
        let count = db.len();

        task::spawn_blocking(move || write_atomically(&path, json.as_bytes()))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .and_then(|written| written)
            .map_err(|e| AppError::store_write_failed(&path_str, e))?;

        debug!("快照已保存: {} 条记录 → {}", count, path_str);
        Ok(())
    }
}

/// 写临时文件后 rename 到目标路径
fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
