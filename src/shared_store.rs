//! 共享内容存储 - 跨进程的分享交接区
//!
//! 分享扩展（外部进程）把内容写入共享区，主应用读取并清除。
//! 双方之间没有互斥保证，at-most-once 由读取方的
//! 「先清除、后处理」顺序保证（见 ingestion 模块）。

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// 共享内容的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Url,
}

impl ContentType {
    /// 从存储的字符串解析，未知值回退为 Text
    pub fn parse(s: &str) -> Self {
        match s {
            "url" => ContentType::Url,
            _ => ContentType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Url => "url",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 一条交接记录：外部进程写一次，主应用最多读取并清除一次
#[derive(Debug, Clone)]
pub struct SharedContentRecord {
    pub content: String,
    pub content_type: ContentType,
    pub written_at: DateTime<Utc>,
}

/// 共享存储契约
///
/// `get` 在没有记录或记录已被清除时返回 None。
/// 两个操作都不要求外部写入方同时在运行。
pub trait SharedContentStore: Send + Sync {
    fn get(&self) -> Option<SharedContentRecord>;
    fn clear(&self);
}

/// 磁盘上的 JSON 键名与分享扩展约定一致，不可改动
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    #[serde(rename = "sharedContent")]
    content: String,
    #[serde(rename = "sharedContentType", default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(rename = "sharedContentDate")]
    written_at: DateTime<Utc>,
}

/// 基于单个 JSON 文件的共享存储
pub struct FileSharedStore {
    path: PathBuf,
}

impl FileSharedStore {
    /// 默认路径：`~/.config/meshchat/shared_content.json`
    pub fn new() -> Self {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("meshchat");
        Self::with_dir(dir)
    }

    /// 指定目录（测试或自定义 app group 路径）
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("shared_content.json"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// 写入一条记录（外部写入方 / CLI `share` 使用）
    ///
    /// 先写临时文件再原子 rename，读取方不会看到半截记录。
    pub fn put(&self, record: &SharedContentRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            content: record.content.clone(),
            content_type: Some(record.content_type.as_str().to_string()),
            written_at: record.written_at,
        };

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, serde_json::to_string(&file)?)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn read_file(&self) -> Option<StoreFile> {
        use fs2::FileExt;

        let file = File::open(&self.path).ok()?;
        file.lock_shared().ok()?;
        let mut contents = String::new();
        let result = (&file).read_to_string(&mut contents);
        let _ = file.unlock();
        result.ok()?;

        match serde_json::from_str(&contents) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "shared store file is malformed, ignoring");
                None
            }
        }
    }
}

impl Default for FileSharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedContentStore for FileSharedStore {
    fn get(&self) -> Option<SharedContentRecord> {
        let file = self.read_file()?;
        let content_type = file
            .content_type
            .as_deref()
            .map(ContentType::parse)
            .unwrap_or(ContentType::Text);

        Some(SharedContentRecord {
            content: file.content,
            content_type,
            written_at: file.written_at,
        })
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(error = %e, "failed to clear shared store");
            }
        }
    }
}
