//! 内容摄取管道 - 把分享扩展交接的内容转发进消息管道
//!
//! 流程：读取共享存储 → 校验新鲜度 → 立即清除（幂等保护）→
//! 发系统状态消息 → 延迟 1 秒后转发正式消息。
//!
//! 清除必须发生在任何后续处理之前，这是 at-most-once 转发的
//! 唯一保护：同一条记录被轮询观察到多次时，只有第一次能读到。

use crate::messaging::MessagingService;
use crate::shared_store::{ContentType, SharedContentStore};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 新鲜度窗口：写入超过 30 秒的记录直接丢弃（含边界）
pub const FRESHNESS_WINDOW_SECS: i64 = 30;

/// 转发前的固定延迟，给消息子系统留初始化时间
pub const FORWARD_DELAY: Duration = Duration::from_secs(1);

/// 链接类分享的结构化负载
#[derive(Debug, Deserialize)]
struct LinkPayload {
    url: String,
    title: String,
}

/// 内容摄取管道
pub struct ContentIngestionPipeline {
    store: Arc<dyn SharedContentStore>,
    messaging: Arc<dyn MessagingService>,
    forward_delay: Duration,
}

impl ContentIngestionPipeline {
    pub fn new(store: Arc<dyn SharedContentStore>, messaging: Arc<dyn MessagingService>) -> Self {
        Self {
            store,
            messaging,
            forward_delay: FORWARD_DELAY,
        }
    }

    /// 覆盖转发延迟（测试用）
    pub fn with_forward_delay(mut self, delay: Duration) -> Self {
        self.forward_delay = delay;
        self
    }

    /// 检查共享存储，有新鲜记录则摄取
    ///
    /// 不阻塞调用方；转发动作被调度为一次性延迟任务。
    pub fn ingest_if_fresh(&self, now: DateTime<Utc>) {
        let Some(record) = self.store.get() else {
            return;
        };

        let age = now.signed_duration_since(record.written_at);
        if age >= ChronoDuration::seconds(FRESHNESS_WINDOW_SECS) {
            debug!(age_secs = age.num_seconds(), "shared content is stale, discarding");
            return;
        }

        // 先清除，再处理。第二次并发或后续读取拿不到同一条记录。
        self.store.clear();

        info!(content_type = %record.content_type, "ingesting shared content");
        self.messaging
            .post_system_message(&format!("preparing to share {}...", record.content_type));

        // 延迟任务只捕获它需要的数据，记录本体此时已被清除
        let messaging = Arc::clone(&self.messaging);
        let delay = self.forward_delay;
        let content = record.content;
        let content_type = record.content_type;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let text = compose_forward_text(&content, content_type);
            messaging.send_message(&text);
        });
    }
}

/// 由交接内容构造转发文本
///
/// url 类型尝试解析 `{"url":..,"title":..}`，成功则生成
/// 「👇 [标题](链接)」形式的 markdown，把原始 URL 藏在标题后面；
/// 解析失败退回带固定前缀的纯文本。text 类型原样转发。
pub fn compose_forward_text(content: &str, content_type: ContentType) -> String {
    match content_type {
        ContentType::Text => content.to_string(),
        ContentType::Url => match serde_json::from_str::<LinkPayload>(content) {
            Ok(link) => format!("👇 [{}]({})", link.title, link.url),
            Err(_) => format!("Shared link: {}", content),
        },
    }
}
