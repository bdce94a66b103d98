//! MeshChat Companion - 分享交接与通知路由核心
//!
//! 负责两件事：把分享扩展通过共享存储交接的内容摄取进出站消息
//! 管道，以及把系统通知的用户交互路由回会话状态。传输层、会话
//! 存储和 UI 都是外部协作方，分别通过 `MessagingService` 和
//! `NotificationGateway` 两个契约接入。

pub mod ingestion;
pub mod messaging;
pub mod notification;
pub mod shared_store;

pub use ingestion::{
    compose_forward_text, ContentIngestionPipeline, FORWARD_DELAY, FRESHNESS_WINDOW_SECS,
};
pub use messaging::{MessagingService, PeerId};
pub use notification::{
    NotificationDispatcher, NotificationEvent, NotificationGateway, NotificationKind,
    NotificationRouter, PRIVATE_TITLE_LABEL,
};
pub use shared_store::{ContentType, FileSharedStore, SharedContentRecord, SharedContentStore};
