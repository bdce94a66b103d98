//! 通知子系统 - 事件构造、分发与交互路由
//!
//! # 组成
//! 1. `event`：事件结构与 identifier 前缀分类（纯函数）
//! 2. `gateway`：OS 通知子系统的窄接口，前台查询 + 提交
//! 3. `dispatcher`：三类应用事件的通知构造与前台抑制
//! 4. `router`：用户点击通知后路由回私聊

pub mod dispatcher;
pub mod event;
pub mod gateway;
pub mod router;

pub use dispatcher::{NotificationDispatcher, PRIVATE_TITLE_LABEL};
pub use event::{NotificationEvent, NotificationKind};
pub use gateway::NotificationGateway;
pub use router::NotificationRouter;
