//! 消息服务契约 - 与传输层 / 会话视图的唯一接口
//!
//! 本 crate 不关心网格网络和会话存储，所有出站操作走这个 trait。

use serde::{Deserialize, Serialize};

/// 对端身份的不透明句柄
///
/// 由消息层从昵称解析得到，本 crate 只查找、不创建。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 消息服务契约
pub trait MessagingService: Send + Sync {
    /// 发送一条出站消息
    fn send_message(&self, text: &str);

    /// 在会话视图里插入一条系统状态消息
    fn post_system_message(&self, text: &str);

    /// 切换到与指定对端的私聊
    fn start_private_chat(&self, peer: &PeerId);

    /// 按昵称解析对端身份，对端不在线时返回 None
    fn get_peer_id_for_nickname(&self, nickname: &str) -> Option<PeerId>;
}
