//! 通知事件结构与种类分类
//!
//! 种类由 identifier 的固定前缀决定，分类是纯函数。
//! 前缀表是与历史版本的兼容契约，不可改动。

use serde::{Deserialize, Serialize};

/// 私信通知的 identifier 前缀
pub const PRIVATE_PREFIX: &str = "private-";
/// 提及通知的 identifier 前缀
pub const MENTION_PREFIX: &str = "mention-";
/// 收藏对端上线通知的 identifier 前缀
pub const FAVORITE_ONLINE_PREFIX: &str = "favorite-online-";

/// 通知种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Mention,
    PrivateMessage,
    FavoriteOnline,
    Unknown,
}

impl NotificationKind {
    /// 按 identifier 前缀分类，未知前缀映射为 Unknown
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.starts_with(PRIVATE_PREFIX) {
            NotificationKind::PrivateMessage
        } else if identifier.starts_with(MENTION_PREFIX) {
            NotificationKind::Mention
        } else if identifier.starts_with(FAVORITE_ONLINE_PREFIX) {
            NotificationKind::FavoriteOnline
        } else {
            NotificationKind::Unknown
        }
    }

    /// 该种类生成 identifier 时使用的前缀
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            NotificationKind::PrivateMessage => Some(PRIVATE_PREFIX),
            NotificationKind::Mention => Some(MENTION_PREFIX),
            NotificationKind::FavoriteOnline => Some(FAVORITE_ONLINE_PREFIX),
            NotificationKind::Unknown => None,
        }
    }
}

/// 一条通知事件：分发时创建，用户交互时消费，不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub identifier: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

impl NotificationEvent {
    pub fn new(
        identifier: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            title: title.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_prefix() {
        assert_eq!(
            NotificationKind::from_identifier("private-abc"),
            NotificationKind::PrivateMessage
        );
        assert_eq!(
            NotificationKind::from_identifier("mention-xyz"),
            NotificationKind::Mention
        );
        assert_eq!(
            NotificationKind::from_identifier("favorite-online-1"),
            NotificationKind::FavoriteOnline
        );
        assert_eq!(
            NotificationKind::from_identifier("other-1"),
            NotificationKind::Unknown
        );
        assert_eq!(
            NotificationKind::from_identifier(""),
            NotificationKind::Unknown
        );
    }

    #[test]
    fn test_prefix_roundtrip() {
        for kind in [
            NotificationKind::Mention,
            NotificationKind::PrivateMessage,
            NotificationKind::FavoriteOnline,
        ] {
            let identifier = format!("{}token", kind.prefix().unwrap());
            assert_eq!(NotificationKind::from_identifier(&identifier), kind);
        }
        assert!(NotificationKind::Unknown.prefix().is_none());
    }
}
