//! 通知分发器 - 构造并提交三类应用内事件的系统通知
//!
//! 应用在前台时整体抑制：用户正盯着会话，不需要横幅。
//! 提交失败静默吞掉，通知是 best-effort 投递。

use super::event::{NotificationEvent, NotificationKind};
use super::gateway::NotificationGateway;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 私信通知标题的固定前缀，router 据此反提取发送者
pub const PRIVATE_TITLE_LABEL: &str = "Private message from ";

/// 收藏对端上线通知的固定正文
const FAVORITE_ONLINE_BODY: &str = "wanna get in there?";

/// 通知分发器
pub struct NotificationDispatcher {
    gateway: Arc<dyn NotificationGateway>,
}

impl NotificationDispatcher {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// 有人在公共会话里提及了本机用户
    pub fn notify_mention(&self, sender: &str, message: &str) {
        self.deliver(
            NotificationKind::Mention,
            format!("{} mentioned you", sender),
            message.to_string(),
        );
    }

    /// 收到一条私信
    pub fn notify_private_message(&self, sender: &str, message: &str) {
        self.deliver(
            NotificationKind::PrivateMessage,
            format!("{}{}", PRIVATE_TITLE_LABEL, sender),
            message.to_string(),
        );
    }

    /// 收藏的对端上线了
    pub fn notify_favorite_online(&self, nickname: &str) {
        self.deliver(
            NotificationKind::FavoriteOnline,
            format!("{} is online", nickname),
            FAVORITE_ONLINE_BODY.to_string(),
        );
    }

    fn deliver(&self, kind: NotificationKind, title: String, body: String) {
        if self.gateway.is_foregrounded() {
            debug!(?kind, "app is foregrounded, skipping notification");
            return;
        }

        let Some(prefix) = kind.prefix() else {
            return;
        };
        let identifier = format!("{}{}", prefix, Uuid::new_v4());
        let event = NotificationEvent::new(identifier, kind, title, body);

        if let Err(e) = self.gateway.submit(&event) {
            warn!(?kind, error = %e, "notification submit failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// 测试用的 mock 网关，记录提交的事件
    struct MockGateway {
        foregrounded: AtomicBool,
        submitted: Mutex<Vec<NotificationEvent>>,
        fail_submit: bool,
    }

    impl MockGateway {
        fn new(foregrounded: bool) -> Self {
            Self {
                foregrounded: AtomicBool::new(foregrounded),
                submitted: Mutex::new(Vec::new()),
                fail_submit: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_submit: true,
                ..Self::new(false)
            }
        }

        fn submitted(&self) -> Vec<NotificationEvent> {
            self.submitted.lock().unwrap().clone()
        }
    }

    impl NotificationGateway for MockGateway {
        fn is_foregrounded(&self) -> bool {
            self.foregrounded.load(Ordering::SeqCst)
        }

        fn submit(&self, event: &NotificationEvent) -> Result<()> {
            if self.fail_submit {
                anyhow::bail!("delivery subsystem unavailable");
            }
            self.submitted.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_mention_templates() {
        let gateway = Arc::new(MockGateway::new(false));
        let dispatcher = NotificationDispatcher::new(gateway.clone());

        dispatcher.notify_mention("alice", "hey @bob");

        let events = gateway.submitted();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "alice mentioned you");
        assert_eq!(events[0].body, "hey @bob");
        assert!(events[0].identifier.starts_with("mention-"));
        assert_eq!(events[0].kind, NotificationKind::Mention);
    }

    #[test]
    fn test_private_message_templates() {
        let gateway = Arc::new(MockGateway::new(false));
        let dispatcher = NotificationDispatcher::new(gateway.clone());

        dispatcher.notify_private_message("Alice", "hi there");

        let events = gateway.submitted();
        assert_eq!(events[0].title, "Private message from Alice");
        assert_eq!(events[0].body, "hi there");
        assert!(events[0].identifier.starts_with("private-"));
    }

    #[test]
    fn test_favorite_online_templates() {
        let gateway = Arc::new(MockGateway::new(false));
        let dispatcher = NotificationDispatcher::new(gateway.clone());

        dispatcher.notify_favorite_online("carol");

        let events = gateway.submitted();
        assert_eq!(events[0].title, "carol is online");
        assert_eq!(events[0].body, "wanna get in there?");
        assert!(events[0].identifier.starts_with("favorite-online-"));
    }

    #[test]
    fn test_foregrounded_suppresses_all_kinds() {
        let gateway = Arc::new(MockGateway::new(true));
        let dispatcher = NotificationDispatcher::new(gateway.clone());

        dispatcher.notify_mention("a", "m");
        dispatcher.notify_private_message("a", "m");
        dispatcher.notify_favorite_online("a");

        assert!(gateway.submitted().is_empty());
    }

    #[test]
    fn test_submit_failure_is_swallowed() {
        let gateway = Arc::new(MockGateway::failing());
        let dispatcher = NotificationDispatcher::new(gateway);

        // 不 panic、不返回错误
        dispatcher.notify_private_message("alice", "hi");
    }

    #[test]
    fn test_identifiers_are_unique() {
        let gateway = Arc::new(MockGateway::new(false));
        let dispatcher = NotificationDispatcher::new(gateway.clone());

        dispatcher.notify_mention("a", "1");
        dispatcher.notify_mention("a", "2");

        let events = gateway.submitted();
        assert_ne!(events[0].identifier, events[1].identifier);
    }
}
