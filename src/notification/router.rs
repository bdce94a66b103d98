//! 通知路由器 - 把用户对系统通知的点击路由回会话状态
//!
//! 只有私信通知触发路由：从标题反提取发送者昵称，解析成对端
//! 身份后切换到私聊。其余种类只是信息性的，点击不产生动作。
//!
//! 路由器对消息服务只持弱引用，调用时解析；宿主视图模型已被
//! 销毁时直接跳过（预期情况，不是错误）。

use super::dispatcher::PRIVATE_TITLE_LABEL;
use super::event::{NotificationEvent, NotificationKind};
use crate::messaging::MessagingService;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// 通知路由器
pub struct NotificationRouter {
    messaging: Mutex<Option<Weak<dyn MessagingService>>>,
}

impl NotificationRouter {
    pub fn new() -> Self {
        Self {
            messaging: Mutex::new(None),
        }
    }

    /// 绑定消息服务（弱引用，不延长其生命周期）
    pub fn bind(&self, messaging: &Arc<dyn MessagingService>) {
        if let Ok(mut slot) = self.messaging.lock() {
            *slot = Some(Arc::downgrade(messaging));
        }
    }

    fn upgrade(&self) -> Option<Arc<dyn MessagingService>> {
        self.messaging.lock().ok()?.as_ref()?.upgrade()
    }

    /// 处理用户对已投递通知的交互
    ///
    /// 所有失败路径都静默返回：对端可能在通知投递和点击之间
    /// 下线，这属于正常情况。
    pub fn handle_interaction(&self, event: &NotificationEvent) {
        let kind = NotificationKind::from_identifier(&event.identifier);
        if kind != NotificationKind::PrivateMessage {
            return;
        }

        let Some(messaging) = self.upgrade() else {
            debug!("messaging service is gone, skipping notification routing");
            return;
        };

        // 标题没带标签时整体当作昵称（与历史行为一致）
        let sender = event
            .title
            .strip_prefix(PRIVATE_TITLE_LABEL)
            .unwrap_or(&event.title);
        if sender.is_empty() {
            debug!(identifier = %event.identifier, "notification title has no sender name");
            return;
        }

        let Some(peer) = messaging.get_peer_id_for_nickname(sender) else {
            debug!(sender, "peer not currently known, skipping private chat transition");
            return;
        };

        // 视图切换重派发到应用的 UI 执行上下文
        tokio::spawn(async move {
            messaging.start_private_chat(&peer);
        });
    }
}

impl Default for NotificationRouter {
    fn default() -> Self {
        Self::new()
    }
}
