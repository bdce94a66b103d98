//! MeshChat Companion CLI
//!
//! 分享交接与通知路由核心的组合根。`share` 扮演外部写入方，
//! `ingest`/`watch` 驱动摄取管道，`notify` 手动触发通知分发。

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use meshchat_companion::{
    ContentIngestionPipeline, ContentType, FileSharedStore, MessagingService,
    NotificationDispatcher, NotificationEvent, NotificationGateway, PeerId, SharedContentRecord,
    SharedContentStore, FORWARD_DELAY,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mcc")]
#[command(about = "MeshChat Companion - 分享交接与通知路由")]
#[command(version)]
struct Cli {
    /// 共享存储目录（默认 ~/.config/meshchat）
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 写入一条交接记录（模拟分享扩展）
    Share {
        /// 要分享的内容；url 类型时为 {"url":..,"title":..} JSON
        content: String,
        /// 按 url 类型写入（默认 text）
        #[arg(long)]
        url: bool,
    },
    /// 对共享存储执行一次摄取
    Ingest,
    /// 周期性轮询共享存储
    Watch {
        /// 轮询间隔（秒）
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
    /// 手动触发一条通知
    Notify {
        #[command(subcommand)]
        kind: NotifyKind,
        /// 模拟应用处于前台（通知应被抑制）
        #[arg(long, global = true)]
        foreground: bool,
    },
}

#[derive(Subcommand)]
enum NotifyKind {
    /// 提及通知
    Mention {
        sender: String,
        message: String,
    },
    /// 私信通知
    Private {
        sender: String,
        message: String,
    },
    /// 收藏对端上线通知
    Favorite {
        nickname: String,
    },
}

/// 把消息打印到终端的消息服务（组合根的演示实现）
struct ConsoleMessaging;

impl MessagingService for ConsoleMessaging {
    fn send_message(&self, text: &str) {
        println!("<you> {}", text);
    }

    fn post_system_message(&self, text: &str) {
        println!("* {}", text);
    }

    fn start_private_chat(&self, peer: &PeerId) {
        println!("* opening private chat with {}", peer);
    }

    fn get_peer_id_for_nickname(&self, _nickname: &str) -> Option<PeerId> {
        None
    }
}

/// 把通知打印到终端的网关
struct ConsoleGateway {
    foregrounded: bool,
}

impl NotificationGateway for ConsoleGateway {
    fn is_foregrounded(&self) -> bool {
        self.foregrounded
    }

    fn submit(&self, event: &NotificationEvent) -> Result<()> {
        println!("[{}] {}\n  {}", event.identifier, event.title, event.body);
        Ok(())
    }
}

fn open_store(dir: Option<PathBuf>) -> FileSharedStore {
    match dir {
        Some(dir) => FileSharedStore::with_dir(dir),
        None => FileSharedStore::new(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meshchat_companion=info,mcc=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Share { content, url } => {
            let store = open_store(cli.store_dir);
            let content_type = if url { ContentType::Url } else { ContentType::Text };
            store.put(&SharedContentRecord {
                content,
                content_type,
                written_at: Utc::now(),
            })?;
            info!(path = %store.path().display(), %content_type, "shared content written");
        }
        Commands::Ingest => {
            let store: Arc<dyn SharedContentStore> = Arc::new(open_store(cli.store_dir));
            let messaging: Arc<dyn MessagingService> = Arc::new(ConsoleMessaging);
            let pipeline = ContentIngestionPipeline::new(store, messaging);

            pipeline.ingest_if_fresh(Utc::now());
            // 延迟转发任务跑完再退出
            tokio::time::sleep(FORWARD_DELAY + Duration::from_millis(100)).await;
        }
        Commands::Watch { interval } => {
            let store: Arc<dyn SharedContentStore> = Arc::new(open_store(cli.store_dir));
            let messaging: Arc<dyn MessagingService> = Arc::new(ConsoleMessaging);
            let pipeline = ContentIngestionPipeline::new(store, messaging);

            info!(interval, "watching shared store");
            loop {
                pipeline.ingest_if_fresh(Utc::now());
                tokio::time::sleep(Duration::from_secs(interval)).await;
            }
        }
        Commands::Notify { kind, foreground } => {
            let gateway = Arc::new(ConsoleGateway {
                foregrounded: foreground,
            });
            let dispatcher = NotificationDispatcher::new(gateway);

            match kind {
                NotifyKind::Mention { sender, message } => {
                    dispatcher.notify_mention(&sender, &message)
                }
                NotifyKind::Private { sender, message } => {
                    dispatcher.notify_private_message(&sender, &message)
                }
                NotifyKind::Favorite { nickname } => dispatcher.notify_favorite_online(&nickname),
            }
        }
    }

    Ok(())
}
