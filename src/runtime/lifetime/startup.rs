use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{AccessGate, ImageService, Scheduler};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Everything the HTTP workers share, built once before the server starts.
pub struct StartupContext {
    pub config: Arc<StaticConfig>,
    pub storage: Arc<SeaOrmStorage>,
    pub scheduler: Arc<Scheduler>,
    pub images: Arc<ImageService>,
    pub gate: AccessGate,
}

/// 准备服务器启动的上下文
/// 包括存储、调度、图片缓存和管理员密钥
pub async fn prepare_server_startup(config: Arc<StaticConfig>) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let gate = AccessGate::from_base64(&config.admin.key).context("Invalid admin key")?;
    if gate.is_enabled() {
        info!("Admin pages enabled at /admin");
    }
    if !config.admin.cookie_secure {
        warn!("Admin cookie is sent without the Secure flag");
    }

    let scheduler = Arc::new(Scheduler::new(storage.clone()));
    let images = Arc::new(ImageService::new(
        config.server.base_url(),
        config.images.cache_capacity,
    ));
    info!("QR codes will point at {}/l/<id>", config.server.base_url());

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        config,
        storage,
        scheduler,
        images,
        gate,
    })
}
