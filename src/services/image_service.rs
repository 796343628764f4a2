//! Per-entry QR images
//!
//! Maps an entry id to the PNG encoding its `/l/<id>` redirect URL. Images
//! never change once rendered, so they are kept in a bounded moka cache and
//! rendered off the async workers.

use bytes::Bytes;
use moka::sync::Cache;
use tracing::debug;

use super::qr_image;
use crate::errors::{DailyQrError, Result};

pub struct ImageService {
    base_url: String,
    cache: Cache<(i64, u32), Bytes>,
}

impl ImageService {
    pub fn new(public_url: &str, capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(capacity).build();

        debug!("ImageService initialized with max capacity: {}", capacity);
        Self {
            base_url: public_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Absolute URL a scanned code for entry `id` opens.
    pub fn redirect_url(&self, id: i64) -> String {
        format!("{}/l/{}", self.base_url, id)
    }

    /// PNG for entry `id` at `scale`, rendered once and cached.
    pub async fn png_for(&self, id: i64, scale: u32) -> Result<Bytes> {
        let cache = self.cache.clone();
        let text = self.redirect_url(id);

        tokio::task::spawn_blocking(move || {
            cache
                .try_get_with((id, scale), || {
                    debug!("Rendering QR image for #{} at scale {}", id, scale);
                    qr_image::generate(&text, scale).map(Bytes::from)
                })
                .map_err(|e| (*e).clone())
        })
        .await
        .map_err(|e| DailyQrError::image_encode(format!("render task failed: {}", e)))?
    }

    pub fn cached_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_url() {
        let service = ImageService::new("https://da.ilyqrco.de/", 4);
        assert_eq!(service.redirect_url(12), "https://da.ilyqrco.de/l/12");
    }

    #[tokio::test]
    async fn test_png_is_cached_per_id_and_scale() {
        let service = ImageService::new("https://da.ilyqrco.de", 16);

        let first = service.png_for(1, 1).await.unwrap();
        let again = service.png_for(1, 1).await.unwrap();
        let large = service.png_for(1, 2).await.unwrap();

        assert_eq!(first, again);
        assert_ne!(first, large);
        assert_eq!(service.cached_count(), 2);
    }

    #[tokio::test]
    async fn test_png_matches_direct_render() {
        let service = ImageService::new("https://da.ilyqrco.de", 16);
        let cached = service.png_for(7, 1).await.unwrap();
        let direct = qr_image::generate("https://da.ilyqrco.de/l/7", 1).unwrap();
        assert_eq!(cached.as_ref(), direct.as_slice());
    }
}
