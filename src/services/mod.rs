//! Business services
//!
//! - `scheduler`: daily activation and append-only enqueue
//! - `qr_image`: watermarked QR rendering
//! - `image_service`: per-entry image cache
//! - `access_gate`: admin cookie check

pub mod access_gate;
pub mod image_service;
pub mod qr_image;
pub mod scheduler;

pub use access_gate::{ADMIN_COOKIE_NAME, AccessGate, digest_password};
pub use image_service::ImageService;
pub use scheduler::{EnqueueRequest, Scheduler, next_activation_day};
