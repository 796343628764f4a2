//! API 模块常量定义
//!
//! 各类响应的 Cache-Control 取值。

/// 已生效条目的页面、跳转和图片：内容不会再变
pub const CACHE_IMMUTABLE: &str = "public, max-age=86400, immutable";

/// 当天解析结果、归档以及 404
pub const CACHE_SHORT: &str = "public, max-age=3600";

/// robots.txt 与静态资源
pub const CACHE_DAY: &str = "public, max-age=86400";

/// 管理页面以及除 404 外的错误页
pub const CACHE_NO_STORE: &str = "no-store";
