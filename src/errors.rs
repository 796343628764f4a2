use std::fmt;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};

use crate::api::constants::{CACHE_NO_STORE, CACHE_SHORT};

#[derive(Debug, Clone)]
pub enum DailyQrError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    NothingScheduled(String),
    QrEncode(String),
    ImageEncode(String),
}

impl DailyQrError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            DailyQrError::Config(_) => "E001",
            DailyQrError::DatabaseConfig(_) => "E002",
            DailyQrError::DatabaseConnection(_) => "E003",
            DailyQrError::DatabaseOperation(_) => "E004",
            DailyQrError::Validation(_) => "E005",
            DailyQrError::NotFound(_) => "E006",
            DailyQrError::NothingScheduled(_) => "E007",
            DailyQrError::QrEncode(_) => "E008",
            DailyQrError::ImageEncode(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            DailyQrError::Config(_) => "Configuration Error",
            DailyQrError::DatabaseConfig(_) => "Database Configuration Error",
            DailyQrError::DatabaseConnection(_) => "Database Connection Error",
            DailyQrError::DatabaseOperation(_) => "Database Operation Error",
            DailyQrError::Validation(_) => "Validation Error",
            DailyQrError::NotFound(_) => "Resource Not Found",
            DailyQrError::NothingScheduled(_) => "Nothing Scheduled",
            DailyQrError::QrEncode(_) => "QR Encode Error",
            DailyQrError::ImageEncode(_) => "Image Encode Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            DailyQrError::Config(msg)
            | DailyQrError::DatabaseConfig(msg)
            | DailyQrError::DatabaseConnection(msg)
            | DailyQrError::DatabaseOperation(msg)
            | DailyQrError::Validation(msg)
            | DailyQrError::NotFound(msg)
            | DailyQrError::NothingScheduled(msg)
            | DailyQrError::QrEncode(msg)
            | DailyQrError::ImageEncode(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DailyQrError::NotFound(_))
    }
}

impl fmt::Display for DailyQrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DailyQrError {}

// 便捷的构造函数
impl DailyQrError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        DailyQrError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        DailyQrError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        DailyQrError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        DailyQrError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        DailyQrError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        DailyQrError::NotFound(msg.into())
    }

    pub fn nothing_scheduled<T: Into<String>>(msg: T) -> Self {
        DailyQrError::NothingScheduled(msg.into())
    }

    pub fn image_encode<T: Into<String>>(msg: T) -> Self {
        DailyQrError::ImageEncode(msg.into())
    }
}

impl From<sea_orm::DbErr> for DailyQrError {
    fn from(err: sea_orm::DbErr) -> Self {
        DailyQrError::DatabaseOperation(err.to_string())
    }
}

impl From<qrcode::types::QrError> for DailyQrError {
    fn from(err: qrcode::types::QrError) -> Self {
        DailyQrError::QrEncode(err.to_string())
    }
}

impl From<png::EncodingError> for DailyQrError {
    fn from(err: png::EncodingError) -> Self {
        DailyQrError::ImageEncode(err.to_string())
    }
}

impl From<base64::DecodeError> for DailyQrError {
    fn from(err: base64::DecodeError) -> Self {
        DailyQrError::Config(format!("invalid base64 admin key: {}", err))
    }
}

/// Per-request boundary: every failure ends here and only affects its own
/// request. Not-found gets a real 404, everything else the generic error page.
/// Only not-found may be cached; a fatal error must not outlive its cause.
impl ResponseError for DailyQrError {
    fn status_code(&self) -> StatusCode {
        match self {
            DailyQrError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{}", self);
        } else {
            tracing::error!("{}", self);
        }

        let cache_control = if self.is_not_found() {
            CACHE_SHORT
        } else {
            CACHE_NO_STORE
        };

        HttpResponse::build(status)
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .insert_header((header::CACHE_CONTROL, cache_control))
            .body(crate::api::services::templates::error_page(self).into_string())
    }
}

pub type Result<T> = std::result::Result<T, DailyQrError>;
