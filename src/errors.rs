use std::fmt;

#[derive(Debug, Clone)]
pub enum ClickLensError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
}

impl ClickLensError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClickLensError::Validation(_) => "E001",
            ClickLensError::NotFound(_) => "E002",
            ClickLensError::Conflict(_) => "E003",
            ClickLensError::DatabaseConfig(_) => "E004",
            ClickLensError::DatabaseConnection(_) => "E005",
            ClickLensError::DatabaseOperation(_) => "E006",
            ClickLensError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClickLensError::Validation(_) => "Validation Error",
            ClickLensError::NotFound(_) => "Resource Not Found",
            ClickLensError::Conflict(_) => "Conflict",
            ClickLensError::DatabaseConfig(_) => "Database Configuration Error",
            ClickLensError::DatabaseConnection(_) => "Database Connection Error",
            ClickLensError::DatabaseOperation(_) => "Database Operation Error",
            ClickLensError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ClickLensError::Validation(msg) => msg,
            ClickLensError::NotFound(msg) => msg,
            ClickLensError::Conflict(msg) => msg,
            ClickLensError::DatabaseConfig(msg) => msg,
            ClickLensError::DatabaseConnection(msg) => msg,
            ClickLensError::DatabaseOperation(msg) => msg,
            ClickLensError::Serialization(msg) => msg,
        }
    }
}

impl fmt::Display for ClickLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ClickLensError {}

// 便捷的构造函数
impl ClickLensError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClickLensError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClickLensError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ClickLensError::Conflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ClickLensError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ClickLensError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ClickLensError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ClickLensError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClickLensError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClickLensError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClickLensError {
    fn from(err: serde_json::Error) -> Self {
        ClickLensError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClickLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ClickLensError::validation("x").code(), "E001");
        assert_eq!(ClickLensError::not_found("x").code(), "E002");
        assert_eq!(ClickLensError::conflict("x").code(), "E003");
    }

    #[test]
    fn test_display_contains_type_and_message() {
        let err = ClickLensError::validation("URL is required");
        let rendered = err.to_string();
        assert!(rendered.contains("Validation Error"));
        assert!(rendered.contains("URL is required"));
    }

    #[test]
    fn test_from_db_err() {
        let err: ClickLensError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, ClickLensError::DatabaseOperation(_)));
    }
}
