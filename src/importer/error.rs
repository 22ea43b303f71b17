// ==========================================
// 酒店房价决策支持系统 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入层错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("数据库错误: {0}")]
    Repository(#[from] RepositoryError),
}

/// 导入层结果别名
pub type ImportResult<T> = Result<T, ImportError>;
