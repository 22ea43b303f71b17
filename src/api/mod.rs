// ==========================================
// 酒店房价决策支持系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供外层传输/对话壳调用
// ==========================================

pub mod error;
pub mod pricing_api;
pub mod validator;

// 重导出
pub use error::{ApiError, ApiResult};
pub use pricing_api::{ApplyContext, ApplyResponse, PricingApi, SuggestAllResponse};
pub use validator::parse_approvals;
