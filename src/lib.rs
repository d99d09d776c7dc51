// 内容管理控制台客户端库
//
// 本库提供内容列表的客户端状态管理，包括：
// - 搜索条件与筛选参数转换
// - 内容管理 API 访问
// - 分页查询与乱序响应保护
// - 输入防抖
// - 配置加载

pub mod api;
pub mod config;
pub mod models;
pub mod services;

pub use api::{ClientError, ClientResult, ContentApi, HttpContentApi};
pub use config::ConsoleConfig;
pub use models::{QueryState, SearchCriteria};
pub use services::{Debouncer, SearchStateController};
