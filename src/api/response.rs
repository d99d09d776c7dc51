use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ClientError, ClientResult};
use crate::models::ContentRecord;

/// 统一的API响应包装器
///
/// 成功: `{ "success": true, "data": ... }`
/// 失败: `{ "success": false, "error": "..." | { ... } }`
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 取出数据；success=false 视为失败
    pub fn into_result(self) -> ClientResult<T> {
        if !self.success {
            return Err(ClientError::Api(self.error_message()));
        }
        self.data
            .ok_or_else(|| ClientError::Api("响应缺少 data 字段".to_string()))
    }

    /// 只关心成功与否的接口（删除、批量添加）
    pub fn into_unit(self) -> ClientResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ClientError::Api(self.error_message()))
        }
    }

    /// 错误信息可能是字符串，也可能是带 message 的对象或字段校验对象
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(msg)) => msg.clone(),
            Some(Value::Object(map)) => match map.get("message") {
                Some(Value::String(msg)) => msg.clone(),
                _ => Value::Object(map.clone()).to_string(),
            },
            Some(other) => other.to_string(),
            None => self
                .message
                .clone()
                .unwrap_or_else(|| "未知错误".to_string()),
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(rename = "results")]
    pub items: Vec<ContentRecord>,
    #[serde(rename = "count")]
    pub total_count: u64,
}
