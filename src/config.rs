// 控制台配置
//
// 配置来源按优先级依次覆盖：
// - 内置默认值
// - JSON 配置文件（可选）
// - 环境变量

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::api::ClientError;
use crate::models::is_record_field;

/// 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// API 根地址
    pub api_base_url: String,

    /// 每页条数
    pub page_size: u32,

    /// 内容表格中额外展示的元数据类型
    pub displayed_metadata_types: Vec<String>,

    /// 文本筛选输入的防抖窗口（毫秒）
    pub search_debounce_ms: u64,

    /// 请求超时（秒），为空表示不限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            page_size: 10,
            displayed_metadata_types: vec![
                "Language".to_string(),
                "Creator".to_string(),
                "Subject".to_string(),
            ],
            search_debounce_ms: 200,
            request_timeout_secs: None,
        }
    }
}

impl ConsoleConfig {
    /// 读取配置文件并应用环境变量
    ///
    /// # 行为
    /// - 文件不存在或未指定：使用默认配置
    /// - 文件损坏：记录警告并使用默认配置
    pub async fn load(config_path: Option<&Path>) -> Result<Self, ClientError> {
        let mut config = match config_path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path).await?;
                match serde_json::from_str::<ConsoleConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("成功加载配置: {:?}", path);
                        config
                    }
                    Err(e) => {
                        tracing::warn!("配置文件损坏，使用默认配置: {}", e);
                        ConsoleConfig::default()
                    }
                }
            }
            Some(path) => {
                tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
                ConsoleConfig::default()
            }
            None => ConsoleConfig::default(),
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// 用外部键值覆盖配置，无效的数值忽略
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CONSOLE_API_URL") {
            self.api_base_url = url;
        }
        if let Some(size) = parse_var(&lookup, "CONSOLE_PAGE_SIZE") {
            self.page_size = size;
        }
        if let Some(types) = lookup("CONSOLE_DISPLAYED_TYPES") {
            self.displayed_metadata_types = types
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(ms) = parse_var(&lookup, "CONSOLE_DEBOUNCE_MS") {
            self.search_debounce_ms = ms;
        }
        if let Some(secs) = parse_var(&lookup, "CONSOLE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = Some(secs);
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.page_size == 0 {
            return Err(ClientError::Config("page_size 必须大于 0".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ClientError::Config("api_base_url 不能为空".to_string()));
        }
        // 元数据列与记录字段平铺在同一行中
        if let Some(name) = self
            .displayed_metadata_types
            .iter()
            .find(|name| is_record_field(name))
        {
            return Err(ClientError::Config(format!(
                "元数据类型 {} 与内容字段重名",
                name
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("忽略无效的环境变量 {}={}", key, raw);
            None
        }
    }
}
