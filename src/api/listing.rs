use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use super::response::{ApiEnvelope, ResultPage};
use super::urls::ApiUrls;
use crate::config::ConsoleConfig;
use crate::models::{ContentFields, ContentFilters};

/// 内容管理 API 接口
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// 分页查询内容；`page` 为接口页码（从 1 开始）
    async fn list_contents(
        &self,
        page: u32,
        page_size: u32,
        filters: &ContentFilters,
    ) -> ClientResult<ResultPage>;

    /// 把内容批量加入文件夹
    async fn add_contents_to_folder(&self, folder_id: i64, content_ids: &[i64]) -> ClientResult<()>;

    /// 上传新内容，新内容总是启用
    async fn create_content(&self, fields: &ContentFields) -> ClientResult<()>;

    /// 修改已有内容；`fields.content_file` 为空时保留原文件
    async fn update_content(
        &self,
        content_id: i64,
        fields: &ContentFields,
        active: bool,
    ) -> ClientResult<()>;

    async fn delete_content(&self, content_id: i64) -> ClientResult<()>;
}

fn content_form(fields: &ContentFields, active: bool) -> Form {
    let mut form = fields
        .text_fields(active)
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    if let Some(ref file) = fields.content_file {
        form = form.part(
            "content_file",
            Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
        );
    }
    form
}

/// 基于 reqwest 的 API 客户端
#[derive(Clone)]
pub struct HttpContentApi {
    client: Client,
    urls: ApiUrls,
}

impl HttpContentApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            urls: ApiUrls::new(base_url)?,
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> ClientResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    /// 解析响应信封；非 2xx 且无法解析时返回状态码错误
    async fn read_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<ApiEnvelope<T>> {
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
            Ok(envelope) if !status.is_success() && envelope.success => {
                Err(ClientError::Http(status.as_u16()))
            }
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ClientError::Http(status.as_u16())),
            Err(e) => Err(ClientError::Decode(e)),
        }
    }

    /// 删除等接口成功时可能没有响应体
    async fn read_unit(response: Response) -> ClientResult<()> {
        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(());
        }
        Self::read_envelope::<Value>(response).await?.into_unit()
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn list_contents(
        &self,
        page: u32,
        page_size: u32,
        filters: &ContentFilters,
    ) -> ClientResult<ResultPage> {
        let url = self.urls.content_page(page, page_size, filters)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_envelope::<ResultPage>(response).await?.into_result()
    }

    async fn add_contents_to_folder(&self, folder_id: i64, content_ids: &[i64]) -> ClientResult<()> {
        let url = self.urls.library_folder_add_content(folder_id)?;
        tracing::debug!("POST {} ({} items)", url, content_ids.len());

        let response = self
            .client
            .post(url)
            .json(&json!({ "content_ids": content_ids }))
            .send()
            .await?;
        Self::read_unit(response).await
    }

    async fn create_content(&self, fields: &ContentFields) -> ClientResult<()> {
        if fields.content_file.is_none() {
            return Err(ClientError::InvalidInput("缺少内容文件".to_string()));
        }
        let url = self.urls.contents()?;
        tracing::debug!("POST {} ({})", url, fields.title);

        let response = self
            .client
            .post(url)
            .multipart(content_form(fields, true))
            .send()
            .await?;
        Self::read_unit(response).await
    }

    async fn update_content(
        &self,
        content_id: i64,
        fields: &ContentFields,
        active: bool,
    ) -> ClientResult<()> {
        let url = self.urls.content_item(content_id)?;
        tracing::debug!("PATCH {}", url);

        let response = self
            .client
            .patch(url)
            .multipart(content_form(fields, active))
            .send()
            .await?;
        Self::read_unit(response).await
    }

    async fn delete_content(&self, content_id: i64) -> ClientResult<()> {
        let url = self.urls.content_item(content_id)?;
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        Self::read_unit(response).await
    }
}
