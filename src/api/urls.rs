use url::Url;

use super::error::ClientResult;
use crate::models::ContentFilters;

/// 接口地址构建
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base: Url,
}

impl ApiUrls {
    /// `base_url` 例如 `http://localhost:8000/api`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        // 保证以 / 结尾，否则 join 会替换掉最后一段
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base: Url::parse(&base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path)?)
    }

    pub fn contents(&self) -> ClientResult<Url> {
        self.endpoint("contents/")
    }

    pub fn content_item(&self, id: i64) -> ClientResult<Url> {
        self.endpoint(&format!("contents/{}/", id))
    }

    /// 内容分页列表；`page` 为接口使用的从 1 开始的页码
    pub fn content_page(&self, page: u32, size: u32, filters: &ContentFilters) -> ClientResult<Url> {
        let mut url = self.contents()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("size", &size.to_string());
            for (key, value) in filters.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        Ok(url)
    }

    pub fn library_folder_add_content(&self, folder_id: i64) -> ClientResult<Url> {
        self.endpoint(&format!("library_folders/{}/add_content/", folder_id))
    }
}
