use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 内容上挂载的元数据标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTag {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_id: Option<i64>,
    pub type_name: String,
}

/// 内容记录（列表接口返回的单条数据）
///
/// 字段形状由远端 API 决定，这里只做类型化映射，未知字段忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: String,
    pub file_size: Option<i64>,
    pub published_year: Option<String>,
    pub reviewed_on: Option<NaiveDate>,
    pub copyright: Option<String>,
    pub rights_statement: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub duplicatable: bool,
    #[serde(default)]
    pub metadata: Vec<i64>,
    #[serde(default)]
    pub metadata_info: Vec<MetadataTag>,
}

impl ContentRecord {
    /// 按元数据类型名取出标签名称，保持接口返回顺序
    pub fn tag_names_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.metadata_info
            .iter()
            .filter(move |tag| tag.type_name == type_name)
            .map(|tag| tag.name.as_str())
    }
}

/// 上传的内容文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 新建或编辑内容时提交的表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFields {
    pub title: String,
    pub description: String,
    /// 出版年份，提交为当年 1 月 1 日
    pub published_year: Option<i32>,
    pub reviewed_on: Option<NaiveDate>,
    /// 按元数据类型分组的标签 id
    pub metadata: BTreeMap<String, BTreeSet<i64>>,
    /// 编辑时为空表示保留原文件
    pub content_file: Option<ContentFile>,
}

impl ContentFields {
    /// 以已有记录为底稿，不带文件
    pub fn from_record(record: &ContentRecord) -> Self {
        let mut metadata: BTreeMap<String, BTreeSet<i64>> = BTreeMap::new();
        for tag in &record.metadata_info {
            metadata
                .entry(tag.type_name.clone())
                .or_default()
                .insert(tag.id);
        }

        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            published_year: record
                .published_year
                .as_deref()
                .and_then(|year| year.trim().parse().ok()),
            reviewed_on: record.reviewed_on,
            metadata,
            content_file: None,
        }
    }

    /// 文本表单项，元数据 id 每个一项
    pub fn text_fields(&self, active: bool) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
        ];
        if let Some(year) = self.published_year {
            fields.push(("published_date", format!("{}-01-01", year)));
        }
        if let Some(date) = self.reviewed_on {
            fields.push(("reviewed_on", date.format("%Y-%m-%d").to_string()));
        }
        fields.push(("active", active.to_string()));
        for id in self.metadata.values().flatten() {
            fields.push(("metadata", id.to_string()));
        }
        fields
    }
}
