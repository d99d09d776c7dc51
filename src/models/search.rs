use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 启用状态筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveFilter {
    All,
    #[default]
    Active,
    Inactive,
}

impl ActiveFilter {
    /// 转换为接口参数：全部 -> 不传
    pub fn as_wire(&self) -> Option<bool> {
        match self {
            ActiveFilter::All => None,
            ActiveFilter::Active => Some(true),
            ActiveFilter::Inactive => Some(false),
        }
    }
}

/// 可复制状态筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatableFilter {
    #[default]
    All,
    Yes,
    No,
}

impl DuplicatableFilter {
    pub fn as_wire(&self) -> Option<bool> {
        match self {
            DuplicatableFilter::All => None,
            DuplicatableFilter::Yes => Some(true),
            DuplicatableFilter::No => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// 排序规则（列名 + 方向）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// 接口格式: "<column>,<asc|desc>"
    pub fn to_wire(&self) -> String {
        format!("{},{}", self.column, self.direction.as_str())
    }
}

/// 用户可编辑的搜索条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub title: String,
    pub filename: String,
    pub copyright: String,
    pub years_from: Option<i32>,
    pub years_to: Option<i32>,
    pub file_size_from: Option<i64>,
    pub file_size_to: Option<i64>,
    pub reviewed_from: Option<NaiveDate>,
    pub reviewed_to: Option<NaiveDate>,
    pub active: ActiveFilter,
    pub duplicatable: DuplicatableFilter,
    /// 元数据类型名 -> 选中的元数据 ID
    pub metadata: BTreeMap<String, BTreeSet<i64>>,
    pub sort: Option<SortSpec>,
}

impl Default for SearchCriteria {
    /// 默认条件：只看启用的内容，其余不限
    fn default() -> Self {
        Self {
            title: String::new(),
            filename: String::new(),
            copyright: String::new(),
            years_from: None,
            years_to: None,
            file_size_from: None,
            file_size_to: None,
            reviewed_from: None,
            reviewed_to: None,
            active: ActiveFilter::Active,
            duplicatable: DuplicatableFilter::All,
            metadata: BTreeMap::new(),
            sort: None,
        }
    }
}

/// 区间校验：两端都有值且 from >= to 时整个区间作废（视为不限）
pub fn valid_range<T: PartialOrd + Copy>(from: Option<T>, to: Option<T>) -> (Option<T>, Option<T>) {
    match (from, to) {
        (Some(f), Some(t)) if f >= t => (None, None),
        other => other,
    }
}

/// 发送给列表接口的筛选条件（已归一化）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilters {
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub copyright: Option<String>,
    pub published_year_from: Option<i32>,
    pub published_year_to: Option<i32>,
    pub filesize_from: Option<i64>,
    pub filesize_to: Option<i64>,
    pub reviewed_from: Option<NaiveDate>,
    pub reviewed_to: Option<NaiveDate>,
    pub active: Option<bool>,
    pub duplicatable: Option<bool>,
    pub metadata: Vec<i64>,
    pub sort: Option<String>,
    /// 排除已收入该版本的内容
    pub exclude_in_version: Option<i64>,
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

impl ContentFilters {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let (published_year_from, published_year_to) =
            valid_range(criteria.years_from, criteria.years_to);
        let (filesize_from, filesize_to) =
            valid_range(criteria.file_size_from, criteria.file_size_to);
        let (reviewed_from, reviewed_to) =
            valid_range(criteria.reviewed_from, criteria.reviewed_to);

        Self {
            title: non_empty(&criteria.title),
            file_name: non_empty(&criteria.filename),
            copyright: non_empty(&criteria.copyright),
            published_year_from,
            published_year_to,
            filesize_from,
            filesize_to,
            reviewed_from,
            reviewed_to,
            active: criteria.active.as_wire(),
            duplicatable: criteria.duplicatable.as_wire(),
            metadata: criteria.metadata.values().flatten().copied().collect(),
            sort: criteria.sort.as_ref().map(SortSpec::to_wire),
            exclude_in_version: None,
        }
    }

    /// 展开为查询参数，缺省的条件不生成键
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(ref title) = self.title {
            pairs.push(("title", title.clone()));
        }
        if let Some(ref file_name) = self.file_name {
            pairs.push(("file_name", file_name.clone()));
        }
        if let Some(ref copyright) = self.copyright {
            pairs.push(("copyright_notes", copyright.clone()));
        }
        if let Some(year) = self.published_year_from {
            pairs.push(("published_year_from", year.to_string()));
        }
        if let Some(year) = self.published_year_to {
            pairs.push(("published_year_to", year.to_string()));
        }
        if let Some(size) = self.filesize_from {
            pairs.push(("filesize_from", size.to_string()));
        }
        if let Some(size) = self.filesize_to {
            pairs.push(("filesize_to", size.to_string()));
        }
        if let Some(date) = self.reviewed_from {
            pairs.push(("reviewed_from", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.reviewed_to {
            pairs.push(("reviewed_to", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(duplicatable) = self.duplicatable {
            pairs.push(("duplicatable", duplicatable.to_string()));
        }
        if !self.metadata.is_empty() {
            let ids: Vec<String> = self.metadata.iter().map(|id| id.to_string()).collect();
            pairs.push(("metadata", ids.join(",")));
        }
        if let Some(ref sort) = self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(version) = self.exclude_in_version {
            pairs.push(("exclude_in_version", version.to_string()));
        }

        pairs
    }
}
