use serde::Serialize;
use std::collections::BTreeSet;

use super::{
    build_display_rows, ContentFilters, ContentRecord, DisplayRow, SearchCriteria, SortSpec,
};
use crate::api::ResultPage;

/// 搜索状态快照
///
/// 只由 `SearchStateController` 修改，对外以克隆的只读快照提供。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState {
    /// 用户的搜索条件，含排序意图；响应不会改写
    pub criteria: SearchCriteria,
    /// 当前结果页的页码，从 0 开始
    pub page: u32,
    pub page_size: u32,
    /// 当前结果页使用的排序
    pub sort: Option<SortSpec>,
    /// 排除已在该版本中的内容，`None` 表示不排除
    pub excluded_version: Option<i64>,
    /// 最近一次被采纳的请求的发出时间（毫秒）
    pub last_accepted_request_timestamp: i64,
    pub loaded_results: Vec<ContentRecord>,
    pub display_results: Vec<DisplayRow>,
    pub total_count: u64,
    /// 选中行在 `loaded_results` 中的下标
    pub selection: BTreeSet<usize>,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            page: 0,
            page_size,
            sort: None,
            excluded_version: None,
            last_accepted_request_timestamp: 0,
            loaded_results: Vec::new(),
            display_results: Vec::new(),
            total_count: 0,
            selection: BTreeSet::new(),
        }
    }

    /// 请求时间不早于已采纳的请求时才可提交
    pub fn accepts(&self, request_timestamp: i64) -> bool {
        request_timestamp >= self.last_accepted_request_timestamp
    }

    /// 当前条件对应的接口筛选参数，排序取 `sort`
    pub fn filters_for(&self, sort: Option<SortSpec>) -> ContentFilters {
        let mut filters = ContentFilters::from_criteria(&self.criteria);
        filters.sort = sort.map(|s| s.to_wire());
        filters.exclude_in_version = self.excluded_version;
        filters
    }

    /// 提交一页结果；选中下标随页面失效，搜索条件不变
    pub fn commit_page(
        &mut self,
        request_timestamp: i64,
        page: u32,
        page_size: u32,
        sort: Option<SortSpec>,
        result: ResultPage,
        displayed_types: &[String],
    ) {
        self.last_accepted_request_timestamp = request_timestamp;
        self.page = page;
        self.page_size = page_size;
        self.sort = sort;
        self.display_results = build_display_rows(&result.items, displayed_types);
        self.loaded_results = result.items;
        self.total_count = result.total_count;
        self.selection.clear();
    }

    /// 选中的记录，越界下标跳过
    pub fn selected_records(&self) -> Vec<&ContentRecord> {
        self.selection
            .iter()
            .filter_map(|&idx| self.loaded_results.get(idx))
            .collect()
    }
}
