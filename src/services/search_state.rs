// 内容搜索状态控制器
//
// 持有搜索条件、分页、选中行和最近一次被采纳的结果页。
// 多个查询可以同时在途；结果按发出顺序生效，晚到的旧响应直接丢弃。

use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::clock::{Clock, SystemClock};
use crate::api::{ClientError, ClientResult, ContentApi};
use crate::config::ConsoleConfig;
use crate::models::{ContentFields, ContentRecord, QueryState, SearchCriteria, SortSpec};

/// 搜索状态控制器
///
/// `QueryState` 只能通过这里的操作修改，外部拿到的都是克隆快照。
pub struct SearchStateController {
    api: Arc<dyn ContentApi>,
    clock: Arc<dyn Clock>,
    displayed_types: Vec<String>,
    state: Arc<RwLock<QueryState>>,
}

impl SearchStateController {
    pub fn new(api: Arc<dyn ContentApi>, config: &ConsoleConfig) -> Self {
        Self::with_clock(
            api,
            Arc::new(SystemClock::new()),
            config.page_size,
            config.displayed_metadata_types.clone(),
        )
    }

    pub fn with_clock(
        api: Arc<dyn ContentApi>,
        clock: Arc<dyn Clock>,
        page_size: u32,
        displayed_types: Vec<String>,
    ) -> Self {
        Self {
            api,
            clock,
            displayed_types,
            state: Arc::new(RwLock::new(QueryState::new(page_size))),
        }
    }

    /// 当前状态快照
    pub async fn snapshot(&self) -> QueryState {
        self.state.read().await.clone()
    }

    /// 修改搜索条件并从第一页重新加载
    pub async fn update_criteria<F>(&self, mutator: F) -> ClientResult<()>
    where
        F: FnOnce(&mut SearchCriteria) + Send,
    {
        let (page_size, sort) = {
            let mut state = self.state.write().await;
            mutator(&mut state.criteria);
            (state.page_size, state.criteria.sort.clone())
        };
        self.load_page(0, page_size, sort).await
    }

    /// 修改排序并从第一页重新加载
    pub async fn set_sort(&self, sort: Option<SortSpec>) -> ClientResult<()> {
        self.update_criteria(move |criteria| criteria.sort = sort).await
    }

    /// 翻页，沿用当前页大小和排序
    pub async fn set_page(&self, page: u32) -> ClientResult<()> {
        let (page_size, sort) = {
            let state = self.state.read().await;
            (state.page_size, state.criteria.sort.clone())
        };
        self.load_page(page, page_size, sort).await
    }

    /// 修改页大小并回到第一页
    pub async fn set_page_size(&self, page_size: u32) -> ClientResult<()> {
        if page_size == 0 {
            return Err(ClientError::InvalidInput("page_size 必须大于 0".to_string()));
        }
        let sort = self.state.read().await.criteria.sort.clone();
        self.load_page(0, page_size, sort).await
    }

    /// 设置要排除的版本并回到第一页；`Some(0)` 与 `None` 相同
    pub async fn set_excluded_version(&self, version_id: Option<i64>) -> ClientResult<()> {
        let (page_size, sort) = {
            let mut state = self.state.write().await;
            state.excluded_version = version_id.filter(|id| *id != 0);
            (state.page_size, state.criteria.sort.clone())
        };
        self.load_page(0, page_size, sort).await
    }

    /// 加载指定页
    ///
    /// `page` 从 0 开始，接口页码从 1 开始；`sort` 只用于这一次请求。
    /// 失败时状态不变；成功但已有更新的请求被采纳时，结果静默丢弃。
    pub async fn load_page(
        &self,
        page: u32,
        page_size: u32,
        sort: Option<SortSpec>,
    ) -> ClientResult<()> {
        // 条件和时间戳在同一把写锁内取得，发出顺序与时间戳顺序一致
        let (filters, request_timestamp) = {
            let state = self.state.write().await;
            (state.filters_for(sort.clone()), self.clock.now_millis())
        };

        tracing::debug!(
            "Dispatching content page {} (size {}) at {}",
            page,
            page_size,
            request_timestamp
        );

        let result = match self
            .api
            .list_contents(page.saturating_add(1), page_size, &filters)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Failed to load content page {}: {}", page, e);
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if !state.accepts(request_timestamp) {
            tracing::debug!(
                "Discarding stale content page {} ({} < {})",
                page,
                request_timestamp,
                state.last_accepted_request_timestamp
            );
            return Ok(());
        }

        tracing::debug!(
            "Accepted content page {}: {} of {} items",
            page,
            result.items.len(),
            result.total_count
        );
        state.commit_page(
            request_timestamp,
            page,
            page_size,
            sort,
            result,
            &self.displayed_types,
        );
        Ok(())
    }

    /// 按当前页、页大小和用户排序重新加载
    pub async fn reload(&self) -> ClientResult<()> {
        let (page, page_size, sort) = {
            let state = self.state.read().await;
            (state.page, state.page_size, state.criteria.sort.clone())
        };
        self.load_page(page, page_size, sort).await
    }

    /// 恢复默认搜索条件并回到第一页
    pub async fn reset_search(&self) -> ClientResult<()> {
        let page_size = {
            let mut state = self.state.write().await;
            state.criteria = SearchCriteria::default();
            state.page_size
        };
        self.load_page(0, page_size, None).await
    }

    /// 替换选中行（当前页下标）
    ///
    /// 越界下标原样保留，但 `selected_records` 和加入文件夹都会忽略它们。
    pub async fn set_selection<I>(&self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let selection: BTreeSet<usize> = indices.into_iter().collect();
        self.state.write().await.selection = selection;
    }

    pub async fn selected_records(&self) -> Vec<ContentRecord> {
        self.state
            .read()
            .await
            .selected_records()
            .into_iter()
            .cloned()
            .collect()
    }

    /// 把选中的内容加入文件夹，然后刷新当前页
    ///
    /// 返回加入的条数；没有选中时不发请求。
    pub async fn add_selected_to_folder(&self, folder_id: i64) -> ClientResult<usize> {
        let content_ids: Vec<i64> = self
            .selected_records()
            .await
            .iter()
            .map(|record| record.id)
            .collect();
        if content_ids.is_empty() {
            return Ok(0);
        }

        self.api
            .add_contents_to_folder(folder_id, &content_ids)
            .await?;
        tracing::info!("Added {} contents to folder {}", content_ids.len(), folder_id);

        self.reload().await?;
        Ok(content_ids.len())
    }

    /// 上传新内容，然后刷新当前页
    pub async fn add_content(&self, fields: &ContentFields) -> ClientResult<()> {
        self.api.create_content(fields).await?;
        tracing::info!("Added content {}", fields.title);
        self.reload().await
    }

    /// 编辑内容，启用状态沿用原记录，然后刷新当前页
    pub async fn edit_content(&self, to_edit: &ContentRecord, fields: &ContentFields) -> ClientResult<()> {
        self.api
            .update_content(to_edit.id, fields, to_edit.active)
            .await?;
        tracing::info!("Updated content {}", to_edit.id);
        self.reload().await
    }

    /// 删除内容，然后刷新当前页
    pub async fn delete_content(&self, content_id: i64) -> ClientResult<()> {
        self.api.delete_content(content_id).await?;
        tracing::info!("Deleted content {}", content_id);
        self.reload().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResultPage;
    use crate::models::{ActiveFilter, ContentFile, ContentFilters, SortDirection};
    use crate::services::clock::ManualClock;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = ClientResult<ResultPage>;

    /// 记录请求并按预设顺序回复的假 API
    #[derive(Default)]
    struct FakeApi {
        list_calls: Mutex<Vec<(u32, u32, ContentFilters)>>,
        /// 立即返回的响应
        ready: Mutex<VecDeque<Reply>>,
        /// 按接口页码挂起、由测试手动放行的响应
        gated: Mutex<HashMap<u32, oneshot::Receiver<Reply>>>,
        folder_calls: Mutex<Vec<(i64, Vec<i64>)>>,
        created: Mutex<Vec<ContentFields>>,
        updated: Mutex<Vec<(i64, bool)>>,
        deleted: Mutex<Vec<i64>>,
    }

    impl FakeApi {
        fn push_ready(&self, reply: Reply) {
            self.ready.lock().unwrap().push_back(reply);
        }

        fn gate(&self, wire_page: u32) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gated.lock().unwrap().insert(wire_page, rx);
            tx
        }

        fn list_call_count(&self) -> usize {
            self.list_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentApi for FakeApi {
        async fn list_contents(
            &self,
            page: u32,
            page_size: u32,
            filters: &ContentFilters,
        ) -> ClientResult<ResultPage> {
            self.list_calls
                .lock()
                .unwrap()
                .push((page, page_size, filters.clone()));

            let gated = self.gated.lock().unwrap().remove(&page);
            if let Some(rx) = gated {
                return rx
                    .await
                    .unwrap_or_else(|_| Err(ClientError::Network("closed".to_string())));
            }
            self.ready
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(page_of(&[], 0)))
        }

        async fn add_contents_to_folder(&self, folder_id: i64, content_ids: &[i64]) -> ClientResult<()> {
            self.folder_calls
                .lock()
                .unwrap()
                .push((folder_id, content_ids.to_vec()));
            Ok(())
        }

        async fn create_content(&self, fields: &ContentFields) -> ClientResult<()> {
            self.created.lock().unwrap().push(fields.clone());
            Ok(())
        }

        async fn update_content(
            &self,
            content_id: i64,
            _fields: &ContentFields,
            active: bool,
        ) -> ClientResult<()> {
            self.updated.lock().unwrap().push((content_id, active));
            Ok(())
        }

        async fn delete_content(&self, content_id: i64) -> ClientResult<()> {
            self.deleted.lock().unwrap().push(content_id);
            Ok(())
        }
    }

    fn page_of(ids: &[i64], total: u64) -> ResultPage {
        let items = ids
            .iter()
            .map(|&id| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "title": format!("content {}", id),
                    "metadata_info": [
                        {"id": 1, "name": "English", "type_name": "Language"},
                        {"id": 2, "name": "French", "type_name": "Language"}
                    ]
                }))
                .unwrap()
            })
            .collect();
        ResultPage {
            items,
            total_count: total,
        }
    }

    fn controller(api: Arc<FakeApi>, clock: Arc<ManualClock>) -> Arc<SearchStateController> {
        Arc::new(SearchStateController::with_clock(
            api,
            clock,
            10,
            vec!["Language".to_string()],
        ))
    }

    async fn wait_for_calls(api: &FakeApi, count: usize) {
        while api.list_call_count() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_page_offset_on_wire() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.load_page(0, 10, None).await.unwrap();
        ctrl.load_page(5, 25, None).await.unwrap();

        let calls = api.list_calls.lock().unwrap();
        assert_eq!((calls[0].0, calls[0].1), (1, 10));
        assert_eq!((calls[1].0, calls[1].1), (6, 25));
    }

    #[tokio::test]
    async fn test_solar_search_scenario() {
        let api = Arc::new(FakeApi::default());
        api.push_ready(Ok(page_of(&[1, 2, 3], 3)));
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(50)));
        ctrl.set_selection([0, 1]).await;

        ctrl.update_criteria(|c| {
            c.title = "solar".to_string();
            c.years_from = Some(2020);
            c.years_to = Some(2010);
        })
        .await
        .unwrap();

        let filters = api.list_calls.lock().unwrap()[0].2.clone();
        let pairs = filters.query_pairs();
        assert!(pairs.contains(&("title", "solar".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k.starts_with("published_year")));

        let state = ctrl.snapshot().await;
        assert_eq!(state.total_count, 3);
        assert_eq!(state.display_results.len(), 3);
        assert_eq!(state.display_results[0].column("Language"), Some("English, French"));
        assert!(state.selection.is_empty());
        assert_eq!(state.last_accepted_request_timestamp, 50);
        // 条件本身保留用户输入
        assert_eq!(state.criteria.years_from, Some(2020));
    }

    #[tokio::test]
    async fn test_out_of_order_response_is_discarded() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(100));
        let ctrl = controller(api.clone(), clock.clone());

        let first_reply = api.gate(1);
        let second_reply = api.gate(2);

        let first = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.load_page(0, 10, None).await }
        });
        wait_for_calls(&api, 1).await;

        clock.set(105);
        let second = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.load_page(1, 10, None).await }
        });
        wait_for_calls(&api, 2).await;

        // 新请求先返回
        second_reply.send(Ok(page_of(&[11, 12], 12))).unwrap();
        second.await.unwrap().unwrap();
        let state = ctrl.snapshot().await;
        assert_eq!(state.last_accepted_request_timestamp, 105);
        assert_eq!(state.page, 1);

        // 旧请求后返回，被丢弃
        first_reply.send(Ok(page_of(&[1, 2, 3], 99))).unwrap();
        first.await.unwrap().unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.page, 1);
        assert_eq!(state.total_count, 12);
        assert_eq!(state.last_accepted_request_timestamp, 105);
        let ids: Vec<i64> = state.loaded_results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[tokio::test]
    async fn test_in_order_responses_both_apply() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(100));
        let ctrl = controller(api.clone(), clock.clone());

        api.push_ready(Ok(page_of(&[1], 1)));
        ctrl.load_page(0, 10, None).await.unwrap();
        clock.advance(10);
        api.push_ready(Ok(page_of(&[2], 1)));
        ctrl.load_page(0, 10, None).await.unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.loaded_results[0].id, 2);
        assert_eq!(state.last_accepted_request_timestamp, 110);
    }

    #[tokio::test]
    async fn test_failure_leaves_state_untouched() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(100));
        let ctrl = controller(api.clone(), clock.clone());

        api.push_ready(Ok(page_of(&[1, 2], 2)));
        ctrl.load_page(0, 10, None).await.unwrap();
        ctrl.set_selection([1]).await;
        let before = ctrl.snapshot().await;

        clock.advance(10);
        api.push_ready(Err(ClientError::Api("Invalid page.".to_string())));
        let sort = Some(SortSpec::new("title", SortDirection::Desc));
        let result = ctrl.load_page(3, 10, sort).await;

        assert!(matches!(result, Err(ClientError::Api(_))));
        assert_eq!(ctrl.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_reset_search_restores_defaults() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.update_criteria(|c| {
            c.title = "water".to_string();
            c.active = ActiveFilter::Inactive;
        })
        .await
        .unwrap();
        ctrl.load_page(2, 10, None).await.unwrap();
        ctrl.reset_search().await.unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.criteria, SearchCriteria::default());
        assert_eq!(state.page, 0);

        let calls = api.list_calls.lock().unwrap();
        let last = calls.last().unwrap();
        assert_eq!(last.0, 1);
        assert_eq!(last.2, ContentFilters::from_criteria(&SearchCriteria::default()));
    }

    #[tokio::test]
    async fn test_set_sort_resets_page_and_is_kept_for_reload() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.set_page(3).await.unwrap();
        let sort = Some(SortSpec::new("file_name", SortDirection::Asc));
        ctrl.set_sort(sort.clone()).await.unwrap();
        ctrl.reload().await.unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.page, 0);
        assert_eq!(state.sort, sort);
        assert_eq!(state.criteria.sort, sort);

        let calls = api.list_calls.lock().unwrap();
        assert_eq!(calls[0].0, 4);
        assert_eq!(calls[0].2.sort, None);
        assert_eq!(calls[1].0, 1);
        assert_eq!(calls[1].2.sort.as_deref(), Some("file_name,asc"));
        assert_eq!(calls[2].0, 1);
        assert_eq!(calls[2].2.sort.as_deref(), Some("file_name,asc"));
    }

    #[tokio::test]
    async fn test_per_request_sort_does_not_change_criteria() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        let sort = Some(SortSpec::new("title", SortDirection::Desc));
        ctrl.load_page(1, 20, sort.clone()).await.unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!((state.page, state.page_size), (1, 20));
        assert_eq!(state.sort, sort);
        assert_eq!(state.criteria.sort, None);

        ctrl.reload().await.unwrap();
        let calls = api.list_calls.lock().unwrap();
        assert_eq!((calls[1].0, calls[1].1), (2, 20));
        assert_eq!(calls[1].2.sort, None);
    }

    #[tokio::test]
    async fn test_stale_reply_keeps_sort_after_failed_reload() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(100));
        let ctrl = controller(api.clone(), clock.clone());

        let older_reply = api.gate(1);
        let older = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.load_page(0, 10, None).await }
        });
        wait_for_calls(&api, 1).await;

        // 用户改了排序，但这次加载失败
        clock.set(105);
        api.push_ready(Err(ClientError::Network("reset".to_string())));
        let sort = Some(SortSpec::new("title", SortDirection::Desc));
        let result = ctrl
            .update_criteria({
                let sort = sort.clone();
                move |c: &mut SearchCriteria| c.sort = sort
            })
            .await;
        assert!(matches!(result, Err(ClientError::Network(_))));

        // 更早发出的请求随后返回并被采纳
        older_reply.send(Ok(page_of(&[1, 2], 2))).unwrap();
        older.await.unwrap().unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.loaded_results.len(), 2);
        assert_eq!(state.sort, None);
        assert_eq!(state.criteria.sort, sort);

        ctrl.reload().await.unwrap();
        let calls = api.list_calls.lock().unwrap();
        assert_eq!(calls.last().unwrap().2.sort.as_deref(), Some("title,desc"));
    }

    #[tokio::test]
    async fn test_system_clock_orders_back_to_back_dispatches() {
        let api = Arc::new(FakeApi::default());
        let ctrl = Arc::new(SearchStateController::with_clock(
            api.clone(),
            Arc::new(SystemClock::new()),
            10,
            Vec::new(),
        ));

        let first_reply = api.gate(1);
        let second_reply = api.gate(2);

        let first = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.load_page(0, 10, None).await }
        });
        wait_for_calls(&api, 1).await;
        let second = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.load_page(1, 10, None).await }
        });
        wait_for_calls(&api, 2).await;

        second_reply.send(Ok(page_of(&[11], 11))).unwrap();
        second.await.unwrap().unwrap();
        first_reply.send(Ok(page_of(&[1], 1))).unwrap();
        first.await.unwrap().unwrap();

        let state = ctrl.snapshot().await;
        assert_eq!(state.page, 1);
        assert_eq!(state.loaded_results[0].id, 11);
        assert_eq!(state.total_count, 11);
    }

    #[tokio::test]
    async fn test_set_page_size_returns_to_first_page() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.set_page(2).await.unwrap();
        ctrl.set_page_size(50).await.unwrap();
        assert!(matches!(
            ctrl.set_page_size(0).await,
            Err(ClientError::InvalidInput(_))
        ));

        let state = ctrl.snapshot().await;
        assert_eq!((state.page, state.page_size), (0, 50));
        let calls = api.list_calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!((calls[1].0, calls[1].1), (1, 50));
    }

    #[tokio::test]
    async fn test_excluded_version_filter() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.set_excluded_version(Some(7)).await.unwrap();
        ctrl.reset_search().await.unwrap();
        ctrl.set_excluded_version(Some(0)).await.unwrap();

        let calls = api.list_calls.lock().unwrap();
        assert_eq!(calls[0].2.exclude_in_version, Some(7));
        // 重置搜索条件不影响版本过滤
        assert_eq!(calls[1].2.exclude_in_version, Some(7));
        assert_eq!(calls[2].2.exclude_in_version, None);
        assert_eq!(ctrl.snapshot().await.excluded_version, None);
    }

    #[tokio::test]
    async fn test_add_and_edit_content_reload() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(1));
        let ctrl = controller(api.clone(), clock.clone());

        api.push_ready(Ok(page_of(&[5], 1)));
        ctrl.load_page(0, 10, None).await.unwrap();
        let mut record = ctrl.snapshot().await.loaded_results[0].clone();

        let fields = ContentFields {
            title: "Solar Dryers".to_string(),
            content_file: Some(ContentFile {
                file_name: "dryers.pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            }),
            ..Default::default()
        };
        ctrl.add_content(&fields).await.unwrap();

        record.active = false;
        ctrl.edit_content(&record, &ContentFields::from_record(&record))
            .await
            .unwrap();

        assert_eq!(api.created.lock().unwrap()[0].title, "Solar Dryers");
        assert_eq!(*api.updated.lock().unwrap(), vec![(5, false)]);
        assert_eq!(api.list_call_count(), 3);
    }

    #[tokio::test]
    async fn test_out_of_range_selection_is_ignored() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        api.push_ready(Ok(page_of(&[10, 20], 2)));
        ctrl.load_page(0, 10, None).await.unwrap();
        ctrl.set_selection([5, 9]).await;

        assert_eq!(ctrl.snapshot().await.selection.len(), 2);
        assert!(ctrl.selected_records().await.is_empty());
        assert_eq!(ctrl.add_selected_to_folder(4).await.unwrap(), 0);
        assert!(api.folder_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_selected_to_folder() {
        let api = Arc::new(FakeApi::default());
        let clock = Arc::new(ManualClock::new(1));
        let ctrl = controller(api.clone(), clock.clone());

        api.push_ready(Ok(page_of(&[10, 20, 30], 3)));
        ctrl.load_page(0, 10, None).await.unwrap();

        // 没有选中时不发请求
        assert_eq!(ctrl.add_selected_to_folder(4).await.unwrap(), 0);
        assert!(api.folder_calls.lock().unwrap().is_empty());

        ctrl.set_selection([0, 2, 7]).await;
        clock.advance(1);
        assert_eq!(ctrl.add_selected_to_folder(4).await.unwrap(), 2);

        assert_eq!(api.folder_calls.lock().unwrap()[0], (4, vec![10, 30]));
        // 添加后刷新，选中清空
        assert_eq!(api.list_call_count(), 2);
        assert!(ctrl.snapshot().await.selection.is_empty());
    }

    #[tokio::test]
    async fn test_delete_content_reloads() {
        let api = Arc::new(FakeApi::default());
        let ctrl = controller(api.clone(), Arc::new(ManualClock::new(1)));

        ctrl.delete_content(42).await.unwrap();

        assert_eq!(*api.deleted.lock().unwrap(), vec![42]);
        assert_eq!(api.list_call_count(), 1);
    }
}
