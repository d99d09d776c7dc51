use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 异步防抖器
///
/// 每次调用先等待一个静默窗口；窗口内如果有新的调用进来，
/// 旧的调用直接放弃，只有最后一次调用真正执行。
#[derive(Debug)]
pub struct Debouncer {
    /// 静默窗口
    delay: Duration,
    /// 每次调用递增，用来判断是否被后来的调用取代
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 防抖执行
    ///
    /// 返回 `Some(结果)` 表示本次调用执行了，`None` 表示被后来的调用取代。
    pub async fn call<F, Fut, T>(&self, action: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::trace!("debounced call {} superseded", ticket);
            return None;
        }
        Some(action().await)
    }

    /// 取消所有等待中的调用
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
