//! # 来电通知
//!
//! 将来电记录以 JSON POST 到外部 webhook。投递在独立任务中进行：
//! 入队从不阻塞，队列已满时丢弃并告警；失败只记录日志，不重试。

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

use super::record::CallRecord;

/// 通知投递错误
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// 来电通知接口，调用方不等待投递结果
#[cfg_attr(test, mockall::automock)]
pub trait CallNotifier: Send + Sync {
    fn notify(&self, record: &CallRecord);
}

/// 未配置 webhook 时使用的空通知器
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CallNotifier for NoopNotifier {
    fn notify(&self, record: &CallRecord) {
        debug!(cp_number = %record.cp_number, "webhook disabled, notification skipped");
    }
}

/// Webhook 通知器
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    queue: mpsc::Sender<CallRecord>,
}

impl WebhookNotifier {
    /// 启动投递任务并返回通知器
    ///
    /// 需要在 tokio 运行时内调用。最多 `workers` 个投递同时进行。
    #[must_use]
    pub fn spawn(client: reqwest::Client, url: String, capacity: usize, workers: usize) -> Self {
        let (queue, mut receiver) = mpsc::channel::<CallRecord>(capacity.max(1));
        let url: Arc<str> = url.into();
        let permits = Arc::new(Semaphore::new(workers.max(1)));

        tokio::spawn(async move {
            while let Some(record) = receiver.recv().await {
                let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                    break;
                };
                let client = client.clone();
                let url = Arc::clone(&url);
                tokio::spawn(async move {
                    if let Err(e) = deliver(&client, &url, &record).await {
                        warn!(cp_number = %record.cp_number, error = %e, "call notification failed");
                    }
                    drop(permit);
                });
            }
            debug!("call notification queue closed");
        });

        Self { queue }
    }
}

impl CallNotifier for WebhookNotifier {
    fn notify(&self, record: &CallRecord) {
        if let Err(e) = self.queue.try_send(record.clone()) {
            warn!(cp_number = %record.cp_number, error = %e, "call notification dropped");
        }
    }
}

/// 投递单条通知
async fn deliver(
    client: &reqwest::Client,
    url: &str,
    record: &CallRecord,
) -> Result<(), NotifyError> {
    let response = client.post(url).json(record).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }

    debug!(%status, "call notification delivered");
    Ok(())
}
