//! Alert layer: forwards ERROR events (store failures, misconfiguration)
//! to an operator-facing sink without blocking the request path.

use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{Layer, layer::Context};

const ALERT_BUFFER: usize = 100;

/// A single ERROR event captured for delivery.
#[derive(Debug, Clone)]
pub struct Alert {
    pub service: String,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
    pub at: chrono::DateTime<chrono::Utc>,
}

impl Alert {
    fn summary(&self) -> String {
        let mut text = format!(
            "[{}] {} ({}) at {}",
            self.service, self.message, self.target, self.at
        );
        for (key, value) in &self.fields {
            text.push_str(&format!("\n  {key} = {value}"));
        }
        text
    }
}

#[derive(Debug, thiserror::Error)]
#[error("alert delivery failed: {0}")]
pub struct AlertError(String);

/// Destination for alerts.
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, alert: Alert) -> Result<(), AlertError>;
}

/// Writes alerts to stderr (development).
struct ConsoleSink;

#[async_trait::async_trait]
impl AlertSink for ConsoleSink {
    async fn deliver(&self, alert: Alert) -> Result<(), AlertError> {
        eprintln!("ALERT {}", alert.summary());
        Ok(())
    }
}

/// Posts alerts as `{"text": ...}` to a chat webhook.
struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

#[async_trait::async_trait]
impl AlertSink for WebhookSink {
    async fn deliver(&self, alert: Alert) -> Result<(), AlertError> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "text": alert.summary() }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AlertError(e.to_string()))?;
        Ok(())
    }
}

/// Tracing layer that queues ERROR events for a background delivery task.
pub struct AlertLayer {
    service: String,
    queue: mpsc::Sender<Alert>,
}

impl AlertLayer {
    pub fn new(service: String, sink: Arc<dyn AlertSink>) -> Self {
        let (queue, mut rx) = mpsc::channel::<Alert>(ALERT_BUFFER);

        tokio::spawn(async move {
            while let Some(alert) = rx.recv().await {
                // Logging here would re-enter this layer.
                if let Err(e) = sink.deliver(alert).await {
                    eprintln!("{e}");
                }
            }
        });

        Self { service, queue }
    }

    pub fn console(service: String) -> Self {
        Self::new(service, Arc::new(ConsoleSink))
    }

    pub fn webhook(service: String, url: String) -> Self {
        Self::new(
            service,
            Arc::new(WebhookSink {
                url,
                client: reqwest::Client::new(),
            }),
        )
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.push(field, format!("{value:?}"));
    }
}

impl EventFields {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for AlertLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }

        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        // Drop the alert rather than block when the queue is full.
        let _ = self.queue.try_send(Alert {
            service: self.service.clone(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
            at: chrono::Utc::now(),
        });
    }
}
