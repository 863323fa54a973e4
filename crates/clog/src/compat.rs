//! Bridge from `tracing` to a clog sink

use crate::{Level, Log, Record};
use std::fmt::Write;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

/// A tracing layer that writes events to a clog sink.
///
/// TRACE and DEBUG events map to DEBUG. The event's source file and line
/// become the call site. Events emitted by clog itself are skipped so a
/// failing file cannot feed back into its own logger.
#[derive(Debug)]
pub struct FileLoggerLayer<L> {
    sink: L,
}

impl<L: Log> FileLoggerLayer<L> {
    /// Wrap a sink
    pub const fn new(sink: L) -> Self {
        Self { sink }
    }
}

fn is_internal(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME")
        || target
            .strip_prefix(env!("CARGO_CRATE_NAME"))
            .is_some_and(|rest| rest.starts_with("::"))
}

impl<S, L> Layer<S> for FileLoggerLayer<L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Log + 'static,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());

        if is_internal(metadata.target()) || !self.sink.enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut spans = String::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if !spans.is_empty() {
                    spans.push_str("::");
                }
                spans.push_str(span.name());
            }
        }

        let file = metadata.file().unwrap_or_else(|| metadata.target());
        let line = metadata.line().unwrap_or(0);
        let message = visitor.finish();

        if spans.is_empty() {
            self.sink.log(
                &Record::new(level, format_args!("{message}")).with_location(file, line),
            );
        } else {
            self.sink.log(
                &Record::new(level, format_args!("{spans}: {message}")).with_location(file, line),
            );
        }
    }
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, field: &Field, value: &dyn std::fmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }

    fn finish(mut self) -> String {
        if !self.fields.is_empty() {
            if !self.message.is_empty() {
                self.message.push(' ');
            }
            self.message.push_str(&self.fields);
        }
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field, &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field, &format_args!("{value:?}"));
        }
    }
}

/// Install a global subscriber forwarding every tracing event to `sink`.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_tracing_bridge<L: Log + 'static>(sink: L) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(FileLoggerLayer::new(sink))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(Level, String)>>);

    impl Log for Collect {
        fn enabled(&self, level: Level) -> bool {
            level >= Level::Info
        }

        fn log(&self, record: &Record<'_>) {
            self.0.lock().push((record.level, record.args.to_string()));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_layer_forwards_events() {
        let sink = Arc::new(Collect::default());
        let subscriber =
            tracing_subscriber::registry().with(FileLoggerLayer::new(Arc::clone(&sink)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "app", "filtered");
            tracing::info!(target: "app", count = 3, "loaded");
            tracing::error!(target: "app", "failed");
            tracing::warn!(target: "clog::logger", "own diagnostics");
        });

        assert_eq!(
            sink.0.lock().as_slice(),
            [
                (Level::Info, "loaded count=3".to_string()),
                (Level::Error, "failed".to_string()),
            ]
        );
    }

    #[test]
    fn test_span_names_prefix_message() {
        let sink = Arc::new(Collect::default());
        let subscriber =
            tracing_subscriber::registry().with(FileLoggerLayer::new(Arc::clone(&sink)));

        tracing::subscriber::with_default(subscriber, || {
            let _outer = tracing::info_span!("server").entered();
            let _inner = tracing::info_span!("request").entered();
            tracing::info!(target: "app", "handled");
        });

        assert_eq!(sink.0.lock()[0].1, "server::request: handled");
    }

    #[test]
    fn test_internal_targets() {
        assert!(is_internal("clog"));
        assert!(is_internal("clog::rotation"));
        assert!(!is_internal("clogger"));
        assert!(!is_internal("app::clog"));
    }
}
