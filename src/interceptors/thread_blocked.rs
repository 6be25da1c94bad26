//! Blocked-thread metric extraction
//!
//! Vert.x reports event-loop and worker threads that run for too long through
//! its blocked thread checker, as free text:
//!
//! ```text
//! Thread Thread[vert.x-eventloop-thread-1,5,main]=task has been blocked for 2304 ms, time limit is 2000 ms
//! ```
//!
//! [`ThreadBlockedInterceptor`] watches that logger, pulls the thread name out
//! of the message and counts the occurrence per thread. It never blocks the
//! log call itself.

use crate::core::{LogInterceptor, LogPropagation, LogRecord};
use crate::counters::{CounterRegistry, Tags};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Logger the blocked thread diagnostics are emitted on
pub const BLOCKED_THREAD_CHECKER: &str = "io.vertx.core.impl.BlockedThreadChecker";

pub const DEFAULT_METRIC_NAME: &str = "vertx_thread_blocked";
pub const THREAD_TAG: &str = "thread";

const TEMPLATE: &str = "Thread E has been blocked for M ms, time limit is L ms";
/// Minimum message length in characters
const MIN_LENGTH: usize = TEMPLATE.len();
const MESSAGE_PREFIX: &str = "Thread";
const BLOCKED_PHRASE: &str = "has been blocked for";
const THREAD_PREFIX: &str = "Thread[";
const THREAD_SUFFIX: &str = "]=";
const ENTRY_DELIMITER: char = '=';

/// Extract the blocked thread's name from a checker message
///
/// Returns `None` for anything that does not look like a blocked thread
/// report. The thread entry (second word) is rendered as `<thread>=<task>`;
/// for the default `Thread[...]` rendering the name is what sits inside the
/// brackets, otherwise it is the text before the first `=`, or the whole
/// entry when there is none.
///
/// # Example
///
/// ```
/// use log_interceptor::interceptors::parse_blocked_thread;
///
/// let message = "Thread Thread[my-pool-01]=task-x has been blocked for 123.05 ms, time limit is 2000 ms";
/// assert_eq!(parse_blocked_thread(message), Some("my-pool-01"));
/// assert_eq!(parse_blocked_thread("invalid"), None);
/// ```
pub fn parse_blocked_thread(message: &str) -> Option<&str> {
    if message.chars().count() < MIN_LENGTH {
        return None;
    }

    let mut parts = message.splitn(3, ' ');
    let prefix = parts.next()?;
    let entry = parts.next()?;
    let rest = parts.next()?;

    if prefix != MESSAGE_PREFIX || !rest.starts_with(BLOCKED_PHRASE) {
        return None;
    }

    Some(thread_name_from_entry(entry))
}

fn thread_name_from_entry(entry: &str) -> &str {
    if let Some(info) = entry.strip_prefix(THREAD_PREFIX) {
        return match info.find(THREAD_SUFFIX) {
            Some(end) => &info[..end],
            None => entry,
        };
    }

    // custom thread rendering; names containing '=' get truncated
    match entry.find(ENTRY_DELIMITER) {
        Some(end) => &entry[..end],
        None => entry,
    }
}

/// Counts blocked thread reports per thread
///
/// Register it for the level the checker logs at (Vert.x uses `Warn`), or
/// for every level:
///
/// ```
/// use log_interceptor::counters::SimpleCounterRegistry;
/// use log_interceptor::interceptors::ThreadBlockedInterceptor;
/// use log_interceptor::{InterceptorRegistry, LogLevel};
/// use std::sync::Arc;
///
/// let counters = Arc::new(SimpleCounterRegistry::new());
/// let registry = InterceptorRegistry::new();
/// registry.register_for(
///     LogLevel::Warn,
///     Arc::new(ThreadBlockedInterceptor::new(counters.clone())),
/// );
/// ```
pub struct ThreadBlockedInterceptor {
    registry: Arc<dyn CounterRegistry>,
    metric_name: String,
}

impl ThreadBlockedInterceptor {
    pub fn new(registry: Arc<dyn CounterRegistry>) -> Self {
        Self {
            registry,
            metric_name: DEFAULT_METRIC_NAME.to_string(),
        }
    }

    /// Count under `metric_name` instead of `vertx_thread_blocked`
    #[must_use]
    pub fn with_metric_name(mut self, metric_name: impl Into<String>) -> Self {
        self.metric_name = metric_name.into();
        self
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    fn record_blocked_thread(&self, thread: &str) {
        let mut tags = Tags::new();
        tags.insert(THREAD_TAG.to_string(), thread.to_string());
        self.registry.increment(&self.metric_name, &tags);
    }
}

impl LogInterceptor for ThreadBlockedInterceptor {
    fn intercept(&self, logger: &str, record: &LogRecord<'_>) -> LogPropagation {
        if logger == BLOCKED_THREAD_CHECKER {
            let message = match record.message.as_str() {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Owned(record.message.to_string()),
            };
            if let Some(thread) = parse_blocked_thread(&message) {
                self.record_blocked_thread(thread);
            }
        }
        LogPropagation::Continue
    }
}

impl fmt::Debug for ThreadBlockedInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadBlockedInterceptor")
            .field("metric_name", &self.metric_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LogValue};
    use crate::counters::{tags, SimpleCounterRegistry};
    use parking_lot::Mutex;
    use std::io;

    const DEFAULT_NAMING: &str =
        "Thread Thread[my-pool-01]=task-x has been blocked for 123.05 ms, time limit is 2000 ms";

    /// Counter registry that only remembers what it was asked to do
    #[derive(Default)]
    struct SpyRegistry {
        calls: Mutex<Vec<(String, Tags)>>,
    }

    impl CounterRegistry for SpyRegistry {
        fn increment(&self, name: &str, tags: &Tags) {
            self.calls.lock().push((name.to_string(), tags.clone()));
        }
    }

    fn intercept(interceptor: &ThreadBlockedInterceptor, logger: &str, message: &str) -> LogPropagation {
        let message = LogValue::from(message);
        interceptor.intercept(logger, &LogRecord::new(LogLevel::Warn, &message))
    }

    #[test]
    fn test_parse_default_naming() {
        assert_eq!(parse_blocked_thread(DEFAULT_NAMING), Some("my-pool-01"));
    }

    #[test]
    fn test_parse_default_naming_with_thread_details() {
        let message = "Thread Thread[vert.x-eventloop-thread-1,5,main]=Thread[vert.x-eventloop-thread-1,5,main] has been blocked for 2304 ms, time limit is 2000 ms";
        assert_eq!(
            parse_blocked_thread(message),
            Some("vert.x-eventloop-thread-1,5,main")
        );
    }

    #[test]
    fn test_parse_bracket_without_delimiter_uses_entry() {
        let message = "Thread Thread[unterminated has been blocked for 50 ms, time limit is 100 ms";
        assert_eq!(parse_blocked_thread(message), Some("Thread[unterminated"));
    }

    #[test]
    fn test_parse_custom_naming() {
        let message = "Thread CustomName=Something has been blocked for 50 ms, time limit is 100 ms";
        assert_eq!(parse_blocked_thread(message), Some("CustomName"));
    }

    #[test]
    fn test_parse_plain_entry() {
        let message = "Thread weird has been blocked for 50 ms, time limit is 100 ms";
        assert_eq!(parse_blocked_thread(message), Some("weird"));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse_blocked_thread("invalid"), None);
        assert_eq!(
            parse_blocked_thread(
                "Bad Prefix Thread[my-pool-01]=task-x has been blocked for 123.05 ms, time limit is 2000 ms"
            ),
            None
        );
        assert_eq!(
            parse_blocked_thread(
                "Thread Thread[my-awesome-pool-01]=my-custom-task-name has been.. oops"
            ),
            None
        );
        // long enough, but only two words
        assert_eq!(
            parse_blocked_thread("Thread Thread[a-really-long-thread-name-without-any-spaces]=x"),
            None
        );
    }

    #[test]
    fn test_parse_minimum_length_boundary() {
        let exact = "Thread x has been blocked for 1 ms, time limit is 2 ms";
        assert_eq!(exact.len(), MIN_LENGTH);
        assert_eq!(parse_blocked_thread(exact), Some("x"));
        assert_eq!(parse_blocked_thread(&exact[..MIN_LENGTH - 1]), None);
    }

    #[test]
    fn test_parse_minimum_length_counts_characters() {
        let accented = "Thread é has been blocked for 1 ms, time limit is 2 ms";
        assert_eq!(accented.chars().count(), MIN_LENGTH);
        assert_eq!(parse_blocked_thread(accented), Some("é"));

        let short = "Thread é has been blocked for 1 ms, time limit is 2ms";
        assert_eq!(short.chars().count(), MIN_LENGTH - 1);
        assert!(short.len() >= MIN_LENGTH);
        assert_eq!(parse_blocked_thread(short), None);
    }

    #[test]
    fn test_counts_default_naming() {
        let counters = Arc::new(SimpleCounterRegistry::new());
        let interceptor = ThreadBlockedInterceptor::new(counters.clone());

        assert_eq!(
            intercept(&interceptor, BLOCKED_THREAD_CHECKER, DEFAULT_NAMING),
            LogPropagation::Continue
        );
        assert_eq!(
            counters.count(DEFAULT_METRIC_NAME, &tags([(THREAD_TAG, "my-pool-01")])),
            1
        );

        intercept(&interceptor, BLOCKED_THREAD_CHECKER, DEFAULT_NAMING);
        assert_eq!(
            counters.count(DEFAULT_METRIC_NAME, &tags([(THREAD_TAG, "my-pool-01")])),
            2
        );
    }

    #[test]
    fn test_custom_metric_name() {
        let counters = Arc::new(SimpleCounterRegistry::new());
        let interceptor =
            ThreadBlockedInterceptor::new(counters.clone()).with_metric_name("my_custom_metric_name");

        intercept(
            &interceptor,
            BLOCKED_THREAD_CHECKER,
            "Thread CustomName=Something has been blocked for 50 ms, time limit is 100 ms",
        );

        assert_eq!(interceptor.metric_name(), "my_custom_metric_name");
        assert_eq!(
            counters.count("my_custom_metric_name", &tags([(THREAD_TAG, "CustomName")])),
            1
        );
        assert_eq!(counters.total(DEFAULT_METRIC_NAME), 0);
    }

    #[test]
    fn test_other_logger_is_ignored() {
        let spy = Arc::new(SpyRegistry::default());
        let interceptor = ThreadBlockedInterceptor::new(spy.clone());

        assert_eq!(
            intercept(&interceptor, "other.logger", DEFAULT_NAMING),
            LogPropagation::Continue
        );
        assert!(spy.calls.lock().is_empty());
    }

    #[test]
    fn test_short_message_is_ignored() {
        let spy = Arc::new(SpyRegistry::default());
        let interceptor = ThreadBlockedInterceptor::new(spy.clone());

        assert_eq!(
            intercept(&interceptor, BLOCKED_THREAD_CHECKER, "invalid"),
            LogPropagation::Continue
        );
        assert!(spy.calls.lock().is_empty());
    }

    #[test]
    fn test_counts_regardless_of_call_shape() {
        let spy = Arc::new(SpyRegistry::default());
        let interceptor = ThreadBlockedInterceptor::new(spy.clone());
        let message = LogValue::from(DEFAULT_NAMING);
        let stack = io::Error::other("Thread blocked");

        let record = LogRecord::new(LogLevel::Warn, &message).with_error(&stack);
        assert!(interceptor.intercept(BLOCKED_THREAD_CHECKER, &record).is_continue());

        let calls = spy.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, DEFAULT_METRIC_NAME);
        assert_eq!(calls[0].1, tags([(THREAD_TAG, "my-pool-01")]));
    }

    #[test]
    fn test_non_string_message_is_ignored() {
        let spy = Arc::new(SpyRegistry::default());
        let interceptor = ThreadBlockedInterceptor::new(spy.clone());
        let message = LogValue::Null;

        let record = LogRecord::new(LogLevel::Warn, &message);
        assert!(interceptor.intercept(BLOCKED_THREAD_CHECKER, &record).is_continue());
        assert!(spy.calls.lock().is_empty());
    }
}
