//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [session-started] session=3 task="fetch" max_attempts=4
//! [scheduled] session=3 task="fetch" attempt=1 delay_ms=0
//! [starting] session=3 task="fetch" attempt=1
//! [rejected] session=3 task="fetch" attempt=1
//! [scheduled] session=3 task="fetch" attempt=2 delay_ms=200
//! [accepted] session=3 task="fetch" attempt=2
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let session = e.session.unwrap_or_default();
        let task = e.task.as_deref().unwrap_or("-");
        let attempt = e.attempt.unwrap_or_default();
        match e.kind {
            EventKind::SessionStarted => {
                println!("[session-started] session={session} task={task:?} max_attempts={attempt}");
            }
            EventKind::AttemptScheduled => {
                println!(
                    "[scheduled] session={session} task={task:?} attempt={attempt} delay_ms={}",
                    e.delay_ms.unwrap_or_default()
                );
            }
            EventKind::AttemptStarting => {
                println!("[starting] session={session} task={task:?} attempt={attempt}");
            }
            EventKind::OutputAccepted => {
                println!("[accepted] session={session} task={task:?} attempt={attempt}");
            }
            EventKind::OutputRejected => {
                println!("[rejected] session={session} task={task:?} attempt={attempt}");
            }
            EventKind::AttemptAbandoned => {
                println!("[abandoned] session={session} task={task:?} attempt={attempt}");
            }
            EventKind::Exhausted => {
                println!("[exhausted] session={session} task={task:?} attempts={attempt}");
            }
            EventKind::SessionCancelled => {
                println!("[cancelled] session={session} task={task:?} attempts={attempt}");
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={task} reason={}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={task} info={}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
