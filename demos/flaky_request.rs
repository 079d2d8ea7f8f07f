//! # Demo: flaky_request
//!
//! Retries a simulated request that fails twice before returning `200`,
//! with exponential backoff, printing every session event through [`LogWriter`].
//!
//! ## Flow
//! ```text
//! attempt 1 ─► 503 ─► rejected ─► wait 100ms
//! attempt 2 ─► 503 ─► rejected ─► wait 200ms
//! attempt 3 ─► 200 ─► accepted (session ends, no exhaustion callback)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example flaky_request --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use retrykit::{
    BackoffPolicy, Config, JitterPolicy, LogWriter, Retrier, Strategy, Subscribe, Task,
    TokioContext,
};
use tokio::sync::oneshot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Exponential backoff: 100ms, 200ms, 400ms, ... capped at 2s
    let cfg = Config::default().with_strategy(Strategy::backoff(BackoffPolicy {
        first: Duration::from_millis(100),
        max: Duration::from_secs(2),
        factor: 2.0,
        jitter: JitterPolicy::None,
    }));

    // 2. Print every event
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let retrier = Retrier::builder(cfg)
        .with_subscribers(subs)
        .build(TokioContext::current());

    // 3. A request that succeeds on the third call; success is reported by the work itself
    let calls = Arc::new(AtomicU32::new(0));
    let (ok_tx, ok_rx) = oneshot::channel::<u32>();
    let ok_tx = Arc::new(std::sync::Mutex::new(Some(ok_tx)));

    let task = Task::from_async(
        5,
        move || {
            let calls = calls.clone();
            let ok_tx = ok_tx.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::Relaxed) + 1;
                let status: u16 = if n < 3 { 503 } else { 200 };
                println!("[request] call #{n} -> {status}");
                if status == 200 {
                    if let Some(tx) = ok_tx.lock().ok().and_then(|mut g| g.take()) {
                        let _ = tx.send(n);
                    }
                }
                status
            }
        },
        |status| *status == 200,
    )?
    .with_name("flaky-request");

    // 4. Start; exhaustion would be reported here
    retrier.begin(
        task,
        Some(Box::new(|| println!("[main] gave up after all attempts"))),
    );

    let n = ok_rx.await?;
    println!("[main] succeeded after {n} calls");

    // Let the log subscriber drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
