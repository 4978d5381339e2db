use futures_cohort::{run, CohortTask};

use std::time::Duration;
use tracing::info;

async fn fetch_like_task(id: usize) -> Result<String, String> {
  info!("task {} starting", id);
  tokio::time::sleep(Duration::from_millis(200 * ((id % 3) as u64 + 1))).await;
  let payload = format!("payload_{}", id);
  info!("task {} finished", id);
  Ok(payload)
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_target(false)
    .init();

  info!("--- Basic Usage Example (limit: 2) ---");

  let num_tasks = 5;
  info!(
    "Running {} tasks with at most 2 in flight; results come back in submission order.",
    num_tasks
  );

  let tasks: Vec<CohortTask<String, String>> = (0..num_tasks)
    .map(|id| Box::pin(fetch_like_task(id)) as CohortTask<String, String>)
    .collect();

  match run(tasks, 2).expect("limit is valid").await {
    Ok(results) => {
      for (id, payload) in results.iter().enumerate() {
        info!("task {} -> {}", id, payload);
      }
    }
    Err(aggregate) => {
      tracing::error!("run failed: {}", aggregate);
    }
  }

  info!("--- Basic Usage Example End ---");
}
