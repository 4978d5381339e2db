use futures_cohort::{run, CohortTask};

use std::time::Duration;
use tracing::info;

async fn flaky_task(id: usize) -> Result<usize, String> {
  info!("task {} starting", id);
  tokio::time::sleep(Duration::from_millis(50 * (id as u64 + 1))).await;
  if id % 2 == 1 {
    info!("task {} failing", id);
    Err(format!("task {} refused", id))
  } else {
    info!("task {} finished", id);
    Ok(id)
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_target(false)
    .init();

  info!("--- Fail Fast Example (limit: 2) ---");
  info!("After the first failure no new tasks are admitted; in-flight tasks still finish.");

  let tasks: Vec<CohortTask<usize, String>> = (0..6)
    .map(|id| Box::pin(flaky_task(id)) as CohortTask<usize, String>)
    .collect();

  match run(tasks, 2).expect("limit is valid").await {
    Ok(results) => info!("unexpected full success: {:?}", results),
    Err(aggregate) => {
      info!("combined failure message: {}", aggregate);
      for (index, message) in aggregate.iter() {
        info!("task {} failed with: {}", index, message);
      }
    }
  }

  info!("--- Fail Fast Example End ---");
}
