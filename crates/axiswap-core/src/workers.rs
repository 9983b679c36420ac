//! Fork-join helpers shared by the decode, transform and encode stages.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

/// Build the worker pool. `None` lets rayon size it from the host.
pub fn build_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(Error::WorkerPool(
            "worker thread count must be >= 1 when set".to_string(),
        ));
    }

    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|i| format!("axiswap-worker-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder
        .build()
        .map_err(|e| Error::WorkerPool(format!("failed to build rayon thread pool: {e}")))?;

    debug!(threads = pool.current_num_threads(), "worker pool ready");
    Ok(pool)
}

/// Run `job(i)` for every `i` in `0..count` on `pool` and join the results in
/// index order. The first failing index, in that order, is the one reported.
pub fn fork_join<T, F>(pool: &rayon::ThreadPool, count: usize, job: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    let results = pool.install(|| (0..count).into_par_iter().map(&job).collect::<Vec<_>>());

    let mut out = Vec::with_capacity(results.len());
    for item in results {
        out.push(item?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn zero_threads_is_rejected() {
        let err = build_pool(Some(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WorkerPool);
    }

    #[test]
    fn results_come_back_in_index_order() {
        let pool = build_pool(Some(4)).unwrap();
        let out = fork_join(&pool, 100, |i| Ok(i * 2)).unwrap();
        assert_eq!(out, (0..100).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn earliest_failure_wins() {
        let pool = build_pool(Some(2)).unwrap();
        let err = fork_join(&pool, 10, |i| {
            if i >= 3 {
                Err(Error::range(format!("job {i}")))
            } else {
                Ok(i)
            }
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "range error: job 3");
    }
}
