use once_cell::sync::OnceCell;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::sync::Arc;

static THREAD_POOL: OnceCell<Arc<rayon::ThreadPool>> = OnceCell::new();

/// Build a pool of `num_threads` named workers
fn build_pool(num_threads: usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("antwalk-worker-{i}"))
        .build()
}

/// Initialize the global thread pool with the specified number of threads
///
/// # Errors
///
/// Returns an error if the pool cannot be built or was already initialized
pub fn init_thread_pool(num_threads: usize) -> anyhow::Result<()> {
    let pool = build_pool(num_threads)?;

    THREAD_POOL
        .set(Arc::new(pool))
        .map_err(|_| anyhow::anyhow!("Thread pool already initialized"))?;

    Ok(())
}

/// Get the global thread pool, initializing it with default settings if needed
///
/// # Errors
///
/// Returns an error if the pool cannot be built
pub fn get_thread_pool() -> anyhow::Result<Arc<rayon::ThreadPool>> {
    THREAD_POOL
        .get_or_try_init(|| {
            let threads = std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
                .min(8);
            build_pool(threads).map(Arc::new)
        })
        .cloned()
        .map_err(Into::into)
}

/// Configure the thread pool from config
///
/// # Errors
///
/// Returns an error if the thread pool has already been initialized
pub fn configure_from_config(config: &crate::config::Config) -> anyhow::Result<()> {
    if config.performance.parallel_threads > 0 {
        init_thread_pool(config.performance.parallel_threads)?;
    }
    Ok(())
}

/// Apply `f` to every item on the pool, keeping input order in the output
///
/// # Errors
///
/// Returns an error if the pool cannot be built
pub fn map_ordered<T, R, F>(items: &[T], f: F) -> anyhow::Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let pool = get_thread_pool()?;
    Ok(pool.install(|| items.par_iter().map(f).collect()))
}
