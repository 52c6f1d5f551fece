use super::config::Executor;
use rayon::prelude::*;

impl Executor {
    /// Worker threads available to work submitted through this executor.
    pub fn current_num_threads(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            Executor::Global => rayon::current_num_threads(),
            Executor::Pool(pool) => pool.current_num_threads(),
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Executor::Sequential)
    }

    /// Runs `op` inside the executor's pool, or directly on the calling thread.
    pub(crate) fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Executor::Pool(pool) => pool.install(op),
            Executor::Sequential | Executor::Global => op(),
        }
    }
}

/// Runs `task(k)` for every `k < count`, one spawned task each, and returns the results
/// in index order once all of them have joined.
pub(crate) fn fan_out<R, F>(executor: &Executor, count: usize, task: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync,
{
    if executor.is_sequential() || count <= 1 {
        return (0..count).map(task).collect();
    }

    let mut slots: Vec<Option<R>> = (0..count).map(|_| None).collect();
    executor.install(|| {
        rayon::scope(|scope| {
            let task = &task;
            for (k, slot) in slots.iter_mut().enumerate() {
                scope.spawn(move |_| *slot = Some(task(k)));
            }
        })
    });
    // `scope` only returns once every spawned task has filled its slot.
    slots.into_iter().flatten().collect()
}

/// Maps every item with a per-worker workspace and folds the results with `reduce`.
///
/// The first error stops further work. Summation order depends on how the executor
/// splits the items, so floating point results may differ in the last bits between
/// executors.
pub(crate) fn try_map_reduce<T, W, R, E, INIT, MAP, ID, RED>(
    executor: &Executor,
    items: &[T],
    init: INIT,
    map: MAP,
    identity: ID,
    reduce: RED,
) -> Result<R, E>
where
    T: Sync,
    R: Send,
    E: Send,
    INIT: Fn() -> W + Sync + Send,
    MAP: Fn(&mut W, &T) -> Result<R, E> + Sync + Send,
    ID: Fn() -> R + Sync + Send,
    RED: Fn(R, R) -> R + Sync + Send,
{
    if executor.is_sequential() {
        let mut workspace = init();
        return items.iter().try_fold(identity(), |acc, item| {
            Ok(reduce(acc, map(&mut workspace, item)?))
        });
    }

    executor.install(|| {
        items
            .par_iter()
            .map_init(&init, |workspace, item| map(workspace, item))
            .try_reduce(&identity, |a, b| Ok(reduce(a, b)))
    })
}

/// Maps every item with a per-worker workspace, keeping the input order.
pub(crate) fn try_map_collect<T, W, R, E, INIT, MAP>(
    executor: &Executor,
    items: &[T],
    init: INIT,
    map: MAP,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    INIT: Fn() -> W + Sync + Send,
    MAP: Fn(&mut W, &T) -> Result<R, E> + Sync + Send,
{
    if executor.is_sequential() {
        let mut workspace = init();
        return items.iter().map(|item| map(&mut workspace, item)).collect();
    }

    executor.install(|| {
        items
            .par_iter()
            .map_init(&init, |workspace, item| map(workspace, item))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn executors() -> Vec<Executor> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        vec![
            Executor::Sequential,
            Executor::Global,
            Executor::Pool(Arc::new(pool)),
        ]
    }

    #[test]
    fn fan_out_returns_results_in_index_order() {
        for executor in executors() {
            let results = fan_out(&executor, 5, |k| k * 10);
            assert_eq!(results, vec![0, 10, 20, 30, 40]);
        }
    }

    #[test]
    fn fan_out_with_zero_tasks_is_empty() {
        let results: Vec<usize> = fan_out(&Executor::Global, 0, |k| k);
        assert!(results.is_empty());
    }

    #[test]
    fn try_map_reduce_sums_all_items() {
        let items: Vec<u64> = (1..=100).collect();
        for executor in executors() {
            let total: Result<u64, ()> =
                try_map_reduce(&executor, &items, || (), |_, &x| Ok(x), || 0, |a, b| a + b);
            assert_eq!(total, Ok(5050));
        }
    }

    #[test]
    fn try_map_reduce_propagates_errors() {
        let items: Vec<u64> = (0..50).collect();
        for executor in executors() {
            let result = try_map_reduce(
                &executor,
                &items,
                || (),
                |_, &x| if x == 17 { Err(x) } else { Ok(x) },
                || 0,
                |a, b| a + b,
            );
            assert_eq!(result, Err(17));
        }
    }

    #[test]
    fn try_map_collect_preserves_order_and_reuses_workspace() {
        let items: Vec<usize> = (0..64).collect();
        for executor in executors() {
            let result: Result<Vec<usize>, ()> = try_map_collect(
                &executor,
                &items,
                Vec::<usize>::new,
                |scratch, &x| {
                    scratch.clear();
                    scratch.push(x);
                    Ok(scratch[0] * 2)
                },
            );
            assert_eq!(result.unwrap(), items.iter().map(|x| x * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn dedicated_pool_runs_work_on_its_own_threads() {
        let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap());
        let executor = Executor::Pool(pool);
        let threads = executor.install(rayon::current_num_threads);
        assert_eq!(threads, 3);
        assert_eq!(executor.current_num_threads(), 3);
    }
}
