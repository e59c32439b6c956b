//! Threshold-based dispatch between sequential and `rayon` execution.
//!
//! Small images stay on the calling thread; large ones are split across the
//! global rayon pool. Both paths produce identical results.

use rayon::prelude::*;

/// Default pixel count at which work moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 30_000;

/// Samples handled per rayon task when folding.
const FOLD_CHUNK: usize = 4096;

/// Fold chunks of `data` into per-task accumulators, then combine them.
///
/// Each task owns its accumulator, so no bucket is shared between threads
/// until `reduce_fn` merges them.
pub fn fold_reduce<T, A, I, F, R>(
    data: &[T],
    threshold: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync,
    F: Fn(A, &[T]) -> A + Sync,
    R: Fn(A, A) -> A + Sync,
{
    if data.len() >= threshold {
        data.par_chunks(FOLD_CHUNK)
            .fold(&init, &fold_fn)
            .reduce(&init, &reduce_fn)
    } else {
        fold_fn(init(), data)
    }
}

/// Map every element of `data` through `f` into a new buffer.
pub fn map<T, U, F>(data: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if data.len() >= threshold {
        data.par_iter().map(f).collect()
    } else {
        data.iter().map(f).collect()
    }
}

/// Visit `data` in mutable chunks of `chunk_size`, paired with one element of `with`.
///
/// Callers guarantee `data.len() == with.len() * chunk_size`.
pub fn zip_chunks_mut<T, U, F>(
    data: &mut [T],
    chunk_size: usize,
    with: &[U],
    threshold: usize,
    f: F,
) where
    T: Send,
    U: Sync,
    F: Fn(&mut [T], &U) + Sync + Send,
{
    if with.len() >= threshold {
        data.par_chunks_exact_mut(chunk_size)
            .zip(with.par_iter())
            .for_each(|(chunk, w)| f(chunk, w));
    } else {
        for (chunk, w) in data.chunks_exact_mut(chunk_size).zip(with) {
            f(chunk, w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_reduce_matches_on_both_paths() {
        let data: Vec<u32> = (0..10_000).collect();
        let sum = |acc: u64, chunk: &[u32]| acc + chunk.iter().map(|&v| v as u64).sum::<u64>();
        let sequential = fold_reduce(&data, usize::MAX, || 0u64, sum, |a, b| a + b);
        let parallel = fold_reduce(&data, 0, || 0u64, sum, |a, b| a + b);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential, 49_995_000);
    }

    #[test]
    fn test_map_preserves_order() {
        let data: Vec<u8> = (0..=255).collect();
        let doubled = map(&data, 0, |&v| v as u16 * 2);
        assert_eq!(doubled[200], 400);
        assert_eq!(doubled, map(&data, usize::MAX, |&v| v as u16 * 2));
    }

    #[test]
    fn test_zip_chunks_mut_pairs_chunks_with_values() {
        let mut data = vec![0u8; 6];
        zip_chunks_mut(&mut data, 3, &[7u8, 9], 0, |chunk, &v| chunk[1] = v);
        assert_eq!(data, vec![0, 7, 0, 0, 9, 0]);
    }
}
