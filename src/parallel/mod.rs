//! Shared-memory work partitioning.
//!
//! All data-parallel kernels in this crate split their index range into
//! `workers` contiguous chunks and combine per-chunk results in chunk order,
//! so the outcome is deterministic for a fixed degree of parallelism.

/// Resolve a requested degree of parallelism. `0` means "all available
/// cores"; without the `rayon` feature everything degrades to 1.
pub fn resolve_workers(requested: usize) -> usize {
    #[cfg(feature = "rayon")]
    {
        if requested == 0 { num_cpus::get() } else { requested }
    }
    #[cfg(not(feature = "rayon"))]
    {
        let _ = requested;
        1
    }
}

/// Split `0..n` into at most `parts` non-empty contiguous ranges.
pub fn chunk_ranges(n: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    let parts = parts.clamp(1, n.max(1));
    let base = n / parts;
    let rem = n % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for p in 0..parts {
        let len = base + usize::from(p < rem);
        if len == 0 {
            continue;
        }
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Map each chunk of `0..n` through `f`, preserving chunk order in the
/// returned vector. Runs on the rayon pool when more than one worker is
/// requested, sequentially otherwise.
pub fn map_chunks<R, F>(n: usize, workers: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(std::ops::Range<usize>) -> R + Sync + Send,
{
    let ranges = chunk_ranges(n, workers);
    #[cfg(feature = "rayon")]
    {
        if workers > 1 {
            use rayon::prelude::*;
            return ranges.into_par_iter().map(f).collect();
        }
    }
    ranges.into_iter().map(f).collect()
}
