use crate::types::LatencyResult;

/// Mean of the measured latencies. `Absent` and `Error` results are skipped
/// entirely and do not count toward the denominator.
///
/// Returns `None` when nothing was measured.
pub fn aggregate_latency<'a, I>(results: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a LatencyResult>,
{
    // Running mean: stays finite for any finite inputs, where a plain sum
    // can overflow.
    let (mean, count) = results
        .into_iter()
        .filter_map(LatencyResult::value)
        .fold((0.0_f64, 0_u32), |(mean, count), ms| {
            let count = count + 1;
            (mean + (ms - mean) / f64::from(count), count)
        });

    (count > 0).then_some(mean)
}
