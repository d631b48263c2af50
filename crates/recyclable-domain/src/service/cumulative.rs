//! Running-sum lookup over ordered, sized buckets

/// Find the bucket covering a 1-based `position`.
///
/// Walks the buckets in order keeping a cumulative count and returns the
/// first bucket whose upper bound is at least `position`. Empty buckets are
/// never returned. `None` when the position is 0 or past the last bucket.
pub fn bucket_at_position<T, I>(buckets: I, position: u32) -> Option<T>
where
    I: IntoIterator<Item = (T, u32)>,
{
    if position == 0 {
        return None;
    }
    let mut upper = 0u64;
    for (bucket, size) in buckets {
        upper += u64::from(size);
        if u64::from(position) <= upper {
            return Some(bucket);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_cumulative_bounds() {
        let buckets = [("a", 3), ("b", 2), ("c", 2)];
        let at = |p| bucket_at_position(buckets, p);
        assert_eq!(at(1), Some("a"));
        assert_eq!(at(3), Some("a"));
        assert_eq!(at(4), Some("b"));
        assert_eq!(at(7), Some("c"));
        assert_eq!(at(8), None);
    }

    #[test]
    fn test_skips_empty_buckets() {
        let buckets = [("a", 0), ("b", 1), ("c", 0), ("d", 1)];
        assert_eq!(bucket_at_position(buckets, 1), Some("b"));
        assert_eq!(bucket_at_position(buckets, 2), Some("d"));
    }

    #[test]
    fn test_position_zero() {
        assert_eq!(bucket_at_position([("a", 5)], 0), None);
    }
}
