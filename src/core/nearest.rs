/// Returns the index in `[left, right]` whose value is closest to `query`.
///
/// `items` must be sorted ascending by `value_of`. Queries outside the bounded
/// values clamp to `left`/`right`; otherwise the bracketing pair found by
/// binary search decides and ties go to the lower index. Bounds past the end
/// of `items` are clamped; an empty slice yields `None`.
pub fn nearest_index<T>(
    items: &[T],
    value_of: impl Fn(&T) -> f64,
    query: f64,
    left: usize,
    right: usize,
) -> Option<usize> {
    let last = items.len().checked_sub(1)?;
    let right = right.min(last);
    let left = left.min(right);

    if query < value_of(&items[left]) {
        return Some(left);
    }
    if query > value_of(&items[right]) {
        return Some(right);
    }

    // Signed bounds: `hi` may step below `left` while narrowing.
    let mut lo = left as isize;
    let mut hi = right as isize;
    while lo <= hi {
        let mid = lo + ((hi - lo) >> 1);
        let value = value_of(&items[mid as usize]);
        if query < value {
            hi = mid - 1;
        } else if query > value {
            lo = mid + 1;
        } else {
            return Some(mid as usize);
        }
    }

    // The loop ends with `hi + 1 == lo`, both inside `[left, right]` because
    // the query lies within the bracketed values.
    let (lo, hi) = (lo as usize, hi as usize);
    if value_of(&items[lo]) - query < query - value_of(&items[hi]) {
        Some(lo)
    } else {
        Some(hi)
    }
}
