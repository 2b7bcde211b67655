/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range, or fractional values.
///
/// ## Example
/// ```
/// use kode::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, ()), Ok(1000));
/// assert!(f64_to_i64_checked(1.5, ()).is_err());
/// assert!(f64_to_i64_checked(1e20, ()).is_err());
/// assert!(f64_to_i64_checked(f64::NAN, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    // i64::MAX is not representable; its nearest f64 is 2^63.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Safely converts an `i64` to `usize`, rejecting negative values.
///
/// ## Example
/// ```
/// use kode::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(7, ()), Ok(7));
/// assert!(i64_to_usize_checked(-1, ()).is_err());
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}

/// Resolves a script index against a container length.
///
/// Negative indices count from the end, so `-1` is the last element.
/// Returns `None` when the index falls outside `0..len`.
///
/// ## Example
/// ```
/// use kode::util::num::resolve_index;
///
/// assert_eq!(resolve_index(3, 0), Some(0));
/// assert_eq!(resolve_index(3, -1), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(3, -4), None);
/// ```
#[must_use]
pub fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len.checked_add(index)? } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Resolves an insertion point the way list insertion does: negative values
/// count from the end and out-of-range values clamp to the nearest end.
///
/// ## Example
/// ```
/// use kode::util::num::clamp_insertion_index;
///
/// assert_eq!(clamp_insertion_index(3, 1), 1);
/// assert_eq!(clamp_insertion_index(3, -1), 2);
/// assert_eq!(clamp_insertion_index(3, -10), 0);
/// assert_eq!(clamp_insertion_index(3, 3), 3);
/// ```
#[must_use]
pub fn clamp_insertion_index(len: usize, index: i64) -> usize {
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if index < 0 { (signed_len + index).max(0) } else { index.min(signed_len) };
    i64_to_usize_checked(resolved, len).unwrap_or(len)
}
