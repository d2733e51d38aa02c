/// Maximum number of items the Spotify API accepts or returns per request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Splits `items` into consecutive batches of at most `max` elements.
///
/// Every batch but the last holds exactly `max` items and concatenating the
/// batches yields `items` again. A `max` of zero is treated as one.
pub fn batch<T>(items: &[T], max: usize) -> Vec<&[T]> {
    items.chunks(max.max(1)).collect()
}
