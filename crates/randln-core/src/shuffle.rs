//! In-place Fisher–Yates shuffle driven by an [`EntropySource`].

use std::num::NonZeroUsize;

use crate::entropy::EntropySource;
use crate::error::EntropyError;
use crate::segment::LineCollection;

/// Permute `items` in place, uniformly up to the source's modulo bias.
///
/// Walks left to right; position `i` is swapped with an index drawn from the
/// unprocessed suffix `[i, n)`, which includes `i` itself. Slices of length
/// 0 or 1 are left untouched and draw nothing.
pub fn shuffle<T, E>(items: &mut [T], entropy: &mut E) -> Result<(), EntropyError>
where
    E: EntropySource + ?Sized,
{
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        let Some(remaining) = NonZeroUsize::new(n - i) else {
            break;
        };
        let j = i + entropy.draw_bounded(remaining)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Shuffle a segmented file's lines in place.
pub fn shuffle_lines<E>(
    lines: &mut LineCollection<'_>,
    entropy: &mut E,
) -> Result<(), EntropyError>
where
    E: EntropySource + ?Sized,
{
    log::debug!("shuffling {} lines", lines.len());
    shuffle(lines.records_mut(), entropy)
}
