//! Byte-faithful type-annotation erasure (§6).
//!
//! The translator is independent of the IR proper: it takes the original
//! source text plus two region lists the parser emitted while it still had
//! the full surface syntax in view, and produces host-language source a
//! dynamically-typed interpreter can run directly. It never sees a `Cmd` or
//! a `Value`.
//!
//! Region offsets are 1-based byte positions, inclusive on both ends
//! (`[start, end]`), matching the parser's own span numbering (see
//! spec.md's worked example).

/// Erase every `type_regions` span from `source`, replacing each non-newline
/// byte with a space so line and column numbers are preserved, except for
/// any `comment_regions` span that falls entirely inside one — those are
/// restored verbatim afterward. The rest of `source` is returned unchanged.
///
/// # Panics
///
/// Panics if a comment region overlaps a type region without being fully
/// contained in it — a comment can never straddle a type-region boundary,
/// and a translator that hit one would be acting on a parser bug, not a
/// recoverable condition.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn translate(source: &str, type_regions: &[(u32, u32)], comment_regions: &[(u32, u32)]) -> String {
    let mut buf = source.as_bytes().to_vec();

    for &region in type_regions {
        erase(&mut buf, region);
    }

    for &comment in comment_regions {
        let Some(&enclosing) = type_regions.iter().find(|&&t| overlaps(t, comment)) else {
            continue;
        };
        if !contains(enclosing, comment) {
            panic_straddling_comment(comment, enclosing);
        }
        restore(&mut buf, source.as_bytes(), comment);
    }

    String::from_utf8(buf).expect("translate only ever replaces bytes with ASCII spaces or restores original bytes")
}

/// Convert a 1-based inclusive `(start, end)` region into a 0-based
/// inclusive `Vec`/slice index range.
fn to_range((start, end): (u32, u32)) -> std::ops::RangeInclusive<usize> {
    (start as usize - 1)..=(end as usize - 1)
}

fn erase(buf: &mut [u8], region: (u32, u32)) {
    for byte in &mut buf[to_range(region)] {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}

fn restore(buf: &mut [u8], original: &[u8], region: (u32, u32)) {
    let range = to_range(region);
    buf[range.clone()].copy_from_slice(&original[range]);
}

fn overlaps((a_start, a_end): (u32, u32), (b_start, b_end): (u32, u32)) -> bool {
    a_start <= b_end && b_start <= a_end
}

fn contains((outer_start, outer_end): (u32, u32), (inner_start, inner_end): (u32, u32)) -> bool {
    inner_start >= outer_start && inner_end <= outer_end
}

#[cold]
#[inline(never)]
fn panic_straddling_comment(comment: (u32, u32), type_region: (u32, u32)) -> ! {
    panic!(
        "comment region {comment:?} straddles the boundary of type region {type_region:?} — \
         the parser must never emit overlapping-but-not-nested regions"
    )
}

#[cfg(test)]
mod tests;
