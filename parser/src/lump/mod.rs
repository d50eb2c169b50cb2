use std::ops::Range;

use tracing::debug;

use crate::lump::error::Error;

pub mod error;

/// Every entity lump spells out at least one `"classname"` key.
const MARKER: &[u8] = b"\"classname\"";

/// Finds the entity lump inside raw BSP bytes without reading the header.
///
/// The lump starts at the `{` closest before the first `"classname"` and ends
/// (exclusive) at the first NUL after that brace.
pub fn locate(bytes: &[u8]) -> Result<Range<usize>, Error> {
    let marker = bytes
        .windows(MARKER.len())
        .position(|window| window == MARKER)
        .ok_or(Error::StartNotFound)?;

    let start = bytes[..marker]
        .iter()
        .rposition(|&b| b == b'{')
        .ok_or(Error::StartNotFound)?;

    let len = bytes[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::EndNotFound)?;

    debug!(
        target: "bspentityalias::lump",
        start,
        end = start + len,
        "located entity lump"
    );

    Ok(start..start + len)
}
