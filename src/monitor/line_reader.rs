//! Incremental line extraction.
//!
//! Reads the lines appended to a file between two byte offsets, leaving any
//! unterminated trailing bytes unconsumed so they are picked up whole on the
//! next cycle.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, BufReader};

/// Maximum emitted line length in bytes. Longer lines are split near this
/// boundary (never inside a multi-byte character) and emitted as multiple
/// records; a documented limitation.
pub const MAX_LINE_BYTES: usize = 4096;

/// Result of one incremental read.
#[derive(Debug)]
pub struct LineBatch {
    /// Complete lines found, in file order, without their terminators.
    pub lines: Vec<String>,
    /// Offset of the first byte not consumed (end of the last complete line).
    pub end_offset: u64,
}

/// Read the complete lines between `start` and `target` byte offsets.
///
/// The file is opened fresh for each call and released on return; it may be
/// written, renamed, or deleted concurrently by other processes. Bytes after
/// the last line terminator are not consumed and `end_offset` is not
/// advanced past them, except that chunks of a line already longer than
/// [`MAX_LINE_BYTES`] are emitted (and consumed) as they stream in.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. The caller treats
/// this as a per-cycle failure, not a fatal one.
pub async fn read_appended(path: &Path, start: u64, target: u64) -> std::io::Result<LineBatch> {
    if target <= start {
        return Ok(LineBatch {
            lines: Vec::new(),
            end_offset: start,
        });
    }

    let mut file = File::open(path).await?;
    file.seek(SeekFrom::Start(start)).await?;

    // never read past the size observed at stat time
    let mut reader = BufReader::new(file.take(target - start));
    let mut lines = Vec::new();
    let mut end_offset = start;
    // bytes of the current line carried between buffer refills
    let mut pending: Vec<u8> = Vec::new();

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }

        if let Some(pos) = available.iter().position(|&b| b == b'\n') {
            pending.extend_from_slice(&available[..pos]);
            reader.consume(pos + 1);
            end_offset += pending.len() as u64 + 1;
            if pending.last() == Some(&b'\r') {
                pending.pop();
            }
            push_line(&mut lines, &pending);
            pending.clear();
        } else {
            let n = available.len();
            pending.extend_from_slice(available);
            reader.consume(n);
            // an overlong line streams out in bounded chunks instead of
            // accumulating whole in memory
            while pending.len() > MAX_LINE_BYTES {
                let cut = split_point(&pending);
                let chunk: Vec<u8> = pending.drain(..cut).collect();
                end_offset += chunk.len() as u64;
                push_line(&mut lines, &chunk);
            }
        }
    }

    // trailing bytes without a terminator stay unconsumed
    Ok(LineBatch { lines, end_offset })
}

/// Append one complete line, split into chunks where it exceeds
/// [`MAX_LINE_BYTES`].
fn push_line(lines: &mut Vec<String>, bytes: &[u8]) {
    let mut rest = bytes;
    while rest.len() > MAX_LINE_BYTES {
        let cut = split_point(rest);
        lines.push(String::from_utf8_lossy(&rest[..cut]).into_owned());
        rest = &rest[cut..];
    }
    lines.push(String::from_utf8_lossy(rest).into_owned());
}

/// Largest split point at or below [`MAX_LINE_BYTES`] that does not land
/// inside a multi-byte UTF-8 sequence. Falls back to the hard boundary for
/// non-UTF-8 data.
fn split_point(bytes: &[u8]) -> usize {
    let mut cut = MAX_LINE_BYTES;
    while cut > 0 && bytes.get(cut).is_some_and(|b| b & 0xC0 == 0x80) {
        cut -= 1;
    }
    if cut == 0 {
        MAX_LINE_BYTES
    } else {
        cut
    }
}
