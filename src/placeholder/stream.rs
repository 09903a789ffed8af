//! Chunked text streaming that never splits a placeholder token.
//!
//! A token is made only of identifier bytes (`[A-Za-z0-9_]`), so a chunk can
//! be released up to the last non-identifier byte. The trailing identifier
//! run, plus any incomplete UTF-8 sequence, waits for the next chunk.

use std::io::{self, Read};

use super::is_identifier_byte;

/// Read size used when no explicit chunk size is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Longest identifier run carried between chunks before it is released as-is.
const MAX_PENDING: usize = 64 * 1024;

/// Buffers raw chunks and releases text that ends on a token-safe cut.
#[derive(Debug, Default)]
pub struct TokenStream {
    pending: Vec<u8>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and hand every token-safe prefix to `emit`.
    pub fn push<F>(&mut self, chunk: &[u8], mut emit: F) -> io::Result<()>
    where
        F: FnMut(&str) -> io::Result<()>,
    {
        self.pending.extend_from_slice(chunk);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        let cut = if valid < self.pending.len() {
            // An incomplete multi-byte char follows, which already terminates any token.
            valid
        } else {
            let mut cut = valid;
            while cut > 0 && is_identifier_byte(self.pending[cut - 1]) {
                cut -= 1;
            }
            if valid - cut > MAX_PENDING {
                valid
            } else {
                cut
            }
        };

        if cut == 0 {
            return Ok(());
        }

        let text = std::str::from_utf8(&self.pending[..cut])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        emit(text)?;
        self.pending.drain(..cut);
        Ok(())
    }

    /// Release whatever is still buffered. Fails on a truncated UTF-8 sequence.
    pub fn finish<F>(self, mut emit: F) -> io::Result<()>
    where
        F: FnMut(&str) -> io::Result<()>,
    {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = std::str::from_utf8(&self.pending)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        emit(text)
    }
}

/// Read `reader` to the end in `chunk_size` pieces, emitting token-safe text.
pub fn stream_text<R, F>(mut reader: R, chunk_size: usize, mut emit: F) -> io::Result<()>
where
    R: Read,
    F: FnMut(&str) -> io::Result<()>,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut stream = TokenStream::new();
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        stream.push(&buf[..n], &mut emit)?;
    }
    stream.finish(emit)
}
