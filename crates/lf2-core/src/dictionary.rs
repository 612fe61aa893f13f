//! The 4096-byte circular dictionary matches copy from.
//!
//! [`CircularDictionary`] is the only state that survives from one decision
//! to the next. Every index is reduced modulo [`DICTIONARY_SIZE`], so no
//! read or write can go out of bounds.

use crate::{DICTIONARY_FILL, DICTIONARY_MASK, DICTIONARY_SIZE, DICTIONARY_START};

/// Fixed-size byte window with a single wrapping write cursor.
///
/// Starts filled with `0x20` and the cursor at `0x0fee`. Each
/// [`write_advance`](Self::write_advance) stores one byte and moves the
/// cursor forward by one, wrapping at 4096.
///
/// # Examples
///
/// ```
/// use lf2_core::CircularDictionary;
///
/// let mut dict = CircularDictionary::new();
/// assert_eq!(dict.cursor(), 0x0fee);
/// assert_eq!(dict.read_at(0), 0x20);
///
/// dict.write_advance(0xAB);
/// assert_eq!(dict.read_at(0x0fee), 0xAB);
/// assert_eq!(dict.cursor(), 0x0fef);
///
/// // Indices wrap.
/// assert_eq!(dict.read_at(0x0fee + 4096), 0xAB);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CircularDictionary {
    bytes: [u8; DICTIONARY_SIZE],
    cursor: usize,
    written: u64,
}

impl CircularDictionary {
    /// A fresh dictionary as the format defines it.
    pub fn new() -> Self {
        Self {
            bytes: [DICTIONARY_FILL; DICTIONARY_SIZE],
            cursor: DICTIONARY_START,
            written: 0,
        }
    }

    /// Byte at `index mod 4096`.
    #[inline]
    pub fn read_at(&self, index: usize) -> u8 {
        self.bytes[index & DICTIONARY_MASK]
    }

    /// Store `byte` at the cursor, advance the cursor, and return `byte`.
    #[inline]
    pub fn write_advance(&mut self, byte: u8) -> u8 {
        self.bytes[self.cursor] = byte;
        self.cursor = (self.cursor + 1) & DICTIONARY_MASK;
        self.written += 1;
        byte
    }

    /// Copy `length` bytes starting at `position`, one byte at a time.
    ///
    /// Each byte is written back at the cursor before the next one is read,
    /// so a source run that overlaps the cursor repeats freshly written
    /// bytes. `emit` sees every copied byte in order.
    pub fn copy_run(&mut self, position: usize, length: usize, mut emit: impl FnMut(u8)) {
        for i in 0..length {
            let byte = self.read_at(position + i);
            emit(self.write_advance(byte));
        }
    }

    /// Current write position, always in `[0, 4096)`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total bytes written since construction.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The raw window, indexed by absolute position.
    pub fn as_bytes(&self) -> &[u8; DICTIONARY_SIZE] {
        &self.bytes
    }

    /// The `n` most recently written positions, oldest first.
    ///
    /// `n` is capped at 4096. Positions never written still hold `0x20`.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = u8> + '_ {
        tail_of(&self.bytes, self.cursor, n)
    }

    /// Owned copy of the window and cursor.
    pub fn snapshot(&self) -> DictionarySnapshot {
        DictionarySnapshot {
            bytes: Box::new(self.bytes),
            cursor: self.cursor as u16,
        }
    }
}

impl Default for CircularDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CircularDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularDictionary")
            .field("cursor", &format_args!("{:#05x}", self.cursor))
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

/// Frozen copy of a [`CircularDictionary`] at one point in a decode.
///
/// Boxed so trace records stay cheap to move.
#[derive(Clone, PartialEq, Eq)]
pub struct DictionarySnapshot {
    bytes: Box<[u8; DICTIONARY_SIZE]>,
    cursor: u16,
}

impl DictionarySnapshot {
    /// Byte at `index mod 4096`.
    pub fn read_at(&self, index: usize) -> u8 {
        self.bytes[index & DICTIONARY_MASK]
    }

    /// Cursor at the time of the snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// The raw window.
    pub fn as_bytes(&self) -> &[u8; DICTIONARY_SIZE] {
        &self.bytes
    }

    /// The `n` positions before the cursor, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = u8> + '_ {
        tail_of(&self.bytes, self.cursor as usize, n)
    }
}

impl From<&CircularDictionary> for DictionarySnapshot {
    fn from(dict: &CircularDictionary) -> Self {
        dict.snapshot()
    }
}

impl std::fmt::Debug for DictionarySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionarySnapshot")
            .field("cursor", &format_args!("{:#05x}", self.cursor))
            .finish_non_exhaustive()
    }
}

fn tail_of(bytes: &[u8; DICTIONARY_SIZE], cursor: usize, n: usize) -> impl Iterator<Item = u8> + '_ {
    let n = n.min(DICTIONARY_SIZE);
    let start = cursor.wrapping_sub(n) & DICTIONARY_MASK;
    (0..n).map(move |i| bytes[(start + i) & DICTIONARY_MASK])
}
