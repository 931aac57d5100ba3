//! Sliding-window history buffer for GND back-references

/// Capacity of the GND sliding window in bytes.
pub const WINDOW_SIZE: usize = 4096;

/// Ring buffer over the most recently decoded bytes.
///
/// The window doubles as the back-reference dictionary: copy opcodes read
/// previously produced bytes at a distance counted backwards from the write
/// position (`distance == 1` is the most recent byte). Once more than
/// [`WINDOW_SIZE`] bytes have been pushed the oldest byte is overwritten.
#[derive(Debug)]
pub struct History {
    buf: Box<[u8; WINDOW_SIZE]>,
    /// Next write position.
    head: usize,
    /// Bytes pushed so far, saturating at [`WINDOW_SIZE`].
    filled: usize,
}

impl History {
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; WINDOW_SIZE]),
            head: 0,
            filled: 0,
        }
    }

    /// Number of bytes currently addressable by a back-reference.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Append one byte, evicting the oldest once the window is full.
    pub fn push(&mut self, byte: u8) {
        self.buf[self.head] = byte;
        self.head = (self.head + 1) % WINDOW_SIZE;
        if self.filled < WINDOW_SIZE {
            self.filled += 1;
        }
    }

    /// Read the byte `distance` positions before the most recent push.
    ///
    /// Returns `None` when `distance` is zero or exceeds the bytes pushed so
    /// far. The check applies even while the window is below capacity; bytes
    /// never written must not be readable.
    pub fn read_back(&self, distance: usize) -> Option<u8> {
        if distance == 0 || distance > self.filled {
            return None;
        }
        let idx = (self.head + WINDOW_SIZE - distance) % WINDOW_SIZE;
        Some(self.buf[idx])
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_back_recent() {
        let mut hist = History::new();
        hist.push(0x0A);
        hist.push(0x0B);
        assert_eq!(hist.read_back(1), Some(0x0B));
        assert_eq!(hist.read_back(2), Some(0x0A));
    }

    #[test]
    fn test_read_back_rejects_unwritten() {
        let mut hist = History::new();
        assert_eq!(hist.read_back(1), None);
        hist.push(0x42);
        assert_eq!(hist.read_back(1), Some(0x42));
        assert_eq!(hist.read_back(2), None);
        assert_eq!(hist.read_back(0), None);
    }

    #[test]
    fn test_eviction_past_capacity() {
        let mut hist = History::new();
        for i in 0..WINDOW_SIZE + 10 {
            hist.push((i % 251) as u8);
        }
        assert_eq!(hist.len(), WINDOW_SIZE);
        // Most recent byte is (WINDOW_SIZE + 9) % 251.
        let last = ((WINDOW_SIZE + 9) % 251) as u8;
        assert_eq!(hist.read_back(1), Some(last));
        // Oldest still-addressable byte is 10 pushes in.
        let oldest = (10 % 251) as u8;
        assert_eq!(hist.read_back(WINDOW_SIZE), Some(oldest));
        assert_eq!(hist.read_back(WINDOW_SIZE + 1), None);
    }

    #[test]
    fn test_wraparound_addressing() {
        let mut hist = History::new();
        for _ in 0..WINDOW_SIZE - 1 {
            hist.push(0x00);
        }
        hist.push(0x11);
        hist.push(0x22); // overwrites the first byte
        assert_eq!(hist.read_back(1), Some(0x22));
        assert_eq!(hist.read_back(2), Some(0x11));
    }
}
