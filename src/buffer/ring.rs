/// A fixed-capacity circular FIFO of `f32` samples for one channel.
///
/// Writes that exceed the free space are truncated and reads that exceed the
/// stored count come back short; neither is an error. The caller inspects the
/// returned count to detect dropped or missing data.
///
/// Not safe for concurrent use. One instance belongs to one thread; the
/// thread-crossing jitter queue in [`stream::duplex`](crate::stream::duplex)
/// uses `rtrb` instead.
pub struct RingBuffer {
    buffer: Vec<f32>,
    read_pos: usize,
    write_pos: usize,
    count: usize,
}

impl RingBuffer {
    /// Create a ring holding up to `capacity` samples.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self {
            buffer: vec![0.0; capacity],
            read_pos: 0,
            write_pos: 0,
            count: 0,
        }
    }

    /// Maximum number of samples the ring can hold.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of samples currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Copy as much of `data` as fits into the ring, wrapping at capacity.
    ///
    /// Returns the number of samples actually written. A return value smaller
    /// than `data.len()` means the excess was dropped.
    pub fn write(&mut self, data: &[f32]) -> usize {
        let writable = self.capacity() - self.count;
        let to_write = data.len().min(writable);
        if to_write == 0 {
            return 0;
        }

        // At most two contiguous copies: up to the end, then from the start.
        let first = to_write.min(self.capacity() - self.write_pos);
        self.buffer[self.write_pos..self.write_pos + first].copy_from_slice(&data[..first]);

        let second = to_write - first;
        if second > 0 {
            self.buffer[..second].copy_from_slice(&data[first..to_write]);
        }

        self.write_pos = (self.write_pos + to_write) % self.capacity();
        self.count += to_write;
        to_write
    }

    /// Copy up to `dest.len()` stored samples into `dest`, oldest first.
    ///
    /// Returns the number of samples read. Positions past the returned count
    /// are left untouched; the caller decides whether to zero-fill them.
    pub fn read(&mut self, dest: &mut [f32]) -> usize {
        let to_read = dest.len().min(self.count);
        if to_read == 0 {
            return 0;
        }

        let first = to_read.min(self.capacity() - self.read_pos);
        dest[..first].copy_from_slice(&self.buffer[self.read_pos..self.read_pos + first]);

        let second = to_read - first;
        if second > 0 {
            dest[first..to_read].copy_from_slice(&self.buffer[..second]);
        }

        self.read_pos = (self.read_pos + to_read) % self.capacity();
        self.count -= to_read;
        to_read
    }

    /// Reset to the empty state and zero the backing storage.
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
        self.count = 0;
        self.buffer.fill(0.0);
    }
}
