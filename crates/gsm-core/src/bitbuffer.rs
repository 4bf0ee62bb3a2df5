use std::{cmp::{max, min}, fmt};

use crate::pdu_parse_error::PduParseErr;

/// Bit-addressable buffer used for all L3 and RLC/MAC PDUs.
/// GSM L3 messages are octet-structured but carry plenty of half-octet and single-bit
/// fields (skip indicators, CKSN, countdown values), so everything goes through here.
pub struct BitBuffer {
    buffer: Vec<u8>,
    pos: usize,              // next bit offset for read/write
    end: usize,              // bits at or after this are out of window
    flag_autoexpand: bool,   // if true, writes past end grow the buffer
}

impl BitBuffer {
    /// Create a zeroed buffer capable of holding exactly `len_bits` bits.
    pub fn new(len_bits: usize) -> Self {
        let byte_len = (len_bits + 7) / 8;
        BitBuffer {
            buffer: vec![0; byte_len],
            pos: 0,
            end: len_bits,
            flag_autoexpand: false,
        }
    }

    /// Create a zeroed buffer with an initial capacity but zero length.
    /// Writes advance the end pointer and reallocate when needed.
    pub fn new_autoexpand(initial_max_len_bits: usize) -> Self {
        let byte_len = (initial_max_len_bits + 7) / 8;
        BitBuffer {
            buffer: vec![0; byte_len],
            pos: 0,
            end: 0,
            flag_autoexpand: true,
        }
    }

    /// Wrap an existing byte-vector, all bits readable.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len_bits = data.len() * 8;
        BitBuffer {
            buffer: data,
            pos: 0,
            end: len_bits,
            flag_autoexpand: false,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Construct a BitBuffer from a string of '0'/'1' characters.
    /// Panics on any other character; intended for test vectors.
    pub fn from_bitstr(bitstr: &str) -> Self {
        let mut buf = BitBuffer::new(bitstr.len());
        for c in bitstr.chars() {
            match c {
                '0' => buf.write_bit(0),
                '1' => buf.write_bit(1),
                other => panic!("from_bitstr: invalid character `{}`; only '0' or '1' allowed", other),
            }
        }
        buf.pos = 0;
        buf
    }

    /// Parse a hex string such as "05080123" into a buffer. Whitespace is ignored.
    pub fn from_hexstr(hexstr: &str) -> Result<Self, PduParseErr> {
        let digits: Vec<char> = hexstr.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() % 2 != 0 {
            return Err(PduParseErr::InconsistentLength { expected: digits.len() + 1, found: digits.len() });
        }
        let mut bytes = Vec::with_capacity(digits.len() / 2);
        for pair in digits.chunks(2) {
            let hi = pair[0].to_digit(16);
            let lo = pair[1].to_digit(16);
            let (Some(hi), Some(lo)) = (hi, lo) else {
                return Err(PduParseErr::InvalidValue { field: "hexstr", value: 0 });
            };
            bytes.push(((hi << 4) | lo) as u8);
        }
        Ok(Self::from_vec(bytes))
    }

    /// Convert the window into a String of '0'/'1' characters.
    pub fn to_bitstr(&self) -> String {
        let mut s = String::with_capacity(self.end);
        for i in 0..self.end {
            s.push(if self.read_bit_at_unchecked(i) == 1 { '1' } else { '0' });
        }
        s
    }

    /// Copy the window into octets. A trailing partial octet is zero-padded.
    pub fn to_octets(&self) -> Vec<u8> {
        let num_bytes = (self.end + 7) / 8;
        let mut ret = self.buffer[..num_bytes].to_vec();
        let tail_bits = self.end % 8;
        if tail_bits != 0 {
            if let Some(last) = ret.last_mut() {
                *last &= 0xFF << (8 - tail_bits);
            }
        }
        ret
    }

    /// Extract the internal byte-vector, including any unused capacity.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Peek `num_bits` at the current pos, without advancing.
    /// Returns None on overflow or if `num_bits>64`.
    pub fn peek_bits(&self, num_bits: usize) -> Option<u64> {
        self.peek_bits_at(self.pos, num_bits)
    }

    /// Peek `num_bits` at absolute `offset`, without advancing.
    pub fn peek_bits_at(&self, offset: usize, num_bits: usize) -> Option<u64> {
        if num_bits > 64 || offset + num_bits > self.end {
            return None;
        }
        Some(self.read_bits_at_unchecked(offset, num_bits))
    }

    /// Read `num_bits` at the current pos, advancing on success.
    pub fn read_bits(&mut self, num_bits: usize) -> Option<u64> {
        let v = self.peek_bits_at(self.pos, num_bits)?;
        self.pos += num_bits;
        Some(v)
    }

    /// Like read_bits, but returns PduParseErr::BufferEnded naming the field if not enough bits are available.
    pub fn read_field(&mut self, num_bits: usize, field: &'static str) -> Result<u64, PduParseErr> {
        self.read_bits(num_bits).ok_or(PduParseErr::BufferEnded { field: Some(field) })
    }

    pub fn read_bit(&mut self) -> Option<u8> {
        self.read_bits(1).map(|v| v as u8)
    }

    /// Read `num_octets` whole octets starting at pos (which need not be octet-aligned).
    pub fn read_octets(&mut self, num_octets: usize, field: &'static str) -> Result<Vec<u8>, PduParseErr> {
        if self.get_len_remaining() < num_octets * 8 {
            return Err(PduParseErr::BufferEnded { field: Some(field) });
        }
        let mut ret = Vec::with_capacity(num_octets);
        for _ in 0..num_octets {
            ret.push(self.read_field(8, field)? as u8);
        }
        Ok(ret)
    }

    fn _realloc_tail(&mut self, new_cap_bits: usize) {
        let new_cap_bytes = (new_cap_bits + 7) / 8;
        assert!(new_cap_bytes >= self.buffer.len(), "new capacity must be larger than current buffer size");
        self.buffer.resize(new_cap_bytes, 0);
    }

    /// Grows `end` by `needed_extra_bits`, reallocating if the capacity is insufficient.
    fn _move_end(&mut self, needed_extra_bits: usize) {
        let free_cap_bits = self.buffer.len() * 8 - self.end;
        if needed_extra_bits > free_cap_bits {
            let double_cap_bits = self.buffer.len() * 8 * 2;
            let new_cap_bits = max(self.end + needed_extra_bits, double_cap_bits);
            self._realloc_tail(new_cap_bits);
        }
        self.end += needed_extra_bits;
    }

    /// Makes room for a write of `num_bits` at pos, or panics if the buffer is fixed-size.
    fn _reserve_write(&mut self, num_bits: usize) {
        if self.pos + num_bits > self.end {
            if self.flag_autoexpand {
                let extra = self.pos + num_bits - self.end;
                self._move_end(extra);
            } else {
                panic!("write would exceed buffer end");
            }
        }
    }

    /// Write a single bit to pos
    pub fn write_bit(&mut self, value: u8) {
        assert!(value == 0 || value == 1, "write_bit: value must be 0 or 1");
        self._reserve_write(1);

        let index = self.pos / 8;
        let shift = 7 - (self.pos % 8);
        self.buffer[index] &= !(1 << shift);
        self.buffer[index] |= value << shift;
        self.pos += 1;
    }

    /// Write an arbitrary amount of zero-bits
    pub fn write_zeroes(&mut self, num_bits: usize) {
        let mut bits_remaining = num_bits;
        while bits_remaining > 0 {
            let chunk_size = min(bits_remaining, 64);
            self.write_bits(0, chunk_size);
            bits_remaining -= chunk_size;
        }
    }

    /// Write up to 64 bits, advancing pos.
    /// Autoexpanding buffers grow; fixed buffers panic when exceeding end.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        assert!(num_bits <= 64, "can only write up to 64 bits");
        assert!(num_bits == 64 || value >> num_bits == 0, "value exceeds num_bits {} {}", value, num_bits);
        self._reserve_write(num_bits);

        let mut remaining = num_bits;
        let mut cur = self.pos;

        // head bits up to the next octet boundary
        let head_offset = cur % 8;
        if head_offset != 0 && remaining > 0 {
            let h = usize::min(remaining, 8 - head_offset);
            let bits_to_write = ((value >> (remaining - h)) as u8) & ((1u16 << h) - 1) as u8;
            let shift = 8 - (head_offset + h);
            let mask = (((1u16 << h) - 1) << shift) as u8;
            let byte = &mut self.buffer[cur / 8];
            *byte = (*byte & !mask) | (bits_to_write << shift);
            cur += h;
            remaining -= h;
        }

        // full octets
        while remaining >= 8 {
            self.buffer[cur / 8] = ((value >> (remaining - 8)) & 0xFF) as u8;
            cur += 8;
            remaining -= 8;
        }

        // tail bits
        if remaining > 0 {
            let bits_to_write = (value as u8) & ((1u16 << remaining) - 1) as u8;
            let shift = 8 - remaining;
            let mask = (((1u16 << remaining) - 1) << shift) as u8;
            let byte = &mut self.buffer[cur / 8];
            *byte = (*byte & !mask) | (bits_to_write << shift);
        }

        self.pos += num_bits;
    }

    pub fn write_octets(&mut self, data: &[u8]) {
        for byte in data {
            self.write_bits(*byte as u64, 8);
        }
    }

    /// Fills the buffer with `pattern` octets until it is `len_octets` long.
    /// Used for the 0x2B spare padding of downlink blocks. Pos must be octet-aligned.
    pub fn pad_octets_to(&mut self, len_octets: usize, pattern: u8) {
        assert!(self.pos % 8 == 0, "padding requires octet alignment");
        while self.pos < len_octets * 8 {
            self.write_bits(pattern as u64, 8);
        }
    }

    /// Number of bits in the window
    pub fn get_len(&self) -> usize {
        self.end
    }

    /// Number of bits left in the window, from pos to end.
    pub fn get_len_remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Seek `pos` to `offset`.
    pub fn seek(&mut self, offset: usize) {
        assert!(offset <= self.end, "seek out of window: got {}, allowed [0,{}]", offset, self.end);
        self.pos = offset;
    }

    /// Skips to the next octet boundary (no-op when aligned).
    pub fn align_octet(&mut self) -> Result<(), PduParseErr> {
        let rem = self.pos % 8;
        if rem != 0 {
            self.read_field(8 - rem, "octet_alignment")?;
        }
        Ok(())
    }

    /// Dump bits in window as an uppercase hex string, zero-padding a trailing nibble.
    pub fn dump_hex(&self) -> String {
        let n_nibbles = (self.end + 3) / 4;
        let mut s = String::with_capacity(n_nibbles);
        for i in 0..n_nibbles {
            let take = usize::min(4, self.end - i * 4);
            let v = self.read_bits_at_unchecked(i * 4, take) as u8;
            let digit = if take < 4 { v << (4 - take) } else { v };
            s.push_str(&format!("{:X}", digit));
        }
        s
    }

    /// Dump bits in window as '0'/'1', with a ^ marker before the current pos.
    pub fn dump_bin(&self) -> String {
        let mut s = String::with_capacity(self.end + 1);
        for i in 0..self.end {
            if i == self.pos { s.push('^'); }
            s.push(if self.read_bit_at_unchecked(i) == 1 { '1' } else { '0' });
        }
        if self.pos == self.end { s.push('^'); }
        s
    }

    /// Reads exactly `num_bits` bits starting at `bit_pos` without bounds checks.
    /// Caller must ensure `num_bits <= 64` and `bit_pos + num_bits <= end`.
    fn read_bits_at_unchecked(&self, mut bit_pos: usize, num_bits: usize) -> u64 {
        let mut result = 0u64;
        let mut bits_remaining = num_bits;

        let head = bit_pos % 8;
        if head != 0 && bits_remaining > 0 {
            let take = usize::min(8 - head, bits_remaining);
            let byte = self.buffer[bit_pos / 8];
            let shift = 8 - head - take;
            let mask = ((1u16 << take) - 1) as u8;
            result = ((byte >> shift) & mask) as u64;
            bit_pos += take;
            bits_remaining -= take;
        }

        while bits_remaining >= 8 {
            result = (result << 8) | self.buffer[bit_pos / 8] as u64;
            bit_pos += 8;
            bits_remaining -= 8;
        }

        for _ in 0..bits_remaining {
            result = (result << 1) | self.read_bit_at_unchecked(bit_pos) as u64;
            bit_pos += 1;
        }

        result
    }

    fn read_bit_at_unchecked(&self, bit_pos: usize) -> u8 {
        (self.buffer[bit_pos / 8] >> (7 - (bit_pos % 8))) & 1
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuffer {{ ^{} >{} {} }}", self.pos, self.end, self.dump_hex())
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dump_hex())
    }
}
