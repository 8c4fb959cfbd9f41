//! Word-aligned linear memory holding the descriptor and the ball columns
//!
//! Layout (byte addresses):
//! - `0..8`: reserved, so that address 0 is never valid
//! - `8..32`: descriptor (`count`, then x, y, x_speed, y_speed, radius addresses)
//! - `32..`: the five columns back to back, `count` floats each
//!
//! Column addresses depend on `count`, so any change in ball count relocates
//! every column except `x`.

use crate::engine::{Address, DESCRIPTOR_WORDS, WORD_SIZE};

/// Byte address of the descriptor.
pub const DESCRIPTOR_ADDR: Address = 8;

const DESCRIPTOR_WORD: usize = DESCRIPTOR_ADDR as usize / WORD_SIZE;
const COLUMN_BASE_WORD: usize = DESCRIPTOR_WORD + DESCRIPTOR_WORDS;
const COLUMNS: usize = 5;

/// Mutable access to the five columns at once.
pub struct Columns<'a> {
    pub x: &'a mut [f32],
    pub y: &'a mut [f32],
    pub x_speed: &'a mut [f32],
    pub y_speed: &'a mut [f32],
    pub radius: &'a mut [f32],
}

impl Columns<'_> {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LinearHeap {
    words: Vec<u32>,
    count: usize,
}

impl LinearHeap {
    /// Allocate room for `count` balls (all zeroed) and publish the descriptor.
    pub fn new(count: usize) -> Self {
        let mut heap = Self {
            words: vec![0; COLUMN_BASE_WORD + COLUMNS * count],
            count,
        };
        heap.write_descriptor();
        heap
    }

    fn write_descriptor(&mut self) {
        let count = i32::try_from(self.count).unwrap_or(i32::MAX);
        self.words[DESCRIPTOR_WORD] = count as u32;
        for c in 0..COLUMNS {
            self.words[DESCRIPTOR_WORD + 1 + c] = self.column_address(c);
        }
    }

    fn column_address(&self, column: usize) -> Address {
        ((COLUMN_BASE_WORD + column * self.count) * WORD_SIZE) as Address
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The whole heap as bytes
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    pub fn columns_mut(&mut self) -> Columns<'_> {
        let n = self.count;
        let floats: &mut [f32] = bytemuck::cast_slice_mut(&mut self.words[COLUMN_BASE_WORD..]);
        let (x, rest) = floats.split_at_mut(n);
        let (y, rest) = rest.split_at_mut(n);
        let (x_speed, rest) = rest.split_at_mut(n);
        let (y_speed, radius) = rest.split_at_mut(n);
        Columns {
            x,
            y,
            x_speed,
            y_speed,
            radius,
        }
    }
}
