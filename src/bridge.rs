//! State bridge: typed, zero-copy views over the engine's ball columns
//!
//! The engine publishes a six-word [`Descriptor`] followed (somewhere in its
//! memory) by five `f32` columns. A [`BallSet`] borrows those columns straight
//! out of [`Engine::memory`], so it cannot outlive the `&Engine` borrow and
//! therefore cannot survive a call to [`Engine::tick`].

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::engine::{Address, DESCRIPTOR_WORDS, Engine, WORD_SIZE};
use crate::error::IntegrationFault;

/// Raw descriptor header, in engine memory order.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Descriptor {
    pub count: i32,
    pub x: Address,
    pub y: Address,
    pub x_speed: Address,
    pub y_speed: Address,
    pub radius: Address,
}

/// Size of the descriptor in bytes.
pub const DESCRIPTOR_SIZE: usize = DESCRIPTOR_WORDS * WORD_SIZE;

const _: () = assert!(std::mem::size_of::<Descriptor>() == DESCRIPTOR_SIZE);

impl Descriptor {
    /// Read the descriptor header at `address`.
    pub fn read(memory: &[u8], address: Address) -> Result<Self, IntegrationFault> {
        if address == 0 {
            return Err(IntegrationFault::NullDescriptor);
        }
        let start = address as usize;
        let bytes = start
            .checked_add(DESCRIPTOR_SIZE)
            .and_then(|end| memory.get(start..end))
            .ok_or(IntegrationFault::DescriptorOutOfBounds {
                address,
                memory_len: memory.len(),
            })?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Ball count, rejecting negative values.
    pub fn len(&self) -> Result<usize, IntegrationFault> {
        usize::try_from(self.count).map_err(|_| IntegrationFault::NegativeCount(self.count))
    }
}

/// One ball, gathered from matching indices of the five columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// The engine's ball columns as of one read. All columns have `count` elements.
#[derive(Debug, Clone, Copy)]
pub struct BallSet<'frame> {
    pub x: &'frame [f32],
    pub y: &'frame [f32],
    pub x_speed: &'frame [f32],
    pub y_speed: &'frame [f32],
    pub radius: &'frame [f32],
}

impl<'frame> BallSet<'frame> {
    /// Number of balls
    pub fn count(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Gather ball `i` across the columns
    pub fn get(&self, i: usize) -> Option<Ball> {
        if i >= self.count() {
            return None;
        }
        Some(Ball {
            position: Vec2::new(self.x[i], self.y[i]),
            velocity: Vec2::new(self.x_speed[i], self.y_speed[i]),
            radius: self.radius[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Ball> + '_ {
        (0..self.count()).filter_map(move |i| self.get(i))
    }
}

/// Resolve one `f32` column of `count` elements at `address`.
fn column<'m>(
    memory: &'m [u8],
    name: &'static str,
    address: Address,
    count: usize,
) -> Result<&'m [f32], IntegrationFault> {
    // An empty column may legitimately point anywhere, including null.
    if count == 0 {
        return Ok(&[]);
    }
    if address == 0 {
        return Err(IntegrationFault::NullColumn { column: name, count });
    }
    let out_of_bounds = IntegrationFault::ColumnOutOfBounds {
        column: name,
        address,
        count,
        memory_len: memory.len(),
    };
    let start = address as usize;
    let bytes = count
        .checked_mul(WORD_SIZE)
        .and_then(|len| start.checked_add(len))
        .and_then(|end| memory.get(start..end))
        .ok_or(out_of_bounds)?;
    bytemuck::try_cast_slice(bytes)
        .map_err(|_| IntegrationFault::MisalignedColumn { column: name, address })
}

/// Build a [`BallSet`] from raw memory and a descriptor address.
pub fn ball_set_at(memory: &[u8], address: Address) -> Result<BallSet<'_>, IntegrationFault> {
    let descriptor = Descriptor::read(memory, address)?;
    let count = descriptor.len()?;
    Ok(BallSet {
        x: column(memory, "x", descriptor.x, count)?,
        y: column(memory, "y", descriptor.y, count)?,
        x_speed: column(memory, "x_speed", descriptor.x_speed, count)?,
        y_speed: column(memory, "y_speed", descriptor.y_speed, count)?,
        radius: column(memory, "radius", descriptor.radius, count)?,
    })
}

/// Read the engine's current ball state.
///
/// The returned views borrow the engine, so they must be dropped before the
/// engine can tick again.
pub fn read_ball_set<E: Engine + ?Sized>(engine: &E) -> Result<BallSet<'_>, IntegrationFault> {
    if !engine.is_ready() {
        return Err(IntegrationFault::EngineNotReady {
            operation: "get_descriptor",
        });
    }
    ball_set_at(engine.memory(), engine.get_descriptor())
}

/// Run `f` over the engine's current ball state.
pub fn with_ball_set<E, R>(
    engine: &E,
    f: impl FnOnce(&BallSet<'_>) -> R,
) -> Result<R, IntegrationFault>
where
    E: Engine + ?Sized,
{
    let balls = read_ball_set(engine)?;
    Ok(f(&balls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Lay out a descriptor at word 1 and contiguous columns after it.
    fn heap(count: i32, values: &[[f32; 5]]) -> Vec<u32> {
        let n = values.len();
        let base = 1 + DESCRIPTOR_WORDS;
        let mut words = vec![0u32; base + n * 5];
        words[1] = count as u32;
        for c in 0..5 {
            words[2 + c] = ((base + c * n) * WORD_SIZE) as u32;
            for (i, v) in values.iter().enumerate() {
                words[base + c * n + i] = v[c].to_bits();
            }
        }
        words
    }

    fn bytes(words: &[u32]) -> &[u8] {
        bytemuck::cast_slice(words)
    }

    #[test]
    fn test_reads_columns_by_index() {
        let words = heap(2, &[[1.0, 2.0, 3.0, 4.0, 5.0], [10.0, 20.0, 30.0, 40.0, 50.0]]);
        let set = ball_set_at(bytes(&words), 4).unwrap();
        assert_eq!(set.count(), 2);
        assert_eq!(
            set.get(1),
            Some(Ball {
                position: Vec2::new(10.0, 20.0),
                velocity: Vec2::new(30.0, 40.0),
                radius: 50.0,
            })
        );
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn test_empty_set_with_null_columns() {
        let mut words = vec![0u32; 8];
        words[1] = 0;
        let set = ball_set_at(bytes(&words), 4).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
        assert!(set.radius.is_empty());
    }

    #[test]
    fn test_null_descriptor_is_fault() {
        let words = heap(0, &[]);
        assert_eq!(
            ball_set_at(bytes(&words), 0).unwrap_err(),
            IntegrationFault::NullDescriptor
        );
    }

    #[test]
    fn test_descriptor_past_end_is_fault() {
        let words = heap(0, &[]);
        let err = ball_set_at(bytes(&words), 16).unwrap_err();
        assert!(matches!(err, IntegrationFault::DescriptorOutOfBounds { address: 16, .. }));
    }

    #[test]
    fn test_negative_count_is_fault() {
        let words = heap(-3, &[[0.0; 5]]);
        assert_eq!(
            ball_set_at(bytes(&words), 4).unwrap_err(),
            IntegrationFault::NegativeCount(-3)
        );
    }

    #[test]
    fn test_count_past_columns_is_fault() {
        // Claims more balls than the columns hold; the last column overruns memory.
        let words = heap(4, &[[0.0; 5], [0.0; 5]]);
        let err = ball_set_at(bytes(&words), 4).unwrap_err();
        assert!(matches!(
            err,
            IntegrationFault::ColumnOutOfBounds { column: "radius", count: 4, .. }
        ));
    }

    #[test]
    fn test_null_column_is_fault() {
        let mut words = heap(1, &[[0.0; 5]]);
        words[3] = 0; // y
        assert_eq!(
            ball_set_at(bytes(&words), 4).unwrap_err(),
            IntegrationFault::NullColumn { column: "y", count: 1 }
        );
    }

    #[test]
    fn test_misaligned_column_is_fault() {
        let mut words = heap(1, &[[0.0; 5]]);
        words[2] += 1; // x
        let err = ball_set_at(bytes(&words), 4).unwrap_err();
        assert!(matches!(err, IntegrationFault::MisalignedColumn { column: "x", .. }));
    }

    #[test]
    fn test_unaligned_descriptor_is_readable() {
        let words = heap(1, &[[7.0; 5]]);
        let mut shifted = vec![0u8; 1];
        shifted.extend_from_slice(bytes(&words));
        let descriptor = Descriptor::read(&shifted, 5).unwrap();
        assert_eq!(descriptor.count, 1);
    }

    proptest! {
        #[test]
        fn prop_columns_share_count(values in prop::collection::vec(prop::array::uniform5(-1e4f32..1e4), 0..64)) {
            let words = heap(values.len() as i32, &values);
            let set = ball_set_at(bytes(&words), 4).unwrap();
            prop_assert_eq!(set.count(), values.len());
            for column in [set.x, set.y, set.x_speed, set.y_speed, set.radius] {
                prop_assert_eq!(column.len(), values.len());
            }
            for (i, v) in values.iter().enumerate() {
                let ball = set.get(i).unwrap();
                prop_assert_eq!(ball.position, Vec2::new(v[0], v[1]));
                prop_assert_eq!(ball.radius, v[4]);
            }
        }
    }
}
