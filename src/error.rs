//! Fault types for the engine contract and the frame loop
//!
//! Every variant of [`IntegrationFault`] is fatal: the loop stops and the
//! diagnostic is surfaced to the host. There is no recoverable path.
//! [`IntegrationFault::LoopStopped`] only reports a loop the host ended.

use thiserror::Error;

/// The engine contract was violated, or the controller was driven out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationFault {
    #[error("engine is not ready (called `{operation}`)")]
    EngineNotReady { operation: &'static str },

    #[error("frame loop has not been initialized")]
    NotInitialized,

    #[error("frame loop was already initialized")]
    AlreadyInitialized,

    #[error("frame loop halted after an earlier fault")]
    LoopHalted,

    /// The host refused a frame earlier; nothing went wrong.
    #[error("frame loop stopped because the host stopped delivering frames")]
    LoopStopped,

    #[error("engine returned a null descriptor address")]
    NullDescriptor,

    #[error("descriptor at {address:#x} lies outside engine memory ({memory_len} bytes)")]
    DescriptorOutOfBounds { address: u32, memory_len: usize },

    #[error("descriptor reports a negative ball count ({0})")]
    NegativeCount(i32),

    #[error("`{column}` column address is null for {count} balls")]
    NullColumn { column: &'static str, count: usize },

    #[error("`{column}` column at {address:#x} ({count} balls) lies outside engine memory ({memory_len} bytes)")]
    ColumnOutOfBounds {
        column: &'static str,
        address: u32,
        count: usize,
        memory_len: usize,
    },

    #[error("`{column}` column at {address:#x} is not aligned for f32")]
    MisalignedColumn { column: &'static str, address: u32 },
}

/// The host stopped delivering frame callbacks.
///
/// Not an error from the loop's point of view: the loop simply ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("host stopped delivering frames")]
pub struct SchedulerStopped;
