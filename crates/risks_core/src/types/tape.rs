//! AD recording context.
//!
//! A [`Tape`] is the context in which AD operations are recorded. Inputs are
//! registered on it, which links each [`Real`] to a slot on this tape. At
//! most one tape is active per thread; the numerical library consults the
//! active tape when recording.
//!
//! The host boundary never creates, activates, or destroys a tape: it only
//! detects tape proxies and hands out references to them.
//!
//! # Example
//!
//! ```rust
//! use risks_core::types::{Real, Tape};
//!
//! let mut tape = Tape::new();
//! tape.activate().unwrap();
//!
//! let mut rate = Real::new(0.0398);
//! tape.register_input(&mut rate).unwrap();
//! tape.new_recording();
//!
//! assert_eq!(tape.num_inputs(), 1);
//! assert_eq!(Tape::active_id(), Some(tape.id()));
//!
//! tape.deactivate();
//! assert_eq!(Tape::active_id(), None);
//! ```

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::TapeError;
use super::real::{Real, TapeSlot};

static NEXT_TAPE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE_TAPE: Cell<Option<TapeId>> = const { Cell::new(None) };
}

/// Process-unique tape identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TapeId(u64);

impl TapeId {
    /// Returns the raw identifier.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// AD recording context.
#[derive(Debug)]
pub struct Tape {
    id: TapeId,
    /// Number of registered inputs; the next input gets this index.
    num_inputs: u32,
    /// Input count at the last `new_recording` call.
    recording_mark: u32,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates an inactive, empty tape.
    pub fn new() -> Self {
        Self {
            id: TapeId(NEXT_TAPE_ID.fetch_add(1, Ordering::Relaxed)),
            num_inputs: 0,
            recording_mark: 0,
        }
    }

    /// Returns this tape's identifier.
    #[inline]
    pub fn id(&self) -> TapeId {
        self.id
    }

    /// Returns the identifier of the tape active on the current thread.
    pub fn active_id() -> Option<TapeId> {
        ACTIVE_TAPE.with(Cell::get)
    }

    /// Makes this tape the active tape of the current thread.
    ///
    /// Re-activating the tape that is already active is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TapeError::AlreadyActive` if a different tape is active.
    pub fn activate(&self) -> Result<(), TapeError> {
        ACTIVE_TAPE.with(|active| match active.get() {
            Some(id) if id != self.id => Err(TapeError::AlreadyActive { active: id }),
            _ => {
                active.set(Some(self.id));
                Ok(())
            }
        })
    }

    /// Deactivates this tape if it is the active one.
    pub fn deactivate(&self) {
        ACTIVE_TAPE.with(|active| {
            if active.get() == Some(self.id) {
                active.set(None);
            }
        });
    }

    /// Returns `true` if this tape is active on the current thread.
    pub fn is_active(&self) -> bool {
        Self::active_id() == Some(self.id)
    }

    /// Registers `x` as an independent input, linking it to a slot on this tape.
    ///
    /// Registering an input that already belongs to this tape keeps its slot.
    ///
    /// # Errors
    ///
    /// `TapeError::InputLimit` if every slot index is taken; `x` is left
    /// unregistered.
    pub fn register_input(&mut self, x: &mut Real) -> Result<(), TapeError> {
        if x.slot().map(|slot| slot.tape) == Some(self.id) {
            return Ok(());
        }
        let next = self
            .num_inputs
            .checked_add(1)
            .ok_or(TapeError::InputLimit { tape: self.id })?;
        x.set_slot(TapeSlot {
            tape: self.id,
            index: self.num_inputs,
        });
        self.num_inputs = next;
        Ok(())
    }

    /// Registers every element of `inputs`, stopping at the first failure.
    pub fn register_inputs<'a, I>(&mut self, inputs: I) -> Result<(), TapeError>
    where
        I: IntoIterator<Item = &'a mut Real>,
    {
        inputs.into_iter().try_for_each(|x| self.register_input(x))
    }

    /// Starts a new recording after the registered inputs.
    pub fn new_recording(&mut self) {
        self.recording_mark = self.num_inputs;
    }

    /// Returns the number of registered inputs.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs as usize
    }

    /// Returns the input count at the start of the current recording.
    #[inline]
    pub fn recording_mark(&self) -> usize {
        self.recording_mark as usize
    }
}

impl Drop for Tape {
    fn drop(&mut self) {
        self.deactivate();
    }
}
