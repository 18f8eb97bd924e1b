//! Tape reference access.
//!
//! The adapter only recognises tape proxies and lends out the handle they
//! hold. It never creates, activates, deactivates or drops a tape.

use risks_core::types::Tape;

use crate::error::{BridgeError, BridgeResult};
use crate::host::{HostObject, Shared};

/// Returns `true` if `object` is a tape proxy.
pub fn is_tape(object: &HostObject) -> bool {
    matches!(object, HostObject::Tape(_))
}

/// Borrows the tape behind a proxy.
///
/// The returned handle is borrowed from `object`, so the tape's reference
/// count is unchanged.
///
/// # Errors
///
/// `BridgeError::Cast` if `object` is not a tape proxy.
pub fn tape_ref(object: &HostObject) -> BridgeResult<&Shared<Tape>> {
    match object {
        HostObject::Tape(tape) => Ok(tape),
        other => Err(BridgeError::cast("Tape", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risks_core::types::Real;

    #[test]
    fn test_is_tape() {
        assert!(is_tape(&HostObject::Tape(Shared::new(Tape::new()))));
        assert!(!is_tape(&HostObject::Float(1.0)));
        assert!(!is_tape(&HostObject::None));
    }

    #[test]
    fn test_tape_ref_leaves_lifecycle_alone() {
        let handle = Shared::new(Tape::new());
        let proxy = HostObject::Tape(handle.clone());
        assert_eq!(handle.strong_count(), 2);

        let tape = tape_ref(&proxy).unwrap();
        assert_eq!(handle.strong_count(), 2);
        assert!(tape.ptr_eq(&handle));
        assert!(!tape.borrow().is_active());
    }

    #[test]
    fn test_tape_ref_mutation_is_shared() {
        let proxy = HostObject::Tape(Shared::new(Tape::new()));
        let alias = proxy.clone();

        let mut x = Real::new(2.0);
        tape_ref(&proxy).unwrap().borrow_mut().register_input(&mut x).unwrap();

        assert_eq!(tape_ref(&alias).unwrap().borrow().num_inputs(), 1);
        assert!(x.is_registered());
    }

    #[test]
    fn test_tape_ref_rejects_other_objects() {
        assert_eq!(
            tape_ref(&HostObject::Float(1.0)).unwrap_err(),
            BridgeError::Cast {
                expected: "Tape",
                found: "float".to_string()
            }
        );
    }
}
