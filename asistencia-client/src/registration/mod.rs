//! Employee registration: code sequence resolution and the form workflow

pub mod sequence;
pub mod workflow;

pub use sequence::{ResolvedSequence, SequenceError, SequenceResolver, SequenceSource, resolve};
pub use workflow::{
    LEGACY_SUCCESS_PHRASES, RegistrationWorkflow, SubmitOutcome, WorkflowError, WorkflowPhase,
};
