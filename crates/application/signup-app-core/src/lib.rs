pub mod app_core;
mod async_runtime;
pub mod controller;
pub mod domain;
pub mod pipeline;

pub use app_core::*;
pub use controller::{ControllerOptions, SignupFormController};
pub use domain::{FormSessionId, FormState};
pub use pipeline::{AvailabilityPipeline, CheckState, PipelineOptions, PublishedOutcome, Revision};
