// Application layer - Use case interactors

pub mod concat_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod render_interactor;

// Re-export interactors
pub use concat_interactor::{ConcatInteractor, ConcatReport};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, InspectResponse};
pub use render_interactor::{
    PlannedStage, RenderInteractor, RenderOutcome, RenderPlan, RenderResult,
};
