use thiserror::Error;

/// Failures a layout run can surface. None of these are recovered
/// internally: a run either places every tag or reports the first error.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("cannot measure {text:?} with font family {font_family:?}")]
    MeasurementUnavailable { text: String, font_family: String },

    #[error("no overlap-free position for {text:?} within radius {max_radius}")]
    PlacementExhausted { text: String, max_radius: f32 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
