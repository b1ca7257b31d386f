use thiserror::Error;

/// Failures at the boundary between the canvas and the browser DOM.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
	/// The container `<div>` of the given plot is not attached yet.
	#[error("canvas container for plot {0} is not mounted")]
	ContainerNotMounted(u32),
}
