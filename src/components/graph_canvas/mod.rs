mod component;
mod error;
mod render;
mod scene;
mod state;
mod types;

pub use component::GraphCanvas;
pub use error::CanvasError;
pub use types::{ComponentGroup, Dimensions, GraphType, Node, NodeId, VisitRecord};
