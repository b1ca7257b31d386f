use strum::{AsRefStr, Display, EnumString};

/// Identifier of a node; unique within one graph.
pub type NodeId = u32;

/// A graph vertex as owned by the parent state container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
	/// Unique id, also drawn as the node label.
	pub id: NodeId,
	/// Horizontal center, in container pixels.
	pub x: f64,
	/// Vertical center, in container pixels.
	pub y: f64,
	/// Circle radius.
	pub size: f64,
	/// Outgoing edges, in insertion order.
	pub children: Vec<NodeId>,
	/// Source of the drag in progress.
	pub selected: bool,
	/// Reached by the running traversal.
	pub visited: bool,
	/// Being processed by the running traversal.
	pub current: bool,
	/// Removing it would disconnect its component.
	pub articulation_point: bool,
	/// Parent through which the traversal reached this node.
	pub visited_from: Option<NodeId>,
}

impl Node {
	/// Unselected, unvisited node without children.
	pub fn new(id: NodeId, x: f64, y: f64, size: f64) -> Self {
		Self {
			id,
			x,
			y,
			size,
			..Self::default()
		}
	}

	/// Whether an edge to `id` already leaves this node.
	pub fn has_child(&self, id: NodeId) -> bool {
		self.children.contains(&id)
	}

	/// Bounding-box hit test: the point lies within one radius on both axes.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(self.x - x).abs() < self.size && (self.y - y).abs() < self.size
	}
}

/// One step of a traversal; its position in the visit order is the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisitRecord {
	/// The visited node.
	pub id: NodeId,
}

/// Node ids belonging to one connected component.
pub type ComponentGroup = Vec<NodeId>;

/// Whether a drawn edge is mirrored in the reverse direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GraphType {
	/// Edges go from parent to child only.
	#[default]
	Directed,
	/// Every drawn edge also gets its reverse.
	Undirected,
}

impl GraphType {
	/// The other graph type.
	pub fn toggled(self) -> Self {
		match self {
			Self::Directed => Self::Undirected,
			Self::Undirected => Self::Directed,
		}
	}
}

/// Rendered pixel size of the canvas container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
	/// Client width in pixels.
	pub width: f64,
	/// Client height in pixels.
	pub height: f64,
}

impl Dimensions {
	/// True when either side has no extent, e.g. a hidden container.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn graph_type_round_trips_through_lowercase_names() {
		assert_eq!("directed".parse::<GraphType>(), Ok(GraphType::Directed));
		assert_eq!("undirected".parse::<GraphType>(), Ok(GraphType::Undirected));
		assert!("sideways".parse::<GraphType>().is_err());
		assert_eq!(GraphType::Undirected.to_string(), "undirected");
		assert_eq!(GraphType::Directed.as_ref(), "directed");
	}

	#[test]
	fn graph_type_defaults_to_directed_and_toggles() {
		assert_eq!(GraphType::default(), GraphType::Directed);
		assert_eq!(GraphType::Directed.toggled(), GraphType::Undirected);
		assert_eq!(GraphType::Undirected.toggled(), GraphType::Directed);
	}

	#[test]
	fn contains_uses_radius_on_both_axes() {
		let node = Node::new(1, 100.0, 100.0, 10.0);
		assert!(node.contains(100.0, 100.0));
		assert!(node.contains(109.0, 91.0));
		// corner of the bounding box is inside even though it is outside the circle
		assert!(node.contains(108.0, 108.0));
		assert!(!node.contains(110.0, 100.0));
		assert!(!node.contains(100.0, 89.0));
	}

	#[test]
	fn hidden_containers_have_empty_dimensions() {
		assert!(Dimensions::default().is_empty());
		assert!(Dimensions { width: 640.0, height: 0.0 }.is_empty());
		assert!(!Dimensions { width: 640.0, height: 480.0 }.is_empty());
	}

	#[test]
	fn new_node_has_no_children_or_flags() {
		let node = Node::new(3, 1.0, 2.0, 10.0);
		assert!(node.children.is_empty());
		assert!(!node.selected && !node.visited && !node.current && !node.articulation_point);
		assert_eq!(node.visited_from, None);
		assert!(!node.has_child(3));
	}
}
