//! Pointer interaction state for the canvas.
//!
//! Pointer events are fed to [`DragController::step`] as [`PointerMsg`]s.
//! The controller never touches the caller's nodes; it answers with a
//! [`CanvasRequest`] carrying a fresh snapshot for the owner to apply.

use log::debug;

use super::scene::MarkerKind;
use super::types::{GraphType, Node, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging {
		source: NodeId,
		/// Last pointer position; `None` until the first move.
		pointer: Option<(f64, f64)>,
	},
}

/// Pointer input, in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerMsg {
	Press { node: NodeId, x: f64, y: f64 },
	Move { x: f64, y: f64 },
	Release { x: f64, y: f64 },
	Cancel,
	Click { x: f64, y: f64 },
}

/// Mutation the owner is asked to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasRequest {
	AddNode { x: f64, y: f64 },
	UpdateNodes(Vec<Node>),
}

/// The transient edge shown while dragging from a node.
#[derive(Clone, Debug, PartialEq)]
pub struct DragLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub marker: Option<MarkerKind>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragController {
	pub state: DragState,
	/// Swallow the click the browser fires right after a drag ends.
	suppress_click: bool,
}

impl DragController {
	pub fn step(
		&mut self,
		msg: PointerMsg,
		nodes: &[Node],
		graph_type: GraphType,
	) -> Option<CanvasRequest> {
		match (self.state, msg) {
			(DragState::Idle, PointerMsg::Press { node, .. }) => {
				if !nodes.iter().any(|n| n.id == node) {
					return None;
				}
				debug!("drag start from node {}", node);
				self.suppress_click = false;
				self.state = DragState::Dragging {
					source: node,
					pointer: None,
				};
				Some(CanvasRequest::UpdateNodes(with_selected(nodes, node, true)))
			}
			(DragState::Dragging { source, .. }, PointerMsg::Move { x, y }) => {
				self.state = DragState::Dragging {
					source,
					pointer: Some((x, y)),
				};
				None
			}
			(DragState::Dragging { source, .. }, PointerMsg::Release { x, y }) => {
				self.state = DragState::Idle;
				self.suppress_click = true;
				let target = node_at(nodes, x, y).map(|n| n.id);
				let updated = target
					.and_then(|target| connect(nodes, source, target, graph_type))
					.unwrap_or_else(|| with_selected(nodes, source, false));
				debug!("drag end from node {} over {:?}", source, target);
				Some(CanvasRequest::UpdateNodes(updated))
			}
			(DragState::Dragging { source, .. }, PointerMsg::Cancel) => {
				debug!("drag from node {} cancelled", source);
				self.state = DragState::Idle;
				Some(CanvasRequest::UpdateNodes(with_selected(nodes, source, false)))
			}
			(DragState::Idle, PointerMsg::Move { .. }) => {
				// the pointer moved on, so no click belongs to the last drag
				self.suppress_click = false;
				None
			}
			(DragState::Idle, PointerMsg::Click { x, y }) => {
				if std::mem::take(&mut self.suppress_click) {
					return None;
				}
				Some(CanvasRequest::AddNode { x, y })
			}
			_ => None,
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.state, DragState::Dragging { .. })
	}

	/// Whether pointer moves can change this controller.
	pub fn tracks_moves(&self) -> bool {
		self.is_dragging() || self.suppress_click
	}

	pub fn drag_line(&self, nodes: &[Node]) -> Option<DragLine> {
		let DragState::Dragging { source, pointer } = self.state else {
			return None;
		};
		let node = nodes.iter().find(|n| n.id == source)?;
		let line = match pointer {
			None => DragLine {
				x1: node.x,
				y1: node.y,
				x2: node.x,
				y2: node.y,
				marker: None,
			},
			Some((px, py)) => DragLine {
				x1: node.x,
				y1: node.y,
				x2: px - node.size,
				y2: py - node.size,
				marker: Some(MarkerKind::Dragging),
			},
		};
		Some(line)
	}
}

/// First node whose circle's bounding box contains the point.
pub fn node_at(nodes: &[Node], x: f64, y: f64) -> Option<&Node> {
	nodes.iter().find(|n| n.contains(x, y))
}

/// Copy of `nodes` with `selected` set on one node.
pub fn with_selected(nodes: &[Node], id: NodeId, selected: bool) -> Vec<Node> {
	nodes
		.iter()
		.map(|n| {
			if n.id == id {
				Node {
					selected,
					..n.clone()
				}
			} else {
				n.clone()
			}
		})
		.collect()
}

/// Copy of `nodes` with an edge from `source` to `target`, mirrored for
/// undirected graphs. `None` when the edge is a self loop, already exists, or
/// either end is unknown.
pub fn connect(
	nodes: &[Node],
	source: NodeId,
	target: NodeId,
	graph_type: GraphType,
) -> Option<Vec<Node>> {
	if source == target || !nodes.iter().any(|n| n.id == target) {
		return None;
	}
	let from = nodes.iter().find(|n| n.id == source)?;
	if from.has_child(target) {
		return None;
	}

	let updated = nodes
		.iter()
		.map(|n| {
			let mut n = n.clone();
			if n.id == source {
				n.selected = false;
				n.children.push(target);
			}
			if graph_type == GraphType::Undirected && n.id == target && !n.has_child(source) {
				n.children.push(source);
			}
			n
		})
		.collect();
	Some(updated)
}
