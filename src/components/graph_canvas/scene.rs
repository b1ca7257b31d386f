//! Declarative description of everything drawn on the surface.
//!
//! A [`Scene`] is rebuilt from props on every change and compared against the
//! previous one, so equal inputs never touch the DOM. Rows are keyed by node id
//! and by `(from, to)` edge pair so the view layer can reuse their elements.

use std::collections::HashMap;

use log::debug;

use super::types::{ComponentGroup, Node, NodeId, VisitRecord};

pub const MARKER_REF_Y: f64 = 4.0;
pub const MARKER_WIDTH: f64 = 12.0;
pub const MARKER_HEIGHT: f64 = 8.0;
pub const MARKER_PATH: &str = "M 0,0 V 8 L12,4 Z";
/// Radius of the overlay drawn around a single-node component.
pub const SINGLETON_RADIUS: f64 = 20.0;

const ID_LABEL_DX: f64 = 1.2;
const VISIT_LABEL_DX: f64 = -1.5;
const LABEL_DY: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
	Default,
	Dragging,
	Traversed,
}

impl MarkerKind {
	pub const ALL: [MarkerKind; 3] = [Self::Default, Self::Dragging, Self::Traversed];

	fn suffix(self) -> &'static str {
		match self {
			Self::Default => "",
			Self::Dragging => "-dragging",
			Self::Traversed => "-traversed",
		}
	}

	/// Element id, scoped to one canvas instance.
	pub fn element_id(self, instance: u32) -> String {
		format!("plot{}-arrowhead{}", instance, self.suffix())
	}

	pub fn url(self, instance: u32) -> String {
		format!("url(#{})", self.element_id(instance))
	}

	pub fn class(self) -> &'static str {
		match self {
			Self::Default => "ArrowHead",
			Self::Dragging => "ArrowHead dragging",
			Self::Traversed => "ArrowHead traversed",
		}
	}

	/// Horizontal anchor; places the tip short of the target's circumference.
	pub fn ref_x(self) -> f64 {
		match self {
			Self::Dragging => 10.0,
			Self::Default | Self::Traversed => 22.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
	Circle { cx: f64, cy: f64, r: f64 },
	Polygon { points: Vec<(f64, f64)> },
}

impl Overlay {
	pub fn class(&self) -> &'static str {
		match self {
			Self::Circle { .. } => "GraphComponent-circle",
			Self::Polygon { .. } => "GraphComponent-poly",
		}
	}
}

/// SVG `points` attribute for a polygon.
pub fn points_attr(points: &[(f64, f64)]) -> String {
	points
		.iter()
		.map(|(x, y)| format!("{},{}", x, y))
		.collect::<Vec<_>>()
		.join(" ")
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeShape {
	pub from: NodeId,
	pub to: NodeId,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub traversed: bool,
}

impl EdgeShape {
	pub fn marker(&self) -> MarkerKind {
		if self.traversed {
			MarkerKind::Traversed
		} else {
			MarkerKind::Default
		}
	}

	pub fn class(&self) -> &'static str {
		if self.traversed { "Edge traversed" } else { "Edge" }
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeShape {
	pub id: NodeId,
	pub x: f64,
	pub y: f64,
	pub r: f64,
	pub selected: bool,
	pub visited: bool,
	pub articulation_point: bool,
	pub current: bool,
	/// 1-based position in the visit order.
	pub visit_position: Option<usize>,
}

impl NodeShape {
	pub fn class(&self, hovered: bool) -> String {
		let flags = [
			(self.selected, "selected"),
			(self.visited, "visited"),
			(self.articulation_point, "articulationPoint"),
			(self.current, "current"),
			(hovered, "hover"),
		];
		flags
			.iter()
			.filter(|(on, _)| *on)
			.fold(String::from("Node"), |mut class, (_, name)| {
				class.push(' ');
				class.push_str(name);
				class
			})
	}

	pub fn id_label_pos(&self) -> (f64, f64) {
		(self.x + self.r * ID_LABEL_DX, self.y + self.r * LABEL_DY)
	}

	pub fn visit_label_pos(&self) -> (f64, f64) {
		(self.x + self.r * VISIT_LABEL_DX, self.y + self.r * LABEL_DY)
	}
}

/// Borrowed props a scene is built from.
pub struct SceneInput<'a> {
	pub done: bool,
	pub nodes: &'a [Node],
	pub components: Option<&'a [ComponentGroup]>,
	pub visit_order: &'a [VisitRecord],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub done: bool,
	pub overlays: Vec<Overlay>,
	pub edges: Vec<EdgeShape>,
	pub nodes: Vec<NodeShape>,
}

impl Scene {
	pub fn build(input: &SceneInput<'_>) -> Self {
		let by_id: HashMap<NodeId, &Node> = input.nodes.iter().rev().map(|n| (n.id, n)).collect();

		let overlays = input
			.components
			.unwrap_or_default()
			.iter()
			.filter_map(|group| overlay_for(group, &by_id))
			.collect();

		let lookup = &by_id;
		let edges = input
			.nodes
			.iter()
			.flat_map(move |node| {
				let children = &node.children;
				children.iter().enumerate().filter_map(move |(i, child_id)| {
					if children[..i].contains(child_id) {
						debug!("skipping repeated edge {} -> {}", node.id, child_id);
						return None;
					}
					let Some(child) = lookup.get(child_id) else {
						debug!("skipping edge {} -> {}: unknown child", node.id, child_id);
						return None;
					};
					Some(EdgeShape {
						from: node.id,
						to: child.id,
						x1: node.x,
						y1: node.y,
						x2: child.x,
						y2: child.y,
						traversed: child.visited_from == Some(node.id),
					})
				})
			})
			.collect();

		let nodes = input
			.nodes
			.iter()
			.map(|node| NodeShape {
				id: node.id,
				x: node.x,
				y: node.y,
				r: node.size,
				selected: node.selected,
				visited: node.visited,
				articulation_point: node.articulation_point,
				current: node.current,
				visit_position: input
					.visit_order
					.iter()
					.position(|v| v.id == node.id)
					.map(|i| i + 1),
			})
			.collect();

		Self {
			done: input.done,
			overlays,
			edges,
			nodes,
		}
	}
}

impl Scene {
	pub fn node_ids(&self) -> Vec<NodeId> {
		self.nodes.iter().map(|n| n.id).collect()
	}

	pub fn node(&self, id: NodeId) -> Option<&NodeShape> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge_keys(&self) -> Vec<(NodeId, NodeId)> {
		self.edges.iter().map(|e| (e.from, e.to)).collect()
	}

	pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&EdgeShape> {
		self.edges.iter().find(|e| e.from == from && e.to == to)
	}
}

fn overlay_for(group: &ComponentGroup, by_id: &HashMap<NodeId, &Node>) -> Option<Overlay> {
	let points: Vec<(f64, f64)> = group
		.iter()
		.filter_map(|id| {
			let node = by_id.get(id);
			if node.is_none() {
				debug!("skipping component member {}: unknown node", id);
			}
			node.map(|n| (n.x, n.y))
		})
		.collect();

	let &(cx, cy) = points.first()?;
	if group.len() == 1 {
		return Some(Overlay::Circle {
			cx,
			cy,
			r: SINGLETON_RADIUS,
		});
	}
	Some(Overlay::Polygon { points })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: NodeId, x: f64, y: f64, children: &[NodeId]) -> Node {
		Node {
			children: children.to_vec(),
			..Node::new(id, x, y, 10.0)
		}
	}

	fn build(nodes: &[Node], components: Option<&[ComponentGroup]>, visits: &[VisitRecord]) -> Scene {
		Scene::build(&SceneInput {
			done: false,
			nodes,
			components,
			visit_order: visits,
		})
	}

	#[test]
	fn identical_props_build_identical_scenes() {
		let nodes = vec![node(1, 10.0, 10.0, &[2]), node(2, 50.0, 60.0, &[1])];
		let groups = vec![vec![1, 2]];
		let visits = [VisitRecord { id: 2 }];
		let a = build(&nodes, Some(groups.as_slice()), &visits);
		let b = build(&nodes, Some(groups.as_slice()), &visits);
		assert_eq!(a, b);
	}

	#[test]
	fn edges_follow_node_then_child_order() {
		let nodes = vec![node(1, 0.0, 0.0, &[3, 2]), node(2, 5.0, 5.0, &[]), node(3, 9.0, 1.0, &[1])];
		let scene = build(&nodes, None, &[]);
		let pairs: Vec<_> = scene.edges.iter().map(|e| (e.from, e.to)).collect();
		assert_eq!(pairs, vec![(1, 3), (1, 2), (3, 1)]);
		let first = &scene.edges[0];
		assert_eq!((first.x1, first.y1, first.x2, first.y2), (0.0, 0.0, 9.0, 1.0));
	}

	#[test]
	fn edge_is_traversed_only_when_child_was_visited_from_parent() {
		let mut child = node(2, 5.0, 5.0, &[]);
		child.visited_from = Some(1);
		let nodes = vec![node(1, 0.0, 0.0, &[2]), child, node(3, 9.0, 9.0, &[2])];
		let scene = build(&nodes, None, &[]);

		assert!(scene.edges[0].traversed);
		assert_eq!(scene.edges[0].marker(), MarkerKind::Traversed);
		assert_eq!(scene.edges[0].class(), "Edge traversed");

		assert!(!scene.edges[1].traversed);
		assert_eq!(scene.edges[1].marker(), MarkerKind::Default);
		assert_eq!(scene.edges[1].class(), "Edge");
	}

	#[test]
	fn unknown_children_are_skipped() {
		let nodes = vec![node(1, 0.0, 0.0, &[7, 2]), node(2, 5.0, 5.0, &[])];
		let scene = build(&nodes, None, &[]);
		assert_eq!(scene.edges.len(), 1);
		assert_eq!(scene.edges[0].to, 2);
		assert_eq!(scene.nodes.len(), 2);
	}

	#[test]
	fn repeated_children_draw_one_edge_per_pair() {
		let nodes = vec![node(1, 0.0, 0.0, &[2, 2]), node(2, 5.0, 5.0, &[1])];
		let scene = build(&nodes, None, &[]);
		assert_eq!(scene.edge_keys(), vec![(1, 2), (2, 1)]);
	}

	#[test]
	fn rows_are_found_by_key() {
		let nodes = vec![node(1, 0.0, 0.0, &[2]), node(2, 5.0, 5.0, &[])];
		let scene = build(&nodes, None, &[]);
		assert_eq!(scene.node_ids(), vec![1, 2]);
		assert_eq!(scene.node(2).map(|n| (n.x, n.y)), Some((5.0, 5.0)));
		assert!(scene.node(3).is_none());
		assert_eq!(scene.edge(1, 2).map(|e| (e.x2, e.y2)), Some((5.0, 5.0)));
		assert!(scene.edge(2, 1).is_none());
	}

	#[test]
	fn visit_label_is_one_based_position() {
		let nodes = vec![node(1, 0.0, 0.0, &[]), node(2, 0.0, 0.0, &[]), node(3, 0.0, 0.0, &[])];
		let visits = [VisitRecord { id: 3 }, VisitRecord { id: 1 }];
		let scene = build(&nodes, None, &visits);
		let positions: Vec<_> = scene.nodes.iter().map(|n| n.visit_position).collect();
		assert_eq!(positions, vec![Some(2), None, Some(1)]);
	}

	#[test]
	fn labels_sit_on_opposite_sides_of_the_node() {
		let scene = build(&[node(4, 100.0, 50.0, &[])], None, &[]);
		let shape = &scene.nodes[0];
		assert_eq!(shape.id_label_pos(), (112.0, 65.0));
		assert_eq!(shape.visit_label_pos(), (85.0, 65.0));
	}

	#[test]
	fn node_class_reflects_flags() {
		let mut n = node(1, 0.0, 0.0, &[]);
		let scene = build(&[n.clone()], None, &[]);
		assert_eq!(scene.nodes[0].class(false), "Node");
		assert_eq!(scene.nodes[0].class(true), "Node hover");

		n.selected = true;
		n.articulation_point = true;
		n.current = true;
		n.visited = true;
		let scene = build(&[n], None, &[]);
		assert_eq!(
			scene.nodes[0].class(false),
			"Node selected visited articulationPoint current"
		);
	}

	#[test]
	fn singleton_component_is_a_circle_and_larger_ones_are_polygons() {
		let nodes = vec![node(1, 1.0, 2.0, &[]), node(2, 3.0, 4.0, &[]), node(3, 5.0, 6.0, &[])];
		let groups = vec![vec![1], vec![3, 2]];
		let scene = build(&nodes, Some(groups.as_slice()), &[]);

		assert_eq!(
			scene.overlays,
			vec![
				Overlay::Circle { cx: 1.0, cy: 2.0, r: SINGLETON_RADIUS },
				Overlay::Polygon { points: vec![(5.0, 6.0), (3.0, 4.0)] },
			]
		);
		assert_eq!(scene.overlays[0].class(), "GraphComponent-circle");
		assert_eq!(scene.overlays[1].class(), "GraphComponent-poly");
	}

	#[test]
	fn groups_without_known_members_draw_nothing() {
		let nodes = vec![node(1, 1.0, 2.0, &[])];
		let groups = vec![vec![], vec![9], vec![9, 8]];
		assert!(build(&nodes, Some(groups.as_slice()), &[]).overlays.is_empty());
		assert!(build(&nodes, None, &[]).overlays.is_empty());
	}

	#[test]
	fn points_attr_joins_pairs_with_spaces() {
		assert_eq!(points_attr(&[(1.0, 2.5), (3.0, 4.0)]), "1,2.5 3,4");
		assert_eq!(points_attr(&[]), "");
	}

	#[test]
	fn markers_are_scoped_to_the_instance() {
		assert_eq!(MarkerKind::Default.element_id(3), "plot3-arrowhead");
		assert_eq!(MarkerKind::Dragging.url(3), "url(#plot3-arrowhead-dragging)");
		assert_eq!(MarkerKind::Traversed.class(), "ArrowHead traversed");
		assert_eq!(MarkerKind::Dragging.ref_x(), 10.0);
		assert_eq!(MarkerKind::Traversed.ref_x(), 22.0);
	}
}
