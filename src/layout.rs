//! Force-directed placement for graphs seeded by the owner.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::components::graph_canvas::{Dimensions, Node, NodeId};

/// Distance kept between any node center and the edge of the surface.
pub const MARGIN: f64 = 30.0;

const TICK: f32 = 0.016;

/// Returns `nodes` repositioned by running `ticks` steps of a force
/// simulation, centered in and clamped to `dims`. Ids, sizes, children and
/// flags are preserved.
pub fn settle(nodes: &[Node], dims: Dimensions, ticks: usize) -> Vec<Node> {
	if nodes.is_empty() {
		return Vec::new();
	}

	let mut graph: ForceGraph<NodeId, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let (cx, cy) = (dims.width / 2.0, dims.height / 2.0);
	let radius = dims.width.min(dims.height) / 4.0;

	let mut id_to_idx = HashMap::new();
	for (i, node) in nodes.iter().enumerate() {
		let angle = (i as f64) * 2.0 * PI / nodes.len() as f64;
		let idx = graph.add_node(NodeData {
			x: (cx + radius * angle.cos()) as f32,
			y: (cy + radius * angle.sin()) as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: node.id,
		});
		id_to_idx.insert(node.id, idx);
	}

	// mirrored children of undirected graphs become a single spring
	let mut linked = HashSet::new();
	for node in nodes {
		for child in &node.children {
			let pair = (node.id.min(*child), node.id.max(*child));
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&node.id), id_to_idx.get(child)) {
				if src != tgt && linked.insert(pair) {
					graph.add_edge(src, tgt, EdgeData::default());
				}
			}
		}
	}

	for _ in 0..ticks {
		graph.update(TICK);
	}

	let mut positions = HashMap::new();
	graph.visit_nodes(|node| {
		positions.insert(node.data.user_data, (node.x() as f64, node.y() as f64));
	});

	let count = positions.len() as f64;
	let (sum_x, sum_y) = positions
		.values()
		.fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
	let (dx, dy) = (cx - sum_x / count, cy - sum_y / count);

	nodes
		.iter()
		.map(|node| {
			let (x, y) = positions.get(&node.id).copied().unwrap_or((cx, cy));
			Node {
				x: clamp_axis(x + dx, dims.width),
				y: clamp_axis(y + dy, dims.height),
				..node.clone()
			}
		})
		.collect()
}

fn clamp_axis(value: f64, extent: f64) -> f64 {
	if extent <= 2.0 * MARGIN {
		return extent / 2.0;
	}
	value.clamp(MARGIN, extent - MARGIN)
}
