use leptos::prelude::*;
use log::info;

use crate::components::graph_canvas::{
	Dimensions, GraphCanvas, GraphType, Node, NodeId, VisitRecord,
};
use crate::layout;

/// Radius of every node created on this page.
pub const NODE_SIZE: f64 = 10.0;
const SAMPLE_NODES: u32 = 8;
const SETTLE_TICKS: usize = 300;

/// Sample tree with deterministic parents, unplaced.
fn generate_sample_nodes(n: u32) -> Vec<Node> {
	let mut nodes: Vec<Node> = (0..n).map(|id| Node::new(id, 0.0, 0.0, NODE_SIZE)).collect();
	for i in 1..n {
		let parent = (rand_simple(i as usize) * i as f64) as usize;
		nodes[parent].children.push(i);
	}
	nodes
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn next_id(nodes: &[Node]) -> NodeId {
	nodes.iter().map(|n| n.id + 1).max().unwrap_or(0)
}

/// Owns the graph and hands it to a single canvas.
#[component]
pub fn Home() -> impl IntoView {
	let nodes = RwSignal::new(Vec::<Node>::new());
	let graph_type = RwSignal::new(GraphType::Directed);
	let visit_order = Signal::derive(Vec::<VisitRecord>::new);

	let add_node = move |(x, y): (f64, f64)| {
		nodes.update(|nodes| {
			let id = next_id(nodes);
			nodes.push(Node::new(id, x, y, NODE_SIZE));
		});
	};
	let update_nodes = move |updated: Vec<Node>| nodes.set(updated);
	let initialise_nodes = move |dims: Dimensions| {
		info!("seeding {} nodes into {}x{}", SAMPLE_NODES, dims.width, dims.height);
		let sample = generate_sample_nodes(SAMPLE_NODES);
		nodes.set(layout::settle(&sample, dims, SETTLE_TICKS));
	};

	view! {
		<div class="graph-page">
			<div class="graph-toolbar">
				<button on:click=move |_| graph_type.update(|t| *t = t.toggled())>
					{move || format!("Edges: {}", graph_type.get())}
				</button>
				<button on:click=move |_| nodes.set(Vec::new())>"Clear"</button>
				<p class="subtitle">
					"Click to add a node. Drag from one node to another to connect them."
				</p>
			</div>
			<GraphCanvas
				id=0
				done=false
				graph_type=graph_type
				current_id=0u32
				nodes=nodes
				visit_order=visit_order
				add_node=add_node
				update_nodes=update_nodes
				initialise_nodes=initialise_nodes
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_is_a_tree_over_all_nodes() {
		let nodes = generate_sample_nodes(SAMPLE_NODES);
		assert_eq!(nodes.len(), SAMPLE_NODES as usize);
		let edges: usize = nodes.iter().map(|n| n.children.len()).sum();
		assert_eq!(edges, SAMPLE_NODES as usize - 1);
		// parents always precede their children
		for node in &nodes {
			assert!(node.children.iter().all(|&c| c > node.id));
		}
	}

	#[test]
	fn next_id_follows_the_largest_id() {
		assert_eq!(next_id(&[]), 0);
		let nodes = vec![Node::new(4, 0.0, 0.0, NODE_SIZE), Node::new(2, 0.0, 0.0, NODE_SIZE)];
		assert_eq!(next_id(&nodes), 5);
	}
}
