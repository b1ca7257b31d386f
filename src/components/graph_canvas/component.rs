use leptos::html::Div;
use leptos::prelude::*;
use log::{info, warn};
use web_sys::{Element, MouseEvent};

use super::error::CanvasError;
use super::render;
use super::scene::{Scene, SceneInput};
use super::state::{CanvasRequest, DragController, PointerMsg};
use super::types::{ComponentGroup, Dimensions, GraphType, Node, NodeId, VisitRecord};

fn measure(plot: u32, container: Option<Element>) -> Result<Dimensions, CanvasError> {
	let container = container.ok_or(CanvasError::ContainerNotMounted(plot))?;
	Ok(Dimensions {
		width: container.client_width() as f64,
		height: container.client_height() as f64,
	})
}

fn local_point(
	plot: u32,
	ev: &MouseEvent,
	container: Option<Element>,
) -> Result<(f64, f64), CanvasError> {
	let rect = container
		.ok_or(CanvasError::ContainerNotMounted(plot))?
		.get_bounding_client_rect();
	Ok((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive node-and-edge editor drawn as SVG.
///
/// The canvas never owns the graph: node creation and edits are requested
/// through `add_node` and `update_nodes`, and the owner feeds the result back
/// through `nodes`. Algorithm state (`visit_order`, `components` and the
/// per-node flags) is only displayed.
#[component]
pub fn GraphCanvas(
	/// Disambiguates several canvases on one page.
	id: u32,
	/// Marks the running algorithm as finished.
	#[prop(into)]
	done: Signal<bool>,
	/// Whether drawn edges are mirrored.
	#[prop(into)]
	graph_type: Signal<GraphType>,
	/// Exposed to owner styling only; drawing reads `Node::current`.
	#[prop(into)]
	current_id: Signal<NodeId>,
	/// The graph to draw.
	#[prop(into)]
	nodes: Signal<Vec<Node>>,
	/// Connected components, outlined behind the graph when present.
	#[prop(optional, into)]
	components: MaybeProp<Vec<ComponentGroup>>,
	/// Traversal order, drawn as 1-based labels.
	#[prop(into)]
	visit_order: Signal<Vec<VisitRecord>>,
	/// Asked for a node at a clicked point.
	#[prop(into)]
	add_node: Callback<(f64, f64)>,
	/// Handed the full replacement node list after a drag.
	#[prop(into)]
	update_nodes: Callback<Vec<Node>>,
	/// Told the container size once it is mounted.
	#[prop(into)]
	initialise_nodes: Callback<Dimensions>,
) -> impl IntoView {
	let container_ref = NodeRef::<Div>::new();
	let drag = RwSignal::new(DragController::default());
	let hovered = RwSignal::new(None::<NodeId>);

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		match measure(id, Some(container.into())) {
			Ok(dims) => {
				if dims.is_empty() {
					warn!("plot {} has no area ({}x{})", id, dims.width, dims.height);
				} else {
					info!("plot {} measured at {}x{}", id, dims.width, dims.height);
				}
				untrack(|| initialise_nodes.run(dims));
			}
			Err(err) => warn!("{}", err),
		}
	});

	let scene = Memo::new(move |_| {
		let components = components.get();
		nodes.with(|nodes| {
			visit_order.with(|visit_order| {
				Scene::build(&SceneInput {
					done: done.get(),
					nodes,
					components: components.as_deref(),
					visit_order,
				})
			})
		})
	});

	// Requests are forwarded only after every borrow of `nodes` is released,
	// since the owner may write to the same signal.
	let dispatch = move |msg: PointerMsg| {
		let graph_type = graph_type.get_untracked();
		let request = nodes.with_untracked(|nodes| {
			drag.try_update(|ctl| ctl.step(msg, nodes, graph_type))
				.flatten()
		});
		match request {
			Some(CanvasRequest::AddNode { x, y }) => add_node.run((x, y)),
			Some(CanvasRequest::UpdateNodes(nodes)) => update_nodes.run(nodes),
			None => {}
		}
	};

	let pointer = move |ev: &MouseEvent| {
		let container = container_ref.get_untracked().map(Element::from);
		local_point(id, ev, container)
			.inspect_err(|err| warn!("{}", err))
			.ok()
	};

	let on_click = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(&ev) {
			dispatch(PointerMsg::Click { x, y });
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		if !drag.with_untracked(DragController::tracks_moves) {
			return;
		}
		if let Some((x, y)) = pointer(&ev) {
			dispatch(PointerMsg::Move { x, y });
		}
	};
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(&ev) {
			dispatch(PointerMsg::Release { x, y });
		}
	};
	let on_mouseleave = move |_: MouseEvent| dispatch(PointerMsg::Cancel);
	let on_press = move |node: NodeId, ev: MouseEvent| {
		// keeps the browser from starting a text selection
		ev.prevent_default();
		if let Some((x, y)) = pointer(&ev) {
			dispatch(PointerMsg::Press { node, x, y });
		}
	};

	let drag_line = move || {
		let line = nodes.with(|nodes| drag.with(|ctl| ctl.drag_line(nodes)));
		line.map(|line| render::drag_line(id, line))
	};

	view! {
		<div
			node_ref=container_ref
			class="GraphCanvas"
			id=format!("plot{}", id)
			style="width: 100%; height: 100%;"
			data-graph-type=move || graph_type.get().to_string()
			data-current-id=move || current_id.get().to_string()
		>
			<svg
				class=move || if scene.with(|s| s.done) { "done" } else { "" }
				width="100%"
				height="100%"
				style="display: block;"
				on:click=on_click
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
			>
				{render::markers(id)}
				{move || render::overlays(scene.get().overlays)}
				{render::edges(id, scene)}
				{drag_line}
				{render::nodes(scene, hovered, on_press)}
			</svg>
		</div>
	}
}
