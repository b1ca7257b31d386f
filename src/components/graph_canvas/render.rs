use leptos::prelude::*;

use super::scene::{
	EdgeShape, MARKER_HEIGHT, MARKER_PATH, MARKER_REF_Y, MARKER_WIDTH, MarkerKind, NodeShape,
	Overlay, Scene, points_attr,
};
use super::state::DragLine;
use super::types::NodeId;

pub fn markers(instance: u32) -> impl IntoView {
	let markers = MarkerKind::ALL
		.into_iter()
		.map(|kind| {
			view! {
				<marker
					id=kind.element_id(instance)
					class=kind.class()
					refX=kind.ref_x()
					refY=MARKER_REF_Y
					markerWidth=MARKER_WIDTH
					markerHeight=MARKER_HEIGHT
					orient="auto"
				>
					<path d=MARKER_PATH />
				</marker>
			}
		})
		.collect_view();

	view! { <defs>{markers}</defs> }
}

pub fn overlays(overlays: Vec<Overlay>) -> impl IntoView {
	overlays
		.into_iter()
		.map(|overlay| {
			let class = overlay.class();
			match overlay {
				Overlay::Circle { cx, cy, r } => {
					view! { <circle class=class cx=cx cy=cy r=r /> }.into_any()
				}
				Overlay::Polygon { points } => {
					view! { <polygon class=class points=points_attr(&points) /> }.into_any()
				}
			}
		})
		.collect_view()
}

/// One line per edge, keyed by `(from, to)`; a kept line only has its
/// attributes updated.
pub fn edges(instance: u32, scene: Memo<Scene>) -> impl IntoView {
	view! {
		<For
			each=move || scene.with(Scene::edge_keys)
			key=|pair| *pair
			children=move |(from, to)| {
				let edge = Memo::new(move |_| {
					scene.with(|s| s.edge(from, to).cloned().unwrap_or_default())
				});
				view! {
					<line
						class=move || edge.with(EdgeShape::class)
						marker-end=move || edge.with(|e| e.marker().url(instance))
						x1=move || edge.with(|e| e.x1)
						y1=move || edge.with(|e| e.y1)
						x2=move || edge.with(|e| e.x2)
						y2=move || edge.with(|e| e.y2)
					/>
				}
			}
		/>
	}
}

pub fn drag_line(instance: u32, line: DragLine) -> impl IntoView {
	view! {
		<line
			class="Edge dragging"
			marker-end=line.marker.map(|m| m.url(instance))
			x1=line.x1
			y1=line.y1
			x2=line.x2
			y2=line.y2
		/>
	}
}

/// Circle plus labels for every node, keyed by id so the circle under the
/// pointer survives updates made while dragging from it.
pub fn nodes(
	scene: Memo<Scene>,
	hovered: RwSignal<Option<NodeId>>,
	on_press: impl Fn(NodeId, web_sys::MouseEvent) + Copy + Send + 'static,
) -> impl IntoView {
	view! {
		<For
			each=move || scene.with(Scene::node_ids)
			key=|id| *id
			children=move |id| {
				let shape = Memo::new(move |_| {
					scene.with(|s| s.node(id).cloned().unwrap_or_default())
				});
				node(id, shape, hovered, on_press)
			}
		/>
	}
}

fn node(
	id: NodeId,
	shape: Memo<NodeShape>,
	hovered: RwSignal<Option<NodeId>>,
	on_press: impl Fn(NodeId, web_sys::MouseEvent) + 'static,
) -> impl IntoView {
	let visit_label = move || {
		shape.with(|s| s.visit_position.map(|position| (position, s.visit_label_pos()))).map(
			|(position, (x, y))| {
				view! {
					<text class="Node-visitLabel" id=format!("visitlabel-{}", id) x=x y=y>
						{position}
					</text>
				}
			},
		)
	};

	view! {
		<circle
			class=move || shape.with(|s| s.class(hovered.get() == Some(id)))
			id=format!("node-{}", id)
			cx=move || shape.with(|s| s.x)
			cy=move || shape.with(|s| s.y)
			r=move || shape.with(|s| s.r)
			on:mouseenter=move |_| hovered.set(Some(id))
			on:mouseleave=move |_| hovered.set(None)
			on:mousedown=move |ev| on_press(id, ev)
		/>
		<text
			class="Node-label"
			id=format!("label-{}", id)
			x=move || shape.with(|s| s.id_label_pos().0)
			y=move || shape.with(|s| s.id_label_pos().1)
		>
			{id}
		</text>
		{visit_label}
	}
}
