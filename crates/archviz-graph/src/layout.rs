//! Incremental layout: bottom-up circle packing, then a per-level
//! force-directed refinement that pulls dependent siblings together.

use crate::pack::{enclose, pack_siblings, Circle};
use crate::tree::{NodeId, Tree};
use crate::vector::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visual styling knobs; mutable at runtime, the next relayout picks them up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyles {
    /// Minimum gap kept between sibling circles while packing.
    pub circle_padding: f64,
    /// Padding between a node's label and the rim of its circle.
    pub circle_text_padding: f64,
    /// Lower bound for the radius of nodes that have children.
    pub min_node_radius: f64,
    pub node_font_size: f64,
}

impl Default for LayoutStyles {
    fn default() -> Self {
        Self {
            circle_padding: 10.0,
            circle_text_padding: 5.0,
            min_node_radius: 40.0,
            node_font_size: 10.0,
        }
    }
}

/// Label-width collaborator; the view layer injects a real text metric, tests
/// and headless use stay with [`CharCountMeasure`].
pub trait TextMeasure {
    fn width(&self, text: &str) -> f64;
}

/// Deterministic approximation: a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharCountMeasure {
    pub char_width: f64,
}

impl Default for CharCountMeasure {
    fn default() -> Self {
        Self { char_width: 7.0 }
    }
}

impl TextMeasure for CharCountMeasure {
    fn width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

pub struct LayoutEngine {
    pub styles: LayoutStyles,
    measure: Box<dyn TextMeasure>,
    /// Iterations of the per-level link simulation; 0 disables refinement.
    pub force_iterations: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutStyles::default(), Box::new(CharCountMeasure::default()))
    }
}

impl LayoutEngine {
    pub const DEFAULT_FORCE_ITERATIONS: usize = 30;
    const SEPARATION_SWEEPS: usize = 50;

    pub fn new(styles: LayoutStyles, measure: Box<dyn TextMeasure>) -> Self {
        Self {
            styles,
            measure,
            force_iterations: Self::DEFAULT_FORCE_ITERATIONS,
        }
    }

    /// Recomputes radius and position of every currently visible node.
    ///
    /// `links` are the endpoints of the currently visible dependencies; they
    /// only influence the refinement step.
    pub fn relayout(&self, tree: &mut Tree, links: &[(String, String)]) {
        let root = tree.root();
        self.size_subtree(tree, root);
        let radius = tree.node(root).radius();
        // Top-left anchored canvas: the root circle touches both axes.
        tree.set_offset(root, Vec2::new(radius, radius));
        if self.force_iterations > 0 {
            self.refine(tree, links);
        }
    }

    pub fn label_radius(&self, name: &str) -> f64 {
        self.measure.width(name) / 2.0 + self.styles.circle_text_padding
    }

    fn node_radius(&self, tree: &Tree, id: NodeId) -> f64 {
        let node = tree.node(id);
        let label = self.label_radius(node.name());
        if node.original_children().is_empty() {
            label
        } else {
            label.max(self.styles.min_node_radius)
        }
    }

    /// The compact radius of a collapsed circle: the smallest sibling radius
    /// captured at fold time, but never smaller than its label.
    fn folded_radius(&self, tree: &Tree, id: NodeId) -> f64 {
        let node = tree.node(id);
        self.label_radius(node.name()).max(node.folded_radius.unwrap_or(0.0))
    }

    fn size_subtree(&self, tree: &mut Tree, id: NodeId) {
        let children: Vec<NodeId> = tree.current_children(id).to_vec();
        if children.is_empty() {
            let radius = if tree.node(id).is_folded() {
                self.folded_radius(tree, id)
            } else {
                self.node_radius(tree, id)
            };
            tree.set_radius(id, radius);
            return;
        }

        for &child in &children {
            self.size_subtree(tree, child);
        }

        // Inflate by the padding, pack, then deflate: tangent circles end up
        // two paddings apart.
        let padding = self.styles.circle_padding;
        let mut circles: Vec<Circle> = children
            .iter()
            .map(|&child| Circle::new(0.0, 0.0, tree.node(child).radius() + padding))
            .collect();
        pack_siblings(&mut circles);
        let enclosing = enclose(&circles);
        for circle in &mut circles {
            circle.r -= padding;
        }

        let single_child_min = if children.len() == 1 { circles[0].r * 3.0 } else { 0.0 };
        let radius = enclosing
            .r
            .max(self.node_radius(tree, id))
            .max(single_child_min);
        tree.set_radius(id, radius);
        for (&child, circle) in children.iter().zip(&circles) {
            tree.set_offset(child, circle.center() - enclosing.center());
        }
    }

    /// Level-by-level link simulation, breadth-first from the root: settled
    /// ancestor levels stay fixed while each level is nudged against the
    /// links mapped onto it, kept overlap-free and inside its parents.
    fn refine(&self, tree: &mut Tree, links: &[(String, String)]) {
        let visible = tree.visible_descendants(tree.root());
        let max_depth = visible.iter().map(|&id| tree.depth(id)).max().unwrap_or(0);

        for depth in 1..=max_depth {
            let members: Vec<NodeId> = visible
                .iter()
                .copied()
                .filter(|&id| tree.depth(id) == depth)
                .collect();
            if members.len() < 2 {
                continue;
            }

            let index_of: HashMap<NodeId, usize> =
                members.iter().enumerate().map(|(i, &id)| (id, i)).collect();
            let mut level_links: Vec<(usize, usize)> = links
                .iter()
                .filter_map(|(from, to)| {
                    let a = self.ancestor_at_depth(tree, from, depth)?;
                    let b = self.ancestor_at_depth(tree, to, depth)?;
                    if a == b {
                        return None;
                    }
                    Some((*index_of.get(&a)?, *index_of.get(&b)?))
                })
                .collect();
            level_links.sort_unstable();
            level_links.dedup();
            if level_links.is_empty() {
                continue;
            }

            let radii: Vec<f64> = members.iter().map(|&id| tree.node(id).radius()).collect();
            let parents: Vec<NodeId> = members
                .iter()
                .map(|&id| tree.node(id).parent().expect("depth >= 1"))
                .collect();
            let parent_centers: Vec<Vec2> =
                parents.iter().map(|&p| tree.absolute_position(p)).collect();
            let limits: Vec<f64> = parents
                .iter()
                .zip(&radii)
                .map(|(&p, &r)| (tree.node(p).radius() - r).max(0.0))
                .collect();
            let mut positions: Vec<Vec2> =
                members.iter().map(|&id| tree.absolute_position(id)).collect();

            for iteration in 0..self.force_iterations {
                let alpha = 0.3 * (1.0 - iteration as f64 / self.force_iterations as f64);
                for &(i, j) in &level_links {
                    let delta = positions[j] - positions[i];
                    let dist = delta.length().max(1e-6);
                    let desired = radii[i] + radii[j] + self.styles.circle_padding;
                    let shift = delta.norm((dist - desired) * 0.5 * alpha);
                    positions[i] += shift;
                    positions[j] = positions[j] - shift;
                }
                separate_siblings(&mut positions, &radii, &parents);
                clamp_into_parents(&mut positions, &parent_centers, &limits);
            }
            for _ in 0..Self::SEPARATION_SWEEPS {
                let moved = separate_siblings(&mut positions, &radii, &parents);
                clamp_into_parents(&mut positions, &parent_centers, &limits);
                if !moved {
                    break;
                }
            }

            for (index, &id) in members.iter().enumerate() {
                tree.set_offset(id, positions[index] - parent_centers[index]);
            }
        }
    }

    fn ancestor_at_depth(&self, tree: &Tree, full_name: &str, depth: usize) -> Option<NodeId> {
        let mut id = tree.get(full_name)?;
        let mut current = tree.depth(id);
        if current < depth {
            return None;
        }
        while current > depth {
            id = tree.node(id).parent()?;
            current -= 1;
        }
        Some(id)
    }
}

/// Pushes overlapping same-parent circles apart symmetrically; returns
/// whether anything moved.
fn separate_siblings(positions: &mut [Vec2], radii: &[f64], parents: &[NodeId]) -> bool {
    let mut moved = false;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if parents[i] != parents[j] {
                continue;
            }
            let delta = positions[j] - positions[i];
            let dist = delta.length();
            let min_dist = radii[i] + radii[j];
            if dist + 1e-9 >= min_dist {
                continue;
            }
            let direction = if dist > 1e-9 {
                delta.norm(1.0)
            } else {
                Vec2::new(1.0, 0.0)
            };
            let push = direction * ((min_dist - dist) / 2.0);
            positions[i] = positions[i] - push;
            positions[j] += push;
            moved = true;
        }
    }
    moved
}

fn clamp_into_parents(positions: &mut [Vec2], parent_centers: &[Vec2], limits: &[f64]) {
    for i in 0..positions.len() {
        let rel = positions[i] - parent_centers[i];
        if rel.length() > limits[i] {
            positions[i] = parent_centers[i] + rel.norm(limits[i]);
        }
    }
}
