//! Layout tree management

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, SlotMap};
use taffy::prelude::*;

use crate::element::ElementBounds;
use crate::text_measure::{measure_text_with_options, TextLayoutOptions};

new_key_type! {
    pub struct LayoutNodeId;
}

impl LayoutNodeId {
    /// Raw u64 form, for logs and type-erased storage
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// Context stored with text nodes so taffy can measure them during layout
#[derive(Clone, Debug)]
pub struct TextMeasureContext {
    pub content: String,
    pub font_size: f32,
    /// Line height multiplier
    pub line_height: f32,
}

fn text_measure_function(
    known_dimensions: Size<Option<f32>>,
    _available_space: Size<AvailableSpace>,
    _node_id: NodeId,
    node_context: Option<&mut TextMeasureContext>,
    _style: &Style,
) -> Size<f32> {
    if let (Some(width), Some(height)) = (known_dimensions.width, known_dimensions.height) {
        return Size { width, height };
    }

    let Some(ctx) = node_context else {
        return Size::ZERO;
    };

    // Labels in this toolkit never wrap
    let options = TextLayoutOptions::new().with_line_height(ctx.line_height);
    let metrics = measure_text_with_options(&ctx.content, ctx.font_size, &options);

    Size {
        width: known_dimensions.width.unwrap_or(metrics.width),
        height: known_dimensions.height.unwrap_or(metrics.height),
    }
}

/// Maps between Strata node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree<TextMeasureContext>,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    reverse_map: FxHashMap<NodeId, LayoutNodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
            reverse_map: FxHashMap::default(),
        }
    }

    fn register(&mut self, taffy_node: Option<NodeId>) -> LayoutNodeId {
        match taffy_node {
            Some(taffy_node) => {
                let id = self.node_map.insert(taffy_node);
                self.reverse_map.insert(taffy_node, id);
                id
            }
            None => {
                tracing::warn!("taffy refused to create a node");
                LayoutNodeId::null()
            }
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> LayoutNodeId {
        let node = self.taffy.new_leaf(style).ok();
        self.register(node)
    }

    /// Create a text node that taffy measures through [`TextMeasureContext`]
    pub fn create_text_node(&mut self, style: Style, context: TextMeasureContext) -> LayoutNodeId {
        let node = self.taffy.new_leaf_with_context(style, context).ok();
        self.register(node)
    }

    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) {
        if let Some(&taffy_node) = self.node_map.get(id) {
            let _ = self.taffy.set_style(taffy_node, style);
        }
    }

    /// The style a node was created with
    pub fn style(&self, id: LayoutNodeId) -> Option<&Style> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.style(taffy_node).ok())
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) {
        if let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        {
            let _ = self.taffy.add_child(parent_node, child_node);
        }
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(&mut self, root: LayoutNodeId, available_space: Size<AvailableSpace>) {
        if let Some(&taffy_node) = self.node_map.get(root) {
            let _ = self.taffy.compute_layout_with_measure(
                taffy_node,
                available_space,
                text_measure_function,
            );
        }
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    pub fn node_exists(&self, id: LayoutNodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Get children of a layout node, in insertion order
    pub fn children(&self, parent: LayoutNodeId) -> Vec<LayoutNodeId> {
        let Some(&taffy_node) = self.node_map.get(parent) else {
            return Vec::new();
        };

        let Ok(children) = self.taffy.children(taffy_node) else {
            return Vec::new();
        };

        children
            .iter()
            .filter_map(|child_taffy| self.reverse_map.get(child_taffy).copied())
            .collect()
    }

    /// Get computed layout as ElementBounds with parent offset
    pub fn get_bounds(&self, id: LayoutNodeId, parent_offset: (f32, f32)) -> Option<ElementBounds> {
        self.get_layout(id)
            .map(|layout| ElementBounds::from_layout(layout, parent_offset))
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_distributes_width_to_growing_child() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size {
                width: length(200.0),
                height: length(20.0),
            },
            ..Default::default()
        });
        let fixed = tree.create_node(Style {
            size: Size {
                width: length(50.0),
                height: auto(),
            },
            ..Default::default()
        });
        let grow = tree.create_node(Style {
            flex_grow: 1.0,
            ..Default::default()
        });
        tree.add_child(root, fixed);
        tree.add_child(root, grow);

        tree.compute_layout(root, Size::MAX_CONTENT);

        assert_eq!(tree.children(root), vec![fixed, grow]);
        let grow_bounds = tree.get_bounds(grow, (0.0, 0.0)).unwrap();
        assert_eq!(grow_bounds.x, 50.0);
        assert_eq!(grow_bounds.width, 150.0);
    }

    #[test]
    fn test_text_node_is_measured() {
        let mut tree = LayoutTree::new();
        let text = tree.create_text_node(
            Style::default(),
            TextMeasureContext {
                content: "abcd".into(),
                font_size: 10.0,
                line_height: 1.2,
            },
        );

        tree.compute_layout(text, Size::MAX_CONTENT);

        let layout = tree.get_layout(text).unwrap();
        assert!((layout.size.width - 22.0).abs() < 0.01);
        assert!((layout.size.height - 12.0).abs() < 0.01);
    }
}
