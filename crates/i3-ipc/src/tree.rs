//! Layout tree as returned by `GET_TREE`.

use serde::Deserialize;

/// A container in the i3 layout tree.
///
/// Only the fields i3flash needs are decoded; everything else in the reply is
/// ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Internal container id.
    #[serde(default)]
    pub id: u64,
    /// Whether this container has input focus.
    #[serde(default)]
    pub focused: bool,
    /// X11 window id for containers holding a client window.
    #[serde(default)]
    pub window: Option<u32>,
    /// Tiling children.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Floating children.
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

impl Node {
    /// Find the focused container, searching depth-first through tiling and
    /// floating children.
    pub fn find_focused(&self) -> Option<&Self> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.focused {
                return Some(node);
            }
            stack.extend(node.floating_nodes.iter().rev());
            stack.extend(node.nodes.iter().rev());
        }
        None
    }

    /// X11 window of the focused container, if it holds one.
    pub fn focused_window(&self) -> Option<u32> {
        self.find_focused().and_then(|n| n.window)
    }
}
