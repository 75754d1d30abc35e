//! Retained drawing surface.
//!
//! A chart draws into a small tree of nodes (groups, polylines, circles,
//! rectangles, text) instead of straight onto a backend. The tree stays alive
//! for the life of the chart so the tooltip can move and relabel its nodes in
//! place; backends repaint from it whenever they need a frame.
use plotters::style::RGBAColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Horizontal alignment of a text node relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub content: String,
    pub x: f64,
    pub y: f64,
    /// Pixel shift along the text direction.
    pub dx: f64,
    /// Shift perpendicular to the text direction, in `em` of the node's font.
    pub dy_em: f64,
    pub anchor: TextAnchor,
    /// Multiplier on the surface base font size.
    pub font_scale: f64,
    /// Rotated 90° counter-clockwise (reads bottom to top).
    pub rotated: bool,
}

impl TextSpec {
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            dx: 0.0,
            dy_em: 0.0,
            anchor: TextAnchor::Start,
            font_scale: 1.0,
            rotated: false,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn offset(mut self, dx: f64, dy_em: f64) -> Self {
        self.dx = dx;
        self.dy_em = dy_em;
        self
    }

    pub fn font_scale(mut self, scale: f64) -> Self {
        self.font_scale = scale;
        self
    }

    pub fn rotated(mut self) -> Self {
        self.rotated = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group,
    Polyline(Vec<(f64, f64)>),
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Text(TextSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<RGBAColor>,
    pub stroke: Option<RGBAColor>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub class: Option<String>,
    pub translate: (f64, f64),
    pub style: Style,
    pub hidden: bool,
    children: Vec<NodeId>,
}

impl Node {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            class: None,
            translate: (0.0, 0.0),
            style: Style::default(),
            hidden: false,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(Shape::Group)
    }

    pub fn polyline(points: Vec<(f64, f64)>) -> Self {
        Self::new(Shape::Polyline(points))
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(Shape::Circle { cx, cy, r })
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Shape::Rect {
            x,
            y,
            width,
            height,
        })
    }

    pub fn text(spec: TextSpec) -> Self {
        Self::new(Shape::Text(spec))
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn fill(mut self, color: RGBAColor) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: RGBAColor, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Text content, if this is a text node.
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text(spec) => Some(spec.content.as_str()),
            _ => None,
        }
    }
}

/// One node as a backend should paint it: absolute offset already resolved.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    pub origin: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    id: String,
    width: u32,
    height: u32,
    font_px: f64,
    pub background: Option<RGBAColor>,
    nodes: Vec<Node>,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: u32, height: u32, font_px: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            font_px,
            background: None,
            nodes: vec![Node::group()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn font_px(&self) -> f64 {
        self.font_px
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add `node` as the last child of `parent` (painted on top of its siblings).
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.nodes[id.0].hidden = hidden;
    }

    pub fn set_translate(&mut self, id: NodeId, x: f64, y: f64) {
        self.nodes[id.0].translate = (x, y);
    }

    /// Replace the content of a text node; other shapes are left untouched.
    pub fn set_text(&mut self, id: NodeId, content: &str) {
        if let Shape::Text(spec) = &mut self.nodes[id.0].shape {
            spec.content.clear();
            spec.content.push_str(content);
        }
    }

    /// Every node carrying `class`, in tree order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.has_class(class) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Whether `id` and all its ancestors are shown.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut found = false;
        self.walk(|p, _| {
            if p.id == id {
                found = true;
            }
        });
        found
    }

    /// Visit visible nodes depth-first in paint order, skipping hidden subtrees.
    pub fn walk<'a, F: FnMut(Placed<'a>, usize)>(&'a self, mut f: F) {
        fn go<'a, F: FnMut(Placed<'a>, usize)>(
            s: &'a Surface,
            id: NodeId,
            origin: (f64, f64),
            depth: usize,
            f: &mut F,
        ) {
            let node = s.node(id);
            if node.hidden {
                return;
            }
            let origin = (origin.0 + node.translate.0, origin.1 + node.translate.1);
            f(Placed { id, node, origin }, depth);
            for child in &node.children {
                go(s, *child, origin, depth + 1, f);
            }
        }
        go(self, self.root(), (0.0, 0.0), 0, &mut f);
    }
}
