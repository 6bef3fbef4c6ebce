//! Host page model for fieldmirror.
//!
//! A page is an explicit tree of nodes: forms, containers, and plain text
//! fields. Containers may carry the mirror flag, which marks them as
//! requesting a rich editing surface for their field. Modeling the page as
//! data (instead of walking an ambient document) makes discovery and the
//! field/form associations first-class and testable.
//!
//! Node order is insertion order and defines document order. Traversal
//! helpers rely on it, and so do the persistence key indices derived from it,
//! which must be stable across reloads of the same page.

/// Handle to a node in a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A plain text field: the authoritative data sink for form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainField {
    /// Field name as submitted with the form (e.g. `content.css`)
    pub name: String,
    /// Current field value
    pub value: String,
    /// Whether the field requested initial input focus
    pub autofocus: bool,
    /// Whether the field's visible presentation has been replaced
    pub hidden: bool,
}

impl PlainField {
    /// Create a field with the given name and initial value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            autofocus: false,
            hidden: false,
        }
    }

    /// Mark the field as requesting initial input focus.
    pub fn with_autofocus(mut self) -> Self {
        self.autofocus = true;
        self
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A submittable form container
    Form,
    /// A grouping container; `mirror` requests an editing surface
    Container { mirror: bool },
    /// A plain text field
    Field(PlainField),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// A page: a node tree plus the page path used in persistence keys.
#[derive(Debug, Clone)]
pub struct Page {
    path: String,
    nodes: Vec<Node>,
}

impl Page {
    /// Create an empty page with the given path (e.g. `/files/site.css`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
        }
    }

    /// Page path used to key persisted state.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Append a form node.
    pub fn add_form(&mut self, parent: Option<NodeId>) -> NodeId {
        self.push(parent, NodeKind::Form)
    }

    /// Append a container node. `mirror` marks it as a binding target.
    pub fn add_container(&mut self, parent: Option<NodeId>, mirror: bool) -> NodeId {
        self.push(parent, NodeKind::Container { mirror })
    }

    /// Append a field node.
    pub fn add_field(&mut self, parent: Option<NodeId>, field: PlainField) -> NodeId {
        self.push(parent, NodeKind::Field(field))
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        if let Some(NodeId(p)) = parent {
            assert!(p < self.nodes.len(), "parent node does not exist");
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        id
    }

    /// Node kind accessor.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// All mirror-flagged containers in document order.
    pub fn mirror_containers(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Container { mirror: true }))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// First field among the node's descendants, in document order.
    pub fn descendant_field(&self, node: NodeId) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Field(_)))
            .map(|(i, _)| NodeId(i))
            .find(|&id| self.is_descendant_of(id, node))
    }

    /// Nearest ancestor form of the node, walking the parent chain.
    pub fn ancestor_form(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            if matches!(self.nodes[id.0].kind, NodeKind::Form) {
                return Some(id);
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    /// All fields under a form, in document order. This is what native
    /// submission reads; hidden fields are included.
    pub fn form_fields(&self, form: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Field(_)))
            .map(|(i, _)| NodeId(i))
            .filter(|&id| self.is_descendant_of(id, form))
            .collect()
    }

    /// Field data accessor; `None` if the node is not a field.
    pub fn field(&self, id: NodeId) -> Option<&PlainField> {
        match &self.nodes[id.0].kind {
            NodeKind::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable field data accessor.
    pub fn field_mut(&mut self, id: NodeId) -> Option<&mut PlainField> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Field(f) => Some(f),
            _ => None,
        }
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> (Page, NodeId, NodeId, NodeId) {
        let mut page = Page::new("/notes/edit");
        let form = page.add_form(None);
        let container = page.add_container(Some(form), true);
        let field = page.add_field(Some(container), PlainField::new("content.css", "body {}"));
        (page, form, container, field)
    }

    #[test]
    fn test_mirror_containers_document_order() {
        let mut page = Page::new("/p");
        let form = page.add_form(None);
        let a = page.add_container(Some(form), true);
        let _plain = page.add_container(Some(form), false);
        let b = page.add_container(Some(form), true);
        assert_eq!(page.mirror_containers(), vec![a, b]);
    }

    #[test]
    fn test_descendant_field_finds_first() {
        let mut page = Page::new("/p");
        let form = page.add_form(None);
        let container = page.add_container(Some(form), true);
        let inner = page.add_container(Some(container), false);
        let first = page.add_field(Some(inner), PlainField::new("a", "1"));
        let _second = page.add_field(Some(container), PlainField::new("b", "2"));
        assert_eq!(page.descendant_field(container), Some(first));
    }

    #[test]
    fn test_descendant_field_missing() {
        let mut page = Page::new("/p");
        let form = page.add_form(None);
        let container = page.add_container(Some(form), true);
        assert_eq!(page.descendant_field(container), None);
    }

    #[test]
    fn test_ancestor_form() {
        let (page, form, container, field) = sample_page();
        assert_eq!(page.ancestor_form(field), Some(form));
        assert_eq!(page.ancestor_form(container), Some(form));
        assert_eq!(page.ancestor_form(form), None);
    }

    #[test]
    fn test_no_ancestor_form_outside() {
        let mut page = Page::new("/p");
        let container = page.add_container(None, true);
        let field = page.add_field(Some(container), PlainField::new("x", ""));
        assert_eq!(page.ancestor_form(field), None);
    }

    #[test]
    fn test_form_fields_includes_hidden() {
        let (mut page, form, _, field) = sample_page();
        page.field_mut(field).unwrap().hidden = true;
        assert_eq!(page.form_fields(form), vec![field]);
    }

    #[test]
    fn test_field_value_update() {
        let (mut page, _, _, field) = sample_page();
        page.field_mut(field).unwrap().value = "p { color: red }".to_string();
        assert_eq!(page.field(field).unwrap().value, "p { color: red }");
    }

    #[test]
    fn test_autofocus_builder() {
        let field = PlainField::new("n", "v").with_autofocus();
        assert!(field.autofocus);
        assert!(!field.hidden);
    }
}
