use std::collections::HashMap;

use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::language::{label, Body, Category, NodeId, NodeType, Tree};
use crate::parsing::Elements;

use super::RenderError;

static BLOCK: &str = r#"<div class="{element}">{children | unescaped}</div>
"#;

static INLINE: &str = r#"<span class="{element}">{children | unescaped}</span>"#;

const DEFAULT_BLOCK: &str = "default-block";
const DEFAULT_INLINE: &str = "default-inline";

/// What a template sees for one node. `children` is the node's rendered
/// content: its children's HTML, or its escaped payload.
#[derive(Serialize)]
struct Context<'a> {
    element: &'a str,
    kind: &'static str,
    rank: u32,
    head: &'a str,
    content: &'a str,
    children: String,
    label: String,
    numbers: Vec<u32>,
}

fn escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    tinytemplate::escape(text, &mut output);
    output
}

pub struct Renderer<'a> {
    tt: TinyTemplate<'a>,
    names: HashMap<&'a str, &'a str>,
}

impl<'a> Renderer<'a> {
    /// Compile the templates. These have already been checked by
    /// configuration validation; a failure here is reported the same way.
    pub fn new(
        elements: &'a Elements,
        templates: &'a HashMap<String, String>,
    ) -> Result<Renderer<'a>, RenderError> {
        let mut tt = TinyTemplate::new();

        tt.add_template(DEFAULT_BLOCK, BLOCK)
            .map_err(|source| RenderError::TemplateFailed {
                name: DEFAULT_BLOCK.to_string(),
                source,
            })?;
        tt.add_template(DEFAULT_INLINE, INLINE)
            .map_err(|source| RenderError::TemplateFailed {
                name: DEFAULT_INLINE.to_string(),
                source,
            })?;

        for (name, text) in templates {
            tt.add_template(name, text)
                .map_err(|source| RenderError::TemplateFailed {
                    name: name.clone(),
                    source,
                })?;
        }

        // a template named after a node's element applies unless the element
        // names another; this is how synthetic containers get templates
        let mut names = HashMap::new();
        for name in templates.keys() {
            names.insert(name.as_str(), name.as_str());
        }
        for element in elements.iter() {
            if let Some(template) = &element.template {
                names.insert(element.name.as_str(), template.as_str());
            }
        }

        Ok(Renderer {
            tt,
            names,
        })
    }

    pub fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let result = self.render_children(tree, tree.root())?;
        debug!("Rendered {} bytes of HTML", result.len());
        Ok(result)
    }

    fn render_children(&self, tree: &Tree, id: NodeId) -> Result<String, RenderError> {
        let mut output = String::new();
        for child in tree.children(id) {
            output.push_str(&self.render_node(tree, *child, None)?);
        }
        Ok(output)
    }

    fn template_for(&self, tree: &Tree, id: NodeId) -> &'a str {
        let node = tree.node(id);
        if let Some(name) = self
            .names
            .get(node.element.as_str())
            .copied()
        {
            return name;
        }
        match tree.category(id) {
            Category::Block => DEFAULT_BLOCK,
            Category::Inline => DEFAULT_INLINE,
        }
    }

    fn render_node(
        &self,
        tree: &Tree,
        id: NodeId,
        numbers: Option<&[u32]>,
    ) -> Result<String, RenderError> {
        let node = tree.node(id);

        let (head, content, children) = match &node.body {
            Body::Text(text) if node.ty == NodeType::Text => return Ok(escape(text)),
            // the numbers belong to the node being numbered
            Body::Sequence { numbers, wrapped } => {
                return self.render_node(tree, *wrapped, Some(numbers));
            }
            Body::Text(text) => ("", text.as_str(), escape(text)),
            Body::HeadBody { head, body } => (head.as_str(), body.as_str(), escape(body)),
            Body::Empty => ("", "", String::new()),
            Body::Children(_) | Body::Group(_) | Body::Sticky { .. } | Body::Composite { .. } => {
                ("", "", self.render_children(tree, id)?)
            }
        };

        let context = Context {
            element: &node.element,
            kind: node
                .ty
                .name(),
            rank: node.rank,
            head,
            content,
            children,
            label: numbers
                .map(label)
                .unwrap_or_default(),
            numbers: numbers
                .map(<[u32]>::to_vec)
                .unwrap_or_default(),
        };

        let name = self.template_for(tree, id);
        self.tt
            .render(name, &context)
            .map_err(|source| RenderError::TemplateFailed {
                name: name.to_string(),
                source,
            })
    }
}
