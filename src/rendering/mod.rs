//! Projection of a tree to HTML through templates. Each node is rendered by
//! the template its element names, or by a built-in default for its
//! category, with the already rendered children available to it.

use thiserror::Error;

mod html;

pub use html::Renderer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template '{name}' failed: {source}")]
    TemplateFailed {
        name: String,
        #[source]
        source: tinytemplate::error::Error,
    },
}
