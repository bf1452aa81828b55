//! Turning emission blocks into source text.

pub mod csharp;

pub use csharp::CSharpTemplateEngine;

use crate::core::Result;
use crate::emit::Block;

/// Renders one block into text
pub trait TemplateEngine {
    fn render(&self, block: &Block) -> Result<String>;
}

/// Render every block in order, each followed by a newline
pub fn render_all<E: TemplateEngine + ?Sized>(engine: &E, blocks: &[Block]) -> Result<String> {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&engine.render(block)?);
        out.push('\n');
    }
    Ok(out)
}
