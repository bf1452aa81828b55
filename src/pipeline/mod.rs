//! The generation pipeline: classify, aggregate, order, render.
//!
//! Everything here is pure and in memory. Reading manifests and writing the
//! result are the caller's business.

use crate::core::{Result, ServiceInterfaceDefinition};
use crate::emit::{plan_blocks, Block, EmitOptions};
use crate::resolver::{collect_entries, ResolverEntries};
use crate::template::{render_all, CSharpTemplateEngine, TemplateEngine};
use tracing::{debug, info_span};

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub entries: ResolverEntries,
    pub blocks: Vec<Block>,
    /// Rendered text; `None` when only the blocks were planned
    pub source: Option<String>,
}

/// Configured pipeline over a template engine
#[derive(Debug, Clone)]
pub struct Generator<E = CSharpTemplateEngine> {
    options: EmitOptions,
    parallel: bool,
    engine: E,
}

impl Default for Generator<CSharpTemplateEngine> {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

impl Generator<CSharpTemplateEngine> {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            parallel: false,
            engine: CSharpTemplateEngine::new(),
        }
    }
}

impl<E: TemplateEngine> Generator<E> {
    pub fn with_engine<F: TemplateEngine>(self, engine: F) -> Generator<F> {
        Generator {
            options: self.options,
            parallel: self.parallel,
            engine,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Classify and order without rendering
    pub fn plan(&self, definitions: &[ServiceInterfaceDefinition]) -> (ResolverEntries, Vec<Block>) {
        let _span = info_span!("plan", interfaces = definitions.len()).entered();
        let entries = collect_entries(definitions, self.parallel);
        let blocks = plan_blocks(definitions, &entries, &self.options);
        debug!(blocks = blocks.len(), "Planned emission blocks");
        (entries, blocks)
    }

    /// Plan and render
    pub fn generate(&self, definitions: &[ServiceInterfaceDefinition]) -> Result<GenerationOutput> {
        let mut output = self.outline(definitions);
        let _span = info_span!("render", blocks = output.blocks.len()).entered();
        output.source = Some(render_all(&self.engine, &output.blocks)?);
        Ok(output)
    }

    /// Plan without rendering, for consumers that only need the blocks
    pub fn outline(&self, definitions: &[ServiceInterfaceDefinition]) -> GenerationOutput {
        let (entries, blocks) = self.plan(definitions);
        GenerationOutput {
            entries,
            blocks,
            source: None,
        }
    }
}
