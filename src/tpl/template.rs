use crate::error::Result;
use crate::tpl::ast::AstNode;
use crate::tpl::parser::parse_template;
use crate::tpl::render::{self, RenderOptions};
use crate::vars::VarSource;

/// A parsed template, ready to be rendered any number of times.
///
/// Parsing classifies every directive up front, so a `Template` only fails to
/// render on unbalanced blocks or on operands that do not resolve to integers.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<AstNode>,
    source_len: usize,
}

impl Template {
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            nodes: parse_template(source)?,
            source_len: source.len(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    /// Length of the source text, used as the initial output capacity.
    pub(crate) fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn render(&self, vars: &dyn VarSource) -> Result<String> {
        render::render(self, vars, &RenderOptions::default())
    }

    pub fn render_with(&self, vars: &dyn VarSource, options: &RenderOptions) -> Result<String> {
        render::render(self, vars, options)
    }
}
