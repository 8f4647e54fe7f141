use crate::error::{Result, TemplateError};
use crate::tpl::ast::AstNode;
use crate::tpl::block::BlockStack;
use crate::tpl::eval::{eval_expr, test_expr};
use crate::tpl::template::Template;
use crate::vars::VarSource;
use log::warn;

/// Knobs for a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail when blocks are still open at the end of the template.
    ///
    /// With this off, unclosed blocks are closed silently.
    pub strict_blocks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict_blocks: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_blocks(mut self, strict: bool) -> Self {
        self.strict_blocks = strict;
        self
    }
}

pub(crate) fn render(
    template: &Template,
    vars: &dyn VarSource,
    options: &RenderOptions,
) -> Result<String> {
    let mut out = String::with_capacity(template.source_len());
    let mut blocks = BlockStack::new();

    // Directives in suppressed regions are still evaluated so their errors surface.
    for node in template.nodes() {
        match node {
            AstNode::Text(text) => {
                if blocks.is_emitting() {
                    out.push_str(text);
                }
            }
            AstNode::Block(test) => blocks.push(test_expr(test, vars)?),
            AstNode::EndBlock { offset } => {
                if blocks.pop().is_none() {
                    return Err(TemplateError::UnmatchedBlockClose {
                        template: template.name().to_string(),
                        position: *offset,
                    });
                }
            }
            AstNode::Subst(eval) => {
                let value = eval_expr(eval, vars)?;
                if blocks.is_emitting() {
                    out.push_str(&value);
                }
            }
        }
    }

    let depth = blocks.depth();
    if depth > 0 {
        if options.strict_blocks {
            return Err(TemplateError::UnclosedBlock {
                template: template.name().to_string(),
                depth,
            });
        }
        warn!(
            "template {}: {} unclosed block(s) closed at end of input",
            template.name(),
            depth
        );
    }

    Ok(out)
}
