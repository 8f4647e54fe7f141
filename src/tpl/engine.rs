use crate::error::{Result, TemplateError};
use crate::tpl::cache;
use crate::tpl::template::Template;
use crate::vars::VarSource;
use log::debug;

/// Name given to templates rendered without one.
pub const INLINE_TEMPLATE: &str = "<inline>";

/// Renders a template string against `vars`.
///
/// Every directive is classified before anything is evaluated, so a malformed
/// expression is reported even if it sits after an unbalanced block or a
/// failing computation.
pub fn render(template: &str, vars: &dyn VarSource) -> Result<String> {
    Template::parse(INLINE_TEMPLATE, template)?.render(vars)
}

/// Renders a named template, parsing it at most once per process.
///
/// This function handles:
/// 1. Looking the template up in the cache, parsing `content` on a miss
/// 2. Rendering the cached template against `vars`
pub fn render_template(name: &str, content: &str, vars: &dyn VarSource) -> Result<String> {
    let template = cache::get_or_parse(name, content)?;
    debug!("rendering template {}", name);
    template.render(vars)
}

/// Renders a template that is already in the cache.
pub fn render_cached(name: &str, vars: &dyn VarSource) -> Result<String> {
    let template =
        cache::get(name).ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))?;
    debug!("rendering cached template {}", name);
    template.render(vars)
}
