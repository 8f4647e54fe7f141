//! Process-wide cache of parsed templates, keyed by template name.

use crate::error::Result;
use crate::tpl::template::Template;
use dashmap::DashMap;
use log::debug;
use std::sync::{Arc, LazyLock};

static TEMPLATE_CACHE: LazyLock<DashMap<String, Arc<Template>>> = LazyLock::new(DashMap::new);

/// Returns the cached template called `name`, parsing `content` on a miss.
///
/// The name is the identity: once cached, a template is not re-parsed even if
/// different content is passed under the same name. Use [`remove`] first to
/// replace it.
pub fn get_or_parse(name: &str, content: &str) -> Result<Arc<Template>> {
    if let Some(cached) = TEMPLATE_CACHE.get(name) {
        debug!("template cache hit: {}", name);
        return Ok(Arc::clone(cached.value()));
    }

    let parsed = Arc::new(Template::parse(name, content)?);
    debug!("template parsed and cached: {} ({} bytes)", name, content.len());
    let entry = TEMPLATE_CACHE.entry(name.to_string()).or_insert(parsed);
    Ok(Arc::clone(entry.value()))
}

pub fn get(name: &str) -> Option<Arc<Template>> {
    TEMPLATE_CACHE.get(name).map(|cached| Arc::clone(cached.value()))
}

/// Caches an already parsed template under its own name, replacing any
/// previous entry.
pub fn insert(template: Template) -> Arc<Template> {
    let template = Arc::new(template);
    TEMPLATE_CACHE.insert(template.name().to_string(), Arc::clone(&template));
    template
}

pub fn remove(name: &str) -> Option<Arc<Template>> {
    TEMPLATE_CACHE.remove(name).map(|(_, template)| template)
}

/// Drops every cached template.
pub fn clear() {
    TEMPLATE_CACHE.clear();
}
