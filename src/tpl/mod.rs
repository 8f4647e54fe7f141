//! The `{{...}}` template language.
//!
//! A template is literal text with directives between `{{` and `}}`:
//!
//! - `{{name}}` substitutes a variable (empty if unset),
//! - `{{name?then:else}}` / `{{name=value?then:else}}` pick a branch,
//! - `{{n+1}}`, `-`, `*`, `/`, `%` do integer arithmetic,
//! - `{{#test?}}...{{/}}` keeps its content only if the test holds, where a
//!   test is `name?`, `name=value?`, `name!=value?` or `a>b?` (`<`, `>=`, `<=`).
//!
//! Blocks nest; content is dropped whenever any enclosing block is false.

mod ast;
mod block;
pub mod cache;
mod engine;
mod eval;
mod grammar;
mod parser;
mod render;
mod section;
mod template;

pub use engine::{INLINE_TEMPLATE, render, render_cached, render_template};
pub use eval::{eval, test};
pub use render::RenderOptions;
pub use section::{split, split_sections};
pub use template::Template;
