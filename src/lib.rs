pub mod error;
pub mod tpl;
pub mod vars;

pub use error::{Result, TemplateError};
pub use tpl::{RenderOptions, Template, eval, render, split, split_sections, test};
pub use utpl_macros::Vars;
pub use vars::{ToVar, ToVars, VarSource, Vars, to_vars};
