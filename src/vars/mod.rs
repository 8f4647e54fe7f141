//! Variable stores a template is rendered against.
//!
//! Templates only ever see a flat `name -> string` mapping. Anything that can
//! answer a lookup by name implements [`VarSource`]; [`Vars`] is the owned
//! store the conversions in this module produce.

mod serializer;
mod store;
mod value;

pub use serializer::to_vars;
pub use store::{VarSource, Vars};
pub use value::{ToVar, ToVars};
