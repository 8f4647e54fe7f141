use crate::vars::Vars;
use std::collections::{BTreeMap, HashMap};

/// A single field that can become a template variable.
///
/// `None` means "no variable", so an `Option` field that is unset fails an
/// existence test instead of rendering as an empty string.
pub trait ToVar {
    fn to_var(&self) -> Option<String>;
}

/// Anything that can be turned into a whole variable store.
///
/// Usually implemented with `#[derive(Vars)]`.
pub trait ToVars {
    fn to_vars(&self) -> Vars;
}

macro_rules! impl_to_var_display {
    ($($rust_type:ty),* $(,)?) => {
        $(
            impl ToVar for $rust_type {
                fn to_var(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_to_var_display!(
    bool, char, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl ToVar for str {
    fn to_var(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: ToVar + ?Sized> ToVar for &T {
    fn to_var(&self) -> Option<String> {
        (**self).to_var()
    }
}

impl<T: ToVar> ToVar for Option<T> {
    fn to_var(&self) -> Option<String> {
        self.as_ref().and_then(ToVar::to_var)
    }
}

impl<T: ToVar> ToVar for Box<T> {
    fn to_var(&self) -> Option<String> {
        (**self).to_var()
    }
}

impl ToVars for Vars {
    fn to_vars(&self) -> Vars {
        self.clone()
    }
}

impl<V: ToVar> ToVars for HashMap<String, V> {
    fn to_vars(&self) -> Vars {
        self.iter()
            .filter_map(|(k, v)| v.to_var().map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<V: ToVar> ToVars for BTreeMap<String, V> {
    fn to_vars(&self) -> Vars {
        self.iter()
            .filter_map(|(k, v)| v.to_var().map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<K: AsRef<str>, V: ToVar> ToVars for [(K, V)] {
    fn to_vars(&self) -> Vars {
        self.iter()
            .filter_map(|(k, v)| v.to_var().map(|v| (k.as_ref().to_string(), v)))
            .collect()
    }
}
