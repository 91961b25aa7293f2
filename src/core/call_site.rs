use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// The location in source code where a guard check fired.
///
/// `class` holds the module path of the enclosing function (the closest thing
/// Rust has to an owning type) and `method` the function name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSite {
    pub class: String,
    pub method: String,
    pub file: String,
    pub line_number: u32,
}

impl CallSite {
    pub fn new(
        class: impl Into<String>,
        method: impl Into<String>,
        file: impl Into<String>,
        line_number: u32,
    ) -> Self {
        Self {
            class: class.into(),
            method: method.into(),
            file: file.into(),
            line_number,
        }
    }

    /// Build a call site from the type name of a marker function nested in the caller.
    ///
    /// `path` looks like `my_crate::module::function::__here`, possibly with
    /// `{{closure}}` segments between the function and the marker. Closure
    /// frames are attributed to the function that defines them.
    pub fn from_fn_path(path: &str, file: &str, line_number: u32) -> Self {
        let mut path = path.strip_suffix("::__here").unwrap_or(path);
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }

        let (class, method) = match path.rsplit_once("::") {
            Some((class, method)) => (class, method),
            None => ("", path),
        };
        Self::new(class, method, file, line_number)
    }
}

/// Catalogue order: class, then line number. Method and file only break
/// remaining ties so that the order stays total.
impl Ord for CallSite {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then(self.line_number.cmp(&other.line_number))
            .then_with(|| self.method.cmp(&other.method))
            .then_with(|| self.file.cmp(&other.file))
    }
}

impl PartialOrd for CallSite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} ({}:{})",
            self.class, self.method, self.file, self.line_number
        )
    }
}

/// Capture the [`CallSite`] of the expression where the macro is expanded.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::CallSite::from_fn_path(__type_name_of(__here), file!(), line!())
    }};
}
