//! Assorted utility functions (missing batteries).
mod std_ext;

pub use std_ext::ErrorExt;

pub(crate) mod prelude {
    pub(crate) use super::std_ext::prelude::*;
}
