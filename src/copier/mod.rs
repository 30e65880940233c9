//! Record-to-record copying through cached field plans
//!
//! A [`Copier`] is built once per (source type, target type) pair and kept in
//! a [`CopierCache`]. Only fields that share both name and declared type are
//! copied. The rest are skipped without error and listed in
//! [`Copier::skipped`].
//!
//! # Example
//!
//! ```rust
//! use beankit::copier::copy;
//!
//! beankit::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Foo {
//!         pub name: Option<String>,
//!         pub age: Option<i32>,
//!     }
//! }
//!
//! beankit::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Baz {
//!         pub name: Option<String>,
//!         pub age: Option<String>,
//!     }
//! }
//!
//! let foo = Foo { name: Some("Tom".into()), age: Some(18) };
//! let baz: Baz = copy(Some(&foo)).unwrap().unwrap();
//! assert_eq!(baz.name.as_deref(), Some("Tom"));
//! assert_eq!(baz.age, None);
//! ```

mod cache;
mod error;
mod plan;

pub use cache::{CopierCache, CopierKey};
pub use error::{CopyError, CopyResult};
pub use plan::{Copier, SkipReason, SkippedField};

use crate::property::{PropertyResult, Record};

/// Copy `source` into a new `D` using the global cache
///
/// `None` yields `None`.
pub fn copy<S: Record, D: Record>(source: Option<&S>) -> PropertyResult<Option<D>> {
    CopierCache::global().copy(source)
}

/// Copy every element of `sources` into a new `D` using the global cache
///
/// An empty slice yields `None`, unlike the map batch conversions which
/// yield an empty vector.
pub fn copy_many<S: Record, D: Record>(sources: &[S]) -> PropertyResult<Option<Vec<D>>> {
    CopierCache::global().copy_many(sources)
}

/// Copy type-erased sources that must all share one runtime type
pub fn copy_many_dyn<D: Record>(sources: &[&dyn Record]) -> CopyResult<Option<Vec<D>>> {
    CopierCache::global().copy_many_dyn(sources)
}
