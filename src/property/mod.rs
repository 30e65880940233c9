//! Property accessor for typed records
//!
//! This module provides:
//! - [`Record`], the named get/set view every convertible type implements
//! - [`RecordDescriptor`] and [`FieldType`], the per-type field metadata
//! - [`PropertyType`], the value conversion for each supported field type
//! - the [`record!`](crate::record) macro, which generates the accessor table
//!
//! # Example
//!
//! ```rust
//! use beankit::property::{list_properties, Record};
//! use serde_json::json;
//!
//! beankit::record! {
//!     #[derive(Debug, Default, Clone)]
//!     pub struct Foo {
//!         pub name: Option<String>,
//!         pub age: Option<i32>,
//!     }
//! }
//!
//! let foo = Foo { name: Some("Tom".into()), age: Some(18) };
//! let props = list_properties(&foo);
//! assert_eq!(props[0], ("name", json!("Tom")));
//! assert_eq!(Foo::record_descriptor().len(), 2);
//! ```

mod accessor;
mod error;
mod types;
mod value;

pub use accessor::{Record, apply_properties, instantiate, list_properties};
pub use error::{PropertyError, PropertyResult};
pub use types::{FieldDescriptor, FieldType, RecordDescriptor};
pub use value::{PropertyMap, PropertyType, ValueMismatch, value_kind};

/// Declare a struct and implement [`Record`] for it
///
/// Every field type must implement [`PropertyType`]. The struct must derive
/// or implement `Default`, which backs [`Record::instantiate`]. Types that
/// cannot be default-constructed implement `Record` by hand instead.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::property::Record for $name {
            fn record_descriptor() -> &'static $crate::property::RecordDescriptor {
                static DESCRIPTOR: $crate::__private::OnceCell<$crate::property::RecordDescriptor> =
                    $crate::__private::OnceCell::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::property::RecordDescriptor::of::<$name>(stringify!($name))
                        $(.with_field(
                            stringify!($field),
                            <$ty as $crate::property::PropertyType>::field_type(),
                        ))*
                })
            }

            fn instantiate() -> $crate::property::PropertyResult<Self> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            fn descriptor(&self) -> &'static $crate::property::RecordDescriptor {
                <Self as $crate::property::Record>::record_descriptor()
            }

            fn get_property(&self, name: &str) -> ::core::option::Option<$crate::__private::Value> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::property::PropertyType::to_value(&self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_property(
                &mut self,
                name: &str,
                value: $crate::__private::Value,
            ) -> $crate::property::PropertyResult<bool> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::property::PropertyType>::from_value(value)
                                .map_err(|m| {
                                    $crate::property::PropertyError::type_mismatch(
                                        stringify!($name),
                                        name,
                                        m,
                                    )
                                })?;
                            ::core::result::Result::Ok(true)
                        }
                    )*
                    _ => ::core::result::Result::Ok(false),
                }
            }

            fn property_ref(
                &self,
                name: &str,
            ) -> ::core::option::Option<&dyn ::core::any::Any> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            &self.$field as &dyn ::core::any::Any,
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_property_from(&mut self, name: &str, value: &dyn ::core::any::Any) -> bool {
                match name {
                    $(
                        stringify!($field) => match value.downcast_ref::<$ty>() {
                            ::core::option::Option::Some(v) => {
                                self.$field = ::core::clone::Clone::clone(v);
                                true
                            }
                            ::core::option::Option::None => false,
                        },
                    )*
                    _ => false,
                }
            }
        }
    };
}
