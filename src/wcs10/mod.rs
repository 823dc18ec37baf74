//! OGC Web Coverage Service 1.0 object model.
//!
//! The schema ([`schema`]) reproduces the WCS 1.0 class catalog feature
//! for feature: attribute/containment/feature-map classification,
//! declaration order, defaults and explicit-set tracking all match the
//! published schema, which is what lets a codec driven through the
//! generic facade round-trip documents bit-for-bit.
//!
//! Typed accessors are thin wrappers around an [`ObjectId`]: plain data,
//! copyable, valid only against the model that created the object. Every
//! accessor delegates to the model's named-feature operations, so the
//! typed surface and the generic facade can't disagree.
//!
//! ```
//! use arbor::wcs10::{self, GetCapabilities, ModelType};
//!
//! let mut model = wcs10::model();
//! let request = GetCapabilities::new(&mut model).unwrap();
//! request.set_version(&mut model, "1.0.0").unwrap();
//! assert!(request.is_version_set(&model).unwrap());
//! ```

mod capabilities;
mod describe;
mod document;
mod enums;
mod gml;
mod request;
mod schema;

pub use capabilities::*;
pub use describe::*;
pub use document::*;
pub use enums::*;
pub use gml::*;
pub use request::*;
pub use schema::{model, schema};

use crate::core::{Model, ModelError, ObjectId};

/// A typed handle over one model object of a fixed class.
pub trait ModelType: Copy {
    /// Schema name of the class this handle speaks for.
    const CLASS: &'static str;

    fn id(self) -> ObjectId;

    /// Wraps without checking the class; [`ModelType::of`] is the checked
    /// way in.
    fn wrap(id: ObjectId) -> Self;

    /// Instantiates the class in `model`.
    fn new(model: &mut Model) -> Result<Self, ModelError> {
        model.create_named(Self::CLASS).map(Self::wrap)
    }

    /// Wraps an existing object, verifying it conforms to the class.
    fn of(model: &Model, id: ObjectId) -> Result<Self, ModelError> {
        if model.instance_of(id, Self::CLASS)? {
            Ok(Self::wrap(id))
        } else {
            let found = model.schema().class(model.class_of(id)?).name();
            Err(ModelError::wrong_class(Self::CLASS, found))
        }
    }
}

/// Declares a typed handle for one schema class; the optional trailing
/// type is the supertype handle [`upcast`](ModelType) goes to.
macro_rules! model_type {
    ($(#[$meta:meta])* $name:ident : $class:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name($crate::core::ObjectId);

        impl $crate::wcs10::ModelType for $name {
            const CLASS: &'static str = $class;

            fn id(self) -> $crate::core::ObjectId {
                self.0
            }

            fn wrap(id: $crate::core::ObjectId) -> Self {
                Self(id)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident : $class:literal => $super:ident) => {
        model_type!($(#[$meta])* $name : $class);

        impl $name {
            /// The same object through its supertype's accessors.
            pub fn upcast(self) -> $super {
                <$super as $crate::wcs10::ModelType>::wrap(self.0)
            }
        }
    };
}

pub(crate) use model_type;
