use crate::core::ObjectId;
use std::fmt::Display;

/// Model level errors.
/// All of these signal caller programming errors; a correct mutation
/// sequence never produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Object id is stale or was never allocated in this model.
    StaleObject { object: ObjectId },
    /// Class name is not registered in the schema.
    UnknownClass { name: String },
    /// Class is abstract and can't be instantiated.
    AbstractClass { class: &'static str },
    /// Feature is not part of the object's class table.
    UnknownFeature { class: &'static str, feature: String },
    /// Object of one class used where another class is required.
    WrongClass {
        expected: &'static str,
        found: &'static str,
    },
    /// Value shape doesn't match the slot it was aimed at.
    ValueShape {
        feature: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// Literal outside the enumeration's closed set of values.
    InvalidLiteral {
        enumeration: &'static str,
        literal: String,
    },
    /// Element is already present in the target containment feature.
    AlreadyContained {
        object: ObjectId,
        feature: &'static str,
    },
    /// Element is not present in the containment feature it was to be
    /// removed from.
    NotContained {
        object: ObjectId,
        feature: &'static str,
    },
    /// List position outside the current length.
    OutOfBounds {
        feature: &'static str,
        index: usize,
        len: usize,
    },
    /// Attaching an object under its own contained subtree.
    ContainmentCycle { object: ObjectId },
}

impl ModelError {
    pub fn stale(object: ObjectId) -> Self {
        Self::StaleObject { object }
    }

    pub fn unknown_class(name: &str) -> Self {
        Self::UnknownClass {
            name: name.to_owned(),
        }
    }

    pub fn unknown_feature(class: &'static str, feature: impl Display) -> Self {
        Self::UnknownFeature {
            class,
            feature: feature.to_string(),
        }
    }

    pub fn wrong_class(expected: &'static str, found: &'static str) -> Self {
        Self::WrongClass { expected, found }
    }

    pub fn value_shape(feature: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::ValueShape {
            feature,
            expected,
            found,
        }
    }

    pub fn invalid_literal(enumeration: &'static str, literal: impl Display) -> Self {
        Self::InvalidLiteral {
            enumeration,
            literal: literal.to_string(),
        }
    }

    pub fn already_contained(object: ObjectId, feature: &'static str) -> Self {
        Self::AlreadyContained { object, feature }
    }

    pub fn not_contained(object: ObjectId, feature: &'static str) -> Self {
        Self::NotContained { object, feature }
    }

    pub fn out_of_bounds(feature: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfBounds {
            feature,
            index,
            len,
        }
    }

    pub fn cycle(object: ObjectId) -> Self {
        Self::ContainmentCycle { object }
    }

    pub fn is_stale(&self, object: ObjectId) -> bool {
        match self {
            Self::StaleObject { object: o } => *o == object,
            _ => false,
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleObject { object } => {
                write!(f, "Object {} doesn't exist in this model.", object)
            }
            Self::UnknownClass { name } => {
                write!(f, "Class '{}' is not registered in the schema.", name)
            }
            Self::AbstractClass { class } => {
                write!(f, "Class '{}' is abstract and can't be instantiated.", class)
            }
            Self::UnknownFeature { class, feature } => {
                write!(f, "Class '{}' has no feature '{}'.", class, feature)
            }
            Self::WrongClass { expected, found } => {
                write!(f, "Expected an object of class '{}', got '{}'.", expected, found)
            }
            Self::ValueShape {
                feature,
                expected,
                found,
            } => write!(
                f,
                "Feature '{}' holds {}, got {}.",
                feature, expected, found
            ),
            Self::InvalidLiteral {
                enumeration,
                literal,
            } => write!(
                f,
                "'{}' is not a literal of enumeration '{}'.",
                literal, enumeration
            ),
            Self::AlreadyContained { object, feature } => {
                write!(f, "Object {} is already contained by '{}'.", object, feature)
            }
            Self::NotContained { object, feature } => {
                write!(f, "Object {} is not contained by '{}'.", object, feature)
            }
            Self::OutOfBounds {
                feature,
                index,
                len,
            } => write!(
                f,
                "Position {} is outside '{}' of length {}.",
                index, feature, len
            ),
            Self::ContainmentCycle { object } => {
                write!(f, "Object {} would contain itself.", object)
            }
        }
    }
}

impl std::error::Error for ModelError {}
