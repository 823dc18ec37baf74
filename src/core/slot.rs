use crate::core::{FeatureKind, Literal, ObjectId, Value, ValueType};

use super::map::FeatureMap;

/// Storage behind one feature of one object.
///
/// The variant is fixed by the feature's [`FeatureKind`]; `View` occupies
/// the table position of a group member, which stores nothing itself.
#[derive(Debug)]
pub(crate) enum Slot {
    Attr(AttrSlot),
    AttrSeq(Vec<Value>),
    Child(Option<ObjectId>),
    Children(Vec<ObjectId>),
    Map(FeatureMap),
    View,
}

impl Slot {
    pub fn for_feature(kind: &FeatureKind) -> Self {
        match kind {
            FeatureKind::Attr {
                many: false,
                default,
                ty,
                ..
            } => {
                // Enumerations default to their first literal even without
                // a declared default; everything else defaults to null.
                let default = default.clone().or(match ty {
                    ValueType::Enum(e) => Some(Value::Literal(Literal::new(*e, 0))),
                    _ => None,
                });
                Slot::Attr(AttrSlot::new(default))
            }
            FeatureKind::Attr { many: true, .. } => Slot::AttrSeq(Vec::new()),
            FeatureKind::Child { .. } => Slot::Child(None),
            FeatureKind::Children { .. } => Slot::Children(Vec::new()),
            FeatureKind::Group => Slot::Map(FeatureMap::new()),
            FeatureKind::Member { .. } => Slot::View,
        }
    }
}

/// Single-valued attribute storage: current value plus the explicit-set
/// flag.
///
/// The value starts at the schema default (null when none is declared), so
/// reads never have to consult the schema. Which is-set discipline applies
/// is decided by the caller per the feature's `unsettable` flag: explicit
/// tracking reads `set`, the plain discipline compares against the default
/// and ignores `set` entirely.
#[derive(Debug)]
pub(crate) struct AttrSlot {
    value: Value,
    default: Value,
    set: bool,
}

impl AttrSlot {
    pub fn new(default: Option<Value>) -> Self {
        let default = default.unwrap_or(Value::Null);
        Self {
            value: default.clone(),
            default,
            set: false,
        }
    }

    pub fn get(&self) -> &Value {
        &self.value
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Stores `value`, marks the slot explicitly set, returns the old value.
    pub fn set(&mut self, value: Value) -> Value {
        self.set = true;
        std::mem::replace(&mut self.value, value)
    }

    /// Restores the default, clears the flag, returns the old value.
    pub fn unset(&mut self) -> Value {
        self.set = false;
        std::mem::replace(&mut self.value, self.default.clone())
    }

    pub fn is_set(&self, unsettable: bool) -> bool {
        if unsettable {
            self.set
        } else {
            self.value != self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_discipline_compares_against_default() {
        let mut slot = AttrSlot::new(None);
        assert!(!slot.is_set(false));
        slot.set(Value::Str("x".into()));
        assert!(slot.is_set(false));
        slot.set(Value::Null);
        // Back at the default: reads as unset even though it was touched.
        assert!(!slot.is_set(false));
    }

    #[test]
    fn explicit_discipline_tracks_the_flag() {
        let mut slot = AttrSlot::new(Some(Value::Str("1.0.0".into())));
        assert!(!slot.is_set(true));
        slot.set(Value::Str("1.0.0".into()));
        // Default-equal but explicitly set.
        assert!(slot.is_set(true));
        let old = slot.unset();
        assert_eq!(old, Value::Str("1.0.0".into()));
        assert!(!slot.is_set(true));
        assert_eq!(slot.get(), &Value::Str("1.0.0".into()));
    }
}
