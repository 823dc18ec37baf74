use std::sync::Arc;

use crate::core::{
    Change, Event, FeatureId, FeatureKind, Literal, ModelError, ObjectId, SchemaEnum, Value,
};

use super::model::Model;
use super::notify::Batch;
use super::slot::Slot;

// ************************ Attributes (facade) ************************* //

impl Model {
    /// Generic read. Lists come back as [`Value::Seq`], feature maps as
    /// [`Value::Entries`], member projections as the filtered sequence.
    pub fn value(&self, object: ObjectId, feature: FeatureId) -> Result<Value, ModelError> {
        let (slot, def) = self.slot_and_def(object, feature)?;
        Ok(match slot {
            Slot::Attr(a) => a.get().clone(),
            Slot::AttrSeq(values) => Value::Seq(values.clone()),
            Slot::Child(c) => c.map(Value::Object).unwrap_or(Value::Null),
            Slot::Children(list) => {
                Value::Seq(list.iter().copied().map(Value::Object).collect())
            }
            Slot::Map(map) => Value::Entries(map.entries().to_vec()),
            Slot::View => {
                let node = self.node(object)?;
                let storage = Self::storage_of(def);
                match &node.slots[storage.index()] {
                    Slot::Map(map) => {
                        Value::Seq(map.member_values(feature).cloned().collect())
                    }
                    _ => unreachable!("member projects a non-map slot"),
                }
            }
        })
    }

    /// Generic write, the facade counterpart of every typed setter.
    ///
    /// Shapes: scalar values for attributes, [`Value::Seq`] to bulk-replace
    /// a many-valued attribute, child list or member projection,
    /// [`Value::Object`]/[`Value::Null`] for a single child,
    /// [`Value::Entries`] to bulk-replace a feature map.
    pub fn set_value(
        &mut self,
        object: ObjectId,
        feature: FeatureId,
        value: Value,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        match def.kind() {
            FeatureKind::Attr { many: false, .. } => {
                let coerced = Self::coerce_attr(&schema, &def, value)?;
                let mut batch = Batch::new();
                self.write_attr(&mut batch, object, feature, coerced)?;
                self.flush(batch);
                Ok(())
            }
            FeatureKind::Attr { many: true, .. } => match value {
                Value::Seq(values) => self.replace_attrs(object, feature, values),
                v => Err(ModelError::value_shape(def.name(), "a sequence", v.shape())),
            },
            FeatureKind::Child { .. } => match value {
                Value::Null => self.set_child(object, feature, None),
                Value::Object(c) => self.set_child(object, feature, Some(c)),
                v => Err(ModelError::value_shape(
                    def.name(),
                    "an object or null",
                    v.shape(),
                )),
            },
            FeatureKind::Children { .. } => match value {
                Value::Seq(values) => {
                    let mut children = Vec::with_capacity(values.len());
                    for v in values {
                        match v {
                            Value::Object(c) => children.push(c),
                            v => {
                                return Err(ModelError::value_shape(
                                    def.name(),
                                    "a sequence of objects",
                                    v.shape(),
                                ))
                            }
                        }
                    }
                    self.replace_children(object, feature, children)
                }
                v => Err(ModelError::value_shape(def.name(), "a sequence", v.shape())),
            },
            FeatureKind::Group => match value {
                Value::Entries(entries) => self.set_entries(object, feature, entries),
                v => Err(ModelError::value_shape(
                    def.name(),
                    "feature-map entries",
                    v.shape(),
                )),
            },
            FeatureKind::Member { .. } => match value {
                Value::Seq(values) => self.replace_member(object, feature, values),
                v => Err(ModelError::value_shape(def.name(), "a sequence", v.shape())),
            },
        }
    }

    /// Restores a feature to its schema-default state: attributes back to
    /// their default with the explicit-set flag cleared, containment and
    /// map features cleared out.
    pub fn unset(&mut self, object: ObjectId, feature: FeatureId) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        match def.kind() {
            FeatureKind::Attr { many: false, .. } => {
                let mut batch = Batch::new();
                let node = self.node_mut(object)?;
                match &mut node.slots[feature.index()] {
                    Slot::Attr(a) => {
                        let old = a.unset();
                        batch.push(Event::new(object, feature, Change::Unset { old }));
                    }
                    _ => unreachable!("attribute slot expected"),
                }
                self.flush(batch);
                Ok(())
            }
            FeatureKind::Child { .. } => self.set_child(object, feature, None),
            FeatureKind::Attr { many: true, .. }
            | FeatureKind::Children { .. }
            | FeatureKind::Group => self.clear(object, feature),
            FeatureKind::Member { .. } => self.replace_member(object, feature, Vec::new()),
        }
    }

    /// Was the feature explicitly set (explicit-tracked attributes), does
    /// it differ from its default (plain attributes), or does it hold
    /// anything (children, lists, maps, projections)?
    pub fn is_set(&self, object: ObjectId, feature: FeatureId) -> Result<bool, ModelError> {
        let (slot, def) = self.slot_and_def(object, feature)?;
        Ok(match slot {
            Slot::Attr(a) => a.is_set(def.is_unsettable()),
            Slot::AttrSeq(values) => !values.is_empty(),
            Slot::Child(c) => c.is_some(),
            Slot::Children(list) => !list.is_empty(),
            Slot::Map(map) => !map.is_empty(),
            Slot::View => {
                let node = self.node(object)?;
                match &node.slots[Self::storage_of(def).index()] {
                    Slot::Map(map) => map.member_values(feature).next().is_some(),
                    _ => unreachable!("member projects a non-map slot"),
                }
            }
        })
    }

    fn write_attr(
        &mut self,
        batch: &mut Batch,
        object: ObjectId,
        feature: FeatureId,
        value: Value,
    ) -> Result<(), ModelError> {
        let node = self.node_mut(object)?;
        match &mut node.slots[feature.index()] {
            Slot::Attr(a) => {
                let old = a.set(value.clone());
                batch.push(Event::new(object, feature, Change::Set { old, new: value }));
                Ok(())
            }
            _ => unreachable!("attribute slot expected"),
        }
    }

    /// Appends to a many-valued attribute.
    pub fn push_attr(
        &mut self,
        object: ObjectId,
        feature: FeatureId,
        value: Value,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        if !matches!(def.kind(), FeatureKind::Attr { many: true, .. }) {
            return Err(ModelError::value_shape(
                def.name(),
                "a many-valued attribute",
                Self::kind_name(def.kind()),
            ));
        }
        let coerced = Self::coerce_attr(&schema, &def, value)?;
        let mut batch = Batch::new();
        let node = self.node_mut(object)?;
        match &mut node.slots[feature.index()] {
            Slot::AttrSeq(values) => {
                let index = values.len();
                values.push(coerced.clone());
                batch.push(Event::new(
                    object,
                    feature,
                    Change::Add {
                        value: coerced,
                        index,
                    },
                ));
            }
            _ => unreachable!("many-valued attribute slot expected"),
        }
        self.flush(batch);
        Ok(())
    }

    /// Removes one element of a many-valued attribute by position.
    pub fn remove_attr(
        &mut self,
        object: ObjectId,
        feature: FeatureId,
        index: usize,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        let mut batch = Batch::new();
        let node = self.node_mut(object)?;
        match &mut node.slots[feature.index()] {
            Slot::AttrSeq(values) => {
                if index >= values.len() {
                    return Err(ModelError::out_of_bounds(def.name(), index, values.len()));
                }
                let value = values.remove(index);
                batch.push(Event::new(object, feature, Change::Remove { value, index }));
            }
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a many-valued attribute",
                    Self::kind_name(def.kind()),
                ))
            }
        }
        self.flush(batch);
        Ok(())
    }

    fn replace_attrs(
        &mut self,
        object: ObjectId,
        feature: FeatureId,
        values: Vec<Value>,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        let mut coerced = Vec::with_capacity(values.len());
        for v in values {
            coerced.push(Self::coerce_attr(&schema, &def, v)?);
        }
        let mut batch = Batch::new();
        let node = self.node_mut(object)?;
        match &mut node.slots[feature.index()] {
            Slot::AttrSeq(stored) => {
                for (i, value) in stored.drain(..).enumerate().collect::<Vec<_>>().into_iter().rev()
                {
                    batch.push(Event::new(object, feature, Change::Remove { value, index: i }));
                }
                for (i, value) in coerced.iter().enumerate() {
                    batch.push(Event::new(
                        object,
                        feature,
                        Change::Add {
                            value: value.clone(),
                            index: i,
                        },
                    ));
                }
                *stored = coerced;
            }
            _ => unreachable!("many-valued attribute slot expected"),
        }
        self.flush(batch);
        Ok(())
    }
}

// ******************* Named access (typed accessors) ******************* //

// Typed model wrappers address features by schema name; everything here
// resolves the name against the object's class and delegates to the
// id-addressed facade, so the two surfaces can't drift apart.
impl Model {
    pub fn feature_named(&self, object: ObjectId, name: &str) -> Result<FeatureId, ModelError> {
        let node = self.node(object)?;
        let class = self.schema.class(node.class);
        class
            .feature_named(name)
            .map(|d| d.id())
            .ok_or_else(|| ModelError::unknown_feature(class.name(), name))
    }

    pub fn attr_str(&self, object: ObjectId, name: &str) -> Result<Option<&str>, ModelError> {
        let feature = self.feature_named(object, name)?;
        let (slot, def) = self.slot_and_def(object, feature)?;
        match slot {
            Slot::Attr(a) => Ok(a.get().as_str()),
            _ => Err(ModelError::value_shape(
                def.name(),
                "an attribute",
                Self::kind_name(def.kind()),
            )),
        }
    }

    pub fn set_attr_str(
        &mut self,
        object: ObjectId,
        name: &str,
        value: &str,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.set_value(object, feature, Value::from(value))
    }

    pub fn attr_bool(&self, object: ObjectId, name: &str) -> Result<bool, ModelError> {
        let feature = self.feature_named(object, name)?;
        Ok(self.value(object, feature)?.as_bool().unwrap_or(false))
    }

    pub fn set_attr_bool(
        &mut self,
        object: ObjectId,
        name: &str,
        value: bool,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.set_value(object, feature, Value::Bool(value))
    }

    pub fn attr_int(&self, object: ObjectId, name: &str) -> Result<Option<i64>, ModelError> {
        let feature = self.feature_named(object, name)?;
        Ok(self.value(object, feature)?.as_int())
    }

    pub fn set_attr_int(
        &mut self,
        object: ObjectId,
        name: &str,
        value: i64,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.set_value(object, feature, Value::Int(value))
    }

    pub fn attr_double(&self, object: ObjectId, name: &str) -> Result<Option<f64>, ModelError> {
        let feature = self.feature_named(object, name)?;
        Ok(self.value(object, feature)?.as_double())
    }

    pub fn set_attr_double(
        &mut self,
        object: ObjectId,
        name: &str,
        value: f64,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.set_value(object, feature, Value::Double(value))
    }

    pub fn attr_strs(&self, object: ObjectId, name: &str) -> Result<Vec<&str>, ModelError> {
        let feature = self.feature_named(object, name)?;
        let (slot, def) = self.slot_and_def(object, feature)?;
        match slot {
            Slot::AttrSeq(values) => Ok(values.iter().filter_map(|v| v.as_str()).collect()),
            _ => Err(ModelError::value_shape(
                def.name(),
                "a many-valued attribute",
                Self::kind_name(def.kind()),
            )),
        }
    }

    pub fn push_attr_str(
        &mut self,
        object: ObjectId,
        name: &str,
        value: &str,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.push_attr(object, feature, Value::from(value))
    }

    pub fn attr_literal(&self, object: ObjectId, name: &str) -> Result<Literal, ModelError> {
        let feature = self.feature_named(object, name)?;
        let (slot, def) = self.slot_and_def(object, feature)?;
        match slot {
            Slot::Attr(a) => a.get().as_literal().ok_or_else(|| {
                ModelError::value_shape(def.name(), "an enumeration literal", a.get().shape())
            }),
            _ => Err(ModelError::value_shape(
                def.name(),
                "an attribute",
                Self::kind_name(def.kind()),
            )),
        }
    }

    /// Typed enumeration read; the stored literal converted through its
    /// index, which is shared between the schema and the Rust enum.
    pub fn attr_enum<E: SchemaEnum>(&self, object: ObjectId, name: &str) -> Result<E, ModelError> {
        let literal = self.attr_literal(object, name)?;
        let def = self
            .schema
            .enum_named(E::ENUM_NAME)
            .ok_or_else(|| ModelError::invalid_literal(E::ENUM_NAME, "<unregistered>"))?;
        if literal.enumeration() != def.id() {
            return Err(ModelError::invalid_literal(E::ENUM_NAME, literal.index()));
        }
        E::from_index(literal.index())
            .ok_or_else(|| ModelError::invalid_literal(E::ENUM_NAME, literal.index()))
    }

    /// Typed enumeration write. `None` reproduces the schema-default
    /// substitution: the default literal is stored, and whether the field
    /// then reads as set depends on its is-set discipline.
    pub fn set_attr_enum<E: SchemaEnum>(
        &mut self,
        object: ObjectId,
        name: &str,
        value: Option<E>,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        let value = match value {
            Some(e) => {
                let def = self
                    .schema
                    .enum_named(E::ENUM_NAME)
                    .ok_or_else(|| ModelError::invalid_literal(E::ENUM_NAME, e.as_str()))?;
                Value::Literal(Literal::new(def.id(), e.index()))
            }
            None => Value::Null,
        };
        self.set_value(object, feature, value)
    }

    pub fn push_attr_enum<E: SchemaEnum>(
        &mut self,
        object: ObjectId,
        name: &str,
        value: E,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        let def = self
            .schema
            .enum_named(E::ENUM_NAME)
            .ok_or_else(|| ModelError::invalid_literal(E::ENUM_NAME, value.as_str()))?;
        self.push_attr(object, feature, Value::Literal(Literal::new(def.id(), value.index())))
    }

    pub fn attr_enums<E: SchemaEnum>(
        &self,
        object: ObjectId,
        name: &str,
    ) -> Result<Vec<E>, ModelError> {
        let feature = self.feature_named(object, name)?;
        let values = match self.value(object, feature)? {
            Value::Seq(values) => values,
            v => {
                return Err(ModelError::value_shape(
                    "enumeration list",
                    "a sequence",
                    v.shape(),
                ))
            }
        };
        values
            .iter()
            .map(|v| {
                v.as_literal()
                    .and_then(|l| E::from_index(l.index()))
                    .ok_or_else(|| ModelError::invalid_literal(E::ENUM_NAME, v.shape()))
            })
            .collect()
    }

    pub fn unset_named(&mut self, object: ObjectId, name: &str) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.unset(object, feature)
    }

    pub fn is_set_named(&self, object: ObjectId, name: &str) -> Result<bool, ModelError> {
        let feature = self.feature_named(object, name)?;
        self.is_set(object, feature)
    }

    pub fn child_named(&self, object: ObjectId, name: &str) -> Result<Option<ObjectId>, ModelError> {
        let feature = self.feature_named(object, name)?;
        self.child(object, feature)
    }

    pub fn set_child_named(
        &mut self,
        object: ObjectId,
        name: &str,
        child: Option<ObjectId>,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.set_child(object, feature, child)
    }

    pub fn children_named(&self, object: ObjectId, name: &str) -> Result<&[ObjectId], ModelError> {
        let feature = self.feature_named(object, name)?;
        self.children(object, feature)
    }

    pub fn add_child_named(
        &mut self,
        object: ObjectId,
        name: &str,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.add_child(object, feature, child)
    }

    pub fn remove_child_named(
        &mut self,
        object: ObjectId,
        name: &str,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.remove_child(object, feature, child)
    }

    pub fn member_objects_named(
        &self,
        object: ObjectId,
        name: &str,
    ) -> Result<Vec<ObjectId>, ModelError> {
        let feature = self.feature_named(object, name)?;
        self.member_objects(object, feature)
    }

    pub fn add_member_named(
        &mut self,
        object: ObjectId,
        name: &str,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        let feature = self.feature_named(object, name)?;
        self.add_member(object, feature, Value::Object(child))
    }
}

