use std::sync::Arc;

use crate::core::{
    Change, Containment, Event, FeatureId, FeatureKind, MapEntry, ModelError, ObjectId, Value,
};

use super::model::Model;
use super::notify::Batch;
use super::slot::Slot;

// **************************** Containment ***************************** //

impl Model {
    /// Current value of a single-child feature.
    pub fn child(&self, object: ObjectId, feature: FeatureId) -> Result<Option<ObjectId>, ModelError> {
        let (slot, def) = self.slot_and_def(object, feature)?;
        match slot {
            Slot::Child(c) => Ok(*c),
            _ => Err(ModelError::value_shape(
                def.name(),
                "a single child",
                Self::kind_name(def.kind()),
            )),
        }
    }

    /// Elements of a containment list, in order. Never fails on an empty
    /// list; the slot exists from the moment the object does.
    pub fn children(&self, object: ObjectId, feature: FeatureId) -> Result<&[ObjectId], ModelError> {
        let (slot, def) = self.slot_and_def(object, feature)?;
        match slot {
            Slot::Children(list) => Ok(list),
            _ => Err(ModelError::value_shape(
                def.name(),
                "a containment list",
                Self::kind_name(def.kind()),
            )),
        }
    }

    /// Assigns a single-child feature.
    ///
    /// A child owned elsewhere is detached from there first; the old and
    /// new holder each see one structural event, the child sees one
    /// container-change event. Replacing a child detaches the old one into
    /// a root. Assigning the present value again is a no-op that still
    /// emits a touch event.
    pub fn set_child(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        child: Option<ObjectId>,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let pnode = self.node(parent)?;
        let def = Self::def(&schema, pnode, feature)?.clone();
        let of = match def.kind() {
            FeatureKind::Child { class } => *class,
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a single child",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        let old = match &pnode.slots[feature.index()] {
            Slot::Child(c) => *c,
            _ => unreachable!("single-child slot expected"),
        };

        let mut batch = Batch::new();
        match child {
            Some(c) => {
                let cnode = self.node(c)?;
                if !schema.conforms(cnode.class, of) {
                    return Err(ModelError::wrong_class(
                        schema.class(of).name(),
                        schema.class(cnode.class).name(),
                    ));
                }
                if old == Some(c) {
                    batch.push(Event::new(
                        parent,
                        feature,
                        Change::Set {
                            old: Value::Object(c),
                            new: Value::Object(c),
                        },
                    ));
                    self.flush(batch);
                    return Ok(());
                }
                if self.would_cycle(parent, c) {
                    return Err(ModelError::cycle(c));
                }
                if let Some(o) = old {
                    self.node_mut(o)?.container = None;
                    batch.push(Event::new(
                        o,
                        feature,
                        Change::Container {
                            old: Some(parent),
                            new: None,
                        },
                    ));
                }
                let prev = self.extract(&mut batch, c)?;
                match &mut self.node_mut(parent)?.slots[feature.index()] {
                    Slot::Child(slot) => *slot = Some(c),
                    _ => unreachable!("single-child slot expected"),
                }
                // Removal of the old child and arrival of the new one
                // coalesce into this one holder-side event.
                batch.push(Event::new(
                    parent,
                    feature,
                    Change::Set {
                        old: old.map(Value::Object).unwrap_or(Value::Null),
                        new: Value::Object(c),
                    },
                ));
                self.node_mut(c)?.container = Some(Containment { parent, feature });
                batch.push(Event::new(
                    c,
                    feature,
                    Change::Container {
                        old: prev.map(|p| p.parent),
                        new: Some(parent),
                    },
                ));
            }
            None => {
                if let Some(o) = old {
                    match &mut self.node_mut(parent)?.slots[feature.index()] {
                        Slot::Child(slot) => *slot = None,
                        _ => unreachable!("single-child slot expected"),
                    }
                    self.node_mut(o)?.container = None;
                    batch.push(Event::new(
                        parent,
                        feature,
                        Change::Set {
                            old: Value::Object(o),
                            new: Value::Null,
                        },
                    ));
                    batch.push(Event::new(
                        o,
                        feature,
                        Change::Container {
                            old: Some(parent),
                            new: None,
                        },
                    ));
                } else {
                    batch.push(Event::new(
                        parent,
                        feature,
                        Change::Set {
                            old: Value::Null,
                            new: Value::Null,
                        },
                    ));
                }
            }
        }
        self.flush(batch);
        Ok(())
    }

    /// Appends to a containment list.
    pub fn add_child(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        self.insert_child_at(parent, feature, None, child)
    }

    /// Inserts into a containment list at `index`.
    pub fn insert_child(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        index: usize,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        self.insert_child_at(parent, feature, Some(index), child)
    }

    fn insert_child_at(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        index: Option<usize>,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let pnode = self.node(parent)?;
        let def = Self::def(&schema, pnode, feature)?.clone();
        let of = match def.kind() {
            FeatureKind::Children { class } => *class,
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a containment list",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        let len = match &pnode.slots[feature.index()] {
            Slot::Children(list) => {
                if list.contains(&child) {
                    return Err(ModelError::already_contained(child, def.name()));
                }
                list.len()
            }
            _ => unreachable!("containment list slot expected"),
        };
        let index = index.unwrap_or(len);
        if index > len {
            return Err(ModelError::out_of_bounds(def.name(), index, len));
        }
        let cnode = self.node(child)?;
        if !schema.conforms(cnode.class, of) {
            return Err(ModelError::wrong_class(
                schema.class(of).name(),
                schema.class(cnode.class).name(),
            ));
        }
        if self.would_cycle(parent, child) {
            return Err(ModelError::cycle(child));
        }

        let mut batch = Batch::new();
        let prev = self.extract(&mut batch, child)?;
        match &mut self.node_mut(parent)?.slots[feature.index()] {
            Slot::Children(list) => list.insert(index, child),
            _ => unreachable!("containment list slot expected"),
        }
        batch.push(Event::new(
            parent,
            feature,
            Change::Add {
                value: Value::Object(child),
                index,
            },
        ));
        self.node_mut(child)?.container = Some(Containment { parent, feature });
        batch.push(Event::new(
            child,
            feature,
            Change::Container {
                old: prev.map(|p| p.parent),
                new: Some(parent),
            },
        ));
        self.flush(batch);
        Ok(())
    }

    /// Removes an element from a containment list. The former child stays
    /// alive as a root of its own tree.
    pub fn remove_child(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        child: ObjectId,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let pnode = self.node(parent)?;
        let def = Self::def(&schema, pnode, feature)?.clone();
        let mut batch = Batch::new();
        let index = match &mut self.node_mut(parent)?.slots[feature.index()] {
            Slot::Children(list) => {
                let Some(i) = list.iter().position(|c| *c == child) else {
                    return Err(ModelError::not_contained(child, def.name()));
                };
                list.remove(i);
                i
            }
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a containment list",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        batch.push(Event::new(
            parent,
            feature,
            Change::Remove {
                value: Value::Object(child),
                index,
            },
        ));
        self.node_mut(child)?.container = None;
        batch.push(Event::new(
            child,
            feature,
            Change::Container {
                old: Some(parent),
                new: None,
            },
        ));
        self.flush(batch);
        Ok(())
    }

    /// Explicit reorder within a containment list. Ownership is untouched.
    pub fn move_child(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        from: usize,
        to: usize,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let pnode = self.node(parent)?;
        let def = Self::def(&schema, pnode, feature)?.clone();
        let mut batch = Batch::new();
        match &mut self.node_mut(parent)?.slots[feature.index()] {
            Slot::Children(list) => {
                let len = list.len();
                if from >= len {
                    return Err(ModelError::out_of_bounds(def.name(), from, len));
                }
                if to >= len {
                    return Err(ModelError::out_of_bounds(def.name(), to, len));
                }
                let child = list.remove(from);
                list.insert(to, child);
                batch.push(Event::new(
                    parent,
                    feature,
                    Change::Move {
                        value: Value::Object(child),
                        from,
                        to,
                    },
                ));
            }
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a containment list",
                    Self::kind_name(def.kind()),
                ))
            }
        }
        self.flush(batch);
        Ok(())
    }

    /// Empties a many-valued feature: containment list, many-valued
    /// attribute or feature map. Former children become roots.
    pub fn clear(&mut self, object: ObjectId, feature: FeatureId) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, feature)?.clone();
        let mut batch = Batch::new();
        match def.kind() {
            FeatureKind::Children { .. } => {
                let removed = match &mut self.node_mut(object)?.slots[feature.index()] {
                    Slot::Children(list) => std::mem::take(list),
                    _ => unreachable!("containment list slot expected"),
                };
                for (i, c) in removed.iter().enumerate().rev() {
                    batch.push(Event::new(
                        object,
                        feature,
                        Change::Remove {
                            value: Value::Object(*c),
                            index: i,
                        },
                    ));
                }
                for c in removed {
                    self.node_mut(c)?.container = None;
                    batch.push(Event::new(
                        c,
                        feature,
                        Change::Container {
                            old: Some(object),
                            new: None,
                        },
                    ));
                }
            }
            FeatureKind::Attr { many: true, .. } => {
                let removed = match &mut self.node_mut(object)?.slots[feature.index()] {
                    Slot::AttrSeq(values) => std::mem::take(values),
                    _ => unreachable!("many-valued attribute slot expected"),
                };
                for (i, value) in removed.into_iter().enumerate().rev() {
                    batch.push(Event::new(object, feature, Change::Remove { value, index: i }));
                }
            }
            FeatureKind::Group => {
                let removed = match &mut self.node_mut(object)?.slots[feature.index()] {
                    Slot::Map(map) => map.take(),
                    _ => unreachable!("feature-map slot expected"),
                };
                for (i, entry) in removed.iter().enumerate().rev() {
                    batch.push(Event::new(
                        object,
                        entry.feature,
                        Change::Remove {
                            value: entry.value.clone(),
                            index: i,
                        },
                    ));
                }
                for entry in removed {
                    if let Some(c) = entry.value.as_object() {
                        self.node_mut(c)?.container = None;
                        batch.push(Event::new(
                            c,
                            entry.feature,
                            Change::Container {
                                old: Some(object),
                                new: None,
                            },
                        ));
                    }
                }
            }
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a many-valued feature",
                    Self::kind_name(def.kind()),
                ))
            }
        }
        self.flush(batch);
        Ok(())
    }

    /// Bulk list assignment: clear, then add everything in order. The
    /// standard generic "set the whole list" operation.
    pub fn replace_children(
        &mut self,
        parent: ObjectId,
        feature: FeatureId,
        children: Vec<ObjectId>,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let pnode = self.node(parent)?;
        let def = Self::def(&schema, pnode, feature)?.clone();
        let of = match def.kind() {
            FeatureKind::Children { class } => *class,
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a containment list",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        // Everything is checked before anything mutates.
        for (i, c) in children.iter().enumerate() {
            if children[..i].contains(c) {
                return Err(ModelError::already_contained(*c, def.name()));
            }
            let cnode = self.node(*c)?;
            if !schema.conforms(cnode.class, of) {
                return Err(ModelError::wrong_class(
                    schema.class(of).name(),
                    schema.class(cnode.class).name(),
                ));
            }
            if self.would_cycle(parent, *c) {
                return Err(ModelError::cycle(*c));
            }
        }

        let mut batch = Batch::new();
        let old = match &mut self.node_mut(parent)?.slots[feature.index()] {
            Slot::Children(list) => std::mem::take(list),
            _ => unreachable!("containment list slot expected"),
        };
        for (i, c) in old.iter().enumerate().rev() {
            batch.push(Event::new(
                parent,
                feature,
                Change::Remove {
                    value: Value::Object(*c),
                    index: i,
                },
            ));
        }
        for c in &old {
            if !children.contains(c) {
                self.node_mut(*c)?.container = None;
                batch.push(Event::new(
                    *c,
                    feature,
                    Change::Container {
                        old: Some(parent),
                        new: None,
                    },
                ));
            }
        }
        for (i, c) in children.iter().enumerate() {
            if !old.contains(c) {
                let prev = self.extract(&mut batch, *c)?;
                self.node_mut(*c)?.container = Some(Containment { parent, feature });
                batch.push(Event::new(
                    *c,
                    feature,
                    Change::Container {
                        old: prev.map(|p| p.parent),
                        new: Some(parent),
                    },
                ));
            }
            match &mut self.node_mut(parent)?.slots[feature.index()] {
                Slot::Children(list) => list.push(*c),
                _ => unreachable!("containment list slot expected"),
            }
            batch.push(Event::new(
                parent,
                feature,
                Change::Add {
                    value: Value::Object(*c),
                    index: i,
                },
            ));
        }
        self.flush(batch);
        Ok(())
    }
}

// **************************** Feature maps **************************** //

impl Model {
    /// Backing sequence of a feature map, in document order.
    pub fn entries(&self, object: ObjectId, group: FeatureId) -> Result<&[MapEntry], ModelError> {
        let (slot, def) = self.slot_and_def(object, group)?;
        match slot {
            Slot::Map(map) => Ok(map.entries()),
            _ => Err(ModelError::value_shape(
                def.name(),
                "a feature map",
                Self::kind_name(def.kind()),
            )),
        }
    }

    /// Projection of one member kind over its group, in backing order.
    pub fn member_values(
        &self,
        object: ObjectId,
        member: FeatureId,
    ) -> Result<Vec<Value>, ModelError> {
        let (_, def) = self.slot_and_def(object, member)?;
        let storage = match def.kind() {
            FeatureKind::Member { group, .. } => *group,
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a member projection",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        let node = self.node(object)?;
        match &node.slots[storage.index()] {
            Slot::Map(map) => Ok(map.member_values(member).cloned().collect()),
            _ => unreachable!("member projects a non-map slot"),
        }
    }

    /// Object-valued member projection, for element content.
    pub fn member_objects(
        &self,
        object: ObjectId,
        member: FeatureId,
    ) -> Result<Vec<ObjectId>, ModelError> {
        Ok(self
            .member_values(object, member)?
            .iter()
            .filter_map(|v| v.as_object())
            .collect())
    }

    /// Appends one entry through a member projection. Entry order across
    /// all members is append order, which is what keeps document order.
    pub fn add_member(
        &mut self,
        object: ObjectId,
        member: FeatureId,
        value: Value,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, member)?.clone();
        let (storage, of) = match def.kind() {
            FeatureKind::Member { group, class } => (*group, *class),
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a member projection",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        let mut batch = Batch::new();
        match value {
            Value::Object(c) => {
                let cnode = self.node(c)?;
                if !schema.conforms(cnode.class, of) {
                    return Err(ModelError::wrong_class(
                        schema.class(of).name(),
                        schema.class(cnode.class).name(),
                    ));
                }
                match &self.node(object)?.slots[storage.index()] {
                    Slot::Map(map) if map.contains_object(c) => {
                        return Err(ModelError::already_contained(c, def.name()));
                    }
                    _ => {}
                }
                if self.would_cycle(object, c) {
                    return Err(ModelError::cycle(c));
                }
                let prev = self.extract(&mut batch, c)?;
                let index = match &mut self.node_mut(object)?.slots[storage.index()] {
                    Slot::Map(map) => {
                        map.push(MapEntry::new(member, Value::Object(c)));
                        map.len() - 1
                    }
                    _ => unreachable!("feature-map slot expected"),
                };
                batch.push(Event::new(
                    object,
                    member,
                    Change::Add {
                        value: Value::Object(c),
                        index,
                    },
                ));
                self.node_mut(c)?.container = Some(Containment {
                    parent: object,
                    feature: member,
                });
                batch.push(Event::new(
                    c,
                    member,
                    Change::Container {
                        old: prev.map(|p| p.parent),
                        new: Some(object),
                    },
                ));
            }
            // Text-ish content carries no ownership bookkeeping.
            Value::Str(s) => {
                let index = match &mut self.node_mut(object)?.slots[storage.index()] {
                    Slot::Map(map) => {
                        map.push(MapEntry::new(member, Value::Str(s.clone())));
                        map.len() - 1
                    }
                    _ => unreachable!("feature-map slot expected"),
                };
                batch.push(Event::new(
                    object,
                    member,
                    Change::Add {
                        value: Value::Str(s),
                        index,
                    },
                ));
            }
            v => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "an object or a string",
                    v.shape(),
                ))
            }
        }
        self.flush(batch);
        Ok(())
    }

    /// Removes the `nth` entry of a member projection; the backing entry
    /// disappears with it.
    pub fn remove_member(
        &mut self,
        object: ObjectId,
        member: FeatureId,
        nth: usize,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, member)?.clone();
        let storage = match def.kind() {
            FeatureKind::Member { group, .. } => *group,
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a member projection",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        let mut batch = Batch::new();
        let entry = match &mut self.node_mut(object)?.slots[storage.index()] {
            Slot::Map(map) => {
                let Some(pos) = map.member_position(member, nth) else {
                    let len = map.member_positions(member).len();
                    return Err(ModelError::out_of_bounds(def.name(), nth, len));
                };
                let entry = map.remove(pos);
                batch.push(Event::new(
                    object,
                    member,
                    Change::Remove {
                        value: entry.value.clone(),
                        index: pos,
                    },
                ));
                entry
            }
            _ => unreachable!("feature-map slot expected"),
        };
        if let Some(c) = entry.value.as_object() {
            self.node_mut(c)?.container = None;
            batch.push(Event::new(
                c,
                member,
                Change::Container {
                    old: Some(object),
                    new: None,
                },
            ));
        }
        self.flush(batch);
        Ok(())
    }

    /// Replaces a member projection's content, leaving other members'
    /// entries where they are. New entries go to the end of the backing.
    pub fn replace_member(
        &mut self,
        object: ObjectId,
        member: FeatureId,
        values: Vec<Value>,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let def = Self::def(&schema, self.node(object)?, member)?.clone();
        let (storage, of) = match def.kind() {
            FeatureKind::Member { group, class } => (*group, *class),
            _ => {
                return Err(ModelError::value_shape(
                    def.name(),
                    "a member projection",
                    Self::kind_name(def.kind()),
                ))
            }
        };
        for (i, v) in values.iter().enumerate() {
            match v {
                Value::Object(c) => {
                    if values[..i].iter().any(|p| p.as_object() == Some(*c)) {
                        return Err(ModelError::already_contained(*c, def.name()));
                    }
                    let cnode = self.node(*c)?;
                    if !schema.conforms(cnode.class, of) {
                        return Err(ModelError::wrong_class(
                            schema.class(of).name(),
                            schema.class(cnode.class).name(),
                        ));
                    }
                    if self.would_cycle(object, *c) {
                        return Err(ModelError::cycle(*c));
                    }
                }
                Value::Str(_) => {}
                v => {
                    return Err(ModelError::value_shape(
                        def.name(),
                        "an object or a string",
                        v.shape(),
                    ))
                }
            }
        }

        let mut batch = Batch::new();
        let old: Vec<MapEntry> = match &mut self.node_mut(object)?.slots[storage.index()] {
            Slot::Map(map) => {
                let mut removed = Vec::new();
                for pos in map.member_positions(member).into_iter().rev() {
                    let entry = map.remove(pos);
                    batch.push(Event::new(
                        object,
                        member,
                        Change::Remove {
                            value: entry.value.clone(),
                            index: pos,
                        },
                    ));
                    removed.push(entry);
                }
                removed
            }
            _ => unreachable!("feature-map slot expected"),
        };
        let kept: Vec<ObjectId> = values.iter().filter_map(|v| v.as_object()).collect();
        for entry in &old {
            if let Some(c) = entry.value.as_object() {
                if !kept.contains(&c) {
                    self.node_mut(c)?.container = None;
                    batch.push(Event::new(
                        c,
                        member,
                        Change::Container {
                            old: Some(object),
                            new: None,
                        },
                    ));
                }
            }
        }
        let was_here: Vec<ObjectId> = old.iter().filter_map(|e| e.value.as_object()).collect();
        for v in values {
            if let Some(c) = v.as_object() {
                if !was_here.contains(&c) {
                    let prev = self.extract(&mut batch, c)?;
                    batch.push(Event::new(
                        c,
                        member,
                        Change::Container {
                            old: prev.map(|p| p.parent),
                            new: Some(object),
                        },
                    ));
                }
                self.node_mut(c)?.container = Some(Containment {
                    parent: object,
                    feature: member,
                });
            }
            let index = match &mut self.node_mut(object)?.slots[storage.index()] {
                Slot::Map(map) => {
                    map.push(MapEntry::new(member, v.clone()));
                    map.len() - 1
                }
                _ => unreachable!("feature-map slot expected"),
            };
            batch.push(Event::new(object, member, Change::Add { value: v, index }));
        }
        self.flush(batch);
        Ok(())
    }

    /// Atomically replaces a feature map's whole backing sequence, the
    /// group-level bulk setter.
    pub fn set_entries(
        &mut self,
        object: ObjectId,
        group: FeatureId,
        entries: Vec<MapEntry>,
    ) -> Result<(), ModelError> {
        let schema = Arc::clone(&self.schema);
        let node = self.node(object)?;
        let class = schema.class(node.class);
        let def = Self::def(&schema, node, group)?.clone();
        if !matches!(def.kind(), FeatureKind::Group) {
            return Err(ModelError::value_shape(
                def.name(),
                "a feature map",
                Self::kind_name(def.kind()),
            ));
        }
        // Everything is checked before anything mutates.
        for (i, entry) in entries.iter().enumerate() {
            let mdef = class
                .feature(entry.feature)
                .ok_or_else(|| ModelError::unknown_feature(class.name(), entry.feature))?;
            let of = match mdef.kind() {
                FeatureKind::Member { group: g, class: of } if *g == group => *of,
                _ => {
                    return Err(ModelError::value_shape(
                        mdef.name(),
                        "a member of this group",
                        Self::kind_name(mdef.kind()),
                    ))
                }
            };
            match &entry.value {
                Value::Object(c) => {
                    if entries[..i].iter().any(|p| p.value.as_object() == Some(*c)) {
                        return Err(ModelError::already_contained(*c, def.name()));
                    }
                    let cnode = self.node(*c)?;
                    if !schema.conforms(cnode.class, of) {
                        return Err(ModelError::wrong_class(
                            schema.class(of).name(),
                            schema.class(cnode.class).name(),
                        ));
                    }
                    if self.would_cycle(object, *c) {
                        return Err(ModelError::cycle(*c));
                    }
                }
                Value::Str(_) => {}
                v => {
                    return Err(ModelError::value_shape(
                        mdef.name(),
                        "an object or a string",
                        v.shape(),
                    ))
                }
            }
        }

        let mut batch = Batch::new();
        let old = match &mut self.node_mut(object)?.slots[group.index()] {
            Slot::Map(map) => map.take(),
            _ => unreachable!("feature-map slot expected"),
        };
        for (i, entry) in old.iter().enumerate().rev() {
            batch.push(Event::new(
                object,
                entry.feature,
                Change::Remove {
                    value: entry.value.clone(),
                    index: i,
                },
            ));
        }
        let kept: Vec<ObjectId> = entries
            .iter()
            .filter_map(|e| e.value.as_object())
            .collect();
        for entry in &old {
            if let Some(c) = entry.value.as_object() {
                if !kept.contains(&c) {
                    self.node_mut(c)?.container = None;
                    batch.push(Event::new(
                        c,
                        entry.feature,
                        Change::Container {
                            old: Some(object),
                            new: None,
                        },
                    ));
                }
            }
        }
        let was_here: Vec<ObjectId> = old.iter().filter_map(|e| e.value.as_object()).collect();
        for (i, entry) in entries.into_iter().enumerate() {
            if let Some(c) = entry.value.as_object() {
                if !was_here.contains(&c) {
                    let prev = self.extract(&mut batch, c)?;
                    batch.push(Event::new(
                        c,
                        entry.feature,
                        Change::Container {
                            old: prev.map(|p| p.parent),
                            new: Some(object),
                        },
                    ));
                }
                self.node_mut(c)?.container = Some(Containment {
                    parent: object,
                    feature: entry.feature,
                });
            }
            batch.push(Event::new(
                object,
                entry.feature,
                Change::Add {
                    value: entry.value.clone(),
                    index: i,
                },
            ));
            match &mut self.node_mut(object)?.slots[group.index()] {
                Slot::Map(map) => map.push(entry),
                _ => unreachable!("feature-map slot expected"),
            }
        }
        self.flush(batch);
        Ok(())
    }
}

