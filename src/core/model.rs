use log::{debug, error};
use std::rc::Rc;
use std::sync::Arc;

use crate::core::{
    Change, ClassId, Containment, Event, FeatureDef, FeatureId, FeatureKind, Literal, ModelError,
    ObjectId, Observer, ObserverId, Schema, Value, ValueType,
};

use super::notify::{Batch, Observers};
use super::object::Node;
use super::slot::Slot;

#[derive(Debug)]
struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// The arena owning a forest of schema-typed objects.
///
/// Every read and every mutation goes through the model; objects are
/// addressed by [`ObjectId`]. Mutations validate against the schema, keep
/// the containment invariant (at most one container per object, no
/// cycles), batch the resulting events and flush them to observers once
/// the operation has fully applied.
///
/// Not thread-safe by design: the tree is made for exclusive single-owner
/// mutation. Callers needing concurrent access serialize externally.
pub struct Model {
    pub(super) schema: Arc<Schema>,
    entries: Vec<Entry>,
    free: Vec<u32>,
    observers: Observers,
}

// ***************************** Lifecycle ****************************** //

impl Model {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            entries: Vec::new(),
            free: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Instantiates a concrete class. The fresh object is a root: it has
    /// no container until something attaches it.
    pub fn create(&mut self, class: ClassId) -> Result<ObjectId, ModelError> {
        let def = self
            .schema
            .classes()
            .get(class.index())
            .ok_or_else(|| ModelError::unknown_class(&format!("#{}", class.index())))?;
        if def.is_abstract() {
            return Err(ModelError::AbstractClass { class: def.name() });
        }
        let node = Node::new(def);
        Ok(self.alloc(node))
    }

    pub fn create_named(&mut self, class: &str) -> Result<ObjectId, ModelError> {
        let id = self
            .schema
            .class_named(class)
            .map(|c| c.id())
            .ok_or_else(|| ModelError::unknown_class(class))?;
        self.create(id)
    }

    /// Drops an object and everything it transitively contains. The root
    /// is detached from its container first (with events); the interior of
    /// the dropped subtree goes silently.
    pub fn destroy(&mut self, object: ObjectId) -> Result<(), ModelError> {
        self.node(object)?;
        let mut batch = Batch::new();
        if let Some(at) = self.extract(&mut batch, object)? {
            batch.push(Event::new(
                object,
                at.feature,
                Change::Container {
                    old: Some(at.parent),
                    new: None,
                },
            ));
        }
        let subtree = self.subtree(object)?;
        debug!("destroying {} ({} objects)", object, subtree.len());
        for id in subtree {
            self.dealloc(id);
        }
        self.flush(batch);
        Ok(())
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.node(object).is_ok()
    }

    pub fn class_of(&self, object: ObjectId) -> Result<ClassId, ModelError> {
        self.node(object).map(|n| n.class)
    }

    /// True if the object is an instance of `class` or one of its
    /// subclasses.
    pub fn instance_of(&self, object: ObjectId, class: &str) -> Result<bool, ModelError> {
        let node = self.node(object)?;
        Ok(self
            .schema
            .class_named(class)
            .map(|c| self.schema.conforms(node.class, c.id()))
            .unwrap_or(false))
    }

    /// Where the object currently lives, if anywhere.
    pub fn container(&self, object: ObjectId) -> Result<Option<Containment>, ModelError> {
        self.node(object).map(|n| n.container)
    }

    fn alloc(&mut self, node: Node) -> ObjectId {
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.node = Some(node);
            ObjectId::new(index, entry.generation)
        } else {
            self.entries.push(Entry {
                generation: 0,
                node: Some(node),
            });
            ObjectId::new(self.entries.len() as u32 - 1, 0)
        }
    }

    fn dealloc(&mut self, object: ObjectId) {
        let entry = &mut self.entries[object.index()];
        entry.node = None;
        entry.generation += 1;
        self.free.push(object.index() as u32);
        self.observers.forget(object);
    }

    /// The object and everything it transitively contains.
    fn subtree(&self, root: ObjectId) -> Result<Vec<ObjectId>, ModelError> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id)?;
            for slot in node.slots.iter() {
                match slot {
                    Slot::Child(Some(c)) => stack.push(*c),
                    Slot::Children(list) => stack.extend(list.iter().copied()),
                    Slot::Map(map) => {
                        stack.extend(map.entries().iter().filter_map(|e| e.value.as_object()))
                    }
                    _ => {}
                }
            }
        }
        Ok(out)
    }
}

// ************************** Internal access *************************** //

impl Model {
    pub(super) fn node(&self, object: ObjectId) -> Result<&Node, ModelError> {
        self.entries
            .get(object.index())
            .filter(|e| e.generation == object.generation())
            .and_then(|e| e.node.as_ref())
            .ok_or_else(|| ModelError::stale(object))
    }

    pub(super) fn node_mut(&mut self, object: ObjectId) -> Result<&mut Node, ModelError> {
        self.entries
            .get_mut(object.index())
            .filter(|e| e.generation == object.generation())
            .and_then(|e| e.node.as_mut())
            .ok_or_else(|| ModelError::stale(object))
    }

    pub(super) fn def<'s>(
        schema: &'s Schema,
        node: &Node,
        feature: FeatureId,
    ) -> Result<&'s FeatureDef, ModelError> {
        let class = schema.class(node.class);
        class
            .feature(feature)
            .ok_or_else(|| ModelError::unknown_feature(class.name(), feature))
    }

    pub(super) fn slot_and_def(
        &self,
        object: ObjectId,
        feature: FeatureId,
    ) -> Result<(&Slot, &FeatureDef), ModelError> {
        let node = self.node(object)?;
        let def = Self::def(&self.schema, node, feature)?;
        Ok((&node.slots[feature.index()], def))
    }

    /// The slot a feature stores into: its own for most kinds, the group's
    /// for member projections.
    pub(super) fn storage_of(def: &FeatureDef) -> FeatureId {
        match def.kind() {
            FeatureKind::Member { group, .. } => *group,
            _ => def.id(),
        }
    }

    pub(super) fn kind_name(kind: &FeatureKind) -> &'static str {
        match kind {
            FeatureKind::Attr { many: false, .. } => "an attribute",
            FeatureKind::Attr { many: true, .. } => "a many-valued attribute",
            FeatureKind::Child { .. } => "a single child",
            FeatureKind::Children { .. } => "a containment list",
            FeatureKind::Group => "a feature map",
            FeatureKind::Member { .. } => "a member projection",
        }
    }

    fn type_name(ty: ValueType) -> &'static str {
        match ty {
            ValueType::Bool => "a boolean",
            ValueType::Int => "an integer",
            ValueType::Double => "a double",
            ValueType::Str => "a string",
            ValueType::Enum(_) => "an enumeration literal",
        }
    }

    /// Checks a candidate attribute value against the feature's declared
    /// type. Null aimed at an enumeration becomes the default literal;
    /// string literals are resolved against the enumeration's closed set.
    pub(super) fn coerce_attr(
        schema: &Schema,
        def: &FeatureDef,
        value: Value,
    ) -> Result<Value, ModelError> {
        let ty = match def.kind() {
            FeatureKind::Attr { ty, .. } => *ty,
            _ => unreachable!("coerce_attr on a non-attribute"),
        };
        match (ty, value) {
            (ValueType::Enum(e), Value::Null) => Ok(def
                .default_value()
                .cloned()
                .unwrap_or(Value::Literal(Literal::new(e, 0)))),
            (ValueType::Enum(e), Value::Literal(l)) => {
                let en = schema.enum_def(e);
                if l.enumeration() == e && l.index() < en.literals().len() as u16 {
                    Ok(Value::Literal(l))
                } else {
                    Err(ModelError::invalid_literal(en.name(), l.index()))
                }
            }
            (ValueType::Enum(e), Value::Str(s)) => {
                let en = schema.enum_def(e);
                en.index_of(&s)
                    .map(|i| Value::Literal(Literal::new(e, i)))
                    .ok_or_else(|| ModelError::invalid_literal(en.name(), s))
            }
            (_, Value::Null) => Ok(Value::Null),
            (ValueType::Bool, v @ Value::Bool(_)) => Ok(v),
            (ValueType::Int, v @ Value::Int(_)) => Ok(v),
            (ValueType::Double, v @ Value::Double(_)) => Ok(v),
            (ValueType::Str, v @ Value::Str(_)) => Ok(v),
            (_, v) => {
                error!("feature '{}' rejected {}", def.name(), v.shape());
                Err(ModelError::value_shape(
                    def.name(),
                    Self::type_name(ty),
                    v.shape(),
                ))
            }
        }
    }

    /// True if attaching `child` under `parent` would make `child` contain
    /// itself.
    pub(super) fn would_cycle(&self, parent: ObjectId, child: ObjectId) -> bool {
        let mut cur = Some(parent);
        while let Some(c) = cur {
            if c == child {
                return true;
            }
            cur = self
                .node(c)
                .ok()
                .and_then(|n| n.container)
                .map(|at| at.parent);
        }
        false
    }

    /// Pulls `child` out of whatever currently contains it, emitting the
    /// holder-side events only. The child's own container-change event is
    /// the caller's to emit, so a transfer shows exactly one on the child.
    pub(super) fn extract(
        &mut self,
        batch: &mut Batch,
        child: ObjectId,
    ) -> Result<Option<Containment>, ModelError> {
        let Some(at) = self.node(child)?.container else {
            return Ok(None);
        };
        let schema = Arc::clone(&self.schema);
        debug!("detaching {} from {}", child, at.parent);
        let holder = self.node(at.parent)?;
        let def = Self::def(&schema, holder, at.feature)?;
        let storage = Self::storage_of(def);
        let holder = self.node_mut(at.parent)?;
        match &mut holder.slots[storage.index()] {
            Slot::Child(slot) => {
                *slot = None;
                batch.push(Event::new(
                    at.parent,
                    at.feature,
                    Change::Set {
                        old: Value::Object(child),
                        new: Value::Null,
                    },
                ));
            }
            Slot::Children(list) => {
                if let Some(i) = list.iter().position(|c| *c == child) {
                    list.remove(i);
                    batch.push(Event::new(
                        at.parent,
                        at.feature,
                        Change::Remove {
                            value: Value::Object(child),
                            index: i,
                        },
                    ));
                }
            }
            Slot::Map(map) => {
                if let Some(i) = map
                    .entries()
                    .iter()
                    .position(|e| e.value.as_object() == Some(child))
                {
                    let entry = map.remove(i);
                    batch.push(Event::new(
                        at.parent,
                        entry.feature,
                        Change::Remove {
                            value: entry.value,
                            index: i,
                        },
                    ));
                }
            }
            _ => unreachable!("containment back-reference points at a non-containment slot"),
        }
        self.node_mut(child)?.container = None;
        Ok(Some(at))
    }

    pub(super) fn flush(&mut self, batch: Batch) {
        let events = batch.into_events();
        self.observers.dispatch(&events);
    }
}

// ***************************** Observers ****************************** //

impl Model {
    /// Observes every event in the model.
    pub fn observe(&mut self, observer: Rc<dyn Observer>) -> ObserverId {
        self.observers.attach(observer)
    }

    /// Observes events whose subject is `object` (structural events of its
    /// features and its own container changes).
    pub fn observe_object(
        &mut self,
        object: ObjectId,
        observer: Rc<dyn Observer>,
    ) -> Result<ObserverId, ModelError> {
        self.node(object)?;
        Ok(self.observers.attach_to(object, observer))
    }

    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.detach(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapEntry, SchemaBuilder, SchemaEnum};
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl SchemaEnum for Color {
        const ENUM_NAME: &'static str = "Color";

        fn literals() -> &'static [Self] {
            &[Color::Red, Color::Green, Color::Blue]
        }

        fn as_str(self) -> &'static str {
            match self {
                Color::Red => "red",
                Color::Green => "green",
                Color::Blue => "blue",
            }
        }
    }

    fn schema() -> Arc<Schema> {
        let mut b = SchemaBuilder::new();
        let color = b.enumeration("Color", &["red", "green", "blue"]);
        let item = b.class("Item");
        b.attr(item, "name", ValueType::Str);
        b.attr_unsettable(item, "version", ValueType::Str, Value::Str("1.0".into()));
        b.attr(item, "tint", ValueType::Enum(color));
        b.attr_many(item, "tags", ValueType::Str);
        let folder = b.class("Folder");
        b.attr(folder, "name", ValueType::Str);
        b.child(folder, "cover", item);
        b.children(folder, "items", item);
        b.children(folder, "folders", folder);
        let content = b.group(folder, "content");
        b.member(folder, "note", content, item);
        b.member(folder, "link", content, item);
        Arc::new(b.finish())
    }

    fn model() -> Model {
        Model::new(schema())
    }

    #[test]
    fn attribute_set_get_unset() {
        let mut m = model();
        let item = m.create_named("Item").unwrap();
        assert_eq!(m.attr_str(item, "name").unwrap(), None);
        assert!(!m.is_set_named(item, "name").unwrap());
        m.set_attr_str(item, "name", "height").unwrap();
        assert_eq!(m.attr_str(item, "name").unwrap(), Some("height"));
        assert!(m.is_set_named(item, "name").unwrap());
        m.unset_named(item, "name").unwrap();
        assert_eq!(m.attr_str(item, "name").unwrap(), None);
        assert!(!m.is_set_named(item, "name").unwrap());
    }

    #[test]
    fn explicit_set_to_default_stays_distinct() {
        let mut m = model();
        let item = m.create_named("Item").unwrap();
        // Unset reads the default already.
        assert_eq!(m.attr_str(item, "version").unwrap(), Some("1.0"));
        assert!(!m.is_set_named(item, "version").unwrap());
        m.set_attr_str(item, "version", "1.0").unwrap();
        assert_eq!(m.attr_str(item, "version").unwrap(), Some("1.0"));
        assert!(m.is_set_named(item, "version").unwrap());
        m.unset_named(item, "version").unwrap();
        assert!(!m.is_set_named(item, "version").unwrap());
        assert_eq!(m.attr_str(item, "version").unwrap(), Some("1.0"));
    }

    #[test]
    fn enum_null_coerces_to_default_literal() {
        let mut m = model();
        let item = m.create_named("Item").unwrap();
        assert_eq!(m.attr_enum::<Color>(item, "tint").unwrap(), Color::Red);
        m.set_attr_enum(item, "tint", Some(Color::Green)).unwrap();
        assert_eq!(m.attr_enum::<Color>(item, "tint").unwrap(), Color::Green);
        assert!(m.is_set_named(item, "tint").unwrap());
        // Null goes back to the default literal; the plain discipline then
        // reads the field as unset again.
        m.set_attr_enum::<Color>(item, "tint", None).unwrap();
        assert_eq!(m.attr_enum::<Color>(item, "tint").unwrap(), Color::Red);
        assert!(!m.is_set_named(item, "tint").unwrap());
    }

    #[test]
    fn unknown_literal_is_rejected() {
        let mut m = model();
        let item = m.create_named("Item").unwrap();
        let tint = m.feature_named(item, "tint").unwrap();
        let err = m.set_value(item, tint, Value::from("mauve")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidLiteral { .. }));
        let err = m.set_value(item, tint, Value::Int(2)).unwrap_err();
        assert!(matches!(err, ModelError::ValueShape { .. }));
    }

    #[test]
    fn single_containment_attach_and_replace() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let a = m.create_named("Item").unwrap();
        let b = m.create_named("Item").unwrap();
        m.set_child_named(folder, "cover", Some(a)).unwrap();
        assert_eq!(m.container(a).unwrap().map(|c| c.parent), Some(folder));
        // Reassignment is idempotent.
        m.set_child_named(folder, "cover", Some(a)).unwrap();
        assert_eq!(m.child_named(folder, "cover").unwrap(), Some(a));
        // Replacing detaches the old child into a root.
        m.set_child_named(folder, "cover", Some(b)).unwrap();
        assert_eq!(m.child_named(folder, "cover").unwrap(), Some(b));
        assert_eq!(m.container(a).unwrap(), None);
        m.set_child_named(folder, "cover", None).unwrap();
        assert_eq!(m.container(b).unwrap(), None);
        assert_eq!(m.child_named(folder, "cover").unwrap(), None);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let a = m.create_named("Item").unwrap();
        let b = m.create_named("Item").unwrap();
        m.add_child_named(folder, "items", a).unwrap();
        m.add_child_named(folder, "items", b).unwrap();
        assert_eq!(m.children_named(folder, "items").unwrap(), &[a, b]);
        let err = m.add_child_named(folder, "items", a).unwrap_err();
        assert!(matches!(err, ModelError::AlreadyContained { .. }));
        m.remove_child_named(folder, "items", a).unwrap();
        assert_eq!(m.children_named(folder, "items").unwrap(), &[b]);
        assert_eq!(m.container(a).unwrap(), None);
    }

    #[test]
    fn reattach_moves_between_lists() {
        let mut m = model();
        let x = m.create_named("Folder").unwrap();
        let y = m.create_named("Folder").unwrap();
        let child = m.create_named("Item").unwrap();
        m.add_child_named(x, "items", child).unwrap();
        m.add_child_named(y, "items", child).unwrap();
        assert!(m.children_named(x, "items").unwrap().is_empty());
        assert_eq!(m.children_named(y, "items").unwrap(), &[child]);
        assert_eq!(m.container(child).unwrap().map(|c| c.parent), Some(y));
    }

    #[test]
    fn containment_cycles_are_rejected() {
        let mut m = model();
        let outer = m.create_named("Folder").unwrap();
        let inner = m.create_named("Folder").unwrap();
        m.add_child_named(outer, "folders", inner).unwrap();
        let err = m.add_child_named(inner, "folders", outer).unwrap_err();
        assert!(matches!(err, ModelError::ContainmentCycle { .. }));
        let err = m.add_child_named(outer, "folders", outer).unwrap_err();
        assert!(matches!(err, ModelError::ContainmentCycle { .. }));
    }

    #[test]
    fn move_child_reorders_without_ownership_change() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let a = m.create_named("Item").unwrap();
        let b = m.create_named("Item").unwrap();
        let c = m.create_named("Item").unwrap();
        for i in [a, b, c] {
            m.add_child_named(folder, "items", i).unwrap();
        }
        let items = m.feature_named(folder, "items").unwrap();
        m.move_child(folder, items, 2, 0).unwrap();
        assert_eq!(m.children_named(folder, "items").unwrap(), &[c, a, b]);
        assert_eq!(m.container(c).unwrap().map(|at| at.parent), Some(folder));
    }

    #[test]
    fn projection_mutations_hit_the_backing() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let n1 = m.create_named("Item").unwrap();
        let l1 = m.create_named("Item").unwrap();
        let n2 = m.create_named("Item").unwrap();
        m.add_member_named(folder, "note", n1).unwrap();
        m.add_member_named(folder, "link", l1).unwrap();
        m.add_member_named(folder, "note", n2).unwrap();
        let content = m.feature_named(folder, "content").unwrap();
        let note = m.feature_named(folder, "note").unwrap();
        // Backing keeps document order across member kinds.
        let order: Vec<_> = m
            .entries(folder, content)
            .unwrap()
            .iter()
            .map(|e| e.value.as_object().unwrap())
            .collect();
        assert_eq!(order, vec![n1, l1, n2]);
        assert_eq!(m.member_objects_named(folder, "note").unwrap(), vec![n1, n2]);
        assert_eq!(m.container(l1).unwrap().map(|at| at.parent), Some(folder));
        // Removing through the projection removes from the backing.
        m.remove_member(folder, note, 0).unwrap();
        let order: Vec<_> = m
            .entries(folder, content)
            .unwrap()
            .iter()
            .map(|e| e.value.as_object().unwrap())
            .collect();
        assert_eq!(order, vec![l1, n2]);
        assert_eq!(m.container(n1).unwrap(), None);
        assert!(m.is_set(folder, content).unwrap());
        assert!(m.is_set(folder, note).unwrap());
    }

    #[test]
    fn empty_map_reads_as_unset() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let content = m.feature_named(folder, "content").unwrap();
        let note = m.feature_named(folder, "note").unwrap();
        assert!(!m.is_set(folder, content).unwrap());
        assert!(!m.is_set(folder, note).unwrap());
        let item = m.create_named("Item").unwrap();
        m.add_member_named(folder, "note", item).unwrap();
        m.remove_member(folder, note, 0).unwrap();
        assert!(!m.is_set(folder, content).unwrap());
    }

    #[test]
    fn group_bulk_set_replaces_atomically() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let old = m.create_named("Item").unwrap();
        m.add_member_named(folder, "note", old).unwrap();
        let content = m.feature_named(folder, "content").unwrap();
        let note = m.feature_named(folder, "note").unwrap();
        let link = m.feature_named(folder, "link").unwrap();
        let a = m.create_named("Item").unwrap();
        let b = m.create_named("Item").unwrap();
        m.set_entries(
            folder,
            content,
            vec![
                MapEntry::new(link, Value::Object(a)),
                MapEntry::new(note, Value::Object(b)),
            ],
        )
        .unwrap();
        assert_eq!(m.container(old).unwrap(), None);
        assert_eq!(m.member_objects(folder, link).unwrap(), vec![a]);
        assert_eq!(m.member_objects(folder, note).unwrap(), vec![b]);
        assert_eq!(m.entries(folder, content).unwrap().len(), 2);
    }

    #[test]
    fn facade_round_trips_every_item_feature() {
        let mut m = model();
        let item = m.create_named("Item").unwrap();
        let class = m.schema().class_named("Item").unwrap().clone();
        for def in class.features() {
            let value = match def.kind() {
                FeatureKind::Attr { many: false, ty, .. } => match ty {
                    ValueType::Str => Value::from("x"),
                    ValueType::Bool => Value::Bool(true),
                    ValueType::Int => Value::Int(7),
                    ValueType::Double => Value::Double(0.5),
                    ValueType::Enum(e) => Value::Literal(Literal::new(*e, 1)),
                },
                FeatureKind::Attr { many: true, .. } => {
                    Value::Seq(vec![Value::from("a"), Value::from("b")])
                }
                _ => continue,
            };
            m.set_value(item, def.id(), value.clone()).unwrap();
            assert_eq!(m.value(item, def.id()).unwrap(), value, "{}", def.name());
            assert!(m.is_set(item, def.id()).unwrap(), "{}", def.name());
        }
    }

    #[test]
    fn transfer_emits_remove_add_and_one_container_event() {
        let mut m = model();
        let x = m.create_named("Folder").unwrap();
        let y = m.create_named("Folder").unwrap();
        let child = m.create_named("Item").unwrap();
        m.add_child_named(x, "items", child).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        m.observe(Rc::new(move |e: &Event| {
            sink.borrow_mut().push((e.object(), e.change().clone()))
        }));
        m.add_child_named(y, "items", child).unwrap();
        let events = seen.borrow();
        assert_eq!(events.len(), 3);
        assert!(
            matches!(&events[0], (o, Change::Remove { value, index: 0 }) if *o == x && value.as_object() == Some(child))
        );
        assert!(
            matches!(&events[1], (o, Change::Add { value, index: 0 }) if *o == y && value.as_object() == Some(child))
        );
        assert!(
            matches!(&events[2], (o, Change::Container { old: Some(f), new: Some(t) }) if *o == child && *f == x && *t == y)
        );
    }

    #[test]
    fn touch_set_still_notifies() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let item = m.create_named("Item").unwrap();
        m.set_child_named(folder, "cover", Some(item)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        m.observe(Rc::new(move |e: &Event| {
            sink.borrow_mut().push(e.change().clone())
        }));
        m.set_child_named(folder, "cover", Some(item)).unwrap();
        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_touch());
    }

    #[test]
    fn destroy_drops_the_subtree() {
        let mut m = model();
        let outer = m.create_named("Folder").unwrap();
        let inner = m.create_named("Folder").unwrap();
        let item = m.create_named("Item").unwrap();
        m.add_child_named(outer, "folders", inner).unwrap();
        m.add_child_named(inner, "items", item).unwrap();
        m.destroy(inner).unwrap();
        assert!(m.children_named(outer, "folders").unwrap().is_empty());
        assert!(!m.contains(inner));
        assert!(!m.contains(item));
        let err = m.attr_str(item, "name").unwrap_err();
        assert!(err.is_stale(item));
        // The slot is free for reuse; the stale id stays stale.
        let fresh = m.create_named("Item").unwrap();
        assert!(m.contains(fresh));
        assert!(!m.contains(item));
    }

    #[test]
    fn bulk_replace_children() {
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let a = m.create_named("Item").unwrap();
        let b = m.create_named("Item").unwrap();
        let c = m.create_named("Item").unwrap();
        m.add_child_named(folder, "items", a).unwrap();
        m.add_child_named(folder, "items", b).unwrap();
        let items = m.feature_named(folder, "items").unwrap();
        m.replace_children(folder, items, vec![c, b]).unwrap();
        assert_eq!(m.children_named(folder, "items").unwrap(), &[c, b]);
        assert_eq!(m.container(a).unwrap(), None);
        assert_eq!(m.container(b).unwrap().map(|at| at.parent), Some(folder));
    }

    #[test]
    fn random_list_edits_match_a_reference_vec() {
        use rand::RngExt;
        let mut rng = rand::rng();
        let mut m = model();
        let folder = m.create_named("Folder").unwrap();
        let pool: Vec<_> = (0..8)
            .map(|_| m.create_named("Item").unwrap())
            .collect();
        let mut reference: Vec<ObjectId> = Vec::new();
        for _ in 0..200 {
            let pick = pool[rng.random_range(0..pool.len())];
            if reference.contains(&pick) {
                m.remove_child_named(folder, "items", pick).unwrap();
                reference.retain(|c| *c != pick);
            } else {
                let at = rng.random_range(0..=reference.len());
                let items = m.feature_named(folder, "items").unwrap();
                m.insert_child(folder, items, at, pick).unwrap();
                reference.insert(at, pick);
            }
            assert_eq!(m.children_named(folder, "items").unwrap(), &reference[..]);
        }
        for c in pool {
            let expected = reference.contains(&c).then_some(folder);
            assert_eq!(m.container(c).unwrap().map(|at| at.parent), expected);
        }
    }
}
