use ahash::AHashMap;
use getset::{CopyGetters, Getters};
use std::fmt::Display;

use crate::core::{Value, ValueType};

/// Index of a class in its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u16);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an enumeration in its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(u16);

impl EnumId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a feature in a class's flat feature table.
///
/// Tables are flat in the supertype-first sense, so an id handed out for a
/// feature of a supertype addresses the same feature on every subclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(u16);

impl FeatureId {
    pub(crate) fn new(index: u16) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a feature stores and how.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureKind {
    /// Scalar, string or enumeration attribute.
    ///
    /// `unsettable` selects the explicit is-set discipline: a stored flag
    /// instead of comparison against the default. Schema-driven, per the
    /// presence of a declared default on an optional field.
    Attr {
        ty: ValueType,
        many: bool,
        unsettable: bool,
        default: Option<Value>,
    },
    /// Single owned child.
    Child { class: ClassId },
    /// Ordered list of owned children.
    Children { class: ClassId },
    /// Feature-map backing sequence for choice/substitution-group content.
    Group,
    /// Typed projection over a [`FeatureKind::Group`] of the same class.
    /// Stores nothing itself.
    Member { group: FeatureId, class: ClassId },
}

/// One feature of a class.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct FeatureDef {
    #[getset(get_copy = "pub")]
    id: FeatureId,
    #[getset(get_copy = "pub")]
    name: &'static str,
    #[getset(get = "pub")]
    kind: FeatureKind,
}

impl FeatureDef {
    pub fn is_attr(&self) -> bool {
        matches!(self.kind, FeatureKind::Attr { .. })
    }

    pub fn is_many(&self) -> bool {
        matches!(
            self.kind,
            FeatureKind::Attr { many: true, .. }
                | FeatureKind::Children { .. }
                | FeatureKind::Group
                | FeatureKind::Member { .. }
        )
    }

    pub fn is_unsettable(&self) -> bool {
        matches!(self.kind, FeatureKind::Attr { unsettable: true, .. })
    }

    /// Schema-declared default, attributes only.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.kind {
            FeatureKind::Attr { default, .. } => default.as_ref(),
            _ => None,
        }
    }

    pub fn attr_type(&self) -> Option<ValueType> {
        match self.kind {
            FeatureKind::Attr { ty, .. } => Some(ty),
            _ => None,
        }
    }
}

/// One class and its flat feature table.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct ClassDef {
    #[getset(get_copy = "pub")]
    id: ClassId,
    #[getset(get_copy = "pub")]
    name: &'static str,
    #[getset(get_copy = "pub")]
    super_class: Option<ClassId>,
    #[getset(get_copy = "pub")]
    is_abstract: bool,
    features: Vec<FeatureDef>,
    by_name: AHashMap<&'static str, FeatureId>,
    inherited: u16,
}

impl ClassDef {
    pub fn features(&self) -> &[FeatureDef] {
        &self.features
    }

    /// Features declared by this class itself, the inherited prefix excluded.
    pub fn own_features(&self) -> &[FeatureDef] {
        &self.features[self.inherited as usize..]
    }

    pub fn feature(&self, id: FeatureId) -> Option<&FeatureDef> {
        self.features.get(id.index())
    }

    pub fn feature_named(&self, name: &str) -> Option<&FeatureDef> {
        self.by_name.get(name).map(|id| &self.features[id.index()])
    }
}

/// One enumeration: a closed, ordered set of literal strings.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct EnumDef {
    #[getset(get_copy = "pub")]
    id: EnumId,
    #[getset(get_copy = "pub")]
    name: &'static str,
    literals: Vec<&'static str>,
}

impl EnumDef {
    pub fn literals(&self) -> &[&'static str] {
        &self.literals
    }

    pub fn literal(&self, index: u16) -> Option<&'static str> {
        self.literals.get(index as usize).copied()
    }

    pub fn index_of(&self, literal: &str) -> Option<u16> {
        self.literals
            .iter()
            .position(|l| *l == literal)
            .map(|p| p as u16)
    }
}

/// Immutable class/feature/enumeration metadata.
///
/// Built once through [`SchemaBuilder`], then shared read-only (typically
/// behind an `Arc`) by every model instantiating it. Ids handed out by the
/// builder are plain indices and are only meaningful against the schema
/// that produced them.
#[derive(Debug, Clone)]
pub struct Schema {
    classes: Vec<ClassDef>,
    enums: Vec<EnumDef>,
    class_ids: AHashMap<&'static str, ClassId>,
    enum_ids: AHashMap<&'static str, EnumId>,
}

impl Schema {
    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    pub fn class_named(&self, name: &str) -> Option<&ClassDef> {
        self.class_ids.get(name).map(|id| self.class(*id))
    }

    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }

    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.index()]
    }

    pub fn enum_named(&self, name: &str) -> Option<&EnumDef> {
        self.enum_ids.get(name).map(|id| self.enum_def(*id))
    }

    /// True if `class` is `of` or a transitive subclass of it.
    pub fn conforms(&self, class: ClassId, of: ClassId) -> bool {
        let mut cur = Some(class);
        while let Some(c) = cur {
            if c == of {
                return true;
            }
            cur = self.class(c).super_class;
        }
        false
    }
}

/// Two-phase schema construction: declare classes (supertype links
/// included), then declare features, then [`SchemaBuilder::finish`].
///
/// A class's flat table seeds from its supertype's table the moment the
/// class declares its first own feature, which freezes the supertype;
/// declaring supertype features after that point is a definition bug and
/// panics. Misuse panics throughout: schemas are static program data, not
/// runtime input.
pub struct SchemaBuilder {
    classes: Vec<ClassDef>,
    enums: Vec<EnumDef>,
    class_ids: AHashMap<&'static str, ClassId>,
    enum_ids: AHashMap<&'static str, EnumId>,
    seeded: Vec<bool>,
    frozen: Vec<bool>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            enums: Vec::new(),
            class_ids: AHashMap::new(),
            enum_ids: AHashMap::new(),
            seeded: Vec::new(),
            frozen: Vec::new(),
        }
    }

    pub fn enumeration(&mut self, name: &'static str, literals: &[&'static str]) -> EnumId {
        assert!(
            !self.enum_ids.contains_key(name),
            "enumeration '{}' already registered",
            name
        );
        assert!(!literals.is_empty(), "enumeration '{}' has no literals", name);
        let id = EnumId(self.enums.len() as u16);
        self.enums.push(EnumDef {
            id,
            name,
            literals: literals.to_vec(),
        });
        self.enum_ids.insert(name, id);
        id
    }

    pub fn class(&mut self, name: &'static str) -> ClassId {
        self.declare(name, None, false)
    }

    pub fn abstract_class(&mut self, name: &'static str) -> ClassId {
        self.declare(name, None, true)
    }

    pub fn subclass(&mut self, name: &'static str, super_class: ClassId) -> ClassId {
        self.declare(name, Some(super_class), false)
    }

    pub fn abstract_subclass(&mut self, name: &'static str, super_class: ClassId) -> ClassId {
        self.declare(name, Some(super_class), true)
    }

    fn declare(
        &mut self,
        name: &'static str,
        super_class: Option<ClassId>,
        is_abstract: bool,
    ) -> ClassId {
        assert!(
            !self.class_ids.contains_key(name),
            "class '{}' already registered",
            name
        );
        if let Some(s) = super_class {
            assert!(s.index() < self.classes.len(), "unknown supertype for '{}'", name);
        }
        let id = ClassId(self.classes.len() as u16);
        self.classes.push(ClassDef {
            id,
            name,
            super_class,
            is_abstract,
            features: Vec::new(),
            by_name: AHashMap::new(),
            inherited: 0,
        });
        self.class_ids.insert(name, id);
        self.seeded.push(false);
        self.frozen.push(false);
        id
    }

    /// Plain attribute: is-set means value differs from the default (which
    /// is absent here, i.e. null).
    pub fn attr(&mut self, class: ClassId, name: &'static str, ty: ValueType) -> FeatureId {
        self.push_feature(
            class,
            name,
            FeatureKind::Attr {
                ty,
                many: false,
                unsettable: false,
                default: None,
            },
        )
    }

    /// Attribute with a schema-declared default and explicit is-set
    /// tracking. The two go together: a declared default on an optional
    /// field is exactly what makes "explicitly set to the default" a
    /// distinct, serializable state.
    pub fn attr_unsettable(
        &mut self,
        class: ClassId,
        name: &'static str,
        ty: ValueType,
        default: Value,
    ) -> FeatureId {
        let matches = match (ty, &default) {
            (ValueType::Bool, Value::Bool(_)) => true,
            (ValueType::Int, Value::Int(_)) => true,
            (ValueType::Double, Value::Double(_)) => true,
            (ValueType::Str, Value::Str(_)) => true,
            (ValueType::Enum(e), Value::Literal(l)) => l.enumeration() == e,
            _ => false,
        };
        assert!(matches, "default for '{}' doesn't match its type", name);
        self.push_feature(
            class,
            name,
            FeatureKind::Attr {
                ty,
                many: false,
                unsettable: true,
                default: Some(default),
            },
        )
    }

    /// Many-valued attribute (ordered, no is-set flag; empty means unset).
    pub fn attr_many(&mut self, class: ClassId, name: &'static str, ty: ValueType) -> FeatureId {
        self.push_feature(
            class,
            name,
            FeatureKind::Attr {
                ty,
                many: true,
                unsettable: false,
                default: None,
            },
        )
    }

    pub fn child(&mut self, class: ClassId, name: &'static str, of: ClassId) -> FeatureId {
        self.push_feature(class, name, FeatureKind::Child { class: of })
    }

    pub fn children(&mut self, class: ClassId, name: &'static str, of: ClassId) -> FeatureId {
        self.push_feature(class, name, FeatureKind::Children { class: of })
    }

    pub fn group(&mut self, class: ClassId, name: &'static str) -> FeatureId {
        self.push_feature(class, name, FeatureKind::Group)
    }

    /// Projection member of a previously declared group of the same class.
    pub fn member(
        &mut self,
        class: ClassId,
        name: &'static str,
        group: FeatureId,
        of: ClassId,
    ) -> FeatureId {
        {
            let def = &self.classes[class.index()];
            let group_def = def.features.get(group.index());
            assert!(
                matches!(group_def.map(|d| &d.kind), Some(FeatureKind::Group)),
                "'{}' on '{}' must project a group feature",
                name,
                def.name
            );
        }
        self.push_feature(class, name, FeatureKind::Member { group, class: of })
    }

    fn push_feature(&mut self, class: ClassId, name: &'static str, kind: FeatureKind) -> FeatureId {
        self.seed(class);
        assert!(
            !self.frozen[class.index()],
            "features of '{}' are frozen; declare them before any subclass's",
            self.classes[class.index()].name
        );
        let def = &mut self.classes[class.index()];
        assert!(
            !def.by_name.contains_key(name),
            "class '{}' already has a feature '{}'",
            def.name,
            name
        );
        let id = FeatureId(def.features.len() as u16);
        def.features.push(FeatureDef { id, name, kind });
        def.by_name.insert(name, id);
        id
    }

    /// Copies the supertype table into `class` (freezing the supertype) if
    /// that hasn't happened yet. Walks as far up as needed.
    fn seed(&mut self, class: ClassId) {
        let mut chain = Vec::new();
        let mut cur = Some(class);
        while let Some(c) = cur {
            if self.seeded[c.index()] {
                break;
            }
            chain.push(c);
            cur = self.classes[c.index()].super_class;
        }
        for c in chain.into_iter().rev() {
            if let Some(s) = self.classes[c.index()].super_class {
                self.frozen[s.index()] = true;
                let (features, by_name) = {
                    let sup = &self.classes[s.index()];
                    (sup.features.clone(), sup.by_name.clone())
                };
                let def = &mut self.classes[c.index()];
                def.inherited = features.len() as u16;
                def.features = features;
                def.by_name = by_name;
            }
            self.seeded[c.index()] = true;
        }
    }

    pub fn finish(mut self) -> Schema {
        // Featureless subclasses still inherit their supertype's table.
        for i in 0..self.classes.len() {
            self.seed(ClassId(i as u16));
        }
        Schema {
            classes: self.classes,
            enums: self.enums,
            class_ids: self.class_ids,
            enum_ids: self.enum_ids,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Schema {
        let mut b = SchemaBuilder::new();
        let color = b.enumeration("Color", &["red", "green", "blue"]);
        let leaf = b.class("Leaf");
        b.attr(leaf, "tint", ValueType::Enum(color));
        let base = b.abstract_class("Base");
        b.attr(base, "name", ValueType::Str);
        let branch = b.subclass("Branch", base);
        b.children(branch, "leaves", leaf);
        b.finish()
    }

    #[test]
    fn flat_table_merges_supertype_first() {
        let s = toy();
        let branch = s.class_named("Branch").unwrap();
        let names: Vec<_> = branch.features().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["name", "leaves"]);
        assert_eq!(branch.own_features().len(), 1);
        // Supertype's id addresses the same feature on the subclass.
        let base = s.class_named("Base").unwrap();
        let id = base.feature_named("name").unwrap().id();
        assert_eq!(branch.feature(id).unwrap().name(), "name");
    }

    #[test]
    fn conforms_walks_super_chain() {
        let s = toy();
        let base = s.class_named("Base").unwrap().id();
        let branch = s.class_named("Branch").unwrap().id();
        let leaf = s.class_named("Leaf").unwrap().id();
        assert!(s.conforms(branch, base));
        assert!(s.conforms(branch, branch));
        assert!(!s.conforms(base, branch));
        assert!(!s.conforms(leaf, base));
    }

    #[test]
    fn enumeration_lookup_round_trips() {
        let s = toy();
        let color = s.enum_named("Color").unwrap();
        assert_eq!(color.index_of("green"), Some(1));
        assert_eq!(color.literal(2), Some("blue"));
        assert_eq!(color.literal(3), None);
        assert_eq!(color.index_of("mauve"), None);
    }

    #[test]
    #[should_panic(expected = "frozen")]
    fn supertype_features_freeze_on_inherit() {
        let mut b = SchemaBuilder::new();
        let base = b.abstract_class("Base");
        b.attr(base, "name", ValueType::Str);
        let sub = b.subclass("Sub", base);
        b.attr(sub, "extra", ValueType::Str);
        b.attr(base, "late", ValueType::Str);
    }
}
