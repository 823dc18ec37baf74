//! # Goal
//! The main goal of this library is to provide foundation for programs
//! that edit schema-typed object trees: structured documents where every
//! node belongs to a class, every class declares its fields, and generic
//! tooling (codecs, editors) must be able to walk and mutate the tree
//! without being written against the concrete types.
//!
//! Primary attribute of the library is fidelity of the bookkeeping: a
//! child has at most one container at any time, schema defaults stay
//! distinguishable from explicitly set values, and mixed-content order is
//! preserved through edits so that a document round-trips bit-for-bit.
//!
//! Secondary attribute is observability. Every successful mutation
//! produces events that registered observers see after the operation
//! completes, in the order the changes happened.
//!
//! # Features
//! - Schema management, through the Schema and SchemaBuilder types.
//!      - Responsible for: Which classes exist and what fields do they have?
//! - Containment management, through the Model arena.
//!      - Responsible for: Who owns this object? (At most one container.)
//! - Attribute management, through per-feature slots with defaults.
//!      - Responsible for: What is the value, and was it ever set?
//! - Mixed-content management, through feature maps and member projections.
//!      - Responsible for: In what document order do alternatives appear?
//! - Change observation, through per-object and whole-model observers.
//!      - Responsible for: What changed, from what, to what?
//!
//! # Architecture
//! There are several pieces that interact with one another:
//! - Schema - immutable class/feature/enumeration metadata, built once and
//!   shared read-only.
//! - Model - the arena owning every object; all mutation goes through it.
//! - Objects - nodes identified by generational ids, one slot per feature
//!   of their class's flat feature table.
//! - Slots - attribute values, single children, child lists, feature maps.
//! - Events - value-change records batched during a mutation and flushed
//!   once at the end of the public operation.
//! - Facade - uniform feature-id-addressed access used by generic tooling;
//!   typed accessors are thin wrappers over the same operations.
//!
//! Feature tables are flat: a class's table is its supertype's table
//! followed by its own declarations, so a feature id valid for the
//! supertype means the same thing for every subclass.
//!
//! Concrete models are built on top of the substrate. The library ships
//! one, the OGC Web Coverage Service 1.0 object model, in [`wcs10`].

//? Important decisions:
//? - The tree lives in an arena and objects are addressed by generational
//?   ids. Parent back-references are plain ids, never owning, so ownership
//?   stays a tree even though navigation is bidirectional.
//? - Observers receive events only, not the model. Dispatch happens after
//?   the mutation completed, so an observer can never see a half-applied
//?   compound operation.
//? - The schema registry is an explicitly constructed value passed to the
//?   model. There is no process-wide package registry.

pub mod core;
pub mod wcs10;
