//! Minimal GML collaborators the coverage model contains: time positions,
//! codes and code lists, grid and polygon stand-ins.

use crate::core::{Model, ModelError};

use super::{model_type, ModelType};

model_type! {
    /// A single point on a time axis, ISO 8601 text.
    TimePosition : "TimePositionType"
}

impl TimePosition {
    pub fn with_value(model: &mut Model, value: &str) -> Result<Self, ModelError> {
        let this = Self::new(model)?;
        this.set_value(model, value)?;
        Ok(this)
    }

    pub fn value<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "value")
    }

    pub fn set_value(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "value", value)
    }
}

model_type! {
    /// A code word qualified by the space it is defined in.
    Code : "CodeType"
}

impl Code {
    pub fn with_value(model: &mut Model, value: &str) -> Result<Self, ModelError> {
        let this = Self::new(model)?;
        this.set_value(model, value)?;
        Ok(this)
    }

    pub fn value<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "value")
    }

    pub fn set_value(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "value", value)
    }

    pub fn code_space<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "codeSpace")
    }

    pub fn set_code_space(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "codeSpace", value)
    }
}

model_type! {
    /// An ordered list of code words.
    CodeList : "CodeListType"
}

impl CodeList {
    pub fn values<'m>(&self, model: &'m Model) -> Result<Vec<&'m str>, ModelError> {
        model.attr_strs(self.0, "value")
    }

    pub fn add_value(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.push_attr_str(self.0, "value", value)
    }
}

model_type! {
    /// Grid geometry stand-in; only the dimension count is carried.
    Grid : "GridType"
}

impl Grid {
    pub fn dimension(&self, model: &Model) -> Result<Option<i64>, ModelError> {
        model.attr_int(self.0, "dimension")
    }

    pub fn set_dimension(&self, model: &mut Model, value: i64) -> Result<(), ModelError> {
        model.set_attr_int(self.0, "dimension", value)
    }
}

model_type! {
    /// Polygon geometry stand-in; the exterior ring as coordinate text.
    Polygon : "PolygonType"
}

impl Polygon {
    pub fn exterior<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "exterior")
    }

    pub fn set_exterior(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "exterior", value)
    }
}
