//! The document root: a mixed feature map whose entries are the global
//! elements a WCS 1.0 document may carry, in document order.

use crate::core::{MapEntry, Model, ModelError, Value};

use super::{
    model_type, CoverageOffering, DescribeCoverage, GetCapabilities, GetCoverage, ModelType,
    WcsCapabilities,
};

model_type! {
    /// Root object a codec reads into and writes out of. One document
    /// usually holds a single element; the mixed group still keeps order
    /// if several appear.
    DocumentRoot : "DocumentRoot"
}

impl DocumentRoot {
    pub fn mixed<'m>(&self, model: &'m Model) -> Result<&'m [MapEntry], ModelError> {
        let mixed = model.feature_named(self.0, "mixed")?;
        model.entries(self.0, mixed)
    }

    pub fn get_capabilities(&self, model: &Model) -> Result<Option<GetCapabilities>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "getCapabilities")?
            .first()
            .copied()
            .map(GetCapabilities::wrap))
    }

    pub fn set_get_capabilities(
        &self,
        model: &mut Model,
        value: GetCapabilities,
    ) -> Result<(), ModelError> {
        let feature = model.feature_named(self.0, "getCapabilities")?;
        model.replace_member(self.0, feature, vec![Value::Object(value.id())])
    }

    pub fn describe_coverage(&self, model: &Model) -> Result<Option<DescribeCoverage>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "describeCoverage")?
            .first()
            .copied()
            .map(DescribeCoverage::wrap))
    }

    pub fn set_describe_coverage(
        &self,
        model: &mut Model,
        value: DescribeCoverage,
    ) -> Result<(), ModelError> {
        let feature = model.feature_named(self.0, "describeCoverage")?;
        model.replace_member(self.0, feature, vec![Value::Object(value.id())])
    }

    pub fn get_coverage(&self, model: &Model) -> Result<Option<GetCoverage>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "getCoverage")?
            .first()
            .copied()
            .map(GetCoverage::wrap))
    }

    pub fn set_get_coverage(&self, model: &mut Model, value: GetCoverage) -> Result<(), ModelError> {
        let feature = model.feature_named(self.0, "getCoverage")?;
        model.replace_member(self.0, feature, vec![Value::Object(value.id())])
    }

    pub fn capability(&self, model: &Model) -> Result<Option<WcsCapabilities>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "capability")?
            .first()
            .copied()
            .map(WcsCapabilities::wrap))
    }

    pub fn set_capability(
        &self,
        model: &mut Model,
        value: WcsCapabilities,
    ) -> Result<(), ModelError> {
        let feature = model.feature_named(self.0, "capability")?;
        model.replace_member(self.0, feature, vec![Value::Object(value.id())])
    }

    pub fn coverage_offerings(&self, model: &Model) -> Result<Vec<CoverageOffering>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "coverageOffering")?
            .into_iter()
            .map(CoverageOffering::wrap)
            .collect())
    }

    pub fn add_coverage_offering(
        &self,
        model: &mut Model,
        value: CoverageOffering,
    ) -> Result<(), ModelError> {
        model.add_member_named(self.0, "coverageOffering", value.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wcs10;

    #[test]
    fn root_keeps_element_order() {
        let mut m = wcs10::model();
        let root = DocumentRoot::new(&mut m).unwrap();
        let first = CoverageOffering::new(&mut m).unwrap();
        let second = CoverageOffering::new(&mut m).unwrap();
        root.add_coverage_offering(&mut m, first).unwrap();
        root.add_coverage_offering(&mut m, second).unwrap();
        assert_eq!(root.coverage_offerings(&m).unwrap(), vec![first, second]);
        assert_eq!(root.mixed(&m).unwrap().len(), 2);
        assert_eq!(root.get_capabilities(&m).unwrap(), None);
    }

    #[test]
    fn root_owns_its_document_element() {
        let mut m = wcs10::model();
        let root = DocumentRoot::new(&mut m).unwrap();
        let request = GetCapabilities::new(&mut m).unwrap();
        root.set_get_capabilities(&mut m, request).unwrap();
        assert_eq!(root.get_capabilities(&m).unwrap(), Some(request));
        assert_eq!(
            m.container(request.id()).unwrap().map(|at| at.parent),
            Some(root.id())
        );
        m.destroy(root.id()).unwrap();
        assert!(!m.contains(request.id()));
    }
}
