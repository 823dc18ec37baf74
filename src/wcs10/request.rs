//! The three request payloads a WCS 1.0 client sends, plus the domain and
//! range subsetting structures GetCoverage carries.

use crate::core::{Model, ModelError};

use super::{
    model_type, CapabilitiesSection, Code, InterpolationMethod, ModelType, SpatialDomain,
    TimeSequence, ValueEnumBase,
};

model_type! {
    /// GetCapabilities request.
    GetCapabilities : "GetCapabilitiesType"
}

impl GetCapabilities {
    /// Reads `/` (the whole document) until something is stored.
    pub fn section(&self, model: &Model) -> Result<CapabilitiesSection, ModelError> {
        model.attr_enum(self.0, "section")
    }

    pub fn set_section(
        &self,
        model: &mut Model,
        value: Option<CapabilitiesSection>,
    ) -> Result<(), ModelError> {
        model.set_attr_enum(self.0, "section", value)
    }

    pub fn is_section_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "section")
    }

    pub fn service<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "service")
    }

    pub fn update_sequence<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "updateSequence")
    }

    pub fn set_update_sequence(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "updateSequence", value)
    }

    /// Reads `1.0.0` until something is stored; a strict round-trip keeps
    /// "explicitly set to 1.0.0" distinguishable through
    /// [`is_version_set`](Self::is_version_set).
    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }

    pub fn unset_version(&self, model: &mut Model) -> Result<(), ModelError> {
        model.unset_named(self.0, "version")
    }

    pub fn is_version_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "version")
    }

    pub fn base_url<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "baseUrl")
    }

    pub fn set_base_url(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "baseUrl", value)
    }
}

model_type! {
    /// DescribeCoverage request, naming the coverages to describe.
    DescribeCoverage : "DescribeCoverageType"
}

impl DescribeCoverage {
    pub fn coverages<'m>(&self, model: &'m Model) -> Result<Vec<&'m str>, ModelError> {
        model.attr_strs(self.0, "coverage")
    }

    pub fn add_coverage(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.push_attr_str(self.0, "coverage", value)
    }

    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }

    pub fn is_version_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "version")
    }
}

model_type! {
    /// Spatial subset of a request; same shape as the spatial domain it
    /// subsets.
    SpatialSubset : "SpatialSubsetType" => SpatialDomain
}

model_type! {
    /// Where to cut the coverage: spatially, temporally, or both.
    DomainSubset : "DomainSubsetType"
}

impl DomainSubset {
    pub fn spatial_subset(&self, model: &Model) -> Result<Option<SpatialSubset>, ModelError> {
        Ok(model.child_named(self.0, "spatialSubset")?.map(SpatialSubset::wrap))
    }

    pub fn set_spatial_subset(
        &self,
        model: &mut Model,
        value: Option<SpatialSubset>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "spatialSubset", value.map(|v| v.id()))
    }

    pub fn temporal_subset(&self, model: &Model) -> Result<Option<TimeSequence>, ModelError> {
        Ok(model.child_named(self.0, "temporalSubset")?.map(TimeSequence::wrap))
    }

    pub fn set_temporal_subset(
        &self,
        model: &mut Model,
        value: Option<TimeSequence>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "temporalSubset", value.map(|v| v.id()))
    }
}

model_type! {
    /// Values requested along one named range axis.
    AxisSubset : "AxisSubsetType" => ValueEnumBase
}

impl AxisSubset {
    pub fn name<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "name")
    }

    pub fn set_name(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "name", value)
    }
}

model_type! {
    /// Range subset: one entry per axis being constrained.
    RangeSubset : "RangeSubsetType"
}

impl RangeSubset {
    pub fn axis_subsets(&self, model: &Model) -> Result<Vec<AxisSubset>, ModelError> {
        Ok(model
            .children_named(self.0, "axisSubset")?
            .iter()
            .copied()
            .map(AxisSubset::wrap)
            .collect())
    }

    pub fn add_axis_subset(&self, model: &mut Model, value: AxisSubset) -> Result<(), ModelError> {
        model.add_child_named(self.0, "axisSubset", value.id())
    }
}

model_type! {
    /// Requested output CRS and encoding format.
    Output : "OutputType"
}

impl Output {
    pub fn crs(&self, model: &Model) -> Result<Option<Code>, ModelError> {
        Ok(model.child_named(self.0, "crs")?.map(Code::wrap))
    }

    pub fn set_crs(&self, model: &mut Model, value: Option<Code>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "crs", value.map(|v| v.id()))
    }

    pub fn format(&self, model: &Model) -> Result<Option<Code>, ModelError> {
        Ok(model.child_named(self.0, "format")?.map(Code::wrap))
    }

    pub fn set_format(&self, model: &mut Model, value: Option<Code>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "format", value.map(|v| v.id()))
    }
}

model_type! {
    /// GetCoverage request: source coverage, subsetting, output wishes.
    GetCoverage : "GetCoverageType"
}

impl GetCoverage {
    pub fn source_coverage<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "sourceCoverage")
    }

    pub fn set_source_coverage(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "sourceCoverage", value)
    }

    pub fn domain_subset(&self, model: &Model) -> Result<Option<DomainSubset>, ModelError> {
        Ok(model.child_named(self.0, "domainSubset")?.map(DomainSubset::wrap))
    }

    pub fn set_domain_subset(
        &self,
        model: &mut Model,
        value: Option<DomainSubset>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "domainSubset", value.map(|v| v.id()))
    }

    pub fn range_subset(&self, model: &Model) -> Result<Option<RangeSubset>, ModelError> {
        Ok(model.child_named(self.0, "rangeSubset")?.map(RangeSubset::wrap))
    }

    pub fn set_range_subset(
        &self,
        model: &mut Model,
        value: Option<RangeSubset>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "rangeSubset", value.map(|v| v.id()))
    }

    /// Reads `nearest neighbor` until something is stored, the schema
    /// default.
    pub fn interpolation_method(&self, model: &Model) -> Result<InterpolationMethod, ModelError> {
        model.attr_enum(self.0, "interpolationMethod")
    }

    /// `None` stores the default literal while still marking the field
    /// explicitly set.
    pub fn set_interpolation_method(
        &self,
        model: &mut Model,
        value: Option<InterpolationMethod>,
    ) -> Result<(), ModelError> {
        model.set_attr_enum(self.0, "interpolationMethod", value)
    }

    pub fn output(&self, model: &Model) -> Result<Option<Output>, ModelError> {
        Ok(model.child_named(self.0, "output")?.map(Output::wrap))
    }

    pub fn set_output(&self, model: &mut Model, value: Option<Output>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "output", value.map(|v| v.id()))
    }

    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }

    pub fn is_version_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wcs10;

    #[test]
    fn version_set_to_its_default_still_counts_as_set() {
        let mut m = wcs10::model();
        let request = GetCapabilities::new(&mut m).unwrap();
        assert_eq!(request.version(&m).unwrap(), Some("1.0.0"));
        assert!(!request.is_version_set(&m).unwrap());
        request.set_version(&mut m, "1.0.0").unwrap();
        assert_eq!(request.version(&m).unwrap(), Some("1.0.0"));
        assert!(request.is_version_set(&m).unwrap());
        request.unset_version(&mut m).unwrap();
        assert!(!request.is_version_set(&m).unwrap());
        assert_eq!(request.version(&m).unwrap(), Some("1.0.0"));
    }

    #[test]
    fn section_defaults_to_the_whole_document() {
        let mut m = wcs10::model();
        let request = GetCapabilities::new(&mut m).unwrap();
        assert_eq!(request.section(&m).unwrap(), CapabilitiesSection::All);
        assert!(!request.is_section_set(&m).unwrap());
        request
            .set_section(&mut m, Some(CapabilitiesSection::ContentMetadata))
            .unwrap();
        assert_eq!(
            request.section(&m).unwrap(),
            CapabilitiesSection::ContentMetadata
        );
        request.set_section(&mut m, None).unwrap();
        assert_eq!(request.section(&m).unwrap(), CapabilitiesSection::All);
        assert!(request.is_section_set(&m).unwrap());
    }

    #[test]
    fn get_coverage_interpolation_null_substitution() {
        let mut m = wcs10::model();
        let request = GetCoverage::new(&mut m).unwrap();
        request
            .set_interpolation_method(&mut m, Some(InterpolationMethod::Bicubic))
            .unwrap();
        assert_eq!(
            request.interpolation_method(&m).unwrap(),
            InterpolationMethod::Bicubic
        );
        request.set_interpolation_method(&mut m, None).unwrap();
        assert_eq!(
            request.interpolation_method(&m).unwrap(),
            InterpolationMethod::NearestNeighbor
        );
    }

    #[test]
    fn get_coverage_request_assembles() {
        let mut m = wcs10::model();
        let request = GetCoverage::new(&mut m).unwrap();
        request.set_source_coverage(&mut m, "ndvi").unwrap();
        let domain = DomainSubset::new(&mut m).unwrap();
        let temporal = TimeSequence::new(&mut m).unwrap();
        domain.set_temporal_subset(&mut m, Some(temporal)).unwrap();
        request.set_domain_subset(&mut m, Some(domain)).unwrap();
        let output = Output::new(&mut m).unwrap();
        let format = Code::with_value(&mut m, "GeoTIFF").unwrap();
        output.set_format(&mut m, Some(format)).unwrap();
        request.set_output(&mut m, Some(output)).unwrap();
        assert_eq!(request.domain_subset(&m).unwrap(), Some(domain));
        assert_eq!(
            request
                .output(&m)
                .unwrap()
                .unwrap()
                .format(&m)
                .unwrap()
                .unwrap()
                .value(&m)
                .unwrap(),
            Some("GeoTIFF")
        );
        let coverages = DescribeCoverage::new(&mut m).unwrap();
        coverages.add_coverage(&mut m, "ndvi").unwrap();
        coverages.add_coverage(&mut m, "dem").unwrap();
        assert_eq!(coverages.coverages(&m).unwrap(), vec!["ndvi", "dem"]);
    }
}
