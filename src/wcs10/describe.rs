//! Coverage description types: the offering itself, its domain, range and
//! support sections.

use crate::core::{Model, ModelError};

use super::{
    model_type, Closure, Code, CodeList, Grid, InterpolationMethod, MetadataType, ModelType,
    Polygon, TimePosition,
};

model_type! {
    /// Shared description head: metadata links, description, name, label.
    /// Abstract in the schema; reached through `upcast` from the concrete
    /// types deriving it.
    AbstractDescription : "AbstractDescriptionType"
}

impl AbstractDescription {
    pub fn metadata_links(&self, model: &Model) -> Result<Vec<MetadataLink>, ModelError> {
        Ok(model
            .children_named(self.0, "metadataLink")?
            .iter()
            .copied()
            .map(MetadataLink::wrap)
            .collect())
    }

    pub fn add_metadata_link(&self, model: &mut Model, link: MetadataLink) -> Result<(), ModelError> {
        model.add_child_named(self.0, "metadataLink", link.id())
    }

    pub fn description<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "description")
    }

    pub fn set_description(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "description", value)
    }

    pub fn name<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "name")
    }

    pub fn set_name(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "name", value)
    }

    pub fn label<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "label")
    }

    pub fn set_label(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "label", value)
    }
}

model_type! {
    /// Link to an external metadata document.
    MetadataLink : "MetadataLinkType"
}

impl MetadataLink {
    pub fn about<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "about")
    }

    pub fn set_about(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "about", value)
    }

    /// Reads `TC211` until something is stored, the schema default.
    pub fn metadata_type(&self, model: &Model) -> Result<MetadataType, ModelError> {
        model.attr_enum(self.0, "metadataType")
    }

    /// `None` stores the default literal while still marking the field
    /// explicitly set.
    pub fn set_metadata_type(
        &self,
        model: &mut Model,
        value: Option<MetadataType>,
    ) -> Result<(), ModelError> {
        model.set_attr_enum(self.0, "metadataType", value)
    }

    pub fn unset_metadata_type(&self, model: &mut Model) -> Result<(), ModelError> {
        model.unset_named(self.0, "metadataType")
    }

    pub fn is_metadata_type_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "metadataType")
    }
}

model_type! {
    /// Keyword list with an optional categorizing code.
    Keywords : "KeywordsType"
}

impl Keywords {
    pub fn keywords<'m>(&self, model: &'m Model) -> Result<Vec<&'m str>, ModelError> {
        model.attr_strs(self.0, "keyword")
    }

    pub fn add_keyword(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.push_attr_str(self.0, "keyword", value)
    }

    pub fn type_code(&self, model: &Model) -> Result<Option<Code>, ModelError> {
        Ok(model.child_named(self.0, "type")?.map(Code::wrap))
    }

    pub fn set_type_code(&self, model: &mut Model, value: Option<Code>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "type", value.map(|c| c.id()))
    }
}

model_type! {
    /// WGS84 longitude/latitude bounding box, optionally stamped with up
    /// to two time positions.
    LonLatEnvelope : "LonLatEnvelopeType"
}

impl LonLatEnvelope {
    pub fn srs_name<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "srsName")
    }

    pub fn set_srs_name(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "srsName", value)
    }

    pub fn set_corners(
        &self,
        model: &mut Model,
        min: (f64, f64),
        max: (f64, f64),
    ) -> Result<(), ModelError> {
        model.set_attr_double(self.0, "minLon", min.0)?;
        model.set_attr_double(self.0, "minLat", min.1)?;
        model.set_attr_double(self.0, "maxLon", max.0)?;
        model.set_attr_double(self.0, "maxLat", max.1)
    }

    pub fn min_lon(&self, model: &Model) -> Result<Option<f64>, ModelError> {
        model.attr_double(self.0, "minLon")
    }

    pub fn min_lat(&self, model: &Model) -> Result<Option<f64>, ModelError> {
        model.attr_double(self.0, "minLat")
    }

    pub fn max_lon(&self, model: &Model) -> Result<Option<f64>, ModelError> {
        model.attr_double(self.0, "maxLon")
    }

    pub fn max_lat(&self, model: &Model) -> Result<Option<f64>, ModelError> {
        model.attr_double(self.0, "maxLat")
    }

    pub fn time_positions(&self, model: &Model) -> Result<Vec<TimePosition>, ModelError> {
        Ok(model
            .children_named(self.0, "timePosition")?
            .iter()
            .copied()
            .map(TimePosition::wrap)
            .collect())
    }

    pub fn add_time_position(
        &self,
        model: &mut Model,
        value: TimePosition,
    ) -> Result<(), ModelError> {
        model.add_child_named(self.0, "timePosition", value.id())
    }
}

model_type! {
    /// A literal tagged with the URI of its type.
    TypedLiteral : "TypedLiteralType"
}

impl TypedLiteral {
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

    pub fn literal_type<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "type")
    }

    pub fn set_literal_type(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "type", value)
    }
}

model_type! {
    /// Closed or open range between two typed literals.
    ValueRange : "ValueRangeType"
}

impl ValueRange {
    pub fn min(&self, model: &Model) -> Result<Option<TypedLiteral>, ModelError> {
        Ok(model.child_named(self.0, "min")?.map(TypedLiteral::wrap))
    }

    pub fn set_min(&self, model: &mut Model, value: Option<TypedLiteral>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "min", value.map(|v| v.id()))
    }

    pub fn max(&self, model: &Model) -> Result<Option<TypedLiteral>, ModelError> {
        Ok(model.child_named(self.0, "max")?.map(TypedLiteral::wrap))
    }

    pub fn set_max(&self, model: &mut Model, value: Option<TypedLiteral>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "max", value.map(|v| v.id()))
    }

    pub fn atomic(&self, model: &Model) -> Result<bool, ModelError> {
        model.attr_bool(self.0, "atomic")
    }

    pub fn set_atomic(&self, model: &mut Model, value: bool) -> Result<(), ModelError> {
        model.set_attr_bool(self.0, "atomic", value)
    }

    pub fn closure(&self, model: &Model) -> Result<Closure, ModelError> {
        model.attr_enum(self.0, "closure")
    }

    pub fn set_closure(&self, model: &mut Model, value: Option<Closure>) -> Result<(), ModelError> {
        model.set_attr_enum(self.0, "closure", value)
    }

    pub fn is_closure_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "closure")
    }
}

model_type! {
    /// Range with a resolution, for regularly spaced axes.
    Interval : "IntervalType" => ValueRange
}

impl Interval {
    pub fn res(&self, model: &Model) -> Result<Option<TypedLiteral>, ModelError> {
        Ok(model.child_named(self.0, "res")?.map(TypedLiteral::wrap))
    }

    pub fn set_res(&self, model: &mut Model, value: Option<TypedLiteral>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "res", value.map(|v| v.id()))
    }
}

model_type! {
    /// Choice sequence of intervals and single values, in document order.
    ValueEnumBase : "ValueEnumBaseType"
}

impl ValueEnumBase {
    pub fn intervals(&self, model: &Model) -> Result<Vec<Interval>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "interval")?
            .into_iter()
            .map(Interval::wrap)
            .collect())
    }

    pub fn add_interval(&self, model: &mut Model, value: Interval) -> Result<(), ModelError> {
        model.add_member_named(self.0, "interval", value.id())
    }

    pub fn single_values(&self, model: &Model) -> Result<Vec<TypedLiteral>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "singleValue")?
            .into_iter()
            .map(TypedLiteral::wrap)
            .collect())
    }

    pub fn add_single_value(
        &self,
        model: &mut Model,
        value: TypedLiteral,
    ) -> Result<(), ModelError> {
        model.add_member_named(self.0, "singleValue", value.id())
    }
}

model_type! {
    /// Valid axis values plus the default the server picks when a request
    /// leaves the axis out.
    Values : "ValuesType" => ValueEnumBase
}

impl Values {
    pub fn default_value(&self, model: &Model) -> Result<Option<TypedLiteral>, ModelError> {
        Ok(model.child_named(self.0, "default")?.map(TypedLiteral::wrap))
    }

    pub fn set_default_value(
        &self,
        model: &mut Model,
        value: Option<TypedLiteral>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "default", value.map(|v| v.id()))
    }
}

model_type! {
    /// One compound axis of the range: its values and reference system.
    AxisDescription : "AxisDescriptionType" => AbstractDescription
}

impl AxisDescription {
    pub fn values(&self, model: &Model) -> Result<Option<Values>, ModelError> {
        Ok(model.child_named(self.0, "values")?.map(Values::wrap))
    }

    pub fn set_values(&self, model: &mut Model, value: Option<Values>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "values", value.map(|v| v.id()))
    }

    pub fn ref_sys<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "refSys")
    }

    pub fn set_ref_sys(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "refSys", value)
    }
}

model_type! {
    /// Range structure of a coverage: its axes and null values.
    RangeSet : "RangeSetType" => AbstractDescription
}

impl RangeSet {
    pub fn axis_descriptions(&self, model: &Model) -> Result<Vec<AxisDescription>, ModelError> {
        Ok(model
            .children_named(self.0, "axisDescription")?
            .iter()
            .copied()
            .map(AxisDescription::wrap)
            .collect())
    }

    pub fn add_axis_description(
        &self,
        model: &mut Model,
        value: AxisDescription,
    ) -> Result<(), ModelError> {
        model.add_child_named(self.0, "axisDescription", value.id())
    }

    pub fn null_values(&self, model: &Model) -> Result<Option<ValueEnumBase>, ModelError> {
        Ok(model.child_named(self.0, "nullValues")?.map(ValueEnumBase::wrap))
    }

    pub fn set_null_values(
        &self,
        model: &mut Model,
        value: Option<ValueEnumBase>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "nullValues", value.map(|v| v.id()))
    }
}

model_type! {
    /// Period between two time positions.
    TimePeriod : "TimePeriodType"
}

impl TimePeriod {
    pub fn begin_position(&self, model: &Model) -> Result<Option<TimePosition>, ModelError> {
        Ok(model.child_named(self.0, "beginPosition")?.map(TimePosition::wrap))
    }

    pub fn set_begin_position(
        &self,
        model: &mut Model,
        value: Option<TimePosition>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "beginPosition", value.map(|v| v.id()))
    }

    pub fn end_position(&self, model: &Model) -> Result<Option<TimePosition>, ModelError> {
        Ok(model.child_named(self.0, "endPosition")?.map(TimePosition::wrap))
    }

    pub fn set_end_position(
        &self,
        model: &mut Model,
        value: Option<TimePosition>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "endPosition", value.map(|v| v.id()))
    }

    pub fn frame<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "frame")
    }

    pub fn set_frame(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "frame", value)
    }
}

model_type! {
    /// Either/or sequence of time positions and periods, kept in document
    /// order across both kinds.
    TimeSequence : "TimeSequenceType"
}

impl TimeSequence {
    pub fn time_positions(&self, model: &Model) -> Result<Vec<TimePosition>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "timePosition")?
            .into_iter()
            .map(TimePosition::wrap)
            .collect())
    }

    pub fn add_time_position(
        &self,
        model: &mut Model,
        value: TimePosition,
    ) -> Result<(), ModelError> {
        model.add_member_named(self.0, "timePosition", value.id())
    }

    pub fn time_periods(&self, model: &Model) -> Result<Vec<TimePeriod>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "timePeriod")?
            .into_iter()
            .map(TimePeriod::wrap)
            .collect())
    }

    pub fn add_time_period(&self, model: &mut Model, value: TimePeriod) -> Result<(), ModelError> {
        model.add_member_named(self.0, "timePeriod", value.id())
    }
}

model_type! {
    /// Spatial extent: envelopes plus the grid/polygon choice group.
    SpatialDomain : "SpatialDomainType"
}

impl SpatialDomain {
    pub fn envelopes(&self, model: &Model) -> Result<Vec<LonLatEnvelope>, ModelError> {
        Ok(model
            .children_named(self.0, "envelope")?
            .iter()
            .copied()
            .map(LonLatEnvelope::wrap)
            .collect())
    }

    pub fn add_envelope(&self, model: &mut Model, value: LonLatEnvelope) -> Result<(), ModelError> {
        model.add_child_named(self.0, "envelope", value.id())
    }

    pub fn grids(&self, model: &Model) -> Result<Vec<Grid>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "grid")?
            .into_iter()
            .map(Grid::wrap)
            .collect())
    }

    pub fn add_grid(&self, model: &mut Model, value: Grid) -> Result<(), ModelError> {
        model.add_member_named(self.0, "grid", value.id())
    }

    pub fn polygons(&self, model: &Model) -> Result<Vec<Polygon>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "polygon")?
            .into_iter()
            .map(Polygon::wrap)
            .collect())
    }

    pub fn add_polygon(&self, model: &mut Model, value: Polygon) -> Result<(), ModelError> {
        model.add_member_named(self.0, "polygon", value.id())
    }
}

model_type! {
    /// Spatial and temporal extent of one coverage.
    DomainSet : "DomainSetType"
}

impl DomainSet {
    pub fn spatial_domain(&self, model: &Model) -> Result<Option<SpatialDomain>, ModelError> {
        Ok(model.child_named(self.0, "spatialDomain")?.map(SpatialDomain::wrap))
    }

    pub fn set_spatial_domain(
        &self,
        model: &mut Model,
        value: Option<SpatialDomain>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "spatialDomain", value.map(|v| v.id()))
    }

    pub fn temporal_domain(&self, model: &Model) -> Result<Option<TimeSequence>, ModelError> {
        Ok(model.child_named(self.0, "temporalDomain")?.map(TimeSequence::wrap))
    }

    pub fn set_temporal_domain(
        &self,
        model: &mut Model,
        value: Option<TimeSequence>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "temporalDomain", value.map(|v| v.id()))
    }
}

model_type! {
    /// Coordinate systems a coverage can be requested and served in.
    SupportedCrss : "SupportedCRSsType"
}

impl SupportedCrss {
    pub fn request_response_crss(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "requestResponseCRSs")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_request_response_crss(
        &self,
        model: &mut Model,
        value: CodeList,
    ) -> Result<(), ModelError> {
        model.add_child_named(self.0, "requestResponseCRSs", value.id())
    }

    pub fn request_crss(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "requestCRSs")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_request_crss(&self, model: &mut Model, value: CodeList) -> Result<(), ModelError> {
        model.add_child_named(self.0, "requestCRSs", value.id())
    }

    pub fn response_crss(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "responseCRSs")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_response_crss(&self, model: &mut Model, value: CodeList) -> Result<(), ModelError> {
        model.add_child_named(self.0, "responseCRSs", value.id())
    }

    pub fn native_crss(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "nativeCRSs")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_native_crss(&self, model: &mut Model, value: CodeList) -> Result<(), ModelError> {
        model.add_child_named(self.0, "nativeCRSs", value.id())
    }
}

model_type! {
    /// Output formats a coverage can be encoded in.
    SupportedFormats : "SupportedFormatsType"
}

impl SupportedFormats {
    pub fn formats(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "formats")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_formats(&self, model: &mut Model, value: CodeList) -> Result<(), ModelError> {
        model.add_child_named(self.0, "formats", value.id())
    }

    pub fn native_format<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "nativeFormat")
    }

    pub fn set_native_format(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "nativeFormat", value)
    }
}

model_type! {
    /// Interpolation methods a server offers for one coverage.
    SupportedInterpolations : "SupportedInterpolationsType"
}

impl SupportedInterpolations {
    pub fn methods(&self, model: &Model) -> Result<Vec<InterpolationMethod>, ModelError> {
        model.attr_enums(self.0, "interpolationMethod")
    }

    pub fn add_method(
        &self,
        model: &mut Model,
        value: InterpolationMethod,
    ) -> Result<(), ModelError> {
        model.push_attr_enum(self.0, "interpolationMethod", value)
    }

    /// Reads `nearest neighbor` until something is stored, the schema
    /// default.
    pub fn default_method(&self, model: &Model) -> Result<InterpolationMethod, ModelError> {
        model.attr_enum(self.0, "default")
    }

    pub fn set_default_method(
        &self,
        model: &mut Model,
        value: Option<InterpolationMethod>,
    ) -> Result<(), ModelError> {
        model.set_attr_enum(self.0, "default", value)
    }

    pub fn is_default_method_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "default")
    }
}

model_type! {
    /// Summary entry of one coverage in the capabilities content section.
    CoverageOfferingBrief : "CoverageOfferingBriefType" => AbstractDescription
}

impl CoverageOfferingBrief {
    pub fn lon_lat_envelope(&self, model: &Model) -> Result<Option<LonLatEnvelope>, ModelError> {
        Ok(model.child_named(self.0, "lonLatEnvelope")?.map(LonLatEnvelope::wrap))
    }

    pub fn set_lon_lat_envelope(
        &self,
        model: &mut Model,
        value: Option<LonLatEnvelope>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "lonLatEnvelope", value.map(|v| v.id()))
    }

    pub fn keywords(&self, model: &Model) -> Result<Vec<Keywords>, ModelError> {
        Ok(model
            .children_named(self.0, "keywords")?
            .iter()
            .copied()
            .map(Keywords::wrap)
            .collect())
    }

    pub fn add_keywords(&self, model: &mut Model, value: Keywords) -> Result<(), ModelError> {
        model.add_child_named(self.0, "keywords", value.id())
    }
}

model_type! {
    /// Full description of one coverage, the DescribeCoverage payload.
    CoverageOffering : "CoverageOfferingType" => CoverageOfferingBrief
}

impl CoverageOffering {
    pub fn domain_set(&self, model: &Model) -> Result<Option<DomainSet>, ModelError> {
        Ok(model.child_named(self.0, "domainSet")?.map(DomainSet::wrap))
    }

    pub fn set_domain_set(
        &self,
        model: &mut Model,
        value: Option<DomainSet>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "domainSet", value.map(|v| v.id()))
    }

    pub fn range_set(&self, model: &Model) -> Result<Option<RangeSet>, ModelError> {
        Ok(model.child_named(self.0, "rangeSet")?.map(RangeSet::wrap))
    }

    pub fn set_range_set(&self, model: &mut Model, value: Option<RangeSet>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "rangeSet", value.map(|v| v.id()))
    }

    pub fn supported_crss(&self, model: &Model) -> Result<Option<SupportedCrss>, ModelError> {
        Ok(model.child_named(self.0, "supportedCRSs")?.map(SupportedCrss::wrap))
    }

    pub fn set_supported_crss(
        &self,
        model: &mut Model,
        value: Option<SupportedCrss>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "supportedCRSs", value.map(|v| v.id()))
    }

    pub fn supported_formats(&self, model: &Model) -> Result<Option<SupportedFormats>, ModelError> {
        Ok(model.child_named(self.0, "supportedFormats")?.map(SupportedFormats::wrap))
    }

    pub fn set_supported_formats(
        &self,
        model: &mut Model,
        value: Option<SupportedFormats>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "supportedFormats", value.map(|v| v.id()))
    }

    pub fn supported_interpolations(
        &self,
        model: &Model,
    ) -> Result<Option<SupportedInterpolations>, ModelError> {
        Ok(model
            .child_named(self.0, "supportedInterpolations")?
            .map(SupportedInterpolations::wrap))
    }

    pub fn set_supported_interpolations(
        &self,
        model: &mut Model,
        value: Option<SupportedInterpolations>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "supportedInterpolations", value.map(|v| v.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wcs10;

    #[test]
    fn metadata_type_null_reads_back_tc211() {
        let mut m = wcs10::model();
        let link = MetadataLink::new(&mut m).unwrap();
        assert_eq!(link.metadata_type(&m).unwrap(), MetadataType::Tc211);
        assert!(!link.is_metadata_type_set(&m).unwrap());
        link.set_metadata_type(&mut m, None).unwrap();
        assert_eq!(link.metadata_type(&m).unwrap(), MetadataType::Tc211);
        // Explicit tracking: the null set still counts as a set.
        assert!(link.is_metadata_type_set(&m).unwrap());
        link.unset_metadata_type(&mut m).unwrap();
        assert!(!link.is_metadata_type_set(&m).unwrap());
    }

    #[test]
    fn default_interpolation_null_reads_back_nearest_neighbor() {
        let mut m = wcs10::model();
        let si = SupportedInterpolations::new(&mut m).unwrap();
        si.set_default_method(&mut m, None).unwrap();
        assert_eq!(
            si.default_method(&m).unwrap(),
            InterpolationMethod::NearestNeighbor
        );
        assert!(si.is_default_method_set(&m).unwrap());
        si.add_method(&mut m, InterpolationMethod::Bilinear).unwrap();
        si.add_method(&mut m, InterpolationMethod::None).unwrap();
        assert_eq!(
            si.methods(&m).unwrap(),
            vec![InterpolationMethod::Bilinear, InterpolationMethod::None]
        );
    }

    #[test]
    fn temporal_sequence_keeps_document_order() {
        let mut m = wcs10::model();
        let seq = TimeSequence::new(&mut m).unwrap();
        let p1 = TimePosition::with_value(&mut m, "2024-01-01").unwrap();
        let period = TimePeriod::new(&mut m).unwrap();
        let p2 = TimePosition::with_value(&mut m, "2024-12-31").unwrap();
        seq.add_time_position(&mut m, p1).unwrap();
        seq.add_time_period(&mut m, period).unwrap();
        seq.add_time_position(&mut m, p2).unwrap();
        assert_eq!(seq.time_positions(&m).unwrap(), vec![p1, p2]);
        assert_eq!(seq.time_periods(&m).unwrap(), vec![period]);
        // Backing order interleaves the kinds as inserted.
        let group = m.feature_named(seq.id(), "group").unwrap();
        let backing: Vec<_> = m
            .entries(seq.id(), group)
            .unwrap()
            .iter()
            .map(|e| e.value.as_object().unwrap())
            .collect();
        assert_eq!(backing, vec![p1.id(), period.id(), p2.id()]);
    }

    #[test]
    fn offering_assembles_through_inherited_accessors() {
        let mut m = wcs10::model();
        let offering = CoverageOffering::new(&mut m).unwrap();
        offering.upcast().upcast().set_name(&mut m, "ndvi").unwrap();
        offering
            .upcast()
            .upcast()
            .set_label(&mut m, "Vegetation index")
            .unwrap();
        let domain = DomainSet::new(&mut m).unwrap();
        offering.set_domain_set(&mut m, Some(domain)).unwrap();
        let range = RangeSet::new(&mut m).unwrap();
        offering.set_range_set(&mut m, Some(range)).unwrap();
        assert_eq!(offering.upcast().upcast().name(&m).unwrap(), Some("ndvi"));
        assert_eq!(offering.domain_set(&m).unwrap(), Some(domain));
        assert_eq!(
            m.container(domain.id()).unwrap().map(|at| at.parent),
            Some(offering.id())
        );
    }
}
