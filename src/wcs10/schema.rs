//! The WCS 1.0 schema registry.
//!
//! Declaration order follows the published schema's type derivation:
//! supertypes declare their features before any subclass does, and every
//! containment target is declared before the feature referencing it.
//! Defaults and explicit-set tracking are taken from the schema: an
//! optional field with a declared default gets the explicit discipline,
//! everything else the plain one.

use std::sync::Arc;

use crate::core::{Literal, Model, Schema, SchemaBuilder, Value, ValueType};

/// Builds the WCS 1.0 schema. Callers own the result; models share it
/// read-only behind the returned `Arc`.
pub fn schema() -> Arc<Schema> {
    let mut b = SchemaBuilder::new();
    let lit = |e, i| Value::Literal(Literal::new(e, i));
    let s = |v: &str| Value::Str(v.to_owned());

    let section = b.enumeration(
        "CapabilitiesSectionType",
        &[
            "/",
            "/WCS_Capabilities/Service",
            "/WCS_Capabilities/Capability",
            "/WCS_Capabilities/ContentMetadata",
        ],
    );
    let closure = b.enumeration(
        "ClosureType",
        &["closed", "open", "open-closed", "closed-open"],
    );
    let interpolation = b.enumeration(
        "InterpolationMethodType",
        &[
            "nearest neighbor",
            "bilinear",
            "bicubic",
            "lost area",
            "barycentric",
            "none",
        ],
    );
    let metadata = b.enumeration("MetadataTypeType", &["TC211", "FGDC", "other"]);

    // GML collaborators, trimmed to what the coverage model references.
    let time_position = b.class("TimePositionType");
    b.attr(time_position, "value", ValueType::Str);
    let code = b.class("CodeType");
    b.attr(code, "value", ValueType::Str);
    b.attr(code, "codeSpace", ValueType::Str);
    let code_list = b.class("CodeListType");
    b.attr_many(code_list, "value", ValueType::Str);
    let grid = b.class("GridType");
    b.attr(grid, "dimension", ValueType::Int);
    let polygon = b.class("PolygonType");
    b.attr(polygon, "exterior", ValueType::Str);

    let metadata_link = b.class("MetadataLinkType");
    b.attr(metadata_link, "about", ValueType::Str);
    b.attr_unsettable(
        metadata_link,
        "metadataType",
        ValueType::Enum(metadata),
        lit(metadata, 0),
    );

    let description = b.abstract_class("AbstractDescriptionType");
    b.children(description, "metadataLink", metadata_link);
    b.attr(description, "description", ValueType::Str);
    b.attr(description, "name", ValueType::Str);
    b.attr(description, "label", ValueType::Str);

    let keywords = b.class("KeywordsType");
    b.attr_many(keywords, "keyword", ValueType::Str);
    b.child(keywords, "type", code);

    let lon_lat_envelope = b.class("LonLatEnvelopeType");
    b.attr(lon_lat_envelope, "srsName", ValueType::Str);
    b.attr(lon_lat_envelope, "minLon", ValueType::Double);
    b.attr(lon_lat_envelope, "minLat", ValueType::Double);
    b.attr(lon_lat_envelope, "maxLon", ValueType::Double);
    b.attr(lon_lat_envelope, "maxLat", ValueType::Double);
    b.children(lon_lat_envelope, "timePosition", time_position);

    let typed_literal = b.class("TypedLiteralType");
    b.attr(typed_literal, "value", ValueType::Str);
    b.attr(typed_literal, "type", ValueType::Str);

    let value_range = b.class("ValueRangeType");
    b.child(value_range, "min", typed_literal);
    b.child(value_range, "max", typed_literal);
    b.attr_unsettable(value_range, "atomic", ValueType::Bool, Value::Bool(false));
    b.attr_unsettable(value_range, "closure", ValueType::Enum(closure), lit(closure, 0));
    b.attr(value_range, "semantic", ValueType::Str);
    b.attr(value_range, "type", ValueType::Str);

    let interval = b.subclass("IntervalType", value_range);
    b.child(interval, "res", typed_literal);

    let value_enum = b.class("ValueEnumBaseType");
    let value_enum_group = b.group(value_enum, "group");
    b.member(value_enum, "interval", value_enum_group, interval);
    b.member(value_enum, "singleValue", value_enum_group, typed_literal);

    let values = b.subclass("ValuesType", value_enum);
    b.child(values, "default", typed_literal);

    let axis_description = b.subclass("AxisDescriptionType", description);
    b.child(axis_description, "values", values);
    b.attr(axis_description, "refSys", ValueType::Str);
    b.attr(axis_description, "refSysLabel", ValueType::Str);
    b.attr(axis_description, "semantic", ValueType::Str);

    let range_set = b.subclass("RangeSetType", description);
    b.children(range_set, "axisDescription", axis_description);
    b.child(range_set, "nullValues", value_enum);
    b.attr(range_set, "refSys", ValueType::Str);
    b.attr(range_set, "refSysLabel", ValueType::Str);
    b.attr(range_set, "semantic", ValueType::Str);

    let time_period = b.class("TimePeriodType");
    b.child(time_period, "beginPosition", time_position);
    b.child(time_period, "endPosition", time_position);
    b.attr(time_period, "timeResolution", ValueType::Str);
    b.attr_unsettable(time_period, "frame", ValueType::Str, s("#ISO-8601"));

    let time_sequence = b.class("TimeSequenceType");
    let time_group = b.group(time_sequence, "group");
    b.member(time_sequence, "timePosition", time_group, time_position);
    b.member(time_sequence, "timePeriod", time_group, time_period);

    let spatial_domain = b.class("SpatialDomainType");
    b.children(spatial_domain, "envelope", lon_lat_envelope);
    let grid_group = b.group(spatial_domain, "gridGroup");
    b.member(spatial_domain, "grid", grid_group, grid);
    b.member(spatial_domain, "polygon", grid_group, polygon);

    let domain_set = b.class("DomainSetType");
    b.child(domain_set, "spatialDomain", spatial_domain);
    b.child(domain_set, "temporalDomain", time_sequence);

    let supported_crss = b.class("SupportedCRSsType");
    b.children(supported_crss, "requestResponseCRSs", code_list);
    b.children(supported_crss, "requestCRSs", code_list);
    b.children(supported_crss, "responseCRSs", code_list);
    b.children(supported_crss, "nativeCRSs", code_list);

    let supported_formats = b.class("SupportedFormatsType");
    b.children(supported_formats, "formats", code_list);
    b.attr(supported_formats, "nativeFormat", ValueType::Str);

    let supported_interpolations = b.class("SupportedInterpolationsType");
    b.attr_many(
        supported_interpolations,
        "interpolationMethod",
        ValueType::Enum(interpolation),
    );
    b.attr_unsettable(
        supported_interpolations,
        "default",
        ValueType::Enum(interpolation),
        lit(interpolation, 0),
    );

    let offering_brief = b.subclass("CoverageOfferingBriefType", description);
    b.child(offering_brief, "lonLatEnvelope", lon_lat_envelope);
    b.children(offering_brief, "keywords", keywords);

    let offering = b.subclass("CoverageOfferingType", offering_brief);
    b.child(offering, "domainSet", domain_set);
    b.child(offering, "rangeSet", range_set);
    b.child(offering, "supportedCRSs", supported_crss);
    b.child(offering, "supportedFormats", supported_formats);
    b.child(offering, "supportedInterpolations", supported_interpolations);

    let online_resource = b.class("OnlineResourceType");
    b.attr(online_resource, "href", ValueType::Str);
    b.attr(online_resource, "role", ValueType::Str);
    b.attr(online_resource, "arcrole", ValueType::Str);
    b.attr(online_resource, "title", ValueType::Str);
    b.attr_unsettable(online_resource, "type", ValueType::Str, s("simple"));

    let get = b.class("GetType");
    b.child(get, "onlineResource", online_resource);
    let post = b.class("PostType");
    b.child(post, "onlineResource", online_resource);

    let http = b.class("HTTPType");
    let http_group = b.group(http, "group");
    b.member(http, "get", http_group, get);
    b.member(http, "post", http_group, post);

    let dcp_type = b.class("DCPTypeType");
    b.child(dcp_type, "http", http);

    let operation = b.class("OperationType");
    b.children(operation, "dcpType", dcp_type);

    let request = b.class("RequestType");
    b.child(request, "getCapabilities", operation);
    b.child(request, "describeCoverage", operation);
    b.child(request, "getCoverage", operation);

    let exception = b.class("ExceptionType");
    b.attr_many(exception, "format", ValueType::Str);

    let vendor = b.class("VendorSpecificCapabilitiesType");
    b.attr(vendor, "any", ValueType::Str);

    let capability = b.class("WCSCapabilityType");
    b.child(capability, "request", request);
    b.child(capability, "exception", exception);
    b.child(capability, "vendorSpecificCapabilities", vendor);
    b.attr(capability, "updateSequence", ValueType::Str);
    b.attr_unsettable(capability, "version", ValueType::Str, s("1.0.0"));

    let service = b.subclass("ServiceType", description);
    b.children(service, "keywords", keywords);
    b.child(service, "fees", code_list);
    b.children(service, "accessConstraints", code_list);
    b.attr(service, "updateSequence", ValueType::Str);
    b.attr_unsettable(service, "version", ValueType::Str, s("1.0.0"));

    let content_metadata = b.class("ContentMetadataType");
    b.children(content_metadata, "coverageOfferingBrief", offering_brief);
    b.attr(content_metadata, "href", ValueType::Str);
    b.attr(content_metadata, "role", ValueType::Str);
    b.attr(content_metadata, "arcrole", ValueType::Str);
    b.attr(content_metadata, "title", ValueType::Str);
    b.attr_unsettable(content_metadata, "actuate", ValueType::Str, s("onLoad"));
    b.attr_unsettable(content_metadata, "show", ValueType::Str, s("new"));
    b.attr_unsettable(content_metadata, "type", ValueType::Str, s("simple"));
    b.attr(content_metadata, "updateSequence", ValueType::Str);
    b.attr_unsettable(content_metadata, "version", ValueType::Str, s("1.0.0"));

    let capabilities = b.class("WCSCapabilitiesType");
    b.child(capabilities, "service", service);
    b.child(capabilities, "capability", capability);
    b.child(capabilities, "contentMetadata", content_metadata);
    b.attr(capabilities, "updateSequence", ValueType::Str);
    b.attr_unsettable(capabilities, "version", ValueType::Str, s("1.0.0"));

    let spatial_subset = b.subclass("SpatialSubsetType", spatial_domain);
    let domain_subset = b.class("DomainSubsetType");
    b.child(domain_subset, "spatialSubset", spatial_subset);
    b.child(domain_subset, "temporalSubset", time_sequence);

    let axis_subset = b.subclass("AxisSubsetType", value_enum);
    b.attr(axis_subset, "name", ValueType::Str);

    let range_subset = b.class("RangeSubsetType");
    b.children(range_subset, "axisSubset", axis_subset);

    let output = b.class("OutputType");
    b.child(output, "crs", code);
    b.child(output, "format", code);

    let get_capabilities = b.class("GetCapabilitiesType");
    b.attr_unsettable(
        get_capabilities,
        "section",
        ValueType::Enum(section),
        lit(section, 0),
    );
    b.attr_unsettable(get_capabilities, "service", ValueType::Str, s("WCS"));
    b.attr(get_capabilities, "updateSequence", ValueType::Str);
    b.attr_unsettable(get_capabilities, "version", ValueType::Str, s("1.0.0"));
    b.attr(get_capabilities, "baseUrl", ValueType::Str);

    let describe_coverage = b.class("DescribeCoverageType");
    b.attr_many(describe_coverage, "coverage", ValueType::Str);
    b.attr_unsettable(describe_coverage, "service", ValueType::Str, s("WCS"));
    b.attr_unsettable(describe_coverage, "version", ValueType::Str, s("1.0.0"));
    b.attr(describe_coverage, "baseUrl", ValueType::Str);

    let get_coverage = b.class("GetCoverageType");
    b.attr(get_coverage, "sourceCoverage", ValueType::Str);
    b.child(get_coverage, "domainSubset", domain_subset);
    b.child(get_coverage, "rangeSubset", range_subset);
    b.attr_unsettable(
        get_coverage,
        "interpolationMethod",
        ValueType::Enum(interpolation),
        lit(interpolation, 0),
    );
    b.child(get_coverage, "output", output);
    b.attr_unsettable(get_coverage, "service", ValueType::Str, s("WCS"));
    b.attr_unsettable(get_coverage, "version", ValueType::Str, s("1.0.0"));
    b.attr(get_coverage, "baseUrl", ValueType::Str);

    let root = b.class("DocumentRoot");
    let mixed = b.group(root, "mixed");
    b.member(root, "getCapabilities", mixed, get_capabilities);
    b.member(root, "describeCoverage", mixed, describe_coverage);
    b.member(root, "getCoverage", mixed, get_coverage);
    b.member(root, "capability", mixed, capabilities);
    b.member(root, "coverageOffering", mixed, offering);

    Arc::new(b.finish())
}

/// A fresh model over [`schema`].
pub fn model() -> Model {
    Model::new(schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FeatureKind, ModelError, ObjectId};

    #[test]
    fn catalog_defaults_match_the_published_schema() {
        let s = schema();
        for class in [
            "WCSCapabilitiesType",
            "WCSCapabilityType",
            "ServiceType",
            "ContentMetadataType",
            "GetCapabilitiesType",
            "DescribeCoverageType",
            "GetCoverageType",
        ] {
            let def = s.class_named(class).unwrap();
            let version = def.feature_named("version").unwrap();
            assert!(version.is_unsettable(), "{}", class);
            assert_eq!(
                version.default_value(),
                Some(&Value::Str("1.0.0".into())),
                "{}",
                class
            );
        }
        let link = s.class_named("MetadataLinkType").unwrap();
        let metadata_type = link.feature_named("metadataType").unwrap();
        let default = metadata_type.default_value().unwrap().as_literal().unwrap();
        assert_eq!(
            s.enum_def(default.enumeration()).literal(default.index()),
            Some("TC211")
        );
        let interp = s.class_named("SupportedInterpolationsType").unwrap();
        let default = interp
            .feature_named("default")
            .unwrap()
            .default_value()
            .unwrap()
            .as_literal()
            .unwrap();
        assert_eq!(
            s.enum_def(default.enumeration()).literal(default.index()),
            Some("nearest neighbor")
        );
        let section = s
            .class_named("GetCapabilitiesType")
            .unwrap()
            .feature_named("section")
            .unwrap()
            .default_value()
            .unwrap()
            .as_literal()
            .unwrap();
        assert_eq!(s.enum_def(section.enumeration()).literal(section.index()), Some("/"));
    }

    #[test]
    fn derivation_chains_match_the_published_schema() {
        let s = schema();
        for (sub, sup) in [
            ("AxisDescriptionType", "AbstractDescriptionType"),
            ("RangeSetType", "AbstractDescriptionType"),
            ("ServiceType", "AbstractDescriptionType"),
            ("CoverageOfferingBriefType", "AbstractDescriptionType"),
            ("CoverageOfferingType", "CoverageOfferingBriefType"),
            ("IntervalType", "ValueRangeType"),
            ("ValuesType", "ValueEnumBaseType"),
            ("AxisSubsetType", "ValueEnumBaseType"),
            ("SpatialSubsetType", "SpatialDomainType"),
        ] {
            let sub = s.class_named(sub).unwrap();
            let sup = s.class_named(sup).unwrap();
            assert!(s.conforms(sub.id(), sup.id()), "{}", sub.name());
        }
        // The flat table starts with the inherited prefix.
        let offering = s.class_named("CoverageOfferingType").unwrap();
        let names: Vec<_> = offering.features().iter().map(|f| f.name()).collect();
        assert_eq!(
            &names[..6],
            &["metadataLink", "description", "name", "label", "lonLatEnvelope", "keywords"]
        );
    }

    /// Walks the whole catalog through the generic facade: every feature
    /// of every concrete class accepts a value of its declared shape and
    /// reads it back.
    #[test]
    fn facade_round_trips_the_whole_catalog() {
        let s = schema();
        let mut m = Model::new(s.clone());
        let class_ids: Vec<_> = s
            .classes()
            .iter()
            .filter(|c| !c.is_abstract())
            .map(|c| c.id())
            .collect();
        for class_id in class_ids {
            let object = m.create(class_id).unwrap();
            let defs: Vec<_> = s.class(class_id).features().to_vec();
            for def in defs {
                match def.kind() {
                    FeatureKind::Attr { many: false, ty, .. } => {
                        let sample = match ty {
                            ValueType::Bool => Value::Bool(true),
                            ValueType::Int => Value::Int(7),
                            ValueType::Double => Value::Double(0.5),
                            ValueType::Str => Value::Str("sample".into()),
                            ValueType::Enum(e) => {
                                let last = s.enum_def(*e).literals().len() as u16 - 1;
                                Value::Literal(Literal::new(*e, last))
                            }
                        };
                        m.set_value(object, def.id(), sample.clone()).unwrap();
                        assert_eq!(m.value(object, def.id()).unwrap(), sample);
                        assert!(m.is_set(object, def.id()).unwrap());
                    }
                    FeatureKind::Attr { many: true, ty, .. } => {
                        let sample = match ty {
                            ValueType::Enum(e) => Value::Literal(Literal::new(*e, 0)),
                            _ => Value::Str("sample".into()),
                        };
                        m.set_value(object, def.id(), Value::Seq(vec![sample.clone()]))
                            .unwrap();
                        assert_eq!(
                            m.value(object, def.id()).unwrap(),
                            Value::Seq(vec![sample])
                        );
                    }
                    FeatureKind::Child { class } => {
                        let child = m.create(*class).unwrap();
                        m.set_child(object, def.id(), Some(child)).unwrap();
                        assert_eq!(m.child(object, def.id()).unwrap(), Some(child));
                        assert_eq!(
                            m.container(child).unwrap().map(|at| at.parent),
                            Some(object)
                        );
                    }
                    FeatureKind::Children { class } => {
                        let a = m.create(*class).unwrap();
                        let z = m.create(*class).unwrap();
                        m.add_child(object, def.id(), a).unwrap();
                        m.add_child(object, def.id(), z).unwrap();
                        assert_eq!(m.children(object, def.id()).unwrap(), &[a, z]);
                    }
                    FeatureKind::Member { class, .. } => {
                        let entry = m.create(*class).unwrap();
                        m.add_member(object, def.id(), Value::Object(entry)).unwrap();
                        assert_eq!(m.member_objects(object, def.id()).unwrap(), vec![entry]);
                        assert!(m.is_set(object, def.id()).unwrap());
                    }
                    FeatureKind::Group => {}
                }
            }
        }
    }

    #[test]
    fn abstract_description_cannot_be_instantiated() {
        let mut m = model();
        let err = m.create_named("AbstractDescriptionType").unwrap_err();
        assert!(matches!(err, ModelError::AbstractClass { .. }));
        let _: ObjectId = m.create_named("ServiceType").unwrap();
    }
}
