//! Capabilities document types: service identification, operation
//! bindings and the content section listing coverage briefs.

use crate::core::{Model, ModelError};

use super::{model_type, AbstractDescription, CodeList, CoverageOfferingBrief, Keywords, ModelType};

model_type! {
    /// Network address an operation binding points at.
    OnlineResource : "OnlineResourceType"
}

impl OnlineResource {
    pub fn with_href(model: &mut Model, href: &str) -> Result<Self, ModelError> {
        let this = Self::new(model)?;
        this.set_href(model, href)?;
        Ok(this)
    }

    pub fn href<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "href")
    }

    pub fn set_href(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "href", value)
    }

    pub fn role<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "role")
    }

    pub fn set_role(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "role", value)
    }

    pub fn arcrole<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "arcrole")
    }

    pub fn set_arcrole(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "arcrole", value)
    }

    pub fn title<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "title")
    }

    pub fn set_title(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "title", value)
    }

    /// Reads `simple` until something is stored, the schema default.
    pub fn link_type<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "type")
    }

    pub fn is_link_type_set(&self, model: &Model) -> Result<bool, ModelError> {
        model.is_set_named(self.0, "type")
    }
}

model_type! {
    /// HTTP GET binding.
    Get : "GetType"
}

impl Get {
    pub fn online_resource(&self, model: &Model) -> Result<Option<OnlineResource>, ModelError> {
        Ok(model.child_named(self.0, "onlineResource")?.map(OnlineResource::wrap))
    }

    pub fn set_online_resource(
        &self,
        model: &mut Model,
        value: Option<OnlineResource>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "onlineResource", value.map(|v| v.id()))
    }
}

model_type! {
    /// HTTP POST binding.
    Post : "PostType"
}

impl Post {
    pub fn online_resource(&self, model: &Model) -> Result<Option<OnlineResource>, ModelError> {
        Ok(model.child_named(self.0, "onlineResource")?.map(OnlineResource::wrap))
    }

    pub fn set_online_resource(
        &self,
        model: &mut Model,
        value: Option<OnlineResource>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "onlineResource", value.map(|v| v.id()))
    }
}

model_type! {
    /// GET/POST choice group; entry order is document order, which a
    /// round-tripped capabilities document must keep.
    Http : "HTTPType"
}

impl Http {
    pub fn gets(&self, model: &Model) -> Result<Vec<Get>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "get")?
            .into_iter()
            .map(Get::wrap)
            .collect())
    }

    pub fn add_get(&self, model: &mut Model, value: Get) -> Result<(), ModelError> {
        model.add_member_named(self.0, "get", value.id())
    }

    pub fn posts(&self, model: &Model) -> Result<Vec<Post>, ModelError> {
        Ok(model
            .member_objects_named(self.0, "post")?
            .into_iter()
            .map(Post::wrap)
            .collect())
    }

    pub fn add_post(&self, model: &mut Model, value: Post) -> Result<(), ModelError> {
        model.add_member_named(self.0, "post", value.id())
    }
}

model_type! {
    /// Distributed computing platform of an operation, HTTP here.
    DcpType : "DCPTypeType"
}

impl DcpType {
    pub fn http(&self, model: &Model) -> Result<Option<Http>, ModelError> {
        Ok(model.child_named(self.0, "http")?.map(Http::wrap))
    }

    pub fn set_http(&self, model: &mut Model, value: Option<Http>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "http", value.map(|v| v.id()))
    }
}

model_type! {
    /// One advertised operation and its platform bindings.
    Operation : "OperationType"
}

impl Operation {
    pub fn dcp_types(&self, model: &Model) -> Result<Vec<DcpType>, ModelError> {
        Ok(model
            .children_named(self.0, "dcpType")?
            .iter()
            .copied()
            .map(DcpType::wrap)
            .collect())
    }

    pub fn add_dcp_type(&self, model: &mut Model, value: DcpType) -> Result<(), ModelError> {
        model.add_child_named(self.0, "dcpType", value.id())
    }
}

model_type! {
    /// The three WCS operations a server advertises.
    Request : "RequestType"
}

impl Request {
    pub fn get_capabilities(&self, model: &Model) -> Result<Option<Operation>, ModelError> {
        Ok(model.child_named(self.0, "getCapabilities")?.map(Operation::wrap))
    }

    pub fn set_get_capabilities(
        &self,
        model: &mut Model,
        value: Option<Operation>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "getCapabilities", value.map(|v| v.id()))
    }

    pub fn describe_coverage(&self, model: &Model) -> Result<Option<Operation>, ModelError> {
        Ok(model.child_named(self.0, "describeCoverage")?.map(Operation::wrap))
    }

    pub fn set_describe_coverage(
        &self,
        model: &mut Model,
        value: Option<Operation>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "describeCoverage", value.map(|v| v.id()))
    }

    pub fn get_coverage(&self, model: &Model) -> Result<Option<Operation>, ModelError> {
        Ok(model.child_named(self.0, "getCoverage")?.map(Operation::wrap))
    }

    pub fn set_get_coverage(
        &self,
        model: &mut Model,
        value: Option<Operation>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "getCoverage", value.map(|v| v.id()))
    }
}

model_type! {
    /// Exception report formats the server can produce.
    Exception : "ExceptionType"
}

impl Exception {
    pub fn formats<'m>(&self, model: &'m Model) -> Result<Vec<&'m str>, ModelError> {
        model.attr_strs(self.0, "format")
    }

    pub fn add_format(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.push_attr_str(self.0, "format", value)
    }
}

model_type! {
    /// Opaque vendor extension blob.
    VendorSpecificCapabilities : "VendorSpecificCapabilitiesType"
}

impl VendorSpecificCapabilities {
    pub fn any<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "any")
    }

    pub fn set_any(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "any", value)
    }
}

model_type! {
    /// Operations, exception formats and vendor extras of a server.
    WcsCapability : "WCSCapabilityType"
}

impl WcsCapability {
    pub fn request(&self, model: &Model) -> Result<Option<Request>, ModelError> {
        Ok(model.child_named(self.0, "request")?.map(Request::wrap))
    }

    pub fn set_request(&self, model: &mut Model, value: Option<Request>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "request", value.map(|v| v.id()))
    }

    pub fn exception(&self, model: &Model) -> Result<Option<Exception>, ModelError> {
        Ok(model.child_named(self.0, "exception")?.map(Exception::wrap))
    }

    pub fn set_exception(&self, model: &mut Model, value: Option<Exception>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "exception", value.map(|v| v.id()))
    }

    pub fn vendor_specific_capabilities(
        &self,
        model: &Model,
    ) -> Result<Option<VendorSpecificCapabilities>, ModelError> {
        Ok(model
            .child_named(self.0, "vendorSpecificCapabilities")?
            .map(VendorSpecificCapabilities::wrap))
    }

    pub fn set_vendor_specific_capabilities(
        &self,
        model: &mut Model,
        value: Option<VendorSpecificCapabilities>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "vendorSpecificCapabilities", value.map(|v| v.id()))
    }

    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }
}

model_type! {
    /// Who serves the coverages and under which terms.
    Service : "ServiceType" => AbstractDescription
}

impl Service {
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

    pub fn fees(&self, model: &Model) -> Result<Option<CodeList>, ModelError> {
        Ok(model.child_named(self.0, "fees")?.map(CodeList::wrap))
    }

    pub fn set_fees(&self, model: &mut Model, value: Option<CodeList>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "fees", value.map(|v| v.id()))
    }

    pub fn access_constraints(&self, model: &Model) -> Result<Vec<CodeList>, ModelError> {
        Ok(model
            .children_named(self.0, "accessConstraints")?
            .iter()
            .copied()
            .map(CodeList::wrap)
            .collect())
    }

    pub fn add_access_constraints(
        &self,
        model: &mut Model,
        value: CodeList,
    ) -> Result<(), ModelError> {
        model.add_child_named(self.0, "accessConstraints", value.id())
    }

    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }
}

model_type! {
    /// Content section: the briefs of every coverage on offer.
    ContentMetadata : "ContentMetadataType"
}

impl ContentMetadata {
    pub fn coverage_offering_briefs(
        &self,
        model: &Model,
    ) -> Result<Vec<CoverageOfferingBrief>, ModelError> {
        Ok(model
            .children_named(self.0, "coverageOfferingBrief")?
            .iter()
            .copied()
            .map(CoverageOfferingBrief::wrap)
            .collect())
    }

    pub fn add_coverage_offering_brief(
        &self,
        model: &mut Model,
        value: CoverageOfferingBrief,
    ) -> Result<(), ModelError> {
        model.add_child_named(self.0, "coverageOfferingBrief", value.id())
    }

    pub fn version<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "version")
    }

    pub fn set_version(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "version", value)
    }
}

model_type! {
    /// Root of a WCS_Capabilities document.
    WcsCapabilities : "WCSCapabilitiesType"
}

impl WcsCapabilities {
    pub fn service(&self, model: &Model) -> Result<Option<Service>, ModelError> {
        Ok(model.child_named(self.0, "service")?.map(Service::wrap))
    }

    pub fn set_service(&self, model: &mut Model, value: Option<Service>) -> Result<(), ModelError> {
        model.set_child_named(self.0, "service", value.map(|v| v.id()))
    }

    pub fn capability(&self, model: &Model) -> Result<Option<WcsCapability>, ModelError> {
        Ok(model.child_named(self.0, "capability")?.map(WcsCapability::wrap))
    }

    pub fn set_capability(
        &self,
        model: &mut Model,
        value: Option<WcsCapability>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "capability", value.map(|v| v.id()))
    }

    pub fn content_metadata(&self, model: &Model) -> Result<Option<ContentMetadata>, ModelError> {
        Ok(model.child_named(self.0, "contentMetadata")?.map(ContentMetadata::wrap))
    }

    pub fn set_content_metadata(
        &self,
        model: &mut Model,
        value: Option<ContentMetadata>,
    ) -> Result<(), ModelError> {
        model.set_child_named(self.0, "contentMetadata", value.map(|v| v.id()))
    }

    pub fn update_sequence<'m>(&self, model: &'m Model) -> Result<Option<&'m str>, ModelError> {
        model.attr_str(self.0, "updateSequence")
    }

    pub fn set_update_sequence(&self, model: &mut Model, value: &str) -> Result<(), ModelError> {
        model.set_attr_str(self.0, "updateSequence", value)
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
    fn http_bindings_keep_document_order() {
        let mut m = wcs10::model();
        let http = Http::new(&mut m).unwrap();
        let g1 = Get::new(&mut m).unwrap();
        let p1 = Post::new(&mut m).unwrap();
        let g2 = Get::new(&mut m).unwrap();
        http.add_get(&mut m, g1).unwrap();
        http.add_post(&mut m, p1).unwrap();
        http.add_get(&mut m, g2).unwrap();
        assert_eq!(http.gets(&m).unwrap(), vec![g1, g2]);
        assert_eq!(http.posts(&m).unwrap(), vec![p1]);
        let group = m.feature_named(http.id(), "group").unwrap();
        let backing: Vec<_> = m
            .entries(http.id(), group)
            .unwrap()
            .iter()
            .map(|e| e.value.as_object().unwrap())
            .collect();
        assert_eq!(backing, vec![g1.id(), p1.id(), g2.id()]);
    }

    #[test]
    fn capabilities_document_assembles() {
        let mut m = wcs10::model();
        let caps = WcsCapabilities::new(&mut m).unwrap();
        let service = Service::new(&mut m).unwrap();
        service.upcast().set_name(&mut m, "WCS").unwrap();
        service.upcast().set_label(&mut m, "Coverage server").unwrap();
        caps.set_service(&mut m, Some(service)).unwrap();

        let capability = WcsCapability::new(&mut m).unwrap();
        let request = Request::new(&mut m).unwrap();
        let operation = Operation::new(&mut m).unwrap();
        let dcp = DcpType::new(&mut m).unwrap();
        let http = Http::new(&mut m).unwrap();
        let get = Get::new(&mut m).unwrap();
        let resource = OnlineResource::with_href(&mut m, "https://example.org/wcs").unwrap();
        get.set_online_resource(&mut m, Some(resource)).unwrap();
        http.add_get(&mut m, get).unwrap();
        dcp.set_http(&mut m, Some(http)).unwrap();
        operation.add_dcp_type(&mut m, dcp).unwrap();
        request.set_get_capabilities(&mut m, Some(operation)).unwrap();
        capability.set_request(&mut m, Some(request)).unwrap();
        caps.set_capability(&mut m, Some(capability)).unwrap();

        let held = caps
            .capability(&m)
            .unwrap()
            .unwrap()
            .request(&m)
            .unwrap()
            .unwrap()
            .get_capabilities(&m)
            .unwrap()
            .unwrap();
        assert_eq!(held, operation);
        assert_eq!(
            m.container(operation.id()).unwrap().map(|at| at.parent),
            Some(request.id())
        );
    }

    #[test]
    fn moving_a_brief_between_content_sections_detaches_it() {
        let mut m = wcs10::model();
        let first = ContentMetadata::new(&mut m).unwrap();
        let second = ContentMetadata::new(&mut m).unwrap();
        let brief = CoverageOfferingBrief::new(&mut m).unwrap();
        first.add_coverage_offering_brief(&mut m, brief).unwrap();
        second.add_coverage_offering_brief(&mut m, brief).unwrap();
        assert!(first.coverage_offering_briefs(&m).unwrap().is_empty());
        assert_eq!(second.coverage_offering_briefs(&m).unwrap(), vec![brief]);
    }
}
