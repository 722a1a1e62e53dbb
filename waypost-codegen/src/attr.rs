//! The closed vocabulary of attributes the analysis recognises.
//!
//! Recognition is an exact, case-sensitive match on the attribute name (the
//! final segment of the attribute path). Anything else is not ours and is
//! ignored.

/// Name of the controller attribute.
pub const CONTROLLER: &str = "controller";
/// Name of the marker trait that opts a type into directory discovery.
pub const DISCOVERABLE: &str = "ControllerDiscoverable";

pub const GET: &str = "get";
pub const POST: &str = "post";
pub const PUT: &str = "put";
pub const PATCH: &str = "patch";
pub const DELETE: &str = "delete";
/// Generic handler marker whose verb is supplied as its first argument.
pub const HANDLER: &str = "handler";

pub const PATH_PARAM: &str = "path_param";
pub const QUERY_PARAM: &str = "query_param";
pub const QUERY_CONTENT: &str = "query_content";
pub const BODY_CONTENT: &str = "body_content";

/// All handler marker names, in lookup order.
pub const HANDLER_MARKERS: [&str; 6] = [GET, POST, PUT, DELETE, PATCH, HANDLER];

/// All parameter binding marker names.
pub const PARAM_MARKERS: [&str; 4] = [PATH_PARAM, QUERY_PARAM, QUERY_CONTENT, BODY_CONTENT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Name of the associated constant on the runtime's `Method` type.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeMarker {
    Controller,
    /// `None` is the generic `#[handler(...)]` marker.
    Handler(Option<HttpMethod>),
    PathParam,
    QueryParam,
    QueryContent,
    BodyContent,
    Discoverable,
}

impl AttributeMarker {
    pub fn is_handler(&self) -> bool {
        matches!(self, AttributeMarker::Handler(_))
    }

    pub fn is_param_binding(&self) -> bool {
        matches!(
            self,
            AttributeMarker::PathParam
                | AttributeMarker::QueryParam
                | AttributeMarker::QueryContent
                | AttributeMarker::BodyContent
        )
    }
}

/// Map an attribute (or trait) name onto the vocabulary.
pub fn classify(name: &str) -> Option<AttributeMarker> {
    let marker = match name {
        CONTROLLER => AttributeMarker::Controller,
        GET => AttributeMarker::Handler(Some(HttpMethod::Get)),
        POST => AttributeMarker::Handler(Some(HttpMethod::Post)),
        PUT => AttributeMarker::Handler(Some(HttpMethod::Put)),
        PATCH => AttributeMarker::Handler(Some(HttpMethod::Patch)),
        DELETE => AttributeMarker::Handler(Some(HttpMethod::Delete)),
        HANDLER => AttributeMarker::Handler(None),
        PATH_PARAM => AttributeMarker::PathParam,
        QUERY_PARAM => AttributeMarker::QueryParam,
        QUERY_CONTENT => AttributeMarker::QueryContent,
        BODY_CONTENT => AttributeMarker::BodyContent,
        DISCOVERABLE => AttributeMarker::Discoverable,
        _ => return None,
    };
    Some(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_handler_markers() {
        assert_eq!(classify("get"), Some(AttributeMarker::Handler(Some(HttpMethod::Get))));
        assert_eq!(classify("delete"), Some(AttributeMarker::Handler(Some(HttpMethod::Delete))));
        assert_eq!(classify("handler"), Some(AttributeMarker::Handler(None)));
    }

    #[test]
    fn classifies_param_markers() {
        assert!(classify("path_param").unwrap().is_param_binding());
        assert!(classify("body_content").unwrap().is_param_binding());
        assert!(!classify("controller").unwrap().is_param_binding());
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        assert_eq!(classify("Get"), None);
        assert_eq!(classify("GET"), None);
        assert_eq!(classify("controllerDiscoverable"), None);
        assert_eq!(classify("ControllerDiscoverable"), Some(AttributeMarker::Discoverable));
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        assert_eq!(classify("derive"), None);
        assert_eq!(classify("inline"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn every_listed_marker_is_recognised() {
        for name in HANDLER_MARKERS {
            assert!(classify(name).unwrap().is_handler(), "{name}");
        }
        for name in PARAM_MARKERS {
            assert!(classify(name).unwrap().is_param_binding(), "{name}");
        }
    }
}
