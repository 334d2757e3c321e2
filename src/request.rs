// Request descriptor and option-setters

use crate::schema::Schema;
use crate::types::{ApiError, ApiResult};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// HTTP verbs supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Sort direction for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Pagination and ordering options for list requests.
///
/// Every supported option is enumerated here; there is no open key/value bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub order_by: Option<String>,
    pub order: Option<Order>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.order_by = Some(field.into());
        self.order = Some(order);
        self
    }
}

/// A structured server-side filter predicate.
///
/// Serialized into the dedicated `X-Filter` header, not the query string.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value.
    Eq(String, Value),
    /// Field contains the given substring.
    Contains(String, String),
    /// All sub-filters must match.
    And(Vec<Filter>),
    /// At least one sub-filter must match.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains(field.into(), value.into())
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or(filters)
    }

    /// Render the filter as a JSON object in the API's filter grammar.
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Eq(field, value) => {
                let mut object = Map::new();
                object.insert(field.clone(), value.clone());
                Value::Object(object)
            }
            Filter::Contains(field, value) => {
                let mut object = Map::new();
                object.insert(field.clone(), json!({ "+contains": value.clone() }));
                Value::Object(object)
            }
            Filter::And(filters) => {
                json!({ "+and": filters.iter().map(Filter::to_value).collect::<Vec<_>>() })
            }
            Filter::Or(filters) => {
                json!({ "+or": filters.iter().map(Filter::to_value).collect::<Vec<_>>() })
            }
        }
    }
}

/// An immutable description of an outgoing API request.
///
/// Built incrementally by the option-setters below; each setter consumes the
/// descriptor and returns an updated copy, so composed builders never observe
/// another call's state. Nothing touches the network until the descriptor is
/// handed to the transport.
// Fields are public for inspection by mock transports in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub filter: Option<Filter>,
    pub order_by: Option<String>,
    pub order: Option<Order>,
    pub body: Option<Value>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            path: String::new(),
            query: Vec::new(),
            filter: None,
            order_by: None,
            order: None,
            body: None,
        }
    }

    /// Set the target resource path, relative to the API base URL.
    pub fn url(mut self, path: impl Into<String>) -> ApiResult<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(ApiError::validation("request path cannot be empty"));
        }
        if !path.starts_with('/') {
            return Err(ApiError::validation(format!(
                "request path must start with '/', got {:?}",
                path
            )));
        }
        self.path = path;
        Ok(self)
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Apply pagination and ordering options.
    ///
    /// Page and page size travel as query parameters; the order pair is merged
    /// into the `X-Filter` header alongside any filter expression.
    pub fn params(mut self, params: &ListParams) -> Self {
        if let Some(page) = params.page {
            self.query.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = params.page_size {
            self.query
                .push(("page_size".to_string(), page_size.to_string()));
        }
        self.order_by = params.order_by.clone();
        self.order = params.order;
        self
    }

    /// Set the filter expression for list endpoints.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set a raw JSON body without validation.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a payload, validate it against a schema, and set it as the
    /// request body.
    ///
    /// Fails with `ApiError::Schema` before any network activity when the
    /// payload does not satisfy the schema.
    pub fn validated_body<T: Serialize>(self, payload: &T, schema: &Schema) -> ApiResult<Self> {
        let value = serde_json::to_value(payload)
            .map_err(|e| ApiError::parse("failed to serialize payload", None, Some(e)))?;
        let value = schema.validate(&value)?;
        Ok(self.body(value))
    }

    /// Render the `X-Filter` header value for this request, merging the order
    /// pair with any filter expression. Returns `None` when neither is set.
    pub fn filter_header(&self) -> Option<String> {
        let mut object = Map::new();
        if let Some(filter) = &self.filter {
            match filter.to_value() {
                Value::Object(map) => object.extend(map),
                other => {
                    object.insert("+and".to_string(), other);
                }
            }
        }
        if let Some(order_by) = &self.order_by {
            object.insert("+order_by".to_string(), Value::String(order_by.clone()));
            let order = self.order.unwrap_or_default();
            object.insert("+order".to_string(), Value::String(order.as_str().to_string()));
        }
        if object.is_empty() {
            None
        } else {
            Some(Value::Object(object).to_string())
        }
    }
}
