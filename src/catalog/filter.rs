use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::Product;

/// Result cap. The summary describes this page, not the full match count.
pub const MAX_RESULTS: usize = 12;

pub const CATALOG_MISSING: &str = "products.json not found on server";

/// Raw `/filter` body as sent by the browser (usually forwarded tool-call
/// arguments). Every field is loosely typed here and narrowed by
/// [`FilterCriteria::from`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
    #[serde(default)]
    pub max_price: Option<Value>,
}

/// Normalized criteria. Category and color are lower-cased.
///
/// `max_price` only bounds the results when it is a number, while the summary
/// mentions a ceiling whenever a non-empty, non-zero value was sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub category: String,
    pub color: Option<String>,
    pub max_price: Option<Number>,
    pub price_label: Option<String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(category: &str, color: Option<&str>, max_price: Option<Number>) -> Self {
        let price_label = max_price
            .as_ref()
            .and_then(|n| ceiling_label(&Value::Number(n.clone())));
        Self {
            category: category.to_lowercase(),
            color: color
                .filter(|c| !c.is_empty())
                .map(str::to_lowercase),
            max_price,
            price_label,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if product.category().to_lowercase() != self.category {
            return false;
        }
        if let Some(color) = &self.color {
            if !product.color().to_lowercase().contains(color.as_str()) {
                return false;
            }
        }
        match self.max_price.as_ref().and_then(Number::as_f64) {
            Some(max_price) => product.price() <= max_price,
            None => true,
        }
    }

    /// e.g. `"3 red shoes found under $50"`.
    #[must_use]
    pub fn summary(&self, count: usize) -> String {
        let color = self
            .color
            .as_ref()
            .map(|c| format!("{c} "))
            .unwrap_or_default();
        match &self.price_label {
            Some(ceiling) => format!("{count} {color}{} found under ${ceiling}", self.category),
            None => format!("{count} {color}{} found", self.category),
        }
    }
}

impl From<FilterRequest> for FilterCriteria {
    fn from(request: FilterRequest) -> Self {
        let category = match request.category {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };
        let color = match request.color {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let max_price = match &request.max_price {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };
        Self {
            price_label: request.max_price.as_ref().and_then(ceiling_label),
            ..Self::new(&category, color.as_deref(), max_price)
        }
    }
}

/// Text for the summary's ceiling. Null, `false`, zero and empty values
/// produce none.
fn ceiling_label(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_none_or(|f| f.abs() > 0.0) => Some(n.to_string()),
        Value::Number(_) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterOutcome {
    pub results: Vec<Product>,
    pub summary: String,
}

/// `/filter` response body. A missing catalog is reported in the payload,
/// not through the status code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FilterResponse {
    Results(FilterOutcome),
    Error { error: String },
}

impl FilterResponse {
    #[must_use]
    pub fn catalog_missing() -> Self {
        Self::Error {
            error: CATALOG_MISSING.to_string(),
        }
    }
}

/// Single pass over the catalog in order, capped at [`MAX_RESULTS`].
#[must_use]
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> FilterOutcome {
    let results: Vec<Product> = products
        .iter()
        .filter(|product| criteria.matches(product))
        .take(MAX_RESULTS)
        .cloned()
        .collect();
    let summary = criteria.summary(results.len());
    tracing::debug!(?criteria, returned = results.len(), "catalog filtered");
    FilterOutcome { results, summary }
}
