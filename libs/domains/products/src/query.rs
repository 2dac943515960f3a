//! Translation of listing query strings into MongoDB filters.
//!
//! ```text
//! ?keyword=villa&price[gte]=1000&price[lt]=5000&category=house&page=2
//!
//! search  { name: { $regex: "villa", $options: "i" } }
//! filter  { price: { $gte: 1000, $lt: 5000 }, category: "house" }
//! window  skip 12, limit 12
//! ```
//!
//! Stages are independent; callers that report a filtered total take a clone
//! of [`QueryBuilder::query`] before calling [`QueryBuilder::paginate`].

use mongodb::bson::{doc, Bson, Document};

/// Page size of `GET /products`
pub const RESULT_PER_PAGE: u64 = 12;

const RESERVED_KEYS: [&str; 3] = ["keyword", "page", "limit"];

/// Fields whose query values are compared as numbers
const NUMERIC_FIELDS: [&str; 6] = [
    "price",
    "cuttedPrice",
    "stock",
    "warranty",
    "ratings",
    "numOfReviews",
];

/// A filter plus an optional result window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Keyword restriction on `name`
    pub search: Document,
    /// Equality and range conditions
    pub filter: Document,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    /// Search and filter joined conjunctively
    pub fn filter_document(&self) -> Document {
        match (self.search.is_empty(), self.filter.is_empty()) {
            (true, true) => Document::new(),
            (false, true) => self.search.clone(),
            (true, false) => self.filter.clone(),
            (false, false) => doc! { "$and": [self.search.clone(), self.filter.clone()] },
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.limit.is_some()
    }
}

/// Chainable builder over raw query string pairs.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
    query: ProductQuery,
}

impl QueryBuilder {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self {
            params,
            query: ProductQuery::default(),
        }
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Case-insensitive substring match of `keyword` against the name.
    ///
    /// The keyword is matched literally.
    pub fn search(mut self) -> Self {
        if let Some(keyword) = self.param("keyword").filter(|k| !k.is_empty()) {
            self.query.search = doc! {
                "name": { "$regex": regex::escape(keyword), "$options": "i" }
            };
        }
        self
    }

    /// Every non-reserved parameter becomes a condition.
    ///
    /// `field[gt|gte|lt|lte]` turns into the matching comparison operator;
    /// any other bracketed key is kept verbatim as an embedded-document match.
    /// Keys that would reach the server as operators (`$where`, `price[$ne]`)
    /// are dropped.
    pub fn filter(mut self) -> Self {
        let mut filter = Document::new();

        for (key, value) in &self.params {
            if RESERVED_KEYS.contains(&key.as_str()) || key.starts_with('$') {
                continue;
            }

            match split_range_key(key) {
                Some((_, op)) if op.starts_with('$') => continue,
                Some((field, op)) => {
                    let op = comparison_operator(op).unwrap_or(op).to_string();
                    let value = coerce(field, value);
                    match filter.get_mut(field) {
                        Some(Bson::Document(range)) => {
                            range.insert(op, value);
                        }
                        _ => {
                            let mut range = Document::new();
                            range.insert(op, value);
                            filter.insert(field, range);
                        }
                    }
                }
                None => {
                    filter.insert(key.as_str(), coerce(key, value));
                }
            }
        }

        self.query.filter = filter;
        self
    }

    /// Limits the result to page `page` (default 1) of `result_per_page` items.
    pub fn paginate(mut self, result_per_page: u64) -> Self {
        let page = self
            .param("page")
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        // The driver sends skip as an i64.
        let skip = result_per_page.saturating_mul(page - 1).min(i64::MAX as u64);
        self.query.skip = Some(skip);
        self.query.limit = Some(i64::try_from(result_per_page).unwrap_or(i64::MAX));
        self
    }

    pub fn query(&self) -> &ProductQuery {
        &self.query
    }

    pub fn build(self) -> ProductQuery {
        self.query
    }
}

/// `price[gte]` → `("price", "gte")`
fn split_range_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let (field, op) = inner.split_once('[')?;
    if field.is_empty() || op.is_empty() {
        return None;
    }
    Some((field, op))
}

fn comparison_operator(op: &str) -> Option<&'static str> {
    match op {
        "gt" => Some("$gt"),
        "gte" => Some("$gte"),
        "lt" => Some("$lt"),
        "lte" => Some("$lte"),
        _ => None,
    }
}

fn coerce(field: &str, value: &str) -> Bson {
    if NUMERIC_FIELDS.contains(&field) {
        let trimmed = value.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Bson::Int64(n);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Bson::Double(n);
            }
        }
    }
    Bson::String(value.to_string())
}
