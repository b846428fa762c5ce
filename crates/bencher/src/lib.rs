use http::{HeaderMap, HeaderName, HeaderValue};

/// A named header fixture for the commit benches.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    headers: HeaderSet,
}

impl TestCase {
    pub fn new(name: &'static str, headers: HeaderSet) -> Self {
        Self { name, headers }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }
}

/// A static list of header pairs, materialized on demand.
#[derive(Debug, Copy, Clone)]
pub struct HeaderSet {
    pairs: &'static [(&'static str, &'static str)],
}

impl HeaderSet {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Builds a header map, names must be lowercase.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.pairs.len());
        for &(name, value) in self.pairs {
            map.append(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        map
    }
}
