use crate::AppError;

/// Backend query options, passed through as request parameters without
/// interpretation. `sort` entries use the backend's `field,direction` shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub sort: Vec<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub extra: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    pub fn paged(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sort.is_empty() && self.page.is_none() && self.size.is_none() && self.extra.is_empty()
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for sort in &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }

    pub fn to_query_string(&self) -> Result<String, AppError> {
        Ok(serde_urlencoded::to_string(self.to_pairs())?)
    }
}
