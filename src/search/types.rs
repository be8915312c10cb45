use serde::{Deserialize, Serialize};

/// A discovered source prior to any judgment.
///
/// Identity is the URL; a candidate never outlives the run that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCandidate {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub display_host: String,
}

impl SourceCandidate {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        display_host: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            display_host: display_host.into(),
        }
    }
}

/// Bucket a candidate was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCategory {
    Official,
    News,
    Blog,
    Research,
}

impl SearchCategory {
    /// Fixed concatenation order.
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::Official,
        SearchCategory::News,
        SearchCategory::Blog,
        SearchCategory::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Official => "official",
            SearchCategory::News => "news",
            SearchCategory::Blog => "blog",
            SearchCategory::Research => "research",
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-partitioned adapter output. Unused buckets stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCandidates {
    pub official: Vec<SourceCandidate>,
    pub news: Vec<SourceCandidate>,
    pub blog: Vec<SourceCandidate>,
    pub research: Vec<SourceCandidate>,
}

impl CategorizedCandidates {
    /// Puts every candidate in a single bucket.
    pub fn single(category: SearchCategory, items: Vec<SourceCandidate>) -> Self {
        let mut out = Self::default();
        *out.bucket_mut(category) = items;
        out
    }

    pub fn bucket(&self, category: SearchCategory) -> &[SourceCandidate] {
        match category {
            SearchCategory::Official => &self.official,
            SearchCategory::News => &self.news,
            SearchCategory::Blog => &self.blog,
            SearchCategory::Research => &self.research,
        }
    }

    pub fn bucket_mut(&mut self, category: SearchCategory) -> &mut Vec<SourceCandidate> {
        match category {
            SearchCategory::Official => &mut self.official,
            SearchCategory::News => &mut self.news,
            SearchCategory::Blog => &mut self.blog,
            SearchCategory::Research => &mut self.research,
        }
    }

    pub fn len(&self) -> usize {
        self.official.len() + self.news.len() + self.blog.len() + self.research.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates buckets in [`SearchCategory::ALL`] order. No deduplication.
    pub fn into_ordered(self) -> Vec<SourceCandidate> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.official);
        out.extend(self.news);
        out.extend(self.blog);
        out.extend(self.research);
        out
    }
}
