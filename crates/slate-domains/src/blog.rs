//! Blog post management.

use serde::{Deserialize, Serialize};

use slate_core::validate::required;
use slate_core::{Fields, Filter, ValidationError};

/// Split a comma-separated tag list, dropping blanks.
///
/// ```
/// use slate_domains::parse_tags;
///
/// assert_eq!(parse_tags(" rust, cli ,, notes"), vec!["rust", "cli", "notes"]);
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub author: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogPost {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: category.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The first `max_chars` characters of the content, with `...` appended
    /// when anything was cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Fields for BlogPost {
    const STORAGE_KEY: &'static str = "blogPosts";

    type Patch = BlogPatch;

    fn apply(&mut self, patch: BlogPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.category = self.category.trim().to_string();
        self.content = self.content.trim().to_string();
        self.tags = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
    }

    fn validate(&self, errors: &mut ValidationError) {
        required(errors, "title", "Title", &self.title);
        required(errors, "author", "Author", &self.author);
        required(errors, "category", "Category", &self.category);
        required(errors, "content", "Content", &self.content);
    }
}

/// Search criteria for the post list.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    /// Matched against title, author, content and every tag.
    pub search: Option<String>,
    pub category: Option<String>,
}

impl BlogFilter {
    pub fn into_filter(self) -> Filter<BlogPost> {
        Filter::all()
            .text(self.search.as_deref().unwrap_or_default(), |post: &BlogPost| {
                let mut fields = vec![
                    post.title.as_str(),
                    post.author.as_str(),
                    post.content.as_str(),
                ];
                fields.extend(post.tags.iter().map(String::as_str));
                fields
            })
            .eq_opt(self.category, |post: &BlogPost| &post.category)
    }
}
