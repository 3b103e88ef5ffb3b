//! Keyword search across several external sources.
//!
//! ```text
//! query → SearchSession (debounce, generation) → SearchAggregator (fan-out) → sources
//! ```

pub mod aggregator;
pub mod config;
pub mod session;
pub mod sources;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::SearchResult;

pub use aggregator::SearchAggregator;
pub use config::SearchConfig;
pub use session::{SearchSession, SearchState, DEFAULT_DEBOUNCE};

/// One external search provider.
///
/// Implementations may fail; the aggregator turns failures into empty
/// result lists.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Strip markup from a provider snippet and decode entities.
pub fn clean_snippet(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        text.push(' ');
                        last_was_space = true;
                    }
                } else {
                    text.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    html_escape::decode_html_entities(text.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_snippet_strips_searchmatch_spans() {
        let raw = r#"The <span class="searchmatch">cat</span> is a small &quot;domestic&quot; animal"#;
        assert_eq!(clean_snippet(raw), r#"The cat is a small "domestic" animal"#);
    }

    #[test]
    fn test_clean_snippet_collapses_whitespace() {
        assert_eq!(clean_snippet("  a \n\n b  "), "a b");
    }
}
