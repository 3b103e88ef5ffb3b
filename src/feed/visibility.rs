/// Minimum visible fraction for an entry to count as viewable.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// One entry of a visibility-change event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewToken {
    pub index: usize,
    /// Fraction of the entry's area on screen, 0.0..=1.0.
    pub visible_fraction: f32,
}

impl ViewToken {
    pub fn new(index: usize, visible_fraction: f32) -> Self {
        Self {
            index,
            visible_fraction,
        }
    }

    pub fn is_viewable(&self) -> bool {
        self.visible_fraction >= VISIBILITY_THRESHOLD
    }
}

/// Lowest index among viewable tokens, if any.
pub fn first_viewable(tokens: &[ViewToken]) -> Option<usize> {
    tokens
        .iter()
        .filter(|t| t.is_viewable())
        .map(|t| t.index)
        .min()
}

/// Tokens produced by a paged scroll that settles on `index`.
///
/// The terminal feed shows one entry per page, so the target is fully
/// visible and the page it left is reported as gone.
pub fn page_tokens(from: usize, to: usize) -> Vec<ViewToken> {
    if from == to {
        return vec![ViewToken::new(to, 1.0)];
    }
    vec![ViewToken::new(to, 1.0), ViewToken::new(from, 0.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(ViewToken::new(0, 0.5).is_viewable());
        assert!(!ViewToken::new(0, 0.49).is_viewable());
    }

    #[test]
    fn test_first_viewable_picks_lowest_index() {
        let tokens = [
            ViewToken::new(4, 0.9),
            ViewToken::new(2, 0.6),
            ViewToken::new(1, 0.2),
        ];
        assert_eq!(first_viewable(&tokens), Some(2));
    }

    #[test]
    fn test_first_viewable_none_when_below_threshold() {
        let tokens = [ViewToken::new(0, 0.1), ViewToken::new(1, 0.3)];
        assert_eq!(first_viewable(&tokens), None);
        assert_eq!(first_viewable(&[]), None);
    }

    #[test]
    fn test_page_tokens() {
        assert_eq!(first_viewable(&page_tokens(3, 4)), Some(4));
        assert_eq!(first_viewable(&page_tokens(2, 2)), Some(2));
    }
}
