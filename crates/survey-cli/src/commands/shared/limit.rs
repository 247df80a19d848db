/// Row limit for a listing: the command's own `--limit`, then the global
/// `--limit`, then `fallback`. A limit of `0` lists everything.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> Option<u32> {
    Some(local.or(global).unwrap_or(fallback)).filter(|limit| *limit > 0)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn command_limit_beats_global() {
        assert_eq!(effective_limit(Some(5), Some(10), 20), Some(5));
        assert_eq!(effective_limit(None, Some(10), 20), Some(10));
    }

    #[test]
    fn configured_default_applies_without_flags() {
        assert_eq!(effective_limit(None, None, 20), Some(20));
    }

    #[test]
    fn zero_means_unlimited() {
        assert_eq!(effective_limit(Some(0), Some(10), 20), None);
        assert_eq!(effective_limit(None, None, 0), None);
    }
}
