use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle one fetched discovery page in place.
///
/// The permutation is page-local: only the `limit`-sized page that was
/// fetched is randomized, not the whole candidate pool. Candidates deep in
/// the paging order therefore never surface early; product has flagged this
/// as a fairness trade-off and chosen to keep it.
pub fn shuffle_page<T>(page: &mut [T]) {
    shuffle_page_with(page, &mut rand::thread_rng());
}

/// Same as [`shuffle_page`], with a caller-supplied RNG.
pub fn shuffle_page_with<T, R: Rng + ?Sized>(page: &mut [T], rng: &mut R) {
    page.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut page: Vec<u32> = (0..50).collect();
        shuffle_page(&mut page);

        assert_eq!(page.len(), 50);

        let mut sorted = page.clone();
        sorted.sort_unstable();
        let expected: Vec<u32> = (0..50).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_shuffle_permutes_with_seeded_rng() {
        let original: Vec<u32> = (0..50).collect();
        let mut page = original.clone();

        let mut rng = StdRng::seed_from_u64(7);
        shuffle_page_with(&mut page, &mut rng);

        // A 50-element Fisher-Yates pass with this seed moves something.
        assert_ne!(page, original);
    }

    #[test]
    fn test_shuffle_handles_small_pages() {
        let mut empty: Vec<u32> = vec![];
        shuffle_page(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle_page(&mut single);
        assert_eq!(single, vec![42]);
    }
}
