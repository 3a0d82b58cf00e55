use rand::Rng;

/// Prefix of client-generated identifiers.
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// Number of random characters after the prefix.
pub const TEMP_ID_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a temporary identifier that `taken` does not report as used.
///
/// Candidates are drawn until one is free.
pub fn temporary_id<R: Rng + ?Sized>(rng: &mut R, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let mut id = String::with_capacity(TEMP_ID_PREFIX.len() + TEMP_ID_LEN);
        id.push_str(TEMP_ID_PREFIX);
        for _ in 0..TEMP_ID_LEN {
            id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
        }
        if !taken(&id) {
            return id;
        }
    }
}

/// Whether an identifier was generated locally and not yet replaced by a
/// full sync.
pub fn is_temporary_id(id: &str) -> bool {
    id.strip_prefix(TEMP_ID_PREFIX)
        .is_some_and(|rest| rest.len() == TEMP_ID_LEN && rest.bytes().all(|b| BASE36.contains(&b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::collections::HashSet;

    #[test]
    fn test_temporary_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = temporary_id(&mut rng, |_| false);

        assert!(id.starts_with("tmp-"));
        assert_eq!(id.len(), 13);
        assert!(is_temporary_id(&id));
    }

    #[test]
    fn test_temporary_id_skips_taken_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        let attempts = Cell::new(0);
        let id = temporary_id(&mut rng, |_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 3
        });

        assert_eq!(attempts.get(), 3);
        assert!(is_temporary_id(&id));
    }

    #[test]
    fn test_temporary_id_avoids_existing() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut existing = HashSet::new();
        for _ in 0..200 {
            let id = temporary_id(&mut rng, |candidate| existing.contains(candidate));
            assert!(existing.insert(id));
        }
    }

    #[test]
    fn test_is_temporary_id() {
        assert!(is_temporary_id("tmp-abc123xyz"));
        assert!(!is_temporary_id("tmp-short"));
        assert!(!is_temporary_id("tmp-ABC123XYZ"));
        assert!(!is_temporary_id("e1"));
        assert!(!is_temporary_id("3f1c2a8e-0000-4000-8000-000000000000"));
    }
}
