use uuid::{Builder, Uuid};

/// Fresh random identifier in the 8-4-4-4-12 hyphenated form.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds an identifier from 16 bytes of entropy.
///
/// The version nibble is forced to `4` and the variant bits to `10xx`, so the
/// first digit of the fourth group is always one of `8`, `9`, `a`, `b`.
pub fn id_from_entropy(bytes: [u8; 16]) -> String {
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{id_from_entropy, new_id};
    use std::collections::HashSet;

    fn assert_well_formed(id: &str) {
        assert_eq!(id.len(), 36, "unexpected length for {id}");
        let groups: Vec<&str> = id.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(
            groups
                .iter()
                .all(|group| group.chars().all(|ch| ch.is_ascii_hexdigit()
                    && !ch.is_ascii_uppercase()))
        );
        assert!(groups[2].starts_with('4'));
        assert!(matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b')));
    }

    #[test]
    fn new_id_has_uuid_layout() {
        for _ in 0..64 {
            assert_well_formed(&new_id());
        }
    }

    #[test]
    fn entropy_extremes_still_produce_valid_nibbles() {
        let zeros = id_from_entropy([0u8; 16]);
        let ones = id_from_entropy([0xffu8; 16]);

        assert_well_formed(&zeros);
        assert_well_formed(&ones);
        assert_eq!(zeros, "00000000-0000-4000-8000-000000000000");
        assert_eq!(ones, "ffffffff-ffff-4fff-bfff-ffffffffffff");
    }

    #[test]
    fn new_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
