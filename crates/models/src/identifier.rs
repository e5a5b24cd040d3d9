use crate::role::Role;
use rand::Rng;
use std::ops::RangeInclusive;

/// Range the random identifier suffix is drawn from
const SUFFIX_RANGE: RangeInclusive<u16> = 1000..=9999;

/// Generates a profile identifier such as `STU421234` or `FAC79876`.
///
/// The identifier is the role prefix, the owning user's id and four random
/// digits. Uniqueness is not guaranteed; callers retry on collision.
pub fn profile_identifier<R: Rng + ?Sized>(role: Role, user_id: i32, rng: &mut R) -> String {
    let suffix = rng.gen_range(SUFFIX_RANGE);
    format!("{}{user_id}{suffix}", role.identifier_prefix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn assert_identifier(id: &str, prefix: &str, user_id: i32) {
        let rest = id
            .strip_prefix(&format!("{prefix}{user_id}"))
            .unwrap_or_else(|| panic!("'{id}' does not start with {prefix}{user_id}"));
        assert_eq!(rest.len(), 4, "suffix of '{id}' is not four digits");
        let suffix: u16 = rest.parse().unwrap();
        assert!(SUFFIX_RANGE.contains(&suffix));
    }

    #[test]
    fn test_faculty_identifier() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = profile_identifier(Role::Faculty, 12, &mut rng);
            assert_identifier(&id, "FAC", 12);
        }
    }

    #[test]
    fn test_student_identifier() {
        let mut rng = StdRng::seed_from_u64(42);
        let id = profile_identifier(Role::Student, 3, &mut rng);
        assert_identifier(&id, "STU", 3);
    }
}
