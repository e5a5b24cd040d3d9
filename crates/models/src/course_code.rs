use sha2::{Digest, Sha256};

pub const COURSE_CODE_PREFIX: &str = "COURSE-";

/// Number of hex characters of the digest kept in a code
const DIGEST_CHARS: usize = 8;

/// Hash input standing in for a course stored without a description
const MISSING_DESCRIPTION: &str = "None";

/// Derives a course code from the course name and description.
///
/// The code is `COURSE-` followed by the first eight uppercase hex characters
/// of SHA-256 over `"{name}-{description}"`, where a missing description
/// hashes as `None` and an empty one as the empty string. It is computed once,
/// when the course is first stored, and never recomputed afterwards.
pub fn course_code(name: &str, description: Option<&str>) -> String {
    let description = description.unwrap_or(MISSING_DESCRIPTION);
    let digest = Sha256::digest(format!("{name}-{description}").as_bytes());
    let hex = hex::encode_upper(digest);

    format!("{COURSE_CODE_PREFIX}{}", &hex[..DIGEST_CHARS])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(course_code("Intro to AI", Some("Basics")), "COURSE-57E9D6E4");
        assert_eq!(
            course_code("Rust 101", Some("Ownership and borrowing")),
            "COURSE-3248CA19"
        );
    }

    #[test]
    fn test_missing_and_empty_descriptions_differ() {
        assert_eq!(course_code("Intro to AI", None), "COURSE-55C77DAE");
        assert_eq!(course_code("Intro to AI", Some("")), "COURSE-CA999B2B");
    }

    #[test]
    fn test_code_shape() {
        let code = course_code("Distributed Systems", Some("Consensus and replication"));
        let suffix = code.strip_prefix(COURSE_CODE_PREFIX).unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_code_is_deterministic() {
        assert_eq!(
            course_code("Intro to AI", Some("Basics")),
            course_code("Intro to AI", Some("Basics"))
        );
        assert_ne!(
            course_code("Intro to AI", Some("Basics")),
            course_code("Intro to AI", Some("Advanced"))
        );
    }
}
