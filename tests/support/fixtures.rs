//! Test fixtures and constants.

/// A private key with a known public key.
pub const KNOWN_PRIVATE_KEY: &str =
    "419f823553ee434c8a80a809c9874306593734173a01330e00f0c118da2b0f48";

/// Compressed public key for [`KNOWN_PRIVATE_KEY`].
pub const KNOWN_PUBLIC_KEY: &str =
    "03437763be709bbb8b253435c210d4f2d01f966195d9faaad7845edf0fde74040f";

/// An invalid public key for negative tests.
pub const INVALID_PUBLIC_KEY: &str = "not-a-valid-key";

/// Standard plaintext entries used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("API_KEY", "sk-test-12345"),
    ("JWT_SECRET", "super secret jwt token"),
];

/// Sample plaintext .env content.
pub const SAMPLE_ENV: &str = r#"
# This is a comment
SIMPLE=value
QUOTED="quoted value"
SINGLE_QUOTED='single quoted'
export EXPORTED=yes
"#;
