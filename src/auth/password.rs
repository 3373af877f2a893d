use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;

// Key-derivation parameters. These match the credentials already in the
// database, so changing them invalidates every stored password.
const SALT_LEN: usize = 32;
const HASH_LEN: usize = 64;
const ROUNDS: u32 = 100;

/// A stored password credential: the random salt and the key derived from it,
/// both hex-encoded. The plaintext is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub salt: String,
    pub hash: String,
}

/// Derives a fresh credential for `password`.
///
/// A new random salt is drawn on every call, so hashing the same password
/// twice yields two different credentials.
pub fn hash_password(password: &str) -> Credential {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), &salt, ROUNDS, &mut hash);

    Credential {
        salt: hex::encode(salt),
        hash: hex::encode(hash),
    }
}

/// Checks `password` against a stored credential by re-deriving the hash with
/// the stored salt. A credential that fails to decode never matches.
pub fn verify_password(password: &str, credential: &Credential) -> bool {
    let Ok(salt) = hex::decode(&credential.salt) else {
        return false;
    };
    let Ok(stored) = hex::decode(&credential.hash) else {
        return false;
    };

    let mut derived = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), &salt, ROUNDS, &mut derived);

    constant_time_eq(&derived, &stored)
}

/// Compares two byte slices without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
