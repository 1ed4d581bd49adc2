use rand::{distributions::Alphanumeric, Rng};

/// Creates a random alphanumeric secret, used for generated admin codes
/// and token signing secrets
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}
