/// Liveness probe. Does not touch the user directory.
pub async fn health() -> &'static str {
    "."
}
