/// Intercept messages using the `log` crate and print them to STDERR. The default level is
/// `info`; override with `RUST_LOG`.
///
/// Calling this twice is harmless; the second attempt is ignored.
pub fn setup() {
    use env_logger::{Builder, Env};
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
