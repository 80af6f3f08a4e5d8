//! Test-only helpers: scoped environment variables and a port nothing listens on.

/// RAII guard for temporarily setting an environment variable.
///
/// The previous value (or its absence) is restored on drop. Use together with
/// `#[serial(env)]`, since the process environment is shared by all tests.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `val` until the guard is dropped.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Unsets `key` until the guard is dropped.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            // SAFETY: see `EnvGuard::set`.
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            // SAFETY: see `EnvGuard::remove`.
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// Returns a loopback port that was free a moment ago, so connecting to it is
/// refused.
///
/// # Panics
///
/// Panics if no ephemeral port can be bound.
#[must_use]
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// Builds a reqwest client that ignores proxy environment variables, so
/// loopback failures surface as-is.
///
/// # Panics
///
/// Panics if the reqwest client cannot be built.
#[must_use]
pub fn direct_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("reqwest client")
}
