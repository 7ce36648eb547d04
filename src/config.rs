use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Dentara";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the triage API. Override with `DENTARA_PORT`.
pub const DEFAULT_PORT: u16 = 8440;

/// Get the application data directory
/// ~/Dentara/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Dentara")
}

/// Path of the optional user-supplied catalog override.
/// When absent, the builtin dental catalog is used.
pub fn catalog_path() -> PathBuf {
    app_data_dir().join("catalog.json")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=warn", env!("CARGO_PKG_NAME"))
}

/// Bind address for the API server. Loopback only; this is a local tool,
/// not a network service.
pub fn bind_addr() -> SocketAddr {
    let port = std::env::var("DENTARA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Dentara"));
    }

    #[test]
    fn catalog_path_under_app_data() {
        let path = catalog_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("catalog.json"));
    }

    #[test]
    fn app_name_is_dentara() {
        assert_eq!(APP_NAME, "Dentara");
    }

    #[test]
    fn bind_addr_is_loopback() {
        assert!(bind_addr().ip().is_loopback());
    }
}
