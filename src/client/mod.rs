//! Session client for the torrent client's web API (qBittorrent v2).
//!
//! Authentication is cookie-based: a successful `auth/login` sets a session
//! cookie that the underlying cookie store replays on every later call.
//! Every request carries an explicit timeout so an unreachable instance
//! cannot block the run forever.
//!
//! Login failure is an [`SweepError::Auth`]; callers treat it as recoverable
//! and continue with the remaining instances. Post-login request failures
//! are [`SweepError::Fetch`] and are likewise recovered per item.

mod types;

pub use types::{TorrentFileEntry, TorrentInfo};

use crate::error::{Result, SweepError};
use crate::instances::Instance;
use std::time::Duration;

/// An authenticated session against one client instance.
#[derive(Debug)]
pub struct Session {
    base_url: String,
    http: reqwest::blocking::Client,
}

/// Authenticate against an instance and obtain a session.
///
/// The client rejects bad credentials with a `Fails.` body on HTTP 200, so
/// both the status and the body are checked.
pub fn login(instance: &Instance, timeout: Duration) -> Result<Session> {
    let http = reqwest::blocking::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .map_err(|e| SweepError::Auth {
            instance: instance.label().to_string(),
            reason: format!("failed to build HTTP client: {}", e),
        })?;

    let url = format!("{}/api/v2/auth/login", instance.url);
    let response = http
        .post(&url)
        .form(&[
            ("username", instance.username.as_str()),
            ("password", instance.password.as_str()),
        ])
        .send()
        .map_err(|e| SweepError::Auth {
            instance: instance.label().to_string(),
            reason: format!("login request failed: {}", e),
        })?;

    if !response.status().is_success() {
        return Err(SweepError::Auth {
            instance: instance.label().to_string(),
            reason: format!("login returned HTTP {}", response.status()),
        });
    }

    let body = response.text().map_err(|e| SweepError::Auth {
        instance: instance.label().to_string(),
        reason: format!("failed to read login response: {}", e),
    })?;

    if body.trim() != "Ok." {
        return Err(SweepError::Auth {
            instance: instance.label().to_string(),
            reason: "credentials rejected".to_string(),
        });
    }

    Ok(Session {
        base_url: instance.url.clone(),
        http,
    })
}

impl Session {
    /// Base URL of the instance this session is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full torrent list.
    pub fn torrents(&self) -> Result<Vec<TorrentInfo>> {
        let url = format!("{}/api/v2/torrents/info", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SweepError::Fetch(format!("torrent list from {}: {}", self.base_url, e)))?;

        response
            .json()
            .map_err(|e| SweepError::Fetch(format!("torrent list from {}: {}", self.base_url, e)))
    }

    /// Fetch the member file list for one torrent.
    pub fn torrent_files(&self, hash: &str) -> Result<Vec<TorrentFileEntry>> {
        let url = format!("{}/api/v2/torrents/files", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("hash", hash)])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SweepError::Fetch(format!("file list for {}: {}", hash, e)))?;

        response
            .json()
            .map_err(|e| SweepError::Fetch(format!("file list for {}: {}", hash, e)))
    }

    /// Set the listen port and disable random-port selection.
    pub fn set_listen_port(&self, port: u16) -> Result<()> {
        let url = format!("{}/api/v2/app/setPreferences", self.base_url);
        let prefs = serde_json::json!({
            "listen_port": port,
            "random_port": false,
        });

        self.http
            .post(&url)
            .form(&[("json", prefs.to_string())])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                SweepError::Fetch(format!("set preferences on {}: {}", self.base_url, e))
            })?;

        Ok(())
    }

    /// Fetch the application version, as a cheap connectivity check.
    pub fn version(&self) -> Result<String> {
        let url = format!("{}/api/v2/app/version", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SweepError::Fetch(format!("version from {}: {}", self.base_url, e)))?;

        response
            .text()
            .map_err(|e| SweepError::Fetch(format!("version from {}: {}", self.base_url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubRoute, StubServer};
    use std::collections::HashMap;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn instance_for(server: &StubServer) -> Instance {
        Instance {
            url: server.url(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn login_success_yields_session() {
        let server = StubServer::start(HashMap::from([(
            "/api/v2/auth/login",
            StubRoute::login_ok(),
        )]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        assert_eq!(session.base_url(), server.url());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert!(requests[0].body.contains("username=admin"));
        assert!(requests[0].body.contains("password=secret"));
    }

    #[test]
    fn login_rejection_is_auth_error() {
        let server = StubServer::start(HashMap::from([(
            "/api/v2/auth/login",
            StubRoute::login_fails(),
        )]));

        let err = login(&instance_for(&server), TIMEOUT).unwrap_err();
        assert!(matches!(err, SweepError::Auth { .. }));
        assert!(err.to_string().contains("credentials rejected"));
    }

    #[test]
    fn unreachable_instance_is_auth_error() {
        // Reserved port with nothing listening.
        let instance = Instance {
            url: "http://127.0.0.1:1".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        };

        let err = login(&instance, TIMEOUT).unwrap_err();
        assert!(matches!(err, SweepError::Auth { .. }));
    }

    #[test]
    fn torrents_parses_item_list() {
        let server = StubServer::start(HashMap::from([
            ("/api/v2/auth/login", StubRoute::login_ok()),
            (
                "/api/v2/torrents/info",
                StubRoute::json(
                    r#"[{"hash":"aaa","name":"One","save_path":"/data/movies/","content_path":"/data/movies/One.mkv"},
                        {"hash":"bbb","name":"Two","save_path":"/data/tv","content_path":"/data/tv/Two"}]"#,
                ),
            ),
        ]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        let torrents = session.torrents().unwrap();
        assert_eq!(torrents.len(), 2);
        assert_eq!(torrents[0].hash, "aaa");
        assert_eq!(torrents[1].save_path, "/data/tv");
    }

    #[test]
    fn torrent_files_sends_hash_query() {
        let server = StubServer::start(HashMap::from([
            ("/api/v2/auth/login", StubRoute::login_ok()),
            (
                "/api/v2/torrents/files",
                StubRoute::json(r#"[{"name":"s01/e01.mkv"},{"name":"s01/e02.mkv"}]"#),
            ),
        ]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        let files = session.torrent_files("bbb").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "s01/e01.mkv");

        let requests = server.requests();
        assert!(requests.iter().any(|r| r.query.contains("hash=bbb")));
    }

    #[test]
    fn missing_endpoint_is_fetch_error() {
        let server = StubServer::start(HashMap::from([(
            "/api/v2/auth/login",
            StubRoute::login_ok(),
        )]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        let err = session.torrents().unwrap_err();
        assert!(matches!(err, SweepError::Fetch(_)));
    }

    #[test]
    fn set_listen_port_posts_preferences_json() {
        let server = StubServer::start(HashMap::from([
            ("/api/v2/auth/login", StubRoute::login_ok()),
            ("/api/v2/app/setPreferences", StubRoute::text("")),
        ]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        session.set_listen_port(51413).unwrap();

        let requests = server.requests();
        let prefs = requests
            .iter()
            .find(|r| r.path == "/api/v2/app/setPreferences")
            .unwrap();
        assert_eq!(prefs.method, "POST");
        assert!(prefs.body.contains("listen_port"));
        assert!(prefs.body.contains("51413"));
        assert!(prefs.body.contains("random_port"));
    }

    #[test]
    fn version_returns_text() {
        let server = StubServer::start(HashMap::from([
            ("/api/v2/auth/login", StubRoute::login_ok()),
            ("/api/v2/app/version", StubRoute::text("v5.0.0")),
        ]));

        let session = login(&instance_for(&server), TIMEOUT).unwrap();
        assert_eq!(session.version().unwrap(), "v5.0.0");
    }
}
