//! Implementation of the `seedsweep port` command.
//!
//! Pushes a VPN-forwarded listen port into every configured instance's
//! preferences and disables random-port selection. The port comes from the
//! command line or from the forwarded-port file a VPN companion container
//! maintains. Per-instance failures are warned and skipped; the command
//! succeeds if the port was resolved and at least the attempt was made
//! everywhere.

use crate::cli::PortArgs;
use crate::client;
use crate::config::Settings;
use crate::error::{Result, SweepError};
use crate::events::{Action, Event, append_event};
use crate::instances::load_instances;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

/// Execute the `seedsweep port` command.
pub fn cmd_port(settings: &Settings, args: &PortArgs) -> Result<()> {
    let port = resolve_port(args)?;
    let instances = load_instances(&settings.instances_file)?;
    let timeout = Duration::from_secs(settings.http_timeout_secs);
    let log_dir = Path::new(&settings.log_dir);

    let mut updated = 0;
    for instance in &instances {
        let outcome = client::login(instance, timeout).and_then(|s| s.set_listen_port(port));
        match outcome {
            Ok(()) => {
                println!("{}: listen port set to {}", instance.label(), port);
                append_event(
                    log_dir,
                    &Event::new(Action::PortUpdate)
                        .with_instance(instance.label())
                        .with_details(json!({"port": port})),
                )?;
                updated += 1;
            }
            Err(e) => {
                eprintln!("warning: skipping instance {}: {}", instance.label(), e);
            }
        }
    }

    println!();
    println!("Updated {}/{} instance(s)", updated, instances.len());
    Ok(())
}

/// Resolve the port from the argument or the forwarded-port file.
fn resolve_port(args: &PortArgs) -> Result<u16> {
    if let Some(port) = args.port {
        return Ok(port);
    }

    let Some(path) = &args.from_file else {
        return Err(SweepError::Config(
            "no port given: pass a PORT argument or --from-file".to_string(),
        ));
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        SweepError::Config(format!(
            "failed to read forwarded-port file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content.trim().parse().map_err(|_| {
        SweepError::Config(format!(
            "forwarded-port file '{}' does not contain a port: '{}'",
            path.display(),
            content.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PortArgs;
    use crate::test_support::{StubRoute, StubServer};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn port_args(port: Option<u16>, from_file: Option<PathBuf>) -> PortArgs {
        PortArgs { port, from_file }
    }

    #[test]
    fn resolve_prefers_argument() {
        let port = resolve_port(&port_args(Some(51413), None)).unwrap();
        assert_eq!(port, 51413);
    }

    #[test]
    fn resolve_reads_forwarded_port_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("forwarded_port");
        std::fs::write(&file, "40123\n").unwrap();

        let port = resolve_port(&port_args(None, Some(file))).unwrap();
        assert_eq!(port, 40123);
    }

    #[test]
    fn resolve_without_source_is_config_error() {
        let err = resolve_port(&port_args(None, None)).unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn resolve_rejects_garbage_file_content() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("forwarded_port");
        std::fs::write(&file, "not-a-port\n").unwrap();

        let err = resolve_port(&port_args(None, Some(file))).unwrap_err();
        assert!(err.to_string().contains("does not contain a port"));
    }

    #[test]
    fn pushes_port_to_every_instance_and_logs() {
        let temp = TempDir::new().unwrap();
        let server = StubServer::start(HashMap::from([
            ("/api/v2/auth/login", StubRoute::login_ok()),
            ("/api/v2/app/setPreferences", StubRoute::text("")),
        ]));

        let instances_file = temp.path().join("instances.txt");
        std::fs::write(&instances_file, format!("{} admin secret\n", server.url())).unwrap();

        let log_dir = temp.path().join("logs");
        let mut settings = Settings::default();
        settings.instances_file = instances_file.display().to_string();
        settings.log_dir = log_dir.display().to_string();

        cmd_port(&settings, &port_args(Some(40123), None)).unwrap();

        let prefs = server
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/v2/app/setPreferences")
            .unwrap();
        assert!(prefs.body.contains("40123"));

        let log = std::fs::read_to_string(crate::events::log_file_path(&log_dir)).unwrap();
        assert!(log.contains("\"port_update\""));
        assert!(log.contains("40123"));
    }

    #[test]
    fn unreachable_instance_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        let instances_file = temp.path().join("instances.txt");
        std::fs::write(&instances_file, "http://127.0.0.1:1 admin secret\n").unwrap();

        let mut settings = Settings::default();
        settings.instances_file = instances_file.display().to_string();
        settings.log_dir = temp.path().join("logs").display().to_string();

        cmd_port(&settings, &port_args(Some(40123), None)).unwrap();
    }
}
