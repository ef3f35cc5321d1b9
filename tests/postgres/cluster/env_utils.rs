//! Environment helpers for the embedded test cluster.

use super::BoxError;
use super::worker_helpers::{locate_pg_worker_path, prepare_pg_worker};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, detect_execution_privileges};
use std::env;
use std::ffi::OsString;
use std::net::TcpListener;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment changes until dropped, then restores prior values.
pub(super) struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    pub(super) fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let prior = env::var_os(key);
                set_or_remove(key, value.as_ref());
                (key.clone(), prior)
            })
            .collect();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            set_or_remove(&key, value.as_ref());
        }
    }
}

fn set_or_remove(key: &OsString, value: Option<&OsString>) {
    // SAFETY: ENV_MUTEX serialises environment mutations in the test binary.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}

pub(super) fn env_vars_to_os(
    env_vars: &[(String, Option<String>)],
) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Environment the bootstrap needs: a free `PG_PORT`, and under root the
/// prepared `pg_worker` path.
pub(super) fn worker_env_changes() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    let mut changes = Vec::new();
    if let Some(port) = resolve_pg_port()? {
        changes.push((OsString::from("PG_PORT"), Some(port)));
    }

    if matches!(detect_execution_privileges(), ExecutionPrivileges::Root)
        && env::var_os("PG_EMBEDDED_WORKER").is_none()
    {
        let worker_path = locate_pg_worker_path().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "PG_EMBEDDED_WORKER is not set and pg_worker binary was not found",
            )) as BoxError
        })?;
        let prepared = prepare_pg_worker(&worker_path)?;
        changes.push((
            OsString::from("PG_EMBEDDED_WORKER"),
            Some(OsString::from(prepared.as_str())),
        ));
    }

    Ok(changes)
}

fn resolve_pg_port() -> Result<Option<OsString>, BoxError> {
    if env::var_os("PG_PORT").is_some() {
        return Ok(None);
    }

    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| Box::new(err) as BoxError)?;
    drop(listener);

    Ok(Some(OsString::from(port.to_string())))
}
