//! Runs embedded `PostgreSQL` lifecycle steps on behalf of the test harness.
//!
//! Usage:
//!
//! ```text
//! pg_worker <setup|start|stop> <payload-path>
//! ```
//!
//! The payload is a JSON [`WorkerPayload`](pg_embedded_setup_unpriv::worker::WorkerPayload)
//! carrying the cluster settings and environment overrides. When launched as
//! root the worker re-executes itself as `nobody`, because `initdb` and
//! `postgres` refuse to run with superuser credentials.
//!
//! `start` leaves the server running after the worker exits; `stop` shuts it
//! down again.

/// Boxed error type for the entry point.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    worker::run().map_err(Into::into)
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix platforms".into())
}

#[cfg(unix)]
mod worker {
    use std::env;
    use std::ffi::CString;
    use std::fmt;
    use std::io::{self, Read};
    use std::mem::ManuallyDrop;
    use std::process::{Command, ExitStatus};
    use std::str::FromStr;

    use async_trait::async_trait;
    use camino::{Utf8Path, Utf8PathBuf};
    use nix::unistd::{Uid, User, initgroups, setgid, setuid};
    use pg_embedded_setup_unpriv::ambient_dir_and_path;
    use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
    use postgresql_embedded::{PostgreSQL, Status};
    use thiserror::Error;
    use tokio::runtime::Builder;

    use super::BoxError;

    const REEXEC_ENV: &str = "PG_WORKER_REEXEC";
    const TRUSTED_PATH: &str = "/usr/sbin:/usr/bin:/sbin:/bin";
    const SERVICE_USER: &str = "nobody";

    /// Failures reported by the worker.
    #[derive(Debug, Error)]
    pub enum WorkerError {
        #[error("invalid arguments: {0}")]
        InvalidArgs(String),
        #[error("failed to read payload: {0}")]
        PayloadRead(#[source] BoxError),
        #[error("failed to parse payload: {0}")]
        PayloadParse(#[source] serde_json::Error),
        #[error("invalid cluster settings: {0}")]
        Settings(String),
        #[error("runtime init failed: {0}")]
        Runtime(#[source] io::Error),
        #[error("failed to drop privileges: {0}")]
        PrivilegeDrop(String),
        #[error("postgres {operation} failed: {message}")]
        Postgres {
            operation: Operation,
            message: String,
        },
    }

    /// Lifecycle step requested on the command line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Operation {
        Setup,
        Start,
        Stop,
    }

    impl Operation {
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Setup => "setup",
                Self::Start => "start",
                Self::Stop => "stop",
            }
        }
    }

    impl FromStr for Operation {
        type Err = WorkerError;

        fn from_str(value: &str) -> Result<Self, Self::Err> {
            match value {
                "setup" => Ok(Self::Setup),
                "start" => Ok(Self::Start),
                "stop" => Ok(Self::Stop),
                other => Err(WorkerError::InvalidArgs(format!(
                    "unknown operation '{other}'; expected setup, start, or stop"
                ))),
            }
        }
    }

    impl fmt::Display for Operation {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str(self.as_str())
        }
    }

    /// Server calls the worker drives, separated so fakes can stand in.
    #[async_trait(?Send)]
    pub trait PostgresLifecycle {
        async fn setup(&mut self) -> Result<(), BoxError>;
        async fn start(&mut self) -> Result<(), BoxError>;
        async fn stop(&mut self) -> Result<(), BoxError>;
        fn status(&self) -> Status;
    }

    #[async_trait(?Send)]
    impl PostgresLifecycle for PostgreSQL {
        async fn setup(&mut self) -> Result<(), BoxError> {
            Self::setup(self).await.map_err(Into::into)
        }

        async fn start(&mut self) -> Result<(), BoxError> {
            Self::start(self).await.map_err(Into::into)
        }

        async fn stop(&mut self) -> Result<(), BoxError> {
            Self::stop(self).await.map_err(Into::into)
        }

        fn status(&self) -> Status {
            Self::status(self)
        }
    }

    /// Process environment writes, separated so tests can record them.
    pub trait EnvStore {
        fn set_var(&self, key: &str, value: &str);
        fn remove_var(&self, key: &str);
    }

    struct ProcessEnv;

    impl EnvStore for ProcessEnv {
        fn set_var(&self, key: &str, value: &str) {
            // SAFETY: the worker is single-threaded while it applies its payload.
            unsafe { env::set_var(key, value) }
        }

        fn remove_var(&self, key: &str) {
            // SAFETY: the worker is single-threaded while it applies its payload.
            unsafe { env::remove_var(key) }
        }
    }

    pub fn run() -> Result<(), WorkerError> {
        let args = collect_args()?;
        if needs_reexec() {
            let status = reexec_as_service_user(&args)?;
            std::process::exit(status.code().unwrap_or(1));
        }

        let (operation, payload_path) = parse_args(&args)?;
        let payload = load_payload(&payload_path)?;
        drop_privileges(SERVICE_USER)?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| WorkerError::Settings(err.to_string()))?;
        apply_environment(&ProcessEnv, &payload.environment);

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkerError::Runtime)?;
        let mut postgres = PostgreSQL::new(settings);
        runtime.block_on(execute(operation, &mut postgres))?;

        if operation == Operation::Start {
            // Dropping the handle would stop the server we just started.
            let _running = ManuallyDrop::new(postgres);
        }
        Ok(())
    }

    fn collect_args() -> Result<Vec<String>, WorkerError> {
        env::args_os()
            .map(|arg| {
                arg.into_string()
                    .map_err(|_| WorkerError::InvalidArgs("argument is not valid UTF-8".into()))
            })
            .collect()
    }

    /// Splits `program operation payload-path` into its parts.
    pub fn parse_args(args: &[String]) -> Result<(Operation, Utf8PathBuf), WorkerError> {
        match args {
            [_, operation, path] => Ok((operation.parse()?, Utf8PathBuf::from(path))),
            [] | [_] => Err(WorkerError::InvalidArgs("missing operation argument".into())),
            [_, _] => Err(WorkerError::InvalidArgs(
                "missing payload path argument".into(),
            )),
            [_, _, _, extra, ..] => Err(WorkerError::InvalidArgs(format!(
                "unexpected extra argument: {extra}"
            ))),
        }
    }

    fn load_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
        let bytes = read_payload(path).map_err(WorkerError::PayloadRead)?;
        serde_json::from_slice(&bytes).map_err(WorkerError::PayloadParse)
    }

    fn read_payload(path: &Utf8Path) -> Result<Vec<u8>, BoxError> {
        let (dir, relative) = ambient_dir_and_path(path)?;
        let mut file = dir.open(relative.as_std_path())?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn needs_reexec() -> bool {
        Uid::effective().is_root() && env::var_os(REEXEC_ENV).is_none()
    }

    fn reexec_as_service_user(args: &[String]) -> Result<ExitStatus, WorkerError> {
        let current = env::current_exe().map_err(WorkerError::Runtime)?;
        let exe = Utf8PathBuf::try_from(current).map_err(|_| {
            WorkerError::Runtime(io::Error::other("executable path is not valid UTF-8"))
        })?;
        let forwarded = args.get(1..).unwrap_or_default();

        match Command::new("runuser")
            .args(["-u", SERVICE_USER, "--"])
            .arg(exe.as_std_path())
            .args(forwarded)
            .env(REEXEC_ENV, "1")
            .env("PATH", TRUSTED_PATH)
            .status()
        {
            Ok(status) => Ok(status),
            Err(err) if err.kind() == io::ErrorKind::NotFound => run_via_su(&exe, forwarded),
            Err(err) => Err(WorkerError::PrivilegeDrop(err.to_string())),
        }
    }

    fn run_via_su(exe: &Utf8Path, forwarded: &[String]) -> Result<ExitStatus, WorkerError> {
        Command::new("/bin/su")
            .args(["-s", "/bin/sh", SERVICE_USER, "-c"])
            .arg(su_command(exe.as_str(), forwarded))
            .env("PATH", TRUSTED_PATH)
            .status()
            .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))
    }

    /// Builds the shell line `su -c` runs to re-enter the worker.
    #[must_use]
    pub fn su_command(exe: &str, forwarded: &[String]) -> String {
        let mut command = format!("{REEXEC_ENV}=1 exec {}", shell_escape(exe));
        for arg in forwarded {
            command.push(' ');
            command.push_str(&shell_escape(arg));
        }
        command
    }

    /// Single-quotes `value` for `/bin/sh`.
    #[must_use]
    pub fn shell_escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('\'');
        for ch in value.chars() {
            if ch == '\'' {
                escaped.push_str("'\\''");
            } else {
                escaped.push(ch);
            }
        }
        escaped.push('\'');
        escaped
    }

    fn drop_privileges(username: &str) -> Result<(), WorkerError> {
        if !Uid::effective().is_root() {
            return Ok(());
        }

        let user = User::from_name(username)
            .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?
            .ok_or_else(|| WorkerError::PrivilegeDrop(format!("user '{username}' not found")))?;
        let name = CString::new(user.name.clone())
            .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
        initgroups(&name, user.gid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
        setgid(user.gid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
        setuid(user.uid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;

        let process_env = ProcessEnv;
        process_env.set_var("HOME", &user.dir.to_string_lossy());
        process_env.set_var("USER", &user.name);
        process_env.set_var("LOGNAME", &user.name);
        Ok(())
    }

    /// Applies the payload's environment overrides; `None` unsets a key.
    pub fn apply_environment(store: &impl EnvStore, overrides: &[(String, Option<PlainSecret>)]) {
        for (key, value) in overrides {
            match value {
                Some(secret) => store.set_var(key, secret.expose()),
                None => store.remove_var(key),
            }
        }
    }

    /// Runs one lifecycle step. `setup` also starts the server.
    pub async fn execute(
        operation: Operation,
        postgres: &mut impl PostgresLifecycle,
    ) -> Result<(), WorkerError> {
        run_step(operation, postgres)
            .await
            .map_err(|err| WorkerError::Postgres {
                operation,
                message: err.to_string(),
            })
    }

    async fn run_step(
        operation: Operation,
        postgres: &mut impl PostgresLifecycle,
    ) -> Result<(), BoxError> {
        match operation {
            Operation::Setup => {
                postgres.setup().await?;
                ensure_started(postgres).await
            }
            Operation::Start => ensure_started(postgres).await,
            Operation::Stop => postgres.stop().await,
        }
    }

    async fn ensure_started(postgres: &mut impl PostgresLifecycle) -> Result<(), BoxError> {
        if matches!(postgres.status(), Status::Started) {
            return Ok(());
        }
        postgres.start().await
    }
}
