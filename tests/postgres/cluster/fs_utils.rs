//! Filesystem helpers for the embedded test cluster.

use super::BoxError;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use postgresql_embedded::Settings;
use std::io::ErrorKind;

pub(super) fn open_ambient_dir(path: &Utf8Path) -> Result<Dir, BoxError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| Box::new(err) as BoxError)
}

pub(super) fn open_parent_dir(path: &Utf8Path) -> Result<(Dir, &str), BoxError> {
    let file_name = path.file_name().ok_or_else(|| {
        Box::new(std::io::Error::other("path must include a file name")) as BoxError
    })?;
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    Ok((open_ambient_dir(parent)?, file_name))
}

/// Picks up the generated superuser password, if the bootstrap wrote one.
pub(super) fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let password_path = settings.password_file.to_string_lossy();
    let (dir, file_name) = open_parent_dir(Utf8Path::new(password_path.as_ref()))?;
    match dir.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Box::new(err) as BoxError),
    }
}

/// Reads the listening port from line four of `postmaster.pid`.
pub(super) fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let data_dir = settings.data_dir.to_string_lossy();
    let dir = open_ambient_dir(Utf8Path::new(data_dir.as_ref()))?;
    let contents = match dir.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(Box::new(err) as BoxError),
    };

    if let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    {
        settings.port = port;
    }
    Ok(())
}
