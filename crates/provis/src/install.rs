use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

/// The platform installer and its fixed argument shape. Cross-platform
/// invocation semantics are out of scope; what varies per run is the
/// payload, the transform and the directory to run in.
const INSTALLER_PROGRAM: &str = "msiexec";
const UNATTENDED_FLAG: &str = "/quiet";

/// What to run once the archive is on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallSpec {
    /// Installer package file name, relative to `dir`.
    pub package: String,
    /// Transform file selecting the locale/variant.
    pub transforms: String,
    /// Directory the installer is invoked in.
    pub dir: PathBuf,
}

/// Process execution boundary, injectable for tests.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<ExitStatus>;
}

/// Runs commands on the real system.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<ExitStatus> {
        Command::new(program).args(args).current_dir(dir).status()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Invoke the platform installer against `spec` and wait for it to exit.
///
/// Success is solely "launched and returned a zero exit status"; the
/// installer's output is not interpreted.
pub fn install<R: CommandRunner>(spec: &InstallSpec, runner: &R) -> Result<(), Error> {
    let args = vec![
        "/i".to_string(),
        spec.package.clone(),
        UNATTENDED_FLAG.to_string(),
        format!("TRANSFORMS={}", spec.transforms),
    ];

    debug!(
        program = INSTALLER_PROGRAM,
        package = %spec.package,
        dir = %spec.dir.display(),
        "invoking installer"
    );

    let status = runner
        .run(INSTALLER_PROGRAM, &args, &spec.dir)
        .map_err(|e| Error::Launch {
            program: INSTALLER_PROGRAM.to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(Error::Failed {
            program: INSTALLER_PROGRAM.to_string(),
            status,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn exit_status(code: i32) -> ExitStatus {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(code as u32)
        }
    }

    struct RecordingRunner {
        exit_code: i32,
        calls: RefCell<Vec<(String, Vec<String>, PathBuf)>>,
    }

    impl RecordingRunner {
        fn with_exit_code(exit_code: i32) -> Self {
            Self {
                exit_code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<ExitStatus> {
            self.calls.borrow_mut().push((
                program.to_string(),
                args.to_vec(),
                dir.to_path_buf(),
            ));
            Ok(exit_status(self.exit_code))
        }
    }

    struct UnlaunchableRunner;

    impl CommandRunner for UnlaunchableRunner {
        fn run(&self, program: &str, _args: &[String], _dir: &Path) -> io::Result<ExitStatus> {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program}: not found"),
            ))
        }
    }

    fn spec() -> InstallSpec {
        InstallSpec {
            package: "client.msi".to_string(),
            transforms: "1049.mst".to_string(),
            dir: PathBuf::from("/tmp/extracted/setup"),
        }
    }

    #[test]
    fn invokes_installer_with_unattended_arguments() {
        let runner = RecordingRunner::with_exit_code(0);
        install(&spec(), &runner).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args, dir) = &calls[0];
        assert_eq!(program, "msiexec");
        assert_eq!(
            args,
            &["/i", "client.msi", "/quiet", "TRANSFORMS=1049.mst"]
        );
        assert_eq!(dir, Path::new("/tmp/extracted/setup"));
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let runner = RecordingRunner::with_exit_code(3);
        let result = install(&spec(), &runner);
        match result {
            Err(Error::Failed { program, status }) => {
                assert_eq!(program, "msiexec");
                assert!(!status.success());
            }
            other => panic!("expected exit failure, got {other:?}"),
        }
    }

    #[test]
    fn unlaunchable_program_is_a_launch_error() {
        let result = install(&spec(), &UnlaunchableRunner);
        assert!(matches!(result, Err(Error::Launch { .. })));
    }
}
