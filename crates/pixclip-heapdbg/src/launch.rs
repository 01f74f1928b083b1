use std::ffi::{OsStr, OsString};
use std::io;
use std::process::{Command, ExitCode};

use anyhow::{Context, Result};

/// One allocator environment setting.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EnvSetting {
    pub key: &'static str,
    pub value: &'static str,
    pub purpose: &'static str,
}

/// Always applied.
pub const HEAP_DIAGNOSTICS: [EnvSetting; 5] = [
    EnvSetting {
        key: "MallocNanoZone",
        value: "0",
        purpose: "disable the small-allocation fast path",
    },
    EnvSetting {
        key: "MallocScribble",
        value: "1",
        purpose: "fill allocated and freed memory with fixed byte patterns",
    },
    EnvSetting {
        key: "MallocStackLogging",
        value: "1",
        purpose: "record allocation stack traces",
    },
    EnvSetting {
        key: "MallocGuardEdges",
        value: "1",
        purpose: "guard pages around large allocations",
    },
    EnvSetting {
        key: "MallocCheckHeapStart",
        value: "1",
        purpose: "heap consistency checks from startup",
    },
];

pub const GUARD_MALLOC_LIBRARY: &str = "/usr/lib/libgmalloc.dylib";

/// Applied with `--guard-malloc`.
pub const GUARD_MALLOC: EnvSetting = EnvSetting {
    key: "DYLD_INSERT_LIBRARIES",
    value: GUARD_MALLOC_LIBRARY,
    purpose: "guard-page allocator injection",
};

/// Exit code when the target does not exist (shell convention).
pub const EXIT_NOT_FOUND: u8 = 127;
/// Exit code when the target exists but cannot be executed.
pub const EXIT_CANNOT_EXEC: u8 = 126;

/// What to run and with which settings.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    program: OsString,
    args: Vec<OsString>,
    env: Vec<EnvSetting>,
}

impl LaunchPlan {
    /// `command` is the binary followed by its arguments. Returns `None`
    /// when no binary is given.
    pub fn new(command: Vec<OsString>, guard_malloc: bool) -> Option<Self> {
        let mut it = command.into_iter();
        let program = it.next()?;

        let mut env = HEAP_DIAGNOSTICS.to_vec();
        if guard_malloc {
            env.push(GUARD_MALLOC);
        }

        Some(Self { program, args: it.collect(), env })
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env(&self) -> &[EnvSetting] {
        &self.env
    }

    /// Child command: inherited environment plus the allocator settings.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for s in &self.env {
            cmd.env(s.key, s.value);
        }
        cmd
    }

    /// `KEY=VALUE` lines followed by the command line, for `--dry-run`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for s in self.env() {
            out.push_str(&format!("{}={}\n", s.key, s.value));
        }
        out.push_str(&self.program().to_string_lossy());
        for a in self.args() {
            out.push(' ');
            out.push_str(&a.to_string_lossy());
        }
        out.push('\n');
        out
    }

    fn log_settings(&self) {
        for s in &self.env {
            if let Some(prev) = std::env::var_os(s.key) {
                if prev.as_os_str() != OsStr::new(s.value) {
                    log::warn!("{} was {:?}; overriding with {}", s.key, prev, s.value);
                }
            }
            log::debug!("{}={} ({})", s.key, s.value, s.purpose);
        }
        log::debug!("launching {}", self.program.to_string_lossy());
    }
}

/// Replaces this process with the target. Only returns on failure.
#[cfg(unix)]
pub fn launch(plan: &LaunchPlan) -> Result<ExitCode> {
    use std::os::unix::process::CommandExt as _;

    plan.log_settings();
    let err = plan.command().exec();
    Err::<ExitCode, _>(err)
        .with_context(|| format!("failed to exec {}", plan.program().to_string_lossy()))
}

/// No `exec` here: run the target as a child and mirror its exit code.
#[cfg(not(unix))]
pub fn launch(plan: &LaunchPlan) -> Result<ExitCode> {
    plan.log_settings();
    let status = plan
        .command()
        .status()
        .with_context(|| format!("failed to run {}", plan.program().to_string_lossy()))?;
    match status.code() {
        // `ExitCode` only carries a u8; exit with the full code instead.
        Some(code) => std::process::exit(code),
        None => Ok(ExitCode::FAILURE),
    }
}

/// Maps a launch failure to the exit code a shell would use.
pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<io::Error>().map(io::Error::kind) {
        Some(io::ErrorKind::NotFound) => EXIT_NOT_FOUND,
        _ => EXIT_CANNOT_EXEC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(args: &[&str], guard: bool) -> Option<LaunchPlan> {
        LaunchPlan::new(args.iter().map(OsString::from).collect(), guard)
    }

    // ── plan ──────────────────────────────────────────────────────────────

    #[test_log::test]
    fn empty_command_has_no_plan() {
        assert!(plan(&[], false).is_none());
        assert!(plan(&[], true).is_none());
    }

    #[test_log::test]
    fn splits_program_and_args() {
        let p = plan(&["./game", "--level", "3"], false).unwrap();
        assert_eq!(p.program(), "./game");
        assert_eq!(p.args(), ["--level", "3"]);
    }

    #[test_log::test]
    fn five_settings_by_default() {
        let p = plan(&["./game"], false).unwrap();
        let keys: Vec<_> = p.env().iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            [
                "MallocNanoZone",
                "MallocScribble",
                "MallocStackLogging",
                "MallocGuardEdges",
                "MallocCheckHeapStart",
            ]
        );
        assert_eq!(p.env()[0].value, "0");
        assert!(p.env()[1..].iter().all(|s| s.value == "1"));
    }

    #[test_log::test]
    fn guard_malloc_adds_sixth_setting() {
        let p = plan(&["./game"], true).unwrap();
        assert_eq!(p.env().len(), 6);
        assert_eq!(p.env()[5], GUARD_MALLOC);
        assert_eq!(GUARD_MALLOC.value, GUARD_MALLOC_LIBRARY);
    }

    // ── command ───────────────────────────────────────────────────────────

    #[test_log::test]
    fn command_carries_every_setting() {
        let p = plan(&["./game", "a"], true).unwrap();
        let cmd = p.command();
        let envs: Vec<_> = cmd.get_envs().collect();
        for s in p.env() {
            assert!(
                envs.contains(&(OsStr::new(s.key), Some(OsStr::new(s.value)))),
                "missing {}",
                s.key
            );
        }
        assert_eq!(cmd.get_program(), "./game");
        assert_eq!(cmd.get_args().collect::<Vec<_>>(), ["a"]);
    }

    #[test_log::test]
    fn describe_lists_env_then_command() {
        let text = plan(&["./game", "-x"], false).unwrap().describe();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "MallocNanoZone=0");
        assert_eq!(lines[5], "./game -x");
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test_log::test]
    fn not_found_maps_to_127() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::NotFound)).context("exec");
        assert_eq!(failure_exit_code(&err), EXIT_NOT_FOUND);
    }

    #[test_log::test]
    fn other_failures_map_to_126() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(failure_exit_code(&err), EXIT_CANNOT_EXEC);
        assert_eq!(failure_exit_code(&anyhow::anyhow!("no io error")), EXIT_CANNOT_EXEC);
    }

    #[cfg(unix)]
    #[test_log::test]
    fn missing_binary_fails_with_not_found() {
        let p = plan(&["/nonexistent/pixclip-heapdbg-target"], false).unwrap();
        let err = launch(&p).unwrap_err();
        assert_eq!(failure_exit_code(&err), EXIT_NOT_FOUND);
    }
}
