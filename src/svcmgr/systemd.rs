use super::{
    EnsureOutcome, ServiceDescriptor,
    classify::{self, UnitStatus},
    exec::{CommandRunner, SystemRunner},
    permissions::{AccessProbe, PermissionProbe},
    template,
    traits::ServiceManager,
};
use crate::{config::ManagerConfig, error::Error};
use log::{debug, info};
use regex::Regex;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    os::unix::fs::OpenOptionsExt,
    path::PathBuf,
};

const SVCEXT: &str = "service";

/// State changing `systemctl` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Enable,
    Start,
    Stop,
    Disable,
}

impl Verb {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Disable => "disable",
        }
    }
}

/// Gateway to systemd through its `systemctl` CLI.
pub struct Manager<R = SystemRunner, P = AccessProbe> {
    runner: R,
    probe: P,
    systemctl: String,
    unit_dir: PathBuf,
    file_mode: u32,
}

impl Manager {
    pub fn new(config: &ManagerConfig) -> Self {
        Self::with_collaborators(config, SystemRunner, AccessProbe)
    }
}

impl<R: CommandRunner, P: PermissionProbe> Manager<R, P> {
    pub fn with_collaborators(config: &ManagerConfig, runner: R, probe: P) -> Self {
        Self {
            runner,
            probe,
            systemctl: config.systemctl.clone(),
            unit_dir: config.unit_dir.clone(),
            file_mode: config.unit_file_mode.0,
        }
    }

    fn service_file_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(format!("{name}.{SVCEXT}"))
    }

    fn require_tool(&self) -> Result<(), Error> {
        match self.runner.run(&self.systemctl, &["--version"]) {
            Ok(version) if version.success() => {
                info!("Found SystemD v{}", parse_version(&version.output));
                Ok(())
            }
            Ok(_) | Err(_) => Err(Error::ToolNotFound),
        }
    }

    fn status(&self, name: &str) -> Result<UnitStatus, Error> {
        debug!("Querying status of {name}");
        let status = self
            .runner
            .run(&self.systemctl, &["status", name])
            .map_err(|why| Error::Tool(format!("failed to run {}: {why}", self.systemctl)))?;

        Ok(classify::classify_status(&status))
    }

    fn require_write_access(&self) -> Result<(), Error> {
        let writable = self
            .probe
            .can_write(&self.unit_dir)
            .map_err(|source| Error::PermissionProbe {
                path: self.unit_dir.clone(),
                source,
            })?;

        if writable {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "write access required to {}",
                self.unit_dir.display()
            )))
        }
    }

    fn install(&self, service: &ServiceDescriptor) -> Result<(), Error> {
        let path = self.service_file_path(&service.name);
        debug!("Writing {}", path.display());

        let mut svcfile = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(self.file_mode)
            .open(&path)?;

        svcfile.write_all(template::render_unit(service).as_bytes())?;
        svcfile.flush()?;

        Ok(())
    }

    fn uninstall(&self, name: &str) -> Result<(), Error> {
        let path = self.service_file_path(name);
        debug!("Removing {}", path.display());
        Ok(fs::remove_file(path)?)
    }

    fn apply(&self, verb: Verb, name: &str) -> Result<(), Error> {
        debug!("Running {} {} {name}", self.systemctl, verb.as_str());
        let result = self
            .runner
            .run(&self.systemctl, &[verb.as_str(), name])
            .map_err(|why| Error::Tool(format!("failed to run {}: {why}", self.systemctl)))?;

        let Some(failure) = result.failure() else {
            return Ok(());
        };

        if classify::needs_interactive_auth(&result.output) {
            return Err(Error::PermissionDenied(format!(
                "{} requires interactive authentication",
                verb.as_str()
            )));
        }

        Err(Error::Tool(format!("{failure}: {}", result.output)))
    }
}

impl<R: CommandRunner, P: PermissionProbe> ServiceManager for Manager<R, P> {
    fn ensure(&self, service: &ServiceDescriptor) -> Result<EnsureOutcome, Error> {
        service.validate()?;
        self.require_tool()?;

        let outcome = match self.status(&service.name)? {
            UnitStatus::Missing => {
                self.require_write_access()?;
                self.install(service)?;
                EnsureOutcome::Created
            }
            UnitStatus::Failed(output) => return Err(Error::Tool(output)),
            UnitStatus::Loaded { enablement: false } => {
                debug!("{} needs no action", service.name);
                return Ok(EnsureOutcome::Unchanged);
            }
            UnitStatus::Loaded { enablement: true } => EnsureOutcome::Activated,
        };

        for verb in [Verb::Enable, Verb::Start] {
            self.apply(verb, &service.name)?;
        }

        Ok(outcome)
    }

    fn remove_confirmed(&self, name: &str, confirm: &dyn Fn(&str) -> bool) -> Result<bool, Error> {
        ServiceDescriptor::validate_name(name)?;
        self.require_tool()?;

        match self.status(name)? {
            UnitStatus::Missing => return Err(Error::NotFound(name.to_string())),
            UnitStatus::Failed(output) => {
                return Err(Error::Tool(format!(
                    "failed to check service status: {output}"
                )));
            }
            UnitStatus::Loaded { .. } => (),
        }

        if !confirm(name) {
            return Ok(false);
        }

        self.require_write_access()?;

        for verb in [Verb::Stop, Verb::Disable] {
            self.apply(verb, name)?;
        }

        self.uninstall(name)?;
        Ok(true)
    }
}

/// Extract the detailed version from the first line of `systemctl --version`,
/// e.g. `systemd 252 (252.22-1~deb12u1)`.
fn parse_version(output: &str) -> &str {
    let first_line = output.lines().next().unwrap_or_default();

    Regex::new(r"\((.*)\)")
        .ok()
        .and_then(|version_regex| version_regex.captures(first_line))
        .and_then(|res| res.get(1))
        .map_or(first_line.trim(), |version| version.as_str())
}
