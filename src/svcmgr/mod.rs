use self::traits::ServiceManager;
use crate::{
    cli::{ServiceCommand, UnitArgs},
    config::Config,
    error::Error,
};
use color_print::cprintln;
use log::{error, info, warn};
use std::{io::stdin, process::exit};

pub mod classify;
pub mod exec;
pub mod permissions;
pub mod systemd;
pub mod template;
pub mod traits;

/// Everything needed to generate a unit definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Unit name, without the `.service` suffix.
    pub name: String,
    /// Command line placed in `ExecStart=`.
    pub exec_start: String,
    /// Value of `Restart=`, e.g. `always` or `on-failure`.
    pub restart: String,
    /// Value of `RestartSec=`. Not validated.
    pub restart_sec: String,
}

/// What [`ServiceManager::ensure`] did to reach the desired state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The definition file was written, then the unit was enabled and started.
    Created,
    /// The unit already existed and was enabled and started.
    Activated,
    /// The unit already existed and nothing was done.
    Unchanged,
}

impl ServiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        exec_start: impl Into<String>,
        restart: impl Into<String>,
        restart_sec: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            exec_start: exec_start.into(),
            restart: restart.into(),
            restart_sec: restart_sec.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        Self::validate_name(&self.name)
    }

    /// The name doubles as a file name inside the unit directory.
    pub fn validate_name(name: &str) -> Result<(), Error> {
        if name.is_empty() || name.contains(['/', '\0']) {
            return Err(Error::InvalidName(name.to_string()));
        }

        Ok(())
    }
}

pub fn main(cmd: ServiceCommand, config: &Config) {
    match cmd {
        ServiceCommand::Ensure { unit } => {
            let service = descriptor(unit, config);
            let manager = systemd_manager(config);

            match manager.ensure(&service) {
                Ok(EnsureOutcome::Created) => info!("Service {} installed and started", service.name),
                Ok(EnsureOutcome::Activated) => info!("Service {} enabled and started", service.name),
                Ok(EnsureOutcome::Unchanged) => info!("Service {} already set up, nothing to do", service.name),
                Err(why) => fail("ensure", &why),
            }
        }
        ServiceCommand::Remove { name, yes } => {
            let manager = systemd_manager(config);
            let confirm = |name: &str| yes || confirm_removal(name);

            match manager.remove_confirmed(&name, &confirm) {
                Ok(true) => info!("Service {name} removed successfully"),
                Ok(false) => {
                    info!("Operation cancelled, nothing was done.");
                    exit(1);
                }
                Err(why) => fail("remove", &why),
            }
        }
        ServiceCommand::Render { unit } => {
            let service = descriptor(unit, config);
            if let Err(why) = service.validate() {
                fail("render", &why);
            }

            println!("{}", template::render_unit(&service));
        }
    }
}

fn descriptor(unit: UnitArgs, config: &Config) -> ServiceDescriptor {
    ServiceDescriptor {
        name: unit.name,
        exec_start: unit.exec_start,
        restart: unit
            .restart
            .unwrap_or_else(|| config.defaults.restart.clone()),
        restart_sec: unit
            .restart_sec
            .unwrap_or_else(|| config.defaults.restart_sec.clone()),
    }
}

fn fail(action_name: &str, why: &Error) -> ! {
    error!("Failed to {action_name} service: {why}");

    if matches!(why, Error::PermissionDenied(_)) {
        warn!("Try again as root");
    }

    exit(1);
}

fn systemd_manager(config: &Config) -> Box<dyn ServiceManager> {
    Box::new(systemd::Manager::new(&config.manager))
}

fn confirm_removal(name: &str) -> bool {
    cprintln!(
        "\n<red><bold><underline>WARNING:</> <yellow>THIS WILL STOP, DISABLE AND DELETE THE SERVICE</> <bright-blue><bold>\"{name}\"</>"
    );
    cprintln!("\n<blue>TYPE THE SERVICE NAME TO CONFIRM:</>");

    let mut buf = String::new();
    stdin().read_line(&mut buf).unwrap_or_default();

    buf.trim_end() == name
}
