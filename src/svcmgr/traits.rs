use super::{EnsureOutcome, ServiceDescriptor};
use crate::error::Error;

/// Operations a gateway to a *nix service manager provides for a single unit.
pub trait ServiceManager {
    /// Install the unit if needed, then enable and start it.
    fn ensure(&self, service: &ServiceDescriptor) -> Result<EnsureOutcome, Error>;

    /// Stop, disable and uninstall the unit.
    fn remove(&self, name: &str) -> Result<(), Error> {
        self.remove_confirmed(name, &|_| true).map(|_| ())
    }

    /// Like [`ServiceManager::remove`], but calls `confirm` once the unit is known
    /// to exist and before anything is changed. Returns `false` if it declined.
    fn remove_confirmed(&self, name: &str, confirm: &dyn Fn(&str) -> bool) -> Result<bool, Error>;
}
