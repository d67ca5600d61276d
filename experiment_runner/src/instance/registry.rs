//!
//! The instance registry.
//!

use std::sync::Arc;

use crate::error::Error;

use super::Instance;

///
/// The instance registry.
///
/// Keeps the registration order and rejects duplicate names.
///
#[derive(Debug, Default)]
pub struct Registry {
    /// The registered instances.
    instances: Vec<Arc<dyn Instance>>,
}

impl Registry {
    ///
    /// Registers `instance`.
    ///
    pub fn add<I>(&mut self, instance: I) -> anyhow::Result<()>
    where
        I: Instance + 'static,
    {
        let name = instance.name();
        if self.get(name.as_str()).is_some() {
            anyhow::bail!(Error::DuplicateInstance { name });
        }
        self.instances.push(Arc::new(instance));
        Ok(())
    }

    ///
    /// Returns the instance called `name`, if registered.
    ///
    pub fn get(&self, name: &str) -> Option<Arc<dyn Instance>> {
        self.instances
            .iter()
            .find(|instance| instance.name() == name)
            .cloned()
    }

    ///
    /// Resolves the command-line instance names, keeping their order.
    ///
    pub fn select(&self, names: &[String]) -> anyhow::Result<Vec<Arc<dyn Instance>>> {
        names
            .iter()
            .map(|name| {
                self.get(name.as_str()).ok_or_else(|| {
                    anyhow::Error::from(Error::UnknownInstance {
                        name: name.to_owned(),
                        available: self.names().join(", "),
                    })
                })
            })
            .collect()
    }

    ///
    /// The registered names in registration order.
    ///
    pub fn names(&self) -> Vec<String> {
        self.instances
            .iter()
            .map(|instance| instance.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::testing::FakeInstance;

    use super::Registry;

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry
            .add(FakeInstance::new("baseline", &[]))
            .expect("Always valid");
        registry
            .add(FakeInstance::new("r2c", &[]))
            .expect("Always valid");
        registry
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut registry = registry();
        let error = registry
            .add(FakeInstance::new("r2c", &[]))
            .expect_err("Must fail");
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::DuplicateInstance { name }) if name == "r2c"
        ));
    }

    #[test]
    fn select_keeps_command_line_order() {
        let registry = registry();
        let selected = registry
            .select(&["r2c".to_owned(), "baseline".to_owned()])
            .expect("Always valid");
        let names: Vec<String> = selected.iter().map(|instance| instance.name()).collect();
        assert_eq!(names, vec!["r2c".to_owned(), "baseline".to_owned()]);
    }

    #[test]
    fn select_unknown_fails() {
        let registry = registry();
        let error = registry
            .select(&["baseline".to_owned(), "full-r2c".to_owned()])
            .expect_err("Must fail");
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::UnknownInstance { name, available })
                if name == "full-r2c" && available == "baseline, r2c"
        ));
    }
}
