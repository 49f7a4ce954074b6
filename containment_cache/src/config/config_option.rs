use crate::types::err::{self};

/// A named configuration value, together with the bounds within which the value may be set.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    /// Sets the value of the option, if the value is within the bounds of the option.
    pub fn set(&mut self, value: T) -> Result<(), err::ConfigError> {
        if value < self.min || self.max < value {
            log::warn!("Value for {} is out of bounds", self.name);
            return Err(err::ConfigError::OutOfBounds(self.name));
        }
        self.value = value;
        Ok(())
    }
}
