use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::errors::PledgeError;
use crate::value::{Function, Value};

#[derive(Debug, Clone)]
pub enum Property {
    Data(Value),
    /// Computed on every read; the getter receives the owner as `this`.
    Accessor(Function),
}

#[derive(Clone, Default)]
pub struct Object {
    properties: Rc<RefCell<HashMap<String, Property>>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_getter(self, key: impl Into<String>, getter: Function) -> Self {
        self.define_getter(key, getter);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties
            .borrow_mut()
            .insert(key.into(), Property::Data(value.into()));
    }

    pub fn define_getter(&self, key: impl Into<String>, getter: Function) {
        self.properties
            .borrow_mut()
            .insert(key.into(), Property::Accessor(getter));
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.borrow().contains_key(key)
    }

    /// Reads `key`, running its getter with `this` if it is an accessor.
    pub fn get(&self, this: &Value, key: &str) -> Result<Value, PledgeError> {
        let property = self.properties.borrow().get(key).cloned();
        match property {
            Some(Property::Data(value)) => Ok(value),
            Some(Property::Accessor(getter)) => getter.call(this.clone(), Vec::new()),
            None => Ok(Value::Undefined),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.properties.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.properties, &other.properties)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
