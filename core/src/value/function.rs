use std::fmt;
use std::rc::Rc;

use crate::errors::PledgeError;
use crate::value::{Object, Value};

type Callback = dyn Fn(FunctionArgs) -> Result<Value, PledgeError>;

#[derive(Debug, Clone)]
pub struct FunctionArgs {
    this_value: Value,
    values: Vec<Value>,
}

impl FunctionArgs {
    pub fn new(this_value: Value, values: Vec<Value>) -> Self {
        Self { this_value, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The argument at `index`, or `undefined` when it was not supplied.
    pub fn arg(&self, index: usize) -> Value {
        self.values.get(index).cloned().unwrap_or(Value::Undefined)
    }

    pub fn this(&self) -> &Value {
        &self.this_value
    }
}

/// A host function callable from pledge handlers and thenables.
///
/// Functions carry their own property map, so a function can also be a
/// thenable.
#[derive(Clone)]
pub struct Function {
    inner: Rc<FunctionData>,
}

struct FunctionData {
    name: String,
    callback: Box<Callback>,
    properties: Object,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(FunctionArgs) -> Result<Value, PledgeError> + 'static,
    {
        Self {
            inner: Rc::new(FunctionData {
                name: name.into(),
                callback: Box::new(callback),
                properties: Object::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn call(&self, this: Value, args: Vec<Value>) -> Result<Value, PledgeError> {
        (self.inner.callback)(FunctionArgs::new(this, args))
    }

    pub fn properties(&self) -> &Object {
        &self.inner.properties
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name())
    }
}
