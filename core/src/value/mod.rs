mod display;
mod error_object;
mod function;
mod object;

pub use error_object::{ErrorKind, ErrorObject};
pub use function::{Function, FunctionArgs};
pub use object::{Object, Property};

use std::rc::Rc;

use crate::errors::PledgeError;
use crate::pledge::Pledge;

/// A dynamically typed value flowing through pledges.
///
/// Primitives compare by value; errors, functions, objects and pledges
/// compare by identity.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Error(ErrorObject),
    Function(Function),
    Object(Object),
    Pledge(Pledge),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Pledge(a), Value::Pledge(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Value {
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::String(Rc::from(text.as_ref()))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Functions, objects and pledges may carry a `then` capability.
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::Object(_) | Value::Pledge(_)
        )
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Null | Value::Error(_) | Value::Object(_) | Value::Pledge(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
            Value::Number(n) => *n,
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            _ => f64::NAN,
        }
    }

    /// Reads a named property. Accessor properties run their getter, which
    /// may fail.
    pub fn get(&self, key: &str) -> Result<Value, PledgeError> {
        match self {
            Value::Object(object) => object.get(self, key),
            Value::Function(function) => function.properties().get(self, key),
            Value::Pledge(pledge) if key == "then" => Ok(Value::Function(pledge.then_function())),
            Value::String(text) if key == "length" => {
                Ok(Value::Number(text.encode_utf16().count() as f64))
            }
            Value::Error(error) => Ok(match key {
                "message" => Value::string(error.message()),
                "name" => Value::string(error.kind().name()),
                _ => Value::Undefined,
            }),
            Value::Undefined | Value::Null => Err(PledgeError::TypeError {
                message: format!("cannot read property '{key}' of {self}"),
            }),
            _ => Ok(Value::Undefined),
        }
    }

    pub fn call(&self, this: Value, args: Vec<Value>) -> Result<Value, PledgeError> {
        match self {
            Value::Function(function) => function.call(this, args),
            other => Err(PledgeError::TypeError {
                message: format!("{} is not a function", other.type_of()),
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<ErrorObject> for Value {
    fn from(value: ErrorObject) -> Self {
        Value::Error(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Pledge> for Value {
    fn from(value: Pledge) -> Self {
        Value::Pledge(value)
    }
}
