use super::Value;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s}"),
            Value::Error(error) => write!(f, "{error}"),
            Value::Function(function) => {
                write!(f, "function {}() {{ [native code] }}", function.name())
            }
            Value::Object(object) => write!(f, "{{ {} }}", object.keys().join(", ")),
            Value::Pledge(pledge) => write!(f, "{pledge}"),
        }
    }
}
