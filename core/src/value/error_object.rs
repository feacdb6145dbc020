use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    TypeError,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
        }
    }
}

/// An error object with identity: clones share the same allocation.
#[derive(Clone)]
pub struct ErrorObject {
    inner: Rc<ErrorData>,
}

#[derive(Debug)]
struct ErrorData {
    kind: ErrorKind,
    message: String,
}

impl ErrorObject {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Error, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::TypeError, message)
    }

    pub fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ErrorData {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn message(&self) -> &str {
        &self.inner.message
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind().name(), self.message())
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind().name(), self.message())
    }
}
