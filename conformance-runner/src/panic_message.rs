use std::any::Any;

pub fn format_panic(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return format!("panic while running scenario: {msg}");
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return format!("panic while running scenario: {msg}");
    }
    "panic while running scenario".to_string()
}
