//! Shared helpers used by the server crate and the binary.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes() {
        let v = serde_json::to_value(types::Health::ok()).unwrap();
        assert_eq!(v, serde_json::json!({"status": "ok"}));
    }
}
