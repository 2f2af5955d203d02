pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn service_info_points_at_docs() {
        let info = types::ServiceInfo::default();
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["message"], "Welcome to CRUD Service API");
        assert_eq!(v["docs"], "/swagger");
        assert_eq!(v["openapi"], "/api-docs/openapi.json");
    }
}
