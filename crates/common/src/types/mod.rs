use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Static body of the root endpoint.
#[derive(Serialize, Debug)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub docs: &'static str,
    pub openapi: &'static str,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            message: "Welcome to CRUD Service API",
            docs: "/swagger",
            openapi: "/api-docs/openapi.json",
        }
    }
}
