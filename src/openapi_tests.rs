#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, PathItemType, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();
        for schema in ["ErrorResponse", "HealthResponse", "ComparisonResult", "QuarterlyRebates"] {
            assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_comparison_result_schema_structure() {
        let properties = object_properties("ComparisonResult");
        for field in [
            "brand",
            "practice",
            "competitor",
            "savings",
            "wearer_status",
            "current_quarter",
            "insurance_benefit",
        ] {
            assert!(properties.iter().any(|p| p == field), "missing {}", field);
        }
    }

    #[test]
    fn test_openapi_paths_are_documented() {
        let openapi = ApiDoc::openapi();
        let expected = [
            ("/health", PathItemType::Get),
            ("/api/v1/auth/register", PathItemType::Post),
            ("/api/v1/auth/login", PathItemType::Post),
            ("/api/v1/profile", PathItemType::Get),
            ("/api/v1/admin/brands", PathItemType::Get),
            ("/api/v1/admin/brands", PathItemType::Post),
            ("/api/v1/admin/brands/{brand_id}", PathItemType::Put),
            ("/api/v1/replacement-schedules", PathItemType::Get),
            ("/api/v1/practice/brands", PathItemType::Get),
            ("/api/v1/practice/pricing", PathItemType::Post),
            ("/api/v1/practice/settings", PathItemType::Get),
            ("/api/v1/practice/settings", PathItemType::Put),
            ("/api/v1/comparison/brands", PathItemType::Get),
            ("/api/v1/comparison", PathItemType::Post),
        ];

        for (path, method) in expected {
            let item = openapi
                .paths
                .paths
                .get(path)
                .unwrap_or_else(|| panic!("missing path {}", path));
            assert!(item.operations.contains_key(&method), "missing {:?} {}", method, path);
        }
    }

    #[test]
    fn test_comparison_documents_error_responses() {
        let openapi = ApiDoc::openapi();
        let op = openapi
            .paths
            .paths
            .get("/api/v1/comparison")
            .and_then(|item| item.operations.get(&PathItemType::Post))
            .expect("comparison operation");

        for status in ["200", "400", "401", "404"] {
            assert!(op.responses.responses.contains_key(status));
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
