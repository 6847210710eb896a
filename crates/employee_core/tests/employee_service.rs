use employee_core::{
    DatastoreEmployeeRepository, EmployeeService, RepoError, SqliteDatastore, StoreConfig,
};

#[test]
fn form_entry_points_follow_original_field_rules() {
    let store = SqliteDatastore::open_in_memory(Some("hr")).unwrap();
    let service = EmployeeService::new(DatastoreEmployeeRepository::new(&store));

    let id = service
        .add_employee_form(
            Some("avatars/ada.png"),
            "Ada Lovelace",
            "London",
            "Engineer",
            Some("python,rust"),
        )
        .unwrap();

    service
        .update_employee_form(&id, Some(""), "Ada Lovelace", "Paris", "CTO", None)
        .unwrap();

    let loaded = service.load_employee(&id).unwrap().unwrap();
    assert_eq!(loaded.location, "Paris");
    assert_eq!(loaded.job_title, "CTO");
    assert_eq!(loaded.object_key.as_deref(), Some("avatars/ada.png"));
    assert_eq!(loaded.badges, None);
}

#[test]
fn service_reports_not_found_on_update() {
    let store = SqliteDatastore::open_in_memory(None).unwrap();
    let service = EmployeeService::new(DatastoreEmployeeRepository::new(&store));

    let err = service
        .update_employee_form("ghost", None, "A", "B", "C", Some("x"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(service.employee_count().unwrap(), 0);
}

#[test]
fn configured_store_serves_the_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.sqlite3");
    let raw = serde_json::json!({
        "project": "acme",
        "db_path": path,
    })
    .to_string();
    let config = StoreConfig::from_json_str(&raw).unwrap();

    {
        let store = config.open_datastore().unwrap();
        let service = EmployeeService::new(DatastoreEmployeeRepository::new(&store));
        service
            .add_employee_form(None, "Ada Lovelace", "London", "Engineer", None)
            .unwrap();
    }

    let store = config.open_datastore().unwrap();
    let service = EmployeeService::new(DatastoreEmployeeRepository::new(&store));
    let employees = service.list_employees().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].full_name, "Ada Lovelace");
}
